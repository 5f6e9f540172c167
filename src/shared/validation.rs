use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Characters that may never appear in a stored file name:
    /// path separators, NUL and other control characters.
    /// - Valid: "notes.pdf", "Bài giảng 1.docx", "report (final).xlsx"
    /// - Invalid: "../etc/passwd", "a/b.txt", "a\\b.txt", "bad\u{0}.txt"
    pub static ref UNSAFE_FILE_NAME_CHARS: Regex = Regex::new(r"[/\\\x00-\x1f\x7f]").unwrap();
}

/// Check that a file name is a single, plain path component.
pub fn is_safe_file_name(name: &str) -> bool {
    !name.trim().is_empty()
        && name != "."
        && name != ".."
        && !UNSAFE_FILE_NAME_CHARS.is_match(name)
}

/// Reduce a client-supplied upload name to its last path component.
///
/// Browsers may send full paths (`C:\Users\me\notes.pdf`); only the final
/// component is kept. Returns `None` when nothing safe remains.
pub fn sanitize_upload_name(raw: &str) -> Option<String> {
    let last = raw.rsplit(['/', '\\']).next().unwrap_or("").trim();

    if is_safe_file_name(last) {
        Some(last.to_string())
    } else {
        None
    }
}
