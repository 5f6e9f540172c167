use std::io::{Cursor, Read};

use lazy_static::lazy_static;
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use zip::ZipArchive;

use super::{DocumentError, Result};

lazy_static! {
    static ref SLIDE_NAME: Regex =
        Regex::new(r"^ppt/slides/slide(\d+)\.xml$").expect("valid slide name regex");
}

pub fn extract_docx(bytes: &[u8]) -> Result<String> {
    let mut archive = open_archive(bytes)?;
    let xml = read_entry(&mut archive, "word/document.xml")?;
    Ok(collect_text(&xml)?.trim_end().to_string())
}

/// Text of every slide in slide-number order, separated by blank lines
pub fn extract_pptx(bytes: &[u8]) -> Result<String> {
    let mut archive = open_archive(bytes)?;

    let mut slides: Vec<(u32, String)> = archive
        .file_names()
        .filter_map(|name| {
            let number = SLIDE_NAME.captures(name)?.get(1)?.as_str().parse().ok()?;
            Some((number, name.to_string()))
        })
        .collect();
    slides.sort_by_key(|(number, _)| *number);

    let mut texts = Vec::with_capacity(slides.len());
    for (_, name) in slides {
        let xml = read_entry(&mut archive, &name)?;
        let text = collect_text(&xml)?;
        let text = text.trim();
        if !text.is_empty() {
            texts.push(text.to_string());
        }
    }

    Ok(texts.join("\n\n"))
}

fn open_archive(bytes: &[u8]) -> Result<ZipArchive<Cursor<&[u8]>>> {
    ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| DocumentError::Extraction(format!("not an Office Open XML file: {}", e)))
}

fn read_entry(archive: &mut ZipArchive<Cursor<&[u8]>>, name: &str) -> Result<String> {
    let mut entry = archive
        .by_name(name)
        .map_err(|e| DocumentError::Extraction(format!("missing {}: {}", name, e)))?;
    let mut xml = String::new();
    entry.read_to_string(&mut xml)?;
    Ok(xml)
}

/// Walk a WordprocessingML or DrawingML part in document order.
///
/// Only `<t>` runs carry text. Paragraph ends and `<br/>` become newlines,
/// `<tab/>` a tab; tab stops declared under `<tabs>` are not content.
fn collect_text(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_run = false;
    let mut in_tab_stops = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| DocumentError::Extraction(format!("malformed XML: {}", e)))?;

        match event {
            Event::Start(e) => match e.local_name().as_ref() {
                b"t" => in_run = true,
                b"tabs" => in_tab_stops = true,
                b"br" => text.push('\n'),
                b"tab" if !in_tab_stops => text.push('\t'),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"br" => text.push('\n'),
                b"tab" if !in_tab_stops => text.push('\t'),
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_run = false,
                b"tabs" => in_tab_stops = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Event::Text(e) if in_run => {
                let run = e
                    .unescape()
                    .map_err(|e| DocumentError::Extraction(format!("bad text run: {}", e)))?;
                text.push_str(&run);
            }
            Event::CData(e) if in_run => {
                text.push_str(&String::from_utf8_lossy(&e.into_inner()));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::{CompressionMethod, ZipWriter};

    fn archive(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        for (name, content) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_docx_paragraphs() {
        let xml = r#"<w:document><w:body>
            <w:p><w:r><w:t>Lịch thi</w:t></w:r><w:r><w:t xml:space="preserve"> cuối kỳ</w:t></w:r></w:p>
            <w:p><w:r><w:t>A &amp; B</w:t></w:r></w:p>
        </w:body></w:document>"#;
        let bytes = archive(&[("word/document.xml", xml)]);

        assert_eq!(extract_docx(&bytes).unwrap(), "Lịch thi cuối kỳ\nA & B");
    }

    #[test]
    fn test_docx_without_document_part() {
        let bytes = archive(&[("other.xml", "<x/>")]);
        assert!(matches!(
            extract_docx(&bytes),
            Err(DocumentError::Extraction(_))
        ));
    }

    #[test]
    fn test_pptx_slides_in_numeric_order() {
        let bytes = archive(&[
            ("ppt/slides/slide10.xml", "<p:sld><a:p><a:t>Ten</a:t></a:p></p:sld>"),
            ("ppt/slides/slide2.xml", "<p:sld><a:p><a:t>Two</a:t></a:p></p:sld>"),
            ("ppt/slides/_rels/slide2.xml.rels", "<Relationships/>"),
        ]);

        assert_eq!(extract_pptx(&bytes).unwrap(), "Two\n\nTen");
    }

    #[test]
    fn test_docx_character_references_and_breaks() {
        let xml = r#"<w:document><w:body><w:p>
            <w:r><w:t>L&#7883;ch</w:t><w:br/><w:t>thi</w:t></w:r>
            <w:r><w:tab/><w:t>&#x1EA1;&lt;1&gt;</w:t></w:r>
        </w:p></w:body></w:document>"#;
        let bytes = archive(&[("word/document.xml", xml)]);

        assert_eq!(extract_docx(&bytes).unwrap(), "Lịch\nthi\tạ<1>");
    }

    #[test]
    fn test_docx_tab_stops_are_not_text() {
        let xml = r#"<w:document><w:body><w:p>
            <w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr>
            <w:r><w:t>Heading</w:t></w:r>
        </w:p></w:body></w:document>"#;
        let bytes = archive(&[("word/document.xml", xml)]);

        assert_eq!(extract_docx(&bytes).unwrap(), "Heading");
    }

    #[test]
    fn test_pptx_line_breaks_inside_paragraph() {
        let bytes = archive(&[(
            "ppt/slides/slide1.xml",
            "<p:sld><a:p><a:r><a:t>B&#224;i 1</a:t></a:r><a:br/><a:r><a:t>M&#7909;c ti&#234;u</a:t></a:r></a:p></p:sld>",
        )]);

        assert_eq!(extract_pptx(&bytes).unwrap(), "Bài 1\nMục tiêu");
    }

    #[test]
    fn test_malformed_xml_is_an_extraction_error() {
        let bytes = archive(&[("word/document.xml", "<w:document><w:p></w:document>")]);
        assert!(matches!(
            extract_docx(&bytes),
            Err(DocumentError::Extraction(_))
        ));
    }
}
