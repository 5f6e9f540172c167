use serde::{Deserialize, Serialize};

/// A class the user belongs to, as reported by the backend.
/// Unknown fields are ignored and missing ones stay null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassInfo {
    pub class_id: Option<i64>,
    pub class_name: Option<String>,
    pub class_code: Option<String>,
    pub description: Option<String>,
}
