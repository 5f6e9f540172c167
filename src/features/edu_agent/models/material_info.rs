use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialType {
    Document,
    Image,
    Video,
    Audio,
    #[default]
    Other,
}

impl MaterialType {
    /// Unknown labels fall back to `Other`
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "document" => MaterialType::Document,
            "image" => MaterialType::Image,
            "video" => MaterialType::Video,
            "audio" => MaterialType::Audio,
            _ => MaterialType::Other,
        }
    }
}

impl<'de> Deserialize<'de> for MaterialType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(label
            .as_deref()
            .map(MaterialType::from_label)
            .unwrap_or_default())
    }
}

/// A material (uploaded file) attached to a class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialInfo {
    pub material_id: Option<i64>,
    pub title: Option<String>,
    #[serde(rename = "type", default)]
    pub material_type: MaterialType,
    pub file_size: Option<i64>,
}
