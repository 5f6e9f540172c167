//! Response conventions of the backend endpoints.
//!
//! The backend is not consistent across endpoints (status codes, nested
//! success flags, where the payload lives), so each endpoint declares its
//! own contract and one routine interprets a response against it.

use reqwest::StatusCode;
use serde_json::Value;

use crate::features::edu_agent::tools::ToolError;

#[derive(Debug, Clone, Copy)]
pub struct ResponseContract {
    pub expected_status: StatusCode,
    /// JSON paths that must all hold `true`
    pub success_paths: &'static [&'static [&'static str]],
    /// JSON path of the payload; missing or null means empty
    pub data_path: &'static [&'static str],
    /// Error message used when the body carries no `message`
    pub fallback_message: &'static str,
}

/// `GET {BASE_API}/classes/of/{role}/{user_id}`
pub const CLASSES_OF_USER: ResponseContract = ResponseContract {
    expected_status: StatusCode::OK,
    success_paths: &[&["success"]],
    data_path: &["data"],
    fallback_message: "error from request for get class ids",
};

/// `POST {BASE_API}/exams/of`
pub const EXAMS_OF_CLASSES: ResponseContract = ResponseContract {
    expected_status: StatusCode::CREATED,
    success_paths: &[&["success"], &["data", "success"]],
    data_path: &["data", "value"],
    fallback_message: "error from request for get all exams of class ids",
};

/// `GET {BASE_API}/classes/{class_id}/get-all-materials`
pub const MATERIALS_OF_CLASS: ResponseContract = ResponseContract {
    expected_status: StatusCode::CREATED,
    success_paths: &[&["success"]],
    data_path: &["data"],
    fallback_message: "error from request for get all material inforamtion of class ids",
};

fn lookup<'a>(body: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(body, |value, key| value.get(*key))
}

impl ResponseContract {
    /// Extract the payload of a response, or the error it stands for.
    ///
    /// `body` is `None` when the response was not valid JSON.
    pub fn interpret(&self, status: StatusCode, body: Option<&Value>) -> Result<Value, ToolError> {
        let Some(body) = body else {
            return Err(if status == self.expected_status {
                ToolError::InvalidResponse(format!("status {} with a non-JSON body", status))
            } else {
                ToolError::Backend(self.fallback_message.to_string())
            });
        };

        let succeeded = status == self.expected_status
            && self
                .success_paths
                .iter()
                .all(|path| matches!(lookup(body, path), Some(Value::Bool(true))));

        if succeeded {
            return Ok(match lookup(body, self.data_path) {
                None | Some(Value::Null) => Value::Array(Vec::new()),
                Some(data) => data.clone(),
            });
        }

        let message = match body.get("message") {
            Some(Value::String(message)) => message.clone(),
            None | Some(Value::Null) => self.fallback_message.to_string(),
            Some(other) => other.to_string(),
        };
        Err(ToolError::Backend(message))
    }
}
