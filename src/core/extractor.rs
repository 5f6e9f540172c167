use axum::{
    body::Body,
    extract::{rejection::JsonRejection, FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Json,
};
use serde::de::DeserializeOwned;

use crate::core::error::AppError;

/// Body that is either JSON or `multipart/form-data`, chosen by `Content-Type`
pub enum JsonOrMultipart<T> {
    Json(T),
    Multipart(Multipart),
}

impl<T, S> FromRequest<S> for JsonOrMultipart<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?;
            return Ok(Self::Multipart(multipart));
        }

        if content_type.starts_with("application/json") {
            return match Json::<T>::from_request(req, state).await {
                Ok(Json(value)) => Ok(Self::Json(value)),
                Err(rejection) => Err(AppError::BadRequest(json_rejection_message(rejection))),
            };
        }

        Err(AppError::BadRequest(
            "Content-Type must be multipart/form-data or application/json".to_string(),
        ))
    }
}

fn json_rejection_message(rejection: JsonRejection) -> String {
    match rejection {
        JsonRejection::JsonDataError(err) => format!("Invalid JSON data: {}", err),
        JsonRejection::JsonSyntaxError(err) => format!("Invalid JSON syntax: {}", err),
        JsonRejection::MissingJsonContentType(err) => {
            format!("Missing JSON content type: {}", err)
        }
        _ => "Failed to parse JSON body".to_string(),
    }
}
