use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::contract::{ResponseContract, CLASSES_OF_USER, EXAMS_OF_CLASSES, MATERIALS_OF_CLASS};
use crate::core::config::BackendConfig;
use crate::features::edu_agent::models::{ClassInfo, MaterialInfo, UserRole};
use crate::features::edu_agent::tools::ToolError;

/// Client for the school backend REST API
#[derive(Debug, Clone)]
pub struct BackendClient {
    http_client: reqwest::Client,
    base_api: String,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_api: config.base_api.clone(),
        }
    }

    /// Classes of a user, in the order the backend returns them
    pub async fn fetch_classes_of(
        &self,
        user_id: i64,
        role: UserRole,
    ) -> Result<Vec<ClassInfo>, ToolError> {
        let url = format!("{}/classes/of/{}/{}", self.base_api, role, user_id);
        let data = self
            .send(self.http_client.get(&url), &CLASSES_OF_USER)
            .await?;
        decode(data)
    }

    /// Exam records of the given classes, passed through as-is.
    /// An empty id list is answered locally.
    pub async fn fetch_exams_for_classes(&self, class_ids: &[i64]) -> Result<Vec<Value>, ToolError> {
        if class_ids.is_empty() {
            debug!("No class ids, skipping exam lookup");
            return Ok(Vec::new());
        }

        let url = format!("{}/exams/of", self.base_api);
        let request = self
            .http_client
            .post(&url)
            .json(&json!({ "class_ids": class_ids }));
        let data = self.send(request, &EXAMS_OF_CLASSES).await?;
        decode(data)
    }

    pub async fn fetch_materials_for_class(
        &self,
        class_id: i64,
    ) -> Result<Vec<MaterialInfo>, ToolError> {
        let url = format!("{}/classes/{}/get-all-materials", self.base_api, class_id);
        let data = self
            .send(self.http_client.get(&url), &MATERIALS_OF_CLASS)
            .await?;
        decode(data)
    }

    async fn send(
        &self,
        request: RequestBuilder,
        contract: &ResponseContract,
    ) -> Result<Value, ToolError> {
        let response = request.send().await.map_err(|e| {
            warn!("Backend request failed: {}", e);
            ToolError::Transport(e.to_string())
        })?;

        let status = response.status();
        let url = response.url().to_string();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ToolError::Transport(e.to_string()))?;
        let body = serde_json::from_slice::<Value>(&bytes).ok();

        debug!("Backend responded {} for {}", status, url);

        contract.interpret(status, body.as_ref()).inspect_err(|e| {
            warn!("Backend call to {} failed: {}", url, e);
        })
    }
}

fn decode<T: DeserializeOwned>(data: Value) -> Result<T, ToolError> {
    serde_json::from_value(data).map_err(|e| ToolError::InvalidResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client(server: &MockServer) -> BackendClient {
        BackendClient::new(&BackendConfig::new(server.uri()))
    }

    #[tokio::test]
    async fn test_fetch_classes_maps_records_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/classes/of/student/10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [
                    { "class_id": 2, "class_name": "Physics", "room": "B2" },
                    { "class_id": 1, "class_code": "MATH101" }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let classes = client(&server)
            .await
            .fetch_classes_of(10, UserRole::Student)
            .await
            .unwrap();

        assert_eq!(classes.len(), 2);
        assert_eq!(classes[0].class_id, Some(2));
        assert_eq!(classes[0].class_name.as_deref(), Some("Physics"));
        assert_eq!(classes[0].class_code, None);
        assert_eq!(classes[1].class_code.as_deref(), Some("MATH101"));
    }

    #[tokio::test]
    async fn test_fetch_classes_backend_message_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/classes/of/teacher/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "message": "Teacher 3 does not exist"
            })))
            .mount(&server)
            .await;

        let err = client(&server)
            .await
            .fetch_classes_of(3, UserRole::Teacher)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Teacher 3 does not exist");
    }

    #[tokio::test]
    async fn test_fetch_exams_posts_class_ids() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/exams/of"))
            .and(body_json(json!({ "class_ids": [1, 2] })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "success": true,
                "data": { "success": true, "value": [{ "exam_id": 5, "room": "A1" }] }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let exams = client(&server)
            .await
            .fetch_exams_for_classes(&[1, 2])
            .await
            .unwrap();
        assert_eq!(exams, vec![json!({ "exam_id": 5, "room": "A1" })]);
    }

    #[tokio::test]
    async fn test_fetch_exams_empty_ids_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let exams = client(&server)
            .await
            .fetch_exams_for_classes(&[])
            .await
            .unwrap();
        assert!(exams.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_materials_requires_created() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/classes/4/get-all-materials"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": []
            })))
            .mount(&server)
            .await;

        let err = client(&server)
            .await
            .fetch_materials_for_class(4)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "error from request for get all material inforamtion of class ids"
        );
    }

    #[tokio::test]
    async fn test_fetch_materials_maps_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/classes/4/get-all-materials"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "success": true,
                "data": [{ "material_id": 1, "title": "Week 1", "type": "document", "file_size": 10 }]
            })))
            .mount(&server)
            .await;

        let materials = client(&server)
            .await
            .fetch_materials_for_class(4)
            .await
            .unwrap();
        assert_eq!(materials[0].title.as_deref(), Some("Week 1"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let backend = BackendClient::new(&BackendConfig::new("http://127.0.0.1:1"));
        let err = backend
            .fetch_classes_of(1, UserRole::Student)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Transport(_)));
    }
}
