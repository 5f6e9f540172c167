use serde_json::Value;
use tracing::debug;

use super::{envelope_result, parse_input};
use crate::features::edu_agent::clients::BackendClient;
use crate::features::edu_agent::dtos::{ExamScheduleOutput, UserInfoInput};
use crate::features::edu_agent::tools::ToolError;
use crate::modules::agent::{ToolContext, ToolResult};

/// Handle the `get_exam_schedule` tool call
pub async fn handle_get_exam_schedule(
    args: Value,
    ctx: ToolContext,
    backend: &BackendClient,
) -> ToolResult {
    let output = ExamScheduleOutput::from(get_exam_schedule(args, backend).await);
    envelope_result(&ctx, &output)
}

async fn get_exam_schedule(args: Value, backend: &BackendClient) -> Result<Vec<Value>, ToolError> {
    let input: UserInfoInput = parse_input(args)?;

    let class_ids: Vec<i64> = backend
        .fetch_classes_of(input.user_id, input.user_role)
        .await?
        .into_iter()
        .filter_map(|class| class.class_id)
        .collect();

    debug!(
        "Resolved {} classes for {} {}",
        class_ids.len(),
        input.user_role,
        input.user_id
    );

    backend.fetch_exams_for_classes(&class_ids).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::BackendConfig;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn ctx() -> ToolContext {
        ToolContext {
            thread_id: "t".into(),
            tool_call_id: "call_1".into(),
            tool_name: "get_exam_schedule".into(),
        }
    }

    #[tokio::test]
    async fn test_returns_exams_of_all_classes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/classes/of/student/10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [{ "class_id": 1 }, { "class_id": 2 }]
            })))
            .mount(&server)
            .await;
        let exams = json!([
            { "exam_id": 1, "date": "2025-01-10" },
            { "exam_id": 2, "date": "2025-01-12" },
            { "exam_id": 3, "date": "2025-01-15" }
        ]);
        Mock::given(method("POST"))
            .and(path("/exams/of"))
            .and(body_json(json!({ "class_ids": [1, 2] })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "success": true,
                "data": { "success": true, "value": exams.clone() }
            })))
            .expect(1)
            .mount(&server)
            .await;
        let backend = BackendClient::new(&BackendConfig::new(server.uri()));

        let result = handle_get_exam_schedule(
            json!({ "user_id": 10, "user_role": "student" }),
            ctx(),
            &backend,
        )
        .await;

        let value: Value = serde_json::from_str(&result.content).unwrap();
        assert_eq!(value["exams"], exams);
        assert!(value["error"].is_null());
    }

    #[tokio::test]
    async fn test_null_class_ids_are_skipped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/classes/of/teacher/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [{ "class_id": null }, { "class_name": "No id" }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;
        let backend = BackendClient::new(&BackendConfig::new(server.uri()));

        let result = handle_get_exam_schedule(
            json!({ "user_id": 5, "user_role": "teacher" }),
            ctx(),
            &backend,
        )
        .await;

        let value: Value = serde_json::from_str(&result.content).unwrap();
        assert_eq!(value, json!({ "exams": [], "error": null }));
    }

    #[tokio::test]
    async fn test_class_lookup_failure_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/classes/of/student/10"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "success": false
            })))
            .mount(&server)
            .await;
        let backend = BackendClient::new(&BackendConfig::new(server.uri()));

        let result = handle_get_exam_schedule(
            json!({ "user_id": 10, "user_role": "student" }),
            ctx(),
            &backend,
        )
        .await;

        let value: Value = serde_json::from_str(&result.content).unwrap();
        assert!(value["exams"].is_null());
        assert_eq!(value["error"], "error from request for get class ids");
    }
}
