use serde_json::Value;

use super::{envelope_result, parse_input};
use crate::features::edu_agent::clients::BackendClient;
use crate::features::edu_agent::dtos::{
    GetAllMaterialInfoOfClassInput, GetAllMaterialInfoOfClassOutput,
};
use crate::features::edu_agent::models::MaterialInfo;
use crate::features::edu_agent::tools::ToolError;
use crate::modules::agent::{ToolContext, ToolResult};

/// Handle the `get_all_material_info_of_class` tool call
pub async fn handle_get_all_material_info(
    args: Value,
    ctx: ToolContext,
    backend: &BackendClient,
) -> ToolResult {
    let output = GetAllMaterialInfoOfClassOutput::from(get_all_material_info(args, backend).await);
    envelope_result(&ctx, &output)
}

async fn get_all_material_info(
    args: Value,
    backend: &BackendClient,
) -> Result<Vec<MaterialInfo>, ToolError> {
    let input: GetAllMaterialInfoOfClassInput = parse_input(args)?;
    backend.fetch_materials_for_class(input.class_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::BackendConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_materials_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/classes/8/get-all-materials"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "success": true,
                "data": [
                    { "material_id": 1, "title": "Syllabus", "type": "document", "file_size": 1200 },
                    { "material_id": 2, "title": "Lecture", "type": null, "file_size": 90000 }
                ]
            })))
            .mount(&server)
            .await;
        let backend = BackendClient::new(&BackendConfig::new(server.uri()));
        let ctx = ToolContext {
            thread_id: "t".into(),
            tool_call_id: "call_m".into(),
            tool_name: "get_all_material_info_of_class".into(),
        };

        let result = handle_get_all_material_info(json!({ "class_id": 8 }), ctx, &backend).await;

        let value: Value = serde_json::from_str(&result.content).unwrap();
        assert!(value["error"].is_null());
        assert_eq!(value["material_info_list"][0]["type"], "document");
        assert_eq!(value["material_info_list"][1]["type"], "other");
    }

    #[tokio::test]
    async fn test_missing_class_id() {
        let backend = BackendClient::new(&BackendConfig::new("http://127.0.0.1:1"));
        let ctx = ToolContext {
            thread_id: "t".into(),
            tool_call_id: "call_m".into(),
            tool_name: "get_all_material_info_of_class".into(),
        };

        let result = handle_get_all_material_info(json!({}), ctx, &backend).await;

        let value: Value = serde_json::from_str(&result.content).unwrap();
        assert!(value["material_info_list"].is_null());
        assert!(value["error"].as_str().unwrap().contains("class_id"));
    }
}
