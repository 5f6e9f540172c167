use utoipa::{Modify, OpenApi};

use crate::features::edu_agent::{dtos as edu_agent_dtos, handlers as edu_agent_handlers};
use crate::features::health::{dtos as health_dtos, handlers as health_handlers};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health_handlers::health_check,
        // Chat
        edu_agent_handlers::chat_handler::chat,
    ),
    components(
        schemas(
            health_dtos::HealthResponseDto,
            edu_agent_dtos::ChatRequestDto,
            edu_agent_dtos::ChatFormDto,
        )
    ),
    tags(
        (name = "health", description = "Service liveness"),
        (name = "chat", description = "Streaming conversation with the EduAssist agent"),
    ),
    info(
        title = "EduAssist Chatbot API",
        version = "0.1.0",
        description = "Student assistant chat service",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_endpoints() {
        let mut openapi = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Custom".to_string(),
            version: "9.9.9".to_string(),
            description: "desc".to_string(),
        }
        .modify(&mut openapi);

        assert_eq!(openapi.info.title, "Custom");
        assert!(openapi.paths.paths.contains_key("/health"));
        assert!(openapi.paths.paths.contains_key("/chat"));
    }

    #[test]
    fn test_document_registers_request_schemas() {
        let openapi = ApiDoc::openapi();
        let schemas = &openapi.components.as_ref().unwrap().schemas;

        assert!(schemas.contains_key("HealthResponseDto"));
        assert!(schemas.contains_key("ChatRequestDto"));
        assert!(schemas.contains_key("ChatFormDto"));
    }
}
