use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub backend: BackendConfig,
    pub upload: UploadConfig,
    pub llm: LlmConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

/// Root of the external backend REST API that owns class, exam and material data
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_api: String,
}

/// Where chat uploads land on disk
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub upload_dir: PathBuf,
}

/// OpenAI-compatible model settings shared by the agent and the summarizer
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    /// Optional override for OpenAI-compatible gateways
    pub base_url: Option<String>,
    pub model_name: String,
    pub max_iterations: usize,
    /// User turns kept per thread before the oldest are dropped
    pub max_history_turns: usize,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            backend: BackendConfig::from_env()?,
            upload: UploadConfig::from_env()?,
            llm: LlmConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    const DEFAULT_PORT: u16 = 9876;
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 50 * 1024 * 1024; // 50MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| Self::DEFAULT_PORT.to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid SERVER_PORT: {}", e))?;

        let cors_allowed_origins = parse_origins(
            &env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()),
        );

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse CORS allowed origins from a comma-separated string
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parse a count that must be at least 1
fn parse_positive(name: &str, raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err(format!("{} must be at least 1", name)),
        Ok(value) => Ok(value),
        Err(_) => Err(format!("{} must be a valid number", name)),
    }
}

impl BackendConfig {
    pub fn new(base_api: impl Into<String>) -> Self {
        Self {
            base_api: base_api.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_env() -> Result<Self, String> {
        let base_api = env::var("BASE_API")
            .map_err(|_| "BASE_API environment variable is required".to_string())?;

        if base_api.trim().is_empty() {
            return Err("BASE_API must not be empty".to_string());
        }

        Ok(Self::new(base_api.trim()))
    }
}

impl UploadConfig {
    /// Sub-directory of the upload root holding chat attachments
    pub const TEMP_SUBDIR: &'static str = "temp";

    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
        }
    }

    pub fn from_env() -> Result<Self, String> {
        let upload_dir = env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string());
        Ok(Self::new(upload_dir))
    }

    /// `{UPLOAD_DIR}/temp`, the directory both uploads and `summary_file` use
    pub fn temp_dir(&self) -> PathBuf {
        self.upload_dir.join(Self::TEMP_SUBDIR)
    }
}

impl LlmConfig {
    const DEFAULT_MODEL_NAME: &'static str = "gpt-4o-mini";
    const DEFAULT_MAX_ITERATIONS: usize = 10;
    const DEFAULT_MAX_HISTORY_TURNS: usize = 20;
    const DEFAULT_TIMEOUT_SECS: u64 = 300; // 5 minutes

    pub fn from_env() -> Result<Self, String> {
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| "OPENAI_API_KEY environment variable is required".to_string())?;

        let base_url = env::var("OPENAI_BASE_URL").ok().filter(|s| !s.is_empty());

        let model_name =
            env::var("MODEL_NAME").unwrap_or_else(|_| Self::DEFAULT_MODEL_NAME.to_string());

        let max_iterations = parse_positive(
            "AGENT_MAX_ITERATIONS",
            &env::var("AGENT_MAX_ITERATIONS")
                .unwrap_or_else(|_| Self::DEFAULT_MAX_ITERATIONS.to_string()),
        )?;

        let max_history_turns = parse_positive(
            "AGENT_MAX_HISTORY_TURNS",
            &env::var("AGENT_MAX_HISTORY_TURNS")
                .unwrap_or_else(|_| Self::DEFAULT_MAX_HISTORY_TURNS.to_string()),
        )?;

        let timeout_secs = env::var("LLM_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "LLM_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            api_key,
            base_url,
            model_name,
            max_iterations,
            max_history_turns,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "EduAssist Chatbot API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "API documentation for the EduAssist chatbot".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(parse_origins("*"), vec!["*".to_string()]);
        assert_eq!(
            parse_origins("http://a.test, http://b.test,,"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn test_parse_positive() {
        assert_eq!(parse_positive("AGENT_MAX_ITERATIONS", "10"), Ok(10));
        assert_eq!(parse_positive("AGENT_MAX_ITERATIONS", " 3 "), Ok(3));
        assert_eq!(
            parse_positive("AGENT_MAX_ITERATIONS", "0"),
            Err("AGENT_MAX_ITERATIONS must be at least 1".to_string())
        );
        assert_eq!(
            parse_positive("AGENT_MAX_HISTORY_TURNS", "-1"),
            Err("AGENT_MAX_HISTORY_TURNS must be a valid number".to_string())
        );
    }

    #[test]
    fn test_backend_config_trims_trailing_slash() {
        let config = BackendConfig::new("http://backend.test/api/");
        assert_eq!(config.base_api, "http://backend.test/api");
    }

    #[test]
    fn test_upload_temp_dir() {
        let config = UploadConfig::new("/srv/uploads");
        assert_eq!(config.temp_dir(), PathBuf::from("/srv/uploads/temp"));
    }

    #[test]
    fn test_swagger_credentials() {
        let mut config = SwaggerConfig {
            username: Some("admin".to_string()),
            password: None,
            title: String::new(),
            version: String::new(),
            description: String::new(),
        };
        assert_eq!(config.credentials(), None);

        config.password = Some("secret".to_string());
        assert_eq!(config.credentials(), Some("admin:secret".to_string()));
    }
}
