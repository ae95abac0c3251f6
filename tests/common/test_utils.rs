use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use qa_server::{
    Result,
    config::{Config, LogsConfig, ModelConfig, ModelProvider, ServerConfig},
    qa::{QaAnswer, QaModel},
    server::{self, handlers::AppState},
};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::fs;

/// Create a test configuration backed by the offline model
pub fn create_test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5000,
            max_body_bytes: 64 * 1024,
            logs: LogsConfig {
                level: "debug".to_string(),
            },
        },
        model: ModelConfig {
            provider: ModelProvider::Lexical,
            name: "lexical-test".to_string(),
            ..ModelConfig::default()
        },
    }
}

/// Build the full router around any model
pub fn create_test_app(model: Arc<dyn QaModel>) -> Router {
    let config = create_test_config();
    server::router(AppState::new(model), config.server.max_body_bytes)
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Create a test config YAML file
pub async fn create_test_config_file(dir: &TempDir, content: &str) -> Result<String> {
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, content).await?;
    Ok(config_path.to_string_lossy().to_string())
}

pub fn qa_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/qa")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn sample_answer() -> QaAnswer {
    QaAnswer {
        answer: "blue".to_string(),
        score: 0.9871,
        start: 11,
        end: 15,
    }
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "0.0.0.0"
  port: 8081
  max_body_bytes: 4096
  logs:
    level: "debug"

model:
  provider: huggingface
  base_url: "http://localhost:9000"
  name: "distilbert-base-cased-distilled-squad"
  api_key: "hf_test"
  request_timeout_secs: 10
  max_answer_len: 20
"#;
