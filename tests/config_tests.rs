use pretty_assertions::assert_eq;
use qa_server::{
    Error,
    config::{self, Config, ModelProvider},
    qa::{self, QaModel},
};

mod common;

use common::test_utils::{
    SAMPLE_CONFIG_YAML, create_temp_dir, create_test_config, create_test_config_file,
};

#[test]
fn test_defaults_match_original_service() {
    let config = Config::default();

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 5000);
    assert_eq!(config.server.logs.level, "info");
    assert_eq!(config.model.provider, ModelProvider::Huggingface);
    assert_eq!(
        config.model.name,
        "bert-large-uncased-whole-word-masking-finetuned-squad"
    );
    assert_eq!(config.model.request_timeout_secs, None);
}

#[tokio::test]
async fn test_load_from_yaml_file() {
    let dir = create_temp_dir();
    let path = create_test_config_file(&dir, SAMPLE_CONFIG_YAML)
        .await
        .unwrap();

    let config = config::load_from(&path).await.unwrap();

    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8081);
    assert_eq!(config.server.max_body_bytes, 4096);
    assert_eq!(config.server.logs.level, "debug");
    assert_eq!(config.model.base_url, "http://localhost:9000");
    assert_eq!(config.model.name, "distilbert-base-cased-distilled-squad");
    assert_eq!(config.model.api_key, "hf_test");
    assert_eq!(config.model.request_timeout_secs, Some(10));
    assert_eq!(config.model.max_answer_len, Some(20));
    assert_eq!(config.model.handle_impossible_answer, None);
}

#[tokio::test]
async fn test_partial_yaml_fills_defaults() {
    let dir = create_temp_dir();
    let path = create_test_config_file(&dir, "model:\n  provider: lexical\n")
        .await
        .unwrap();

    let config = config::load_from(&path).await.unwrap();

    assert_eq!(config.model.provider, ModelProvider::Lexical);
    assert_eq!(config.server.port, 5000);
    assert_eq!(config.server.host, "127.0.0.1");
}

#[tokio::test]
async fn test_missing_file_uses_defaults() {
    let dir = create_temp_dir();
    let path = dir.path().join("absent.yaml");

    let config = config::load_from(&path).await.unwrap();

    assert_eq!(config.server.port, 5000);
}

#[tokio::test]
async fn test_invalid_yaml_is_an_error() {
    let dir = create_temp_dir();
    let path = create_test_config_file(&dir, "server: [unclosed")
        .await
        .unwrap();

    let result = config::load_from(&path).await;

    assert!(matches!(result, Err(Error::Yaml(_))));
}

#[tokio::test]
async fn test_unknown_provider_is_an_error() {
    let dir = create_temp_dir();
    let path = create_test_config_file(&dir, "model:\n  provider: onnx\n")
        .await
        .unwrap();

    assert!(config::load_from(&path).await.is_err());
}

#[test]
fn test_build_model_uses_configured_provider() {
    let config = create_test_config();
    let model = qa::build_model(&config.model).unwrap();
    assert_eq!(model.name(), "lexical-test");

    let mut remote = config.model.clone();
    remote.provider = ModelProvider::Huggingface;
    remote.name = "deepset/roberta-base-squad2".to_string();
    let model = qa::build_model(&remote).unwrap();
    assert_eq!(model.name(), "deepset/roberta-base-squad2");
}

#[tokio::test]
async fn test_config_path_variable_selects_file() {
    let dir = create_temp_dir();
    let path = create_test_config_file(&dir, SAMPLE_CONFIG_YAML)
        .await
        .unwrap();

    let config = config::load_with(|key| match key {
        config::CONFIG_PATH_ENV => Some(path.clone()),
        _ => None,
    })
    .await
    .unwrap();

    assert_eq!(config.server.port, 8081);
    assert_eq!(config.model.api_key, "hf_test");
}

#[tokio::test]
async fn test_api_token_variable_replaces_file_value() {
    let dir = create_temp_dir();
    let path = create_test_config_file(&dir, SAMPLE_CONFIG_YAML)
        .await
        .unwrap();

    let config = config::load_with(|key| match key {
        config::CONFIG_PATH_ENV => Some(path.clone()),
        config::API_TOKEN_ENV => Some("hf_from_env".to_string()),
        _ => None,
    })
    .await
    .unwrap();

    assert_eq!(config.model.api_key, "hf_from_env");
    assert_eq!(config.model.name, "distilbert-base-cased-distilled-squad");
}

#[test]
fn test_apply_env_without_token_keeps_file_value() {
    let mut file_config = Config::default();
    file_config.model.api_key = "hf_file".to_string();

    let config = config::apply_env(file_config, |_| None);

    assert_eq!(config.model.api_key, "hf_file");
}

#[test]
fn test_apply_env_with_token_replaces_key() {
    let mut file_config = Config::default();
    file_config.model.api_key = "hf_file".to_string();

    let config = config::apply_env(file_config, |key| {
        (key == config::API_TOKEN_ENV).then(|| "hf_env".to_string())
    });

    assert_eq!(config.model.api_key, "hf_env");
}
