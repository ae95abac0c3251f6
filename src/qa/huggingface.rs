use super::{
    model::QaModel,
    types::{QaAnswer, QaInput},
};
use crate::{Error, Result, config::ModelConfig};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Question answering through a hosted transformers `question-answering` pipeline.
pub struct HuggingFaceQaModel {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    parameters: PipelineParameters,
}

#[derive(Debug, Serialize)]
struct PipelineRequest<'a> {
    inputs: PipelineInputs<'a>,
    #[serde(skip_serializing_if = "PipelineParameters::is_empty")]
    parameters: &'a PipelineParameters,
    options: PipelineOptions,
}

#[derive(Debug, Serialize)]
struct PipelineInputs<'a> {
    question: &'a str,
    context: &'a str,
}

#[derive(Debug, Clone, Default, Serialize)]
struct PipelineParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_answer_len: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    handle_impossible_answer: Option<bool>,
}

impl PipelineParameters {
    fn is_empty(&self) -> bool {
        self.max_answer_len.is_none() && self.handle_impossible_answer.is_none()
    }
}

#[derive(Debug, Serialize)]
struct PipelineOptions {
    wait_for_model: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PipelineResponse {
    Failure { error: String },
    Single(QaAnswer),
    Ranked(Vec<QaAnswer>),
}

impl HuggingFaceQaModel {
    pub fn new(config: &ModelConfig) -> Result<Self> {
        if config.name.trim().is_empty() {
            return Err(Error::config("model.name must not be empty"));
        }

        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        let endpoint = format!(
            "{}/models/{}",
            config.base_url.trim_end_matches('/'),
            config.name
        );

        let api_key = if config.api_key.is_empty() {
            None
        } else {
            Some(config.api_key.clone())
        };

        Ok(Self {
            client,
            endpoint,
            model: config.name.clone(),
            api_key,
            parameters: PipelineParameters {
                max_answer_len: config.max_answer_len,
                handle_impossible_answer: config.handle_impossible_answer,
            },
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl QaModel for HuggingFaceQaModel {
    async fn answer(&self, input: &QaInput) -> Result<QaAnswer> {
        debug!(
            "Calling {} with {} chars of context",
            self.endpoint,
            input.context.chars().count()
        );

        let body = PipelineRequest {
            inputs: PipelineInputs {
                question: &input.question,
                context: &input.context,
            },
            parameters: &self.parameters,
            options: PipelineOptions {
                wait_for_model: true,
            },
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        let parsed = serde_json::from_str::<PipelineResponse>(&text);

        if !status.is_success() {
            let detail = match parsed {
                Ok(PipelineResponse::Failure { error }) => error,
                _ => text,
            };
            return Err(Error::inference(format!(
                "model endpoint returned {}: {}",
                status, detail
            )));
        }

        match parsed? {
            PipelineResponse::Failure { error } => Err(Error::inference(error)),
            PipelineResponse::Single(answer) => Ok(answer),
            PipelineResponse::Ranked(answers) => answers
                .into_iter()
                .next()
                .ok_or_else(|| Error::inference("model returned no answers")),
        }
    }

    fn name(&self) -> &str {
        &self.model
    }
}
