mod huggingface;
mod lexical;
mod model;
mod types;

pub use huggingface::HuggingFaceQaModel;
pub use lexical::LexicalQaModel;
pub use model::QaModel;
pub use types::*;

use crate::{
    Result,
    config::{ModelConfig, ModelProvider},
};
use std::sync::Arc;
use tracing::info;

/// Constructs the configured inference capability. Called once at startup.
pub fn build_model(config: &ModelConfig) -> Result<Arc<dyn QaModel>> {
    let model: Arc<dyn QaModel> = match config.provider {
        ModelProvider::Huggingface => Arc::new(HuggingFaceQaModel::new(config)?),
        ModelProvider::Lexical => Arc::new(LexicalQaModel::new(config.name.clone())),
    };

    info!(
        "Initialized {:?} question-answering model: {}",
        config.provider,
        model.name()
    );

    Ok(model)
}
