use super::types::{QaAnswer, QaInput};
use crate::Result;
use async_trait::async_trait;

/// An extractive question-answering capability.
///
/// Implementations are shared read-only across concurrent requests.
#[async_trait]
pub trait QaModel: Send + Sync {
    async fn answer(&self, input: &QaInput) -> Result<QaAnswer>;

    /// Identifier reported by the health endpoint.
    fn name(&self) -> &str;
}
