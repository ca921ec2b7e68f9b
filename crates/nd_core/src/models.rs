use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use crate::types::{GenerationParams, LabelScore};
use crate::Result;

#[async_trait]
pub trait SummarizationModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Generate an abstractive summary of already-prepared input text
    async fn summarize(&self, input: &str, params: &GenerationParams) -> Result<String>;
}

#[async_trait]
pub trait SentimentModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Classify text, returning the top label if the model produced one
    async fn classify(&self, input: &str) -> Result<Option<LabelScore>>;
}

/// Source of the optional models. Each acquisition may fail independently.
#[async_trait]
pub trait ModelProvider: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    async fn load_summarizer(&self) -> Result<Arc<dyn SummarizationModel>>;

    async fn load_sentiment(&self) -> Result<Arc<dyn SentimentModel>>;
}
