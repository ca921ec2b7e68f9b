use std::fmt;
use std::sync::Arc;
use async_trait::async_trait;
use nd_core::{GenerationParams, Result, SummarizationModel, SummaryLength};
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::models::call_with_timeout;
use crate::text;

pub mod extractive;

pub use extractive::ExtractiveSummarizer;

#[async_trait]
pub trait Summarizer: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Summarize article text at the requested length
    async fn summarize(&self, text: &str, length: SummaryLength) -> Result<String>;
}

/// Delegates to a summarization model, falling back to extraction per call.
pub struct ModelSummarizer {
    model: Arc<dyn SummarizationModel>,
    fallback: ExtractiveSummarizer,
    config: Arc<EngineConfig>,
}

impl fmt::Debug for ModelSummarizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelSummarizer")
            .field("model", &self.model.name())
            .finish()
    }
}

impl ModelSummarizer {
    pub fn new(model: Arc<dyn SummarizationModel>, config: Arc<EngineConfig>) -> Self {
        Self {
            model,
            fallback: ExtractiveSummarizer::new(config.clone()),
            config,
        }
    }

    /// Collapses whitespace and cuts the text to the model input budget.
    pub fn prepare_input(&self, text: &str) -> String {
        text::truncate_with_ellipsis(&text::collapse_whitespace(text), self.config.max_model_input_chars)
    }
}

#[async_trait]
impl Summarizer for ModelSummarizer {
    fn name(&self) -> &str {
        self.model.name()
    }

    async fn summarize(&self, text: &str, length: SummaryLength) -> Result<String> {
        let input = self.prepare_input(text);
        let params = GenerationParams::for_length(length);

        match call_with_timeout(self.config.model_timeout, self.model.summarize(&input, &params)).await {
            Ok(summary) if !summary.trim().is_empty() => Ok(summary.trim().to_string()),
            Ok(_) => {
                debug!("{} returned an empty summary, using extractive fallback", self.model.name());
                Ok(self.fallback.summarize_text(text, length))
            }
            Err(e) => {
                warn!("Model summarization failed, using extractive fallback: {}", e);
                Ok(self.fallback.summarize_text(text, length))
            }
        }
    }
}
