use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use nd_core::{Error, ModelProvider, Result, SentimentModel, SummarizationModel};

use crate::Config;

pub mod dummy;
pub mod huggingface;
pub mod state;

pub use dummy::{DummyModel, DummyProvider};
pub use huggingface::HuggingFaceProvider;
pub use state::{LoadedModels, ModelState};

/// Provider used when model-backed inference is switched off.
#[derive(Debug, Default)]
pub struct DisabledProvider;

#[async_trait]
impl ModelProvider for DisabledProvider {
    fn name(&self) -> &str {
        "None"
    }

    async fn load_summarizer(&self) -> Result<Arc<dyn SummarizationModel>> {
        Err(Error::ModelUnavailable("model-backed summarization is disabled".to_string()))
    }

    async fn load_sentiment(&self) -> Result<Arc<dyn SentimentModel>> {
        Err(Error::ModelUnavailable("model-backed sentiment is disabled".to_string()))
    }
}

pub fn create_provider(config: &Config) -> Result<Arc<dyn ModelProvider>> {
    let model_name = config.model_name.as_deref().unwrap_or("huggingface");
    match model_name.to_ascii_lowercase().as_str() {
        "huggingface" | "hf" => Ok(Arc::new(HuggingFaceProvider::new(config)?)),
        "dummy" => Ok(Arc::new(DummyProvider::default())),
        "none" => Ok(Arc::new(DisabledProvider)),
        other => Err(Error::Config(format!(
            "Unknown model provider: {}. Available providers: huggingface, dummy, none",
            other
        ))),
    }
}

pub(crate) async fn call_with_timeout<T, F>(timeout: Option<Duration>, call: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match timeout {
        Some(limit) => tokio::time::timeout(limit, call)
            .await
            .map_err(|_| Error::Timeout(limit))?,
        None => call.await,
    }
}
