use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use futures::FutureExt;
use nd_core::{Error, ModelProvider, Result, SentimentModel, SummarizationModel};
use tokio::sync::OnceCell;
use tracing::{info, warn};

/// Handles produced by the one load attempt. Either may be absent.
#[derive(Debug, Clone, Default)]
pub struct LoadedModels {
    pub summarizer: Option<Arc<dyn SummarizationModel>>,
    pub sentiment: Option<Arc<dyn SentimentModel>>,
}

/// Lazily loaded model handles. Loading is attempted at most once per state,
/// whatever the outcome.
pub struct ModelState {
    provider: Arc<dyn ModelProvider>,
    models: OnceCell<LoadedModels>,
}

impl fmt::Debug for ModelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelState")
            .field("provider", &self.provider.name())
            .field("models", &self.models.get())
            .finish()
    }
}

impl ModelState {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            provider,
            models: OnceCell::new(),
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Loads the models on first use. Concurrent callers wait for the same attempt.
    pub async fn ensure_loaded(&self) -> &LoadedModels {
        self.models
            .get_or_init(|| load_models(self.provider.as_ref()))
            .await
    }

    pub fn is_attempted(&self) -> bool {
        self.models.initialized()
    }

    pub fn loaded(&self) -> Option<&LoadedModels> {
        self.models.get()
    }
}

async fn load_models(provider: &dyn ModelProvider) -> LoadedModels {
    info!("🤖 Loading models from {}", provider.name());

    let (summarizer, sentiment) = tokio::join!(
        contain_panic("summarization", provider.load_summarizer()),
        contain_panic("sentiment", provider.load_sentiment()),
    );

    let summarizer = match summarizer {
        Ok(model) => {
            info!("✅ Summarization model loaded ({})", model.name());
            Some(model)
        }
        Err(e) => {
            warn!("⚠️ Summarization model failed to load: {}", e);
            None
        }
    };
    let sentiment = match sentiment {
        Ok(model) => {
            info!("✅ Sentiment model loaded ({})", model.name());
            Some(model)
        }
        Err(e) => {
            warn!("⚠️ Sentiment model failed to load: {}", e);
            None
        }
    };
    LoadedModels { summarizer, sentiment }
}

/// A panicking acquisition only loses its own model.
async fn contain_panic<T, F>(kind: &str, load: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match AssertUnwindSafe(load).catch_unwind().await {
        Ok(result) => result,
        Err(_) => Err(Error::ModelUnavailable(format!("{} model loader panicked", kind))),
    }
}
