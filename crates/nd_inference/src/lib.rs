use std::fmt;
use std::time::Duration;

pub mod config;
pub mod engine;
pub mod keypoints;
pub mod models;
pub mod sentiment;
pub mod summarizer;
pub mod text;

pub use config::{EngineConfig, SentencePolicy};
pub use engine::SummaryEngine;
pub use models::{create_provider, ModelState};

/// Inference settings: which provider to use, how to reach it, and the engine tunables.
#[derive(Clone)]
pub struct Config {
    pub api_key: Option<String>,
    /// Provider name: huggingface, dummy or none
    pub model_name: Option<String>,
    pub model_url: Option<String>,
    pub summarization_model: Option<String>,
    pub sentiment_model: Option<String>,
    pub request_timeout: Duration,
    pub engine: EngineConfig,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("model_name", &self.model_name)
            .field("model_url", &self.model_url)
            .field("summarization_model", &self.summarization_model)
            .field("sentiment_model", &self.sentiment_model)
            .field("request_timeout", &self.request_timeout)
            .field("engine", &self.engine)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model_name: None,
            model_url: None,
            summarization_model: None,
            sentiment_model: None,
            request_timeout: Duration::from_secs(30),
            engine: EngineConfig::default(),
        }
    }
}

pub mod prelude {
    pub use super::{Config, EngineConfig, SentencePolicy, SummaryEngine};
    pub use nd_core::{ArticleSummary, Error, Result, Sentiment, SummaryLength, SummaryResult};
}
