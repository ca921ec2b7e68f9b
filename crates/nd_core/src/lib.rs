pub mod error;
pub mod models;
pub mod types;

pub use error::{Error, Result};
pub use models::{ModelProvider, SentimentModel, SummarizationModel};
pub use types::{ArticleSummary, GenerationParams, LabelScore, Sentiment, SummaryLength, SummaryResult};
