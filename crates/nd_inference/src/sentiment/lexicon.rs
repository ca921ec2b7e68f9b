use std::sync::Arc;
use async_trait::async_trait;
use nd_core::{Result, Sentiment};

use super::SentimentClassifier;
use crate::config::EngineConfig;

/// Counts positive and negative marker words. Each word counts once
/// however often it appears.
#[derive(Debug, Clone)]
pub struct LexiconSentimentClassifier {
    config: Arc<EngineConfig>,
}

impl LexiconSentimentClassifier {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    pub fn classify_text(&self, text: &str) -> Sentiment {
        let lower = text.to_lowercase();
        let count = |words: &[String]| {
            words
                .iter()
                .filter(|w| lower.contains(w.to_lowercase().as_str()))
                .count()
        };
        let positive = count(&self.config.positive_words);
        let negative = count(&self.config.negative_words);

        match positive.cmp(&negative) {
            std::cmp::Ordering::Greater => Sentiment::Positive,
            std::cmp::Ordering::Less => Sentiment::Negative,
            std::cmp::Ordering::Equal => Sentiment::Neutral,
        }
    }
}

#[async_trait]
impl SentimentClassifier for LexiconSentimentClassifier {
    fn name(&self) -> &str {
        "lexicon"
    }

    async fn classify(&self, text: &str) -> Result<Sentiment> {
        Ok(self.classify_text(text))
    }
}
