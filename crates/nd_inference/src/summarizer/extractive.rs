use std::sync::Arc;
use async_trait::async_trait;
use nd_core::{Result, SummaryLength};

use super::Summarizer;
use crate::config::EngineConfig;
use crate::text;

/// Picks the leading qualifying sentences of the article in their original order.
#[derive(Debug, Clone)]
pub struct ExtractiveSummarizer {
    config: Arc<EngineConfig>,
}

impl ExtractiveSummarizer {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    pub fn summarize_text(&self, text: &str, length: SummaryLength) -> String {
        let target = self.config.sentence_policy.sentence_count(length);
        let selected: Vec<&str> = text::split_sentences(text, self.config.min_summary_sentence_chars)
            .into_iter()
            .take(target)
            .collect();

        if selected.is_empty() {
            return String::new();
        }
        format!("{}.", selected.join(". "))
    }
}

#[async_trait]
impl Summarizer for ExtractiveSummarizer {
    fn name(&self) -> &str {
        "extractive"
    }

    async fn summarize(&self, text: &str, length: SummaryLength) -> Result<String> {
        Ok(self.summarize_text(text, length))
    }
}
