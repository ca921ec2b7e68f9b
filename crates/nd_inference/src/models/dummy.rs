use std::fmt;
use std::sync::Arc;
use async_trait::async_trait;
use nd_core::{
    GenerationParams, LabelScore, ModelProvider, Result, SentimentModel, SummarizationModel,
};

/// Deterministic in-process model for offline runs.
#[derive(Default)]
pub struct DummyModel {
    sentiment: Option<LabelScore>,
}

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sentiment(label: &str, score: f32) -> Self {
        Self {
            sentiment: Some(LabelScore {
                label: label.to_string(),
                score,
            }),
        }
    }
}

#[async_trait]
impl SummarizationModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn summarize(&self, input: &str, params: &GenerationParams) -> Result<String> {
        // One word per token
        let words: Vec<&str> = input
            .split_whitespace()
            .take(params.max_new_tokens as usize)
            .collect();
        Ok(words.join(" "))
    }
}

#[async_trait]
impl SentimentModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn classify(&self, _input: &str) -> Result<Option<LabelScore>> {
        Ok(self.sentiment.clone())
    }
}

#[derive(Debug, Default)]
pub struct DummyProvider {
    model: Arc<DummyModel>,
}

impl DummyProvider {
    pub fn new(model: DummyModel) -> Self {
        Self {
            model: Arc::new(model),
        }
    }
}

#[async_trait]
impl ModelProvider for DummyProvider {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn load_summarizer(&self) -> Result<Arc<dyn SummarizationModel>> {
        Ok(self.model.clone())
    }

    async fn load_sentiment(&self) -> Result<Arc<dyn SentimentModel>> {
        Ok(self.model.clone())
    }
}
