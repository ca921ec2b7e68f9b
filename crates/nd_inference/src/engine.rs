use std::fmt;
use std::sync::Arc;
use chrono::Utc;
use nd_core::{ArticleSummary, Error, ModelProvider, Result, SummaryLength, SummaryResult};
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::keypoints::extract_key_points;
use crate::models::{create_provider, DisabledProvider, LoadedModels, ModelState};
use crate::sentiment::{LexiconSentimentClassifier, ModelSentimentClassifier, SentimentClassifier};
use crate::summarizer::{ExtractiveSummarizer, ModelSummarizer, Summarizer};
use crate::text;
use crate::Config;

/// Turns article text into summaries, sentiment and key points.
///
/// Cloning is cheap; clones share the same model state, so models are
/// loaded at most once across all of them.
#[derive(Clone)]
pub struct SummaryEngine {
    models: Arc<ModelState>,
    config: Arc<EngineConfig>,
}

impl fmt::Debug for SummaryEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SummaryEngine")
            .field("models", &self.models)
            .field("sentence_policy", &self.config.sentence_policy)
            .finish()
    }
}

impl SummaryEngine {
    pub fn new(provider: Arc<dyn ModelProvider>, config: EngineConfig) -> Self {
        Self {
            models: Arc::new(ModelState::new(provider)),
            config: Arc::new(config),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        config.engine.validate()?;
        let provider = create_provider(config)?;
        Ok(Self::new(provider, config.engine.clone()))
    }

    /// An engine that never touches a model.
    pub fn rule_based(config: EngineConfig) -> Self {
        Self::new(Arc::new(DisabledProvider), config)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn models(&self) -> &ModelState {
        &self.models
    }

    pub async fn ensure_models_loaded(&self) {
        self.models.ensure_loaded().await;
    }

    /// Summarize `content` at `length`. Never fails: any error degrades to
    /// the rule-based strategies.
    pub async fn produce_summary_result(&self, content: &str, length: SummaryLength) -> SummaryResult {
        debug!("Starting {} summarization of {} characters", length, content.len());
        match self.try_produce(content, length).await {
            Ok(result) => result,
            Err(e) => {
                warn!("🔄 Summarization failed, using rule-based result: {}", e);
                self.rule_based_result(content, length)
            }
        }
    }

    /// Summaries at all three lengths, produced concurrently.
    pub async fn produce_article_summary(&self, content: &str) -> ArticleSummary {
        let (short, medium, detailed) = tokio::join!(
            self.produce_summary_result(content, SummaryLength::Short),
            self.produce_summary_result(content, SummaryLength::Medium),
            self.produce_summary_result(content, SummaryLength::Detailed),
        );
        info!("✨ Generated summaries in {} lengths", SummaryLength::ALL.len());

        ArticleSummary {
            short: short.summary,
            medium: medium.summary,
            detailed: detailed.summary,
            key_points: medium.key_points,
            sentiment: medium.sentiment,
            generated_at: Utc::now(),
        }
    }

    async fn try_produce(&self, content: &str, length: SummaryLength) -> Result<SummaryResult> {
        let models = self.models.ensure_loaded().await;
        let summarizer = self.summarizer_for(models);
        let classifier = self.classifier_for(models);
        debug!("Using {} summarizer and {} classifier", summarizer.name(), classifier.name());

        let text: Arc<str> = Arc::from(content);
        let summary_task = tokio::spawn({
            let text = text.clone();
            async move { summarizer.summarize(&text, length).await }
        });
        let sentiment_task = tokio::spawn({
            let text = text.clone();
            async move { classifier.classify(&text).await }
        });
        let (summary, sentiment) = tokio::join!(summary_task, sentiment_task);
        let summary = summary.map_err(|e| Error::Task(format!("summarization task: {}", e)))??;
        let sentiment = sentiment.map_err(|e| Error::Task(format!("sentiment task: {}", e)))??;

        Ok(self.assemble(content, summary, sentiment))
    }

    fn rule_based_result(&self, content: &str, length: SummaryLength) -> SummaryResult {
        let summary = ExtractiveSummarizer::new(self.config.clone()).summarize_text(content, length);
        let sentiment = LexiconSentimentClassifier::new(self.config.clone()).classify_text(content);
        self.assemble(content, summary, sentiment)
    }

    fn assemble(&self, content: &str, summary: String, sentiment: nd_core::Sentiment) -> SummaryResult {
        let key_points = extract_key_points(content, &summary, &self.config);
        let read_time = text::read_time(&summary, self.config.words_per_minute);
        SummaryResult {
            summary,
            key_points,
            sentiment,
            read_time,
        }
    }

    fn summarizer_for(&self, models: &LoadedModels) -> Arc<dyn Summarizer> {
        match &models.summarizer {
            Some(model) => Arc::new(ModelSummarizer::new(model.clone(), self.config.clone())),
            None => Arc::new(ExtractiveSummarizer::new(self.config.clone())),
        }
    }

    fn classifier_for(&self, models: &LoadedModels) -> Arc<dyn SentimentClassifier> {
        match &models.sentiment {
            Some(model) => Arc::new(ModelSentimentClassifier::new(model.clone(), self.config.clone())),
            None => Arc::new(LexiconSentimentClassifier::new(self.config.clone())),
        }
    }
}
