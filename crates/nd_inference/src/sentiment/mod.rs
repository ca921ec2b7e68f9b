use std::fmt;
use std::sync::Arc;
use async_trait::async_trait;
use nd_core::{LabelScore, Result, Sentiment, SentimentModel};
use tracing::warn;

use crate::config::EngineConfig;
use crate::models::call_with_timeout;
use crate::text;

pub mod lexicon;

pub use lexicon::LexiconSentimentClassifier;

#[async_trait]
pub trait SentimentClassifier: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    async fn classify(&self, text: &str) -> Result<Sentiment>;
}

pub struct ModelSentimentClassifier {
    model: Arc<dyn SentimentModel>,
    fallback: LexiconSentimentClassifier,
    config: Arc<EngineConfig>,
}

impl fmt::Debug for ModelSentimentClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelSentimentClassifier")
            .field("model", &self.model.name())
            .field("threshold", &self.config.sentiment_threshold)
            .finish()
    }
}

impl ModelSentimentClassifier {
    pub fn new(model: Arc<dyn SentimentModel>, config: Arc<EngineConfig>) -> Self {
        Self {
            model,
            fallback: LexiconSentimentClassifier::new(config.clone()),
            config,
        }
    }

    /// Maps a model label to a sentiment. Low confidence and unknown labels are neutral.
    pub fn interpret(&self, output: Option<&LabelScore>) -> Sentiment {
        let Some(output) = output else {
            return Sentiment::Neutral;
        };
        // NaN scores fail this comparison and stay neutral
        let confident = output.score > self.config.sentiment_threshold;
        if !confident {
            return Sentiment::Neutral;
        }
        match output.label.to_ascii_lowercase().as_str() {
            "positive" => Sentiment::Positive,
            "negative" => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }
}

#[async_trait]
impl SentimentClassifier for ModelSentimentClassifier {
    fn name(&self) -> &str {
        self.model.name()
    }

    async fn classify(&self, text: &str) -> Result<Sentiment> {
        let input = text::char_prefix(text, self.config.sentiment_prefix_chars);

        match call_with_timeout(self.config.model_timeout, self.model.classify(input)).await {
            Ok(output) => Ok(self.interpret(output.as_ref())),
            Err(e) => {
                warn!("Model sentiment failed, using lexicon fallback: {}", e);
                Ok(self.fallback.classify_text(text))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use nd_core::Error;

    #[derive(Debug, Default)]
    struct FixedModel {
        output: Option<LabelScore>,
        fail: bool,
        seen: Mutex<Vec<String>>,
    }

    impl FixedModel {
        fn label(label: &str, score: f32) -> Self {
            Self {
                output: Some(LabelScore {
                    label: label.to_string(),
                    score,
                }),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl SentimentModel for FixedModel {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn classify(&self, input: &str) -> Result<Option<LabelScore>> {
            self.seen.lock().unwrap().push(input.to_string());
            if self.fail {
                return Err(Error::Inference("sentiment backend down".to_string()));
            }
            Ok(self.output.clone())
        }
    }

    fn classifier(model: FixedModel) -> ModelSentimentClassifier {
        ModelSentimentClassifier::new(Arc::new(model), Arc::new(EngineConfig::default()))
    }

    #[tokio::test]
    async fn test_confident_labels() {
        let positive = classifier(FixedModel::label("POSITIVE", 0.9));
        assert_eq!(positive.classify("text").await.unwrap(), Sentiment::Positive);

        let negative = classifier(FixedModel::label("negative", 0.75));
        assert_eq!(negative.classify("text").await.unwrap(), Sentiment::Negative);
    }

    #[tokio::test]
    async fn test_low_confidence_and_missing_output_are_neutral() {
        let unsure = classifier(FixedModel::label("POSITIVE", 0.55));
        assert_eq!(unsure.classify("text").await.unwrap(), Sentiment::Neutral);

        let at_threshold = classifier(FixedModel::label("NEGATIVE", 0.6));
        assert_eq!(at_threshold.classify("text").await.unwrap(), Sentiment::Neutral);

        let odd_label = classifier(FixedModel::label("LABEL_1", 0.99));
        assert_eq!(odd_label.classify("text").await.unwrap(), Sentiment::Neutral);

        let nan = classifier(FixedModel::label("POSITIVE", f32::NAN));
        assert_eq!(nan.classify("text").await.unwrap(), Sentiment::Neutral);

        let silent = classifier(FixedModel::default());
        assert_eq!(silent.classify("a breakthrough success").await.unwrap(), Sentiment::Neutral);
    }

    #[tokio::test]
    async fn test_model_sees_only_prefix() {
        let model = Arc::new(FixedModel::label("POSITIVE", 0.9));
        let classifier = ModelSentimentClassifier::new(model.clone(), Arc::new(EngineConfig::default()));
        let text = "x".repeat(800);
        classifier.classify(&text).await.unwrap();
        assert_eq!(model.seen.lock().unwrap()[0].chars().count(), 500);
    }

    #[tokio::test]
    async fn test_model_error_uses_lexicon() {
        let failing = classifier(FixedModel {
            fail: true,
            ..Default::default()
        });
        let sentiment = failing.classify("A scandal turned into a disaster.").await.unwrap();
        assert_eq!(sentiment, Sentiment::Negative);
    }
}
