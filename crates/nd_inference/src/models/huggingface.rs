use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use nd_core::{
    Error, GenerationParams, LabelScore, ModelProvider, Result, SentimentModel,
    SummarizationModel,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::OnceCell;
use url::Url;

use crate::Config;

pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co/models";
pub const DEFAULT_SUMMARIZATION_MODEL: &str = "sshleifer/distilbart-cnn-6-6";
pub const DEFAULT_SENTIMENT_MODEL: &str = "distilbert/distilbert-base-uncased-finetuned-sst-2-english";

const WARMUP_TEXT: &str = "The committee announced the results of the annual review today.";

#[derive(Clone)]
pub struct HuggingFaceConfig {
    base_url: Url,
    api_key: Option<String>,
    summarization_model: String,
    sentiment_model: String,
    request_timeout: Duration,
}

impl fmt::Debug for HuggingFaceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuggingFaceConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("summarization_model", &self.summarization_model)
            .field("sentiment_model", &self.sentiment_model)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl HuggingFaceConfig {
    pub fn from_config(config: &Config) -> Result<Self> {
        let raw_url = config.model_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let base_url = Url::parse(raw_url)
            .map_err(|e| Error::Config(format!("Invalid model URL {}: {}", raw_url, e)))?;

        Ok(Self {
            base_url,
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            summarization_model: config
                .summarization_model
                .clone()
                .unwrap_or_else(|| DEFAULT_SUMMARIZATION_MODEL.to_string()),
            sentiment_model: config
                .sentiment_model
                .clone()
                .unwrap_or_else(|| DEFAULT_SENTIMENT_MODEL.to_string()),
            request_timeout: config.request_timeout,
        })
    }

    pub fn endpoint(&self, model_id: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), model_id)
    }
}

struct HuggingFaceClient {
    client: Client,
    api_key: String,
    config: HuggingFaceConfig,
}

impl fmt::Debug for HuggingFaceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuggingFaceClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.config.base_url.as_str())
            .finish()
    }
}

impl HuggingFaceClient {
    fn new(config: HuggingFaceConfig) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            Error::ModelUnavailable("Hugging Face API token is required".to_string())
        })?;
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    async fn post<T: DeserializeOwned>(&self, model_id: &str, body: &Value) -> Result<T> {
        let response = self
            .client
            .post(self.config.endpoint(model_id))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?
            .error_for_status()?
            .json::<T>()
            .await?;
        Ok(response)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SummaryResponse {
    List(Vec<SummaryOutput>),
    Single(SummaryOutput),
}

#[derive(Deserialize)]
struct SummaryOutput {
    summary_text: Option<String>,
    generated_text: Option<String>,
}

impl SummaryResponse {
    fn into_text(self) -> String {
        let output = match self {
            Self::List(outputs) => outputs.into_iter().next(),
            Self::Single(output) => Some(output),
        };
        output
            .and_then(|o| o.summary_text.or(o.generated_text))
            .unwrap_or_default()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SentimentResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
    Single(LabelScore),
}

impl SentimentResponse {
    fn top_label(self) -> Option<LabelScore> {
        let labels = match self {
            Self::Nested(outer) => outer.into_iter().next().unwrap_or_default(),
            Self::Flat(labels) => labels,
            Self::Single(label) => vec![label],
        };
        labels.into_iter().max_by(|a, b| a.score.total_cmp(&b.score))
    }
}

pub struct HuggingFaceSummarizer {
    client: Arc<HuggingFaceClient>,
    model_id: String,
}

impl fmt::Debug for HuggingFaceSummarizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuggingFaceSummarizer")
            .field("model_id", &self.model_id)
            .finish()
    }
}

#[async_trait]
impl SummarizationModel for HuggingFaceSummarizer {
    fn name(&self) -> &str {
        &self.model_id
    }

    async fn summarize(&self, input: &str, params: &GenerationParams) -> Result<String> {
        let body = json!({
            "inputs": input,
            "parameters": {
                // the summarization task names its token budgets min_length/max_length
                "min_length": params.min_new_tokens,
                "max_length": params.max_new_tokens,
                "do_sample": params.do_sample,
            },
            "options": { "wait_for_model": true },
        });
        let response: SummaryResponse = self.client.post(&self.model_id, &body).await?;
        Ok(response.into_text())
    }
}

pub struct HuggingFaceSentiment {
    client: Arc<HuggingFaceClient>,
    model_id: String,
}

impl fmt::Debug for HuggingFaceSentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuggingFaceSentiment")
            .field("model_id", &self.model_id)
            .finish()
    }
}

#[async_trait]
impl SentimentModel for HuggingFaceSentiment {
    fn name(&self) -> &str {
        &self.model_id
    }

    async fn classify(&self, input: &str) -> Result<Option<LabelScore>> {
        let body = json!({
            "inputs": input,
            "options": { "wait_for_model": true },
        });
        let response: SentimentResponse = self.client.post(&self.model_id, &body).await?;
        Ok(response.top_label())
    }
}

/// Acquires models hosted behind a Hugging Face style inference API.
/// A model counts as acquired only after a warm-up request succeeds.
#[derive(Debug)]
pub struct HuggingFaceProvider {
    config: HuggingFaceConfig,
    client: OnceCell<Arc<HuggingFaceClient>>,
}

impl HuggingFaceProvider {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            config: HuggingFaceConfig::from_config(config)?,
            client: OnceCell::new(),
        })
    }

    pub fn config(&self) -> &HuggingFaceConfig {
        &self.config
    }

    /// One HTTP client shared by both models.
    async fn client(&self) -> Result<Arc<HuggingFaceClient>> {
        let client = self
            .client
            .get_or_try_init(|| async { HuggingFaceClient::new(self.config.clone()).map(Arc::new) })
            .await?;
        Ok(client.clone())
    }
}

#[async_trait]
impl ModelProvider for HuggingFaceProvider {
    fn name(&self) -> &str {
        "HuggingFace"
    }

    async fn load_summarizer(&self) -> Result<Arc<dyn SummarizationModel>> {
        let model = HuggingFaceSummarizer {
            client: self.client().await?,
            model_id: self.config.summarization_model.clone(),
        };
        let warmup = GenerationParams {
            min_new_tokens: 1,
            max_new_tokens: 8,
            do_sample: false,
        };
        model.summarize(WARMUP_TEXT, &warmup).await.map_err(|e| {
            Error::ModelUnavailable(format!(
                "{} is not available at {}: {}",
                self.config.summarization_model,
                self.config.endpoint(&self.config.summarization_model),
                e
            ))
        })?;
        Ok(Arc::new(model))
    }

    async fn load_sentiment(&self) -> Result<Arc<dyn SentimentModel>> {
        let model = HuggingFaceSentiment {
            client: self.client().await?,
            model_id: self.config.sentiment_model.clone(),
        };
        model.classify(WARMUP_TEXT).await.map_err(|e| {
            Error::ModelUnavailable(format!(
                "{} is not available at {}: {}",
                self.config.sentiment_model,
                self.config.endpoint(&self.config.sentiment_model),
                e
            ))
        })?;
        Ok(Arc::new(model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(url: &str, api_key: Option<&str>) -> Config {
        Config {
            api_key: api_key.map(str::to_string),
            model_url: Some(url.to_string()),
            summarization_model: Some("test/summarizer".to_string()),
            sentiment_model: Some("test/sentiment".to_string()),
            ..Config::default()
        }
    }

    #[test]
    fn test_config_defaults_and_endpoint() {
        let config = HuggingFaceConfig::from_config(&Config::default()).unwrap();
        assert_eq!(
            config.endpoint(DEFAULT_SUMMARIZATION_MODEL),
            "https://api-inference.huggingface.co/models/sshleifer/distilbart-cnn-6-6"
        );
        assert!(config.api_key.is_none());

        let config = HuggingFaceConfig::from_config(&test_config("http://localhost:8080/models/", Some("k"))).unwrap();
        assert_eq!(config.endpoint("a/b"), "http://localhost:8080/models/a/b");
        assert!(!format!("{:?}", config).contains("\"k\""));
    }

    #[test]
    fn test_invalid_url_is_config_error() {
        let result = HuggingFaceConfig::from_config(&test_config("not a url", Some("k")));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_response_shapes() {
        let list: SummaryResponse = serde_json::from_str(r#"[{"summary_text": "A summary."}]"#).unwrap();
        assert_eq!(list.into_text(), "A summary.");
        let single: SummaryResponse = serde_json::from_str(r#"{"generated_text": "Generated."}"#).unwrap();
        assert_eq!(single.into_text(), "Generated.");
        let empty: SummaryResponse = serde_json::from_str("[]").unwrap();
        assert_eq!(empty.into_text(), "");

        let nested: SentimentResponse = serde_json::from_str(
            r#"[[{"label": "NEGATIVE", "score": 0.1}, {"label": "POSITIVE", "score": 0.9}]]"#,
        )
        .unwrap();
        assert_eq!(nested.top_label().unwrap().label, "POSITIVE");
        let flat: SentimentResponse = serde_json::from_str(r#"[{"label": "NEGATIVE", "score": 0.8}]"#).unwrap();
        assert_eq!(flat.top_label().unwrap().label, "NEGATIVE");
        let none: SentimentResponse = serde_json::from_str("[]").unwrap();
        assert!(none.top_label().is_none());
    }

    #[tokio::test]
    async fn test_provider_requires_api_key() {
        let provider = HuggingFaceProvider::new(&test_config("http://localhost:1", None)).unwrap();
        let result = provider.load_summarizer().await;
        assert!(matches!(result, Err(Error::ModelUnavailable(_))));
        let result = provider.load_sentiment().await;
        assert!(matches!(result, Err(Error::ModelUnavailable(_))));
    }

    #[tokio::test]
    async fn test_models_against_mock_server() {
        let mut server = mockito::Server::new_async().await;
        let summarize_mock = server
            .mock("POST", "/models/test/summarizer")
            .match_header("authorization", "Bearer secret")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"summary_text": "Officials announced a new policy."}]"#)
            .expect(2)
            .create_async()
            .await;
        let sentiment_mock = server
            .mock("POST", "/models/test/sentiment")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[[{"label": "POSITIVE", "score": 0.97}]]"#)
            .expect(2)
            .create_async()
            .await;

        let url = format!("{}/models", server.url());
        let provider = HuggingFaceProvider::new(&test_config(&url, Some("secret"))).unwrap();

        let summarizer = provider.load_summarizer().await.unwrap();
        let params = GenerationParams::for_length(nd_core::SummaryLength::Short);
        let summary = summarizer.summarize("Some article text.", &params).await.unwrap();
        assert_eq!(summary, "Officials announced a new policy.");

        let sentiment = provider.load_sentiment().await.unwrap();
        let label = sentiment.classify("Great news").await.unwrap().unwrap();
        assert_eq!(label.label, "POSITIVE");

        summarize_mock.assert_async().await;
        sentiment_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_token_budgets_sent_as_length_parameters() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/test/summarizer")
            .match_body(mockito::Matcher::PartialJson(json!({
                "parameters": { "min_length": 40, "max_length": 100, "do_sample": false }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"summary_text": "Medium summary."}]"#)
            .create_async()
            .await;

        let url = format!("{}/models", server.url());
        let provider = HuggingFaceProvider::new(&test_config(&url, Some("secret"))).unwrap();
        let summarizer = HuggingFaceSummarizer {
            client: provider.client().await.unwrap(),
            model_id: "test/summarizer".to_string(),
        };
        let params = GenerationParams::for_length(nd_core::SummaryLength::Medium);
        let summary = summarizer.summarize("Some article text.", &params).await.unwrap();
        assert_eq!(summary, "Medium summary.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_models_share_one_http_client() {
        let provider = HuggingFaceProvider::new(&test_config("http://localhost:1/models", Some("secret"))).unwrap();
        let first = provider.client().await.unwrap();
        let second = provider.client().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let keyless = HuggingFaceProvider::new(&test_config("http://localhost:1/models", None)).unwrap();
        assert!(keyless.client().await.is_err());
        assert!(keyless.client.get().is_none());
    }

    #[tokio::test]
    async fn test_failed_warmup_marks_model_unavailable() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/test/summarizer")
            .with_status(503)
            .with_body(r#"{"error": "Model is currently loading"}"#)
            .create_async()
            .await;

        let url = format!("{}/models", server.url());
        let provider = HuggingFaceProvider::new(&test_config(&url, Some("secret"))).unwrap();
        let result = provider.load_summarizer().await;
        assert!(matches!(result, Err(Error::ModelUnavailable(_))));
    }
}
