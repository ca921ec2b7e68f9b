use std::str::FromStr;
use std::time::Duration;
use nd_core::{Error, SummaryLength};

/// How many sentences the extractive summarizer keeps for each length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SentencePolicy {
    /// 2 / 3 / 5 sentences
    #[default]
    Standard,
    /// 2 / 4 / 6 sentences
    Extended,
}

impl SentencePolicy {
    pub fn sentence_count(&self, length: SummaryLength) -> usize {
        match (self, length) {
            (_, SummaryLength::Short) => 2,
            (Self::Standard, SummaryLength::Medium) => 3,
            (Self::Standard, SummaryLength::Detailed) => 5,
            (Self::Extended, SummaryLength::Medium) => 4,
            (Self::Extended, SummaryLength::Detailed) => 6,
        }
    }
}

impl FromStr for SentencePolicy {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "extended" => Ok(Self::Extended),
            other => Err(Error::Config(format!("Unknown sentence policy: {}", other))),
        }
    }
}

const POSITIVE_WORDS: &[&str] = &[
    "breakthrough", "success", "victory", "growth", "improvement", "achievement",
    "progress", "excellent", "outstanding", "innovative", "revolutionary",
];

const NEGATIVE_WORDS: &[&str] = &[
    "crisis", "failure", "decline", "controversy", "scandal", "disaster",
    "conflict", "problem", "issue", "concern",
];

const SIGNAL_WORDS: &[&str] = &[
    "announced", "revealed", "reported", "confirmed", "launched", "developed",
    "increased", "decreased", "major", "significant", "important", "breakthrough",
    "record", "first", "new", "percent", "million", "billion",
];

/// Tunables for the summary engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub sentence_policy: SentencePolicy,
    /// Characters of collapsed article text sent to a summarization model
    pub max_model_input_chars: usize,
    /// Characters of article text sent to a sentiment model
    pub sentiment_prefix_chars: usize,
    /// Minimum confidence for a model sentiment label to count
    pub sentiment_threshold: f32,
    /// Upper bound on a single model call; `None` waits indefinitely
    pub model_timeout: Option<Duration>,
    pub min_summary_sentence_chars: usize,
    pub min_key_point_chars: usize,
    pub max_key_points: usize,
    pub words_per_minute: usize,
    pub positive_words: Vec<String>,
    pub negative_words: Vec<String>,
    pub signal_words: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sentence_policy: SentencePolicy::default(),
            max_model_input_chars: 1000,
            sentiment_prefix_chars: 500,
            sentiment_threshold: 0.6,
            model_timeout: Some(Duration::from_secs(30)),
            min_summary_sentence_chars: 10,
            min_key_point_chars: 20,
            max_key_points: 4,
            words_per_minute: 200,
            positive_words: to_owned_words(POSITIVE_WORDS),
            negative_words: to_owned_words(NEGATIVE_WORDS),
            signal_words: to_owned_words(SIGNAL_WORDS),
        }
    }
}

impl EngineConfig {
    pub fn with_sentence_policy(mut self, policy: SentencePolicy) -> Self {
        self.sentence_policy = policy;
        self
    }

    pub fn with_model_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.model_timeout = timeout;
        self
    }

    pub fn validate(&self) -> nd_core::Result<()> {
        if self.words_per_minute == 0 {
            return Err(Error::Config("words_per_minute must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&self.sentiment_threshold) {
            return Err(Error::Config(format!(
                "sentiment_threshold must be within 0..=1, got {}",
                self.sentiment_threshold
            )));
        }
        Ok(())
    }
}

fn to_owned_words(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}
