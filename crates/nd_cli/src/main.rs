use std::path::PathBuf;
use std::time::Duration;
use clap::Parser;
use nd_core::{Result, SummaryLength};
use nd_inference::{Config, EngineConfig, SentencePolicy, SummaryEngine};
use tokio::io::AsyncReadExt;
use tracing::info;

mod logging;

#[derive(Parser, Debug)]
#[command(author, version, about = "Summarize news articles", long_about = None)]
pub struct Cli {
    #[arg(long, default_value = "huggingface", help = "Model provider. Available providers: huggingface (default), dummy, none")]
    model: String,
    #[arg(long, env = "HF_API_TOKEN", hide_env_values = true)]
    api_key: Option<String>,
    #[arg(long, help = "Base URL of the inference API")]
    model_url: Option<String>,
    #[arg(long)]
    summarization_model: Option<String>,
    #[arg(long)]
    sentiment_model: Option<String>,
    #[arg(long, default_value = "standard", value_parser = parse_policy)]
    sentence_policy: SentencePolicy,
    /// Seconds to wait for a single model call, 0 to wait indefinitely
    #[arg(long, default_value_t = 30)]
    timeout: u64,
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Summarize at one length
    Summarize {
        #[arg(long, default_value = "medium", value_parser = parse_length)]
        length: SummaryLength,
        /// Article file, stdin if omitted
        file: Option<PathBuf>,
    },
    /// Summarize at every length
    Article {
        file: Option<PathBuf>,
    },
}

fn parse_length(s: &str) -> std::result::Result<SummaryLength, String> {
    s.parse().map_err(|e: nd_core::Error| e.to_string())
}

fn parse_policy(s: &str) -> std::result::Result<SentencePolicy, String> {
    s.parse().map_err(|e: nd_core::Error| e.to_string())
}

impl Cli {
    fn config(&self) -> Config {
        let model_timeout = (self.timeout > 0).then(|| Duration::from_secs(self.timeout));
        let engine = EngineConfig::default()
            .with_sentence_policy(self.sentence_policy)
            .with_model_timeout(model_timeout);

        Config {
            api_key: self.api_key.clone(),
            model_name: Some(self.model.clone()),
            model_url: self.model_url.clone(),
            summarization_model: self.summarization_model.clone(),
            sentiment_model: self.sentiment_model.clone(),
            request_timeout: model_timeout.unwrap_or(Duration::from_secs(300)),
            engine,
        }
    }
}

async fn read_article(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => Ok(tokio::fs::read_to_string(path).await?),
        None => {
            let mut content = String::new();
            tokio::io::stdin().read_to_string(&mut content).await?;
            Ok(content)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let engine = SummaryEngine::from_config(&cli.config())?;
    info!("🧠 Summary engine initialized (using {})", engine.models().provider_name());

    match &cli.command {
        Commands::Summarize { length, file } => {
            let content = read_article(file.as_ref()).await?;
            info!("🚀 Summarizing {} characters ({})", content.chars().count(), length);
            let result = engine.produce_summary_result(&content, *length).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Article { file } => {
            let content = read_article(file.as_ref()).await?;
            info!("🚀 Summarizing {} characters at every length", content.chars().count());
            let summary = engine.produce_article_summary(&content).await;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
