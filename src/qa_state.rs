use crate::error::QaResult;
use crate::fetcher::MessageFetcher;
use crate::generator::{API_KEY_ENV, AnswerGenerator, GenerationParams, OpenAiGenerator};
use crate::io_struct::AskResponse;
use crate::normalizer::normalize;
use crate::prompt::{build_corpus, compose_prompt};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_MESSAGES_URL: &str =
    "https://november7-730026606190.europe-west1.run.app/messages";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone)]
pub struct QaConfig {
    pub host: String,
    pub port: u16,
    pub messages_url: String,
    pub fetch_timeout: Option<Duration>,
    pub openai_base_url: String,
    pub openai_api_key: Option<String>,
    pub generation: GenerationParams,
    pub log_level: log::LevelFilter,
}

impl Default for QaConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            messages_url: DEFAULT_MESSAGES_URL.to_string(),
            fetch_timeout: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            openai_api_key: None,
            generation: GenerationParams::default(),
            log_level: log::LevelFilter::Info,
        }
    }
}

/// Shared per-process state: the two outbound clients, built once at startup.
#[derive(Clone)]
pub struct QaState {
    pub fetcher: MessageFetcher,
    pub generator: Arc<dyn AnswerGenerator>,
}

impl QaState {
    pub fn new(config: QaConfig) -> anyhow::Result<Self> {
        let fetcher = MessageFetcher::new(config.messages_url, config.fetch_timeout)?;
        let client = reqwest::Client::builder().build()?;
        let generator = OpenAiGenerator::new(
            client,
            config.openai_base_url,
            config.openai_api_key,
            config.generation,
        );
        if !generator.has_credential() {
            log::warn!(
                "{} is not set; /ask will report a credential error until it is provided",
                API_KEY_ENV
            );
        }
        Ok(Self::with_generator(fetcher, Arc::new(generator)))
    }

    pub fn with_generator(fetcher: MessageFetcher, generator: Arc<dyn AnswerGenerator>) -> Self {
        Self { fetcher, generator }
    }

    /// Answer one question. Never fails: errors come back as `AskResponse::Error`.
    pub async fn ask(&self, question: &str) -> AskResponse {
        match self.answer(question).await {
            Ok(answer) => AskResponse::answer(answer),
            Err(e) => {
                log::error!("Question failed at {} stage: {}", e.stage(), e);
                AskResponse::error(e)
            }
        }
    }

    async fn answer(&self, question: &str) -> QaResult<String> {
        let fetched = self.fetcher.fetch().await?;
        let messages = normalize(&fetched.body, fetched.content_type.as_deref())?;
        log::info!(
            "Loaded {} messages from {}",
            messages.len(),
            self.fetcher.url()
        );
        let corpus = build_corpus(&messages);
        let prompt = compose_prompt(&corpus, question);
        self.generator.generate(&prompt).await
    }
}
