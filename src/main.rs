use aurora_qa::generator::{API_KEY_ENV, GenerationParams};
use aurora_qa::qa_state::{DEFAULT_MESSAGES_URL, DEFAULT_OPENAI_BASE_URL, QaConfig};
use aurora_qa::server::init_logging;
use clap::Parser;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Answers questions about Aurora member messages", long_about = None)]
struct Args {
    #[arg(
        long,
        default_value = "127.0.0.1",
        help = "Host address to bind the server to"
    )]
    host: String,

    #[arg(long, default_value_t = 8000, help = "Port number to listen on")]
    port: u16,

    #[arg(
        long,
        default_value = DEFAULT_MESSAGES_URL,
        help = "URL of the upstream message source"
    )]
    messages_url: String,

    #[arg(
        long,
        help = "Timeout in seconds for fetching upstream messages (no timeout if omitted)"
    )]
    fetch_timeout_secs: Option<u64>,

    #[arg(
        long,
        default_value = DEFAULT_OPENAI_BASE_URL,
        help = "Base URL of the OpenAI-compatible completion service"
    )]
    openai_base_url: String,

    #[arg(long, env = API_KEY_ENV, hide_env_values = true, help = "API key for the completion service")]
    openai_api_key: Option<String>,

    #[arg(long, default_value = "gpt-4o-mini", help = "Model used to answer questions")]
    model: String,

    #[arg(long, default_value_t = 0.3, help = "Sampling temperature")]
    temperature: f64,

    #[arg(long, default_value_t = 200, help = "Maximum tokens in a generated answer")]
    max_tokens: u32,

    #[arg(
        long,
        default_value = "info",
        help = "Log level: off, error, warn, info, debug or trace"
    )]
    log_level: log::LevelFilter,
}

impl Args {
    fn into_config(self) -> QaConfig {
        QaConfig {
            host: self.host,
            port: self.port,
            messages_url: self.messages_url,
            fetch_timeout: self.fetch_timeout_secs.map(Duration::from_secs),
            openai_base_url: self.openai_base_url,
            openai_api_key: self.openai_api_key,
            generation: GenerationParams {
                model: self.model,
                temperature: self.temperature,
                max_tokens: self.max_tokens,
            },
            log_level: self.log_level,
        }
    }
}

fn main() -> anyhow::Result<()> {
    // a missing .env file is fine
    dotenvy::dotenv().ok();
    let config = Args::parse().into_config();
    init_logging(config.log_level);
    aurora_qa::start(config)
}
