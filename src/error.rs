/// Failures a single `/ask` request can run into.
///
/// The `Display` text is returned to the caller verbatim in the `error` field.
#[derive(Debug, thiserror::Error)]
pub enum QaError {
    #[error("Failed to fetch Aurora API: {message}")]
    Transport { message: String },

    #[error("Failed to decode Aurora API response: {message}")]
    Decode { message: String },

    #[error("Unexpected data format from Aurora API: {reason}")]
    Shape { reason: String },

    #[error("Missing OpenAI credential: {env_var} is not set")]
    Credential { env_var: String },

    #[error("OpenAI API error: {message}")]
    UpstreamService { message: String },
}

impl QaError {
    pub fn transport(message: impl ToString) -> Self {
        QaError::Transport {
            message: message.to_string(),
        }
    }

    pub fn decode(message: impl ToString) -> Self {
        QaError::Decode {
            message: message.to_string(),
        }
    }

    pub fn shape(reason: impl ToString) -> Self {
        QaError::Shape {
            reason: reason.to_string(),
        }
    }

    pub fn upstream(message: impl ToString) -> Self {
        QaError::UpstreamService {
            message: message.to_string(),
        }
    }

    /// Short stage name, used in log lines.
    pub fn stage(&self) -> &'static str {
        match self {
            QaError::Transport { .. } => "fetch",
            QaError::Decode { .. } | QaError::Shape { .. } => "normalize",
            QaError::Credential { .. } | QaError::UpstreamService { .. } => "generate",
        }
    }
}

pub type QaResult<T> = Result<T, QaError>;
