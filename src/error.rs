use thiserror::Error;

#[derive(Error, Debug)]
pub enum ListSourceError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("authentication error: {0}")]
    Auth(String),

    #[error("transport error: {message}")]
    Transport {
        /// HTTP status code, when the server answered at all
        status: Option<u16>,
        message: String,
    },

    #[error(
        "data must be an array: check that the value extracted from the server response \
         by the key '{data_key}' exists and is an array"
    )]
    DataShape { data_key: String },

    #[error("invalid total count '{value}' at key '{total_key}'")]
    InvalidTotal { total_key: String, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ListSourceError {
    /// Build a transport error for a response with a non-success status.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        ListSourceError::Transport {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Build a transport error that has no HTTP status attached.
    pub fn transport(message: impl Into<String>) -> Self {
        ListSourceError::Transport {
            status: None,
            message: message.into(),
        }
    }

    pub fn invalid_sort_direction(value: String) -> Self {
        ListSourceError::Config(format!(
            "invalid sort direction '{value}', expected 'asc' or 'desc'"
        ))
    }
}

impl From<reqwest::Error> for ListSourceError {
    fn from(err: reqwest::Error) -> Self {
        ListSourceError::Transport {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ListSourceError>;
