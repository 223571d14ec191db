use thiserror::Error;

/// Failure of one stage of the conversion pipeline.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("invalid base64 encoding or url format: {0}")]
    Decode(String),

    #[error("failed to fetch subscription: {0}")]
    Fetch(String),

    #[error("no proxies found in the configuration")]
    NoProxies,

    #[error("failed to serialize configuration: {0}")]
    Serialization(#[from] serde_yaml::Error),
}

impl ConvertError {
    /// Stable machine-readable code reported in a failed `ConversionResult`.
    pub fn code(&self) -> &'static str {
        match self {
            ConvertError::Decode(_) => "DECODE_ERROR",
            ConvertError::Fetch(_) => "FETCH_ERROR",
            ConvertError::NoProxies => "NO_PROXIES",
            ConvertError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }
}

/// Failure to decode a single proxy link.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("unsupported link scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid base64 payload")]
    Base64,

    #[error("invalid json payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("invalid port: {0}")]
    InvalidPort(String),

    #[error("malformed link: {0}")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Toml(#[from] toml::de::Error),
}
