use std::fmt;
use reqwest::StatusCode;

/// Failures talking to OpenWeatherMap.
///
/// Request urls carry the api key, so no variant ever holds one.
#[derive(Debug)]
pub enum OWMError {
    Transport(String),
    Status(StatusCode),
    Document(String),
}

impl fmt::Display for OWMError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OWMError::Transport(e) => write!(f, "OWMError::Transport: {}", e),
            OWMError::Status(s) => write!(f, "OWMError::Status: OpenWeatherMap answered {}", s),
            OWMError::Document(e) => write!(f, "OWMError::Document: {}", e),
        }
    }
}
impl From<reqwest::Error> for OWMError {
    fn from(e: reqwest::Error) -> Self {
        OWMError::Transport(e.without_url().to_string())
    }
}
impl From<serde_json::Error> for OWMError {
    fn from(e: serde_json::Error) -> Self {
        OWMError::Document(e.to_string())
    }
}
