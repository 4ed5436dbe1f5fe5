use reqwest::Error as ReqwestError;
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum SearchError {
    MissingApiKey,
    ApiError { message: String },
    OperationError { message: String },
    ReqwestError(ReqwestError),
    JsonParseError(serde_json::Error),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SearchError::MissingApiKey => write!(
                f,
                "YouTube API key is not configured. Please add it to the configuration file."
            ),
            SearchError::ApiError { message } => write!(f, "{}", message),
            SearchError::OperationError { message } => write!(f, "{}", message),
            SearchError::ReqwestError(e) => write!(f, "Request error: {}", e),
            SearchError::JsonParseError(e) => write!(f, "JSON parse error: {}", e),
        }
    }
}

impl Error for SearchError {}

impl From<ReqwestError> for SearchError {
    fn from(error: ReqwestError) -> Self {
        SearchError::ReqwestError(error)
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(error: serde_json::Error) -> Self {
        SearchError::JsonParseError(error)
    }
}
