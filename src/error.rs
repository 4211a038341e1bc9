//! Error types and handling for the `CityScout` application

use thiserror::Error;

/// Main error type for the `CityScout` application
#[derive(Error, Debug)]
pub enum CityScoutError {
    /// A raw source record could not be turned into a normalized record
    #[error("Malformed source record: {message}")]
    MalformedSource { message: String },

    /// A date in a source record could not be parsed
    #[error("Could not parse date '{input}': {message}")]
    DateParse { input: String, message: String },

    /// User input did not parse as the expected type
    #[error("Invalid input: {message}")]
    InputFormat { message: String },

    /// Fetching a raw source failed (network, HTTP status, missing file, bad payload)
    #[error("Fetch error: {message}")]
    Fetch { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The input stream ended while a prompt was waiting
    #[error("Input stream closed")]
    InputClosed,

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl CityScoutError {
    /// Create a new malformed source error
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedSource {
            message: message.into(),
        }
    }

    /// Create a new date parse error
    pub fn date_parse<I: Into<String>, S: Into<String>>(input: I, message: S) -> Self {
        Self::DateParse {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Create a new input format error
    pub fn input_format<S: Into<String>>(message: S) -> Self {
        Self::InputFormat {
            message: message.into(),
        }
    }

    /// Create a new fetch error
    pub fn fetch<S: Into<String>>(message: S) -> Self {
        Self::Fetch {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// True for errors that end the session rather than the current selection
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InputClosed | Self::Io { .. })
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            CityScoutError::MalformedSource { message } => {
                format!("The data source returned a record we could not read: {message}")
            }
            CityScoutError::DateParse { input, .. } => {
                format!("Could not understand the date '{input}'.")
            }
            CityScoutError::InputFormat { message } => {
                format!("Invalid input: {message}")
            }
            CityScoutError::Fetch { .. } => {
                "Unable to load data right now. Please check your connection and try again."
                    .to_string()
            }
            CityScoutError::Config { message } => {
                format!("Configuration error: {message}")
            }
            CityScoutError::InputClosed => "Input closed, exiting.".to_string(),
            CityScoutError::Io { .. } => {
                "Terminal I/O failed. Please check your console.".to_string()
            }
        }
    }
}
