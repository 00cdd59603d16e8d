/*!
 * Error types for the screenplay parser.
 *
 * The classification core never fails; these errors belong to the layers around it
 * (configuration, input discovery and decoding), defined with thiserror.
 */

use thiserror::Error;

/// Errors raised while validating a configuration
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    /// An indentation band whose bounds are inverted
    #[error("Invalid {name} band: min {min} is greater than max {max}")]
    InvalidBand {
        /// Band name as it appears in the config file
        name: String,
        /// Lower bound
        min: usize,
        /// Upper bound
        max: usize,
    },

    /// A layout value outside the usable page
    #[error("Invalid layout value for {field}: {value}")]
    InvalidLayout {
        /// Field name
        field: String,
        /// Offending value
        value: usize,
    },

    /// An output setting that cannot be honoured
    #[error("Invalid output value for {field}: {value}")]
    InvalidOutput {
        /// Field name
        field: String,
        /// Offending value
        value: usize,
    },

    /// A known-name dictionary entry that can never match
    #[error("Invalid known name: {0:?}")]
    InvalidKnownName(String),
}

/// Errors raised while reading screenplay input
#[derive(Error, Debug)]
pub enum InputError {
    /// The input path does not exist
    #[error("Input does not exist: {0}")]
    NotFound(String),

    /// The input file type is not one we parse
    #[error("Unsupported input type: {0}")]
    Unsupported(String),

    /// Page JSON could not be decoded
    #[error("Malformed page data: {0}")]
    MalformedPages(String),

    /// The input contained no pages at all
    #[error("Input contains no pages: {0}")]
    Empty(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from configuration
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Error from input handling
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
