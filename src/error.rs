use miette::Diagnostic;
use thiserror::Error;

/// Main error type for valley operations
#[derive(Error, Diagnostic, Debug)]
pub enum ValleyError {
    #[error("IO error: {0}")]
    #[diagnostic(code(valley::io))]
    Io(#[from] std::io::Error),

    #[error("Asset error with {path}: {message}")]
    #[diagnostic(code(valley::asset))]
    Asset { path: String, message: String },

    #[error("Failed to decode {path}: {message}")]
    #[diagnostic(code(valley::decode))]
    Decode { path: String, message: String },

    #[error("Seed error: {message}")]
    #[diagnostic(code(valley::seed))]
    Seed {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Invalid trait value for {trait_type}: {value}")]
    #[diagnostic(code(valley::invalid_trait))]
    InvalidTrait {
        trait_type: String,
        value: String,
        #[help]
        help: Option<String>,
    },

    #[error("Config error: {message}")]
    #[diagnostic(code(valley::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(valley::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Render error: {message}")]
    #[diagnostic(code(valley::render))]
    Render { message: String },
}

impl ValleyError {
    pub(crate) fn invalid_trait(trait_type: &str, value: &str) -> Self {
        Self::InvalidTrait {
            trait_type: trait_type.to_string(),
            value: value.to_string(),
            help: Some("Check that the catalogue only lists values the layer rules know".to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ValleyError>;
