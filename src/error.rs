use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(
        "Invalid parameter {parameter} = {value}{}",
        .context.as_ref().map(|c| format!(" ({c})")).unwrap_or_default()
    )]
    InvalidParameter {
        parameter: &'static str,
        value: f64,
        context: Option<String>,
    },
    #[error("Missing parameters for node '{node}'")]
    MissingParameter { node: String },
    #[error("Duplicate node '{0}'")]
    DuplicateNode(String),
    #[error("Scenario '{scenario}' assigns node '{node}' more than once")]
    DuplicateParameter { scenario: String, node: String },
    #[error("Duplicate scenario '{0}'")]
    DuplicateScenario(String),
    #[error("Road {from} -> {to} references unknown node '{missing}'")]
    GraphConsistency {
        from: String,
        to: String,
        missing: String,
    },
    #[error("Unknown scenario '{0}'")]
    UnknownScenario(String),
    #[error("Config has no [{0}] section")]
    MissingSection(&'static str),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid(parameter: &'static str, value: f64) -> Self {
        Error::InvalidParameter {
            parameter,
            value,
            context: None,
        }
    }

    /// Attaches a location (node, hour, ...) to a parameter error.
    pub fn with_context(self, ctx: impl Into<String>) -> Self {
        match self {
            Error::InvalidParameter {
                parameter,
                value,
                context: None,
            } => Error::InvalidParameter {
                parameter,
                value,
                context: Some(ctx.into()),
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
