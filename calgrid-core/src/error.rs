//! Error types for the layout engine.

use thiserror::Error;

/// Errors that can occur while laying out events.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// A time string was missing or could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// End is not at least one whole hour after start.
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    /// Input had the wrong shape (non-array collection, non-object event, bad config).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A batch computation failed because of one of its inputs.
    #[error("Calculation error: {context}")]
    Calculation {
        context: String,
        #[source]
        source: Box<LayoutError>,
    },
}

impl LayoutError {
    pub(crate) fn calculation(context: impl Into<String>, source: LayoutError) -> Self {
        LayoutError::Calculation {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// The innermost error, skipping any `Calculation` wrappers.
    pub fn root_cause(&self) -> &LayoutError {
        match self {
            LayoutError::Calculation { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Result type alias for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;
