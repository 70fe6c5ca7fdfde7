//! Error taxonomy shared by the stage factory, pipeline and run configuration.
//!
//! Every error is raised before any pixel is touched: once a [`Pipeline`]
//! has been built, applying it cannot fail.
//!
//! [`Pipeline`]: crate::pipeline::Pipeline

/// Convenience result type used across the crate.
pub type EditResult<T> = Result<T, EditError>;

/// Broad class of an [`EditError`], used by callers that only care about
/// where a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Invalid operation list, descriptor or run configuration.
    Configuration,
    /// A stage parameter violated the stage's own invariants.
    Construction,
    /// A pixel buffer or kernel with an inconsistent shape.
    Buffer,
    /// Reading or parsing the configuration file.
    Io,
}

/// Top-level error type.
#[derive(thiserror::Error, Debug)]
pub enum EditError {
    #[error("at least one operation must be specified")]
    EmptyPipeline,

    #[error("unknown operation type: {0}")]
    UnknownOperation(String),

    #[error("operation '{kind}' requires parameter '{name}'")]
    MissingParameter { kind: String, name: String },

    #[error("operation '{kind}': invalid parameter '{name}': {reason}")]
    InvalidParameter {
        kind: String,
        name: String,
        reason: String,
    },

    #[error("operation '{kind}' does not accept parameter '{name}'")]
    UnexpectedParameter { kind: String, name: String },

    /// Failure while building operation `index` of a pipeline.
    #[error("operation #{index}: {source}")]
    Operation {
        index: usize,
        #[source]
        source: Box<EditError>,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("cannot construct '{kind}': {message}")]
    Construction { kind: String, message: String },

    #[error("invalid pixel buffer: {0}")]
    InvalidBuffer(String),

    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl EditError {
    pub fn missing(kind: &str, name: &str) -> Self {
        Self::MissingParameter {
            kind: kind.to_string(),
            name: name.to_string(),
        }
    }

    pub fn invalid(kind: &str, name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            kind: kind.to_string(),
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    pub fn construction(kind: &str, message: impl Into<String>) -> Self {
        Self::Construction {
            kind: kind.to_string(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Classify this error. Wrapped per-operation errors report the category
    /// of the underlying failure.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyPipeline
            | Self::UnknownOperation(_)
            | Self::MissingParameter { .. }
            | Self::InvalidParameter { .. }
            | Self::UnexpectedParameter { .. }
            | Self::Config(_) => ErrorCategory::Configuration,
            Self::Operation { source, .. } => source.category(),
            Self::Construction { .. } => ErrorCategory::Construction,
            Self::InvalidBuffer(_) | Self::InvalidKernel(_) => ErrorCategory::Buffer,
            Self::Io(_) | Self::Json(_) => ErrorCategory::Io,
        }
    }

    /// The innermost error, unwrapping per-operation context.
    pub fn root(&self) -> &EditError {
        match self {
            Self::Operation { source, .. } => source.root(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_of_wrapped_error() {
        let err = EditError::Operation {
            index: 2,
            source: Box::new(EditError::construction("brightness", "factor must be > 0")),
        };
        assert_eq!(err.category(), ErrorCategory::Construction);
        assert!(matches!(err.root(), EditError::Construction { .. }));
        assert_eq!(
            err.to_string(),
            "operation #2: cannot construct 'brightness': factor must be > 0"
        );
    }

    #[test]
    fn test_messages_name_parameter_and_kind() {
        let err = EditError::missing("brightness", "factor");
        assert_eq!(err.category(), ErrorCategory::Configuration);
        let msg = err.to_string();
        assert!(msg.contains("brightness"));
        assert!(msg.contains("factor"));

        let err = EditError::UnknownOperation("glow".into());
        assert_eq!(err.to_string(), "unknown operation type: glow");
    }
}
