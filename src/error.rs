use thiserror::Error;

/// Errors produced while generating a story.
#[derive(Error, Debug)]
pub enum StoryError {
    /// The provider credential is not configured.
    #[error("{var} environment variable is not set")]
    MissingCredential { var: &'static str },

    /// The model output did not contain parseable JSON.
    #[error("Failed to parse JSON response from model. Error: {reason}. Response preview: {preview}")]
    ResponseFormat {
        /// The serde error message.
        reason: String,
        /// The raw model text, truncated to 500 characters.
        preview: String,
    },

    /// The parsed JSON was valid but was not an object.
    #[error("Expected a JSON object in model response, found {found}")]
    NotAnObject { found: &'static str },

    /// A scene carried a `visual_prompts` value that is not an object.
    #[error("Invalid visual_prompts format in scene {scene_id}")]
    InvalidScene { scene_id: String },

    /// Low-level HTTP transport failure (connection refused, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The whole generation did not finish within the request deadline.
    #[error("Story generation timed out after {secs}s")]
    Timeout { secs: u64 },

    /// The provider replied with a non-success status code.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// Catch-all for other errors.
    #[error("{0}")]
    Other(String),
}

/// Coarse classification of a [`StoryError`], used for diagnostics only.
///
/// Both categories are recovered the same way at the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Missing credential or unusable model output.
    Validation,
    /// Provider, network, or other runtime failure.
    Operation,
}

impl ErrorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::Validation => "validation",
            ErrorCategory::Operation => "operation",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StoryError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            StoryError::MissingCredential { .. }
            | StoryError::ResponseFormat { .. }
            | StoryError::NotAnObject { .. }
            | StoryError::InvalidScene { .. } => ErrorCategory::Validation,
            StoryError::Request(_)
            | StoryError::Timeout { .. }
            | StoryError::HttpError { .. }
            | StoryError::Other(_) => ErrorCategory::Operation,
        }
    }
}

pub type Result<T> = std::result::Result<T, StoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_category() {
        let err = StoryError::MissingCredential {
            var: "ANTHROPIC_API_KEY",
        };
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(
            err.to_string(),
            "ANTHROPIC_API_KEY environment variable is not set"
        );

        let err = StoryError::InvalidScene {
            scene_id: "unknown".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.to_string(), "Invalid visual_prompts format in scene unknown");
    }

    #[test]
    fn test_operation_category() {
        let err = StoryError::HttpError {
            status: 529,
            body: "overloaded".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Operation);
        assert_eq!(err.category().to_string(), "operation");

        let err = StoryError::Timeout { secs: 120 };
        assert_eq!(err.category(), ErrorCategory::Operation);
        assert_eq!(err.to_string(), "Story generation timed out after 120s");
    }
}
