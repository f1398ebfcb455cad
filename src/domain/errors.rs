//! Domain errors for workflow-document composition.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building or mutating a workflow document.
#[derive(Debug, Error)]
pub enum ComposerError {
    /// A read path expected a structural element that is missing or of the wrong shape.
    #[error("workflow config: missing or invalid {path}")]
    ConfigShape { path: &'static str },

    /// The built-in template or an input document is not valid YAML for the workflow model.
    #[error("workflow config: failed to parse document: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A node input mapping does not follow the `<source>#<field>` form.
    #[error("workflow config: invalid source reference {0:?} (expected `<node>#<field>`)")]
    InvalidSourceRef(String),

    /// Reading or writing a document file failed.
    #[error("workflow config: I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ComposerError {
    pub(crate) const fn shape(path: &'static str) -> Self {
        Self::ConfigShape { path }
    }
}

pub type ComposerResult<T> = Result<T, ComposerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_shape_names_missing_segment() {
        let err = ComposerError::shape("nodes.research");
        assert_eq!(
            err.to_string(),
            "workflow config: missing or invalid nodes.research"
        );
    }

    #[test]
    fn test_invalid_source_ref_message() {
        let err = ComposerError::InvalidSourceRef("generate".to_string());
        assert!(err.to_string().contains("\"generate\""));
    }
}
