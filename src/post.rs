//! The post record and its JSON boundaries.
//!
//! A [`Post`] arrives either from a language model (as free text wrapping a
//! JSON object) or from a JSON file on disk. Both paths end in the same
//! `serde` deserialization; missing keys are a caller error.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No JSON object found in model response")]
    NoJsonObject,
}

/// Content of one daily post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Single-line headline.
    pub title: String,
    /// Paragraph text; lines starting with the bullet marker are list items.
    pub description: String,
    /// Code snippet, possibly empty.
    pub code: String,
}

impl Post {
    /// Extract the post from a model response.
    ///
    /// Models tend to wrap the object in prose or code fences, so everything
    /// outside the first `{` and the last `}` is discarded before parsing.
    pub fn from_model_response(response: &str) -> Result<Self, PostError> {
        let start = response.find('{').ok_or(PostError::NoJsonObject)?;
        let end = response.rfind('}').ok_or(PostError::NoJsonObject)?;
        if end < start {
            return Err(PostError::NoJsonObject);
        }
        Ok(serde_json::from_str(&response[start..=end])?)
    }

    /// Load a post from a JSON file.
    pub fn load(path: &Path) -> Result<Self, PostError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
