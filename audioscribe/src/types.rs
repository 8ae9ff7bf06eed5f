use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Completed transcription: the text the model produced and where it was saved.
///
/// `output_path` always refers to a file that was fully written; a failed
/// write never yields a `Transcription`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcription {
    pub text: String,
    pub output_path: PathBuf,
}

impl Transcription {
    /// Format as JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Format as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
