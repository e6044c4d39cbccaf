use super::Language;
use serde::{Deserialize, Serialize};
use snipboard_errors::AppError;

/// Contents of the share form before submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetDraft {
    pub code: String,
    pub description: String,
    pub language: Option<Language>,
}

impl SnippetDraft {
    /// Validates the draft without touching it; the form is cleared only after the share succeeds.
    pub fn to_new_snippet(&self) -> Result<NewSnippet, AppError> {
        if self.code.trim().is_empty() {
            return Err(AppError::InvalidInput("Code cannot be empty".to_string()));
        }
        if self.description.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Description cannot be empty".to_string(),
            ));
        }
        Ok(NewSnippet {
            code: self.code.clone(),
            description: self.description.trim().to_string(),
            language: self.language,
        })
    }

    pub fn clear(&mut self) {
        self.code.clear();
        self.description.clear();
        self.language = None;
    }
}

/// A validated snippet ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSnippet {
    pub code: String,
    pub description: String,
    pub language: Option<Language>,
}
