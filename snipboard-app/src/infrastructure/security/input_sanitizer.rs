use crate::domain::{NewSnippet, ProfileUpdate, SnippetDraft};
use snipboard_errors::AppError;

const MAX_CODE_LENGTH: usize = 20_000;
const MAX_DESCRIPTION_LENGTH: usize = 280;
const MAX_DISPLAY_NAME_LENGTH: usize = 64;
const MAX_URL_LENGTH: usize = 2048;

const ALLOWED_SCHEMES: &[&str] = &["http", "https"];

pub struct InputSanitizer;

impl InputSanitizer {
    /// Server-side checks on top of [`SnippetDraft::to_new_snippet`].
    pub fn validate_snippet(draft: &SnippetDraft) -> Result<NewSnippet, AppError> {
        let mut new = draft.to_new_snippet()?;

        if new.code.chars().count() > MAX_CODE_LENGTH {
            return Err(AppError::InvalidInput(format!(
                "Code is longer than {} characters",
                MAX_CODE_LENGTH
            )));
        }

        if new
            .code
            .chars()
            .any(|c| c.is_control() && !matches!(c, '\n' | '\t' | '\r'))
        {
            tracing::warn!("Rejected snippet containing control characters");
            return Err(AppError::InvalidInput(
                "Code contains unsupported control characters".to_string(),
            ));
        }

        new.description = Self::collapse_whitespace(&new.description);
        if new.description.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(AppError::InvalidInput(format!(
                "Description is longer than {} characters",
                MAX_DESCRIPTION_LENGTH
            )));
        }

        Ok(new)
    }

    /// Returns the cleaned display name and icon URL (`None` for no icon).
    pub fn validate_profile(update: &ProfileUpdate) -> Result<(String, Option<String>), AppError> {
        let display_name = Self::collapse_whitespace(&update.display_name);
        if display_name.is_empty() {
            return Err(AppError::InvalidInput(
                "Display name cannot be empty".to_string(),
            ));
        }
        if display_name.chars().count() > MAX_DISPLAY_NAME_LENGTH {
            return Err(AppError::InvalidInput(format!(
                "Display name is longer than {} characters",
                MAX_DISPLAY_NAME_LENGTH
            )));
        }

        let icon_url = Self::validate_icon_url(&update.icon_url)?;
        Ok((display_name, icon_url))
    }

    fn validate_icon_url(url: &str) -> Result<Option<String>, AppError> {
        let url = url.trim();
        if url.is_empty() {
            return Ok(None);
        }

        if url.len() > MAX_URL_LENGTH {
            return Err(AppError::InvalidInput("Icon URL is too long".to_string()));
        }

        let parsed = url::Url::parse(url)
            .map_err(|_| AppError::InvalidInput("Icon URL is not a valid URL".to_string()))?;

        let scheme = parsed.scheme().to_lowercase();
        if !ALLOWED_SCHEMES.contains(&scheme.as_str()) {
            return Err(AppError::InvalidInput(
                "Icon URL must use http or https".to_string(),
            ));
        }

        if parsed.host_str().is_none() {
            return Err(AppError::InvalidInput("Icon URL must have a host".to_string()));
        }

        Ok(Some(parsed.to_string()))
    }

    fn collapse_whitespace(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}
