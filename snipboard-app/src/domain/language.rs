use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Highlighting language a snippet can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Html,
    Css,
    Javascript,
    Typescript,
    Python,
    Ruby,
    Swift,
    Rust,
    Go,
}

impl Language {
    /// All languages, sorted by display label for the picker.
    pub const ALL: [Language; 9] = [
        Language::Css,
        Language::Go,
        Language::Html,
        Language::Javascript,
        Language::Python,
        Language::Ruby,
        Language::Rust,
        Language::Swift,
        Language::Typescript,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Css => "css",
            Self::Javascript => "javascript",
            Self::Typescript => "typescript",
            Self::Python => "python",
            Self::Ruby => "ruby",
            Self::Swift => "swift",
            Self::Rust => "rust",
            Self::Go => "go",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Html => "HTML",
            Self::Css => "CSS",
            Self::Javascript => "JavaScript",
            Self::Typescript => "TypeScript",
            Self::Python => "Python",
            Self::Ruby => "Ruby",
            Self::Swift => "Swift",
            Self::Rust => "Rust",
            Self::Go => "Golang",
        }
    }

    /// Parses an optional tag where the empty string means "no language".
    pub fn parse_optional(tag: &str) -> Option<Language> {
        tag.trim().parse().ok()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .iter()
            .copied()
            .find(|lang| lang.as_str() == s)
            .ok_or_else(|| format!("unknown language: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sorted_by_label() {
        let labels: Vec<_> = Language::ALL.iter().map(|l| l.label()).collect();
        let mut sorted = labels.clone();
        sorted.sort();
        assert_eq!(labels, sorted);
    }

    #[test]
    fn test_parse_optional() {
        assert_eq!(Language::parse_optional("rust"), Some(Language::Rust));
        assert_eq!(Language::parse_optional(""), None);
        assert_eq!(Language::parse_optional("cobol"), None);
    }
}
