//! Supported languages.

use serde::{Deserialize, Serialize};

/// A language the assistant can answer in.
///
/// Each supported language has its own retrieval index and its own prompt
/// templates. Questions in any other language are rejected before retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Arabic,
    English,
}

impl Language {
    /// All supported languages.
    pub const ALL: [Language; 2] = [Language::Arabic, Language::English];

    /// Canonical lowercase tag (used in artifact file names and config).
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Arabic => "arabic",
            Language::English => "english",
        }
    }

    /// Parse a language tag.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "arabic" | "ar" => Some(Language::Arabic),
            "english" | "en" => Some(Language::English),
            _ => None,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        assert_eq!(Language::parse("arabic"), Some(Language::Arabic));
        assert_eq!(Language::parse("AR"), Some(Language::Arabic));
        assert_eq!(Language::parse("english"), Some(Language::English));
        assert_eq!(Language::parse("en"), Some(Language::English));
        assert_eq!(Language::parse("fr"), None);
    }

    #[test]
    fn test_display_matches_tag() {
        for language in Language::ALL {
            assert_eq!(language.to_string(), language.as_str());
        }
    }
}
