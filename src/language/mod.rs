//! Target language selection.
//!
//! # Data Flow
//! ```text
//! ?lang= query parameter ──┐
//!                          ├─→ LanguageSelector::select → Language
//! Accept-Language header ──┘
//! ```
//!
//! # Design Decisions
//! - The supported set is closed; anything else collapses to English
//! - Selection is pure: no I/O, never fails

pub mod selector;

pub use selector::LanguageSelector;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A language the proxy can translate pages into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Language {
    /// Simplified Chinese.
    #[serde(rename = "zh-CN")]
    ZhCn,
    /// English (the default).
    #[default]
    #[serde(rename = "en")]
    En,
    /// Spanish.
    #[serde(rename = "es")]
    Es,
}

impl Language {
    /// Every language the proxy knows about.
    pub const ALL: [Language; 3] = [Language::ZhCn, Language::En, Language::Es];

    /// Public code as accepted in the `lang` query parameter.
    pub fn code(self) -> &'static str {
        match self {
            Language::ZhCn => "zh-CN",
            Language::En => "en",
            Language::Es => "es",
        }
    }

    /// Code sent to the translation service as the `target` field.
    pub fn target_code(self) -> &'static str {
        match self {
            Language::ZhCn => "zh",
            Language::En => "en",
            Language::Es => "es",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Returned when a string is not one of the exact public codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language code: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == s)
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for lang in Language::ALL {
            assert_eq!(lang.code().parse::<Language>(), Ok(lang));
        }
    }

    #[test]
    fn test_parse_is_exact() {
        assert!("zh-cn".parse::<Language>().is_err());
        assert!("EN".parse::<Language>().is_err());
        assert!("".parse::<Language>().is_err());
    }

    #[test]
    fn test_target_code_mapping() {
        assert_eq!(Language::ZhCn.target_code(), "zh");
        assert_eq!(Language::En.target_code(), "en");
        assert_eq!(Language::Es.target_code(), "es");
    }
}
