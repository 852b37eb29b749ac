//! Language selection from request signals.

use crate::language::Language;

/// Picks the target language for a request.
///
/// Holds the configured supported set; a resolved language outside that set
/// is forced back to English.
#[derive(Debug, Clone)]
pub struct LanguageSelector {
    supported: Vec<Language>,
}

impl LanguageSelector {
    /// Create a selector over the given supported languages.
    pub fn new(supported: Vec<Language>) -> Self {
        Self { supported }
    }

    /// Whether `lang` is in the configured set.
    pub fn is_supported(&self, lang: Language) -> bool {
        self.supported.contains(&lang)
    }

    /// Resolve the target language.
    ///
    /// An explicit `lang` value wins when it is an exact supported code.
    /// Otherwise the Accept-Language prefix decides, defaulting to English.
    pub fn select(&self, explicit: Option<&str>, accept_language: Option<&str>) -> Language {
        let resolved = explicit
            .and_then(|code| code.parse::<Language>().ok())
            .filter(|lang| self.is_supported(*lang))
            .unwrap_or_else(|| detect_from_header(accept_language.unwrap_or("")));

        if self.is_supported(resolved) {
            resolved
        } else {
            Language::En
        }
    }
}

impl Default for LanguageSelector {
    fn default() -> Self {
        Self::new(Language::ALL.to_vec())
    }
}

fn detect_from_header(accept_language: &str) -> Language {
    let header = accept_language.trim_start().to_ascii_lowercase();
    if header.starts_with("zh") {
        Language::ZhCn
    } else if header.starts_with("es") {
        Language::Es
    } else {
        Language::En
    }
}
