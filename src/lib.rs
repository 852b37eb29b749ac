//! Translating reverse proxy library.
//!
//! Fetches one fixed upstream site and streams it back; HTML pages get a
//! `<base>` tag and machine-translated text nodes, everything else passes
//! through untouched.

pub mod config;
pub mod http;
pub mod language;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod rewrite;
pub mod translation;

pub use config::AppConfig;
pub use http::HttpServer;
pub use language::{Language, LanguageSelector};
pub use lifecycle::Shutdown;
pub use rewrite::HtmlTransformer;
pub use translation::{NodeTranslator, TranslationClient};
