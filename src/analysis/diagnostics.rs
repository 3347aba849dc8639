//! Diagnostics for words written entirely in uppercase

use std::sync::LazyLock;

use regex::Regex;
use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, Range};

use crate::analysis::DIAGNOSTIC_SOURCE;
use crate::config::Settings;
use crate::document::TextDocument;

/// Two or more uppercase ASCII letters forming a whole word
static UPPERCASE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{2,}\b").expect("uppercase word pattern is valid"));

/// Scans the document and returns at most `settings.max_number_of_problems` warnings.
pub fn validate(document: &TextDocument, settings: &Settings) -> Vec<Diagnostic> {
    UPPERCASE_WORD
        .find_iter(document.text())
        .take(settings.max_number_of_problems)
        .map(|word| {
            let range = Range::new(
                document.position_at(word.start()),
                document.position_at(word.end()),
            );
            Diagnostic {
                range,
                severity: Some(DiagnosticSeverity::WARNING),
                source: Some(DIAGNOSTIC_SOURCE.to_string()),
                message: format!("{} is all uppercase.", word.as_str()),
                ..Default::default()
            }
        })
        .collect()
}
