//! Error message formatting with actionable suggestions.
//!
//! Renders each `GatewayError` variant as a distinguishable, user-friendly
//! message, including the fix suggestion and source chain when available.

use std::error::Error;

use reel_core::error::GatewayError;

use super::{Palette, DIM, RED};

/// Error formatter with suggestions
pub struct ErrorFormatter {
    palette: Palette,
}

impl ErrorFormatter {
    /// Create a new error formatter
    pub fn new() -> Self {
        Self {
            palette: Palette::detect(),
        }
    }

    /// Create a formatter without ANSI colors, for tests
    #[cfg(test)]
    fn plain() -> Self {
        Self {
            palette: Palette::plain(),
        }
    }

    /// Format an error with context and suggestions
    pub fn format_error(&self, error: &GatewayError) -> String {
        let mut sections = vec![self.labeled(RED, "error", &error.to_string())];

        if let Some(suggestion) = error.suggestion() {
            sections.push(self.labeled(DIM, "help", suggestion));
        }

        let mut source = error.source();
        while let Some(cause) = source {
            sections.push(self.labeled(DIM, "caused by", &cause.to_string()));
            source = cause.source();
        }

        sections.join("\n\n")
    }

    fn labeled(&self, code: &str, label: &str, body: &str) -> String {
        format!("{}: {}", self.palette.paint(code, label), body)
    }
}

impl Default for ErrorFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_variants_render_distinct_messages() {
        let formatter = ErrorFormatter::plain();
        let errors = [
            GatewayError::network("connection reset"),
            GatewayError::RateLimited {
                retry_after: Some(Duration::from_secs(5)),
            },
            GatewayError::Upstream {
                status: 502,
                detail: "bad gateway".to_string(),
            },
            GatewayError::MissingQuery,
            GatewayError::Unconfigured,
        ];

        let rendered: Vec<String> = errors
            .iter()
            .map(|e| formatter.format_error(e))
            .collect();
        for (i, message) in rendered.iter().enumerate() {
            assert!(message.starts_with("error: "), "message {} malformed", i);
            for (j, other) in rendered.iter().enumerate() {
                assert!(i == j || message != other, "messages {} and {} collide", i, j);
            }
        }
    }

    #[test]
    fn test_plain_formatter_emits_no_escape_codes() {
        let formatter = ErrorFormatter::plain();
        let message = formatter.format_error(&GatewayError::Unconfigured);
        assert!(!message.contains('\x1b'));
    }

    #[test]
    fn test_suggestion_is_included() {
        let formatter = ErrorFormatter::plain();
        let message = formatter.format_error(&GatewayError::Unconfigured);
        assert!(message.contains("help: "));
        assert!(message.contains("TMDB_API_KEY"));
    }

    #[test]
    fn test_source_chain_is_included() {
        let formatter = ErrorFormatter::plain();
        let error = GatewayError::io(
            "failed to write token file",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let message = formatter.format_error(&error);
        assert!(message.contains("caused by: denied"));
    }
}
