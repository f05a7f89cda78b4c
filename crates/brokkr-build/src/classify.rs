//! Build output classification
//!
//! Each line of packaging-tool output is classified by case-insensitive
//! whole-word keyword match with fixed precedence (error beats warning
//! beats success), and scanned for a percentage to drive progress
//! reporting. The tool localizes some of its output, so the keyword sets
//! include the known localized variants.

use brokkr_core::LogLevel;
use regex::Regex;
use std::sync::LazyLock;

static ERROR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(error|ошибка|failed)\b").expect("error regex is valid"));

static WARNING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(warning|предупреждение)\b").expect("warning regex is valid")
});

static SUCCESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(success|успешно|completed)\b").expect("success regex is valid")
});

static PROGRESS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)%").expect("progress regex is valid"));

/// Classify one line of packaging-tool output
pub fn classify_line(line: &str) -> LogLevel {
    if ERROR_RE.is_match(line) {
        LogLevel::Error
    } else if WARNING_RE.is_match(line) {
        LogLevel::Warning
    } else if SUCCESS_RE.is_match(line) {
        LogLevel::Success
    } else {
        LogLevel::Info
    }
}

/// Extract a progress percentage from a line, clamped to 100
pub fn extract_progress(line: &str) -> Option<u8> {
    let captures = PROGRESS_RE.captures(line)?;
    let percent: u32 = captures[1].parse().ok()?;
    Some(percent.min(100) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_keywords() {
        assert_eq!(classify_line("Error: missing module"), LogLevel::Error);
        assert_eq!(classify_line("compile FAILED for target"), LogLevel::Error);
        assert_eq!(classify_line("Ошибка при сборке"), LogLevel::Error);
    }

    #[test]
    fn test_error_beats_warning() {
        assert_eq!(
            classify_line("warning promoted to error in strict mode"),
            LogLevel::Error
        );
    }

    #[test]
    fn test_warning_beats_success() {
        assert_eq!(
            classify_line("completed with 3 warning(s)"),
            LogLevel::Warning
        );
    }

    #[test]
    fn test_success_keywords() {
        assert_eq!(classify_line("Stage completed"), LogLevel::Success);
        assert_eq!(classify_line("Сборка прошла успешно"), LogLevel::Success);
    }

    #[test]
    fn test_plain_line_is_info() {
        assert_eq!(classify_line("Parsing headers..."), LogLevel::Info);
    }

    #[test]
    fn test_whole_word_match_only() {
        // "errors" and "successful" do not contain whole-word matches
        assert_eq!(classify_line("0 mirrors configured"), LogLevel::Info);
    }

    #[test]
    fn test_progress_extraction() {
        assert_eq!(extract_progress("Build 42% complete"), Some(42));
        assert_eq!(extract_progress("[3/10] linking... 100%"), Some(100));
        assert_eq!(extract_progress("no percentage here"), None);
    }

    #[test]
    fn test_progress_clamped() {
        assert_eq!(extract_progress("420% of budget"), Some(100));
    }
}
