//! Internationalization (i18n) module
//!
//! Provides language detection and localized strings for the CLI summary.
//! Supports English and Chinese Simplified.
//! Note: Log messages remain in English for consistency.

use std::sync::OnceLock;

/// Supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    ChineseSimplified,
}

/// Global language instance
static LANGUAGE: OnceLock<Language> = OnceLock::new();

/// Initialize and get the current language based on system locale
pub fn get_language() -> Language {
    *LANGUAGE.get_or_init(detect_language)
}

/// Detect the interface language from the system locale
fn detect_language() -> Language {
    let locale = sys_locale::get_locale().unwrap_or_default();
    language_for_locale(&locale)
}

/// Map a locale name such as `zh-CN` or `zh_Hans.UTF-8` to a language
fn language_for_locale(locale: &str) -> Language {
    let locale = locale.to_lowercase();
    if locale.starts_with("zh") || locale.contains("hans") || locale.contains("chinese") {
        Language::ChineseSimplified
    } else {
        Language::English
    }
}

/// Localized strings for the CLI interface
pub struct Strings;

impl Strings {
    pub fn skipped_header() -> &'static str {
        match get_language() {
            Language::English => "Some directories could not be listed:",
            Language::ChineseSimplified => "以下文件夹无法读取：",
        }
    }

    pub fn skipped_hint() -> &'static str {
        match get_language() {
            Language::English => "Their contents are missing from the output.",
            Language::ChineseSimplified => "输出中不包含这些文件夹的内容。",
        }
    }

    pub fn sorted_entries() -> &'static str {
        match get_language() {
            Language::English => "Entries",
            Language::ChineseSimplified => "条目",
        }
    }

    pub fn directories_listed() -> &'static str {
        match get_language() {
            Language::English => "Directories listed",
            Language::ChineseSimplified => "已读取文件夹",
        }
    }

    pub fn collation() -> &'static str {
        match get_language() {
            Language::English => "Collation",
            Language::ChineseSimplified => "排序规则",
        }
    }

    pub fn code_point_order() -> &'static str {
        match get_language() {
            Language::English => "Unicode code points",
            Language::ChineseSimplified => "Unicode 码位",
        }
    }

    pub fn reading_stdin() -> &'static str {
        match get_language() {
            Language::English => "Reading strings from stdin, one per line",
            Language::ChineseSimplified => "正在从标准输入读取，每行一项",
        }
    }

    pub fn config_written() -> &'static str {
        match get_language() {
            Language::English => "Sample configuration",
            Language::ChineseSimplified => "示例配置",
        }
    }
}
