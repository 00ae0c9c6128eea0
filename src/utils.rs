//! Utility functions for HTML processing and shared helpers

use crate::errors::SfplError;
use regex::Regex;
use scraper::{ElementRef, Selector};

/// Creates a selector from provided string
///
/// Internal utility function for parsing CSS selectors.
#[inline(always)]
pub(crate) fn make_selector(
    selector: &str,
) -> Result<Selector, scraper::error::SelectorErrorKind<'_>> {
    Selector::parse(selector)
}

/// Prefixes root-relative paths with `prefix`, anything else is returned as is.
pub(crate) fn ensure_full_url(prefix: &str, url: &str) -> String {
    if url.starts_with('/') {
        format!("{}{}", prefix, url)
    } else {
        url.to_string()
    }
}

/// Gets an attribute of the first element matching `selector` under `elem`
pub(crate) fn first_attr(elem: &ElementRef<'_>, selector: &Selector, attr: &str) -> Option<String> {
    elem.select(selector)
        .next()
        .and_then(|found| found.value().attr(attr))
        .map(str::to_string)
}

/// Macro to create a static LazyLock
#[macro_export]
macro_rules! make_static {
    ($expr:expr) => {{ LazyLock::new(|| $expr) }};
}

/// Macro to select trimmed text of the first match under an element,
/// empty when nothing matches
#[macro_export]
macro_rules! select_raw_text_next {
    ($element:expr, $selector:expr) => {
        $element
            .select($selector)
            .next()
            .map(|elem| elem.text().collect::<String>().trim().to_string())
            .unwrap_or_default()
    };
}

pub(crate) fn safe_static_selector(
    selector: Option<Selector>,
    backup: &str,
) -> Result<Selector, SfplError> {
    selector.map(Ok).unwrap_or_else(|| {
        make_selector(backup)
            .map_err(|_| SfplError::SelectorError(format!("Failed to create CSS selector {}", backup)))
    })
}

pub(crate) fn safe_static_regex(regex: Option<Regex>, backup: &str) -> Result<Regex, SfplError> {
    regex.map(Ok).unwrap_or_else(|| {
        Regex::new(backup)
            .map_err(|_| SfplError::RegexError(format!("Failed to compile regex {}", backup)))
    })
}

#[macro_export]
macro_rules! define_selector {
    ($name:ident, $name_text:ident, $text:expr) => {
        static $name_text: &str = $text;

        static $name: LazyLock<Option<Selector>> = make_static!(make_selector($text).ok());
    };
}
#[macro_export]
macro_rules! define_regex {
    ($name:ident, $name_text:ident, $text:expr) => {
        static $name_text: &str = $text;

        static $name: LazyLock<std::option::Option<regex::Regex>> =
            make_static!({ Regex::new($text).ok() });
    };
}
