//! Small lookups over the `scraper` tree shared by the post and comment parsers.

use scraper::{ElementRef, Selector};

fn parse_selector(css: &str) -> Option<Selector> {
    let parsed = Selector::parse(css).ok();
    if parsed.is_none() {
        archive_logging::archive_error!("invalid selector {css:?}");
    }
    parsed
}

/// First descendant of `scope` matching `css`, in document order.
pub(crate) fn select_first<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = parse_selector(css)?;
    let found = scope.select(&selector).next();
    found
}

/// Every descendant of `scope` matching `css`, in document order.
pub(crate) fn select_all<'a>(scope: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    let Some(selector) = parse_selector(css) else {
        return Vec::new();
    };
    let found = scope.select(&selector).collect();
    found
}

/// `h1.a.b, h2.a.b, ... h6.a.b` for the given class list.
pub(crate) fn heading_selector(classes: &[&str]) -> String {
    let suffix: String = classes.iter().map(|class| format!(".{class}")).collect();
    (1..=6)
        .map(|level| format!("h{level}{suffix}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Visible text with whitespace runs collapsed; `None` when empty.
pub(crate) fn normalized_text(element: ElementRef<'_>) -> Option<String> {
    let raw: String = element.text().collect();
    let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    (!text.is_empty()).then_some(text)
}

/// Trimmed attribute value; `None` when missing or blank.
pub(crate) fn attr(element: ElementRef<'_>, name: &str) -> Option<String> {
    element
        .value()
        .attr(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

pub(crate) fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

pub(crate) fn is_tag(element: ElementRef<'_>, name: &str) -> bool {
    element.value().name().eq_ignore_ascii_case(name)
}
