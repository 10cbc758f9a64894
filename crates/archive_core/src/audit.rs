use std::sync::LazyLock;

use regex::Regex;

/// `>` then indentation deep enough to be code, or a nested marker.
static CODE_INDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^>\s+(\s{4,}.*|>\s+.*)").expect("CODE_INDENT regex"));

/// A quote line with nothing but whitespace after the marker.
static BLANK_QUOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^>\s*$").expect("BLANK_QUOTE regex"));

static NESTED_QUOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^>\s+>\s+").expect("NESTED_QUOTE regex"));

/// True when a quoted section of `markdown` looks like code that was
/// mis-converted into a blockquote.
///
/// A quoted section starts at a line beginning with `>` and runs over
/// following quote lines and blank lines until the first other line.
pub fn has_suspicious_quotes(markdown: &str) -> bool {
    let mut section: Vec<&str> = Vec::new();
    let mut in_section = false;

    for line in markdown.split('\n') {
        if line.starts_with('>') {
            in_section = true;
            section.push(line);
        } else if in_section {
            if line.trim().is_empty() {
                section.push(line);
            } else {
                if is_suspicious_section(&section) {
                    return true;
                }
                section.clear();
                in_section = false;
            }
        }
    }

    in_section && is_suspicious_section(&section)
}

fn is_suspicious_section(lines: &[&str]) -> bool {
    let mut blank_run = 0usize;
    let mut repeated_blanks = false;

    for line in lines {
        if CODE_INDENT.is_match(line) || NESTED_QUOTE.is_match(line) {
            return true;
        }
        if BLANK_QUOTE.is_match(line) {
            blank_run += 1;
        } else {
            repeated_blanks |= blank_run > 1;
            blank_run = 0;
        }
    }

    repeated_blanks || blank_run > 1
}
