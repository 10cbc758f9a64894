use archive_core::has_suspicious_quotes;

#[test]
fn plain_quotes_are_fine() {
    let md = "Intro\n\n> A wise man once said\n> something short.\n\nOutro";
    assert!(!has_suspicious_quotes(md));
}

#[test]
fn deep_indentation_inside_quote_is_flagged() {
    let md = "Intro\n\n>     def handler(environ):\n>         return []\n\nOutro";
    assert!(has_suspicious_quotes(md));
}

#[test]
fn repeated_blank_quote_lines_are_flagged() {
    let md = "> first\n>\n>   \n> second\n\nafter";
    assert!(has_suspicious_quotes(md));
}

#[test]
fn single_blank_quote_line_is_fine() {
    let md = "> first\n>\n> second\n\nafter";
    assert!(!has_suspicious_quotes(md));
}

#[test]
fn nested_quote_marker_is_flagged() {
    let md = "text\n> > @decorator\nafter";
    assert!(has_suspicious_quotes(md));
}

#[test]
fn trailing_quote_section_is_checked() {
    let md = "text\n\n> a\n>\n>";
    assert!(has_suspicious_quotes(md));
}

#[test]
fn no_quotes_at_all() {
    assert!(!has_suspicious_quotes("```\ncode\n```\n"));
}
