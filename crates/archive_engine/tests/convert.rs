use std::collections::HashMap;

use archive_engine::{convert_body, MarkdownConverter, MarkdownOptions};
use pretty_assertions::assert_eq;

fn md(html: &str) -> String {
    MarkdownConverter::default().convert(html)
}

#[test]
fn paragraphs_are_separated_by_a_blank_line() {
    assert_eq!(md("<p>first</p><p>second</p>"), "first\n\nsecond");
    assert_eq!(md("<div>one</div>\n\n<div>two</div>"), "one\n\ntwo");
}

#[test]
fn line_break_is_a_hard_newline() {
    assert_eq!(md("line one<br>line two"), "line one\nline two");
}

#[test]
fn whitespace_runs_collapse() {
    assert_eq!(md("<p>  a \n\n  b   c </p>"), "a b c");
}

#[test]
fn non_breaking_spaces_survive() {
    assert_eq!(md("<p>a&nbsp;&nbsp;b</p>"), "a  b");
}

#[test]
fn headings_and_rules() {
    assert_eq!(md("<h2>Title</h2><p>x</p><hr><p>y</p>"), "## Title\n\nx\n\n* * *\n\ny");
}

#[test]
fn lists_use_star_and_numbers() {
    assert_eq!(md("<ul><li>one</li><li>two</li></ul>"), "* one\n* two");
    assert_eq!(md("<ol start=\"3\"><li>a</li><li>b</li></ol>"), "3. a\n4. b");
}

#[test]
fn nested_lists_are_indented() {
    assert_eq!(
        md("<ul><li>outer<ul><li>inner</li></ul></li></ul>"),
        "* outer\n\n  * inner"
    );
}

#[test]
fn blockquote_lines_are_prefixed() {
    assert_eq!(md("<blockquote><p>a</p><p>b</p></blockquote>"), "> a\n>\n> b");
}

#[test]
fn inline_markup() {
    assert_eq!(md("<p><em>hi</em> there <b>you</b></p>"), "_hi_ there **you**");
    assert_eq!(md("<p>use <code>a*b</code> here</p>"), "use `a*b` here");
    assert_eq!(
        md("<p>see <a href=\"http://x/a b\">this</a>.</p>"),
        "see [this](http://x/a%20b)."
    );
}

#[test]
fn markdown_characters_in_text_are_escaped() {
    assert_eq!(md("<p>a_b *c* [d] #e</p>"), "a\\_b \\*c\\* \\[d\\] \\#e");
    assert_eq!(md("<p>- not a list</p>"), "\\- not a list");
    assert_eq!(md("<p>1. not a list</p>"), "1\\. not a list");
    assert_eq!(md("<p>&gt; not a quote</p>"), "\\> not a quote");
}

#[test]
fn escaping_can_be_disabled() {
    let converter = MarkdownConverter::new(MarkdownOptions {
        escape_markdown: false,
        ..MarkdownOptions::default()
    });
    assert_eq!(converter.convert("<p>a_b</p>"), "a_b");
}

#[test]
fn scripts_are_dropped() {
    assert_eq!(md("<p>x</p><script>var a = 1;</script><p>y</p>"), "x\n\ny");
}

#[test]
fn images_are_rewritten_to_local_names() {
    let rewrites = HashMap::from([("http://h/a.png".to_string(), "a.png".to_string())]);
    let converter = MarkdownConverter::default().with_image_rewrites(rewrites);
    assert_eq!(
        converter.convert("<img src=\"http://h/a.png\" alt=\"pic\"><img src=\"http://h/b.png\">"),
        "![pic](a.png)![](http://h/b.png)"
    );
}

#[test]
fn pre_is_indented_then_fenced() {
    let body = "<p>Hello</p><pre>    def f(): pass</pre>";
    assert_eq!(md(body), "Hello\n\n    def f(): pass");
    assert_eq!(
        convert_body(body, &HashMap::new()),
        "Hello\n\n```\ndef f(): pass\n```"
    );
}

#[test]
fn code_with_line_breaks_is_a_block() {
    assert_eq!(
        convert_body("<code>a = 1<br>b = 2</code>", &HashMap::new()),
        "```\na = 1\nb = 2\n```"
    );
}

#[test]
fn multi_line_pre_keeps_relative_indentation() {
    let body = "<pre>\ndef f():\n    return 1\n</pre><p>after</p>";
    assert_eq!(
        convert_body(body, &HashMap::new()),
        "```\ndef f():\n    return 1\n```\n\nafter"
    );
}
