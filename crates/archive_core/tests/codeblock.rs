use archive_core::{fence_indented_code, FENCE};
use pretty_assertions::assert_eq;

#[test]
fn indented_run_is_fenced_and_dedented() {
    let input = "Hello\n\n    def f():\n        pass\n\nBye";
    assert_eq!(
        fence_indented_code(input),
        "Hello\n\n```\ndef f():\n    pass\n```\n\nBye"
    );
}

#[test]
fn open_block_is_closed_at_end_of_input() {
    assert_eq!(fence_indented_code("    x = 1"), "```\nx = 1\n```");
}

#[test]
fn blank_line_closes_the_block() {
    let input = "    a\n\n    b";
    assert_eq!(fence_indented_code(input), "```\na\n```\n\n```\nb\n```");
}

#[test]
fn whitespace_only_indented_line_does_not_trigger() {
    let input = "text\n      \nmore";
    assert_eq!(fence_indented_code(input), input);
}

#[test]
fn three_spaces_is_not_code() {
    let input = "   not code";
    assert_eq!(fence_indented_code(input), input);
}

#[test]
fn fences_are_balanced_and_bare() {
    let input = "p\n    one\n    two\nq\n    three\n\n\n    four\n";
    let output = fence_indented_code(input);
    let fences: Vec<&str> = output
        .lines()
        .filter(|line| line.contains("```"))
        .collect();
    assert_eq!(fences.len() % 2, 0);
    assert!(fences.iter().all(|line| *line == FENCE));
}

#[test]
fn output_without_indentation_is_unchanged() {
    let input = "# Title\n\nSome *text*.\n\n* item";
    assert_eq!(fence_indented_code(input), input);
}
