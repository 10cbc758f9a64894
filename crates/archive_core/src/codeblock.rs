/// A Markdown code fence line.
pub const FENCE: &str = "```";

const INDENT: &str = "    ";

/// Wrap runs of four-space-indented lines in fenced code blocks.
///
/// A run starts at the first line that begins with four spaces and has some
/// non-whitespace content, and ends at the first line that does not (a blank
/// line included). Lines inside a run lose their leading four spaces.
pub fn fence_indented_code(markdown: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    let mut inside = false;

    for line in markdown.split('\n') {
        match code_line(line) {
            Some(code) => {
                if !inside {
                    out.push(FENCE);
                    inside = true;
                }
                out.push(code);
            }
            None => {
                if inside {
                    out.push(FENCE);
                    inside = false;
                }
                out.push(line);
            }
        }
    }
    if inside {
        out.push(FENCE);
    }

    out.join("\n")
}

fn code_line(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(INDENT)?;
    if rest.trim().is_empty() {
        None
    } else {
        Some(rest)
    }
}
