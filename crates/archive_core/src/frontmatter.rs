use std::fmt::Write;

use crate::post::{Comment, Post};

/// Render the `index.md` document for a post: front matter, body, comments.
pub fn render_index_markdown(post: &Post) -> String {
    let mut doc = String::from("---\n");

    push_quoted(&mut doc, "title", post.title.as_deref());
    push_quoted(&mut doc, "author", post.author.as_deref());
    push_quoted(&mut doc, "date", post.date.as_deref());
    push_quoted(&mut doc, "url", post.url.as_deref());
    push_quoted(&mut doc, "post_id", post.post_id.as_deref());
    push_quoted(&mut doc, "blog_id", post.blog_id.as_deref());
    if !post.labels.is_empty() {
        let _ = writeln!(doc, "tags: {:?}", post.labels);
    }
    if !post.downloaded_images.is_empty() {
        let _ = writeln!(doc, "images: {:?}", post.downloaded_images);
    }
    let _ = writeln!(doc, "comments: {}", post.comments.len());
    push_quoted(
        &mut doc,
        "published_timestamp",
        post.metadata.published_timestamp.as_deref(),
    );
    push_quoted(&mut doc, "blog_title", post.metadata.blog_title.as_deref());
    doc.push_str("---\n\n");

    doc.push_str(post.content.as_deref().unwrap_or_default());

    if !post.comments.is_empty() {
        doc.push_str("\n\n---\n\n## Comments\n");
        for comment in &post.comments {
            doc.push('\n');
            doc.push_str(&comment_heading(comment));
            doc.push_str("\n\n");
            if let Some(content) = comment.content.as_deref().filter(|c| !c.is_empty()) {
                doc.push_str(content);
                doc.push('\n');
            }
        }
    }

    let trimmed = doc.trim_end_matches('\n').len();
    doc.truncate(trimmed);
    doc.push('\n');
    doc
}

fn push_quoted(doc: &mut String, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        let _ = writeln!(doc, "{key}: \"{}\"", escape_quoted(value));
    }
}

fn escape_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn comment_heading(comment: &Comment) -> String {
    let author = comment.author.as_deref().unwrap_or("Anonymous");
    match comment.timestamp.as_deref() {
        Some(timestamp) => format!("### {author} - {timestamp}"),
        None => format!("### {author}"),
    }
}
