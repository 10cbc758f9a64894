use archive_core::{render_index_markdown, Comment, Post, PostMetadata};
use pretty_assertions::assert_eq;

fn sample_post() -> Post {
    Post {
        title: Some("Resistance is futile".to_string()),
        content: Some("Hello\n\n```\ndef f(): pass\n```".to_string()),
        date: Some("Tuesday, March 6, 2007".to_string()),
        author: Some("Graham".to_string()),
        url: Some("http://example/2007/03/resistance-is-futile.html".to_string()),
        post_id: Some("123".to_string()),
        blog_id: Some("456".to_string()),
        comments: vec![Comment {
            comment_id: Some("789".to_string()),
            author: Some("Alice".to_string()),
            content: Some("Nice post".to_string()),
            timestamp: Some("March 7, 2007 9:00 AM".to_string()),
            ..Comment::default()
        }],
        labels: vec!["python".to_string(), "wsgi".to_string()],
        metadata: PostMetadata {
            published_timestamp: Some("2007-03-06T10:00:00+11:00".to_string()),
            blog_title: Some("Graham Dumpleton".to_string()),
            page_title: Some("ignored".to_string()),
            ..PostMetadata::default()
        },
        downloaded_images: vec!["b.png".to_string()],
    }
}

#[test]
fn full_document_layout() {
    let doc = render_index_markdown(&sample_post());
    let expected = "---\n\
title: \"Resistance is futile\"\n\
author: \"Graham\"\n\
date: \"Tuesday, March 6, 2007\"\n\
url: \"http://example/2007/03/resistance-is-futile.html\"\n\
post_id: \"123\"\n\
blog_id: \"456\"\n\
tags: [\"python\", \"wsgi\"]\n\
images: [\"b.png\"]\n\
comments: 1\n\
published_timestamp: \"2007-03-06T10:00:00+11:00\"\n\
blog_title: \"Graham Dumpleton\"\n\
---\n\
\n\
Hello\n\
\n\
```\n\
def f(): pass\n\
```\n\
\n\
---\n\
\n\
## Comments\n\
\n\
### Alice - March 7, 2007 9:00 AM\n\
\n\
Nice post\n";
    assert_eq!(doc, expected);
}

#[test]
fn absent_fields_are_omitted_but_comment_count_is_kept() {
    let post = Post {
        content: Some("Body".to_string()),
        ..Post::default()
    };
    assert_eq!(render_index_markdown(&post), "---\ncomments: 0\n---\n\nBody\n");
}

#[test]
fn quotes_in_values_are_escaped() {
    let post = Post {
        title: Some(r#"Say "hi" \o/"#.to_string()),
        content: Some(String::new()),
        ..Post::default()
    };
    let doc = render_index_markdown(&post);
    assert!(doc.contains(r#"title: "Say \"hi\" \\o/""#), "{doc}");
}

#[test]
fn anonymous_comment_without_timestamp() {
    let post = Post {
        content: Some("Body".to_string()),
        comments: vec![Comment::default()],
        ..Post::default()
    };
    let doc = render_index_markdown(&post);
    assert!(doc.ends_with("## Comments\n\n### Anonymous\n"), "{doc}");
}

#[test]
fn missing_body_still_renders_front_matter() {
    let post = Post {
        title: Some("T".to_string()),
        ..Post::default()
    };
    assert_eq!(
        render_index_markdown(&post),
        "---\ntitle: \"T\"\ncomments: 0\n---\n"
    );
}
