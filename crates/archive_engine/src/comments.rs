use archive_core::Comment;
use scraper::{ElementRef, Html};

use crate::convert::MarkdownConverter;
use crate::dom::{attr, has_class, is_tag, normalized_text, select_all, select_first};

const PROFILE_MARKER: &str = "/profile/";
const PLACEHOLDER_AUTHOR: &str = "said...";

/// Parse the Blogger comments list (`#comments dl#comments-block`).
///
/// Each `dt.comment-author` row yields one comment; its body and footer are
/// the `dd.comment-body` and `dd.comment-footer` siblings that follow it
/// before the next row. Threaded replies come out flattened in document order.
pub fn parse_comments(document: &Html, converter: &MarkdownConverter) -> Vec<Comment> {
    let Some(block) = select_first(document.root_element(), "#comments dl#comments-block") else {
        return Vec::new();
    };

    select_all(block, "dt.comment-author")
        .into_iter()
        .map(|row| parse_row(row, converter))
        .collect()
}

fn parse_row(row: ElementRef<'_>, converter: &MarkdownConverter) -> Comment {
    let mut comment = Comment {
        comment_id: attr(row, "id").map(|id| id.strip_prefix('c').unwrap_or(&id).to_string()),
        is_blog_author: has_class(row, "blog-author"),
        ..Comment::default()
    };

    if let Some((author, href)) = author_link(row) {
        comment.author_profile_id = href
            .rsplit_once(PROFILE_MARKER)
            .map(|(_, id)| id.to_string());
        comment.author = Some(author);
        comment.author_url = Some(href);
    }

    if let Some(body) = following_sibling(row, "comment-body") {
        comment.content = Some(converter.convert_element(body));
    }

    if let Some(link) = following_sibling(row, "comment-footer")
        .and_then(|footer| select_first(footer, "span.comment-timestamp a"))
    {
        comment.permalink = attr(link, "href");
        comment.timestamp = normalized_text(link);
    }

    comment
}

/// The first `rel=nofollow` profile link with a real name as its text.
fn author_link(row: ElementRef<'_>) -> Option<(String, String)> {
    select_all(row, "a[rel~=nofollow]")
        .into_iter()
        .find_map(|link| {
            let href = link.value().attr("href")?;
            if !href.contains(PROFILE_MARKER) {
                return None;
            }
            let text = normalized_text(link).filter(|text| text != PLACEHOLDER_AUTHOR)?;
            Some((text, href.to_string()))
        })
}

/// Nearest following `dd` sibling with `class`, stopping at the next row.
fn following_sibling<'a>(row: ElementRef<'a>, class: &str) -> Option<ElementRef<'a>> {
    row.next_siblings()
        .filter_map(ElementRef::wrap)
        .take_while(|sibling| !is_tag(*sibling, "dt"))
        .find(|sibling| is_tag(*sibling, "dd") && has_class(*sibling, class))
}
