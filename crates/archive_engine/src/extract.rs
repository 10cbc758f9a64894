use std::path::Path;
use std::sync::LazyLock;

use archive_core::{Comment, Post, PostMetadata};
use archive_logging::{archive_debug, archive_warn};
use regex::Regex;
use scraper::{ElementRef, Html};

use crate::comments::parse_comments;
use crate::convert::{convert_body, MarkdownConverter};
use crate::dom::{attr, heading_selector, normalized_text, select_all, select_first};
use crate::images::{ImageRelocation, ImageRelocator};
use crate::Fetcher;

static POST_BODY_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"post-body-\d+").expect("POST_BODY_ID regex"));

const LABEL_HREF: &str = "/search/label/";
const CODE_TAGS: &[&str] = &["pre", "code", "tt", "kbd", "samp"];

/// Everything read from a page before any image is downloaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPage {
    pub title: Option<String>,
    pub date: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub post_id: Option<String>,
    pub blog_id: Option<String>,
    pub labels: Vec<String>,
    pub metadata: PostMetadata,
    pub comments: Vec<Comment>,
    /// Inner HTML of the post body element.
    pub body_html: Option<String>,
    /// `src` of every body image, in document order.
    pub image_sources: Vec<String>,
}

impl PostPage {
    /// Finish the record: convert the body through the image rewrites.
    pub fn into_post(self, relocation: ImageRelocation) -> Post {
        let content = self
            .body_html
            .as_deref()
            .map(|html| convert_body(html, &relocation.rewrites));
        Post {
            title: self.title,
            content,
            date: self.date,
            author: self.author,
            url: self.url,
            post_id: self.post_id,
            blog_id: self.blog_id,
            comments: self.comments,
            labels: self.labels,
            metadata: self.metadata,
            downloaded_images: relocation.downloaded,
        }
    }
}

/// Apply the Blogger template selection contract to a whole page.
///
/// Missing hooks leave their field unset.
pub fn select_post(html: &str) -> PostPage {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let first_text = |css: &str, hook: &str| {
        let found = select_first(root, css).and_then(normalized_text);
        if found.is_none() {
            archive_debug!("extract_selector_missing: {hook}");
        }
        found
    };
    let first_attr = |css: &str, name: &str| select_first(root, css).and_then(|el| attr(el, name));

    let body = find_body(root);
    if body.is_none() {
        archive_warn!("extract_selector_missing: post body");
    }

    PostPage {
        title: first_text(&heading_selector(&["post-title", "entry-title"]), "title"),
        date: first_text(&heading_selector(&["date-header"]), "date"),
        author: first_text(".fn", "author"),
        url: first_attr("link[rel~=canonical]", "href"),
        post_id: first_attr("meta[itemprop=postId]", "content").filter(|id| is_digits(id)),
        blog_id: first_attr("meta[itemprop=blogId]", "content").filter(|id| is_digits(id)),
        labels: labels(root),
        metadata: PostMetadata {
            published_timestamp: first_attr(".published", "title"),
            blog_title: first_text("h1.title", "blog title"),
            page_title: first_text("title", "page title"),
            og_title: first_attr("meta[property=\"og:title\"]", "content"),
            og_description: first_attr("meta[property=\"og:description\"]", "content"),
            og_url: first_attr("meta[property=\"og:url\"]", "content"),
        },
        comments: parse_comments(&document, &MarkdownConverter::default()),
        body_html: body.map(|body| body.inner_html()),
        image_sources: body.map(image_sources).unwrap_or_default(),
    }
}

fn find_body(root: ElementRef<'_>) -> Option<ElementRef<'_>> {
    select_all(root, "[id]").into_iter().find(|el| {
        el.value()
            .attr("id")
            .is_some_and(|id| POST_BODY_ID.is_match(id))
    })
}

fn labels(root: ElementRef<'_>) -> Vec<String> {
    let Some(footer) = select_first(root, ".post-footer-line.post-footer-line-2") else {
        return Vec::new();
    };
    select_all(footer, "a[href]")
        .into_iter()
        .filter(|link| {
            link.value()
                .attr("href")
                .is_some_and(|href| href.contains(LABEL_HREF))
        })
        .filter_map(normalized_text)
        .collect()
}

/// Images inside code are dropped by the converter, so they are not fetched.
fn image_sources(body: ElementRef<'_>) -> Vec<String> {
    select_all(body, "img")
        .into_iter()
        .filter(|img| !inside_code(*img))
        .filter_map(|img| img.value().attr("src"))
        .map(str::trim)
        .filter(|src| !src.is_empty())
        .map(str::to_string)
        .collect()
}

fn inside_code(element: ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| {
            CODE_TAGS
                .iter()
                .any(|tag| ancestor.value().name().eq_ignore_ascii_case(tag))
        })
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Builds a [`Post`] from a page, downloading its images into the post directory.
pub struct PostExtractor<'a> {
    fetcher: &'a dyn Fetcher,
    overwrite_images: bool,
}

impl<'a> PostExtractor<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, overwrite_images: bool) -> Self {
        Self {
            fetcher,
            overwrite_images,
        }
    }

    pub async fn extract(&self, html: &str, output_dir: &Path) -> Post {
        let page = select_post(html);
        let relocation = if page.body_html.is_some() {
            ImageRelocator::new(self.fetcher, output_dir, self.overwrite_images)
                .with_base_url(page.url.as_deref())
                .relocate(&page.image_sources)
                .await
        } else {
            ImageRelocation::default()
        };
        page.into_post(relocation)
    }
}
