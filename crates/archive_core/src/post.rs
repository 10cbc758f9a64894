use serde::{Deserialize, Serialize};

/// Structured record recovered from one Blogger page.
///
/// Field order is the order of keys in `data.json`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Post {
    pub title: Option<String>,
    /// Markdown body; `None` when the page had no post body element.
    pub content: Option<String>,
    pub date: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub post_id: Option<String>,
    pub blog_id: Option<String>,
    pub comments: Vec<Comment>,
    pub labels: Vec<String>,
    pub metadata: PostMetadata,
    pub downloaded_images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PostMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Comment {
    pub comment_id: Option<String>,
    pub author: Option<String>,
    pub author_url: Option<String>,
    pub author_profile_id: Option<String>,
    pub content: Option<String>,
    pub timestamp: Option<String>,
    pub permalink: Option<String>,
    pub is_blog_author: bool,
}
