#![allow(dead_code)]

use std::path::Path;
use std::time::Duration;

use archive_engine::{ArchiveConfig, Archiver};

/// A Blogger "Minima"-style post page around `body`.
pub fn blogger_page(canonical: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><head>
<title>Test Blog: Resistance is futile</title>
<link rel="canonical" href="{canonical}">
<meta property="og:title" content="Resistance is futile">
<meta property="og:url" content="{canonical}">
</head><body>
<h1 class="title">Test Blog</h1>
<h2 class="date-header"><span>Tuesday, March 6, 2007</span></h2>
<div class="post hentry">
<meta itemprop="blogId" content="222">
<meta itemprop="postId" content="111">
<h3 class="post-title entry-title">
  Resistance is futile
</h3>
<div class="post-body entry-content" id="post-body-111">{body}</div>
<div class="post-footer">
<div class="post-footer-line post-footer-line-1">
<span class="post-author vcard">Posted by <span class="fn">Lars</span></span>
<abbr class="published" title="2007-03-06T10:00:00+01:00">10:00 AM</abbr>
</div>
<div class="post-footer-line post-footer-line-2">Labels:
<a href="http://example/search/label/rust" rel="tag">rust</a>,
<a href="http://example/search/label/borg" rel="tag">borg</a>
</div>
</div>
</div>
<div id="comments">
<dl id="comments-block">
<dt class="comment-author blog-author" id="c100">
<a name="c100"></a>
<a href="http://www.blogger.com/profile/12345" rel="nofollow">Alice</a> said...
</dt>
<dd class="comment-body"><p>Nice post</p></dd>
<dd class="comment-footer">
<span class="comment-timestamp"><a href="http://example/2007/03/x.html?showComment=1#c100" title="comment permalink">March 7, 2007 9:00 AM</a></span>
</dd>
</dl>
</div>
</body></html>"#
    )
}

pub fn quiet_config(root: &Path) -> ArchiveConfig {
    ArchiveConfig {
        politeness_delay: Duration::ZERO,
        ..ArchiveConfig::for_project(root)
    }
}

pub fn archiver(root: &Path) -> Archiver {
    Archiver::with_reqwest(quiet_config(root)).unwrap()
}
