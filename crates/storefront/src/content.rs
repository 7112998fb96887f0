//! Editorial content: markdown pages and journal entries.
//!
//! This module loads markdown files from the content directory at startup,
//! parses frontmatter metadata, and renders markdown to HTML.
//!
//! # Image Shortcodes
//!
//! Use the `{{image}}` shortcode to embed gallery photography:
//!
//! ```markdown
//! {{image "journal/hanok-light.webp" alt="Afternoon light in the annex"}}
//! ```
//!
//! This expands to an `<img>` tag pointing into the media tree.

use chrono::NaiveDate;
use comrak::{Options, markdown_to_html};
use gray_matter::{Matter, ParsedEntity, engine::YAML};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, LazyLock};

/// Metadata for static pages (visit, about, terms).
#[derive(Debug, Clone, Deserialize)]
pub struct PageMeta {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub updated_at: Option<NaiveDate>,
}

/// Metadata for journal entries.
#[derive(Debug, Clone, Deserialize)]
pub struct PostMeta {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    pub published_at: NaiveDate,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub draft: bool,
}

/// A rendered page with metadata and HTML content.
#[derive(Debug, Clone)]
pub struct Page {
    pub slug: String,
    pub meta: PageMeta,
    pub content_html: String,
}

/// A rendered journal entry with metadata and HTML content.
#[derive(Debug, Clone)]
pub struct Post {
    pub slug: String,
    pub meta: PostMeta,
    pub content_html: String,
    pub reading_time_minutes: u32,
}

/// Content store that holds all loaded content in memory.
#[derive(Debug, Clone)]
pub struct ContentStore {
    pages: Arc<HashMap<String, Page>>,
    posts: Arc<Vec<Post>>,
}

impl ContentStore {
    /// Load all content from the filesystem.
    ///
    /// # Errors
    ///
    /// Returns an error if the content directory cannot be read.
    pub fn load(content_dir: &Path) -> Result<Self, ContentError> {
        let pages = Self::load_pages(&content_dir.join("pages"))?;
        let posts = Self::load_posts(&content_dir.join("journal"))?;

        Ok(Self {
            pages: Arc::new(pages),
            posts: Arc::new(posts),
        })
    }

    /// Load all pages from the pages directory
    fn load_pages(dir: &Path) -> Result<HashMap<String, Page>, ContentError> {
        let mut pages = HashMap::new();

        if !dir.exists() {
            tracing::warn!("Pages directory does not exist: {:?}", dir);
            return Ok(pages);
        }

        let entries = std::fs::read_dir(dir).map_err(|e| ContentError::Io(e.to_string()))?;

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "md") {
                match Self::load_page(&path) {
                    Ok(page) => {
                        tracing::info!("Loaded page: {}", page.slug);
                        pages.insert(page.slug.clone(), page);
                    }
                    Err(e) => {
                        tracing::error!("Failed to load page {:?}: {}", path, e);
                    }
                }
            }
        }

        Ok(pages)
    }

    /// Load a single page from a markdown file
    fn load_page(path: &Path) -> Result<Page, ContentError> {
        let content = std::fs::read_to_string(path).map_err(|e| ContentError::Io(e.to_string()))?;

        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ContentError::Parse("Invalid filename".to_string()))?
            .to_string();

        let matter = Matter::<YAML>::new();
        let parsed: ParsedEntity<PageMeta> = matter
            .parse(&content)
            .map_err(|e| ContentError::Parse(format!("Failed to parse frontmatter: {e}")))?;
        let meta = parsed
            .data
            .ok_or_else(|| ContentError::Parse("Missing frontmatter".to_string()))?;

        let content_html = render_markdown(&parsed.content);

        Ok(Page {
            slug,
            meta,
            content_html,
        })
    }

    /// Load all journal entries from the journal directory
    fn load_posts(dir: &Path) -> Result<Vec<Post>, ContentError> {
        let mut posts = Vec::new();

        if !dir.exists() {
            tracing::info!("Journal directory does not exist yet: {:?}", dir);
            return Ok(posts);
        }

        let entries = std::fs::read_dir(dir).map_err(|e| ContentError::Io(e.to_string()))?;

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "md") {
                match Self::load_post(&path) {
                    Ok(post) => {
                        tracing::info!("Loaded journal entry: {}", post.slug);
                        posts.push(post);
                    }
                    Err(e) => {
                        tracing::error!("Failed to load journal entry {:?}: {}", path, e);
                    }
                }
            }
        }

        // Sort posts by published date (newest first)
        posts.sort_by(|a, b| b.meta.published_at.cmp(&a.meta.published_at));

        Ok(posts)
    }

    /// Load a single journal entry from a markdown file
    fn load_post(path: &Path) -> Result<Post, ContentError> {
        let content = std::fs::read_to_string(path).map_err(|e| ContentError::Io(e.to_string()))?;

        let filename = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ContentError::Parse("Invalid filename".to_string()))?;

        let slug = strip_date_prefix(filename).to_string();

        let matter = Matter::<YAML>::new();
        let parsed: ParsedEntity<PostMeta> = matter
            .parse(&content)
            .map_err(|e| ContentError::Parse(format!("Failed to parse frontmatter: {e}")))?;
        let meta = parsed
            .data
            .ok_or_else(|| ContentError::Parse("Missing frontmatter".to_string()))?;

        let content_html = render_markdown(&parsed.content);
        let reading_time_minutes = estimate_reading_time(&parsed.content);

        Ok(Post {
            slug,
            meta,
            content_html,
            reading_time_minutes,
        })
    }

    /// Get a page by slug
    #[must_use]
    pub fn get_page(&self, slug: &str) -> Option<&Page> {
        self.pages.get(slug)
    }

    /// Get a journal entry by slug
    #[must_use]
    pub fn get_post(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    /// Get all published journal entries (excludes drafts)
    pub fn get_published_posts(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter().filter(|p| !p.meta.draft)
    }

    /// Get entries by tag
    pub fn get_posts_by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Post> {
        let tag_lower = tag.to_lowercase();
        self.posts.iter().filter(move |p| {
            !p.meta.draft && p.meta.tags.iter().any(|t| t.to_lowercase() == tag_lower)
        })
    }

    /// Get recent published entries, optionally excluding a specific slug
    #[must_use]
    pub fn get_recent_posts(&self, limit: usize, exclude_slug: Option<&str>) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|p| !p.meta.draft && exclude_slug.is_none_or(|s| p.slug != s))
            .take(limit)
            .collect()
    }
}

/// Remove a leading `YYYY-MM-DD-` date prefix from a filename, if present.
fn strip_date_prefix(filename: &str) -> &str {
    if filename.len() > 11 && filename.chars().nth(4) == Some('-') {
        filename.get(11..).unwrap_or(filename)
    } else {
        filename
    }
}

/// Estimate reading time at 200 words per minute, minimum one minute.
fn estimate_reading_time(content: &str) -> u32 {
    let word_count = content.split_whitespace().count();
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let minutes = ((word_count as f32) / 200.0).ceil() as u32;
    minutes.max(1)
}

/// Render markdown to HTML with GitHub Flavored Markdown support.
///
/// This first processes image shortcodes, then renders the markdown.
fn render_markdown(content: &str) -> String {
    // Process shortcodes before markdown rendering
    let processed = process_shortcodes(content);

    let mut options = Options::default();

    // Enable GFM extensions
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.superscript = true;
    options.extension.header_ids = Some(String::new());
    options.extension.footnotes = true;

    // Render options
    options.render.r#unsafe = true; // Allow raw HTML in markdown

    markdown_to_html(&processed, &options)
}

// =============================================================================
// Shortcode Processing
// =============================================================================

/// Regex for matching image shortcodes.
///
/// Matches: `{{image "path" ...attributes}}`
/// Example: `{{image "journal/hanok-light.webp" alt="Afternoon light"}}`
static IMAGE_SHORTCODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\{\{image\s+"([^"]+)"([^}]*)\}\}"#).expect("Invalid regex"));

/// Regex for extracting key="value" attributes.
static ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\w+)="([^"]*)""#).expect("Invalid regex"));

/// Process all shortcodes in the content.
fn process_shortcodes(content: &str) -> String {
    IMAGE_SHORTCODE_RE
        .replace_all(content, |caps: &regex::Captures| {
            let path = &caps[1];
            let attrs_str = caps.get(2).map_or("", |m| m.as_str());

            // Parse attributes
            let mut alt = String::new();
            let mut class = String::new();
            let mut loading = "lazy".to_string();

            for attr_cap in ATTR_RE.captures_iter(attrs_str) {
                let key = &attr_cap[1];
                let value = &attr_cap[2];
                match key {
                    "alt" => alt = value.to_string(),
                    "class" => class = value.to_string(),
                    "loading" => loading = value.to_string(),
                    _ => {}
                }
            }

            render_image_element(path, &alt, &class, &loading)
        })
        .into_owned()
}

/// Render an `<img>` element for a media path.
fn render_image_element(path: &str, alt: &str, class: &str, loading: &str) -> String {
    let class_attr = if class.is_empty() {
        String::new()
    } else {
        format!(r#" class="{class}""#)
    };

    format!(
        r#"<img src="/media/{path}" alt="{alt}"{class_attr} loading="{loading}" decoding="async">"#
    )
}

/// Content loading errors
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_date_prefix() {
        assert_eq!(strip_date_prefix("2026-01-10-winter-light"), "winter-light");
        assert_eq!(strip_date_prefix("winter-light"), "winter-light");
        assert_eq!(strip_date_prefix("short"), "short");
    }

    #[test]
    fn test_estimate_reading_time_minimum_one_minute() {
        assert_eq!(estimate_reading_time("a few words"), 1);
    }

    #[test]
    fn test_estimate_reading_time_rounds_up() {
        let words = vec!["word"; 201].join(" ");
        assert_eq!(estimate_reading_time(&words), 2);
    }

    #[test]
    fn test_image_shortcode_expands() {
        let html = process_shortcodes(
            r#"Before {{image "journal/hanok.webp" alt="Hanok annex" class="wide"}} after"#,
        );
        assert!(html.contains(r#"src="/media/journal/hanok.webp""#));
        assert!(html.contains(r#"alt="Hanok annex""#));
        assert!(html.contains(r#"class="wide""#));
        assert!(html.contains(r#"loading="lazy""#));
    }

    #[test]
    fn test_plain_markdown_is_untouched_by_shortcodes() {
        let input = "# Heading\n\nNo shortcodes here.";
        assert_eq!(process_shortcodes(input), input);
    }

    #[test]
    fn test_render_markdown_gfm_table() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table>"));
    }
}
