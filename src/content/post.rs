//! Post models

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::path::PathBuf;

use super::value::{FieldValue, Metadata};

/// Metadata of one post: the filename-derived slug plus every field the
/// front matter declares
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostMetadata {
    /// Filename without its `.md`/`.mdx` extension
    slug: String,

    /// Front-matter fields, in declaration order
    #[serde(flatten)]
    fields: Metadata,
}

impl PostMetadata {
    /// Build metadata for a post. A `slug` declared in the front matter is
    /// discarded; identity always comes from the filename.
    pub fn new(slug: impl Into<String>, mut fields: Metadata) -> Self {
        let slug = slug.into();
        if let Some(declared) = fields.shift_remove("slug") {
            tracing::debug!(
                "Ignoring front-matter slug {:?} in favour of {:?}",
                declared,
                slug
            );
        }
        Self { slug, fields }
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Front-matter fields, without the slug
    pub fn fields(&self) -> &Metadata {
        &self.fields
    }

    /// Look up a field. `"slug"` resolves to the filename-derived slug.
    pub fn get(&self, key: &str) -> Option<FieldValue> {
        if key == "slug" {
            return Some(FieldValue::String(self.slug.clone()));
        }
        self.fields.get(key).cloned()
    }

    /// Title as written. A date-shaped title still reads as its text.
    pub fn title(&self) -> Option<&str> {
        self.fields.get("title").and_then(FieldValue::as_text)
    }

    pub fn date(&self) -> Option<&DateTime<FixedOffset>> {
        self.fields.get("date").and_then(FieldValue::as_date)
    }

    /// Tags as declared: a single string counts as one tag
    pub fn tags(&self) -> Vec<&str> {
        match self.fields.get("tags") {
            Some(FieldValue::String(tag)) => vec![tag.as_str()],
            Some(FieldValue::List(tags)) => tags.iter().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }
}

/// A single post with its body, as a post page consumes it
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    #[serde(flatten)]
    pub meta: PostMetadata,

    /// Raw markdown after the front-matter block
    pub body: String,

    /// Full source file path
    pub source: PathBuf,
}
