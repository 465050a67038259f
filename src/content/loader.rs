//! Post index - scans the posts directory and collects front-matter metadata

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use super::frontmatter::{self, FrontMatterError};
use super::{Post, PostMetadata};
use crate::config::IndexOrder;

lazy_static! {
    /// Case-sensitive: `post.MD` is not a post
    static ref POST_FILE: Regex = Regex::new(r"\.mdx?$").unwrap();
}

/// Errors that abort an index build
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("failed to read `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse front-matter in `{}`", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },
}

impl IndexError {
    /// The file or directory the error is about
    pub fn path(&self) -> &Path {
        match self {
            IndexError::Io { path, .. } | IndexError::Parse { path, .. } => path,
        }
    }
}

/// Check if a file name is a post (`.md` or `.mdx`)
pub fn is_post_file(name: &str) -> bool {
    POST_FILE.is_match(name)
}

/// Slug for a post file: the name with its `.md`/`.mdx` extension removed
pub fn slug_from_file_name(name: &str) -> String {
    POST_FILE.replace(name, "").into_owned()
}

/// Names of the post files in `dir`, in listing order
pub fn post_file_names(dir: &Path) -> Result<Vec<String>, IndexError> {
    post_file_names_ordered(dir, IndexOrder::Listing)
}

pub fn post_file_names_ordered(dir: &Path, order: IndexOrder) -> Result<Vec<String>, IndexError> {
    Ok(matched_entries(dir, order)?
        .into_iter()
        .map(|(name, _)| name)
        .collect())
}

/// Build the metadata list for every post in `dir`, in listing order.
///
/// One malformed file fails the whole build.
pub fn build_index(dir: &Path) -> Result<Vec<PostMetadata>, IndexError> {
    build_index_ordered(dir, IndexOrder::Listing)
}

pub fn build_index_ordered(
    dir: &Path,
    order: IndexOrder,
) -> Result<Vec<PostMetadata>, IndexError> {
    let entries = matched_entries(dir, order)?;
    let mut posts = Vec::with_capacity(entries.len());

    for (name, path) in entries {
        let post = read_post(&path, &name)?;
        posts.push(post.meta);
    }

    tracing::info!("Indexed {} posts from {:?}", posts.len(), dir);
    Ok(posts)
}

/// Load a single post, body included, by slug. `<slug>.md` wins over
/// `<slug>.mdx` when both exist.
pub fn load_post(dir: &Path, slug: &str) -> Result<Post, IndexError> {
    for ext in ["md", "mdx"] {
        let name = format!("{}.{}", slug, ext);
        let path = dir.join(&name);
        if path.is_file() {
            return read_post(&path, &name);
        }
    }

    Err(IndexError::Io {
        path: dir.join(format!("{}.md", slug)),
        source: io::Error::new(
            io::ErrorKind::NotFound,
            format!("no post with slug `{}`", slug),
        ),
    })
}

fn read_post(path: &Path, name: &str) -> Result<Post, IndexError> {
    tracing::debug!("Reading post {:?}", path);

    let bytes = fs::read(path).map_err(|source| IndexError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    // Invalid UTF-8 is replaced, not rejected
    let content = String::from_utf8_lossy(&bytes);
    let (fields, body) = frontmatter::parse(&content).map_err(|source| IndexError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(Post {
        meta: PostMetadata::new(slug_from_file_name(name), fields),
        body: body.to_string(),
        source: path.to_path_buf(),
    })
}

/// Direct children of `dir` whose names look like posts. Entries are not
/// filtered by type: a directory named `foo.md` fails later, on read.
fn matched_entries(dir: &Path, order: IndexOrder) -> Result<Vec<(String, PathBuf)>, IndexError> {
    let metadata = fs::metadata(dir).map_err(|source| IndexError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(IndexError::Io {
            path: dir.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
        });
    }

    let mut walker = WalkDir::new(dir).min_depth(1).max_depth(1);
    if order == IndexOrder::Filename {
        walker = walker.sort_by_file_name();
    }

    let mut entries = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| walk_error(dir, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_post_file(&name) {
            entries.push((name, entry.into_path()));
        } else {
            tracing::debug!("Skipping {:?}", entry.path());
        }
    }

    Ok(entries)
}

fn walk_error(dir: &Path, err: walkdir::Error) -> IndexError {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| dir.to_path_buf());
    let message = err.to_string();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, message));
    IndexError::Io { path, source }
}

/// The post index: built once at start, read-only afterwards
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PostIndex {
    posts: Vec<PostMetadata>,
}

impl PostIndex {
    /// Scan `dir` and build the index
    pub fn load(dir: &Path, order: IndexOrder) -> Result<Self, IndexError> {
        let index = Self::from_posts(build_index_ordered(dir, order)?);

        for slug in index.duplicate_slugs() {
            tracing::warn!("Slug {:?} is used by more than one post", slug);
        }

        Ok(index)
    }

    pub fn from_posts(posts: Vec<PostMetadata>) -> Self {
        Self { posts }
    }

    pub fn posts(&self) -> &[PostMetadata] {
        &self.posts
    }

    pub fn into_posts(self) -> Vec<PostMetadata> {
        self.posts
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PostMetadata> {
        self.posts.iter()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// First post with the given slug
    pub fn get(&self, slug: &str) -> Option<&PostMetadata> {
        self.posts.iter().find(|p| p.slug() == slug)
    }

    /// Slugs that appear more than once, each reported once
    pub fn duplicate_slugs(&self) -> Vec<&str> {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for post in &self.posts {
            *counts.entry(post.slug()).or_insert(0) += 1;
        }
        counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(slug, _)| slug)
            .collect()
    }

    /// Tag usage counts, in first-seen order
    pub fn tags(&self) -> IndexMap<&str, usize> {
        let mut tags: IndexMap<&str, usize> = IndexMap::new();
        for post in &self.posts {
            for tag in post.tags() {
                *tags.entry(tag).or_insert(0) += 1;
            }
        }
        tags
    }
}

impl<'a> IntoIterator for &'a PostIndex {
    type Item = &'a PostMetadata;
    type IntoIter = std::slice::Iter<'a, PostMetadata>;

    fn into_iter(self) -> Self::IntoIter {
        self.posts.iter()
    }
}
