//! mdx-blog: the content layer of a Markdown/MDX blog
//!
//! Posts live as `.md`/`.mdx` files in a single directory. At start the
//! directory is scanned once, every file's front matter is decoded, and the
//! resulting [`content::PostIndex`] is handed by reference to whatever
//! renders listing and post pages.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::{IndexError, Post, PostIndex};

/// The main blog application
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Posts directory
    pub posts_dir: PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let posts_dir = base_dir.join(&config.posts_dir);

        Ok(Self {
            config,
            base_dir,
            posts_dir,
        })
    }

    /// Scan the posts directory and build the index
    pub fn index(&self) -> Result<PostIndex, IndexError> {
        PostIndex::load(&self.posts_dir, self.config.order)
    }

    /// Names of the post files, before any parsing
    pub fn post_file_names(&self) -> Result<Vec<String>, IndexError> {
        content::loader::post_file_names_ordered(&self.posts_dir, self.config.order)
    }

    /// Load a single post with its body
    pub fn load_post(&self, slug: &str) -> Result<Post, IndexError> {
        content::load_post(&self.posts_dir, slug)
    }

    /// Create a new post, returning its path
    pub fn new_post(&self, title: &str, path: Option<&str>) -> Result<PathBuf> {
        commands::new::create_post(self, title, path)
    }
}
