//! Create a new post

use anyhow::Result;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use crate::Blog;

/// Create a new post in the posts directory
pub fn create_post(blog: &Blog, title: &str, path: Option<&str>) -> Result<PathBuf> {
    let now = chrono::Local::now();

    fs::create_dir_all(&blog.posts_dir)?;

    // Generate filename
    let filename = if let Some(p) = path {
        if p.contains(['/', '\\']) || p == "." || p == ".." {
            anyhow::bail!("Post path must be a plain file name: {:?}", p);
        }
        if crate::content::loader::is_post_file(p) {
            p.to_string()
        } else {
            format!("{}.mdx", p)
        }
    } else {
        let slug = slug::slugify(title);
        if slug.is_empty() {
            anyhow::bail!("Cannot derive a file name from title {:?}", title);
        }

        blog.config
            .new_post_name
            .replace(":title", &slug)
            .replace(":year", &now.format("%Y").to_string())
            .replace(":month", &now.format("%m").to_string())
            .replace(":day", &now.format("%d").to_string())
    };

    let file_path = blog.posts_dir.join(&filename);

    let content = format!(
        "---\ntitle: {}\ndate: {}\n---\n",
        serde_json::to_string(title)?,
        now.format("%Y-%m-%d")
    );

    let mut file = match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&file_path)
    {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            anyhow::bail!("File already exists: {:?}", file_path);
        }
        Err(e) => return Err(e.into()),
    };
    file.write_all(content.as_bytes())?;

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::load_post;
    use tempfile::TempDir;

    #[test]
    fn test_create_post_round_trips_through_index() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        let path = create_post(&blog, "Hello: A \"Quoted\" World", None).unwrap();
        assert_eq!(path, blog.posts_dir.join("hello-a-quoted-world.mdx"));

        let post = load_post(&blog.posts_dir, "hello-a-quoted-world").unwrap();
        assert_eq!(post.meta.title(), Some("Hello: A \"Quoted\" World"));
        assert!(post.meta.date().is_some());
    }

    #[test]
    fn test_create_post_with_explicit_path() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        let path = create_post(&blog, "Anything", Some("custom.md")).unwrap();
        assert_eq!(path, blog.posts_dir.join("custom.md"));

        let path = create_post(&blog, "Anything", Some("other")).unwrap();
        assert_eq!(path, blog.posts_dir.join("other.mdx"));
    }

    #[test]
    fn test_create_post_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        let path = create_post(&blog, "Twice", None).unwrap();
        fs::write(&path, "hand edited").unwrap();

        let err = create_post(&blog, "Twice", None).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "hand edited");
    }

    #[test]
    fn test_create_post_rejects_paths_outside_posts_dir() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        for path in ["../escape.md", "nested/post.md", "..\\escape.md", ".."] {
            assert!(create_post(&blog, "Anything", Some(path)).is_err(), "{}", path);
        }
        assert!(!dir.path().join("escape.md").exists());
    }
}
