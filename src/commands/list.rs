//! List site content

use anyhow::Result;
use std::fmt::Write;

use crate::helpers::{format_title, post_date};
use crate::Blog;

/// List site content by type
pub fn run(blog: &Blog, content_type: &str) -> Result<()> {
    print!("{}", render(blog, content_type)?);
    Ok(())
}

/// Render the listing for a content type
pub fn render(blog: &Blog, content_type: &str) -> Result<String> {
    let mut out = String::new();

    match content_type {
        "post" | "posts" => {
            let index = blog.index()?;
            writeln!(out, "Posts ({}):", index.len())?;
            for post in &index {
                writeln!(
                    out,
                    "  {:<10} - {} [{}]",
                    post_date(post, &blog.config.date_format),
                    post.title().unwrap_or("(untitled)"),
                    post.slug()
                )?;
            }
        }
        "file" | "files" => {
            let files = blog.post_file_names()?;
            writeln!(out, "Files ({}):", files.len())?;
            for file in files {
                writeln!(out, "  {}", file)?;
            }
        }
        "tag" | "tags" => {
            let index = blog.index()?;
            let mut tags: Vec<_> = index.tags().into_iter().collect();
            tags.sort_by(|a, b| b.1.cmp(&a.1));
            writeln!(out, "Tags ({}):", tags.len())?;
            for (tag, count) in tags {
                writeln!(out, "  {} ({})", format_title(tag), count)?;
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, file, tag",
                content_type
            );
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn blog_with_posts() -> (TempDir, Blog) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("_config.yml"), "order: filename\n").unwrap();
        fs::create_dir(dir.path().join("posts")).unwrap();
        fs::write(
            dir.path().join("posts/intro.md"),
            "---\ntitle: Intro\ndate: 2024-01-15\ntags: [javascript, rust]\n---\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("posts/later.mdx"),
            "---\ntitle: Later\ntags: rust\n---\n",
        )
        .unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        (dir, blog)
    }

    #[test]
    fn test_list_posts() {
        let (_dir, blog) = blog_with_posts();
        let out = render(&blog, "post").unwrap();
        assert!(out.starts_with("Posts (2):"));
        assert!(out.contains("2024-01-15 - Intro [intro]"));
        assert!(out.contains("- Later [later]"));
    }

    #[test]
    fn test_list_files() {
        let (_dir, blog) = blog_with_posts();
        let out = render(&blog, "files").unwrap();
        assert_eq!(out, "Files (2):\n  intro.md\n  later.mdx\n");
    }

    #[test]
    fn test_list_tags_uses_display_titles() {
        let (_dir, blog) = blog_with_posts();
        let out = render(&blog, "tags").unwrap();
        assert_eq!(out, "Tags (2):\n  Rust (2)\n  JavaScript (1)\n");
    }

    #[test]
    fn test_unknown_type() {
        let (_dir, blog) = blog_with_posts();
        assert!(render(&blog, "pages").is_err());
    }
}
