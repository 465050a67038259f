//! Show a single post

use anyhow::Result;
use std::fmt::Write;

use crate::content::MarkdownRenderer;
use crate::Blog;

/// Print a post's metadata followed by its body
pub fn run(blog: &Blog, slug: &str, html: bool) -> Result<()> {
    print!("{}", render(blog, slug, html)?);
    Ok(())
}

pub fn render(blog: &Blog, slug: &str, html: bool) -> Result<String> {
    let post = blog.load_post(slug)?;
    let mut out = String::new();

    writeln!(out, "slug: {}", post.meta.slug())?;
    for (key, value) in post.meta.fields() {
        writeln!(out, "{}: {}", key, serde_json::to_string(value)?)?;
    }
    writeln!(out)?;

    if html {
        out.push_str(&MarkdownRenderer::new().render(&post.body));
    } else {
        out.push_str(&post.body);
    }

    Ok(out)
}
