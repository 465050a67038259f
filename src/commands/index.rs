//! Dump the post index as JSON

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::Blog;

/// Serialize the index, to `output` when given or stdout otherwise
pub fn run(blog: &Blog, output: Option<&Path>, pretty: bool) -> Result<()> {
    let json = to_json(blog, pretty)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, json + "\n")?;
            tracing::info!("Wrote index to {:?}", path);
        }
        None => println!("{}", json),
    }

    Ok(())
}

/// The index as a JSON array, one object per post
pub fn to_json(blog: &Blog, pretty: bool) -> Result<String> {
    let index = blog.index()?;
    let json = if pretty {
        serde_json::to_string_pretty(&index)?
    } else {
        serde_json::to_string(&index)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_index_json() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("posts")).unwrap();
        fs::write(
            dir.path().join("posts/hello.md"),
            "---\ntitle: Hello\nslug: nope\ndate: 2024-01-15\ntags: [a]\n---\nBody",
        )
        .unwrap();

        let blog = Blog::new(dir.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&to_json(&blog, false).unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "slug": "hello",
                "title": "Hello",
                "date": "2024-01-15T00:00:00Z",
                "tags": ["a"]
            }])
        );
    }

    #[test]
    fn test_index_written_to_file() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("posts")).unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        let output = dir.path().join("out/index.json");
        run(&blog, Some(&output), true).unwrap();
        assert_eq!(fs::read_to_string(output).unwrap(), "[]\n");
    }
}
