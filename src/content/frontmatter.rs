//! Front-matter parsing
//!
//! A post may open with a header block fenced by `---` lines:
//!
//! ```text
//! ---
//! title: Hello World
//! tags: [rust, blog]
//! ---
//! Body starts here.
//! ```
//!
//! The text after the opening fence names the block language (`---json`,
//! `---toml`); YAML is the default.

use std::str::FromStr;

use thiserror::Error;

use super::value::{yaml_key, FieldValue, Metadata};

/// Opening and closing fence of a front-matter block
pub const DELIMITER: &str = "---";

const CLOSE: &str = "\n---";

/// Errors produced while decoding a front-matter block
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("invalid YAML front-matter")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON front-matter")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML front-matter")]
    Toml(#[from] toml::de::Error),

    #[error("front-matter must be a mapping, found {0}")]
    NotAMapping(&'static str),

    #[error("front-matter keys must be scalars")]
    NonScalarKey,

    #[error("unsupported front-matter language `{0}`")]
    UnsupportedLanguage(String),
}

/// Front-matter block language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Yaml,
    Json,
    Toml,
}

impl FromStr for Language {
    type Err = FrontMatterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" | "yaml" | "yml" => Ok(Language::Yaml),
            "json" => Ok(Language::Json),
            "toml" => Ok(Language::Toml),
            _ => Err(FrontMatterError::UnsupportedLanguage(s.to_string())),
        }
    }
}

impl Language {
    /// Decode a block into metadata
    pub fn decode(self, matter: &str) -> Result<Metadata, FrontMatterError> {
        match self {
            Language::Yaml => decode_yaml(matter),
            Language::Json => decode_json(matter),
            Language::Toml => decode_toml(matter),
        }
    }
}

/// A front-matter block split off a document, not yet decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawBlock<'a> {
    /// Language hint after the opening fence, trimmed (may be empty)
    pub language: &'a str,
    /// Text between the fences
    pub matter: &'a str,
    /// Document body after the closing fence
    pub body: &'a str,
}

impl RawBlock<'_> {
    /// True when the block holds nothing but whitespace and `#` comments
    pub fn is_blank(&self) -> bool {
        self.matter.lines().all(|line| {
            let line = line.trim();
            line.is_empty() || line.starts_with('#')
        })
    }
}

/// Locate the front-matter block at the very top of `content`.
///
/// Returns `None` when the document does not open with a fence. A fence
/// that is never closed swallows the rest of the document.
pub fn split(content: &str) -> Option<RawBlock<'_>> {
    let content = strip_bom(content);
    let rest = content.strip_prefix(DELIMITER)?;

    // `----` is a thematic break, not a fence
    if rest.starts_with('-') {
        return None;
    }

    let (language, rest) = match rest.find('\n') {
        Some(pos) => (rest[..pos].trim(), &rest[pos..]),
        None => (rest.trim(), ""),
    };

    let (matter, body) = match rest.find(CLOSE) {
        Some(pos) => {
            let body = &rest[pos + CLOSE.len()..];
            let body = body.strip_prefix('\r').unwrap_or(body);
            let body = body.strip_prefix('\n').unwrap_or(body);
            (&rest[..pos], body)
        }
        None => (rest, ""),
    };

    Some(RawBlock {
        language,
        matter,
        body,
    })
}

/// Parse front-matter from content.
/// Returns (metadata, remaining_content)
pub fn parse(content: &str) -> Result<(Metadata, &str), FrontMatterError> {
    let Some(block) = split(content) else {
        return Ok((Metadata::new(), strip_bom(content)));
    };

    if block.is_blank() {
        return Ok((Metadata::new(), block.body));
    }

    let language: Language = block.language.parse()?;
    let metadata = language.decode(block.matter)?;

    Ok((metadata, block.body))
}

fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}

fn decode_yaml(matter: &str) -> Result<Metadata, FrontMatterError> {
    use serde_yaml::Value;

    match serde_yaml::from_str::<Value>(matter)? {
        Value::Null => Ok(Metadata::new()),
        Value::Mapping(map) => {
            let mut metadata = Metadata::with_capacity(map.len());
            for (key, value) in map {
                let key = yaml_key(&key).ok_or(FrontMatterError::NonScalarKey)?;
                metadata.insert(key, FieldValue::from_yaml(value));
            }
            Ok(metadata)
        }
        Value::Sequence(_) => Err(FrontMatterError::NotAMapping("a list")),
        Value::Tagged(_) => Err(FrontMatterError::NotAMapping("a tagged value")),
        _ => Err(FrontMatterError::NotAMapping("a scalar")),
    }
}

fn decode_json(matter: &str) -> Result<Metadata, FrontMatterError> {
    use serde_json::Value;

    match serde_json::from_str::<Value>(matter)? {
        Value::Null => Ok(Metadata::new()),
        Value::Object(object) => Ok(object
            .into_iter()
            .map(|(key, value)| (key, FieldValue::from_json(value)))
            .collect()),
        Value::Array(_) => Err(FrontMatterError::NotAMapping("a list")),
        _ => Err(FrontMatterError::NotAMapping("a scalar")),
    }
}

fn decode_toml(matter: &str) -> Result<Metadata, FrontMatterError> {
    let table: toml::Table = matter.parse()?;
    Ok(table
        .into_iter()
        .map(|(key, value)| (key, FieldValue::from_toml(value)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15 10:30:00
tags:
  - rust
  - blog
draft: false
---

This is the content.
"#;

        let (fm, remaining) = parse(content).unwrap();
        assert_eq!(fm["title"].as_str(), Some("Hello World"));
        assert_eq!(
            fm["tags"].as_list(),
            Some(&["rust".to_string(), "blog".to_string()][..])
        );
        assert_eq!(fm["draft"].as_bool(), Some(false));
        assert!(fm["date"].as_date().is_some());
        assert_eq!(remaining, "\nThis is the content.\n");
    }

    #[test]
    fn test_keys_keep_declaration_order() {
        let (fm, _) = parse("---\nzeta: 1\nalpha: 2\nmid: 3\n---\n").unwrap();
        let keys: Vec<&str> = fm.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just a heading\n\nBody.";
        let (fm, remaining) = parse(content).unwrap();
        assert!(fm.is_empty());
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_leading_whitespace_is_not_frontmatter() {
        let content = "\n---\ntitle: Nope\n---\n";
        let (fm, remaining) = parse(content).unwrap();
        assert!(fm.is_empty());
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_thematic_break_is_not_frontmatter() {
        let content = "----\ntitle: Nope\n----\n";
        let (fm, _) = parse(content).unwrap();
        assert!(fm.is_empty());
    }

    #[test]
    fn test_byte_order_mark_is_skipped() {
        let (fm, remaining) = parse("\u{feff}---\ntitle: Bom\n---\nBody").unwrap();
        assert_eq!(fm["title"].as_str(), Some("Bom"));
        assert_eq!(remaining, "Body");
    }

    #[test]
    fn test_empty_block() {
        let (fm, remaining) = parse("---\n---\nBody").unwrap();
        assert!(fm.is_empty());
        assert_eq!(remaining, "Body");
    }

    #[test]
    fn test_comment_only_block() {
        let (fm, remaining) = parse("---\n# draft notes\n---\nBody").unwrap();
        assert!(fm.is_empty());
        assert_eq!(remaining, "Body");
    }

    #[test]
    fn test_unclosed_block_takes_whole_document() {
        let (fm, remaining) = parse("---\ntitle: Open\n").unwrap();
        assert_eq!(fm["title"].as_str(), Some("Open"));
        assert_eq!(remaining, "");
    }

    #[test]
    fn test_crlf_line_endings() {
        let (fm, remaining) = parse("---\r\ntitle: Windows\r\n---\r\nBody\r\n").unwrap();
        assert_eq!(fm["title"].as_str(), Some("Windows"));
        assert_eq!(remaining, "Body\r\n");
    }

    #[test]
    fn test_json_language() {
        let content = "---json\n{\"title\": \"Json Post\", \"tags\": [\"a\", \"b\"]}\n---\nBody";
        let (fm, remaining) = parse(content).unwrap();
        assert_eq!(fm["title"].as_str(), Some("Json Post"));
        assert_eq!(fm["tags"].as_list().map(<[String]>::len), Some(2));
        assert_eq!(remaining, "Body");
    }

    #[test]
    fn test_toml_language() {
        let content = "--- toml\ntitle = \"Toml Post\"\ndate = 2024-01-15\n---\nBody";
        let (fm, _) = parse(content).unwrap();
        assert_eq!(fm["title"].as_str(), Some("Toml Post"));
        assert!(fm["date"].as_date().is_some());
    }

    #[test]
    fn test_toml_keys_keep_declaration_order() {
        let (fm, _) = parse("---toml\nzeta = 1\nalpha = 2\nmid = 3\n---\n").unwrap();
        let keys: Vec<&str> = fm.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_unsupported_language() {
        let err = parse("---coffee\ntitle: x\n---\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::UnsupportedLanguage(lang) if lang == "coffee"));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = parse("---\ntitle: [unclosed\n---\nBody").unwrap_err();
        assert!(matches!(err, FrontMatterError::Yaml(_)));
    }

    #[test]
    fn test_scalar_block_is_rejected() {
        let err = parse("---\njust a sentence\n---\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::NotAMapping(_)));
    }

    #[test]
    fn test_list_block_is_rejected() {
        let err = parse("---\n- a\n- b\n---\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::NotAMapping("a list")));
    }

    #[test]
    fn test_split_reports_language_and_matter() {
        let block = split("---yaml\na: 1\n---\nrest").unwrap();
        assert_eq!(block.language, "yaml");
        assert_eq!(block.matter, "\na: 1");
        assert_eq!(block.body, "rest");
        assert!(!block.is_blank());
    }
}
