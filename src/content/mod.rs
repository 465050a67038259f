//! Content module - posts, front-matter and the post index

pub mod frontmatter;
pub mod loader;
mod markdown;
mod post;
mod value;

pub use frontmatter::FrontMatterError;
pub use loader::{build_index, load_post, post_file_names, IndexError, PostIndex};
pub use markdown::MarkdownRenderer;
pub use post::{Post, PostMetadata};
pub use value::{parse_timestamp, FieldValue, Metadata, Timestamp};
