//! Title helpers

/// Upper-case the first character of `word`
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Format a tag or category name for display.
///
/// # Examples
/// ```ignore
/// format_title("rust")       // -> "Rust"
/// format_title("javascript") // -> "JavaScript"
/// ```
pub fn format_title(title: &str) -> String {
    if title == "javascript" {
        return "JavaScript".to_string();
    }
    capitalize(title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_title() {
        assert_eq!(format_title("javascript"), "JavaScript");
        assert_eq!(format_title("rust"), "Rust");
        assert_eq!(format_title(""), "");
    }

    #[test]
    fn test_javascript_match_is_exact() {
        assert_eq!(format_title("Javascript"), "Javascript");
        assert_eq!(format_title("javascripts"), "Javascripts");
        assert_eq!(format_title("typescript"), "Typescript");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("hello world"), "Hello world");
        assert_eq!(capitalize("Already"), "Already");
        assert_eq!(capitalize("élan"), "Élan");
        assert_eq!(capitalize("1st"), "1st");
    }
}
