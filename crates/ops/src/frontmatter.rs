// SPDX-FileCopyrightText: 2026 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Parsing of legacy content documents: a YAML frontmatter block between
//! `---` fences, followed by a Markdown body.

use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("document does not start with a frontmatter block")]
    Missing,
    #[error("frontmatter block is not terminated")]
    Unterminated,
    #[error("invalid frontmatter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Split a document into its typed frontmatter and the remaining body.
pub fn parse<T: DeserializeOwned>(input: &str) -> Result<(T, String), FrontmatterError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let rest = input
        .strip_prefix("---\r\n")
        .or_else(|| input.strip_prefix("---\n"))
        .ok_or(FrontmatterError::Missing)?;

    let end = rest.find("\n---").ok_or(FrontmatterError::Unterminated)?;
    let front = &rest[..end + 1];
    let mut body = &rest[end + 4..];
    body = body
        .strip_prefix("\r\n")
        .or_else(|| body.strip_prefix('\n'))
        .unwrap_or(body);

    Ok((serde_yaml::from_str(front)?, body.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Front {
        title: String,
        #[serde(default)]
        order: i32,
    }

    #[test]
    fn test_parse_splits_frontmatter_and_body() {
        let doc = "---\ntitle: Hack Night\norder: 2\n---\nCome and build things.\n";
        let (front, body) = parse::<Front>(doc).unwrap();
        assert_eq!(front.title, "Hack Night");
        assert_eq!(front.order, 2);
        assert_eq!(body, "Come and build things.\n");
    }

    #[test]
    fn test_missing_fields_use_serde_defaults() {
        let doc = "---\ntitle: Hack Night\n---\n";
        let (front, body) = parse::<Front>(doc).unwrap();
        assert_eq!(front.order, 0);
        assert!(body.is_empty());
    }

    #[test]
    fn test_document_without_frontmatter_is_rejected() {
        assert!(matches!(
            parse::<Front>("just a body"),
            Err(FrontmatterError::Missing)
        ));
    }

    #[test]
    fn test_unterminated_frontmatter_is_rejected() {
        assert!(matches!(
            parse::<Front>("---\ntitle: Hack Night\n"),
            Err(FrontmatterError::Unterminated)
        ));
    }

    #[test]
    fn test_invalid_yaml_is_rejected() {
        assert!(matches!(
            parse::<Front>("---\n: [\n---\n"),
            Err(FrontmatterError::Yaml(_))
        ));
    }
}
