use crate::config::ChangeUrl;

impl ChangeUrl {
    /// Rewrite a URL with this profile's replacements, then its prefix
    ///
    /// Replacements run one after another over the running result, so a
    /// later pair sees the output of an earlier one. A pair with an empty
    /// `from` or `to` is ignored.
    pub fn apply(&self, original: &str) -> String {
        let mut url = original.to_string();

        for replacement in &self.transform_original_url {
            let (Some(from), Some(to)) = (
                replacement.from.as_deref().filter(|s| !s.is_empty()),
                replacement.to.as_deref().filter(|s| !s.is_empty()),
            ) else {
                continue;
            };
            url = url.replace(from, to);
        }

        match self.prefix.as_deref() {
            Some(prefix) if !prefix.is_empty() => format!("{}{}", prefix, url),
            _ => url,
        }
    }
}

/// Apply an optional rewrite to the original URL
pub fn transform(change_url: Option<&ChangeUrl>, original: &str) -> String {
    match change_url {
        Some(change_url) => change_url.apply(original),
        None => original.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Replacement;

    #[test]
    fn test_no_rewrite_returns_original() {
        assert_eq!(
            transform(None, "https://example.com/a"),
            "https://example.com/a"
        );
    }

    #[test]
    fn test_replacements_are_sequential() {
        let change = ChangeUrl {
            transform_original_url: vec![Replacement::new("a", "b"), Replacement::new("b", "c")],
            prefix: Some("https://x/".to_string()),
        };

        assert_eq!(transform(Some(&change), "aaa"), "https://x/ccc");
    }

    #[test]
    fn test_replacement_hits_every_occurrence() {
        let change = ChangeUrl {
            transform_original_url: vec![Replacement::new("http://", "https://")],
            prefix: None,
        };

        assert_eq!(
            change.apply("http://a/?next=http://b"),
            "https://a/?next=https://b"
        );
    }

    #[test]
    fn test_empty_pairs_are_skipped() {
        let change = ChangeUrl {
            transform_original_url: vec![
                Replacement::new("", "x"),
                Replacement::new("example", ""),
                Replacement {
                    from: Some("com".to_string()),
                    to: None,
                },
            ],
            prefix: Some(String::new()),
        };

        assert_eq!(change.apply("https://example.com/"), "https://example.com/");
    }

    #[test]
    fn test_prefix_only() {
        let change = ChangeUrl {
            transform_original_url: Vec::new(),
            prefix: Some("ext+container:name=Work&url=".to_string()),
        };

        assert_eq!(
            change.apply("https://example.com/"),
            "ext+container:name=Work&url=https://example.com/"
        );
    }
}
