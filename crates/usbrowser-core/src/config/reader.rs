use super::types::{OrderedMap, ProfileEntry};
use crate::{Error, Result};
use std::io::ErrorKind;
use std::path::Path;

/// One parsed configuration source
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigDocument {
    pub profiles: OrderedMap<ProfileEntry>,
}

impl ConfigDocument {
    /// Parse a YAML document; `origin` only appears in error messages
    pub fn from_slice(bytes: &[u8], origin: &str) -> Result<Self> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            tracing::debug!("Config from {} is empty", origin);
            return Ok(Self::default());
        }

        let raw: Option<OrderedMap<Option<ProfileEntry>>> = serde_yaml_ng::from_slice(bytes)
            .map_err(|source| Error::ConfigParse {
                origin: origin.to_string(),
                source,
            })?;

        let profiles = raw
            .unwrap_or_default()
            .into_iter()
            .map(|(name, entry)| (name, entry.unwrap_or_default()))
            .collect();

        Ok(Self { profiles })
    }

    pub fn from_str(content: &str, origin: &str) -> Result<Self> {
        Self::from_slice(content.as_bytes(), origin)
    }
}

pub struct ConfigReader;

impl ConfigReader {
    /// Read a config file, treating a missing file as "no document"
    ///
    /// Any other I/O failure and any YAML error are returned as errors.
    pub fn from_file(path: &Path) -> Result<Option<ConfigDocument>> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("Unable to find config file: {}", path.display());
                return Ok(None);
            }
            Err(source) => {
                return Err(Error::ConfigRead {
                    path: path.display().to_string(),
                    source,
                });
            }
        };

        tracing::debug!("Found config file: {}", path.display());
        let document = ConfigDocument::from_slice(&bytes, &path.display().to_string())?;

        tracing::debug!(
            "Read {} profile(s) from {}",
            document.profiles.len(),
            path.display()
        );

        Ok(Some(document))
    }

    /// Read every path in order, keeping absent files as `None`
    pub fn read_layers<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Option<ConfigDocument>>> {
        paths
            .iter()
            .map(|path| Self::from_file(path.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_document_keeps_profile_order() {
        let yaml = r#"
work:
  executable: firefox
  urls:
    corp:
      - domain_suffix: corp.internal
personal:
  executable: chromium
"#;
        let doc = ConfigDocument::from_str(yaml, "test").unwrap();

        let names: Vec<&str> = doc.profiles.keys().collect();
        assert_eq!(names, vec!["work", "personal"]);
        assert_eq!(
            doc.profiles.get("work").unwrap().executable.as_deref(),
            Some("firefox")
        );
    }

    #[test]
    fn test_empty_document_has_no_profiles() {
        let doc = ConfigDocument::from_str("   \n", "test").unwrap();
        assert!(doc.profiles.is_empty());
    }

    #[test]
    fn test_null_profile_entry_is_empty() {
        let doc = ConfigDocument::from_str("placeholder:\n", "test").unwrap();
        assert_eq!(
            doc.profiles.get("placeholder"),
            Some(&ProfileEntry::default())
        );
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let result = ConfigDocument::from_str("work: [unclosed", "broken.yaml");

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("broken.yaml"));
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("absent.yaml");

        let result = ConfigReader::from_file(&path).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_read_layers_keeps_positions() {
        let temp_dir = tempfile::tempdir().unwrap();
        let present = temp_dir.path().join("present.yaml");
        let mut file = std::fs::File::create(&present).unwrap();
        writeln!(file, "work:\n  executable: firefox").unwrap();

        let layers =
            ConfigReader::read_layers(&[temp_dir.path().join("absent.yaml"), present]).unwrap();

        assert_eq!(layers.len(), 2);
        assert!(layers[0].is_none());
        assert!(layers[1].is_some());
    }
}
