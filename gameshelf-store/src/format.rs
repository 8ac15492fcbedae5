use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::gateway::SnapshotStore;
use crate::json::JsonStore;
use crate::text::TextStore;

/// On-disk encoding of a catalog snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Text,
    Json,
}

impl Format {
    /// Pick a format from the file extension: `.json` is JSON, anything else is text.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Text,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Text => "text",
            Format::Json => "json",
        }
    }

    /// The store implementation for this format.
    pub fn store(self) -> &'static dyn SnapshotStore {
        match self {
            Format::Text => &TextStore,
            Format::Json => &JsonStore,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            other => Err(StoreError::unknown_format(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(Format::from_path(Path::new("shelf.json")), Format::Json);
        assert_eq!(Format::from_path(Path::new("SHELF.JSON")), Format::Json);
        assert_eq!(Format::from_path(Path::new("shelf.txt")), Format::Text);
        assert_eq!(Format::from_path(Path::new("shelf")), Format::Text);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("JSON".parse::<Format>().unwrap(), Format::Json);
        assert_eq!("txt".parse::<Format>().unwrap(), Format::Text);
        assert!(matches!(
            "yaml".parse::<Format>(),
            Err(StoreError::UnknownFormat(name)) if name == "yaml"
        ));
    }
}
