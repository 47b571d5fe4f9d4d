use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use super::uri::{file_uri, now_playing_label};

/// One playable file found by the scanner.
#[derive(Debug, Clone)]
pub struct Track {
    pub path: PathBuf,
    /// `file://` URI of `path`, used as the track's source identifier.
    pub uri: String,
}

impl Track {
    pub fn new(path: PathBuf) -> Self {
        let uri = file_uri(&path);
        Self { path, uri }
    }

    /// Name shown in the now-playing line: the file name without its extension.
    pub fn label(&self) -> String {
        now_playing_label(&self.uri)
    }
}

/// A single metadata value as reported by the tag reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaValue {
    Text(String),
    Integer(i64),
    /// Embedded artwork. Only its shape is kept; the terminal cannot draw it.
    Image { mime: Option<String>, bytes: usize },
    Unsupported,
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaValue::Text(s) => f.write_str(s),
            MetaValue::Integer(n) => write!(f, "{n}"),
            MetaValue::Image { mime, bytes } => write!(
                f,
                "[image: {}, {} bytes]",
                mime.as_deref().unwrap_or("unknown"),
                bytes
            ),
            MetaValue::Unsupported => f.write_str("N/A"),
        }
    }
}

/// Metadata of a track keyed by field name, iterated in name order.
pub type Metadata = BTreeMap<String, MetaValue>;

/// One line of the metadata table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRow {
    pub name: String,
    pub value: MetaValue,
}

/// Take a snapshot of `metadata` as table rows.
pub fn metadata_rows(metadata: &Metadata) -> Vec<MetadataRow> {
    metadata
        .iter()
        .map(|(name, value)| MetadataRow {
            name: name.clone(),
            value: value.clone(),
        })
        .collect()
}
