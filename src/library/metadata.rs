//! Tag and audio-property extraction via `lofty`.

use std::path::Path;
use std::time::Duration;

use lofty::error::LoftyError;
use lofty::prelude::*;
use lofty::tag::{ItemValue, Tag};

use super::model::{MetaValue, Metadata};

/// What the tag reader learned about one file.
#[derive(Debug, Clone, Default)]
pub struct Probe {
    pub metadata: Metadata,
    pub duration: Option<Duration>,
}

/// Read tags, embedded pictures and audio properties of the file at `path`.
pub fn probe(path: &Path) -> Result<Probe, LoftyError> {
    let tagged = lofty::read_from_path(path)?;
    let mut metadata = Metadata::new();

    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        collect_tag(tag, &mut metadata);
    }

    let props = tagged.properties();
    let duration = Some(props.duration()).filter(|d| !d.is_zero());
    if let Some(d) = duration {
        metadata.insert(
            "Duration (s)".to_string(),
            MetaValue::Integer(d.as_secs() as i64),
        );
    }
    if let Some(kbps) = props.audio_bitrate() {
        metadata.insert("Bitrate (kbps)".to_string(), MetaValue::Integer(kbps.into()));
    }
    if let Some(hz) = props.sample_rate() {
        metadata.insert("Sample rate (Hz)".to_string(), MetaValue::Integer(hz.into()));
    }
    if let Some(ch) = props.channels() {
        metadata.insert("Channels".to_string(), MetaValue::Integer(ch.into()));
    }

    Ok(Probe { metadata, duration })
}

fn collect_tag(tag: &Tag, metadata: &mut Metadata) {
    for item in tag.items() {
        let name = format!("{:?}", item.key());
        let value = match item.value() {
            ItemValue::Text(s) | ItemValue::Locator(s) => text_value(s),
            ItemValue::Binary(_) => MetaValue::Unsupported,
        };
        metadata.insert(name, value);
    }

    for (i, picture) in tag.pictures().iter().enumerate() {
        let name = if i == 0 {
            "Artwork".to_string()
        } else {
            format!("Artwork {}", i + 1)
        };
        metadata.insert(
            name,
            MetaValue::Image {
                mime: picture.mime_type().map(|m| m.as_str().to_string()),
                bytes: picture.data().len(),
            },
        );
    }
}

/// Plain decimal numbers (track number, year, ...) are reported as integers.
pub(crate) fn text_value(raw: &str) -> MetaValue {
    let trimmed = raw.trim();
    if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(n) = trimmed.parse::<i64>() {
            return MetaValue::Integer(n);
        }
    }
    MetaValue::Text(raw.to_string())
}
