//! Conversions between file paths, `file://` URIs and display labels.

use std::path::{Component, Path};

/// Build a `file://` URI for `path`, percent-encoding every path segment.
pub fn file_uri(path: &Path) -> String {
    let mut uri = String::from("file://");
    let mut wrote_segment = false;

    for component in path.components() {
        let segment = match component {
            Component::RootDir | Component::CurDir => continue,
            // Windows drive letters stay as-is: file:///C:/Music/...
            Component::Prefix(prefix) => prefix.as_os_str().to_string_lossy().into_owned(),
            Component::ParentDir => "..".to_string(),
            Component::Normal(seg) => urlencoding::encode(&seg.to_string_lossy()).into_owned(),
        };
        uri.push('/');
        uri.push_str(&segment);
        wrote_segment = true;
    }

    if !wrote_segment {
        uri.push('/');
    }
    uri
}

/// Turn a source URI into the name shown as "now playing".
///
/// Keeps the last path segment, strips its extension and decodes percent escapes
/// (`%20` becomes a space). Undecodable escapes are left as written.
pub fn now_playing_label(uri: &str) -> String {
    let segment = uri.rsplit('/').next().unwrap_or(uri);
    let stem = match segment.rfind('.') {
        Some(dot) if dot > 0 => &segment[..dot],
        _ => segment,
    };

    match urlencoding::decode(stem) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => stem.replace("%20", " "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn file_uri_encodes_spaces_per_segment() {
        let uri = file_uri(&PathBuf::from("/srv/My Music/Track One.mp3"));
        assert_eq!(uri, "file:///srv/My%20Music/Track%20One.mp3");
    }

    #[test]
    fn label_strips_extension_and_decodes_spaces() {
        assert_eq!(
            now_playing_label("file:///srv/My%20Music/Track%20One.mp3"),
            "Track One"
        );
        assert_eq!(now_playing_label("file:///srv/a.b.m4a"), "a.b");
    }

    #[test]
    fn label_keeps_names_without_extension_and_dotfiles() {
        assert_eq!(now_playing_label("file:///srv/README"), "README");
        assert_eq!(now_playing_label("file:///srv/.hidden"), ".hidden");
    }

    #[test]
    fn label_round_trips_unicode_names() {
        let uri = file_uri(&PathBuf::from("/music/Песня 1.mp3"));
        assert_eq!(now_playing_label(&uri), "Песня 1");
    }
}
