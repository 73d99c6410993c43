use std::path::{Component, Path};

use bevy_tmxmap_core::clean_path;

pub mod map;
pub mod tileset;

/// Resolve a path written in a Tiled file to an asset-root-relative path.
///
/// Tiled writes paths relative to the referencing file, like
/// `../tilesets/dungeon.tsx`. Bevy wants `tilesets/dungeon.tsx`: joined onto
/// the referencing asset's directory, `..` folded away, forward slashes.
///
/// Returns `None` when the result is not valid UTF-8, is absolute, or climbs
/// above the asset root.
pub(crate) fn resolve_relative_path(asset_path: &Path, relative_path: &str) -> Option<String> {
    let parent = asset_path.parent().unwrap_or_else(|| Path::new(""));
    let cleaned = clean_path(&parent.join(relative_path));

    // `clean_path` keeps a leading `..` it cannot fold
    let mut segments = Vec::new();
    for component in cleaned.components() {
        match component {
            Component::Normal(segment) => segments.push(segment.to_str()?),
            _ => return None,
        }
    }

    Some(segments.join("/"))
}
