use bevy::prelude::*;
use bevy_tmxmap_core::Tileset;

/// A loaded standalone `.tsx` tileset.
///
/// `tileset.first_gid` is always 0 here; the offset belongs to the map that
/// references it (see [`crate::assets::map::TilesetReference`]).
#[derive(TypePath, Asset, Debug)]
pub struct TmxTilesetAsset {
    pub tileset: Tileset,
}
