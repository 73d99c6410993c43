use bevy::prelude::*;
use bevy_tmxmap_core::Map;

use crate::assets::tileset::TmxTilesetAsset;

/// A loaded `.tmx` map.
#[derive(TypePath, Asset, Debug)]
pub struct TmxMapAsset {
    /// The decoded map, tilesets already merged in
    pub map: Map,

    /// Handles to every external tileset, in the map's tileset order.
    /// Embedded tilesets have no entry here.
    pub tilesets: Vec<TilesetReference>,
}

#[derive(Debug, Clone)]
pub struct TilesetReference {
    /// Bevy asset handle to the tileset
    pub handle: Handle<TmxTilesetAsset>,
    /// First GID of this tileset in the map
    pub first_gid: u32,
}
