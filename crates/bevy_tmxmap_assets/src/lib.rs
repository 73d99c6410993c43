//! Bevy asset loading for Tiled maps.
//!
//! Registers `.tmx` and `.tsx` loaders that run the `bevy_tmxmap_core`
//! pipeline, with referenced tilesets fetched through the asset server.

pub mod assets;
pub mod loaders;
pub mod plugin;

pub use plugin::TmxmapAssetsPlugin;

/// Prelude module for convenient imports
///
/// # Example
/// ```no_run
/// use bevy::prelude::*;
/// use bevy_tmxmap_assets::prelude::*;
///
/// fn count_layers(maps: Res<Assets<TmxMapAsset>>) {
///     for (_, asset) in maps.iter() {
///         info!("{} layers", asset.map.layers.len());
///     }
/// }
/// ```
pub mod prelude {
    pub use crate::assets::{
        map::{TilesetReference, TmxMapAsset},
        tileset::TmxTilesetAsset,
    };
    pub use crate::plugin::TmxmapAssetsPlugin;
}
