use bevy::prelude::*;

use crate::assets::{map::TmxMapAsset, tileset::TmxTilesetAsset};
use crate::loaders::{map::TmxMapAssetLoader, tileset::TmxTilesetAssetLoader};

/// Plugin that registers the Tiled asset types and loaders
///
/// # Example
/// ```no_run
/// use bevy::prelude::*;
/// use bevy_tmxmap_assets::TmxmapAssetsPlugin;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(TmxmapAssetsPlugin)
///     .run();
/// ```
///
/// # What this plugin does
///
/// - Registers `TmxMapAsset` and `TmxTilesetAsset`
/// - Registers loaders for `.tmx` and `.tsx` files
///
/// No entity spawning and no rendering: maps stay plain data in `Assets<TmxMapAsset>`.
pub struct TmxmapAssetsPlugin;

impl Plugin for TmxmapAssetsPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<TmxMapAsset>()
            .init_asset::<TmxTilesetAsset>();

        app.register_asset_loader(TmxTilesetAssetLoader)
            .register_asset_loader(TmxMapAssetLoader);
    }
}
