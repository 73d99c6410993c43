//! Unified plugin for bevy_tmxmap.

use bevy::prelude::*;

use bevy_tmxmap_assets::TmxmapAssetsPlugin;

/// Adds everything bevy_tmxmap offers to an app.
///
/// Currently that is asset loading ([`TmxmapAssetsPlugin`]).
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_tmxmap::prelude::*;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(BevyTmxmapPlugin)
///     .run();
/// ```
pub struct BevyTmxmapPlugin;

impl Plugin for BevyTmxmapPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(TmxmapAssetsPlugin);

        info!("BevyTmxmapPlugin initialized");
    }
}
