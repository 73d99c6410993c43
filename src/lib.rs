//! # bevy_tmxmap
//!
//! Tiled `.tmx` / `.tsx` loading for Bevy.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_tmxmap::prelude::*;
//!
//! #[derive(Resource)]
//! struct Level(Handle<TmxMapAsset>);
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(BevyTmxmapPlugin)
//!         .add_systems(Startup, load_level)
//!         .run();
//! }
//!
//! fn load_level(mut commands: Commands, asset_server: Res<AssetServer>) {
//!     commands.insert_resource(Level(asset_server.load("maps/level1.tmx")));
//! }
//! ```
//!
//! ## Without Bevy's asset server
//!
//! The decoding pipeline lives in [`core`] and works on plain bytes:
//!
//! ```rust,no_run
//! let map = bevy_tmxmap::core::load_map("assets/maps/level1.tmx").unwrap();
//! for layer in map.layers_by_name("Ground") {
//!     println!("{} tiles", layer.data.len());
//! }
//! ```
//!
//! ## Features
//!
//! - **assets** (default): Bevy asset loaders ([`assets`]) and [`BevyTmxmapPlugin`]

#[cfg(feature = "assets")]
pub mod plugin;

pub use bevy_tmxmap_core as core;

#[cfg(feature = "assets")]
pub use bevy_tmxmap_assets as assets;

#[cfg(feature = "assets")]
pub use plugin::BevyTmxmapPlugin;

/// Unified prelude for bevy_tmxmap
pub mod prelude {
    pub use crate::core::prelude::*;

    #[cfg(feature = "assets")]
    pub use crate::assets::prelude::*;

    #[cfg(feature = "assets")]
    pub use crate::plugin::BevyTmxmapPlugin;
}
