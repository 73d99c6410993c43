//! # bevy_tmxmap_core
//!
//! Decoding and assembly of Tiled `.tmx` maps and `.tsx` tilesets into plain,
//! strongly-typed values. Nothing here touches the ECS; the asset crate wraps
//! these entry points in Bevy asset loaders.
//!
//! ## Pipeline
//!
//! - [`document`]: XML to raw attribute/text structs
//! - [`decode_layer_data`]: layer payload to global tile ids
//! - [`CustomProperties::coerce`]: untyped `<property>` nodes to typed values
//! - [`assemble`]: layers, tilesets and map attributes to a [`Map`]
//! - [`Layer::merge`]: overlay one decoded layer on another
//!
//! ## Example
//!
//! ```
//! use bevy_tmxmap_core::{MemoryReader, load_map_from_bytes};
//!
//! let tsx = r#"<tileset name="walls" tilewidth="16" tileheight="16" tilecount="4" columns="2"/>"#;
//! let tmx = r#"<map version="1.10" orientation="orthogonal" width="2" height="1">
//!   <tileset firstgid="1" source="walls.tsx"/>
//!   <layer id="1" name="Ground" width="2" height="1"><data encoding="csv">1,0</data></layer>
//! </map>"#;
//!
//! let reader = MemoryReader::new().with("walls.tsx", tsx);
//! let map = load_map_from_bytes(tmx.as_bytes(), &reader).unwrap();
//!
//! assert_eq!(map.layers_by_name("Ground")[0].data, vec![1, 0]);
//! assert_eq!(map.tilesets[0].first_gid, 1);
//! ```

mod assemble;
mod data;
pub mod document;
mod error;
mod layer;
mod map;
mod properties;
mod reader;
mod tileset;

pub use assemble::{assemble, load_map, load_map_from_bytes, load_tileset, load_tileset_from_bytes};
pub use data::decode_layer_data;
pub use document::{RawMap, RawTileset, parse_map_document, parse_tileset_document};
pub use error::TmxError;
pub use layer::Layer;
pub use map::{Map, MapProperties, Orientation, RenderOrder, Rgba, StaggerAxis, StaggerIndex};
pub use properties::{
    CustomProperties, CustomProperty, FromPropertyValue, PropertyType, PropertyValue, RawProperty,
};
pub use reader::{FilesystemReader, MemoryReader, ResourceReader, clean_path};
pub use tileset::{Tile, Tileset, TilesetGrid, TilesetImage};

/// Commonly used types.
pub mod prelude {
    pub use crate::{
        CustomProperties, Layer, Map, MapProperties, Orientation, RenderOrder, ResourceReader,
        Tile, Tileset, TmxError, load_map, load_map_from_bytes, load_tileset,
        load_tileset_from_bytes,
    };
}
