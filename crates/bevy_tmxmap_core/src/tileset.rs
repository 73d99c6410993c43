//! Tilesets and their tiles.

use bevy::log::debug;
use serde::{Deserialize, Serialize};

use crate::document::{RawImage, RawTileset};
use crate::error::TmxError;
use crate::map::Rgba;
use crate::properties::CustomProperties;

/// A palette of tiles.
///
/// `first_gid` is assigned by the map that references the tileset; a tileset
/// loaded on its own has `first_gid == 0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tileset {
    pub first_gid: u32,
    /// Path as written in the referencing map. Empty for embedded and
    /// standalone tilesets.
    pub source: String,
    pub name: String,
    pub tile_width: u32,
    pub tile_height: u32,
    pub tile_count: u32,
    pub columns: u32,
    pub spacing: u32,
    pub margin: u32,
    /// Shared spritesheet, absent for image collection tilesets.
    pub image: Option<TilesetImage>,
    pub grid: Option<TilesetGrid>,
    pub properties: CustomProperties,
    /// Tiles that have an explicit `<tile>` entry, in document order.
    pub tiles: Vec<Tile>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilesetImage {
    pub source: String,
    pub width: u32,
    pub height: u32,
    pub transparent_color: Option<Rgba>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilesetGrid {
    pub orientation: String,
    pub width: u32,
    pub height: u32,
}

/// One `<tile>` entry.
///
/// `width`/`height` come from the tile's own image and are 0 when it has none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Local id, zero-based.
    pub id: u32,
    pub width: u32,
    pub height: u32,
    pub image: Option<String>,
    pub properties: CustomProperties,
}

impl Tileset {
    /// Build a tileset from a parsed document, coercing every tile's
    /// properties. `first_gid` is left at 0.
    pub fn from_raw(raw: &RawTileset) -> Result<Self, TmxError> {
        let tiles = raw
            .tiles
            .iter()
            .map(|tile| {
                let (width, height, image) = match &tile.image {
                    Some(image) => (image.width, image.height, Some(image.source.clone())),
                    None => (0, 0, None),
                };
                Ok(Tile {
                    id: tile.id,
                    width,
                    height,
                    image,
                    properties: CustomProperties::coerce(&tile.properties)?,
                })
            })
            .collect::<Result<Vec<_>, TmxError>>()?;

        let tileset = Tileset {
            first_gid: 0,
            source: String::new(),
            name: raw.name.clone(),
            tile_width: raw.tile_width,
            tile_height: raw.tile_height,
            tile_count: raw.tile_count,
            columns: raw.columns,
            spacing: raw.spacing,
            margin: raw.margin,
            image: raw.image.as_ref().map(convert_image).transpose()?,
            grid: raw.grid.as_ref().map(|grid| TilesetGrid {
                orientation: grid.orientation.clone(),
                width: grid.width,
                height: grid.height,
            }),
            properties: CustomProperties::coerce(&raw.properties)?,
            tiles,
        };

        debug!(
            "Loaded tileset {:?}: {} tiles, {} with properties",
            tileset.name,
            tileset.tile_count,
            tileset.tiles.iter().filter(|t| !t.properties.is_empty()).count()
        );

        Ok(tileset)
    }

    /// The `<tile>` entry for a local id, if the document has one.
    pub fn tile(&self, local_id: u32) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.id == local_id)
    }

    /// Whether `gid` falls in this tileset's range. Flip bits are not stripped.
    pub fn contains_gid(&self, gid: u32) -> bool {
        gid >= self.first_gid && gid - self.first_gid < self.tile_count
    }

    /// True when each tile carries its own image instead of a shared sheet.
    pub fn is_image_collection(&self) -> bool {
        self.image.is_none()
    }
}

fn convert_image(image: &RawImage) -> Result<TilesetImage, TmxError> {
    let transparent_color = image
        .trans
        .as_deref()
        .map(|trans| {
            Rgba::parse(trans).ok_or_else(|| TmxError::InvalidAttribute {
                element: "image".to_string(),
                attribute: "trans".to_string(),
                value: trans.to_string(),
            })
        })
        .transpose()?;

    Ok(TilesetImage {
        source: image.source.clone(),
        width: image.width,
        height: image.height,
        transparent_color,
    })
}
