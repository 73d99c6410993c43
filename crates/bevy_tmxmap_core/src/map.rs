//! The assembled map and its document-level attributes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TmxError;
use crate::layer::Layer;
use crate::properties::CustomProperties;
use crate::tileset::Tileset;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Orthogonal,
    Isometric,
    IsometricStaggered,
    HexagonalStaggered,
}

impl FromStr for Orientation {
    type Err = TmxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "orthogonal" => Ok(Orientation::Orthogonal),
            "isometric" => Ok(Orientation::Isometric),
            "staggered" => Ok(Orientation::IsometricStaggered),
            "hexagonal" => Ok(Orientation::HexagonalStaggered),
            other => Err(TmxError::UnknownOrientation(other.to_string())),
        }
    }
}

/// Order in which tiles are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenderOrder {
    #[default]
    RightDown,
    RightUp,
    LeftDown,
    LeftUp,
}

impl FromStr for RenderOrder {
    type Err = TmxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "right-down" => Ok(RenderOrder::RightDown),
            "right-up" => Ok(RenderOrder::RightUp),
            "left-down" => Ok(RenderOrder::LeftDown),
            "left-up" => Ok(RenderOrder::LeftUp),
            other => Err(TmxError::UnknownRenderOrder(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaggerAxis {
    X,
    Y,
}

impl StaggerAxis {
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s {
            "x" => Some(StaggerAxis::X),
            "y" => Some(StaggerAxis::Y),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaggerIndex {
    Odd,
    Even,
}

impl StaggerIndex {
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s {
            "odd" => Some(StaggerIndex::Odd),
            "even" => Some(StaggerIndex::Even),
            _ => None,
        }
    }
}

/// An 8-bit RGBA color as written in Tiled documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Rgba {
    /// Parse `#RRGGBB` or `#AARRGGBB`; the `#` is optional.
    ///
    /// # Example
    /// ```
    /// use bevy_tmxmap_core::Rgba;
    ///
    /// let color = Rgba::parse("#80ff0000").unwrap();
    /// assert_eq!((color.alpha, color.red, color.green, color.blue), (0x80, 0xff, 0, 0));
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !hex.is_ascii() {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();

        match hex.len() {
            6 => Some(Rgba {
                red: byte(0)?,
                green: byte(2)?,
                blue: byte(4)?,
                alpha: 0xff,
            }),
            8 => Some(Rgba {
                alpha: byte(0)?,
                red: byte(2)?,
                green: byte(4)?,
                blue: byte(6)?,
            }),
            _ => None,
        }
    }
}

/// Structured attributes of the `<map>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapProperties {
    pub orientation: Orientation,
    /// Map size in tiles.
    pub width: u32,
    pub height: u32,
    /// Tile size in pixels.
    pub tile_width: u32,
    pub tile_height: u32,
    pub infinite: bool,
    /// Only meaningful for hexagonal maps.
    pub hex_side_length: Option<i32>,
    pub stagger_axis: Option<StaggerAxis>,
    pub stagger_index: Option<StaggerIndex>,
    pub render_order: RenderOrder,
    pub compression_level: Option<i32>,
    pub background_color: Option<Rgba>,
    pub next_layer_id: Option<u32>,
    pub next_object_id: Option<u32>,
}

/// A fully decoded map.
///
/// Built by [`crate::load_map`] and friends. Owns its layers and tilesets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Map {
    pub properties: MapProperties,
    pub custom_properties: CustomProperties,
    pub tilesets: Vec<Tileset>,
    pub layers: Vec<Layer>,
    version: String,
    tiled_version: String,
}

impl Map {
    pub(crate) fn new(
        version: String,
        tiled_version: String,
        properties: MapProperties,
        custom_properties: CustomProperties,
        tilesets: Vec<Tileset>,
        layers: Vec<Layer>,
    ) -> Self {
        Self {
            properties,
            custom_properties,
            tilesets,
            layers,
            version,
            tiled_version,
        }
    }

    /// TMX format version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Version of Tiled that saved the map.
    pub fn tiled_version(&self) -> &str {
        &self.tiled_version
    }

    /// All layers called `name`, in document order. Names are not unique.
    pub fn layers_by_name(&self, name: &str) -> Vec<&Layer> {
        self.layers.iter().filter(|layer| layer.name == name).collect()
    }

    pub fn layer(&self, id: i32) -> Result<&Layer, TmxError> {
        self.layers
            .iter()
            .find(|layer| layer.id == id)
            .ok_or(TmxError::LayerNotFound(id))
    }

    pub fn tileset_by_name(&self, name: &str) -> Result<&Tileset, TmxError> {
        self.tilesets
            .iter()
            .find(|tileset| tileset.name == name)
            .ok_or_else(|| TmxError::TilesetNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(id: i32, name: &str) -> Layer {
        Layer::new(id, name, 1, 1, vec![0], CustomProperties::default()).unwrap()
    }

    fn sample_map() -> Map {
        Map::new(
            "1.10".into(),
            "1.10.2".into(),
            MapProperties::default(),
            CustomProperties::default(),
            Vec::new(),
            vec![layer(1, "Ground"), layer(2, "Decor"), layer(3, "Ground")],
        )
    }

    #[test]
    fn test_orientation_strings() {
        assert_eq!("orthogonal".parse::<Orientation>().unwrap(), Orientation::Orthogonal);
        assert_eq!("isometric".parse::<Orientation>().unwrap(), Orientation::Isometric);
        assert_eq!(
            "staggered".parse::<Orientation>().unwrap(),
            Orientation::IsometricStaggered
        );
        assert_eq!(
            "hexagonal".parse::<Orientation>().unwrap(),
            Orientation::HexagonalStaggered
        );
        assert!(matches!(
            "Orthogonal".parse::<Orientation>(),
            Err(TmxError::UnknownOrientation(_))
        ));
    }

    #[test]
    fn test_render_order_strings() {
        assert_eq!("left-up".parse::<RenderOrder>().unwrap(), RenderOrder::LeftUp);
        assert_eq!("right-up".parse::<RenderOrder>().unwrap(), RenderOrder::RightUp);
        assert!(matches!(
            "up-left".parse::<RenderOrder>(),
            Err(TmxError::UnknownRenderOrder(_))
        ));
    }

    #[test]
    fn test_color_parsing() {
        assert_eq!(
            Rgba::parse("#203040"),
            Some(Rgba {
                red: 0x20,
                green: 0x30,
                blue: 0x40,
                alpha: 0xff
            })
        );
        assert_eq!(Rgba::parse("ff00ff").map(|c| c.green), Some(0));
        assert_eq!(Rgba::parse("#12345"), None);
        assert_eq!(Rgba::parse("#zz0000"), None);
    }

    #[test]
    fn test_layers_by_name_keeps_document_order() {
        let map = sample_map();

        let ground: Vec<i32> = map.layers_by_name("Ground").iter().map(|l| l.id).collect();
        assert_eq!(ground, vec![1, 3]);
        assert_eq!(map.layers_by_name("Decor").len(), 1);
        assert!(map.layers_by_name("Sky").is_empty());
    }

    #[test]
    fn test_layer_lookup_by_id() {
        let map = sample_map();

        assert_eq!(map.layer(2).unwrap().name, "Decor");
        assert!(matches!(map.layer(9), Err(TmxError::LayerNotFound(9))));
    }

    #[test]
    fn test_version_accessors() {
        let map = sample_map();

        assert_eq!(map.version(), "1.10");
        assert_eq!(map.tiled_version(), "1.10.2");
        assert!(matches!(map.tileset_by_name("x"), Err(TmxError::TilesetNotFound(_))));
    }
}
