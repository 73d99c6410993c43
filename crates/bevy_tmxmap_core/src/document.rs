//! Raw document extraction.
//!
//! Reads a `.tmx` or `.tsx` document into plain structs holding attribute
//! values and inner text exactly as written. No semantic decoding happens here:
//! layer payloads stay undecoded, properties stay untyped, enumerations stay
//! strings. The assembler does the rest.

use std::str::FromStr;

use bevy::log::debug;
use xml::attribute::OwnedAttribute;
use xml::reader::{EventReader, XmlEvent};

use crate::error::TmxError;
use crate::properties::RawProperty;

/// A `<map>` document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMap {
    pub version: String,
    pub tiled_version: String,
    pub orientation: Option<String>,
    pub render_order: Option<String>,
    pub width: u32,
    pub height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub infinite: bool,
    pub hex_side_length: Option<i32>,
    pub stagger_axis: Option<String>,
    pub stagger_index: Option<String>,
    pub background_color: Option<String>,
    pub compression_level: Option<i32>,
    pub next_layer_id: Option<u32>,
    pub next_object_id: Option<u32>,
    pub properties: Vec<RawProperty>,
    pub tilesets: Vec<RawTilesetEntry>,
    pub layers: Vec<RawLayer>,
}

impl RawMap {
    /// Source paths of every external tileset reference, in document order.
    pub fn external_tileset_sources(&self) -> impl Iterator<Item = &str> {
        self.tilesets.iter().filter_map(|entry| match entry {
            RawTilesetEntry::External { source, .. } => Some(source.as_str()),
            RawTilesetEntry::Embedded { .. } => None,
        })
    }
}

/// A `<tileset>` element inside a map.
#[derive(Debug, Clone, PartialEq)]
pub enum RawTilesetEntry {
    /// `<tileset firstgid=".." source=".."/>`
    External { first_gid: u32, source: String },
    /// A tileset written inline in the map.
    Embedded { first_gid: u32, tileset: RawTileset },
}

/// A tile `<layer>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawLayer {
    pub id: i32,
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// `encoding` of the `<data>` node, empty when absent.
    pub encoding: String,
    /// `compression` of the `<data>` node, empty when absent.
    pub compression: String,
    /// Inner text of the `<data>` node.
    pub payload: Vec<u8>,
    pub properties: Vec<RawProperty>,
}

/// A `<tileset>` document (or embedded tileset element).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTileset {
    pub version: String,
    pub tiled_version: String,
    pub name: String,
    pub tile_width: u32,
    pub tile_height: u32,
    pub tile_count: u32,
    pub columns: u32,
    pub spacing: u32,
    pub margin: u32,
    pub grid: Option<RawGrid>,
    pub image: Option<RawImage>,
    pub properties: Vec<RawProperty>,
    pub tiles: Vec<RawTile>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawGrid {
    pub orientation: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawImage {
    pub source: String,
    pub trans: Option<String>,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTile {
    pub id: u32,
    pub image: Option<RawImage>,
    pub properties: Vec<RawProperty>,
}

/// Parse a map document.
pub fn parse_map_document(bytes: &[u8]) -> Result<RawMap, TmxError> {
    let root = Element::parse(bytes)?;
    root.expect_name("map")?;

    let mut map = RawMap {
        version: root.attr_string("version"),
        tiled_version: root.attr_string("tiledversion"),
        orientation: root.attr("orientation").map(str::to_string),
        render_order: root.attr("renderorder").map(str::to_string),
        width: root.parse_attr_or_default("width")?,
        height: root.parse_attr_or_default("height")?,
        tile_width: root.parse_attr_or_default("tilewidth")?,
        tile_height: root.parse_attr_or_default("tileheight")?,
        infinite: root.parse_attr_or_default::<u8>("infinite")? != 0,
        hex_side_length: root.parse_attr("hexsidelength")?,
        stagger_axis: root.attr("staggeraxis").map(str::to_string),
        stagger_index: root.attr("staggerindex").map(str::to_string),
        background_color: root.attr("backgroundcolor").map(str::to_string),
        compression_level: root.parse_attr("compressionlevel")?,
        next_layer_id: root.parse_attr("nextlayerid")?,
        next_object_id: root.parse_attr("nextobjectid")?,
        ..Default::default()
    };

    for child in &root.children {
        match child.name.as_str() {
            "properties" => map.properties = parse_properties(child),
            "tileset" => map.tilesets.push(parse_tileset_entry(child)?),
            "layer" => map.layers.push(parse_layer(child)?),
            other => debug!("Skipping unsupported <{other}> element in map"),
        }
    }

    Ok(map)
}

/// Parse a standalone tileset document.
pub fn parse_tileset_document(bytes: &[u8]) -> Result<RawTileset, TmxError> {
    let root = Element::parse(bytes)?;
    root.expect_name("tileset")?;
    parse_tileset(&root)
}

fn parse_tileset_entry(element: &Element) -> Result<RawTilesetEntry, TmxError> {
    let first_gid = element.parse_attr::<u32>("firstgid")?.ok_or_else(|| {
        TmxError::DocumentParse("tileset in map has no firstgid".to_string())
    })?;

    match element.attr("source") {
        Some(source) => Ok(RawTilesetEntry::External {
            first_gid,
            source: source.to_string(),
        }),
        None => Ok(RawTilesetEntry::Embedded {
            first_gid,
            tileset: parse_tileset(element)?,
        }),
    }
}

fn parse_tileset(element: &Element) -> Result<RawTileset, TmxError> {
    let mut tileset = RawTileset {
        version: element.attr_string("version"),
        tiled_version: element.attr_string("tiledversion"),
        name: element.attr_string("name"),
        tile_width: element.parse_attr_or_default("tilewidth")?,
        tile_height: element.parse_attr_or_default("tileheight")?,
        tile_count: element.parse_attr_or_default("tilecount")?,
        columns: element.parse_attr_or_default("columns")?,
        spacing: element.parse_attr_or_default("spacing")?,
        margin: element.parse_attr_or_default("margin")?,
        ..Default::default()
    };

    for child in &element.children {
        match child.name.as_str() {
            "grid" => {
                tileset.grid = Some(RawGrid {
                    orientation: child.attr_string("orientation"),
                    width: child.parse_attr_or_default("width")?,
                    height: child.parse_attr_or_default("height")?,
                });
            }
            "image" => tileset.image = Some(parse_image(child)?),
            "properties" => tileset.properties = parse_properties(child),
            "tile" => tileset.tiles.push(parse_tile(child)?),
            _ => {}
        }
    }

    Ok(tileset)
}

fn parse_tile(element: &Element) -> Result<RawTile, TmxError> {
    let mut tile = RawTile {
        id: element.parse_attr_or_default("id")?,
        ..Default::default()
    };

    for child in &element.children {
        match child.name.as_str() {
            "image" => tile.image = Some(parse_image(child)?),
            "properties" => tile.properties = parse_properties(child),
            _ => {}
        }
    }

    Ok(tile)
}

fn parse_image(element: &Element) -> Result<RawImage, TmxError> {
    Ok(RawImage {
        source: element.attr_string("source"),
        trans: element.attr("trans").map(str::to_string),
        width: element.parse_attr_or_default("width")?,
        height: element.parse_attr_or_default("height")?,
    })
}

fn parse_layer(element: &Element) -> Result<RawLayer, TmxError> {
    let mut layer = RawLayer {
        id: element.parse_attr_or_default("id")?,
        name: element.attr_string("name"),
        width: element.parse_attr_or_default("width")?,
        height: element.parse_attr_or_default("height")?,
        ..Default::default()
    };

    for child in &element.children {
        match child.name.as_str() {
            "data" => {
                layer.encoding = child.attr_string("encoding");
                layer.compression = child.attr_string("compression");
                layer.payload = child.text.clone().into_bytes();
            }
            "properties" => layer.properties = parse_properties(child),
            _ => {}
        }
    }

    Ok(layer)
}

fn parse_properties(element: &Element) -> Vec<RawProperty> {
    element
        .children
        .iter()
        .filter(|child| child.name == "property")
        .map(|child| RawProperty {
            name: child.attr_string("name"),
            property_type: child.attr_string("type"),
            // Multi-line strings are stored as element text
            value: child
                .attr("value")
                .map_or_else(|| child.text.clone(), str::to_string),
        })
        .collect()
}

/// Minimal element tree built from the xml-rs event stream.
#[derive(Debug, Default)]
struct Element {
    name: String,
    attributes: Vec<OwnedAttribute>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    fn parse(bytes: &[u8]) -> Result<Element, TmxError> {
        let mut stack: Vec<Element> = Vec::new();

        for event in EventReader::new(bytes) {
            match event? {
                XmlEvent::StartElement {
                    name, attributes, ..
                } => stack.push(Element {
                    name: name.local_name,
                    attributes,
                    ..Default::default()
                }),
                XmlEvent::EndElement { .. } => {
                    let finished = stack.pop().ok_or_else(|| {
                        TmxError::DocumentParse("unbalanced end tag".to_string())
                    })?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(finished),
                        None => return Ok(finished),
                    }
                }
                XmlEvent::Characters(text)
                | XmlEvent::CData(text)
                | XmlEvent::Whitespace(text) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&text);
                    }
                }
                _ => {}
            }
        }

        Err(TmxError::DocumentParse("document has no root element".to_string()))
    }

    fn expect_name(&self, name: &str) -> Result<(), TmxError> {
        if self.name == name {
            Ok(())
        } else {
            Err(TmxError::DocumentParse(format!(
                "expected <{name}> root element, found <{}>",
                self.name
            )))
        }
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name.local_name == name)
            .map(|attr| attr.value.as_str())
    }

    fn attr_string(&self, name: &str) -> String {
        self.attr(name).unwrap_or_default().to_string()
    }

    fn parse_attr<T: FromStr>(&self, name: &str) -> Result<Option<T>, TmxError> {
        self.attr(name)
            .map(|value| {
                value.parse::<T>().map_err(|_| TmxError::InvalidAttribute {
                    element: self.name.clone(),
                    attribute: name.to_string(),
                    value: value.to_string(),
                })
            })
            .transpose()
    }

    fn parse_attr_or_default<T: FromStr + Default>(&self, name: &str) -> Result<T, TmxError> {
        Ok(self.parse_attr(name)?.unwrap_or_default())
    }
}
