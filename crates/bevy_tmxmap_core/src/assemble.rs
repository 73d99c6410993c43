//! Map assembly and load entry points.

use std::path::Path;

use bevy::log::debug;

use crate::data::decode_layer_data;
use crate::document::{
    RawLayer, RawMap, RawTilesetEntry, parse_map_document, parse_tileset_document,
};
use crate::error::TmxError;
use crate::layer::Layer;
use crate::map::{Map, MapProperties, Orientation, RenderOrder, Rgba, StaggerAxis, StaggerIndex};
use crate::properties::CustomProperties;
use crate::reader::{FilesystemReader, ResourceReader};
use crate::tileset::Tileset;

/// Turn a parsed map document into a [`Map`].
///
/// Every layer is decoded and every external tileset is fetched through
/// `reader` and stamped with the `firstgid` of its reference. The first
/// failure in document order aborts the whole load.
pub fn assemble(doc: RawMap, reader: &impl ResourceReader) -> Result<Map, TmxError> {
    let layers = doc
        .layers
        .iter()
        .map(|raw| decode_layer(raw).map_err(|e| e.in_layer(&raw.name)))
        .collect::<Result<Vec<_>, _>>()?;

    let properties = map_properties(&doc)?;
    let custom_properties =
        CustomProperties::coerce(&doc.properties).map_err(TmxError::in_map_properties)?;

    let mut tilesets = Vec::with_capacity(doc.tilesets.len());
    for entry in &doc.tilesets {
        let tileset = match entry {
            RawTilesetEntry::External { first_gid, source } => {
                let mut tileset =
                    load_external_tileset(source, reader).map_err(|e| e.in_tileset(source))?;
                tileset.first_gid = *first_gid;
                tileset.source = source.clone();
                tileset
            }
            RawTilesetEntry::Embedded { first_gid, tileset } => {
                let mut embedded =
                    Tileset::from_raw(tileset).map_err(|e| e.in_tileset(&tileset.name))?;
                embedded.first_gid = *first_gid;
                embedded
            }
        };
        tilesets.push(tileset);
    }

    debug!(
        "Assembled {}x{} map: {} layers, {} tilesets",
        properties.width,
        properties.height,
        layers.len(),
        tilesets.len()
    );

    Ok(Map::new(
        doc.version,
        doc.tiled_version,
        properties,
        custom_properties,
        tilesets,
        layers,
    ))
}

fn decode_layer(raw: &RawLayer) -> Result<Layer, TmxError> {
    let data = decode_layer_data(&raw.encoding, &raw.compression, &raw.payload)?;
    let properties = CustomProperties::coerce(&raw.properties)?;
    debug!("Decoded layer {:?} ({} tiles)", raw.name, data.len());

    Layer::new(raw.id, raw.name.clone(), raw.width, raw.height, data, properties)
}

fn load_external_tileset(source: &str, reader: &impl ResourceReader) -> Result<Tileset, TmxError> {
    let bytes = reader
        .read(Path::new(source))
        .map_err(|e| TmxError::ResourceAcquisition {
            path: source.into(),
            source: e,
        })?;
    Tileset::from_raw(&parse_tileset_document(&bytes)?)
}

fn map_properties(doc: &RawMap) -> Result<MapProperties, TmxError> {
    let orientation = match doc.orientation.as_deref() {
        Some(s) => s.parse()?,
        None => {
            debug!("Map has no orientation, assuming orthogonal");
            Orientation::default()
        }
    };
    let render_order = match doc.render_order.as_deref() {
        Some(s) => s.parse()?,
        None => RenderOrder::default(),
    };

    Ok(MapProperties {
        orientation,
        width: doc.width,
        height: doc.height,
        tile_width: doc.tile_width,
        tile_height: doc.tile_height,
        infinite: doc.infinite,
        hex_side_length: doc.hex_side_length,
        stagger_axis: parse_optional(doc.stagger_axis.as_deref(), "staggeraxis", StaggerAxis::parse)?,
        stagger_index: parse_optional(
            doc.stagger_index.as_deref(),
            "staggerindex",
            StaggerIndex::parse,
        )?,
        render_order,
        compression_level: doc.compression_level,
        background_color: parse_optional(
            doc.background_color.as_deref(),
            "backgroundcolor",
            Rgba::parse,
        )?,
        next_layer_id: doc.next_layer_id,
        next_object_id: doc.next_object_id,
    })
}

fn parse_optional<T>(
    value: Option<&str>,
    attribute: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, TmxError> {
    value
        .map(|v| {
            parse(v).ok_or_else(|| TmxError::InvalidAttribute {
                element: "map".to_string(),
                attribute: attribute.to_string(),
                value: v.to_string(),
            })
        })
        .transpose()
}

/// Load a map from bytes, fetching referenced tilesets through `reader`.
pub fn load_map_from_bytes(bytes: &[u8], reader: &impl ResourceReader) -> Result<Map, TmxError> {
    assemble(parse_map_document(bytes)?, reader)
}

/// Load a `.tmx` file. Tileset paths resolve against the file's directory.
pub fn load_map(path: impl AsRef<Path>) -> Result<Map, TmxError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| TmxError::ResourceAcquisition {
        path: path.to_path_buf(),
        source,
    })?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));

    load_map_from_bytes(&bytes, &FilesystemReader::new(base_dir))
}

/// Load a standalone tileset. Its `first_gid` stays 0.
pub fn load_tileset_from_bytes(bytes: &[u8]) -> Result<Tileset, TmxError> {
    Tileset::from_raw(&parse_tileset_document(bytes)?)
}

/// Load a `.tsx` file.
pub fn load_tileset(path: impl AsRef<Path>) -> Result<Tileset, TmxError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| TmxError::ResourceAcquisition {
        path: path.to_path_buf(),
        source,
    })?;

    load_tileset_from_bytes(&bytes)
}
