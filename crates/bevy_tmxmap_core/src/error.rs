//! Error taxonomy shared by every stage of the pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while decoding or assembling a map.
///
/// Stage-level failures are wrapped in [`TmxError::MapProperties`],
/// [`TmxError::Layer`] or [`TmxError::Tileset`] so the caller learns which
/// part of the map failed.
/// Use [`TmxError::root_cause`] to get past the wrappers.
#[derive(Debug, Error)]
pub enum TmxError {
    #[error("unsupported compression format: {0:?}")]
    UnsupportedCompression(String),

    #[error("unsupported encoding: {0:?}")]
    UnsupportedEncoding(String),

    #[error("malformed tile id {token:?}: {source}")]
    MalformedInteger {
        token: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("layer payload is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("error decoding base64 data: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("error decompressing layer data: {0}")]
    Decompression(#[source] std::io::Error),

    #[error("invalid base64 data length: {0} is not a multiple of 4")]
    InvalidPayloadLength(usize),

    #[error("property {name:?} has non-integer value {value:?}")]
    InvalidIntegerProperty {
        name: String,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("property {name:?} is type {actual}, not {expected}")]
    PropertyTypeMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("unknown map orientation {0:?}")]
    UnknownOrientation(String),

    #[error("unknown render order {0:?}")]
    UnknownRenderOrder(String),

    #[error("invalid value {value:?} for attribute {attribute:?} on <{element}>")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
    },

    #[error("layer data holds {actual} tiles, expected {width}x{height}")]
    LayerSizeMismatch {
        width: u32,
        height: u32,
        actual: usize,
    },

    #[error("layer dimension mismatch: {}x{} vs {}x{}", .a.0, .a.1, .b.0, .b.1)]
    DimensionMismatch { a: (u32, u32), b: (u32, u32) },

    #[error("no layer with id {0}")]
    LayerNotFound(i32),

    #[error("no tileset named {0:?}")]
    TilesetNotFound(String),

    #[error("error reading XML: {0}")]
    Xml(#[from] xml::reader::Error),

    #[error("malformed document: {0}")]
    DocumentParse(String),

    #[error("unable to read {path:?}: {source}")]
    ResourceAcquisition {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid map property: {source}")]
    MapProperties {
        #[source]
        source: Box<TmxError>,
    },

    #[error("unable to decode layer {name:?}: {source}")]
    Layer {
        name: String,
        #[source]
        source: Box<TmxError>,
    },

    #[error("unable to load tileset {source_path:?}: {source}")]
    Tileset {
        source_path: String,
        #[source]
        source: Box<TmxError>,
    },
}

impl TmxError {
    /// Strips [`TmxError::MapProperties`], [`TmxError::Layer`] and
    /// [`TmxError::Tileset`] context and returns the failure underneath.
    pub fn root_cause(&self) -> &TmxError {
        match self {
            TmxError::MapProperties { source }
            | TmxError::Layer { source, .. }
            | TmxError::Tileset { source, .. } => source.root_cause(),
            other => other,
        }
    }

    pub(crate) fn in_map_properties(self) -> Self {
        TmxError::MapProperties {
            source: Box::new(self),
        }
    }

    pub(crate) fn in_layer(self, name: &str) -> Self {
        TmxError::Layer {
            name: name.to_string(),
            source: Box::new(self),
        }
    }

    pub(crate) fn in_tileset(self, source_path: &str) -> Self {
        TmxError::Tileset {
            source_path: source_path.to_string(),
            source: Box::new(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_cause_unwraps_nested_context() {
        let err = TmxError::UnsupportedEncoding("xml".into())
            .in_layer("Ground")
            .in_tileset("terrain.tsx");

        assert!(matches!(err.root_cause(), TmxError::UnsupportedEncoding(e) if e == "xml"));
    }

    #[test]
    fn test_context_shows_in_message() {
        let err = TmxError::InvalidPayloadLength(7).in_layer("Walls");
        let message = err.to_string();

        assert!(message.contains("\"Walls\""));
        assert!(message.contains("multiple of 4"));
    }
}
