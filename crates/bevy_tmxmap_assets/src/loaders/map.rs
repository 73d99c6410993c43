use bevy::{
    asset::{AssetLoader, LoadContext, ReadAssetBytesError, io::Reader},
    prelude::*,
    tasks::ConditionalSendFuture,
};
use bevy_tmxmap_core::{MemoryReader, TmxError, assemble, document::RawTilesetEntry, parse_map_document};
use thiserror::Error;

use crate::assets::{
    map::{TilesetReference, TmxMapAsset},
    tileset::TmxTilesetAsset,
};
use crate::loaders::resolve_relative_path;

/// Asset loader for Tiled maps (.tmx files)
///
/// External tilesets are read through the asset server before assembly, so
/// they resolve against the map's own directory and take part in hot reload.
/// Each one is also loaded as a [`TmxTilesetAsset`] dependency.
#[derive(Default)]
pub struct TmxMapAssetLoader;

#[derive(Debug, Error)]
pub enum MapLoaderError {
    #[error("Failed to load map: {0}")]
    Tmx(#[from] TmxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read tileset: {0}")]
    ReadTileset(#[from] ReadAssetBytesError),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

impl AssetLoader for TmxMapAssetLoader {
    type Asset = TmxMapAsset;
    type Settings = ();
    type Error = MapLoaderError;

    fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        load_context: &mut LoadContext,
    ) -> impl ConditionalSendFuture<Output = Result<Self::Asset, Self::Error>> {
        async move {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes).await?;

            // 1. Parse the document only; nothing is decoded yet
            let doc = parse_map_document(&bytes)?;

            // 2. Prefetch every external tileset, keyed by the path the map uses
            let mut prefetched = MemoryReader::new();
            let mut tilesets = Vec::new();
            for entry in &doc.tilesets {
                let RawTilesetEntry::External { first_gid, source } = entry else {
                    continue;
                };
                let asset_path = resolve_relative_path(load_context.path(), source)
                    .ok_or_else(|| {
                        MapLoaderError::InvalidPath(format!(
                            "tileset {source:?} referenced from {:?} is outside the asset root",
                            load_context.path()
                        ))
                    })?;

                let tileset_bytes = load_context.read_asset_bytes(asset_path.clone()).await?;
                prefetched.insert(source.as_str(), tileset_bytes);

                let handle: Handle<TmxTilesetAsset> = load_context.load(asset_path);
                tilesets.push(TilesetReference {
                    handle,
                    first_gid: *first_gid,
                });
            }

            // 3. Run the synchronous pipeline against the prefetched bytes
            let map = assemble(doc, &prefetched)?;

            info!(
                "Loaded map {}: {}x{} tiles, {} layers, {} tilesets",
                load_context.asset_path(),
                map.properties.width,
                map.properties.height,
                map.layers.len(),
                map.tilesets.len()
            );

            Ok(TmxMapAsset { map, tilesets })
        }
    }

    fn extensions(&self) -> &[&str] {
        &["tmx"]
    }
}
