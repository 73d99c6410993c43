use bevy::{
    asset::{AssetLoader, LoadContext, io::Reader},
    prelude::*,
    tasks::ConditionalSendFuture,
};
use bevy_tmxmap_core::{TmxError, load_tileset_from_bytes};
use thiserror::Error;

use crate::assets::tileset::TmxTilesetAsset;

/// Asset loader for standalone Tiled tilesets (.tsx files)
#[derive(Default)]
pub struct TmxTilesetAssetLoader;

#[derive(Debug, Error)]
pub enum TilesetLoaderError {
    #[error("Failed to load tileset: {0}")]
    Tmx(#[from] TmxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AssetLoader for TmxTilesetAssetLoader {
    type Asset = TmxTilesetAsset;
    type Settings = ();
    type Error = TilesetLoaderError;

    fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        load_context: &mut LoadContext,
    ) -> impl ConditionalSendFuture<Output = Result<Self::Asset, Self::Error>> {
        async move {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes).await?;

            let tileset = load_tileset_from_bytes(&bytes)?;
            debug!(
                "Loaded tileset {:?} from {}",
                tileset.name,
                load_context.asset_path()
            );

            Ok(TmxTilesetAsset { tileset })
        }
    }

    fn extensions(&self) -> &[&str] {
        &["tsx"]
    }
}
