//! Tile layers and layer composition.

use serde::{Deserialize, Serialize};

use crate::error::TmxError;
use crate::properties::CustomProperties;

/// A decoded tile layer.
///
/// `data` holds one global tile id per cell in row-major order and always has
/// exactly `width * height` entries. A gid of `0` is an empty cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    pub id: i32,
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u32>,
    pub properties: CustomProperties,
}

impl Layer {
    /// Build a layer, checking that `data` covers the grid exactly.
    pub fn new(
        id: i32,
        name: impl Into<String>,
        width: u32,
        height: u32,
        data: Vec<u32>,
        properties: CustomProperties,
    ) -> Result<Self, TmxError> {
        let layer = Self {
            id,
            name: name.into(),
            width,
            height,
            data,
            properties,
        };
        layer.check_size()?;
        Ok(layer)
    }

    fn check_size(&self) -> Result<(), TmxError> {
        if self.data.len() != self.width as usize * self.height as usize {
            return Err(TmxError::LayerSizeMismatch {
                width: self.width,
                height: self.height,
                actual: self.data.len(),
            });
        }
        Ok(())
    }

    /// Gid at column `x`, row `y`, or `None` outside the layer.
    pub fn tile_at(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// True when every cell is empty.
    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|&gid| gid == 0)
    }

    /// Overlay `other` on top of `self`.
    ///
    /// Wherever `other` has a tile it wins; empty cells in `other` let `self`
    /// show through. The result keeps `self`'s id, is named `"{self} + {other}"`
    /// and has no properties.
    ///
    /// # Example
    /// ```
    /// use bevy_tmxmap_core::{CustomProperties, Layer};
    ///
    /// let base = Layer::new(1, "base", 3, 1, vec![1, 0, 3], CustomProperties::default()).unwrap();
    /// let patch = Layer::new(2, "patch", 3, 1, vec![0, 5, 0], CustomProperties::default()).unwrap();
    ///
    /// let merged = base.merge(&patch).unwrap();
    /// assert_eq!(merged.data, vec![1, 5, 3]);
    /// assert_eq!(merged.name, "base + patch");
    /// ```
    pub fn merge(&self, other: &Layer) -> Result<Layer, TmxError> {
        if self.width != other.width || self.height != other.height {
            return Err(TmxError::DimensionMismatch {
                a: (self.width, self.height),
                b: (other.width, other.height),
            });
        }
        // `data` is public, so either side may have been edited since `new`
        self.check_size()?;
        other.check_size()?;

        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&below, &above)| if above != 0 { above } else { below })
            .collect();

        Ok(Layer {
            id: self.id,
            name: format!("{} + {}", self.name, other.name),
            width: self.width,
            height: self.height,
            data,
            properties: CustomProperties::default(),
        })
    }
}
