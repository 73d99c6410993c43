pub mod map;
pub mod tileset;
