use std::fs;

use bevy_tmxmap_core::{TmxError, load_map, load_tileset};

const TMX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<map version="1.10" tiledversion="1.10.2" orientation="orthogonal" renderorder="right-down" width="3" height="1" tilewidth="16" tileheight="16" infinite="0">
 <tileset firstgid="1" source="../tilesets/dungeon.tsx"/>
 <layer id="1" name="Floor" width="3" height="1">
  <data encoding="csv">1,1,2</data>
 </layer>
 <layer id="2" name="Props" width="3" height="1">
  <properties>
   <property name="parallax" type="float" value="0.5"/>
  </properties>
  <data encoding="csv">0,4,0</data>
 </layer>
</map>
"#;

const TSX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<tileset version="1.10" tiledversion="1.10.2" name="dungeon" tilewidth="16" tileheight="16" tilecount="4" columns="2">
 <image source="dungeon.png" width="32" height="32"/>
 <tile id="3">
  <properties>
   <property name="breakable" type="bool" value="true"/>
  </properties>
 </tile>
</tileset>
"#;

fn write_fixture(root: &std::path::Path) -> std::path::PathBuf {
    fs::create_dir_all(root.join("maps")).unwrap();
    fs::create_dir_all(root.join("tilesets")).unwrap();
    fs::write(root.join("maps/level1.tmx"), TMX).unwrap();
    fs::write(root.join("tilesets/dungeon.tsx"), TSX).unwrap();
    root.join("maps/level1.tmx")
}

#[test]
fn test_load_map_resolves_relative_tileset() {
    let dir = tempfile::tempdir().unwrap();
    let map_path = write_fixture(dir.path());

    let map = load_map(&map_path).unwrap();

    assert_eq!(map.tilesets.len(), 1);
    assert_eq!(map.tilesets[0].name, "dungeon");
    assert_eq!(map.tilesets[0].first_gid, 1);
    assert_eq!(map.tilesets[0].source, "../tilesets/dungeon.tsx");
    assert!(map.tilesets[0].tile(3).unwrap().properties.get_bool("breakable", false));

    let merged = map.layers_by_name("Floor")[0]
        .merge(map.layers_by_name("Props")[0])
        .unwrap();
    assert_eq!(merged.data, vec![1, 4, 2]);
    assert_eq!(merged.name, "Floor + Props");
}

#[test]
fn test_load_map_reports_missing_tileset() {
    let dir = tempfile::tempdir().unwrap();
    let map_path = write_fixture(dir.path());
    fs::remove_file(dir.path().join("tilesets/dungeon.tsx")).unwrap();

    let err = load_map(&map_path).unwrap_err();
    assert!(matches!(
        err,
        TmxError::Tileset { ref source_path, .. } if source_path == "../tilesets/dungeon.tsx"
    ));
}

#[test]
fn test_load_map_missing_file() {
    let err = load_map("does/not/exist.tmx").unwrap_err();
    assert!(matches!(err, TmxError::ResourceAcquisition { .. }));
}

#[test]
fn test_load_tileset_file() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());

    let tileset = load_tileset(dir.path().join("tilesets/dungeon.tsx")).unwrap();
    assert_eq!(tileset.first_gid, 0);
    assert_eq!(tileset.image.unwrap().source, "dungeon.png");
}

#[test]
fn test_load_map_from_relative_path_climbs_out_of_map_dir() {
    let dir = tempfile::tempdir().unwrap();
    let tmx = TMX.replace("../tilesets/dungeon.tsx", "../shared/dungeon.tsx");
    let decoy = TSX.replace("name=\"dungeon\"", "name=\"decoy\"");
    fs::create_dir_all(dir.path().join("maps/shared")).unwrap();
    fs::create_dir_all(dir.path().join("shared")).unwrap();
    fs::write(dir.path().join("maps/level.tmx"), tmx).unwrap();
    fs::write(dir.path().join("shared/dungeon.tsx"), TSX).unwrap();
    fs::write(dir.path().join("maps/shared/dungeon.tsx"), decoy).unwrap();

    // The map is named without a directory, so its base dir is ""
    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path().join("maps")).unwrap();
    let result = load_map("level.tmx");
    std::env::set_current_dir(previous).unwrap();

    assert_eq!(result.unwrap().tilesets[0].name, "dungeon");
}
