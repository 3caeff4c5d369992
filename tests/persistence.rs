use anyhow::Result;
use camino::Utf8PathBuf;
use tempfile::TempDir;
use vstrips::catalog::AirwayCatalog;
use vstrips::feed::StaticFeed;
use vstrips::lanes::LaneState;
use vstrips::model::{BoardMode, Flight, OceanicFlight};
use vstrips::registry::FlightRegistry;
use vstrips::session::Session;
use vstrips::store::{FileStore, KeyValueStore, MemoryStore, ORDERS_KEY, POSITIONS_KEY};

fn store_path(dir: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().join("state").join("board.json"))
        .expect("temp dir is UTF-8")
}

#[test]
fn missing_file_opens_empty() -> Result<()> {
    let dir = TempDir::new()?;
    let store = FileStore::open(store_path(&dir))?;
    assert_eq!(store.get(POSITIONS_KEY), None);
    assert!(!store.path().exists());
    Ok(())
}

#[test]
fn set_writes_through_and_reopens() -> Result<()> {
    let dir = TempDir::new()?;
    let path = store_path(&dir);
    let mut store = FileStore::open(&path)?;
    store.set("k", "v".to_string())?;
    assert!(path.exists());
    let reopened = FileStore::open(&path)?;
    assert_eq!(reopened.get("k").as_deref(), Some("v"));
    Ok(())
}

#[test]
fn malformed_file_opens_empty() -> Result<()> {
    let dir = TempDir::new()?;
    let path = store_path(&dir);
    std::fs::create_dir_all(path.parent().unwrap())?;
    std::fs::write(&path, "{ not json")?;
    let store = FileStore::open(&path)?;
    assert_eq!(store.get(ORDERS_KEY), None);
    Ok(())
}

#[test]
fn unreadable_values_load_as_empty_maps() -> Result<()> {
    let mut store = MemoryStore::new();
    store.set(POSITIONS_KEY, "[1, 2".to_string())?;
    store.set(ORDERS_KEY, r#"{"cruise": ["BAW1"]}"#.to_string())?;
    let lanes = LaneState::load(BoardMode::Oceanic, &store);
    assert!(lanes.positions().is_empty());
    assert_eq!(lanes.orders()["cruise"], vec!["BAW1"]);
    Ok(())
}

#[test]
fn persisted_values_use_plain_json_maps() -> Result<()> {
    let mut lanes = LaneState::new(BoardMode::Oceanic);
    lanes.assign("BAW1", "cruise");
    let mut store = MemoryStore::new();
    lanes.persist(&mut store)?;
    assert_eq!(store.get(POSITIONS_KEY).as_deref(), Some(r#"{"BAW1":"cruise"}"#));
    assert_eq!(store.get(ORDERS_KEY).as_deref(), Some("{}"));
    Ok(())
}

#[test]
fn board_layout_survives_a_restart() -> Result<()> {
    let dir = TempDir::new()?;
    let path = store_path(&dir);

    let mut session = Session::open(
        BoardMode::Oceanic,
        AirwayCatalog::new(),
        FileStore::open(&path)?,
        StaticFeed::default(),
    );
    for cs in ["BAW1", "AAL2", "UAL3"] {
        session.add_oceanic(cs)?;
    }
    session.drag_start("UAL3");
    session.drag_over("exit", 0.0);
    session.drop_on("exit")?;
    session.drag_end()?;
    session.drag_start("AAL2");
    session.drag_over("planned", 0.0);
    session.drag_end()?;
    let before = session.board().layout();

    // Flights themselves are not stored, so rebuild the registry by hand.
    let mut registry = FlightRegistry::new();
    for cs in ["BAW1", "AAL2", "UAL3"] {
        registry.insert(Flight::oceanic(cs, OceanicFlight::placeholder()));
    }
    let restored = LaneState::load(BoardMode::Oceanic, &FileStore::open(&path)?);
    let after = restored.layout(&registry);
    assert_eq!(after, before);
    assert_eq!(after["planned"], vec!["AAL2", "BAW1"]);
    assert_eq!(after["exit"], vec!["UAL3"]);
    Ok(())
}
