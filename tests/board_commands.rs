use anyhow::{Result, anyhow};
use vstrips::board::Board;
use vstrips::catalog::AirwayCatalog;
use vstrips::commands::{Command, Effect};
use vstrips::feed::{FlightFeed, PilotRecord, StaticFeed};
use vstrips::lanes::LaneState;
use vstrips::model::BoardMode;
use vstrips::strip::StripBody;

const FEED: &str = r#"{
    "pilots": [
        {"callsign": "BAW1", "transponder": "2201",
         "flight_plan": {"departure": "EGLL", "arrival": "KJFK", "altitude": "F360",
                         "route": "EGLL D NATA X KJFK"}},
        {"callsign": "AAL2", "flight_plan": {"route": "KJFK DCT EGLL"}},
        {"callsign": "UAL3", "flight_plan": {"route": ""}}
    ]
}"#;

struct DownFeed;

impl FlightFeed for DownFeed {
    fn lookup(&mut self, _callsign: &str) -> Result<Option<PilotRecord>> {
        Err(anyhow!("feed timed out"))
    }
}

fn catalog() -> AirwayCatalog {
    AirwayCatalog::from_entries([("NATA", vec!["A", "B", "C", "D", "E", "F"])])
}

fn board() -> Board {
    Board::new(catalog(), LaneState::new(BoardMode::Oceanic))
}

fn feed() -> StaticFeed {
    StaticFeed::from_json_str(FEED).unwrap()
}

/// Mimic the session: render when asked.
fn settle(board: &mut Board, effects: &[Effect]) {
    if effects.contains(&Effect::Render) {
        board.render();
    }
}

fn lane(board: &Board, lane: &str) -> Vec<String> {
    board.view().lane(lane).to_vec()
}

#[test]
fn new_strips_land_at_the_end_of_the_first_lane() -> Result<()> {
    let mut board = board();
    let mut feed = feed();
    for cs in ["BAW1", "AAL2", "UAL3"] {
        let effects = board.add_oceanic(cs, &mut feed)?;
        assert_eq!(effects, vec![Effect::Persist, Effect::Render]);
        settle(&mut board, &effects);
    }
    assert_eq!(lane(&board, "planned"), vec!["BAW1", "AAL2", "UAL3"]);
    assert_eq!(board.lanes().position("AAL2"), Some("planned"));
    Ok(())
}

#[test]
fn snapshot_on_add_precedes_the_new_strip() -> Result<()> {
    let mut board = board();
    let mut feed = feed();
    let effects = board.add_oceanic("BAW1", &mut feed)?;
    // Orders are taken from the view before the new strip is rendered.
    assert!(board.lanes().orders()["planned"].is_empty());
    settle(&mut board, &effects);
    assert_eq!(lane(&board, "planned"), vec!["BAW1"]);
    Ok(())
}

#[test]
fn duplicate_add_has_no_effects() -> Result<()> {
    let mut board = board();
    let mut feed = feed();
    let effects = board.add_oceanic("BAW1", &mut feed)?;
    settle(&mut board, &effects);
    assert!(board.add_oceanic("baw1", &mut feed)?.is_empty());
    assert!(board.add_oceanic("", &mut feed)?.is_empty());
    assert_eq!(board.registry().len(), 1);
    Ok(())
}

#[test]
fn failed_lookup_leaves_board_unchanged() {
    let mut board = board();
    assert!(board.add_oceanic("BAW1", &mut DownFeed).is_err());
    assert!(board.registry().is_empty());
    assert!(board.lanes().positions().is_empty());
    assert!(board.view().lane("planned").is_empty());
}

#[test]
fn oceanic_strip_gets_reversed_waypoint_columns() -> Result<()> {
    let mut board = board();
    let effects = board.add_oceanic("BAW1", &mut feed())?;
    settle(&mut board, &effects);
    let fixes = board.fixes("BAW1").unwrap();
    assert_eq!(fixes.primary_airway(), Some("NATA"));
    assert_eq!(fixes.values(), vec!["F", "E", "D", "C", "B", "A"]);

    let lanes = board.strip_layouts();
    let strip = &lanes[0].strips[0];
    match &strip.body {
        StripBody::Oceanic {
            dep,
            registration,
            cruise_placeholder,
            primary_airway,
            ..
        } => {
            assert_eq!(dep, "EGLL");
            assert_eq!(registration, "----");
            assert_eq!(cruise_placeholder, "F36");
            assert_eq!(primary_airway.as_deref(), Some("NATA"));
        }
        StripBody::Custom { .. } => panic!("expected oceanic strip"),
    }
    Ok(())
}

#[test]
fn delete_cascades_and_is_idempotent() -> Result<()> {
    let mut board = board();
    let mut feed = feed();
    for cs in ["BAW1", "AAL2"] {
        let effects = board.add_oceanic(cs, &mut feed)?;
        settle(&mut board, &effects);
    }
    board.reorder("BAW1", "cruise", 0);
    assert_eq!(board.lanes().orders()["cruise"], vec!["BAW1"]);

    assert_eq!(board.delete_flight("BAW1"), vec![Effect::Persist]);
    assert!(!board.registry().contains("BAW1"));
    assert_eq!(board.lanes().position("BAW1"), None);
    assert!(
        board
            .lanes()
            .orders()
            .values()
            .all(|order| !order.iter().any(|cs| cs == "BAW1"))
    );
    assert!(!board.view().contains("BAW1"));
    assert!(board.fixes("BAW1").is_none());

    assert!(board.delete_flight("BAW1").is_empty());
    assert_eq!(lane(&board, "planned"), vec!["AAL2"]);
    Ok(())
}

#[test]
fn reorder_moves_within_and_across_lanes() -> Result<()> {
    let mut board = board();
    let mut feed = feed();
    for cs in ["BAW1", "AAL2", "UAL3"] {
        let effects = board.add_oceanic(cs, &mut feed)?;
        settle(&mut board, &effects);
    }
    assert_eq!(board.reorder("UAL3", "planned", 0), vec![Effect::Persist]);
    assert_eq!(board.lanes().orders()["planned"], vec!["UAL3", "BAW1", "AAL2"]);

    board.reassign_lane("BAW1", "exit");
    assert_eq!(board.lanes().position("BAW1"), Some("exit"));
    assert_eq!(board.lanes().orders()["exit"], vec!["BAW1"]);
    assert_eq!(board.lanes().orders()["planned"], vec!["UAL3", "AAL2"]);

    // Layout agrees with the view after a reorder.
    board.render();
    assert_eq!(lane(&board, "planned"), vec!["UAL3", "AAL2"]);
    assert_eq!(lane(&board, "exit"), vec!["BAW1"]);
    Ok(())
}

#[test]
fn reorder_ignores_unknown_strips_and_lanes() -> Result<()> {
    let mut board = board();
    let effects = board.add_oceanic("BAW1", &mut feed())?;
    settle(&mut board, &effects);
    assert!(board.reorder("NOPE", "cruise", 0).is_empty());
    assert!(board.reorder("BAW1", "ground", 0).is_empty());
    assert_eq!(board.lanes().position("BAW1"), Some("planned"));
    Ok(())
}

#[test]
fn editing_fixes_extends_once() -> Result<()> {
    let mut board = board();
    let mut feed = feed();
    let effects = board.add_oceanic("AAL2", &mut feed)?;
    settle(&mut board, &effects);
    assert!(board.edit_level("AAL2", "F350")?.is_empty());
    for col in 0..3 {
        assert!(board.edit_fix("AAL2", col, "X")?.is_empty());
    }
    assert_eq!(board.edit_fix("AAL2", 3, "Y")?, vec![Effect::Render]);
    assert!(board.edit_fix("AAL2", 3, "Z")?.is_empty());
    assert!(board.edit_fix("AAL2", 4, "W")?.is_empty());
    assert_eq!(board.fixes("AAL2").unwrap().len(), 5);
    assert!(board.edit_fix("NOPE", 0, "X").is_err());
    Ok(())
}

#[test]
fn level_box_gates_the_extension_column() -> Result<()> {
    let mut board = board();
    let effects = board.add_oceanic("AAL2", &mut feed())?;
    settle(&mut board, &effects);
    for col in 0..4 {
        assert!(board.edit_fix("AAL2", col, "X")?.is_empty());
    }
    assert_eq!(board.fixes("AAL2").unwrap().len(), 4);

    let effects = board.apply(
        Command::EditLevel {
            callsign: "AAL2".into(),
            value: "F370".into(),
        },
        &mut feed(),
    )?;
    assert_eq!(effects, vec![Effect::Render]);
    settle(&mut board, &effects);
    assert_eq!(board.fixes("AAL2").unwrap().len(), 5);

    let lanes = board.strip_layouts();
    match &lanes[0].strips[0].body {
        StripBody::Oceanic { level, .. } => assert_eq!(level, "F370"),
        StripBody::Custom { .. } => panic!("expected oceanic strip"),
    }
    Ok(())
}

#[test]
fn custom_strips_have_no_fix_columns() -> Result<()> {
    let mut board = board();
    let effects = board.add_custom("SPEED RESTRICTION M082", 42)?;
    assert_eq!(effects, vec![Effect::Persist, Effect::Render]);
    settle(&mut board, &effects);
    assert_eq!(lane(&board, "planned"), vec!["CUSTOM-42"]);
    assert!(board.fixes("CUSTOM-42").is_none());
    assert!(board.edit_level("CUSTOM-42", "F350").is_err());
    assert!(board.add_custom("   ", 43)?.is_empty());
    Ok(())
}

#[test]
fn apply_dispatches_commands() -> Result<()> {
    let mut board = board();
    let mut feed = feed();
    let effects = board.apply(
        Command::AddOceanic {
            callsign: "UAL3".into(),
        },
        &mut feed,
    )?;
    settle(&mut board, &effects);
    let effects = board.apply(
        Command::ReassignLane {
            callsign: "UAL3".into(),
            lane: "cruise".into(),
        },
        &mut feed,
    )?;
    assert_eq!(effects, vec![Effect::Persist]);
    assert_eq!(lane(&board, "cruise"), vec!["UAL3"]);
    let effects = board.apply(
        Command::AddCustom {
            text: "CHECK WX".into(),
        },
        &mut feed,
    )?;
    settle(&mut board, &effects);
    assert_eq!(board.registry().len(), 2);
    Ok(())
}
