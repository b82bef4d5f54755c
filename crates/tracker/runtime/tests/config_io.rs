use std::io::Write;

use tracker_core::{Condition, ParticipantUpdate, PartyMember};
use tracker_runtime::{TrackerConfig, TrackerSession};

#[test]
fn defaults_carry_a_formula_and_a_condition_vocabulary() {
    let config = TrackerConfig::default();

    assert_eq!(config.initiative, "1d20 + %mod%");
    assert!(config.party.is_empty());
    assert!(config.conditions.contains(&Condition::new("Prone")));
    assert!(config.conditions.contains(&Condition::new("Unconscious")));
    assert_eq!(config.engine.initiative_die, 20);
}

#[test]
fn loads_a_full_config_from_ron() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"(
    initiative: "1d20 + %mod%",
    party: [
        (name: "Thorin", max_hp: 24, ac: 16, modifier: 2),
        (name: "Mira", max_hp: 18, ac: 14, modifier: -1),
    ],
    conditions: ["Poisoned", "Prone"],
    engine: (initiative_die: 20),
)"#
    )
    .unwrap();

    let config = TrackerConfig::load_from_file(file.path()).unwrap();

    assert_eq!(config.party.len(), 2);
    assert_eq!(config.party[0], PartyMember::new("Thorin", 24, 16, 2));
    assert_eq!(config.conditions.len(), 2);
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"(
    party: [
        (name: "Solo", max_hp: 10, ac: 10, modifier: 0),
    ],
)"#
    )
    .unwrap();

    let config = TrackerConfig::load_from_file(file.path()).unwrap();

    assert_eq!(config.initiative, TrackerConfig::DEFAULT_INITIATIVE_FORMULA);
    assert!(!config.conditions.is_empty());
    assert_eq!(config.engine.initiative_die, 20);
}

#[test]
fn unreadable_or_malformed_files_report_invalid_config() {
    let missing = TrackerConfig::load_from_file(std::path::Path::new("/nonexistent/tracker.ron"));
    assert!(missing.is_err());

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not ron at all").unwrap();
    let malformed = TrackerConfig::load_from_file(file.path());
    assert!(malformed.is_err());
}

#[test]
fn state_updates_serialize_for_sink_consumers() {
    let mut session = TrackerSession::with_seed(
        TrackerConfig::default().with_party(vec![PartyMember::new("Thorin", 24, 16, 2)]),
        1,
    );
    let ids = session.add_participants(&[PartyMember::new("Goblin", 7, 15, 1)]);
    let mut receiver = session.subscribe();
    session
        .update_participant(ids[0], &[ParticipantUpdate::SetInitiative(12)])
        .unwrap();

    let update = receiver.try_recv().unwrap();
    let payload = serde_json::to_string(&update).unwrap();

    assert!(payload.contains("Goblin"));
    assert!(payload.contains("12"));
}
