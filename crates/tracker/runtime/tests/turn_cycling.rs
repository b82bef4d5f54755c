use tokio::sync::broadcast::Receiver;
use tracker_core::{Direction, ParticipantId, ParticipantUpdate, PartyMember, StateUpdate, UpdateFields};
use tracker_runtime::{TrackerConfig, TrackerSession};

fn party() -> Vec<PartyMember> {
    vec![
        PartyMember::new("Xan", 20, 15, 0),
        PartyMember::new("Yara", 18, 13, 0),
        PartyMember::new("Zed", 25, 17, 0),
    ]
}

fn drain(receiver: &mut Receiver<StateUpdate>) -> Vec<StateUpdate> {
    let mut updates = Vec::new();
    while let Ok(update) = receiver.try_recv() {
        updates.push(update);
    }
    updates
}

/// Session with three enabled participants ordered [Xan, Yara, Zed].
fn seeded_session() -> (TrackerSession, Vec<ParticipantId>) {
    let mut session = TrackerSession::with_seed(TrackerConfig::default(), 11);
    let ids = session.add_participants(&party());
    for (id, initiative) in ids.iter().zip([30, 20, 10]) {
        session
            .update_participant(*id, &[ParticipantUpdate::SetInitiative(initiative)])
            .unwrap();
    }
    (session, ids)
}

#[test]
fn every_mutation_publishes_exactly_one_update() {
    let (mut session, ids) = seeded_session();
    let mut receiver = session.subscribe();

    session.advance(Direction::Next);
    assert_eq!(drain(&mut receiver).len(), 1);

    session.toggle_running();
    assert_eq!(drain(&mut receiver).len(), 1);

    session
        .update_participant(ids[0], &[ParticipantUpdate::AdjustHp(-3)])
        .unwrap();
    assert_eq!(drain(&mut receiver).len(), 1);

    session.set_enabled(ids[1], false).unwrap();
    assert_eq!(drain(&mut receiver).len(), 1);

    session.remove_participants(&[ids[2]]);
    assert_eq!(drain(&mut receiver).len(), 1);

    session.reset_encounter();
    assert_eq!(drain(&mut receiver).len(), 1);
}

#[test]
fn updates_carry_the_expected_field_masks() {
    let (mut session, ids) = seeded_session();
    let mut receiver = session.subscribe();

    session.advance(Direction::Next);
    let update = drain(&mut receiver).pop().unwrap();
    assert_eq!(update.fields, UpdateFields::CURRENT | UpdateFields::RUNNING);
    assert!(update.order.is_empty());

    session
        .update_participant(ids[0], &[ParticipantUpdate::SetAc(18)])
        .unwrap();
    let update = drain(&mut receiver).pop().unwrap();
    assert_eq!(update.fields, UpdateFields::ORDER);
    assert_eq!(update.order.len(), 3);

    session.set_enabled(ids[0], false).unwrap();
    let update = drain(&mut receiver).pop().unwrap();
    assert_eq!(update.fields, UpdateFields::ORDER | UpdateFields::CURRENT);
}

#[test]
fn cycling_visits_only_enabled_participants_in_both_directions() {
    let (mut session, ids) = seeded_session();
    session.set_enabled(ids[1], false).unwrap();
    session.toggle_running();
    assert_eq!(session.state().turn.current, Some(ids[0]));

    session.advance(Direction::Next);
    assert_eq!(session.state().turn.current, Some(ids[2]));

    session.advance(Direction::Next);
    assert_eq!(session.state().turn.current, Some(ids[0]));

    session.advance(Direction::Previous);
    assert_eq!(session.state().turn.current, Some(ids[2]));
}

#[test]
fn disabling_around_the_pointer_matches_the_handoff_rules() {
    // [X, Y, Z], current = X: disabling Y keeps X; disabling X then lands on
    // Z because Y is already out.
    let (mut session, ids) = seeded_session();
    session.toggle_running();
    assert_eq!(session.state().turn.current, Some(ids[0]));

    session.set_enabled(ids[1], false).unwrap();
    assert_eq!(session.state().turn.current, Some(ids[0]));

    session.set_enabled(ids[0], false).unwrap();
    assert_eq!(session.state().turn.current, Some(ids[2]));

    session.set_enabled(ids[2], false).unwrap();
    assert_eq!(session.state().turn.current, None);
}

#[test]
fn initiative_edits_move_position_but_not_the_pointer_identity() {
    let (mut session, ids) = seeded_session();
    session.toggle_running();
    assert_eq!(session.state().current_position(), Some(0));

    // Dropping the leader to the bottom: pointer follows the participant,
    // not ordered-view slot 0.
    session
        .update_participant(ids[0], &[ParticipantUpdate::SetInitiative(1)])
        .unwrap();

    assert_eq!(session.state().turn.current, Some(ids[0]));
    assert_eq!(session.state().current_position(), Some(2));
}

#[test]
fn stale_participant_references_are_rejected() {
    let (mut session, ids) = seeded_session();
    session.remove_participants(&[ids[0]]);

    let result = session.update_participant(ids[0], &[ParticipantUpdate::AdjustHp(1)]);

    assert!(result.is_err());
}
