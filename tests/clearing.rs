//! Integration tests for clearing results: retraction and downstream voiding.

use event_bracket_web::{
    apply_match_result, clear_match_result, swap_participants, Bracket, BracketError, BracketMatch,
    MatchStatus, Slot,
};

/// Two-round bracket, four seated participants, round 2 open.
fn bracket_of_four() -> Bracket {
    Bracket {
        rounds: vec![
            vec![
                BracketMatch::new(
                    1,
                    1,
                    Slot::assigned("a", "Alice"),
                    Slot::assigned("b", "Bruno"),
                    Some(3),
                ),
                BracketMatch::new(
                    2,
                    1,
                    Slot::assigned("c", "Chip"),
                    Slot::assigned("d", "Dana"),
                    Some(3),
                ),
            ],
            vec![BracketMatch::new(3, 2, Slot::Empty, Slot::Empty, None)],
        ],
    }
}

/// Three rounds where every later opponent is a bye.
fn bye_chain() -> Bracket {
    Bracket {
        rounds: vec![
            vec![
                BracketMatch::new(
                    1,
                    1,
                    Slot::assigned("a", "Alice"),
                    Slot::assigned("b", "Bruno"),
                    Some(5),
                ),
                BracketMatch::new(2, 1, Slot::Empty, Slot::Empty, Some(5)),
                BracketMatch::new(3, 1, Slot::Empty, Slot::Empty, Some(6)),
                BracketMatch::new(4, 1, Slot::Empty, Slot::Empty, Some(6)),
            ],
            vec![
                BracketMatch::new(5, 2, Slot::Empty, Slot::Bye, Some(7)),
                BracketMatch::new(6, 2, Slot::Empty, Slot::Empty, Some(7)),
            ],
            vec![BracketMatch::new(7, 3, Slot::Empty, Slot::Bye, None)],
        ],
    }
}

#[test]
fn clearing_pending_match_is_noop() {
    let mut bracket = bracket_of_four();
    let index = bracket.index();
    let before = bracket.clone();

    let voided = clear_match_result(&mut bracket, &index, 1).unwrap();
    assert!(voided.is_empty());
    assert_eq!(bracket, before);
}

#[test]
fn clearing_missing_match_rejected() {
    let mut bracket = bracket_of_four();
    let index = bracket.index();
    assert!(matches!(
        clear_match_result(&mut bracket, &index, 42),
        Err(BracketError::MatchNotFound(42))
    ));
}

#[test]
fn retraction_spares_the_sibling_occupant() {
    let mut bracket = bracket_of_four();
    let index = bracket.index();
    apply_match_result(&mut bracket, &index, 1, "a").unwrap();
    apply_match_result(&mut bracket, &index, 2, "c").unwrap();

    let voided = clear_match_result(&mut bracket, &index, 1).unwrap();
    assert_eq!(voided, vec![1]);

    let m1 = &bracket.rounds[0][0];
    assert_eq!(m1.winner_id, None);
    assert_eq!(m1.status, MatchStatus::Pending);

    let m3 = &bracket.rounds[1][0];
    assert!(m3.slot1.is_empty());
    assert!(m3.slot2.holds("c"));
}

#[test]
fn voiding_decided_downstream_match_either_side() {
    // Chip wins the final; retracting Alice (the loser's feeder result) must
    // still void the final, because one of its participants is gone.
    let mut bracket = bracket_of_four();
    let index = bracket.index();
    apply_match_result(&mut bracket, &index, 1, "a").unwrap();
    apply_match_result(&mut bracket, &index, 2, "c").unwrap();
    apply_match_result(&mut bracket, &index, 3, "c").unwrap();
    assert!(bracket.is_complete());

    let voided = clear_match_result(&mut bracket, &index, 1).unwrap();
    assert_eq!(voided, vec![1, 3]);

    let m3 = &bracket.rounds[1][0];
    assert!(m3.slot1.is_empty());
    assert!(m3.slot2.holds("c"));
    assert_eq!(m3.winner_id, None);
    assert_eq!(m3.status, MatchStatus::Pending);
    assert!(!bracket.is_complete());
}

#[test]
fn clearing_unwinds_bye_chain() {
    let mut bracket = bye_chain();
    let index = bracket.index();
    let pristine = bracket.clone();

    apply_match_result(&mut bracket, &index, 1, "a").unwrap();
    assert!(bracket.is_complete());

    let voided = clear_match_result(&mut bracket, &index, 1).unwrap();
    assert_eq!(voided, vec![1, 5, 7]);
    assert_eq!(bracket, pristine);
}

#[test]
fn cleared_match_accepts_new_result() {
    let mut bracket = bracket_of_four();
    let index = bracket.index();
    apply_match_result(&mut bracket, &index, 1, "a").unwrap();
    clear_match_result(&mut bracket, &index, 1).unwrap();

    apply_match_result(&mut bracket, &index, 1, "b").unwrap();
    let m3 = &bracket.rounds[1][0];
    assert!(m3.slot1.holds("b"));
}

#[test]
fn swap_flips_undecided_slots_only() {
    let mut bracket = bracket_of_four();
    let index = bracket.index();

    swap_participants(&mut bracket, &index, 1).unwrap();
    let m1 = &bracket.rounds[0][0];
    assert!(m1.slot1.holds("b"));
    assert!(m1.slot2.holds("a"));

    apply_match_result(&mut bracket, &index, 2, "c").unwrap();
    assert!(matches!(
        swap_participants(&mut bracket, &index, 2),
        Err(BracketError::MatchAlreadyDecided(2))
    ));
    assert!(matches!(
        swap_participants(&mut bracket, &index, 9),
        Err(BracketError::MatchNotFound(9))
    ));
}
