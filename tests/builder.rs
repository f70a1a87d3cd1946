//! Integration tests for bracket generation: shape, byes, placeholders.

use event_bracket_web::{generate_bracket, BracketError, MatchStatus, Participant};

fn participants(n: usize) -> Vec<Participant> {
    (0..n)
        .map(|i| Participant::new(format!("p{i}"), format!("Player {i}")))
        .collect()
}

#[test]
fn generation_requires_participants() {
    assert!(matches!(
        generate_bracket(&[], 0),
        Err(BracketError::NoParticipants)
    ));
}

#[test]
fn two_participants_single_final() {
    let bracket = generate_bracket(&participants(2), 0).unwrap();
    bracket.validate().unwrap();
    assert_eq!(bracket.num_rounds(), 1);
    assert_eq!(bracket.total_matches(), 1);
    let m = &bracket.rounds[0][0];
    assert_eq!(m.id, 1);
    assert_eq!(m.next_match_id, None);
    assert!(m.slot1.participant_id().is_some());
    assert!(m.slot2.participant_id().is_some());
    assert_eq!(m.status, MatchStatus::Pending);
    assert!(!bracket.is_complete());
}

#[test]
fn perfect_eight_structure() {
    let bracket = generate_bracket(&participants(8), 0).unwrap();
    bracket.validate().unwrap();
    assert_eq!(bracket.num_rounds(), 3);
    assert_eq!(bracket.total_matches(), 7);
    let sizes: Vec<usize> = bracket.rounds.iter().map(|r| r.len()).collect();
    assert_eq!(sizes, vec![4, 2, 1]);
    for (i, m) in bracket.rounds[0].iter().enumerate() {
        assert_eq!(m.next_match_id, Some(5 + i as u32 / 2));
        assert!(m.slot1.participant_id().is_some());
        assert!(m.slot2.participant_id().is_some());
        assert!(!m.is_decided());
    }
    for (i, m) in bracket.rounds[1].iter().enumerate() {
        assert_eq!(m.next_match_id, Some(7 + i as u32 / 2));
        assert!(m.slot1.is_empty());
        assert!(m.slot2.is_empty());
    }
    assert_eq!(bracket.rounds[2][0].next_match_id, None);
}

#[test]
fn five_participants_shape() {
    // Effective size 8: 3 rounds, 7 matches, and 3 of the 8 first-round
    // slots carry no participant (one bye plus one placeholder pair).
    let bracket = generate_bracket(&participants(5), 0).unwrap();
    bracket.validate().unwrap();
    assert_eq!(bracket.num_rounds(), 3);
    assert_eq!(bracket.total_matches(), 7);

    let round1 = &bracket.rounds[0];
    let unseated = round1
        .iter()
        .flat_map(|m| [&m.slot1, &m.slot2])
        .filter(|s| s.participant_id().is_none())
        .count();
    assert_eq!(unseated, 3);

    // Pairwise consumption puts the bye at the third pair and the
    // placeholder pair last.
    let bye = &round1[2];
    assert!(bye.slot2.is_bye());
    assert_eq!(bye.status, MatchStatus::Completed);
    assert_eq!(bye.winner_id.as_deref(), bye.slot1.participant_id());
    let placeholder = &round1[3];
    assert!(placeholder.slot1.is_empty() && placeholder.slot2.is_empty());
    assert!(!placeholder.is_decided());

    let decided = round1.iter().filter(|m| m.is_decided()).count();
    assert_eq!(decided, 1);

    // The bye winner is already waiting in round 2 (feeder index 2 -> slot 1
    // of match 6); its opponent side stays open.
    let m6 = &bracket.rounds[1][1];
    assert_eq!(m6.slot1.participant_id(), bye.winner_id.as_deref());
    assert!(m6.slot2.is_empty());
    assert!(!m6.is_decided());

    let mut seen: Vec<&str> = round1
        .iter()
        .flat_map(|m| [m.slot1.participant_id(), m.slot2.participant_id()])
        .flatten()
        .collect();
    seen.sort_unstable();
    assert_eq!(seen, vec!["p0", "p1", "p2", "p3", "p4"]);
}

#[test]
fn three_with_capacity_four() {
    let bracket = generate_bracket(&participants(3), 4).unwrap();
    bracket.validate().unwrap();
    assert_eq!(bracket.num_rounds(), 2);
    assert_eq!(bracket.total_matches(), 3);

    let bye = &bracket.rounds[0][1];
    assert!(bye.slot2.is_bye());
    assert_eq!(bye.status, MatchStatus::Completed);

    // Feeder index 1 is odd, so the bye winner pre-populates slot 2 of the
    // final before anyone reports a result.
    let final_match = &bracket.rounds[1][0];
    assert_eq!(final_match.slot2.participant_id(), bye.winner_id.as_deref());
    assert!(final_match.slot1.is_empty());
    assert!(!bracket.is_complete());
}

#[test]
fn capacity_expands_bracket_with_placeholders() {
    let bracket = generate_bracket(&participants(2), 8).unwrap();
    bracket.validate().unwrap();
    assert_eq!(bracket.num_rounds(), 3);
    assert_eq!(bracket.total_matches(), 7);

    let round1 = &bracket.rounds[0];
    assert!(round1[0].slot1.participant_id().is_some());
    assert!(round1[0].slot2.participant_id().is_some());
    for m in &round1[1..] {
        assert!(m.slot1.is_empty() && m.slot2.is_empty());
    }
    assert_eq!(round1.iter().filter(|m| m.slot2.is_bye()).count(), 0);
    assert_eq!(round1.iter().filter(|m| m.is_decided()).count(), 0);
}

#[test]
fn single_participant_trivial_bracket() {
    let bracket = generate_bracket(&participants(1), 0).unwrap();
    bracket.validate().unwrap();
    assert_eq!(bracket.num_rounds(), 0);
    assert_eq!(bracket.total_matches(), 0);
    assert!(bracket.is_complete());
}

#[test]
fn single_participant_with_capacity_gets_bye() {
    let bracket = generate_bracket(&participants(1), 4).unwrap();
    bracket.validate().unwrap();
    assert_eq!(bracket.num_rounds(), 2);

    let bye = &bracket.rounds[0][0];
    assert_eq!(bye.slot1.participant_id(), Some("p0"));
    assert!(bye.slot2.is_bye());
    assert!(bye.is_decided());

    // Advanced into the final, but the other half of the draw is empty, so
    // nothing auto-resolves further.
    let final_match = &bracket.rounds[1][0];
    assert_eq!(final_match.slot1.participant_id(), Some("p0"));
    assert!(final_match.slot2.is_empty());
    assert!(!bracket.is_complete());
}

#[test]
fn structure_holds_across_sizes() {
    for n in 1..=17 {
        for capacity in [0usize, 8, 16] {
            let ps = participants(n);
            let bracket = generate_bracket(&ps, capacity).unwrap();
            bracket.validate().unwrap();

            let effective = capacity.max(n);
            let expected_total = if effective == 1 {
                0
            } else {
                effective.next_power_of_two() - 1
            };
            assert_eq!(
                bracket.total_matches(),
                expected_total,
                "n={n} capacity={capacity}"
            );

            if bracket.num_rounds() > 0 {
                let mut seen: Vec<&str> = bracket.rounds[0]
                    .iter()
                    .flat_map(|m| [m.slot1.participant_id(), m.slot2.participant_id()])
                    .flatten()
                    .collect();
                seen.sort_unstable();
                let mut expected: Vec<&str> = ps.iter().map(|p| p.id.as_str()).collect();
                expected.sort_unstable();
                assert_eq!(seen, expected, "n={n} capacity={capacity}");

                let byes = bracket.rounds[0].iter().filter(|m| m.slot2.is_bye()).count();
                assert_eq!(byes, n % 2, "n={n} capacity={capacity}");
            }
        }
    }
}

#[test]
fn round_names_follow_depth() {
    let bracket = generate_bracket(&participants(16), 0).unwrap();
    assert_eq!(bracket.round_name(4), "Final");
    assert_eq!(bracket.round_name(3), "Semi-Final");
    assert_eq!(bracket.round_name(2), "Quarter-Final");
    assert_eq!(bracket.round_name(1), "Round 1");

    let two = generate_bracket(&participants(2), 0).unwrap();
    assert_eq!(two.round_name(1), "Final");
}
