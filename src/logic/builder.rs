//! Bracket generation: seeding, round shaping, byes.

use crate::logic::propagator::{advance_from, Propagation};
use crate::models::{Bracket, BracketError, BracketMatch, MatchId, MatchStatus, Participant, Slot};
use rand::seq::SliceRandom;

/// Generate a single-elimination bracket from the registered participants.
///
/// 1. Shuffle participants (uniform random seeding; every regeneration
///    reshuffles, so rebuilding the bracket produces a different draw).
/// 2. Size the bracket: effective size = max(capacity, n), rounds =
///    ceil(log2(effective)), perfect size = 2^rounds.
/// 3. Build round 1 by consuming participants pairwise in shuffled order: a
///    lone leftover participant gets a bye with the winner pre-set, and
///    leftover pairs become empty placeholders when capacity exceeds n.
/// 4. Build later rounds with empty slots; every match links to the match in
///    the following round that receives its winner.
/// 5. Cascade the round-1 byes so their winners are pre-seated downstream.
///
/// A single participant with no larger capacity yields a zero-round bracket
/// that is complete from the start.
pub fn generate_bracket(participants: &[Participant], capacity: usize) -> Result<Bracket, BracketError> {
    if participants.is_empty() {
        return Err(BracketError::NoParticipants);
    }

    let mut seeded = participants.to_vec();
    seeded.shuffle(&mut rand::thread_rng());

    let effective = capacity.max(seeded.len());
    let num_rounds = num_rounds_for(effective);
    if num_rounds == 0 {
        return Ok(Bracket { rounds: Vec::new() });
    }
    let perfect = 1usize << num_rounds;

    let mut entries = seeded.into_iter();
    let mut rounds: Vec<Vec<BracketMatch>> = Vec::with_capacity(num_rounds);
    let mut start: MatchId = 1;

    for r in 0..num_rounds {
        let len = perfect >> (r + 1);
        let next_start = start + len as MatchId;
        let last_round = r + 1 == num_rounds;
        let mut round = Vec::with_capacity(len);
        for i in 0..len {
            let id = start + i as MatchId;
            let next = if last_round {
                None
            } else {
                Some(next_start + (i / 2) as MatchId)
            };
            let m = if r == 0 {
                first_round_match(id, &mut entries, next)
            } else {
                BracketMatch::new(id, r as u32 + 1, Slot::Empty, Slot::Empty, next)
            };
            round.push(m);
        }
        rounds.push(round);
        start = next_start;
    }

    let mut bracket = Bracket { rounds };
    let index = bracket.index();

    // Pre-seat bye winners downstream; an all-bye corner of the bracket
    // resolves as far as it can without any reported result.
    let bye_matches: Vec<MatchId> = bracket.rounds[0]
        .iter()
        .filter(|m| m.is_decided())
        .map(|m| m.id)
        .collect();
    let mut prop = Propagation::default();
    for id in bye_matches {
        advance_from(&mut bracket, &index, id, &mut prop);
    }

    Ok(bracket)
}

/// Rounds needed to play out `effective_size` entries: ceil(log2(n)).
fn num_rounds_for(effective_size: usize) -> usize {
    effective_size.next_power_of_two().trailing_zeros() as usize
}

/// Build one round-1 match, consuming up to two participants: a full pair
/// plays normally, a lone participant gets a bye, nobody left means an empty
/// placeholder pair.
fn first_round_match(
    id: MatchId,
    entries: &mut impl Iterator<Item = Participant>,
    next_match_id: Option<MatchId>,
) -> BracketMatch {
    match (entries.next(), entries.next()) {
        (Some(a), Some(b)) => BracketMatch::new(
            id,
            1,
            Slot::assigned(a.id, a.display_name),
            Slot::assigned(b.id, b.display_name),
            next_match_id,
        ),
        (Some(a), None) => {
            let winner = a.id.clone();
            let mut m = BracketMatch::new(
                id,
                1,
                Slot::assigned(a.id, a.display_name),
                Slot::Bye,
                next_match_id,
            );
            m.winner_id = Some(winner);
            m.status = MatchStatus::Completed;
            m
        }
        _ => BracketMatch::new(id, 1, Slot::Empty, Slot::Empty, next_match_id),
    }
}
