//! Result propagation: advancing winners, bye cascades, clearing, swaps.

use crate::models::{Bracket, BracketError, BracketIndex, MatchId, MatchStatus, Slot};
use std::mem;

/// What applying a result did beyond the match itself.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Propagation {
    /// The final match now has a winner.
    pub tournament_complete: bool,
    /// Matches resolved automatically by the bye cascade, in resolution order.
    pub auto_resolved: Vec<MatchId>,
    /// Matches whose advancement write was dropped as inconsistent.
    pub conflicts: Vec<MatchId>,
}

/// Record `winner_id` as the winner of `match_id` and advance them through
/// the bracket.
///
/// Re-applying the same winner is structurally a no-op. Applying a different
/// winner to an already decided match first retracts the old winner from
/// every downstream match it reached, then records the new result.
pub fn apply_match_result(
    bracket: &mut Bracket,
    index: &BracketIndex,
    match_id: MatchId,
    winner_id: &str,
) -> Result<Propagation, BracketError> {
    let m = bracket
        .match_by_id(index, match_id)
        .ok_or(BracketError::MatchNotFound(match_id))?;
    if !m.slot1.holds(winner_id) && !m.slot2.holds(winner_id) {
        return Err(BracketError::InvalidWinner);
    }
    if let Some(prev) = m.winner_id.clone() {
        if prev != winner_id {
            // Corrected result: unwind the old winner's advancement first.
            clear_match_result(bracket, index, match_id)?;
        }
    }

    let m = bracket
        .match_by_id_mut(index, match_id)
        .ok_or(BracketError::MatchNotFound(match_id))?;
    m.winner_id = Some(winner_id.to_string());
    m.status = MatchStatus::Completed;

    let mut prop = Propagation::default();
    advance_from(bracket, index, match_id, &mut prop);
    prop.tournament_complete = bracket.is_complete();
    Ok(prop)
}

/// Push a decided match's winner into the following round, then keep
/// resolving byes for as long as they keep falling. Runs on an explicit
/// worklist so a long bye chain costs no stack.
pub(crate) fn advance_from(
    bracket: &mut Bracket,
    index: &BracketIndex,
    from: MatchId,
    prop: &mut Propagation,
) {
    let mut work = vec![from];
    while let Some(id) = work.pop() {
        let feeder_idx = match index.position(id) {
            Some((_, i)) => i,
            None => continue,
        };
        let (winner, name, next_id) = {
            let src = match bracket.match_by_id(index, id) {
                Some(m) => m,
                None => continue,
            };
            let winner = match src.winner_id.clone() {
                Some(w) => w,
                None => continue,
            };
            let next_id = match src.next_match_id {
                Some(n) => n,
                None => continue,
            };
            let name = match src.winner_name() {
                Some(n) => n.to_string(),
                None => continue,
            };
            (winner, name, next_id)
        };

        let next = match bracket.match_by_id_mut(index, next_id) {
            Some(m) => m,
            None => continue,
        };

        // Even feeder index within its round seats slot 1, odd seats slot 2.
        let (expected, opposite) = if feeder_idx % 2 == 0 {
            (&mut next.slot1, &mut next.slot2)
        } else {
            (&mut next.slot2, &mut next.slot1)
        };

        if expected.holds(&winner) || opposite.holds(&winner) {
            // Already advanced, nothing to write.
        } else if expected.is_empty() {
            *expected = Slot::assigned(winner.clone(), name.clone());
        } else if opposite.is_empty() {
            // Expected side is taken (the sibling landed there, or a stray
            // bye); keep both advancing participants by using the other side.
            *opposite = Slot::assigned(winner.clone(), name.clone());
        } else {
            log::warn!(
                "match {}: both slots already taken, dropping advancement of {}",
                next_id,
                winner
            );
            prop.conflicts.push(next_id);
            continue;
        }

        // A match against a bye resolves itself as soon as the real
        // participant arrives.
        if next.status == MatchStatus::Pending && !next.slot1.is_empty() && !next.slot2.is_empty() {
            let auto_winner = match (&next.slot1, &next.slot2) {
                (Slot::Bye, Slot::Assigned { id, .. }) => Some(id.clone()),
                (Slot::Assigned { id, .. }, Slot::Bye) => Some(id.clone()),
                _ => None,
            };
            if let Some(w) = auto_winner {
                log::debug!("match {} auto-resolved by bye for {}", next_id, w);
                next.winner_id = Some(w);
                next.status = MatchStatus::Completed;
                prop.auto_resolved.push(next_id);
                work.push(next_id);
            }
        }
    }
}

/// Clear a recorded result and retract the former winner from every match
/// downstream.
///
/// Only a slot holding exactly the retracted participant is emptied; a
/// sibling's advanced participant is never touched. Emptying a slot of a
/// match that itself had a recorded winner voids that result too, whichever
/// side had won, and retracts that winner in turn. Returns the ids of every
/// match whose result was voided, the cleared match first. Clearing a
/// pending match is a no-op.
pub fn clear_match_result(
    bracket: &mut Bracket,
    index: &BracketIndex,
    match_id: MatchId,
) -> Result<Vec<MatchId>, BracketError> {
    let m = bracket
        .match_by_id_mut(index, match_id)
        .ok_or(BracketError::MatchNotFound(match_id))?;
    let winner = match m.winner_id.take() {
        Some(w) => w,
        None => return Ok(Vec::new()),
    };
    m.status = MatchStatus::Pending;
    let first_next = m.next_match_id;

    let mut voided = vec![match_id];
    let mut work = vec![(first_next, winner)];
    while let Some((next_id, retracted)) = work.pop() {
        let next_id = match next_id {
            Some(n) => n,
            None => continue,
        };
        let next = match bracket.match_by_id_mut(index, next_id) {
            Some(m) => m,
            None => continue,
        };

        // The retracted participant may sit in either slot (advancement can
        // fall back to the opposite side), so check both for an exact hold.
        let removed = if next.slot1.holds(&retracted) {
            next.slot1 = Slot::Empty;
            true
        } else if next.slot2.holds(&retracted) {
            next.slot2 = Slot::Empty;
            true
        } else {
            false
        };
        if !removed {
            continue;
        }
        log::debug!("match {}: retracted {}", next_id, retracted);

        if let Some(downstream_winner) = next.winner_id.take() {
            // This match's result no longer rests on two seated
            // participants; void it and unwind its own winner.
            next.status = MatchStatus::Pending;
            voided.push(next_id);
            work.push((next.next_match_id, downstream_winner));
        }
    }
    Ok(voided)
}

/// Swap the two slots of an undecided match in place.
pub fn swap_participants(
    bracket: &mut Bracket,
    index: &BracketIndex,
    match_id: MatchId,
) -> Result<(), BracketError> {
    let m = bracket
        .match_by_id_mut(index, match_id)
        .ok_or(BracketError::MatchNotFound(match_id))?;
    if m.is_decided() {
        return Err(BracketError::MatchAlreadyDecided(match_id));
    }
    mem::swap(&mut m.slot1, &mut m.slot2);
    Ok(())
}
