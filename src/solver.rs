use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::model::Tube;
use crate::rules::{Move, can_move, legal_moves};

/// A suggested pour, by tube position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub from_index: usize,
    pub to_index: usize,
}

impl From<Move> for Hint {
    fn from(m: Move) -> Self {
        Hint {
            from_index: m.from,
            to_index: m.to,
        }
    }
}

/// Greedy hint search. Tiers are tried in order and the first pair in
/// row-major order wins within a tier:
///
/// 1. pour onto a matching non-empty stack,
/// 2. any legal pour out of a tube holding at least two units,
/// 3. any legal pour.
///
/// `None` means the board is deadlocked. Not guaranteed to lead to a win.
pub fn find_best_move(tubes: &[Tube], capacity: usize) -> Option<Hint> {
    if let Some(m) = legal_moves(tubes, capacity).find(|m| is_stacking(tubes, *m)) {
        debug!("Hint: stacking move {} -> {}", m.from, m.to);
        return Some(m.into());
    }

    // Meant to favor exposing a different color; only the length gate applies.
    for (i, from) in tubes.iter().enumerate() {
        if from.len() < 2 {
            continue;
        }
        for (j, to) in tubes.iter().enumerate() {
            if i != j && can_move(from, to, capacity) {
                debug!("Hint: unstacking move {i} -> {j}");
                return Some(Hint {
                    from_index: i,
                    to_index: j,
                });
            }
        }
    }

    let fallback = legal_moves(tubes, capacity).next().map(Hint::from);
    match fallback {
        Some(hint) => debug!("Hint: fallback move {} -> {}", hint.from_index, hint.to_index),
        None => trace!("Hint: no legal move"),
    }
    fallback
}

fn is_stacking(tubes: &[Tube], m: Move) -> bool {
    match (tubes[m.to].top(), tubes[m.from].top()) {
        (Some(target), Some(moving)) => target == moving,
        _ => false,
    }
}
