use serde::{Deserialize, Serialize};

use crate::model::{Color, Tube};

/// Result of pouring one tube into another.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PourOutcome {
    pub updated_from: Tube,
    pub updated_to: Tube,
    pub moved_count: usize,
}

/// An ordered pair of tube positions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: usize,
    pub to: usize,
}

/// Whether `from` can pour into `to`: something to pour, room at the
/// destination, and an empty or matching destination top.
pub fn can_move(from: &Tube, to: &Tube, capacity: usize) -> bool {
    let Some(color) = from.top() else {
        return false;
    };
    if to.len() >= capacity {
        return false;
    }
    match to.top() {
        None => true,
        Some(top) => top == color,
    }
}

/// Pours the contiguous top run of `from` into `to` until the run ends or
/// `to` fills up. The pair must already satisfy [`can_move`]; the inputs are
/// left untouched and fresh tubes are returned.
pub fn execute_move(from: &Tube, to: &Tube, capacity: usize) -> PourOutcome {
    let mut new_from: Vec<Color> = from.layers().to_vec();
    let mut new_to: Vec<Color> = to.layers().to_vec();
    let move_color = new_from.last().copied();
    let mut moved_count = 0;

    while new_from.last().copied() == move_color && new_to.len() < capacity {
        let Some(packet) = new_from.pop() else {
            break;
        };
        new_to.push(packet);
        moved_count += 1;
    }

    PourOutcome {
        updated_from: Tube::new(from.id(), new_from),
        updated_to: Tube::new(to.id(), new_to),
        moved_count,
    }
}

/// Every tube is empty, or full and monochrome.
pub fn check_win(tubes: &[Tube], capacity: usize) -> bool {
    tubes.iter().all(|tube| tube.is_solved(capacity))
}

/// Applies a pour to a whole board, returning a new collection and the
/// number of units moved, or `None` if the indices are out of range, equal,
/// or the pour is illegal.
pub fn apply_move(
    tubes: &[Tube],
    from: usize,
    to: usize,
    capacity: usize,
) -> Option<(Vec<Tube>, usize)> {
    if from == to {
        return None;
    }
    let (source, target) = (tubes.get(from)?, tubes.get(to)?);
    if !can_move(source, target, capacity) {
        return None;
    }
    let outcome = execute_move(source, target, capacity);
    let mut next = tubes.to_vec();
    next[from] = outcome.updated_from;
    next[to] = outcome.updated_to;
    Some((next, outcome.moved_count))
}

/// All legal pours, `from` ascending in the outer loop and `to` in the inner one.
pub fn legal_moves(tubes: &[Tube], capacity: usize) -> impl Iterator<Item = Move> + '_ {
    tubes.iter().enumerate().flat_map(move |(i, from)| {
        tubes
            .iter()
            .enumerate()
            .filter(move |(j, to)| i != *j && can_move(from, to, capacity))
            .map(move |(j, _)| Move { from: i, to: j })
    })
}

/// No legal pour exists anywhere on the board.
pub fn is_deadlocked(tubes: &[Tube], capacity: usize) -> bool {
    legal_moves(tubes, capacity).next().is_none()
}
