use rand::{Rng, SeedableRng, rngs::StdRng};
use water_sort_engine::{
    CAPACITY, Color, Palette, Tube, can_move, check_win, execute_move, find_best_move,
    generate_level_seeded, legal_moves,
};

const R: Color = Color::new(0);
const B: Color = Color::new(1);
const G: Color = Color::new(2);

fn tube(id: usize, layers: &[Color]) -> Tube {
    Tube::new(id, layers.to_vec())
}

#[test]
fn scenario_a_pours_single_unit_onto_empty() {
    let from = tube(0, &[R, R, B]);
    let to = tube(1, &[]);
    assert!(can_move(&from, &to, CAPACITY));

    let outcome = execute_move(&from, &to, CAPACITY);
    assert_eq!(outcome.updated_from.layers(), &[R, R]);
    assert_eq!(outcome.updated_to.layers(), &[B]);
    assert_eq!(outcome.moved_count, 1);
}

#[test]
fn scenario_b_pours_whole_run_onto_match() {
    let from = tube(0, &[R, R]);
    let to = tube(1, &[R, R]);
    assert!(can_move(&from, &to, CAPACITY));

    let outcome = execute_move(&from, &to, CAPACITY);
    assert!(outcome.updated_from.is_empty());
    assert_eq!(outcome.updated_to.layers(), &[R, R, R, R]);
    assert_eq!(outcome.moved_count, 2);
}

#[test]
fn scenario_c_full_destination_refuses() {
    assert!(!can_move(&tube(0, &[G]), &tube(1, &[R, R, R, R]), CAPACITY));
}

#[test]
fn scenario_d_sorted_board_wins() {
    let tubes = vec![tube(0, &[R; 4]), tube(1, &[]), tube(2, &[B; 4]), tube(3, &[])];
    assert!(check_win(&tubes, CAPACITY));
}

#[test]
fn scenario_e_partial_tube_is_not_a_win() {
    let tubes = vec![tube(0, &[R, R, R]), tube(1, &[B; 4]), tube(2, &[])];
    assert!(!check_win(&tubes, CAPACITY));
}

#[test]
fn scenario_f_deadlock_has_no_hint() {
    let tubes = vec![tube(0, &[R, B, R, B]), tube(1, &[B, R, B, R]), tube(2, &[G, R, G, B])];
    assert!(legal_moves(&tubes, CAPACITY).next().is_none());
    assert_eq!(find_best_move(&tubes, CAPACITY), None);
}

#[test]
fn checks_are_repeatable() {
    let tubes = vec![tube(0, &[R, B]), tube(1, &[B])];
    assert_eq!(
        can_move(&tubes[0], &tubes[1], CAPACITY),
        can_move(&tubes[0], &tubes[1], CAPACITY)
    );
    assert_eq!(check_win(&tubes, CAPACITY), check_win(&tubes, CAPACITY));
}

/// Random legal play on generated levels: units are conserved, every tube
/// stays within capacity, and each hint names a legal pour.
#[test]
fn random_play_conserves_units_and_capacity() {
    let palette = Palette::vibrant();
    let mut rng = StdRng::seed_from_u64(2024);

    for index in [1, 6, 14, 15, 30] {
        let level = generate_level_seeded(index, 7, &palette);
        let total = level.unit_count();
        let mut tubes = level.instantiate();

        for _ in 0..60 {
            if let Some(hint) = find_best_move(&tubes, CAPACITY) {
                assert!(can_move(&tubes[hint.from_index], &tubes[hint.to_index], CAPACITY));
            }
            let moves: Vec<_> = legal_moves(&tubes, CAPACITY).collect();
            if moves.is_empty() {
                break;
            }
            let m = moves[rng.random_range(0..moves.len())];
            let before = tubes[m.from].len() + tubes[m.to].len();
            let outcome = execute_move(&tubes[m.from], &tubes[m.to], CAPACITY);

            assert!(outcome.moved_count >= 1);
            assert_eq!(before, outcome.updated_from.len() + outcome.updated_to.len());
            assert!(outcome.updated_to.len() <= CAPACITY);

            tubes[m.from] = outcome.updated_from;
            tubes[m.to] = outcome.updated_to;
            assert_eq!(tubes.iter().map(Tube::len).sum::<usize>(), total);
            assert!(tubes.iter().all(|t| t.len() <= CAPACITY));
            assert!(tubes.iter().enumerate().all(|(i, t)| t.id() == i));
        }
    }
}
