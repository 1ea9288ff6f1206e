use log::debug;
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use rayon::prelude::*;

use crate::model::{CAPACITY, Color, LevelDefinition};
use crate::palette::Palette;

/// Number of distinct colors on level `index`, capped at the palette size.
pub fn color_count(index: u32, palette_size: usize) -> usize {
    let wanted = if index <= 5 {
        3
    } else {
        3 + (index as usize - 5) / 5 + 1
    };
    wanted.min(palette_size)
}

pub fn extra_empty_tubes(index: u32) -> usize {
    if index < 15 { 2 } else { 3 }
}

/// Builds level `index` using `rng` for the shuffle. Each color contributes
/// exactly `CAPACITY` units; the shuffled units are cut into full tubes in
/// order, followed by the empty tubes.
pub fn generate_level_with<R: Rng + ?Sized>(
    index: u32,
    palette: &Palette,
    rng: &mut R,
) -> LevelDefinition {
    let colors = color_count(index, palette.len());
    let extra = extra_empty_tubes(index);

    let mut units: Vec<Color> = palette
        .colors()
        .take(colors)
        .flat_map(|color| std::iter::repeat_n(color, CAPACITY))
        .collect();
    units.shuffle(rng);

    let mut tubes: Vec<Vec<Color>> = units.chunks(CAPACITY).map(<[Color]>::to_vec).collect();
    tubes.extend(std::iter::repeat_n(Vec::new(), extra));

    debug!("Generated level {index}: {colors} colors, {extra} empty tubes");
    LevelDefinition {
        id: index,
        tubes,
        capacity: CAPACITY,
    }
}

/// Level `index` with the default palette and the thread-local RNG.
pub fn generate_level(index: u32) -> LevelDefinition {
    generate_level_with(index, &Palette::default(), &mut rand::rng())
}

/// Level `index` as a pure function of `(index, seed)`.
pub fn generate_level_seeded(index: u32, seed: u64, palette: &Palette) -> LevelDefinition {
    let mut rng = StdRng::seed_from_u64(level_seed(seed, index));
    generate_level_with(index, palette, &mut rng)
}

/// Per-level seed derived from a batch seed, so a level does not depend on
/// which other levels were generated before it.
pub fn level_seed(seed: u64, index: u32) -> u64 {
    // splitmix64 finalizer
    let mut z = seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Levels `1..=count`, generated in parallel.
pub fn generate_levels(count: u32, seed: u64, palette: &Palette) -> Vec<LevelDefinition> {
    (1..=count)
        .into_par_iter()
        .map(|index| generate_level_seeded(index, seed, palette))
        .collect()
}
