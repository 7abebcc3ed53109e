use std::collections::BTreeMap;

use quizship::{
    generate, placement::generate_with_attempts, Cell, Orientation, GRID_SIZE, PLACEMENT_ATTEMPTS,
    SEQUENCE_COLORS, SEQUENCE_LENGTHS, TOTAL_SEQUENCE_CELLS,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

#[test]
fn standard_layout_never_needs_fallback() {
    let mut total_fallbacks = 0;
    for seed in 0..1000u64 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let placement = generate_with_attempts(
            &mut rng,
            GRID_SIZE,
            &SEQUENCE_LENGTHS,
            &SEQUENCE_COLORS,
            PLACEMENT_ATTEMPTS,
        )
        .unwrap();
        total_fallbacks += placement.fallbacks;
        assert_eq!(placement.cells.len(), TOTAL_SEQUENCE_CELLS);
    }
    assert_eq!(total_fallbacks, 0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn sequences_are_straight_disjoint_and_in_bounds(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let placement = generate(&mut rng, GRID_SIZE, &SEQUENCE_LENGTHS, &SEQUENCE_COLORS).unwrap();
        prop_assert_eq!(placement.fallbacks, 0);

        let mut seen: BTreeMap<Cell, usize> = BTreeMap::new();
        for seq in &placement.sequences {
            let cells = seq.to_cells();
            prop_assert_eq!(cells.len(), SEQUENCE_LENGTHS[seq.id()]);
            for (i, cell) in cells.iter().enumerate() {
                prop_assert!(cell.within(GRID_SIZE));
                let expected = match seq.orientation() {
                    Orientation::Horizontal => Cell::new(seq.origin().row, seq.origin().col + i),
                    Orientation::Vertical => Cell::new(seq.origin().row + i, seq.origin().col),
                };
                prop_assert_eq!(*cell, expected);
                prop_assert!(seen.insert(*cell, seq.id()).is_none());
            }
        }
        prop_assert_eq!(seen, placement.cells);
    }

    #[test]
    fn each_id_owns_its_full_length(seed in any::<u64>(), grid in 5usize..=12) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let placement = generate(&mut rng, grid, &SEQUENCE_LENGTHS, &SEQUENCE_COLORS).unwrap();
        for (id, &len) in SEQUENCE_LENGTHS.iter().enumerate() {
            let owned = placement.cells.values().filter(|&&v| v == id).count();
            prop_assert_eq!(owned, len);
        }
    }
}
