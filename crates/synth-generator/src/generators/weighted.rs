//! Cumulative-weight selection over static tables.

use rand::Rng;

/// Ordered `(value, weight)` pairs. Weights need not sum to one.
pub type WeightedTable<T> = &'static [(T, f64)];

/// Draw one value from `table` with probability proportional to its weight.
///
/// Returns `None` when the table is empty or its weights sum to zero.
pub fn weighted_choice<T: Copy, R: Rng>(rng: &mut R, table: &[(T, f64)]) -> Option<T> {
    let total: f64 = table.iter().map(|(_, weight)| weight.max(0.0)).sum();
    if total <= 0.0 {
        return None;
    }

    let target = rng.gen::<f64>() * total;
    let mut cumulative = 0.0;
    for (value, weight) in table {
        cumulative += weight.max(0.0);
        if target < cumulative {
            return Some(*value);
        }
    }

    // Floating point slack: the draw landed on the upper edge
    table
        .iter()
        .rev()
        .find(|(_, weight)| *weight > 0.0)
        .map(|(value, _)| *value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_empty_table() {
        let mut rng = StdRng::seed_from_u64(42);
        let table: &[(u8, f64)] = &[];
        assert_eq!(weighted_choice(&mut rng, table), None);
        assert_eq!(weighted_choice(&mut rng, &[(1u8, 0.0)]), None);
    }

    #[test]
    fn test_zero_weight_never_drawn() {
        let mut rng = StdRng::seed_from_u64(42);
        let table = [('a', 0.0), ('b', 1.0), ('c', 0.0)];
        for _ in 0..500 {
            assert_eq!(weighted_choice(&mut rng, &table), Some('b'));
        }
    }

    #[test]
    fn test_frequencies_follow_weights() {
        let mut rng = StdRng::seed_from_u64(42);
        let table = [("heavy", 0.8), ("light", 0.2)];
        let draws = 10_000;
        let heavy = (0..draws)
            .filter(|_| weighted_choice(&mut rng, &table) == Some("heavy"))
            .count();

        let ratio = heavy as f64 / draws as f64;
        assert!((0.75..0.85).contains(&ratio), "ratio was {ratio}");
    }
}
