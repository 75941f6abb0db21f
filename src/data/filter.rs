use super::model::Observation;

// ---------------------------------------------------------------------------
// Year window: which rows a fit sees
// ---------------------------------------------------------------------------

/// Return the observations with `year >= min_year`, preserving order.
///
/// * `min_year` is `None` → every row passes (the full range)
/// * otherwise a row passes when its year is at or after the cutoff
///
/// The result is a fresh vector; `observations` is never modified.
pub fn since_year(observations: &[Observation], min_year: Option<i32>) -> Vec<Observation> {
    match min_year {
        None => observations.to_vec(),
        Some(cutoff) => observations
            .iter()
            .filter(|o| o.year >= cutoff)
            .copied()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(pairs: &[(i32, f64)]) -> Vec<Observation> {
        pairs.iter().map(|&(y, l)| Observation::new(y, l)).collect()
    }

    #[test]
    fn no_cutoff_keeps_everything() {
        let rows = obs(&[(1880, 0.0), (1881, 0.2)]);
        assert_eq!(since_year(&rows, None), rows);
    }

    #[test]
    fn cutoff_is_inclusive_and_keeps_order() {
        let rows = obs(&[(2001, 1.0), (1999, 0.5), (2000, 0.7), (2003, 1.4)]);
        let kept = since_year(&rows, Some(2000));
        assert_eq!(kept, obs(&[(2001, 1.0), (2000, 0.7), (2003, 1.4)]));
    }

    #[test]
    fn cutoff_past_the_data_yields_nothing() {
        let rows = obs(&[(1990, 0.0), (2000, 1.0)]);
        assert!(since_year(&rows, Some(2050)).is_empty());
    }
}
