/// Replaces each missing cell with the closest preceding observation.
pub fn forward_fill(cells: &mut [Option<f64>]) {
    let mut last = None;
    for cell in cells.iter_mut() {
        match *cell {
            Some(value) => last = Some(value),
            None => *cell = last,
        }
    }
}

/// Replaces each missing cell with the closest following observation.
pub fn backward_fill(cells: &mut [Option<f64>]) {
    let mut next = None;
    for cell in cells.iter_mut().rev() {
        match *cell {
            Some(value) => next = Some(value),
            None => *cell = next,
        }
    }
}

/// Forward-fills then backward-fills a column. `None` if the column has no
/// observation at all.
pub fn fill_gaps(mut cells: Vec<Option<f64>>) -> Option<Vec<f64>> {
    forward_fill(&mut cells);
    backward_fill(&mut cells);
    cells.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn middle_gap_takes_prior_value() {
        let filled = fill_gaps(vec![Some(1.0), None, None, Some(4.0)]).unwrap();
        assert_eq!(filled, vec![1.0, 1.0, 1.0, 4.0]);
    }

    #[test]
    fn leading_gap_takes_first_observation() {
        let filled = fill_gaps(vec![None, None, Some(3.0), None]).unwrap();
        assert_eq!(filled, vec![3.0, 3.0, 3.0, 3.0]);
    }

    #[test]
    fn forward_fill_leaves_leading_gap() {
        let mut cells = vec![None, Some(2.0), None];
        forward_fill(&mut cells);
        assert_eq!(cells, vec![None, Some(2.0), Some(2.0)]);
    }

    #[test]
    fn empty_column_cannot_be_filled() {
        assert!(fill_gaps(vec![None, None]).is_none());
        assert_eq!(fill_gaps(Vec::new()), Some(Vec::new()));
    }
}
