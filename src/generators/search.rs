//! Array search generators (read-only, no mutations)

use crate::step::{Step, StepKind, StepSequence, TargetRef};
use crate::structures::array::ArrayModel;

/// Visit cells left to right, stopping at the first equal value
pub fn linear_search(array: &ArrayModel, target: i32, seq: &mut StepSequence) {
    if array.is_empty() {
        seq.emit(
            StepKind::Highlight,
            TargetRef::Whole,
            format!("The array is empty; {} cannot be found", target),
        );
        return;
    }

    for (index, cell) in array.cells().iter().enumerate() {
        seq.push(
            Step::new(
                StepKind::Compare,
                TargetRef::Cell(index),
                format!("Compare {} with target {}", cell.value, target),
            )
            .with_param("index", index)
            .with_param("target", target),
        );
        if cell.value == target {
            seq.push(
                Step::new(
                    StepKind::Highlight,
                    TargetRef::Cell(index),
                    format!("Found {} at index {}", target, index),
                )
                .with_param("found", true),
            );
            return;
        }
    }

    seq.push(
        Step::new(
            StepKind::Fade,
            TargetRef::Whole,
            format!("{} is not in the array", target),
        )
        .with_param("found", false),
    );
}

/// Halve an ascending array until the target is found or the range is empty
pub fn binary_search(array: &ArrayModel, target: i32, seq: &mut StepSequence) {
    if array.is_empty() {
        seq.emit(
            StepKind::Highlight,
            TargetRef::Whole,
            format!("The array is empty; {} cannot be found", target),
        );
        return;
    }
    if !array.is_ascending() {
        seq.emit(
            StepKind::Highlight,
            TargetRef::Whole,
            "Binary Search needs an ascending array; sort it first",
        );
        return;
    }

    let values = array.values();
    let mut low: isize = 0;
    let mut high: isize = values.len() as isize - 1;

    while low <= high {
        let mid = low + (high - low) / 2;
        let index = mid as usize;
        let value = values[index];

        seq.push(
            Step::new(
                StepKind::Highlight,
                TargetRef::Cell(index),
                format!("Probe index {} (value {}) in {}..={}", mid, value, low, high),
            )
            .with_param("low", low as i64)
            .with_param("high", high as i64)
            .with_param("mid", mid as i64),
        );

        if value == target {
            seq.push(
                Step::new(
                    StepKind::Highlight,
                    TargetRef::Cell(index),
                    format!("Found {} at index {}", target, index),
                )
                .with_param("found", true),
            );
            return;
        }

        let description = if value < target {
            low = mid + 1;
            format!("{} < {}: search the right half", value, target)
        } else {
            high = mid - 1;
            format!("{} > {}: search the left half", value, target)
        };
        seq.push(
            Step::new(StepKind::Compare, TargetRef::Cell(index), description)
                .with_param("low", low as i64)
                .with_param("high", high as i64),
        );
    }

    seq.push(
        Step::new(
            StepKind::Fade,
            TargetRef::Whole,
            format!("{} is not in the array", target),
        )
        .with_param("found", false),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::ParamValue;

    fn run(values: &[i32], target: i32, search: fn(&ArrayModel, i32, &mut StepSequence)) -> Vec<Step> {
        let mut seq = StepSequence::default();
        search(&ArrayModel::new(values), target, &mut seq);
        seq.into_steps()
    }

    fn found(steps: &[Step]) -> bool {
        steps.last().and_then(|s| s.param("found")) == Some(&ParamValue::Bool(true))
    }

    #[test]
    fn test_linear_search_stops_at_first_match() {
        let steps = run(&[4, 7, 7, 1], 7, linear_search);
        assert!(found(&steps));
        assert_eq!(steps.last().unwrap().target, TargetRef::Cell(1));
        assert_eq!(
            steps.iter().filter(|s| s.kind == StepKind::Compare).count(),
            2
        );
    }

    #[test]
    fn test_linear_search_miss_visits_every_cell() {
        let steps = run(&[4, 7, 1], 9, linear_search);
        assert!(!found(&steps));
        assert_eq!(steps.len(), 4);
    }

    #[test]
    fn test_binary_search_probes_midpoints() {
        let steps = run(&[1, 3, 5, 7, 9, 11, 13], 11, binary_search);
        assert!(found(&steps));
        let probes: Vec<_> = steps
            .iter()
            .filter(|s| s.param("mid").is_some())
            .map(|s| s.target)
            .collect();
        assert_eq!(probes, vec![TargetRef::Cell(3), TargetRef::Cell(5)]);
    }

    #[test]
    fn test_binary_search_miss_and_edges() {
        assert!(!found(&run(&[1, 3, 5], 0, binary_search)));
        assert!(!found(&run(&[1, 3, 5], 6, binary_search)));
        assert_eq!(run(&[], 1, binary_search).len(), 1);
        assert_eq!(run(&[3, 1], 1, binary_search).len(), 1);
    }
}
