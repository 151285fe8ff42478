//! Array sorting generators
//!
//! All four sorts work on a private copy of the values and emit one
//! `Compare` step per comparison and one `Swap` step per exchange. Positions
//! whose final value is known get a `Highlight` step that flags the cell as
//! sorted.
//!
//! Quick Sort uses Lomuto partitioning with the last element of the range as
//! pivot and recurses into the left partition before the right one. A swap
//! of an element with itself is not an exchange and produces no step.

use crate::step::{Mutation, Step, StepKind, StepSequence, TargetRef};
use crate::structures::array::ArrayModel;

/// Private working copy shared by the sorts
struct Workspace<'a> {
    values: Vec<i32>,
    marked: Vec<bool>,
    seq: &'a mut StepSequence,
}

impl<'a> Workspace<'a> {
    fn new(array: &ArrayModel, seq: &'a mut StepSequence) -> Self {
        let values = array.values();
        let marked = vec![false; values.len()];
        Workspace {
            values,
            marked,
            seq,
        }
    }

    fn compare(&mut self, i: usize, j: usize, description: String) {
        let (a, b) = (self.values[i], self.values[j]);
        self.seq.push(
            Step::new(StepKind::Compare, TargetRef::Cell(i), description)
                .with_secondary(TargetRef::Cell(j))
                .with_param("left", a)
                .with_param("right", b),
        );
    }

    fn swap(&mut self, i: usize, j: usize) {
        let (a, b) = (self.values[i], self.values[j]);
        self.seq.push(
            Step::new(
                StepKind::Swap,
                TargetRef::Cell(i),
                format!("Swap {} and {}", a, b),
            )
            .with_secondary(TargetRef::Cell(j))
            .with_mutation(Mutation::ArraySwap { i, j }),
        );
        self.values.swap(i, j);
    }

    fn mark(&mut self, index: usize) {
        if self.marked[index] {
            return;
        }
        self.marked[index] = true;
        self.seq.push(
            Step::new(
                StepKind::Highlight,
                TargetRef::Cell(index),
                format!("{} is in its final position", self.values[index]),
            )
            .with_param("sorted", true)
            .with_mutation(Mutation::ArrayMarkSorted { index }),
        );
    }

    fn finish(mut self, name: &str) {
        for index in 0..self.values.len() {
            self.mark(index);
        }
        let summary = format!("{} finished: {:?}", name, self.values);
        self.seq.emit(StepKind::Highlight, TargetRef::Whole, summary);
    }
}

/// Leading step shared by every sort; `false` when there is nothing to sort
fn start(array: &ArrayModel, name: &str, seq: &mut StepSequence) -> bool {
    if array.is_empty() {
        seq.emit(
            StepKind::Highlight,
            TargetRef::Whole,
            format!("The array is empty; {} has nothing to do", name),
        );
        return false;
    }
    seq.push(
        Step::new(
            StepKind::Highlight,
            TargetRef::Whole,
            format!("{} on {} values", name, array.len()),
        )
        .with_mutation(Mutation::ArrayClearSorted),
    );
    true
}

pub fn bubble_sort(array: &ArrayModel, seq: &mut StepSequence) {
    if !start(array, "Bubble Sort", seq) {
        return;
    }
    let mut ws = Workspace::new(array, seq);
    let n = ws.values.len();

    for pass in 0..n.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..n - 1 - pass {
            let (a, b) = (ws.values[j], ws.values[j + 1]);
            ws.compare(j, j + 1, format!("Compare {} and {}", a, b));
            if a > b {
                ws.swap(j, j + 1);
                swapped = true;
            }
        }
        ws.mark(n - 1 - pass);
        if !swapped {
            break;
        }
    }
    ws.finish("Bubble Sort");
}

pub fn selection_sort(array: &ArrayModel, seq: &mut StepSequence) {
    if !start(array, "Selection Sort", seq) {
        return;
    }
    let mut ws = Workspace::new(array, seq);
    let n = ws.values.len();

    for i in 0..n.saturating_sub(1) {
        let mut min = i;
        ws.seq.push(
            Step::new(
                StepKind::Highlight,
                TargetRef::Cell(i),
                format!("Find the minimum from index {}", i),
            )
            .with_param("minimum", ws.values[i]),
        );
        for j in i + 1..n {
            let (a, b) = (ws.values[j], ws.values[min]);
            ws.compare(j, min, format!("Compare {} with current minimum {}", a, b));
            if a < b {
                min = j;
            }
        }
        if min != i {
            ws.swap(i, min);
        }
        ws.mark(i);
    }
    ws.finish("Selection Sort");
}

pub fn insertion_sort(array: &ArrayModel, seq: &mut StepSequence) {
    if !start(array, "Insertion Sort", seq) {
        return;
    }
    let mut ws = Workspace::new(array, seq);
    let n = ws.values.len();

    for i in 1..n {
        let key = ws.values[i];
        ws.seq.emit(
            StepKind::Highlight,
            TargetRef::Cell(i),
            format!("Insert {} into the sorted prefix", key),
        );
        let mut j = i;
        while j > 0 {
            let (a, b) = (ws.values[j - 1], ws.values[j]);
            ws.compare(j - 1, j, format!("Compare {} and {}", a, b));
            if a > b {
                ws.swap(j - 1, j);
                j -= 1;
            } else {
                break;
            }
        }
    }
    ws.finish("Insertion Sort");
}

pub fn quick_sort(array: &ArrayModel, seq: &mut StepSequence) {
    if !start(array, "Quick Sort", seq) {
        return;
    }
    let mut ws = Workspace::new(array, seq);
    let high = ws.values.len() - 1;
    quick_sort_range(&mut ws, 0, high);
    ws.finish("Quick Sort");
}

fn quick_sort_range(ws: &mut Workspace<'_>, low: usize, high: usize) {
    if low > high {
        return;
    }
    if low == high {
        ws.mark(low);
        return;
    }

    let pivot = ws.values[high];
    ws.seq.push(
        Step::new(
            StepKind::Highlight,
            TargetRef::Cell(high),
            format!("Pivot {} for range {}..={}", pivot, low, high),
        )
        .with_param("pivot", pivot)
        .with_param("low", low)
        .with_param("high", high),
    );

    let mut boundary = low;
    for j in low..high {
        let value = ws.values[j];
        ws.compare(j, high, format!("Compare {} with pivot {}", value, pivot));
        if value < pivot {
            if boundary != j {
                ws.swap(boundary, j);
            }
            boundary += 1;
        }
    }
    if boundary != high {
        ws.swap(boundary, high);
    }
    ws.mark(boundary);

    if boundary > low {
        quick_sort_range(ws, low, boundary - 1);
    }
    if boundary < high {
        quick_sort_range(ws, boundary + 1, high);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::{count_kind, Step};
    use crate::structures::Structure;

    fn play(values: &[i32], sort: fn(&ArrayModel, &mut StepSequence)) -> (Vec<i32>, Vec<Step>) {
        let array = ArrayModel::new(values);
        let mut seq = StepSequence::default();
        sort(&array, &mut seq);
        let steps = seq.into_steps();

        let mut structure = Structure::Array(array);
        for step in &steps {
            if let Some(m) = &step.mutation {
                structure.apply(m).unwrap();
            }
        }
        match structure {
            Structure::Array(a) => {
                assert!(a.cells().iter().all(|c| c.sorted));
                (a.values(), steps)
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_bubble_sort_example() {
        let (sorted, steps) = play(&[5, 3, 8, 1, 9, 2, 7], bubble_sort);
        assert_eq!(sorted, vec![1, 2, 3, 5, 7, 8, 9]);
        // One swap per inversion
        assert_eq!(count_kind(&steps, StepKind::Swap), 10);
    }

    #[test]
    fn test_all_sorts_agree() {
        let input = [4, -2, 9, 0, 7, 3, 3, 1];
        let mut expected = input.to_vec();
        expected.sort();
        for sort in [bubble_sort, selection_sort, insertion_sort, quick_sort] {
            assert_eq!(play(&input, sort).0, expected);
        }
    }

    #[test]
    fn test_quick_sort_last_element_pivot() {
        let array = ArrayModel::new(&[3, 1, 2]);
        let mut seq = StepSequence::default();
        quick_sort(&array, &mut seq);
        let steps = seq.into_steps();
        let pivot = steps
            .iter()
            .find(|s| s.param("pivot").is_some())
            .unwrap();
        assert_eq!(pivot.target, TargetRef::Cell(2));
    }

    #[test]
    fn test_empty_array_is_one_step() {
        let array = ArrayModel::new(&[]);
        let mut seq = StepSequence::default();
        selection_sort(&array, &mut seq);
        let steps = seq.into_steps();
        assert_eq!(steps.len(), 1);
        assert!(steps[0].mutation.is_none());
    }

    #[test]
    fn test_single_value_is_marked_sorted() {
        let (sorted, steps) = play(&[42], quick_sort);
        assert_eq!(sorted, vec![42]);
        assert_eq!(count_kind(&steps, StepKind::Compare), 0);
    }
}
