//! Array-backed binary heap
//!
//! Children of slot `i` live at `2i + 1` and `2i + 2`. The model does not
//! enforce heap order by itself: values loaded through [`BinaryHeapModel::from_values`]
//! stay in the given order until a Build-Heap sequence is played.

use super::ApplyError;
use serde::Deserialize;
use std::fmt;

/// Heap-order relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeapKind {
    #[default]
    Min,
    Max,
}

impl HeapKind {
    /// Whether `child` strictly beats `parent`; equal values never swap
    pub fn beats(self, child: i32, parent: i32) -> bool {
        match self {
            HeapKind::Min => child < parent,
            HeapKind::Max => child > parent,
        }
    }

    pub fn relation(self) -> &'static str {
        match self {
            HeapKind::Min => "<",
            HeapKind::Max => ">",
        }
    }
}

impl fmt::Display for HeapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapKind::Min => f.write_str("min-heap"),
            HeapKind::Max => f.write_str("max-heap"),
        }
    }
}

pub fn parent(index: usize) -> Option<usize> {
    if index == 0 {
        None
    } else {
        Some((index - 1) / 2)
    }
}

pub fn left_child(index: usize) -> usize {
    2 * index + 1
}

pub fn right_child(index: usize) -> usize {
    2 * index + 2
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinaryHeapModel {
    kind: HeapKind,
    items: Vec<i32>,
}

impl BinaryHeapModel {
    pub fn new(kind: HeapKind) -> Self {
        BinaryHeapModel {
            kind,
            items: Vec::new(),
        }
    }

    /// Load values as-is, without heapifying
    pub fn from_values(kind: HeapKind, values: &[i32]) -> Self {
        BinaryHeapModel {
            kind,
            items: values.to_vec(),
        }
    }

    pub fn kind(&self) -> HeapKind {
        self.kind
    }

    pub fn items(&self) -> &[i32] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn root(&self) -> Option<i32> {
        self.items.first().copied()
    }

    /// Whether every parent/child pair respects the heap order
    pub fn is_valid(&self) -> bool {
        (1..self.items.len()).all(|i| {
            let p = (i - 1) / 2;
            !self.kind.beats(self.items[i], self.items[p])
        })
    }

    pub fn push(&mut self, value: i32) {
        self.items.push(value);
    }

    pub fn swap(&mut self, i: usize, j: usize) -> Result<(), ApplyError> {
        let len = self.items.len();
        for index in [i, j] {
            if index >= len {
                return Err(ApplyError::IndexOutOfRange { index, len });
            }
        }
        self.items.swap(i, j);
        Ok(())
    }

    pub fn pop_last(&mut self) -> Result<i32, ApplyError> {
        self.items.pop().ok_or(ApplyError::Empty("heap"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity() {
        assert!(BinaryHeapModel::from_values(HeapKind::Min, &[1, 3, 2, 5]).is_valid());
        assert!(!BinaryHeapModel::from_values(HeapKind::Min, &[5, 3, 8]).is_valid());
        assert!(BinaryHeapModel::from_values(HeapKind::Max, &[9, 4, 9]).is_valid());
    }

    #[test]
    fn test_family_indices() {
        assert_eq!(parent(0), None);
        assert_eq!(parent(4), Some(1));
        assert_eq!(left_child(1), 3);
        assert_eq!(right_child(1), 4);
    }

    #[test]
    fn test_ties_never_beat() {
        assert!(!HeapKind::Min.beats(3, 3));
        assert!(!HeapKind::Max.beats(3, 3));
    }
}
