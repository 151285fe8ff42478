//! Step generators
//!
//! One generator per (structure, operation) pair. Every generator reads the
//! canonical structure, works on a private snapshot of it and describes the
//! algorithm as an ordered list of [`Step`]s. Generation never mutates the
//! canonical model: each structural change is attached to exactly one step
//! as a [`crate::step::Mutation`] and only happens during playback.
//!
//! - [`sort`]: Bubble, Selection, Insertion and Quick Sort on arrays
//! - [`search`]: Linear and Binary Search on arrays
//! - [`list`]: linked list insertion, deletion, reversal and search
//! - [`hash`]: chained hash table insert, search and delete
//! - [`heap`]: sift-up insert, extract-root and build-heap
//! - [`huffman`]: tree build, encode and decode
//!
//! # Edge cases
//!
//! Operating on an empty structure is not an error: the generator returns a
//! single step explaining why nothing happens. [`GenerateError`] is reserved
//! for asking a structure for an operation it does not have.

pub mod hash;
pub mod heap;
pub mod huffman;
pub mod list;
pub mod search;
pub mod sort;

use crate::step::{Step, StepSequence, DEFAULT_STEP_DURATION};
use crate::structures::{Structure, StructureKind};
use std::fmt;
use std::time::Duration;

/// Generation failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error("{operation} is not available on a {structure}")]
    Unsupported {
        operation: &'static str,
        structure: StructureKind,
    },
}

/// Knobs shared by every generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Nominal duration stamped on every step
    pub step_duration: Duration,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions {
            step_duration: DEFAULT_STEP_DURATION,
        }
    }
}

/// Operations a caller can request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    BubbleSort,
    SelectionSort,
    InsertionSort,
    QuickSort,
    LinearSearch(i32),
    BinarySearch(i32),

    ListInsertHead(i32),
    ListInsertTail(i32),
    ListInsertAt { index: usize, value: i32 },
    ListDeleteHead,
    ListReverse,
    ListSearch(i32),

    HashInsert(i32),
    HashSearch(i32),
    HashDelete(i32),

    HeapInsert(i32),
    HeapExtractRoot,
    HeapBuild,

    HuffmanBuild(String),
    HuffmanBuildFromFrequencies(Vec<(char, u32)>),
    HuffmanEncode(String),
    HuffmanDecode(String),
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::BubbleSort => "Bubble Sort",
            Operation::SelectionSort => "Selection Sort",
            Operation::InsertionSort => "Insertion Sort",
            Operation::QuickSort => "Quick Sort",
            Operation::LinearSearch(_) => "Linear Search",
            Operation::BinarySearch(_) => "Binary Search",
            Operation::ListInsertHead(_) => "Insert at Head",
            Operation::ListInsertTail(_) => "Insert at Tail",
            Operation::ListInsertAt { .. } => "Insert at Index",
            Operation::ListDeleteHead => "Delete Head",
            Operation::ListReverse => "Reverse",
            Operation::ListSearch(_) => "List Search",
            Operation::HashInsert(_) => "Hash Insert",
            Operation::HashSearch(_) => "Hash Search",
            Operation::HashDelete(_) => "Hash Delete",
            Operation::HeapInsert(_) => "Heap Insert",
            Operation::HeapExtractRoot => "Extract Root",
            Operation::HeapBuild => "Build Heap",
            Operation::HuffmanBuild(_) | Operation::HuffmanBuildFromFrequencies(_) => {
                "Huffman Build"
            }
            Operation::HuffmanEncode(_) => "Huffman Encode",
            Operation::HuffmanDecode(_) => "Huffman Decode",
        }
    }

    /// Structure family the operation belongs to
    pub fn structure_kind(&self) -> StructureKind {
        match self {
            Operation::BubbleSort
            | Operation::SelectionSort
            | Operation::InsertionSort
            | Operation::QuickSort
            | Operation::LinearSearch(_)
            | Operation::BinarySearch(_) => StructureKind::Array,
            Operation::ListInsertHead(_)
            | Operation::ListInsertTail(_)
            | Operation::ListInsertAt { .. }
            | Operation::ListDeleteHead
            | Operation::ListReverse
            | Operation::ListSearch(_) => StructureKind::LinkedList,
            Operation::HashInsert(_) | Operation::HashSearch(_) | Operation::HashDelete(_) => {
                StructureKind::HashTable
            }
            Operation::HeapInsert(_) | Operation::HeapExtractRoot | Operation::HeapBuild => {
                StructureKind::Heap
            }
            Operation::HuffmanBuild(_)
            | Operation::HuffmanBuildFromFrequencies(_)
            | Operation::HuffmanEncode(_)
            | Operation::HuffmanDecode(_) => StructureKind::Huffman,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::LinearSearch(v)
            | Operation::BinarySearch(v)
            | Operation::ListInsertHead(v)
            | Operation::ListInsertTail(v)
            | Operation::ListSearch(v)
            | Operation::HashInsert(v)
            | Operation::HashSearch(v)
            | Operation::HashDelete(v)
            | Operation::HeapInsert(v) => write!(f, "{} ({})", self.name(), v),
            Operation::ListInsertAt { index, value } => {
                write!(f, "{} ({} at {})", self.name(), value, index)
            }
            Operation::HuffmanBuild(text)
            | Operation::HuffmanEncode(text)
            | Operation::HuffmanDecode(text) => write!(f, "{} ({:?})", self.name(), text),
            _ => f.write_str(self.name()),
        }
    }
}

/// Produce the step sequence for `operation` on the current `structure`
pub fn generate(
    structure: &Structure,
    operation: &Operation,
    options: &GenerateOptions,
) -> Result<Vec<Step>, GenerateError> {
    let mut seq = StepSequence::new(options.step_duration);

    match (structure, operation) {
        (Structure::Array(a), Operation::BubbleSort) => sort::bubble_sort(a, &mut seq),
        (Structure::Array(a), Operation::SelectionSort) => sort::selection_sort(a, &mut seq),
        (Structure::Array(a), Operation::InsertionSort) => sort::insertion_sort(a, &mut seq),
        (Structure::Array(a), Operation::QuickSort) => sort::quick_sort(a, &mut seq),
        (Structure::Array(a), Operation::LinearSearch(t)) => {
            search::linear_search(a, *t, &mut seq)
        }
        (Structure::Array(a), Operation::BinarySearch(t)) => {
            search::binary_search(a, *t, &mut seq)
        }

        (Structure::LinkedList(l), Operation::ListInsertHead(v)) => {
            list::insert_head(l, *v, &mut seq)
        }
        (Structure::LinkedList(l), Operation::ListInsertTail(v)) => {
            list::insert_tail(l, *v, &mut seq)
        }
        (Structure::LinkedList(l), Operation::ListInsertAt { index, value }) => {
            list::insert_at(l, *index, *value, &mut seq)
        }
        (Structure::LinkedList(l), Operation::ListDeleteHead) => list::delete_head(l, &mut seq),
        (Structure::LinkedList(l), Operation::ListReverse) => list::reverse(l, &mut seq),
        (Structure::LinkedList(l), Operation::ListSearch(v)) => list::search(l, *v, &mut seq),

        (Structure::HashTable(t), Operation::HashInsert(v)) => hash::insert(t, *v, &mut seq),
        (Structure::HashTable(t), Operation::HashSearch(v)) => hash::search(t, *v, &mut seq),
        (Structure::HashTable(t), Operation::HashDelete(v)) => hash::delete(t, *v, &mut seq),

        (Structure::Heap(h), Operation::HeapInsert(v)) => heap::insert(h, *v, &mut seq),
        (Structure::Heap(h), Operation::HeapExtractRoot) => heap::extract_root(h, &mut seq),
        (Structure::Heap(h), Operation::HeapBuild) => heap::build_heap(h, &mut seq),

        (Structure::Huffman(_), Operation::HuffmanBuild(text)) => {
            huffman::build_from_text(text, &mut seq)
        }
        (Structure::Huffman(_), Operation::HuffmanBuildFromFrequencies(freqs)) => {
            huffman::build(freqs, &mut seq)
        }
        (Structure::Huffman(t), Operation::HuffmanEncode(text)) => {
            huffman::encode(t, text, &mut seq)
        }
        (Structure::Huffman(t), Operation::HuffmanDecode(bits)) => {
            huffman::decode(t, bits, &mut seq)
        }

        (structure, operation) => {
            return Err(GenerateError::Unsupported {
                operation: operation.name(),
                structure: structure.kind(),
            })
        }
    }

    log::debug!(
        "generated {} steps for {} on {}",
        seq.len(),
        operation,
        structure.kind()
    );
    Ok(seq.into_steps())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::array::ArrayModel;
    use crate::structures::heap::{BinaryHeapModel, HeapKind};

    #[test]
    fn test_mismatched_operation_is_an_error() {
        let heap = Structure::Heap(BinaryHeapModel::new(HeapKind::Min));
        let err = generate(&heap, &Operation::BubbleSort, &GenerateOptions::default())
            .unwrap_err();
        assert_eq!(
            err,
            GenerateError::Unsupported {
                operation: "Bubble Sort",
                structure: StructureKind::Heap,
            }
        );
    }

    #[test]
    fn test_generation_leaves_structure_untouched() {
        let array = Structure::Array(ArrayModel::new(&[3, 2, 1]));
        let before = array.clone();
        let steps = generate(&array, &Operation::QuickSort, &GenerateOptions::default()).unwrap();
        assert!(!steps.is_empty());
        assert_eq!(array, before);
    }

    #[test]
    fn test_options_set_step_duration() {
        let array = Structure::Array(ArrayModel::new(&[2, 1]));
        let options = GenerateOptions {
            step_duration: Duration::from_millis(40),
        };
        let steps = generate(&array, &Operation::BubbleSort, &options).unwrap();
        assert!(steps
            .iter()
            .all(|s| s.duration == Duration::from_millis(40)));
    }
}
