//! Canonical structure models
//!
//! This module owns the authoritative logical state of every visualized structure:
//! - [`array`]: cells with a "sorted" flag
//! - [`linked_list`]: arena-backed doubly linked list
//! - [`hash_table`]: fixed bucket count with chaining
//! - [`heap`]: array-backed binary heap (min or max)
//! - [`huffman`]: arena-backed Huffman tree plus encode/decode output
//!
//! # Mutation
//!
//! State only changes through [`Structure::apply`], which interprets one
//! [`Mutation`] command. The playback engine is the single caller during
//! normal operation. A rejected command leaves the structure untouched.

pub mod array;
pub mod hash_table;
pub mod heap;
pub mod huffman;
pub mod linked_list;

use crate::step::Mutation;
use array::ArrayModel;
use hash_table::HashTableModel;
use heap::BinaryHeapModel;
use huffman::HuffmanTree;
use linked_list::LinkedListModel;
use std::fmt;

/// Reasons a mutation command can be rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplyError {
    #[error("{mutation} does not apply to a {structure}")]
    WrongStructure {
        mutation: &'static str,
        structure: &'static str,
    },

    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("node {0} does not exist")]
    MissingNode(usize),

    #[error("cannot merge nodes {left} and {right}")]
    InvalidMerge { left: usize, right: usize },

    #[error("frequencies of nodes {left} and {right} overflow")]
    FrequencyOverflow { left: usize, right: usize },

    #[error("node {0} has a parent and cannot be the root")]
    NotARoot(usize),

    #[error("the {0} is empty")]
    Empty(&'static str),
}

/// Which structure family is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructureKind {
    Array,
    LinkedList,
    HashTable,
    Heap,
    Huffman,
}

impl StructureKind {
    pub const ALL: [StructureKind; 5] = [
        StructureKind::Array,
        StructureKind::LinkedList,
        StructureKind::HashTable,
        StructureKind::Heap,
        StructureKind::Huffman,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StructureKind::Array => "array",
            StructureKind::LinkedList => "linked list",
            StructureKind::HashTable => "hash table",
            StructureKind::Heap => "heap",
            StructureKind::Huffman => "huffman tree",
        }
    }

    /// Next kind in display order, wrapping around
    pub fn next(self) -> Self {
        match self {
            StructureKind::Array => StructureKind::LinkedList,
            StructureKind::LinkedList => StructureKind::HashTable,
            StructureKind::HashTable => StructureKind::Heap,
            StructureKind::Heap => StructureKind::Huffman,
            StructureKind::Huffman => StructureKind::Array,
        }
    }
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The canonical state, one variant active at a time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Structure {
    Array(ArrayModel),
    LinkedList(LinkedListModel),
    HashTable(HashTableModel),
    Heap(BinaryHeapModel),
    Huffman(HuffmanTree),
}

impl Structure {
    pub fn kind(&self) -> StructureKind {
        match self {
            Structure::Array(_) => StructureKind::Array,
            Structure::LinkedList(_) => StructureKind::LinkedList,
            Structure::HashTable(_) => StructureKind::HashTable,
            Structure::Heap(_) => StructureKind::Heap,
            Structure::Huffman(_) => StructureKind::Huffman,
        }
    }

    /// Number of elements (leaves for a Huffman tree)
    pub fn len(&self) -> usize {
        match self {
            Structure::Array(a) => a.len(),
            Structure::LinkedList(l) => l.len(),
            Structure::HashTable(t) => t.len(),
            Structure::Heap(h) => h.len(),
            Structure::Huffman(t) => t.nodes().iter().filter(|n| n.is_leaf()).count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Interpret one deferred mutation command
    pub fn apply(&mut self, mutation: &Mutation) -> Result<(), ApplyError> {
        let structure = self.kind().name();
        match (self, mutation) {
            (Structure::Array(a), Mutation::ArraySwap { i, j }) => a.swap(*i, *j),
            (Structure::Array(a), Mutation::ArrayMarkSorted { index }) => a.mark_sorted(*index),
            (Structure::Array(a), Mutation::ArrayClearSorted) => {
                a.clear_sorted();
                Ok(())
            }

            (Structure::LinkedList(l), Mutation::ListInsert { position, value }) => {
                l.insert(*position, *value).map(|_| ())
            }
            (Structure::LinkedList(l), Mutation::ListRemoveHead) => l.remove_head().map(|_| ()),
            (Structure::LinkedList(l), Mutation::ListRewire { node, next, prev }) => {
                l.rewire(*node, *next, *prev)
            }
            (Structure::LinkedList(l), Mutation::ListSetEnds { head, tail }) => {
                l.set_ends(*head, *tail)
            }

            (Structure::HashTable(t), Mutation::HashAppend { bucket, value }) => {
                t.append(*bucket, *value)
            }
            (Structure::HashTable(t), Mutation::HashRemove { bucket, position }) => {
                t.remove(*bucket, *position).map(|_| ())
            }

            (Structure::Heap(h), Mutation::HeapPush { value }) => {
                h.push(*value);
                Ok(())
            }
            (Structure::Heap(h), Mutation::HeapSwap { i, j }) => h.swap(*i, *j),
            (Structure::Heap(h), Mutation::HeapPopLast) => h.pop_last().map(|_| ()),

            (Structure::Huffman(t), Mutation::HuffmanReset) => {
                t.reset();
                Ok(())
            }
            (Structure::Huffman(t), Mutation::HuffmanAddLeaf { symbol, frequency }) => {
                t.add_leaf(*symbol, *frequency);
                Ok(())
            }
            (Structure::Huffman(t), Mutation::HuffmanMerge { left, right }) => {
                t.merge(*left, *right).map(|_| ())
            }
            (Structure::Huffman(t), Mutation::HuffmanSetRoot { node }) => t.set_root(*node),
            (Structure::Huffman(t), Mutation::HuffmanClearEncoded) => {
                t.clear_encoded();
                Ok(())
            }
            (Structure::Huffman(t), Mutation::HuffmanAppendEncoded { bits }) => {
                t.append_encoded(bits);
                Ok(())
            }
            (Structure::Huffman(t), Mutation::HuffmanClearDecoded) => {
                t.clear_decoded();
                Ok(())
            }
            (Structure::Huffman(t), Mutation::HuffmanAppendDecoded { symbol }) => {
                t.append_decoded(*symbol);
                Ok(())
            }

            (_, mutation) => Err(ApplyError::WrongStructure {
                mutation: mutation.family(),
                structure,
            }),
        }
    }

    /// One-line textual rendering used by headless mode and tests
    pub fn summary(&self) -> String {
        match self {
            Structure::Array(a) => format!("{:?}", a.values()),
            Structure::LinkedList(l) => {
                let values: Vec<String> = l.values().iter().map(|v| v.to_string()).collect();
                if values.is_empty() {
                    "(empty)".to_string()
                } else {
                    values.join(" -> ")
                }
            }
            Structure::HashTable(t) => t
                .buckets()
                .iter()
                .enumerate()
                .map(|(i, b)| format!("[{}] {:?}", i, b))
                .collect::<Vec<_>>()
                .join("  "),
            Structure::Heap(h) => format!("{} {:?}", h.kind(), h.items()),
            Structure::Huffman(t) => match t.root_node() {
                Some(root) => {
                    let mut codes: Vec<_> = t.codes().into_iter().collect();
                    codes.sort();
                    let table: Vec<String> =
                        codes.iter().map(|(s, c)| format!("{:?}={}", s, c)).collect();
                    format!("root {} | {}", root.frequency, table.join(" "))
                }
                None => "(no tree)".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_dispatches_by_variant() {
        let mut s = Structure::Array(ArrayModel::new(&[2, 1]));
        s.apply(&Mutation::ArraySwap { i: 0, j: 1 }).unwrap();
        assert_eq!(s.summary(), "[1, 2]");
    }

    #[test]
    fn test_wrong_structure_is_rejected_without_change() {
        let mut s = Structure::Heap(BinaryHeapModel::from_values(heap::HeapKind::Min, &[1]));
        let before = s.clone();
        let err = s.apply(&Mutation::ArraySwap { i: 0, j: 0 }).unwrap_err();
        assert!(matches!(err, ApplyError::WrongStructure { .. }));
        assert_eq!(s, before);
    }

    #[test]
    fn test_kind_cycle_wraps() {
        let mut kind = StructureKind::Array;
        for _ in 0..StructureKind::ALL.len() {
            kind = kind.next();
        }
        assert_eq!(kind, StructureKind::Array);
    }
}
