//! Serializable structural change commands
//!
//! A [`Mutation`] is a small tagged payload describing exactly one change to
//! the canonical structure. Steps carry them instead of closures so a step
//! sequence can be inspected and compared without executing anything.

use std::fmt;

/// One deferred change to the canonical structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    // Array
    ArraySwap { i: usize, j: usize },
    ArrayMarkSorted { index: usize },
    ArrayClearSorted,

    // Linked list (node ids are arena indices)
    ListInsert { position: usize, value: i32 },
    ListRemoveHead,
    ListRewire {
        node: usize,
        next: Option<usize>,
        prev: Option<usize>,
    },
    ListSetEnds {
        head: Option<usize>,
        tail: Option<usize>,
    },

    // Hash table
    HashAppend { bucket: usize, value: i32 },
    HashRemove { bucket: usize, position: usize },

    // Heap
    HeapPush { value: i32 },
    HeapSwap { i: usize, j: usize },
    HeapPopLast,

    // Huffman tree
    HuffmanReset,
    HuffmanAddLeaf { symbol: char, frequency: u32 },
    HuffmanMerge { left: usize, right: usize },
    HuffmanSetRoot { node: usize },
    HuffmanClearEncoded,
    HuffmanAppendEncoded { bits: String },
    HuffmanClearDecoded,
    HuffmanAppendDecoded { symbol: char },
}

impl Mutation {
    /// Short name of the structure family this command belongs to
    pub fn family(&self) -> &'static str {
        match self {
            Mutation::ArraySwap { .. }
            | Mutation::ArrayMarkSorted { .. }
            | Mutation::ArrayClearSorted => "array",
            Mutation::ListInsert { .. }
            | Mutation::ListRemoveHead
            | Mutation::ListRewire { .. }
            | Mutation::ListSetEnds { .. } => "linked list",
            Mutation::HashAppend { .. } | Mutation::HashRemove { .. } => "hash table",
            Mutation::HeapPush { .. } | Mutation::HeapSwap { .. } | Mutation::HeapPopLast => {
                "heap"
            }
            _ => "huffman tree",
        }
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutation::ArraySwap { i, j } => write!(f, "swap cells {} and {}", i, j),
            Mutation::ArrayMarkSorted { index } => write!(f, "mark cell {} sorted", index),
            Mutation::ArrayClearSorted => write!(f, "clear sorted flags"),
            Mutation::ListInsert { position, value } => {
                write!(f, "insert {} at position {}", value, position)
            }
            Mutation::ListRemoveHead => write!(f, "remove head"),
            Mutation::ListRewire { node, next, prev } => {
                write!(f, "rewire node {} (next {:?}, prev {:?})", node, next, prev)
            }
            Mutation::ListSetEnds { head, tail } => {
                write!(f, "set head {:?}, tail {:?}", head, tail)
            }
            Mutation::HashAppend { bucket, value } => {
                write!(f, "append {} to bucket {}", value, bucket)
            }
            Mutation::HashRemove { bucket, position } => {
                write!(f, "remove entry {} of bucket {}", position, bucket)
            }
            Mutation::HeapPush { value } => write!(f, "push {}", value),
            Mutation::HeapSwap { i, j } => write!(f, "swap slots {} and {}", i, j),
            Mutation::HeapPopLast => write!(f, "drop last slot"),
            Mutation::HuffmanReset => write!(f, "reset tree"),
            Mutation::HuffmanAddLeaf { symbol, frequency } => {
                write!(f, "add leaf {:?}:{}", symbol, frequency)
            }
            Mutation::HuffmanMerge { left, right } => {
                write!(f, "merge nodes {} and {}", left, right)
            }
            Mutation::HuffmanSetRoot { node } => write!(f, "set root {}", node),
            Mutation::HuffmanClearEncoded => write!(f, "clear encoded output"),
            Mutation::HuffmanAppendEncoded { bits } => write!(f, "append bits {}", bits),
            Mutation::HuffmanClearDecoded => write!(f, "clear decoded output"),
            Mutation::HuffmanAppendDecoded { symbol } => write!(f, "append {:?}", symbol),
        }
    }
}
