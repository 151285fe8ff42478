//! Huffman tree generators
//!
//! Build simulates the construction on a private tree. Because the first
//! emitted step resets the canonical tree, node ids in the private tree are
//! exactly the ids the canonical tree will hand out during playback.
//!
//! The working set is re-sorted by ascending frequency (stable) before each
//! pick, so equal frequencies keep their current order and a freshly merged
//! parent sorts after nodes of the same frequency.

use crate::step::{Mutation, Step, StepKind, StepSequence, TargetRef};
use crate::structures::huffman::{count_frequencies, HuffmanTree, TreeNodeId};

pub fn build_from_text(text: &str, seq: &mut StepSequence) {
    build(&count_frequencies(text), seq);
}

pub fn build(frequencies: &[(char, u32)], seq: &mut StepSequence) {
    if frequencies.is_empty() {
        seq.emit(
            StepKind::Highlight,
            TargetRef::Whole,
            "No symbols given; there is nothing to build",
        );
        return;
    }
    // Every internal node's frequency is bounded by the total
    let total = frequencies
        .iter()
        .try_fold(0u32, |acc, &(_, f)| acc.checked_add(f));
    if total.is_none() {
        seq.emit(
            StepKind::Highlight,
            TargetRef::Whole,
            "Frequencies sum past the largest supported count; the tree cannot be built",
        );
        return;
    }

    seq.push(
        Step::new(
            StepKind::Highlight,
            TargetRef::Whole,
            format!("Build a Huffman tree for {} symbols", frequencies.len()),
        )
        .with_mutation(Mutation::HuffmanReset),
    );

    let mut leaves = frequencies.to_vec();
    leaves.sort_by_key(|&(_, f)| f);

    let mut tree = HuffmanTree::new();
    let mut working: Vec<TreeNodeId> = Vec::with_capacity(leaves.len());
    for (symbol, frequency) in leaves {
        let id = tree.add_leaf(symbol, frequency);
        seq.push(
            Step::new(
                StepKind::Insert,
                TargetRef::TreeNode(id),
                format!("Leaf {:?} with frequency {}", symbol, frequency),
            )
            .with_param("frequency", frequency as i64)
            .with_mutation(Mutation::HuffmanAddLeaf { symbol, frequency }),
        );
        working.push(id);
    }

    while working.len() > 1 {
        working.sort_by_key(|&id| tree.node(id).map_or(0, |n| n.frequency));
        let left = working.remove(0);
        let right = working.remove(0);
        let (lf, rf) = (frequency(&tree, left), frequency(&tree, right));

        seq.push(
            Step::new(
                StepKind::Compare,
                TargetRef::TreeNode(left),
                format!("Take the two lowest frequencies: {} and {}", lf, rf),
            )
            .with_secondary(TargetRef::TreeNode(right)),
        );

        let Ok(parent) = tree.merge(left, right) else {
            // Unreachable: both ids come straight out of the working set
            // and the total was checked above
            break;
        };
        let sum = frequency(&tree, parent);
        seq.push(
            Step::new(
                StepKind::Insert,
                TargetRef::TreeNode(parent),
                format!("New node with frequency {} = {} + {}", sum, lf, rf),
            )
            .with_param("frequency", sum as i64)
            .with_mutation(Mutation::HuffmanMerge { left, right }),
        );
        seq.push(
            Step::new(
                StepKind::Connect,
                TargetRef::TreeNode(parent),
                format!("Left child (bit 0): {}", label(&tree, left)),
            )
            .with_secondary(TargetRef::TreeNode(left)),
        );
        seq.push(
            Step::new(
                StepKind::Connect,
                TargetRef::TreeNode(parent),
                format!("Right child (bit 1): {}", label(&tree, right)),
            )
            .with_secondary(TargetRef::TreeNode(right)),
        );
        working.push(parent);
    }

    let root = working[0];
    let root_is_leaf = tree.node(root).is_some_and(|n| n.is_leaf());
    let description = if root_is_leaf {
        format!(
            "Single symbol: {} is the root and has an empty code",
            label(&tree, root)
        )
    } else {
        format!("Root has frequency {}", frequency(&tree, root))
    };
    seq.push(
        Step::new(StepKind::Highlight, TargetRef::TreeNode(root), description)
            .with_mutation(Mutation::HuffmanSetRoot { node: root }),
    );
    // A private set_root cannot fail: the root is the only parentless node left
    let _ = tree.set_root(root);

    // Code assignment in depth-first order, left before right
    let codes = tree.codes();
    let mut pending = vec![root];
    while let Some(id) = pending.pop() {
        let Some(node) = tree.node(id) else { continue };
        if let Some(symbol) = node.symbol {
            let code = codes.get(&symbol).cloned().unwrap_or_default();
            seq.push(
                Step::new(
                    StepKind::Highlight,
                    TargetRef::TreeNode(id),
                    format!("Code for {:?}: {:?}", symbol, code),
                )
                .with_param("code", code),
            );
        }
        pending.extend(node.right);
        pending.extend(node.left);
    }
}

fn frequency(tree: &HuffmanTree, id: TreeNodeId) -> u32 {
    tree.node(id).map_or(0, |n| n.frequency)
}

fn label(tree: &HuffmanTree, id: TreeNodeId) -> String {
    match tree.node(id) {
        Some(node) => match node.symbol {
            Some(symbol) => format!("{:?}:{}", symbol, node.frequency),
            None => format!("({})", node.frequency),
        },
        None => "?".to_string(),
    }
}

/// Map every character through the code table, one step per traversed edge
pub fn encode(tree: &HuffmanTree, text: &str, seq: &mut StepSequence) {
    if !tree.is_built() {
        seq.emit(
            StepKind::Highlight,
            TargetRef::Whole,
            "Build the tree before encoding",
        );
        return;
    }
    if text.is_empty() {
        // An empty run still replaces the previous run's output
        seq.push(
            Step::new(StepKind::Highlight, TargetRef::Whole, "Nothing to encode")
                .with_mutation(Mutation::HuffmanClearEncoded),
        );
        return;
    }

    seq.push(
        Step::new(
            StepKind::Highlight,
            TargetRef::Whole,
            format!("Encode {} characters", text.chars().count()),
        )
        .with_mutation(Mutation::HuffmanClearEncoded),
    );

    let mut running = String::new();
    for symbol in text.chars() {
        let Some(leaf) = tree.leaf_for(symbol) else {
            seq.push(
                Step::new(
                    StepKind::Fade,
                    TargetRef::Whole,
                    format!("{:?} is not in the code table; skipped", symbol),
                )
                .with_param("bits", running.as_str()),
            );
            continue;
        };

        let path = tree.path_to(leaf);
        let mut code = String::new();
        for edge in path.windows(2) {
            let (from, to) = (edge[0], edge[1]);
            let bit = if tree.node(from).and_then(|n| n.left) == Some(to) {
                '0'
            } else {
                '1'
            };
            code.push(bit);
            running.push(bit);
            seq.push(
                Step::new(
                    StepKind::Highlight,
                    TargetRef::TreeNode(to),
                    format!(
                        "{:?}: go {} ({})",
                        symbol,
                        if bit == '0' { "left" } else { "right" },
                        bit
                    ),
                )
                .with_secondary(TargetRef::TreeNode(from))
                .with_param("bits", running.as_str()),
            );
        }

        let mut step = Step::new(
            StepKind::Highlight,
            TargetRef::TreeNode(leaf),
            format!("{:?} -> {:?}; encoded so far {:?}", symbol, code, running),
        )
        .with_param("bits", running.as_str());
        if !code.is_empty() {
            step = step.with_mutation(Mutation::HuffmanAppendEncoded { bits: code });
        }
        seq.push(step);
    }

    seq.push(
        Step::new(
            StepKind::Highlight,
            TargetRef::Whole,
            format!("Encoded: {}", running),
        )
        .with_param("bits", running),
    );
}

/// Walk the tree bit by bit, emitting a symbol whenever a leaf is reached
pub fn decode(tree: &HuffmanTree, bits: &str, seq: &mut StepSequence) {
    let Some(root) = tree.root() else {
        seq.emit(
            StepKind::Highlight,
            TargetRef::Whole,
            "Build the tree before decoding",
        );
        return;
    };
    if bits.is_empty() {
        seq.push(
            Step::new(StepKind::Highlight, TargetRef::Whole, "Nothing to decode")
                .with_mutation(Mutation::HuffmanClearDecoded),
        );
        return;
    }

    seq.push(
        Step::new(
            StepKind::Highlight,
            TargetRef::TreeNode(root),
            format!("Decode {} bits starting at the root", bits.chars().count()),
        )
        .with_mutation(Mutation::HuffmanClearDecoded),
    );

    let mut decoded = String::new();
    let mut current = root;
    for (position, bit) in bits.chars().enumerate() {
        let node = tree.node(current);
        let child = match bit {
            '0' => node.and_then(|n| n.left),
            '1' => node.and_then(|n| n.right),
            other => {
                seq.push(
                    Step::new(
                        StepKind::Fade,
                        TargetRef::TreeNode(current),
                        format!("Skip invalid bit {:?} at position {}", other, position),
                    )
                    .with_param("position", position),
                );
                continue;
            }
        };

        let Some(child) = child else {
            seq.push(
                Step::new(
                    StepKind::Fade,
                    TargetRef::TreeNode(current),
                    format!(
                        "Bit {} at position {} leads nowhere from {}; decoding stopped",
                        bit,
                        position,
                        label(tree, current)
                    ),
                )
                .with_param("error", true)
                .with_param("decoded", decoded.as_str()),
            );
            return;
        };

        seq.push(
            Step::new(
                StepKind::Move,
                TargetRef::TreeNode(child),
                format!(
                    "Bit {}: go {}",
                    bit,
                    if bit == '0' { "left" } else { "right" }
                ),
            )
            .with_secondary(TargetRef::TreeNode(current))
            .with_param("position", position),
        );
        current = child;

        let leaf_symbol = tree.node(current).filter(|n| n.is_leaf()).and_then(|n| n.symbol);
        if let Some(symbol) = leaf_symbol {
            decoded.push(symbol);
            seq.push(
                Step::new(
                    StepKind::Insert,
                    TargetRef::TreeNode(current),
                    format!("Leaf reached: {:?} (decoded {:?})", symbol, decoded),
                )
                .with_param("decoded", decoded.as_str())
                .with_mutation(Mutation::HuffmanAppendDecoded { symbol }),
            );
            seq.emit(
                StepKind::Highlight,
                TargetRef::TreeNode(root),
                "Back to the root",
            );
            current = root;
        }
    }

    if current != root {
        seq.emit(
            StepKind::Fade,
            TargetRef::TreeNode(current),
            "Trailing bits end inside the tree and are ignored",
        );
    }
    seq.push(
        Step::new(
            StepKind::Highlight,
            TargetRef::Whole,
            format!("Decoded: {:?}", decoded),
        )
        .with_param("decoded", decoded),
    );
}
