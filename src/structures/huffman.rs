//! Huffman tree stored in an arena
//!
//! Leaves own one symbol and its frequency; internal nodes own two children
//! and the summed frequency. Children point back to their parent by index,
//! which is only used to walk upward. Codes follow the root-to-leaf path
//! (left = `0`, right = `1`), so they are prefix-free. A tree with a single
//! symbol is a lone root leaf whose code is empty.

use super::ApplyError;
use rustc_hash::FxHashMap;

/// Arena index of a tree node
pub type TreeNodeId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanNode {
    pub symbol: Option<char>,
    pub frequency: u32,
    pub left: Option<TreeNodeId>,
    pub right: Option<TreeNodeId>,
    pub parent: Option<TreeNodeId>,
}

impl HuffmanNode {
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<HuffmanNode>,
    root: Option<TreeNodeId>,
    encoded: String,
    decoded: String,
}

impl HuffmanTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[HuffmanNode] {
        &self.nodes
    }

    pub fn node(&self, id: TreeNodeId) -> Option<&HuffmanNode> {
        self.nodes.get(id)
    }

    pub fn root(&self) -> Option<TreeNodeId> {
        self.root
    }

    pub fn root_node(&self) -> Option<&HuffmanNode> {
        self.root.and_then(|r| self.node(r))
    }

    /// Output accumulated by the last Encode run
    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    /// Output accumulated by the last Decode run
    pub fn decoded(&self) -> &str {
        &self.decoded
    }

    pub fn is_built(&self) -> bool {
        self.root.is_some()
    }

    /// Code table built by a depth-first walk from the root
    pub fn codes(&self) -> FxHashMap<char, String> {
        let mut codes = FxHashMap::default();
        let Some(root) = self.root else {
            return codes;
        };
        let mut pending = vec![(root, String::new())];
        while let Some((id, prefix)) = pending.pop() {
            let Some(node) = self.node(id) else {
                continue;
            };
            if let Some(symbol) = node.symbol {
                codes.insert(symbol, prefix.clone());
            }
            if let Some(right) = node.right {
                pending.push((right, format!("{}1", prefix)));
            }
            if let Some(left) = node.left {
                pending.push((left, format!("{}0", prefix)));
            }
        }
        codes
    }

    /// Leaf holding `symbol`, if any
    pub fn leaf_for(&self, symbol: char) -> Option<TreeNodeId> {
        self.nodes
            .iter()
            .position(|n| n.is_leaf() && n.symbol == Some(symbol))
    }

    /// Node ids from the root down to `id` (root first)
    pub fn path_to(&self, id: TreeNodeId) -> Vec<TreeNodeId> {
        let mut path = vec![id];
        let mut current = self.node(id).and_then(|n| n.parent);
        while let Some(p) = current {
            if path.len() > self.nodes.len() {
                break;
            }
            path.push(p);
            current = self.node(p).and_then(|n| n.parent);
        }
        path.reverse();
        path
    }

    /// Number of edges between the root and `id`
    pub fn depth(&self, id: TreeNodeId) -> usize {
        self.path_to(id).len().saturating_sub(1)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn add_leaf(&mut self, symbol: char, frequency: u32) -> TreeNodeId {
        self.nodes.push(HuffmanNode {
            symbol: Some(symbol),
            frequency,
            left: None,
            right: None,
            parent: None,
        });
        self.nodes.len() - 1
    }

    /// Create an internal node owning `left` and `right`
    pub fn merge(&mut self, left: TreeNodeId, right: TreeNodeId) -> Result<TreeNodeId, ApplyError> {
        if left == right {
            return Err(ApplyError::InvalidMerge { left, right });
        }
        let mut frequency: u32 = 0;
        for child in [left, right] {
            let node = self.node(child).ok_or(ApplyError::MissingNode(child))?;
            if node.parent.is_some() {
                return Err(ApplyError::InvalidMerge { left, right });
            }
            frequency = frequency
                .checked_add(node.frequency)
                .ok_or(ApplyError::FrequencyOverflow { left, right })?;
        }

        let id = self.nodes.len();
        self.nodes.push(HuffmanNode {
            symbol: None,
            frequency,
            left: Some(left),
            right: Some(right),
            parent: None,
        });
        self.nodes[left].parent = Some(id);
        self.nodes[right].parent = Some(id);
        Ok(id)
    }

    pub fn set_root(&mut self, id: TreeNodeId) -> Result<(), ApplyError> {
        let node = self.node(id).ok_or(ApplyError::MissingNode(id))?;
        if node.parent.is_some() {
            return Err(ApplyError::NotARoot(id));
        }
        self.root = Some(id);
        Ok(())
    }

    pub fn clear_encoded(&mut self) {
        self.encoded.clear();
    }

    pub fn append_encoded(&mut self, bits: &str) {
        self.encoded.push_str(bits);
    }

    pub fn clear_decoded(&mut self) {
        self.decoded.clear();
    }

    pub fn append_decoded(&mut self, symbol: char) {
        self.decoded.push(symbol);
    }
}

/// Symbol frequencies in order of first appearance
pub fn count_frequencies(text: &str) -> Vec<(char, u32)> {
    let mut order: Vec<(char, u32)> = Vec::new();
    let mut slots: FxHashMap<char, usize> = FxHashMap::default();
    for symbol in text.chars() {
        match slots.get(&symbol) {
            Some(&slot) => order[slot].1 += 1,
            None => {
                slots.insert(symbol, order.len());
                order.push((symbol, 1));
            }
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_symbol_tree() -> HuffmanTree {
        let mut tree = HuffmanTree::new();
        let b = tree.add_leaf('b', 1);
        let a = tree.add_leaf('a', 2);
        let root = tree.merge(b, a).unwrap();
        tree.set_root(root).unwrap();
        tree
    }

    #[test]
    fn test_codes_follow_edges() {
        let tree = two_symbol_tree();
        let codes = tree.codes();
        assert_eq!(codes[&'b'], "0");
        assert_eq!(codes[&'a'], "1");
        assert_eq!(tree.root_node().unwrap().frequency, 3);
        assert_eq!(tree.depth(0), 1);
        assert_eq!(tree.path_to(1), vec![2, 1]);
    }

    #[test]
    fn test_single_leaf_has_empty_code() {
        let mut tree = HuffmanTree::new();
        let leaf = tree.add_leaf('x', 4);
        tree.set_root(leaf).unwrap();
        assert_eq!(tree.codes()[&'x'], "");
    }

    #[test]
    fn test_merge_rejects_adopted_child() {
        let mut tree = two_symbol_tree();
        let c = tree.add_leaf('c', 1);
        assert!(tree.merge(0, c).is_err());
        assert!(tree.set_root(0).is_err());
    }

    #[test]
    fn test_merge_rejects_overflowing_frequencies() {
        let mut tree = HuffmanTree::new();
        let a = tree.add_leaf('a', u32::MAX);
        let b = tree.add_leaf('b', 1);
        assert_eq!(
            tree.merge(a, b),
            Err(ApplyError::FrequencyOverflow { left: a, right: b })
        );
        assert_eq!(tree.nodes().len(), 2);
        assert!(tree.nodes().iter().all(|n| n.parent.is_none()));
    }

    #[test]
    fn test_count_frequencies_keeps_first_appearance() {
        assert_eq!(
            count_frequencies("abcab"),
            vec![('a', 2), ('b', 2), ('c', 1)]
        );
        assert!(count_frequencies("").is_empty());
    }
}
