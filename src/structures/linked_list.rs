//! Doubly linked list stored in an arena
//!
//! Nodes live in a `Vec<Option<ListNode>>` and refer to each other by index.
//! `next` is the owning forward relation; `prev`, `head` and `tail` are plain
//! back-references used for upward traversal only. Slots are never reused, so
//! the id of the next node to be created is always `slot_count()`.

use super::ApplyError;

/// Arena index of a list node
pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListNode {
    pub value: i32,
    pub next: Option<NodeId>,
    pub prev: Option<NodeId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkedListModel {
    nodes: Vec<Option<ListNode>>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
}

impl LinkedListModel {
    pub fn new(values: &[i32]) -> Self {
        let mut list = LinkedListModel::default();
        for &value in values {
            list.push_back(value);
        }
        list
    }

    fn push_back(&mut self, value: i32) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Some(ListNode {
            value,
            next: None,
            prev: self.tail,
        }));
        match self.tail.and_then(|t| self.nodes[t].as_mut()) {
            Some(tail) => tail.next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
        id
    }

    pub fn head(&self) -> Option<NodeId> {
        self.head
    }

    pub fn tail(&self) -> Option<NodeId> {
        self.tail
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of arena slots, live or removed
    pub fn slot_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&ListNode> {
        self.nodes.get(id).and_then(|slot| slot.as_ref())
    }

    pub fn value(&self, id: NodeId) -> Option<i32> {
        self.node(id).map(|n| n.value)
    }

    /// Node ids from head to tail
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut ids = Vec::with_capacity(self.len);
        let mut current = self.head;
        while let Some(id) = current {
            // A broken chain must not loop forever
            if ids.len() > self.nodes.len() {
                break;
            }
            ids.push(id);
            current = self.node(id).and_then(|n| n.next);
        }
        ids
    }

    /// Values from head to tail
    pub fn values(&self) -> Vec<i32> {
        self.node_ids()
            .into_iter()
            .filter_map(|id| self.value(id))
            .collect()
    }

    /// Values from tail to head, following back-references
    pub fn values_backward(&self) -> Vec<i32> {
        let mut values = Vec::with_capacity(self.len);
        let mut current = self.tail;
        while let Some(id) = current {
            if values.len() > self.nodes.len() {
                break;
            }
            match self.node(id) {
                Some(node) => {
                    values.push(node.value);
                    current = node.prev;
                }
                None => break,
            }
        }
        values
    }

    /// Check head/tail ends and that forward and backward links agree
    pub fn is_consistent(&self) -> bool {
        if let Some(h) = self.head {
            if self.node(h).is_none_or(|n| n.prev.is_some()) {
                return false;
            }
        }
        if let Some(t) = self.tail {
            if self.node(t).is_none_or(|n| n.next.is_some()) {
                return false;
            }
        }
        let ids = self.node_ids();
        if ids.len() != self.len || ids.last().copied() != self.tail {
            return false;
        }
        ids.windows(2)
            .all(|w| self.node(w[1]).is_some_and(|n| n.prev == Some(w[0])))
    }

    /// Insert a new node so that it ends up at `position` (0 = head)
    pub fn insert(&mut self, position: usize, value: i32) -> Result<NodeId, ApplyError> {
        if position > self.len {
            return Err(ApplyError::IndexOutOfRange {
                index: position,
                len: self.len,
            });
        }

        let id = self.nodes.len();
        let prev = if position == 0 {
            None
        } else {
            self.node_ids().get(position - 1).copied()
        };
        let next = match prev {
            Some(p) => self.node(p).and_then(|n| n.next),
            None => self.head,
        };

        self.nodes.push(Some(ListNode { value, next, prev }));

        match prev {
            Some(p) => self.node_mut(p)?.next = Some(id),
            None => self.head = Some(id),
        }
        match next {
            Some(n) => self.node_mut(n)?.prev = Some(id),
            None => self.tail = Some(id),
        }
        self.len += 1;
        Ok(id)
    }

    /// Remove the head and promote its successor
    pub fn remove_head(&mut self) -> Result<i32, ApplyError> {
        let head = self.head.ok_or(ApplyError::Empty("linked list"))?;
        let node = self
            .nodes
            .get_mut(head)
            .and_then(Option::take)
            .ok_or(ApplyError::MissingNode(head))?;

        self.head = node.next;
        match node.next {
            Some(next) => self.node_mut(next)?.prev = None,
            None => self.tail = None,
        }
        self.len -= 1;
        Ok(node.value)
    }

    /// Overwrite both links of one node
    pub fn rewire(
        &mut self,
        id: NodeId,
        next: Option<NodeId>,
        prev: Option<NodeId>,
    ) -> Result<(), ApplyError> {
        for link in [next, prev].into_iter().flatten() {
            if self.node(link).is_none() {
                return Err(ApplyError::MissingNode(link));
            }
        }
        let node = self.node_mut(id)?;
        node.next = next;
        node.prev = prev;
        Ok(())
    }

    pub fn set_ends(
        &mut self,
        head: Option<NodeId>,
        tail: Option<NodeId>,
    ) -> Result<(), ApplyError> {
        for id in [head, tail].into_iter().flatten() {
            if self.node(id).is_none() {
                return Err(ApplyError::MissingNode(id));
            }
        }
        self.head = head;
        self.tail = tail;
        Ok(())
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut ListNode, ApplyError> {
        self.nodes
            .get_mut(id)
            .and_then(|slot| slot.as_mut())
            .ok_or(ApplyError::MissingNode(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_traverse() {
        let list = LinkedListModel::new(&[1, 2, 3]);
        assert_eq!(list.values(), vec![1, 2, 3]);
        assert_eq!(list.values_backward(), vec![3, 2, 1]);
        assert!(list.is_consistent());
    }

    #[test]
    fn test_insert_middle() {
        let mut list = LinkedListModel::new(&[1, 3]);
        let id = list.insert(1, 2).unwrap();
        assert_eq!(id, 2);
        assert_eq!(list.values(), vec![1, 2, 3]);
        assert!(list.is_consistent());
        assert!(list.insert(9, 0).is_err());
    }

    #[test]
    fn test_remove_head_until_empty() {
        let mut list = LinkedListModel::new(&[4, 5]);
        assert_eq!(list.remove_head().unwrap(), 4);
        assert_eq!(list.head(), list.tail());
        assert_eq!(list.remove_head().unwrap(), 5);
        assert!(list.is_empty());
        assert!(list.head().is_none() && list.tail().is_none());
        assert!(list.remove_head().is_err());
        // Removed slots are never reused
        assert_eq!(list.slot_count(), 2);
    }
}
