//! Linked list generators
//!
//! Node ids in the emitted steps are arena indices. New nodes take the next
//! free arena slot, which is `slot_count()` at generation time.

use crate::step::{Mutation, Step, StepKind, StepSequence, TargetRef};
use crate::structures::linked_list::LinkedListModel;

fn value_of(list: &LinkedListModel, id: usize) -> i32 {
    list.value(id).unwrap_or_default()
}

pub fn insert_head(list: &LinkedListModel, value: i32, seq: &mut StepSequence) {
    let new_id = list.slot_count();
    seq.push(
        Step::new(
            StepKind::Insert,
            TargetRef::Node(new_id),
            format!("Create node {} at the head", value),
        )
        .with_param("value", value)
        .with_mutation(Mutation::ListInsert { position: 0, value }),
    );

    match list.head() {
        Some(old_head) => {
            let old_value = value_of(list, old_head);
            seq.push(
                Step::new(
                    StepKind::Connect,
                    TargetRef::Node(new_id),
                    format!("{}.next = {} (old head)", value, old_value),
                )
                .with_secondary(TargetRef::Node(old_head)),
            );
            seq.push(
                Step::new(
                    StepKind::Connect,
                    TargetRef::Node(old_head),
                    format!("{}.prev = {}", old_value, value),
                )
                .with_secondary(TargetRef::Node(new_id)),
            );
            seq.emit(
                StepKind::Highlight,
                TargetRef::Node(new_id),
                format!("Head is now {}", value),
            );
        }
        None => {
            seq.emit(
                StepKind::Highlight,
                TargetRef::Node(new_id),
                format!("{} is both head and tail", value),
            );
        }
    }
}

pub fn insert_tail(list: &LinkedListModel, value: i32, seq: &mut StepSequence) {
    let new_id = list.slot_count();
    seq.push(
        Step::new(
            StepKind::Insert,
            TargetRef::Node(new_id),
            format!("Create node {} at the tail", value),
        )
        .with_param("value", value)
        .with_mutation(Mutation::ListInsert {
            position: list.len(),
            value,
        }),
    );

    match list.tail() {
        Some(old_tail) => {
            let old_value = value_of(list, old_tail);
            seq.push(
                Step::new(
                    StepKind::Connect,
                    TargetRef::Node(old_tail),
                    format!("{}.next = {}", old_value, value),
                )
                .with_secondary(TargetRef::Node(new_id)),
            );
            seq.push(
                Step::new(
                    StepKind::Connect,
                    TargetRef::Node(new_id),
                    format!("{}.prev = {} (old tail)", value, old_value),
                )
                .with_secondary(TargetRef::Node(old_tail)),
            );
            seq.emit(
                StepKind::Highlight,
                TargetRef::Node(new_id),
                format!("Tail is now {}", value),
            );
        }
        None => {
            seq.emit(
                StepKind::Highlight,
                TargetRef::Node(new_id),
                format!("{} is both head and tail", value),
            );
        }
    }
}

/// Insert so the new node ends up at `index`, walking to `index - 1` first
pub fn insert_at(list: &LinkedListModel, index: usize, value: i32, seq: &mut StepSequence) {
    if index > list.len() {
        seq.emit(
            StepKind::Highlight,
            TargetRef::Whole,
            format!(
                "Index {} is out of range for a list of {} nodes",
                index,
                list.len()
            ),
        );
        return;
    }
    if index == 0 {
        return insert_head(list, value, seq);
    }
    if index == list.len() {
        return insert_tail(list, value, seq);
    }

    let ids = list.node_ids();
    for (position, &id) in ids.iter().enumerate().take(index) {
        seq.push(
            Step::new(
                StepKind::Highlight,
                TargetRef::Node(id),
                format!("Walk to position {} (value {})", position, value_of(list, id)),
            )
            .with_param("position", position),
        );
    }

    let prev = ids[index - 1];
    let next = ids[index];
    let new_id = list.slot_count();
    let (prev_value, next_value) = (value_of(list, prev), value_of(list, next));

    seq.push(
        Step::new(
            StepKind::Insert,
            TargetRef::Node(new_id),
            format!("Create node {} between {} and {}", value, prev_value, next_value),
        )
        .with_param("value", value)
        .with_mutation(Mutation::ListInsert {
            position: index,
            value,
        }),
    );
    seq.push(
        Step::new(
            StepKind::Connect,
            TargetRef::Node(prev),
            format!("{}.next = {}, {}.prev = {}", prev_value, value, value, prev_value),
        )
        .with_secondary(TargetRef::Node(new_id)),
    );
    seq.push(
        Step::new(
            StepKind::Connect,
            TargetRef::Node(new_id),
            format!("{}.next = {}, {}.prev = {}", value, next_value, next_value, value),
        )
        .with_secondary(TargetRef::Node(next)),
    );
}

pub fn delete_head(list: &LinkedListModel, seq: &mut StepSequence) {
    let Some(head) = list.head() else {
        seq.emit(
            StepKind::Highlight,
            TargetRef::Whole,
            "The list is empty; there is no head to delete",
        );
        return;
    };
    let head_value = value_of(list, head);
    let successor = list.node(head).and_then(|n| n.next);

    seq.emit(
        StepKind::Highlight,
        TargetRef::Node(head),
        format!("Current head is {}", head_value),
    );
    if let Some(next) = successor {
        seq.push(
            Step::new(
                StepKind::Disconnect,
                TargetRef::Node(head),
                format!("Detach {} from {}", head_value, value_of(list, next)),
            )
            .with_secondary(TargetRef::Node(next)),
        );
    }
    seq.push(
        Step::new(
            StepKind::Delete,
            TargetRef::Node(head),
            format!("Remove {}", head_value),
        )
        .with_mutation(Mutation::ListRemoveHead),
    );
    match successor {
        Some(next) => seq.emit(
            StepKind::Highlight,
            TargetRef::Node(next),
            format!("Head is now {}", value_of(list, next)),
        ),
        None => seq.emit(StepKind::Highlight, TargetRef::Whole, "The list is now empty"),
    };
}

/// Single pass that flips both links of every node, then swaps head and tail
pub fn reverse(list: &LinkedListModel, seq: &mut StepSequence) {
    if list.len() < 2 {
        seq.emit(
            StepKind::Highlight,
            TargetRef::Whole,
            "Lists with fewer than two nodes are already reversed",
        );
        return;
    }

    let ids = list.node_ids();
    for (i, &id) in ids.iter().enumerate() {
        let new_next = if i == 0 { None } else { Some(ids[i - 1]) };
        let new_prev = ids.get(i + 1).copied();
        let value = value_of(list, id);

        seq.emit(
            StepKind::Highlight,
            TargetRef::Node(id),
            format!("Visit {}", value),
        );

        let description = match new_next {
            Some(n) => format!("{}.next = {} (swap next and prev)", value, value_of(list, n)),
            None => format!("{}.next = null (it becomes the tail)", value),
        };
        let mut step = Step::new(StepKind::Connect, TargetRef::Node(id), description)
            .with_mutation(Mutation::ListRewire {
                node: id,
                next: new_next,
                prev: new_prev,
            });
        if let Some(n) = new_next {
            step = step.with_secondary(TargetRef::Node(n));
        }
        seq.push(step);
    }

    let (first, last) = (ids[0], ids[ids.len() - 1]);
    seq.push(
        Step::new(
            StepKind::Move,
            TargetRef::Node(last),
            format!(
                "Swap roles: head = {}, tail = {}",
                value_of(list, last),
                value_of(list, first)
            ),
        )
        .with_secondary(TargetRef::Node(first))
        .with_mutation(Mutation::ListSetEnds {
            head: Some(last),
            tail: Some(first),
        }),
    );
}

/// Traverse head to tail comparing each value
pub fn search(list: &LinkedListModel, target: i32, seq: &mut StepSequence) {
    if list.is_empty() {
        seq.emit(
            StepKind::Highlight,
            TargetRef::Whole,
            format!("The list is empty; {} cannot be found", target),
        );
        return;
    }

    for (position, id) in list.node_ids().into_iter().enumerate() {
        let value = value_of(list, id);
        seq.push(
            Step::new(
                StepKind::Compare,
                TargetRef::Node(id),
                format!("Compare {} with target {}", value, target),
            )
            .with_param("position", position),
        );
        if value == target {
            seq.push(
                Step::new(
                    StepKind::Highlight,
                    TargetRef::Node(id),
                    format!("Found {} at position {}", target, position),
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
            format!("{} is not in the list", target),
        )
        .with_param("found", false),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::Structure;

    fn play(list: LinkedListModel, gen: impl Fn(&LinkedListModel, &mut StepSequence)) -> LinkedListModel {
        let mut seq = StepSequence::default();
        gen(&list, &mut seq);
        let mut structure = Structure::LinkedList(list);
        for step in seq.into_steps() {
            if let Some(m) = &step.mutation {
                structure.apply(m).unwrap();
            }
        }
        match structure {
            Structure::LinkedList(l) => l,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_reverse_example() {
        let list = play(LinkedListModel::new(&[1, 2, 3]), reverse);
        assert_eq!(list.values(), vec![3, 2, 1]);
        assert_eq!(list.value(list.head().unwrap()), Some(3));
        assert_eq!(list.value(list.tail().unwrap()), Some(1));
        assert!(list.is_consistent());
    }

    #[test]
    fn test_insert_head_and_tail() {
        let list = play(LinkedListModel::new(&[2]), |l, s| insert_head(l, 1, s));
        let list = play(list, |l, s| insert_tail(l, 3, s));
        assert_eq!(list.values(), vec![1, 2, 3]);
        assert!(list.is_consistent());
    }

    #[test]
    fn test_insert_at_walks_to_predecessor() {
        let base = LinkedListModel::new(&[10, 20, 30, 40]);
        let mut seq = StepSequence::default();
        insert_at(&base, 3, 35, &mut seq);
        let steps = seq.into_steps();
        let hops = steps
            .iter()
            .filter(|s| s.kind == StepKind::Highlight)
            .count();
        assert_eq!(hops, 3);
        assert_eq!(
            steps.iter().filter(|s| s.kind == StepKind::Connect).count(),
            2
        );

        let list = play(base, |l, s| insert_at(l, 3, 35, s));
        assert_eq!(list.values(), vec![10, 20, 30, 35, 40]);
        assert!(list.is_consistent());
    }

    #[test]
    fn test_insert_at_out_of_range() {
        let base = LinkedListModel::new(&[1]);
        let mut seq = StepSequence::default();
        insert_at(&base, 5, 0, &mut seq);
        let steps = seq.into_steps();
        assert_eq!(steps.len(), 1);
        assert!(steps[0].mutation.is_none());
    }

    #[test]
    fn test_delete_head_promotes_successor() {
        let list = play(LinkedListModel::new(&[7, 8]), delete_head);
        assert_eq!(list.values(), vec![8]);
        assert!(list.is_consistent());
        let list = play(list, delete_head);
        assert!(list.is_empty());
        let list = play(list, delete_head);
        assert!(list.is_empty());
    }

    #[test]
    fn test_search_stops_at_match() {
        let mut seq = StepSequence::default();
        search(&LinkedListModel::new(&[5, 6, 7]), 6, &mut seq);
        let steps = seq.into_steps();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[2].target, TargetRef::Node(1));
    }
}
