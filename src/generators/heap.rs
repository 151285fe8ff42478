//! Binary heap generators
//!
//! A child only moves when it strictly beats its parent (`<` for a
//! min-heap, `>` for a max-heap), so equal values never swap. When both
//! children beat the node, the more extreme child wins; on a tie the left
//! child is kept.

use crate::step::{Mutation, Step, StepKind, StepSequence, TargetRef};
use crate::structures::heap::{left_child, parent, right_child, BinaryHeapModel, HeapKind};

fn compare(items: &[i32], a: usize, b: usize, description: String, seq: &mut StepSequence) {
    seq.push(
        Step::new(StepKind::Compare, TargetRef::Slot(a), description)
            .with_secondary(TargetRef::Slot(b))
            .with_param("left", items[a])
            .with_param("right", items[b]),
    );
}

fn swap(items: &mut [i32], a: usize, b: usize, seq: &mut StepSequence) {
    seq.push(
        Step::new(
            StepKind::Swap,
            TargetRef::Slot(a),
            format!("Swap {} and {}", items[a], items[b]),
        )
        .with_secondary(TargetRef::Slot(b))
        .with_mutation(Mutation::HeapSwap { i: a, j: b }),
    );
    items.swap(a, b);
}

fn sift_up(kind: HeapKind, items: &mut [i32], start: usize, seq: &mut StepSequence) -> usize {
    let mut i = start;
    while let Some(p) = parent(i) {
        compare(
            items,
            i,
            p,
            format!("Compare {} with parent {}", items[i], items[p]),
            seq,
        );
        if !kind.beats(items[i], items[p]) {
            break;
        }
        swap(items, i, p, seq);
        i = p;
    }
    i
}

fn sift_down(
    kind: HeapKind,
    items: &mut [i32],
    start: usize,
    len: usize,
    seq: &mut StepSequence,
) -> usize {
    let mut i = start;
    loop {
        let (l, r) = (left_child(i), right_child(i));
        if l >= len {
            break;
        }
        let mut best = l;
        if r < len {
            compare(
                items,
                l,
                r,
                format!("Compare children {} and {}", items[l], items[r]),
                seq,
            );
            if kind.beats(items[r], items[l]) {
                best = r;
            }
        }
        compare(
            items,
            best,
            i,
            format!("Compare child {} with {}", items[best], items[i]),
            seq,
        );
        if !kind.beats(items[best], items[i]) {
            break;
        }
        swap(items, best, i, seq);
        i = best;
    }
    i
}

pub fn insert(heap: &BinaryHeapModel, value: i32, seq: &mut StepSequence) {
    let mut items = heap.items().to_vec();
    let slot = items.len();
    items.push(value);

    seq.push(
        Step::new(
            StepKind::Insert,
            TargetRef::Slot(slot),
            format!("Append {} at slot {}", value, slot),
        )
        .with_param("value", value)
        .with_mutation(Mutation::HeapPush { value }),
    );

    let settled = sift_up(heap.kind(), &mut items, slot, seq);
    seq.emit(
        StepKind::Highlight,
        TargetRef::Slot(settled),
        format!("{} settles at slot {}", value, settled),
    );
}

pub fn extract_root(heap: &BinaryHeapModel, seq: &mut StepSequence) {
    if heap.is_empty() {
        seq.emit(
            StepKind::Highlight,
            TargetRef::Whole,
            "The heap is empty; there is no root to extract",
        );
        return;
    }

    let mut items = heap.items().to_vec();
    let last = items.len() - 1;
    let root = items[0];

    seq.push(
        Step::new(
            StepKind::Highlight,
            TargetRef::Slot(0),
            format!("Extract root {}", root),
        )
        .with_param("root", root),
    );
    if last > 0 {
        swap(&mut items, 0, last, seq);
    }
    seq.push(
        Step::new(
            StepKind::Delete,
            TargetRef::Slot(last),
            format!("Remove {} from the heap", root),
        )
        .with_mutation(Mutation::HeapPopLast),
    );
    items.pop();

    if !items.is_empty() {
        let len = items.len();
        let settled = sift_down(heap.kind(), &mut items, 0, len, seq);
        seq.emit(
            StepKind::Highlight,
            TargetRef::Slot(settled),
            format!("{} settles at slot {}", items[settled], settled),
        );
    }
}

/// Sift down every internal node from `n/2 - 1` back to the root
pub fn build_heap(heap: &BinaryHeapModel, seq: &mut StepSequence) {
    let n = heap.len();
    if n < 2 {
        let description = if n == 0 {
            "The heap is empty; nothing to build"
        } else {
            "A single value is already a heap"
        };
        seq.emit(StepKind::Highlight, TargetRef::Whole, description);
        return;
    }

    let kind = heap.kind();
    let mut items = heap.items().to_vec();
    seq.emit(
        StepKind::Highlight,
        TargetRef::Whole,
        format!("Build a {} from {} values", kind, n),
    );

    for i in (0..n / 2).rev() {
        seq.push(
            Step::new(
                StepKind::Scale,
                TargetRef::Slot(i),
                format!("Sift down {} from slot {}", items[i], i),
            )
            .with_param("slot", i),
        );
        sift_down(kind, &mut items, i, n, seq);
    }

    seq.emit(
        StepKind::Highlight,
        TargetRef::Slot(0),
        format!("Heap built with root {}", items[0]),
    );
}
