//! Property-based tests for generators and playback.
//!
//! Sorting results and swap counts are checked against reference sorts,
//! heap order after arbitrary edit sequences, Huffman round trips, hash
//! placement, and the equivalence of the different ways to drive playback.

use proptest::prelude::*;
use stepviz::engine::{PlaybackEngine, StepOutcome};
use stepviz::generators::{generate, GenerateOptions, Operation};
use stepviz::step::{count_kind, ParamValue, Step, StepKind};
use stepviz::structures::array::ArrayModel;
use stepviz::structures::hash_table::HashTableModel;
use stepviz::structures::heap::{BinaryHeapModel, HeapKind};
use stepviz::structures::huffman::HuffmanTree;
use stepviz::structures::Structure;

fn steps_for(structure: &Structure, operation: &Operation) -> Vec<Step> {
    generate(structure, operation, &GenerateOptions::default()).expect("Generation failed")
}

/// Generate, play to completion, clear; returns the generated steps
fn run(engine: &mut PlaybackEngine, operation: &Operation) -> Vec<Step> {
    let steps = steps_for(engine.structure(), operation);
    engine.enqueue(steps.clone());
    engine.run_to_completion();
    engine.clear();
    steps
}

fn distinct_values(max_len: usize) -> impl Strategy<Value = Vec<i32>> {
    prop::collection::btree_set(-500i32..500, 0..max_len)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

// ========== Reference sorts, counting exchanges ==========

fn reference_bubble(mut v: Vec<i32>) -> (Vec<i32>, usize) {
    let n = v.len();
    let mut swaps = 0;
    for pass in 0..n.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..n - 1 - pass {
            if v[j] > v[j + 1] {
                v.swap(j, j + 1);
                swaps += 1;
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
    (v, swaps)
}

fn reference_selection(mut v: Vec<i32>) -> (Vec<i32>, usize) {
    let n = v.len();
    let mut swaps = 0;
    for i in 0..n.saturating_sub(1) {
        let min = (i..n).min_by_key(|&j| v[j]).unwrap_or(i);
        if min != i {
            v.swap(i, min);
            swaps += 1;
        }
    }
    (v, swaps)
}

fn reference_insertion(mut v: Vec<i32>) -> (Vec<i32>, usize) {
    let mut swaps = 0;
    for i in 1..v.len() {
        let mut j = i;
        while j > 0 && v[j - 1] > v[j] {
            v.swap(j - 1, j);
            swaps += 1;
            j -= 1;
        }
    }
    (v, swaps)
}

fn reference_quick(mut v: Vec<i32>) -> (Vec<i32>, usize) {
    fn partition(v: &mut [i32], low: usize, high: usize, swaps: &mut usize) {
        if low >= high {
            return;
        }
        let pivot = v[high];
        let mut boundary = low;
        for j in low..high {
            if v[j] < pivot {
                if boundary != j {
                    v.swap(boundary, j);
                    *swaps += 1;
                }
                boundary += 1;
            }
        }
        if boundary != high {
            v.swap(boundary, high);
            *swaps += 1;
        }
        if boundary > low {
            partition(v, low, boundary - 1, swaps);
        }
        partition(v, boundary + 1, high, swaps);
    }

    let mut swaps = 0;
    if !v.is_empty() {
        let high = v.len() - 1;
        partition(&mut v, 0, high, &mut swaps);
    }
    (v, swaps)
}

#[derive(Debug, Clone)]
enum HeapEdit {
    Insert(i32),
    Extract,
}

fn heap_edit() -> impl Strategy<Value = HeapEdit> {
    prop_oneof![
        (-100i32..100).prop_map(HeapEdit::Insert),
        Just(HeapEdit::Extract),
    ]
}

/// Text over a small alphabet with at least two distinct symbols
fn huffman_text() -> impl Strategy<Value = String> {
    "[a-f ]{2,40}".prop_filter("needs two distinct symbols", |s| {
        let mut chars = s.chars();
        let first = chars.next();
        chars.any(|c| Some(c) != first)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every sort ends ascending and emits one Swap step per reference exchange.
    #[test]
    fn sorts_match_reference(values in distinct_values(16)) {
        let cases: [(Operation, fn(Vec<i32>) -> (Vec<i32>, usize)); 4] = [
            (Operation::BubbleSort, reference_bubble),
            (Operation::SelectionSort, reference_selection),
            (Operation::InsertionSort, reference_insertion),
            (Operation::QuickSort, reference_quick),
        ];
        for (operation, reference) in cases {
            let mut engine = PlaybackEngine::new(Structure::Array(ArrayModel::new(&values)));
            let steps = run(&mut engine, &operation);
            let (expected, swaps) = reference(values.clone());

            let Structure::Array(array) = engine.structure() else {
                panic!("Expected an array");
            };
            prop_assert_eq!(array.values(), expected, "{}", operation);
            prop_assert!(array.is_ascending());
            prop_assert_eq!(count_kind(&steps, StepKind::Swap), swaps, "{}", operation);
        }
    }

    /// Heap order holds after building and after every insert or extract.
    #[test]
    fn heap_order_holds(
        values in prop::collection::vec(-100i32..100, 0..12),
        max in any::<bool>(),
        edits in prop::collection::vec(heap_edit(), 0..8),
    ) {
        let kind = if max { HeapKind::Max } else { HeapKind::Min };
        let mut engine = PlaybackEngine::new(Structure::Heap(BinaryHeapModel::from_values(kind, &values)));
        run(&mut engine, &Operation::HeapBuild);

        let mut expected_len = values.len();
        for edit in edits {
            match edit {
                HeapEdit::Insert(v) => {
                    run(&mut engine, &Operation::HeapInsert(v));
                    expected_len += 1;
                }
                HeapEdit::Extract => {
                    run(&mut engine, &Operation::HeapExtractRoot);
                    expected_len = expected_len.saturating_sub(1);
                }
            }
            let Structure::Heap(heap) = engine.structure() else {
                panic!("Expected a heap");
            };
            prop_assert!(heap.is_valid(), "{:?}", heap.items());
            prop_assert_eq!(heap.len(), expected_len);
        }
    }

    /// Decoding the encoding of a text with the tree built from it gives the text back.
    #[test]
    fn huffman_round_trip(text in huffman_text()) {
        let mut engine = PlaybackEngine::new(Structure::Huffman(HuffmanTree::new()));
        run(&mut engine, &Operation::HuffmanBuild(text.clone()));
        run(&mut engine, &Operation::HuffmanEncode(text.clone()));

        let bits = match engine.structure() {
            Structure::Huffman(tree) => tree.encoded().to_string(),
            _ => panic!("Expected a Huffman tree"),
        };
        prop_assert!(bits.chars().all(|c| c == '0' || c == '1'));
        run(&mut engine, &Operation::HuffmanDecode(bits));

        let Structure::Huffman(tree) = engine.structure() else {
            panic!("Expected a Huffman tree");
        };
        prop_assert_eq!(tree.decoded(), text.as_str());
    }

    /// A value searched after insertion is found in bucket |v| mod B.
    #[test]
    fn hash_search_finds_bucket(
        buckets in 1usize..13,
        existing in prop::collection::vec(-1000i32..1000, 0..10),
        v in -1000i32..1000,
    ) {
        let table = HashTableModel::with_values(buckets, &existing);
        let mut engine = PlaybackEngine::new(Structure::HashTable(table));
        run(&mut engine, &Operation::HashInsert(v));
        let steps = run(&mut engine, &Operation::HashSearch(v));

        let expected = (v.unsigned_abs() as usize % buckets) as i64;
        let found = steps
            .iter()
            .find(|s| s.param("found") == Some(&ParamValue::Bool(true)));
        prop_assert!(found.is_some(), "{} not found", v);
        prop_assert_eq!(found.and_then(|s| s.param("bucket")), Some(&ParamValue::Int(expected)));
    }

    /// play() to completion and totalSteps x step_forward() agree.
    #[test]
    fn play_equals_step_forward(values in distinct_values(10), quick in any::<bool>()) {
        let structure = Structure::Array(ArrayModel::new(&values));
        let operation = if quick { Operation::QuickSort } else { Operation::InsertionSort };
        let steps = steps_for(&structure, &operation);

        let mut played = PlaybackEngine::new(structure.clone());
        played.enqueue(steps.clone());
        played.run_to_completion();

        let mut stepped = PlaybackEngine::new(structure);
        stepped.enqueue(steps);
        for _ in 0..stepped.total_steps() {
            stepped.step_forward();
        }

        prop_assert_eq!(played.structure(), stepped.structure());
        prop_assert_eq!(played.current_step(), stepped.current_step());
    }

    /// Pausing after step k and resuming gives the same result as an uninterrupted run.
    #[test]
    fn pause_resume_is_transparent(values in distinct_values(10), k in 0usize..40) {
        let structure = Structure::Array(ArrayModel::new(&values));
        let steps = steps_for(&structure, &Operation::BubbleSort);

        let mut straight = PlaybackEngine::new(structure.clone());
        straight.enqueue(steps.clone());
        straight.run_to_completion();

        let mut paused = PlaybackEngine::new(structure);
        paused.enqueue(steps);
        paused.play();
        let k = k.min(paused.total_steps());
        while paused.current_step() < k {
            paused.advance();
        }
        paused.pause();
        // Let any in-flight step settle, then confirm nothing more happens
        while paused.in_flight_step().is_some() {
            paused.advance();
        }
        let held = paused.current_step();
        prop_assert_eq!(paused.advance(), StepOutcome::Idle);
        prop_assert_eq!(paused.current_step(), held);

        paused.resume();
        while paused.advance() != StepOutcome::Completed {}

        prop_assert_eq!(paused.structure(), straight.structure());
        prop_assert_eq!(paused.total_steps(), straight.total_steps());
        prop_assert_eq!(paused.current_step(), straight.current_step());
    }
}
