//! Chained hash table generators
//!
//! Insert always appends: the scan over the existing chain is shown for
//! teaching purposes only, and a collision means the target bucket was
//! already occupied, not that the value was already present.

use crate::step::{Mutation, Step, StepKind, StepSequence, TargetRef};
use crate::structures::hash_table::HashTableModel;

fn hash_step(table: &HashTableModel, value: i32, seq: &mut StepSequence) -> usize {
    let bucket = table.index(value);
    seq.push(
        Step::new(
            StepKind::Highlight,
            TargetRef::Bucket(bucket),
            format!(
                "hash({}) = |{}| mod {} = {}",
                value,
                value,
                table.bucket_count(),
                bucket
            ),
        )
        .with_param("key", value)
        .with_param("bucket", bucket),
    );
    bucket
}

pub fn insert(table: &HashTableModel, value: i32, seq: &mut StepSequence) {
    let bucket = hash_step(table, value, seq);
    let chain = table.bucket(bucket).unwrap_or_default();

    for (position, &entry) in chain.iter().enumerate() {
        seq.push(
            Step::new(
                StepKind::Compare,
                TargetRef::Entry { bucket, position },
                format!("Compare {} with {}", value, entry),
            )
            .with_param("entry", entry),
        );
    }

    let collision = !chain.is_empty();
    let description = if collision {
        format!(
            "Collision: append {} to bucket {} behind {} entr{}",
            value,
            bucket,
            chain.len(),
            if chain.len() == 1 { "y" } else { "ies" }
        )
    } else {
        format!("Place {} in empty bucket {}", value, bucket)
    };
    seq.push(
        Step::new(
            StepKind::Insert,
            TargetRef::Entry {
                bucket,
                position: chain.len(),
            },
            description,
        )
        .with_param("collision", collision)
        .with_mutation(Mutation::HashAppend { bucket, value }),
    );
}

/// Scan the key's chain; returns the match position after emitting its steps
fn scan(
    table: &HashTableModel,
    value: i32,
    bucket: usize,
    seq: &mut StepSequence,
) -> Option<usize> {
    let chain = table.bucket(bucket).unwrap_or_default();
    for (position, &entry) in chain.iter().enumerate() {
        seq.push(
            Step::new(
                StepKind::Compare,
                TargetRef::Entry { bucket, position },
                format!("Compare {} with {}", value, entry),
            )
            .with_param("entry", entry),
        );
        if entry == value {
            return Some(position);
        }
    }
    seq.push(
        Step::new(
            StepKind::Fade,
            TargetRef::Bucket(bucket),
            format!("{} is not in bucket {}", value, bucket),
        )
        .with_param("found", false),
    );
    None
}

pub fn search(table: &HashTableModel, value: i32, seq: &mut StepSequence) {
    if table.is_empty() {
        seq.emit(
            StepKind::Highlight,
            TargetRef::Whole,
            format!("The table is empty; {} cannot be found", value),
        );
        return;
    }
    let bucket = hash_step(table, value, seq);
    if let Some(position) = scan(table, value, bucket, seq) {
        seq.push(
            Step::new(
                StepKind::Highlight,
                TargetRef::Entry { bucket, position },
                format!("Found {} in bucket {} at position {}", value, bucket, position),
            )
            .with_param("found", true)
            .with_param("bucket", bucket),
        );
    }
}

pub fn delete(table: &HashTableModel, value: i32, seq: &mut StepSequence) {
    if table.is_empty() {
        seq.emit(
            StepKind::Highlight,
            TargetRef::Whole,
            format!("The table is empty; {} cannot be deleted", value),
        );
        return;
    }
    let bucket = hash_step(table, value, seq);
    if let Some(position) = scan(table, value, bucket, seq) {
        seq.push(
            Step::new(
                StepKind::Delete,
                TargetRef::Entry { bucket, position },
                format!("Remove {} from bucket {}", value, bucket),
            )
            .with_param("found", true)
            .with_mutation(Mutation::HashRemove { bucket, position }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::ParamValue;
    use crate::structures::Structure;

    fn play(table: HashTableModel, gen: impl Fn(&HashTableModel, &mut StepSequence)) -> HashTableModel {
        let mut seq = StepSequence::default();
        gen(&table, &mut seq);
        let mut structure = Structure::HashTable(table);
        for step in seq.into_steps() {
            if let Some(m) = &step.mutation {
                structure.apply(m).unwrap();
            }
        }
        match structure {
            Structure::HashTable(t) => t,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_collision_example() {
        let mut table = HashTableModel::new(7);
        for v in [7, 14, 2] {
            table = play(table, |t, s| insert(t, v, s));
        }
        assert_eq!(table.bucket(0), Some(&[7, 14][..]));
        assert_eq!(table.bucket(2), Some(&[2][..]));
        assert!(table.has_collision(0));
        assert!(!table.has_collision(2));
    }

    #[test]
    fn test_insert_scans_existing_chain() {
        let table = HashTableModel::with_values(7, &[7, 14]);
        let mut seq = StepSequence::default();
        insert(&table, 21, &mut seq);
        let steps = seq.into_steps();
        assert_eq!(
            steps.iter().filter(|s| s.kind == StepKind::Compare).count(),
            2
        );
        assert_eq!(
            steps.last().unwrap().param("collision"),
            Some(&ParamValue::Bool(true))
        );
    }

    #[test]
    fn test_duplicates_are_appended() {
        let table = play(HashTableModel::with_values(3, &[4]), |t, s| insert(t, 4, s));
        assert_eq!(table.bucket(1), Some(&[4, 4][..]));
    }

    #[test]
    fn test_delete_first_match_only() {
        let table = play(HashTableModel::with_values(3, &[4, 1, 4]), |t, s| delete(t, 4, s));
        assert_eq!(table.bucket(1), Some(&[1, 4][..]));
    }

    #[test]
    fn test_search_miss_and_empty() {
        let mut seq = StepSequence::default();
        search(&HashTableModel::with_values(5, &[1]), 6, &mut seq);
        assert_eq!(
            seq.into_steps().last().unwrap().param("found"),
            Some(&ParamValue::Bool(false))
        );

        let mut seq = StepSequence::default();
        delete(&HashTableModel::new(5), 6, &mut seq);
        assert_eq!(seq.len(), 1);
    }
}
