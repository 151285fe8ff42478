//! Hash table with separate chaining
//!
//! The bucket count is fixed at construction. `index(key) = |key| mod buckets`
//! and every bucket keeps its entries in insertion order.

use super::ApplyError;

/// Bucket count used when the caller does not pick one
pub const DEFAULT_BUCKET_COUNT: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashTableModel {
    buckets: Vec<Vec<i32>>,
}

impl HashTableModel {
    /// Create an empty table. A zero bucket count is bumped to one.
    pub fn new(bucket_count: usize) -> Self {
        HashTableModel {
            buckets: vec![Vec::new(); bucket_count.max(1)],
        }
    }

    /// Create a table and append every value in order
    pub fn with_values(bucket_count: usize, values: &[i32]) -> Self {
        let mut table = Self::new(bucket_count);
        for &value in values {
            let bucket = table.index(value);
            table.buckets[bucket].push(value);
        }
        table
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Bucket a key hashes to
    pub fn index(&self, key: i32) -> usize {
        (key.unsigned_abs() as usize) % self.buckets.len()
    }

    pub fn bucket(&self, index: usize) -> Option<&[i32]> {
        self.buckets.get(index).map(|b| b.as_slice())
    }

    pub fn buckets(&self) -> &[Vec<i32>] {
        &self.buckets
    }

    /// A bucket reports a collision once it holds more than one entry
    pub fn has_collision(&self, index: usize) -> bool {
        self.buckets.get(index).is_some_and(|b| b.len() > 1)
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(|b| b.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(|b| b.is_empty())
    }

    /// Position of the first equal entry in the key's bucket
    pub fn find(&self, key: i32) -> Option<(usize, usize)> {
        let bucket = self.index(key);
        self.buckets[bucket]
            .iter()
            .position(|&v| v == key)
            .map(|position| (bucket, position))
    }

    pub fn append(&mut self, bucket: usize, value: i32) -> Result<(), ApplyError> {
        let len = self.buckets.len();
        self.buckets
            .get_mut(bucket)
            .ok_or(ApplyError::IndexOutOfRange { index: bucket, len })?
            .push(value);
        Ok(())
    }

    pub fn remove(&mut self, bucket: usize, position: usize) -> Result<i32, ApplyError> {
        let len = self.buckets.len();
        let chain = self
            .buckets
            .get_mut(bucket)
            .ok_or(ApplyError::IndexOutOfRange { index: bucket, len })?;
        if position >= chain.len() {
            return Err(ApplyError::IndexOutOfRange {
                index: position,
                len: chain.len(),
            });
        }
        Ok(chain.remove(position))
    }
}

impl Default for HashTableModel {
    fn default() -> Self {
        Self::new(DEFAULT_BUCKET_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_uses_absolute_value() {
        let table = HashTableModel::new(7);
        assert_eq!(table.index(9), 2);
        assert_eq!(table.index(-9), 2);
        assert_eq!(table.index(i32::MIN), (i32::MIN.unsigned_abs() as usize) % 7);
    }

    #[test]
    fn test_collision_reporting() {
        let table = HashTableModel::with_values(7, &[7, 14, 2]);
        assert_eq!(table.bucket(0), Some(&[7, 14][..]));
        assert_eq!(table.bucket(2), Some(&[2][..]));
        assert!(table.has_collision(0));
        assert!(!table.has_collision(2));
        assert_eq!(table.find(14), Some((0, 1)));
        assert_eq!(table.find(21), None);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut table = HashTableModel::with_values(5, &[1, 6, 11]);
        assert_eq!(table.remove(1, 1).unwrap(), 6);
        assert_eq!(table.bucket(1), Some(&[1, 11][..]));
        assert!(table.remove(1, 5).is_err());
    }
}
