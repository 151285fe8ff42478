//! Array model: an ordered run of cells with a per-cell "sorted" flag

use super::ApplyError;

/// One array slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub value: i32,
    pub sorted: bool,
}

impl Cell {
    pub fn new(value: i32) -> Self {
        Cell {
            value,
            sorted: false,
        }
    }
}

/// The canonical array
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrayModel {
    cells: Vec<Cell>,
}

impl ArrayModel {
    pub fn new(values: &[i32]) -> Self {
        ArrayModel {
            cells: values.iter().copied().map(Cell::new).collect(),
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Snapshot of the current values (generators work on this copy)
    pub fn values(&self) -> Vec<i32> {
        self.cells.iter().map(|c| c.value).collect()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<i32> {
        self.cells.get(index).map(|c| c.value)
    }

    /// Whether the values are in non-decreasing order
    pub fn is_ascending(&self) -> bool {
        self.cells.windows(2).all(|w| w[0].value <= w[1].value)
    }

    pub fn swap(&mut self, i: usize, j: usize) -> Result<(), ApplyError> {
        self.check(i)?;
        self.check(j)?;
        self.cells.swap(i, j);
        Ok(())
    }

    pub fn mark_sorted(&mut self, index: usize) -> Result<(), ApplyError> {
        self.check(index)?;
        self.cells[index].sorted = true;
        Ok(())
    }

    pub fn clear_sorted(&mut self) {
        for cell in &mut self.cells {
            cell.sorted = false;
        }
    }

    fn check(&self, index: usize) -> Result<(), ApplyError> {
        if index < self.cells.len() {
            Ok(())
        } else {
            Err(ApplyError::IndexOutOfRange {
                index,
                len: self.cells.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_and_flags() {
        let mut array = ArrayModel::new(&[3, 1, 2]);
        array.swap(0, 1).unwrap();
        assert_eq!(array.values(), vec![1, 3, 2]);

        array.mark_sorted(0).unwrap();
        assert!(array.cells()[0].sorted);
        array.clear_sorted();
        assert!(array.cells().iter().all(|c| !c.sorted));
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let mut array = ArrayModel::new(&[1]);
        assert!(array.swap(0, 4).is_err());
        assert_eq!(array.values(), vec![1]);
    }
}
