use crate::algebra::{CscMatrix, Shape, SparseFormatError};
use std::ops::AddAssign;

/// Accumulates `(row, col, value)` triplets and assembles them into
/// CSC format.
///
/// Entries are stored exactly as pushed.  Repeated `(row, col)` pairs are
/// summed during assembly, and entries with a zero value are kept as
/// explicit (structural) zeros.
#[derive(Debug, Clone)]
pub struct TripletAssembler<V> {
    shape: Shape,
    entries: Vec<(usize, usize, V)>,
}

impl<V> TripletAssembler<V>
where
    V: Clone + AddAssign,
{
    pub fn new(shape: impl Into<Shape>) -> Self {
        Self {
            shape: shape.into(),
            entries: Vec::new(),
        }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn push(&mut self, row: usize, col: usize, value: V) -> Result<(), SparseFormatError> {
        if row >= self.shape.nrows() || col >= self.shape.ncols() {
            return Err(SparseFormatError::BadIndex {
                row,
                col,
                shape: self.shape,
            });
        }
        self.entries.push((row, col, value));
        Ok(())
    }

    /// Entries sorted by column and then by row, with duplicates summed.
    pub fn into_sorted_entries(mut self) -> Vec<(usize, usize, V)> {
        self.entries.sort_by_key(|&(r, c, _)| (c, r));

        let mut merged: Vec<(usize, usize, V)> = Vec::with_capacity(self.entries.len());
        for (r, c, v) in self.entries {
            match merged.last_mut() {
                Some((lr, lc, lv)) if *lr == r && *lc == c => *lv += v,
                _ => merged.push((r, c, v)),
            }
        }
        merged
    }

    /// Assemble into CSC format, mapping every stored value through `f`.
    pub fn assemble_with<T, F>(self, mut f: F) -> CscMatrix<T>
    where
        F: FnMut(&V) -> T,
    {
        let (m, n): (usize, usize) = self.shape.into();
        let entries = self.into_sorted_entries();

        // column counts, then shift into column pointers
        let mut colptr = vec![0usize; n + 1];
        for &(_, c, _) in &entries {
            colptr[c] += 1;
        }
        let mut currentptr = 0;
        for p in &mut colptr {
            let count = *p;
            *p = currentptr;
            currentptr += count;
        }

        let rowval = entries.iter().map(|&(r, _, _)| r).collect();
        let nzval = entries.iter().map(|(_, _, v)| f(v)).collect();

        CscMatrix {
            m,
            n,
            colptr,
            rowval,
            nzval,
        }
    }
}

impl TripletAssembler<f64> {
    pub fn assemble(self) -> CscMatrix<f64> {
        self.assemble_with(|&v| v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triplet_assembly() {
        // A = [1.  0.  5.]
        //     [2.  0.  6.]
        let mut T = TripletAssembler::new((2, 3));
        T.push(1, 2, 6.).unwrap();
        T.push(0, 0, 1.).unwrap();
        T.push(0, 2, 2.).unwrap();
        T.push(1, 0, 2.).unwrap();
        T.push(0, 2, 3.).unwrap();
        T.push(1, 1, 0.).unwrap();

        let A = T.assemble();
        assert_eq!(A.colptr, vec![0, 2, 3, 5]);
        assert_eq!(A.rowval, vec![0, 1, 1, 0, 1]);
        assert_eq!(A.nzval, vec![1., 2., 0., 5., 6.]);
    }

    #[test]
    fn test_triplet_bad_index() {
        let mut T = TripletAssembler::<f64>::new((2, 2));
        assert_eq!(
            T.push(2, 0, 1.),
            Err(SparseFormatError::BadIndex {
                row: 2,
                col: 0,
                shape: Shape(2, 2)
            })
        );
    }
}
