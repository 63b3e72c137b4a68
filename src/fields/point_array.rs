use crate::error::{FractureError, FractureResult};
use rayon::prelude::*;

/// A value per (cell, quadrature point), stored cell-major.
#[derive(Clone, Debug, PartialEq)]
pub struct PointArray<T> {
    num_cells: usize,
    num_points: usize,
    data: Vec<T>,
}

impl<T> PointArray<T> {
    /// Wraps cell-major data of shape `(num_cells, num_points)`.
    pub fn from_vec(num_cells: usize, num_points: usize, data: Vec<T>) -> FractureResult<Self> {
        if data.len() != num_cells * num_points {
            return Err(FractureError::ShapeMismatch {
                expected: (num_cells, num_points),
                found: (data.len(), 1),
            });
        }

        Ok(Self {
            num_cells,
            num_points,
            data,
        })
    }

    pub fn from_fn(
        num_cells: usize,
        num_points: usize,
        mut f: impl FnMut(usize, usize) -> T,
    ) -> Self {
        let mut data = Vec::with_capacity(num_cells * num_points);

        for c in 0..num_cells {
            for q in 0..num_points {
                data.push(f(c, q));
            }
        }

        Self {
            num_cells,
            num_points,
            data,
        }
    }

    /// The same value at every point.
    pub fn filled(num_cells: usize, num_points: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self {
            num_cells,
            num_points,
            data: vec![value; num_cells * num_points],
        }
    }

    pub fn num_cells(&self) -> usize {
        self.num_cells
    }

    pub fn num_points(&self) -> usize {
        self.num_points
    }

    /// `(num_cells, num_points)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.num_cells, self.num_points)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, cell: usize, point: usize) -> Option<&T> {
        if cell < self.num_cells && point < self.num_points {
            self.data.get(cell * self.num_points + point)
        } else {
            None
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn iter(&self) -> std::slice::Iter<T> {
        self.data.iter()
    }

    /// Fails with `ShapeMismatch` unless `other` has the same shape.
    pub fn check_shape<U>(&self, other: &PointArray<U>) -> FractureResult<()> {
        if self.shape() != other.shape() {
            Err(FractureError::ShapeMismatch {
                expected: self.shape(),
                found: other.shape(),
            })
        } else {
            Ok(())
        }
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> PointArray<U> {
        PointArray {
            num_cells: self.num_cells,
            num_points: self.num_points,
            data: self.data.iter().map(f).collect(),
        }
    }

    /// Maps every point in parallel.
    pub fn par_map<U: Send>(&self, f: impl Fn(&T) -> U + Sync + Send) -> PointArray<U>
    where
        T: Sync,
    {
        PointArray {
            num_cells: self.num_cells,
            num_points: self.num_points,
            data: self.data.par_iter().map(f).collect(),
        }
    }

    /// Maps every point in parallel, stopping at the first error.
    pub fn par_try_map<U: Send>(
        &self,
        f: impl Fn(&T) -> FractureResult<U> + Sync + Send,
    ) -> FractureResult<PointArray<U>>
    where
        T: Sync,
    {
        let data = self
            .data
            .par_iter()
            .map(f)
            .collect::<FractureResult<Vec<_>>>()?;

        Ok(PointArray {
            num_cells: self.num_cells,
            num_points: self.num_points,
            data,
        })
    }

    /// Combines two arrays of identical shape point by point, in parallel,
    /// stopping at the first error.
    pub fn par_try_zip_map<U: Sync, V: Send>(
        &self,
        other: &PointArray<U>,
        f: impl Fn(&T, &U) -> FractureResult<V> + Sync + Send,
    ) -> FractureResult<PointArray<V>>
    where
        T: Sync,
    {
        self.check_shape(other)?;

        let data = self
            .data
            .par_iter()
            .zip(other.data.par_iter())
            .map(|(a, b)| f(a, b))
            .collect::<FractureResult<Vec<_>>>()?;

        Ok(PointArray {
            num_cells: self.num_cells,
            num_points: self.num_points,
            data,
        })
    }
}

impl<T> std::ops::Index<(usize, usize)> for PointArray<T> {
    type Output = T;

    #[inline]
    fn index(&self, (cell, point): (usize, usize)) -> &T {
        assert!(point < self.num_points, "quadrature point index out of bounds");
        &self.data[cell * self.num_points + point]
    }
}

impl<T> std::ops::IndexMut<(usize, usize)> for PointArray<T> {
    #[inline]
    fn index_mut(&mut self, (cell, point): (usize, usize)) -> &mut T {
        assert!(point < self.num_points, "quadrature point index out of bounds");
        &mut self.data[cell * self.num_points + point]
    }
}

impl<'a, T> IntoIterator for &'a PointArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_major_layout() {
        let a = PointArray::from_fn(2, 3, |c, q| 10 * c + q);
        assert_eq!(a.shape(), (2, 3));
        assert_eq!(a.as_slice(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(a[(1, 2)], 12);
        assert_eq!(a.get(1, 3), None);
        assert_eq!(a.get(2, 0), None);
    }

    #[test]
    fn from_vec_checks_length() {
        assert!(PointArray::from_vec(2, 2, vec![1.0; 4]).is_ok());
        assert_eq!(
            PointArray::from_vec(2, 2, vec![1.0; 3]),
            Err(FractureError::ShapeMismatch {
                expected: (2, 2),
                found: (3, 1)
            })
        );
    }

    #[test]
    fn zip_requires_same_shape() {
        let a = PointArray::filled(2, 2, 1.0);
        let b = PointArray::filled(2, 2, 3.0);
        let c = PointArray::filled(1, 4, 3.0);

        let sum = a.par_try_zip_map(&b, |x, y| Ok(x + y)).unwrap();
        assert!(sum.iter().all(|v| *v == 4.0));

        assert_eq!(
            a.par_try_zip_map(&c, |x, y| Ok(x + y)),
            Err(FractureError::ShapeMismatch {
                expected: (2, 2),
                found: (1, 4)
            })
        );
    }

    #[test]
    fn try_map_propagates_errors() {
        let a = PointArray::from_fn(1, 3, |_, q| q);
        let res = a.par_try_map(|q| {
            if *q == 2 {
                Err(FractureError::EigenDecomposition)
            } else {
                Ok(*q)
            }
        });
        assert_eq!(res, Err(FractureError::EigenDecomposition));
    }
}
