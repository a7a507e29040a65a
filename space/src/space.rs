use crate::dim::{DimBounds, Dimension};
use crate::errors::{Result, SpaceError};
use crate::value::{Point, Value};
use ndarray::{Array2, ArrayBase, Data, Ix2};
use ndarray_rand::rand::Rng;

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// An ordered composite of [`Dimension`]s.
///
/// The construction order defines the point-vector index semantics end to
/// end: the i-th component of a point belongs to the i-th dimension, and the
/// warped representation concatenates per-dimension blocks in the same order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct Space {
    dimensions: Vec<Dimension>,
}

impl Space {
    /// Build a space from an ordered dimension list, re-checking every
    /// dimension specification
    pub fn new(dimensions: Vec<Dimension>) -> Result<Self> {
        for dim in &dimensions {
            dim.check()?;
        }
        Ok(Space { dimensions })
    }

    /// The dimensions, in point-index order
    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    /// Dimensionality of the original representation
    pub fn n_dims(&self) -> usize {
        self.dimensions.len()
    }

    /// Dimensionality of the warped representation
    pub fn transformed_n_dims(&self) -> usize {
        self.dimensions.iter().map(|d| d.transformed_size()).sum()
    }

    /// Whether all dimensions are continuous
    pub fn is_real(&self) -> bool {
        self.dimensions
            .iter()
            .all(|d| matches!(d, Dimension::Real { .. }))
    }

    /// Per-dimension bounds in original representation
    pub fn bounds(&self) -> Vec<DimBounds> {
        self.dimensions.iter().map(|d| d.bounds()).collect()
    }

    /// Bounds of the warped representation as a `(transformed_n_dims, 2)`
    /// matrix of `[lower, upper]` rows
    pub fn transformed_bounds(&self) -> Array2<f64> {
        let mut rows = vec![];
        for dim in &self.dimensions {
            for (lower, upper) in dim.transformed_bounds() {
                rows.extend([lower, upper]);
            }
        }
        Array2::from_shape_vec((rows.len() / 2, 2), rows).unwrap()
    }

    /// Whether `point` has the right arity and every component belongs to
    /// its dimension
    pub fn contains(&self, point: &[Value]) -> bool {
        self.check_point(point).is_ok()
    }

    /// Validate `point` against this space
    pub fn check_point(&self, point: &[Value]) -> Result<()> {
        if point.len() != self.n_dims() {
            return Err(SpaceError::ShapeMismatch(format!(
                "expected a point of {} components, got {}",
                self.n_dims(),
                point.len()
            )));
        }
        for (i, (dim, value)) in self.dimensions.iter().zip(point.iter()).enumerate() {
            if !dim.contains(value) {
                return Err(SpaceError::InvalidPoint(format!(
                    "component {i} ({value:?}) does not belong to the {} dimension {:?}",
                    dim.kind(),
                    dim.bounds()
                )));
            }
        }
        Ok(())
    }

    /// Draw `n` points from the per-dimension priors, in original
    /// representation. Dimensions are drawn column-wise then transposed, so
    /// a fixed seed gives a reproducible sequence.
    pub fn rvs<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<Point> {
        let columns: Vec<Vec<Value>> = self.dimensions.iter().map(|d| d.rvs(n, rng)).collect();
        (0..n)
            .map(|i| columns.iter().map(|col| col[i].clone()).collect())
            .collect()
    }

    /// Project points from original to warped representation as a
    /// `(n_points, transformed_n_dims)` matrix
    pub fn transform(&self, x: &[Point]) -> Result<Array2<f64>> {
        let mut data = Vec::with_capacity(x.len() * self.transformed_n_dims());
        for point in x {
            self.check_point(point)?;
            for (dim, value) in self.dimensions.iter().zip(point.iter()) {
                dim.transform_into(value, &mut data)?;
            }
        }
        Ok(Array2::from_shape_vec((x.len(), self.transformed_n_dims()), data).unwrap())
    }

    /// Recover original-representation points from a warped matrix, splitting
    /// each row into per-dimension blocks in dimension order
    pub fn inverse_transform(
        &self,
        xt: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    ) -> Result<Vec<Point>> {
        if xt.ncols() != self.transformed_n_dims() {
            return Err(SpaceError::ShapeMismatch(format!(
                "expected {} columns, got {}",
                self.transformed_n_dims(),
                xt.ncols()
            )));
        }
        let mut points = Vec::with_capacity(xt.nrows());
        for row in xt.rows() {
            let row = row.to_vec();
            let mut point = Vec::with_capacity(self.n_dims());
            let mut start = 0;
            for dim in &self.dimensions {
                let offset = dim.transformed_size();
                point.push(dim.inverse_transform_block(&row[start..start + offset])?);
                start += offset;
            }
            points.push(point);
        }
        Ok(points)
    }
}
