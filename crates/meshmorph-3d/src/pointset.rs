use crate::{point::Point3, Error3d};

/// An ordered set of 3D points.
///
/// The position of a point in the set is its implicit vertex id, which is
/// what correspondences refer to.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PointSet {
    // The points in insertion order.
    points: Vec<Point3>,
}

impl PointSet {
    /// Create a new point set from points.
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }

    /// Create a new point set, rejecting an empty vector.
    pub fn try_from_vec(points: Vec<Point3>) -> Result<Self, Error3d> {
        if points.is_empty() {
            return Err(Error3d::EmptyInput { what: "input" });
        }
        Ok(Self { points })
    }

    /// Create a new point set from raw coordinate triplets.
    pub fn from_arrays(points: &[[f64; 3]]) -> Self {
        Self::new(points.iter().map(Point3::from_array).collect())
    }

    /// Get the number of points in the point set.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the point set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get as reference the points in the point set.
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Get as mutable reference the points in the point set.
    pub fn points_mut(&mut self) -> &mut [Point3] {
        &mut self.points
    }

    /// Arithmetic mean of the points.
    pub fn centroid(&self) -> Result<Point3, Error3d> {
        centroid(&self.points)
    }

    /// Get the axis-aligned bounding box as `(min, max)`, or `None` if empty.
    pub fn bounds(&self) -> Option<(Point3, Point3)> {
        let first = *self.points.first()?;
        Some(self.points.iter().fold((first, first), |(lo, hi), p| {
            (
                Point3::new(lo.x.min(p.x), lo.y.min(p.y), lo.z.min(p.z)),
                Point3::new(hi.x.max(p.x), hi.y.max(p.y), hi.z.max(p.z)),
            )
        }))
    }
}

impl std::ops::Deref for PointSet {
    type Target = [Point3];

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

impl From<Vec<Point3>> for PointSet {
    fn from(points: Vec<Point3>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<Point3> for PointSet {
    fn from_iter<I: IntoIterator<Item = Point3>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Compute the centroid of a set of points.
///
/// # Arguments
///
/// * `points` - A non-empty set of points.
///
/// # Returns
///
/// The arithmetic mean of the points, or [`Error3d::EmptyInput`] if the set is empty.
pub fn centroid(points: &[Point3]) -> Result<Point3, Error3d> {
    if points.is_empty() {
        return Err(Error3d::EmptyInput { what: "centroid" });
    }
    let sum = points.iter().fold(Point3::ZERO, |acc, &p| acc + p);
    Ok(sum / points.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pointset() {
        let pointset = PointSet::from_arrays(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);

        assert_eq!(pointset.len(), 2);
        assert!(!pointset.is_empty());

        if let Some(p1) = pointset.points().last() {
            assert_eq!(*p1, Point3::new(1.0, 0.0, 0.0));
        }
    }

    #[test]
    fn test_pointset_empty() {
        let res = PointSet::try_from_vec(vec![]);
        assert!(matches!(res, Err(Error3d::EmptyInput { .. })));
    }

    #[test]
    fn test_centroid() -> Result<(), Error3d> {
        let points = PointSet::from_arrays(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let c = points.centroid()?;
        assert_relative_eq!(c.x, 2.5, epsilon = 1e-12);
        assert_relative_eq!(c.y, 3.5, epsilon = 1e-12);
        assert_relative_eq!(c.z, 4.5, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_centroid_empty() {
        assert_eq!(
            centroid(&[]),
            Err(Error3d::EmptyInput { what: "centroid" })
        );
    }

    #[test]
    fn test_bounds() {
        let points = PointSet::from_arrays(&[[1.0, -2.0, 3.0], [-4.0, 5.0, 0.5]]);
        assert_eq!(
            points.bounds(),
            Some((Point3::new(-4.0, -2.0, 0.5), Point3::new(1.0, 5.0, 3.0)))
        );
        assert_eq!(PointSet::default().bounds(), None);
    }
}
