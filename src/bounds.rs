/// Lower corner of the default extent used for barriers and random sampling.
pub const DEFAULT_EXTENT_MIN: f64 = 0.0;
/// Upper corner of the default extent used for barriers and random sampling.
pub const DEFAULT_EXTENT_MAX: f64 = 100.0;

/// Generic bounding box for N-dimensional space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox<const D: usize> {
    pub min: [f64; D],
    pub max: [f64; D],
}

impl<const D: usize> BoundingBox<D> {
    pub fn new(min: [f64; D], max: [f64; D]) -> Self {
        Self { min, max }
    }

    /// A box spanning `min..max` on every axis.
    pub fn cube(min: f64, max: f64) -> Self {
        Self { min: [min; D], max: [max; D] }
    }

    pub fn contains(&self, point: &[f64; D]) -> bool {
        (0..D).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
    }

    /// Extent of the box along each axis.
    pub fn size(&self) -> [f64; D] {
        std::array::from_fn(|i| self.max[i] - self.min[i])
    }
}

impl<const D: usize> Default for BoundingBox<D> {
    fn default() -> Self {
        Self::cube(DEFAULT_EXTENT_MIN, DEFAULT_EXTENT_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_extent() {
        let b = BoundingBox::<3>::default();
        assert_eq!(b.min, [0.0; 3]);
        assert_eq!(b.max, [100.0; 3]);
        assert_eq!(b.size(), [100.0; 3]);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let b = BoundingBox::new([0.0, 0.0, 0.0], [10.0, 20.0, 30.0]);
        assert!(b.contains(&[0.0, 0.0, 0.0]));
        assert!(b.contains(&[10.0, 20.0, 30.0]));
        assert!(!b.contains(&[10.0, 20.1, 30.0]));
        assert!(!b.contains(&[-0.1, 5.0, 5.0]));
    }
}
