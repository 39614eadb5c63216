//! Coordinate normalization for classifier input
//!
//! Translates a point sequence so its first point is the origin, flattens it
//! to `[x0, y0, x1, y1, ...]` and divides by the largest absolute coordinate.
//! The result is translation and scale invariant (not rotation invariant).
//! The same transform feeds both classifiers: hand landmarks (origin = wrist)
//! and the fingertip history (origin = oldest point).

use nalgebra::{DVector, Point2};

use crate::error::{GestureError, Result};

/// Normalize `points` into `2 * points.len()` values in [-1, 1]
///
/// The largest-magnitude output is exactly +-1. Fails with `DivisionByZero`
/// when every point equals the first one (or the sequence is empty).
pub fn normalize(points: &[Point2<f32>]) -> Result<Vec<f32>> {
    let reference = match points.first() {
        Some(p) => *p,
        None => return Err(GestureError::DivisionByZero),
    };

    let mut flat: DVector<f32> = DVector::from_iterator(
        points.len() * 2,
        points.iter().flat_map(|p| {
            let offset = *p - reference;
            [offset.x, offset.y]
        }),
    );

    let max_abs = flat.amax();
    if max_abs == 0.0 {
        return Err(GestureError::DivisionByZero);
    }
    flat.unscale_mut(max_abs);

    Ok(flat.as_slice().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand() -> Vec<Point2<f32>> {
        vec![
            Point2::new(0.50, 0.80),
            Point2::new(0.42, 0.70),
            Point2::new(0.55, 0.40),
            Point2::new(0.61, 0.65),
        ]
    }

    #[test]
    fn test_reference_becomes_origin() {
        let out = normalize(&hand()).unwrap();
        assert_eq!(out.len(), 8);
        assert_eq!(out[0], 0.0);
        assert_eq!(out[1], 0.0);
    }

    #[test]
    fn test_bounded_with_unit_extreme() {
        let out = normalize(&hand()).unwrap();
        assert!(out.iter().all(|v| (-1.0..=1.0).contains(v)));
        // Largest offset is the y of point 2: 0.40 - 0.80
        assert!(out.iter().any(|v| *v == 1.0 || *v == -1.0));
        assert_eq!(out[5], -1.0);
    }

    #[test]
    fn test_translation_invariant() {
        let shifted: Vec<_> = hand()
            .iter()
            .map(|p| Point2::new(p.x + 0.125, p.y - 0.25))
            .collect();
        let a = normalize(&hand()).unwrap();
        let b = normalize(&shifted).unwrap();
        for (x, y) in a.iter().zip(&b) {
            assert!((x - y).abs() < 1e-5);
        }
    }

    #[test]
    fn test_scale_invariant() {
        let scaled: Vec<_> = hand().iter().map(|p| Point2::new(p.x * 0.5, p.y * 0.5)).collect();
        let a = normalize(&hand()).unwrap();
        let b = normalize(&scaled).unwrap();
        for (x, y) in a.iter().zip(&b) {
            assert!((x - y).abs() < 1e-5);
        }
    }

    #[test]
    fn test_degenerate_input() {
        let same = vec![Point2::new(0.3, 0.3); 16];
        assert_eq!(normalize(&same), Err(GestureError::DivisionByZero));
        assert_eq!(normalize(&[]), Err(GestureError::DivisionByZero));
    }
}
