//! Hand landmark parsing from MediaPipe Hands
//!
//! JS hands over one flat Float32Array per frame plus the number of hands in
//! it. Either (x, y) pairs or MediaPipe's (x, y, z) triplets are accepted and
//! z is dropped. Coordinates are normalized image coordinates in [0, 1].

use nalgebra::Point2;

use crate::error::{GestureError, Result};

// ============================================================================
// HAND LANDMARK INDICES (wrist = 0 is the normalization origin)
// ============================================================================

/// Index fingertip - the tracked point of the dynamic path
pub const INDEX_TIP: usize = 8;

// ============================================================================
// PARSING
// ============================================================================

/// Parse the first hand out of a flat landmark buffer
///
/// `flat_data` holds `num_hands` hands back to back, each `count` landmarks of
/// either (x, y) or (x, y, z). No hands, or an empty buffer, means no hand this
/// frame. Only the first hand is used. Coordinate values are checked by the
/// frame processor, not here.
pub fn parse_hand(
    flat_data: &[f32],
    num_hands: usize,
    count: usize,
) -> Result<Option<Vec<Point2<f32>>>> {
    if num_hands == 0 || flat_data.is_empty() {
        return Ok(None);
    }

    let per_hand = flat_data.len() / num_hands;
    let stride = match per_hand {
        n if n * num_hands != flat_data.len() => 0,
        n if n == count * 2 => 2,
        n if n == count * 3 => 3,
        _ => 0,
    };
    if stride == 0 {
        return Err(GestureError::MalformedLandmarks {
            expected: format!("{} x {} or {} floats", num_hands, count * 2, count * 3),
            actual: format!("{} floats", flat_data.len()),
        });
    }

    let points = flat_data[..per_hand]
        .chunks_exact(stride)
        .map(|chunk| Point2::new(chunk[0], chunk[1]))
        .collect();

    Ok(Some(points))
}
