//! Per-vertex bevel directions.

use config::constants::BEVEL_COLLINEAR_EPSILON;
use glam::DVec2;

/// Computes the bevel direction of every point of a closed contour.
///
/// Scaling a point by its direction times the bevel size moves it onto the
/// outline offset by that size.
pub(super) fn bevel_vectors(contour: &[DVec2]) -> Vec<DVec2> {
    let n = contour.len();
    (0..n)
        .map(|i| {
            let prev = contour[(i + n - 1) % n];
            let next = contour[(i + 1) % n];
            bevel_vector(contour[i], prev, next)
        })
        .collect()
}

/// Direction `pt` moves in when its two adjacent edges are offset by one
/// unit.
///
/// Sharp corners are clamped to a length of `sqrt(2)`. Collinear edges move
/// perpendicular to the edge, or back along it for a 180 degree turn.
fn bevel_vector(pt: DVec2, prev: DVec2, next: DVec2) -> DVec2 {
    let v_prev = pt - prev;
    let v_next = next - pt;
    let v_prev_lensq = v_prev.length_squared();

    let collinear = v_prev.perp_dot(v_next);

    let (trans, shrink_by) = if collinear.abs() > BEVEL_COLLINEAR_EPSILON {
        let v_prev_len = v_prev_lensq.sqrt();
        let v_next_len = v_next.length();

        // Edges shifted one unit to their left
        let prev_shift = DVec2::new(prev.x - v_prev.y / v_prev_len, prev.y + v_prev.x / v_prev_len);
        let next_shift = DVec2::new(next.x - v_next.y / v_next_len, next.y + v_next.x / v_next_len);

        // Intersection of the shifted edges
        let sf = ((next_shift.x - prev_shift.x) * v_next.y - (next_shift.y - prev_shift.y) * v_next.x)
            / collinear;

        let trans = prev_shift + v_prev * sf - pt;
        let trans_lensq = trans.length_squared();
        if trans_lensq <= 2.0 {
            return trans;
        }
        (trans, (trans_lensq / 2.0).sqrt())
    } else {
        let same_direction = if v_prev.x > BEVEL_COLLINEAR_EPSILON {
            v_next.x > BEVEL_COLLINEAR_EPSILON
        } else if v_prev.x < -BEVEL_COLLINEAR_EPSILON {
            v_next.x < -BEVEL_COLLINEAR_EPSILON
        } else {
            sign(v_prev.y) == sign(v_next.y)
        };

        if same_direction {
            (DVec2::new(-v_prev.y, v_prev.x), v_prev_lensq.sqrt())
        } else {
            (v_prev, (v_prev_lensq / 2.0).sqrt())
        }
    };

    trans / shrink_by
}

/// Sign that maps both zeros to zero and keeps NaN unequal to everything.
fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else if value == 0.0 {
        0.0
    } else {
        f64::NAN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_square_corner_moves_outward() {
        // clockwise unit square
        let contour = [
            DVec2::new(0.0, 0.0),
            DVec2::new(0.0, 1.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(1.0, 0.0),
        ];
        let moves = bevel_vectors(&contour);
        assert_relative_eq!(moves[0].x, -1.0);
        assert_relative_eq!(moves[0].y, -1.0);
        assert_relative_eq!(moves[2].x, 1.0);
        assert_relative_eq!(moves[2].y, 1.0);
    }

    #[test]
    fn test_straight_edge_moves_perpendicular() {
        let v = bevel_vector(DVec2::new(1.0, 0.0), DVec2::new(0.0, 0.0), DVec2::new(2.0, 0.0));
        assert_relative_eq!(v.x, 0.0);
        assert_relative_eq!(v.y, 1.0);
    }

    #[test]
    fn test_reversal_moves_back() {
        let v = bevel_vector(DVec2::new(1.0, 0.0), DVec2::new(0.0, 0.0), DVec2::new(0.0, 0.0));
        assert_relative_eq!(v.length(), 2.0_f64.sqrt());
        assert!(v.x > 0.0);
    }

    #[test]
    fn test_sharp_corner_is_clamped() {
        let v = bevel_vector(
            DVec2::new(10.0, 0.0),
            DVec2::new(0.0, 0.0),
            DVec2::new(0.0, 0.1),
        );
        assert!(v.length_squared() <= 2.0 + 1e-9);
    }

    #[test]
    fn test_empty_contour() {
        assert!(bevel_vectors(&[]).is_empty());
    }
}
