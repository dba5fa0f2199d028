use posture_base::Vec2;

/// Directional angle in degrees at vertex `b`, measured from the ray `b -> a`
/// to the ray `b -> c`, normalized to `[0, 360)`.
///
/// This is a polar-angle difference, not an interior joint angle, so it can
/// exceed 180. The posture thresholds are calibrated against exactly this
/// convention; swapping in a law-of-cosines angle would silently change the
/// valid band.
///
/// When `b` coincides with `a` or `c` the corresponding `atan2(0, 0)` term
/// evaluates to 0 and the result is well-formed but meaningless; callers get
/// a number, not an error.
pub fn vertex_angle_deg(a: Vec2<f32>, b: Vec2<f32>, c: Vec2<f32>) -> f32 {
    let toward_c = (c.y - b.y).atan2(c.x - b.x);
    let toward_a = (a.y - b.y).atan2(a.x - b.x);

    let mut deg = (toward_c - toward_a).to_degrees();
    if deg < 0.0 {
        deg += 360.0;
    }
    deg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f32, y: f32) -> Vec2<f32> {
        Vec2::new(x, y)
    }

    #[test]
    fn collinear_vertical_points_measure_180() {
        // Hip below, ear above, all on one vertical line.
        let angle = vertex_angle_deg(v(0.5, 0.8), v(0.5, 0.5), v(0.5, 0.2));
        assert!((angle - 180.0).abs() < 1e-4);
    }

    #[test]
    fn right_angle() {
        let angle = vertex_angle_deg(v(1.0, 0.0), v(0.0, 0.0), v(0.0, 1.0));
        assert!((angle - 90.0).abs() < 1e-4);
    }

    #[test]
    fn result_is_always_in_range() {
        let points = [
            v(0.1, 0.9),
            v(-3.0, 2.0),
            v(7.0, -1.5),
            v(0.0, 1.0),
            v(2.0, 2.0),
        ];
        for &a in &points {
            for &c in &points {
                let b = v(1.0, 1.0);
                if a == b || c == b {
                    continue;
                }
                let angle = vertex_angle_deg(a, b, c);
                assert!((0.0..360.0).contains(&angle), "angle {angle} out of range");
            }
        }
    }

    #[test]
    fn invariant_under_uniform_scaling_about_vertex() {
        let b = v(0.5, 0.5);
        let a = v(0.3, 0.8);
        let c = v(0.5, 0.2);

        let reference = vertex_angle_deg(a, b, c);
        for scale in [0.1, 2.0, 25.0] {
            let scaled_a = b + (a - b) * scale;
            let scaled_c = b + (c - b) * scale;
            let angle = vertex_angle_deg(scaled_a, b, scaled_c);
            assert!((angle - reference).abs() < 1e-3);
        }
    }

    #[test]
    fn changes_when_one_ray_rotates() {
        let b = v(0.0, 0.0);
        let a = v(1.0, 0.0);

        let before = vertex_angle_deg(a, b, v(0.0, 1.0));
        let after = vertex_angle_deg(a, b, v(-1.0, 1.0));
        assert!((before - after).abs() > 1.0);
    }

    #[test]
    fn directional_angles_can_exceed_180() {
        // Measuring the "other way around" gives the reflex angle.
        let cw = vertex_angle_deg(v(0.0, 1.0), v(0.0, 0.0), v(1.0, 0.0));
        let ccw = vertex_angle_deg(v(1.0, 0.0), v(0.0, 0.0), v(0.0, 1.0));
        assert!((cw + ccw - 360.0).abs() < 1e-3);
        assert!(cw > 180.0 || ccw > 180.0);
    }

    #[test]
    fn degenerate_vertex_yields_a_number() {
        let b = v(0.5, 0.5);
        let angle = vertex_angle_deg(b, b, v(0.9, 0.5));
        assert!(angle.is_finite());
        assert!((0.0..360.0).contains(&angle));
    }
}
