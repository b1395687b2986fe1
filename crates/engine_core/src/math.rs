//! Easing helpers.

use glam::Vec3;

/// Cubic Hermite ease: `t² (3 - 2t)` with `t` clamped to `[0, 1]`.
/// Zero derivative at both ends.
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Interpolate from `a` to `b` along the smoothstep curve.
pub fn smooth_lerp(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a.lerp(b, smoothstep(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoothstep_endpoints_and_midpoint() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert_eq!(smoothstep(0.5), 0.5);
    }

    #[test]
    fn smoothstep_clamps_out_of_range() {
        assert_eq!(smoothstep(-2.0), 0.0);
        assert_eq!(smoothstep(7.5), 1.0);
    }

    #[test]
    fn smoothstep_eases_in_slower_than_linear() {
        assert!(smoothstep(0.1) < 0.1);
        assert!(smoothstep(0.9) > 0.9);
    }

    #[test]
    fn smooth_lerp_hits_both_ends() {
        let a = Vec3::new(0.0, -9.81, 0.0);
        let b = Vec3::new(0.0, -1.5, 0.0);
        assert_eq!(smooth_lerp(a, b, 0.0), a);
        assert_eq!(smooth_lerp(a, b, 1.0), b);
    }
}
