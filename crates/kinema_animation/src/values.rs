use glam::{Quat, Vec3, Vec4};
use smallvec::SmallVec;

/// A sampled value flattened into its components (3 for vectors, 4 for
/// quaternions).
pub type Components = SmallVec<[f32; 4]>;

/// Below this arc angle (radians) spherical interpolation falls back to a
/// normalized linear blend.
pub const SLERP_ANGLE_THRESHOLD: f32 = 1e-3;

pub trait Interpolatable: Copy + PartialEq + Sized {
    /// Number of float components in one value.
    const ARITY: usize;

    /// Componentwise linear blend.
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self;

    /// Constant angular velocity blend. Types without an angular meaning blend
    /// linearly.
    fn interpolate_spherical(start: Self, end: Self, t: f32) -> Self {
        Self::interpolate_linear(start, end, t)
    }

    fn to_components(self) -> Components;
}

impl Interpolatable for Vec3 {
    const ARITY: usize = 3;

    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }

    fn to_components(self) -> Components {
        SmallVec::from_slice(&self.to_array())
    }
}

impl Interpolatable for Quat {
    const ARITY: usize = 4;

    /// Plain componentwise blend without renormalization.
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        let a = Vec4::from(start);
        let b = Vec4::from(end);
        Quat::from_vec4(a + (b - a) * t)
    }

    fn interpolate_spherical(start: Self, end: Self, t: f32) -> Self {
        slerp(start, end, t)
    }

    fn to_components(self) -> Components {
        SmallVec::from_slice(&self.to_array())
    }
}

/// Spherical linear interpolation along the shorter arc between two unit
/// quaternions. The result is renormalized.
///
/// Identical endpoints are returned untouched.
#[must_use]
pub fn slerp(start: Quat, end: Quat, t: f32) -> Quat {
    if start == end {
        return start;
    }

    let a = Vec4::from(start);
    let mut b = Vec4::from(end);
    let mut dot = a.dot(b);
    if dot < 0.0 {
        b = -b;
        dot = -dot;
    }

    let angle = dot.min(1.0).acos();
    let blended = if angle < SLERP_ANGLE_THRESHOLD {
        a + (b - a) * t
    } else {
        let sin_angle = angle.sin();
        let w0 = ((1.0 - t) * angle).sin() / sin_angle;
        let w1 = (t * angle).sin() / sin_angle;
        a * w0 + b * w1
    };

    Quat::from_vec4(blended.normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn quat_approx(a: Quat, b: Quat) -> bool {
        // q and -q encode the same rotation
        let d = Vec4::from(a).dot(Vec4::from(b)).abs();
        (1.0 - d).abs() < 1e-5
    }

    #[test]
    fn slerp_quarter_turn_midpoint() {
        let q = slerp(Quat::IDENTITY, Quat::from_rotation_y(FRAC_PI_2), 0.5);
        assert!(quat_approx(q, Quat::from_rotation_y(FRAC_PI_4)), "got {q:?}");
        assert!((q.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn slerp_matches_glam() {
        let a = Quat::from_rotation_x(0.3);
        let b = Quat::from_rotation_z(2.0);
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!(quat_approx(slerp(a, b, t), a.slerp(b, t)), "t={t}");
        }
    }

    #[test]
    fn slerp_takes_shorter_arc() {
        let a = Quat::from_rotation_y(0.1);
        let b = -Quat::from_rotation_y(0.5);
        let mid = slerp(a, b, 0.5);
        assert!(quat_approx(mid, Quat::from_rotation_y(0.3)), "got {mid:?}");
    }

    #[test]
    fn slerp_identical_endpoints_are_exact() {
        let q = Quat::from_rotation_x(PI / 3.0);
        assert_eq!(slerp(q, q, 0.37), q);
    }

    #[test]
    fn slerp_tiny_arc_stays_normalized() {
        let a = Quat::from_rotation_y(1.0);
        let b = Quat::from_rotation_y(1.0 + 1e-5);
        let q = slerp(a, b, 0.5);
        assert!((q.length() - 1.0).abs() < 1e-6);
        assert!(quat_approx(q, a));
    }

    #[test]
    fn vec3_linear() {
        let v = Vec3::interpolate_linear(Vec3::ZERO, Vec3::new(10.0, 20.0, 30.0), 0.25);
        assert!((v - Vec3::new(2.5, 5.0, 7.5)).length() < 1e-6);
        assert_eq!(Vec3::interpolate_spherical(Vec3::ZERO, Vec3::X, 0.5), Vec3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn components() {
        assert_eq!(Vec3::new(1.0, 2.0, 3.0).to_components().as_slice(), &[1.0, 2.0, 3.0]);
        assert_eq!(Quat::IDENTITY.to_components().as_slice(), &[0.0, 0.0, 0.0, 1.0]);
    }
}
