//! Property-based tests for orientation math.
//!
//! Run with: cargo test -p tilt-core --test proptest_orientation

use approx::{abs_diff_eq, assert_abs_diff_eq};
use proptest::prelude::*;
use std::f64::consts::FRAC_PI_2;
use tilt_core::math::{Attitude, Quaternion, RotationMatrix, Vector3};

// =============================================================================
// Strategies
// =============================================================================

/// Arbitrary quaternion with norm bounded away from zero.
fn arb_quaternion() -> impl Strategy<Value = Quaternion> {
    prop::array::uniform4(-10.0..10.0f64)
        .prop_map(|[x, y, z, w]| Quaternion::new(x, y, z, w))
        .prop_filter("norm too small", |q| q.norm() > 1e-2)
}

/// Arbitrary unit quaternion.
fn arb_unit_quaternion() -> impl Strategy<Value = Quaternion> {
    arb_quaternion().prop_map(|q| q.normalized().unwrap())
}

fn arb_angle(limit: f64) -> impl Strategy<Value = f64> {
    -limit..limit
}

// =============================================================================
// Quaternion algebra
// =============================================================================

proptest! {
    #[test]
    fn product_with_inverse_is_identity(q in arb_quaternion()) {
        let result = q * q.inverse().unwrap();
        prop_assert!(
            abs_diff_eq!(result, Quaternion::identity(), epsilon = 1e-9),
            "q * q⁻¹ = {:?}",
            result
        );
    }

    #[test]
    fn multiplication_is_associative(
        a in arb_unit_quaternion(),
        b in arb_unit_quaternion(),
        c in arb_unit_quaternion(),
    ) {
        let left = (a * b) * c;
        let right = a * (b * c);
        prop_assert!(abs_diff_eq!(left, right, epsilon = 1e-12));
    }

    #[test]
    fn inverse_reverses_product_order(a in arb_quaternion(), b in arb_quaternion()) {
        let lhs = (a * b).inverse().unwrap();
        let rhs = b.inverse().unwrap() * a.inverse().unwrap();
        prop_assert!(abs_diff_eq!(lhs, rhs, epsilon = 1e-9));
    }
}

// =============================================================================
// Rotation matrix
// =============================================================================

proptest! {
    #[test]
    fn matrix_is_orthonormal(q in arb_quaternion()) {
        let m = Attitude::new(q).rotation_matrix();
        prop_assert!(m.is_orthonormal(1e-9), "{:?}", m);
    }

    #[test]
    fn double_cover_gives_same_matrix(q in arb_quaternion()) {
        let m = Attitude::new(q).rotation_matrix();
        let n = Attitude::new(-q).rotation_matrix();
        prop_assert_eq!(m, n);
    }

    #[test]
    fn matrix_of_product_reverses_order(a in arb_unit_quaternion(), b in arb_unit_quaternion()) {
        let composed = RotationMatrix::from(a * b);
        let chained = RotationMatrix::from(b) * RotationMatrix::from(a);
        prop_assert!(abs_diff_eq!(composed, chained, epsilon = 1e-12));
    }
}

// =============================================================================
// Euler angles
// =============================================================================

proptest! {
    #[test]
    fn euler_round_trip_away_from_gimbal_lock(
        pitch in arb_angle(3.1),
        roll in arb_angle(FRAC_PI_2 - 1e-3),
        yaw in arb_angle(3.1),
    ) {
        let e = Attitude::new(Quaternion::from_euler(pitch, roll, yaw)).euler();
        prop_assert!((e.pitch - pitch).abs() < 1e-9);
        prop_assert!((e.roll - roll).abs() < 1e-9);
        prop_assert!((e.yaw - yaw).abs() < 1e-9);
    }

    #[test]
    fn angles_describe_the_matrix(q in arb_quaternion()) {
        let attitude = Attitude::new(q);
        let e = attitude.euler();
        prop_assume!(e.roll.abs() < FRAC_PI_2 - 1e-3);
        let axis = |v: Vector3, angle: f64| RotationMatrix::from(Quaternion::from_axis_angle(v, angle));
        let composed =
            axis(Vector3::x(), e.pitch) * axis(Vector3::y(), e.roll) * axis(Vector3::z(), e.yaw);
        prop_assert!(abs_diff_eq!(composed, attitude.rotation_matrix(), epsilon = 1e-6));
    }

    #[test]
    fn angles_stay_in_range(q in arb_quaternion()) {
        let e = Attitude::new(q).euler();
        prop_assert!(e.roll.abs() <= FRAC_PI_2);
        prop_assert!(e.pitch.abs() <= std::f64::consts::PI);
        prop_assert!(e.yaw.abs() <= std::f64::consts::PI);
    }

    #[test]
    fn angles_are_deterministic(q in arb_quaternion()) {
        let a = Attitude::new(q);
        prop_assert_eq!(a.euler(), a.euler());
        prop_assert_eq!(a.rotation_matrix(), a.rotation_matrix());
    }
}

#[test]
fn gimbal_lock_is_stable_near_the_pole() {
    let q = Quaternion::from_euler(0.25, FRAC_PI_2 - 1e-12, 0.0);
    let e = Attitude::new(q).euler();
    assert_eq!(e.yaw, 0.0);
    assert_eq!(e.roll, FRAC_PI_2);
    assert_abs_diff_eq!(e.pitch, 0.25, epsilon = 1e-6);
}
