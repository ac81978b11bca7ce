//! Body-to-world rotations from xyz Euler angles (degrees) and the
//! base-down attitude used by stabilized flight.
//!
//! A rotation is stored row-major, `world = m * body`. With
//! `a = orientation.x`, `b = orientation.y`, `g = orientation.z` the matrix is
//! `Rz(a) * Ry(b) * Rx(g)`, so the body z-axis (the engine axis) is the third
//! column.

use crate::utils::vector3d::Vector3;

pub type RotationMatrix = [[f64; 3]; 3];

const GIMBAL_LOCK_COS: f64 = 1e-8;

pub fn euler_to_matrix(orientation: Vector3) -> RotationMatrix {
    let (sa, ca) = orientation.x.to_radians().sin_cos();
    let (sb, cb) = orientation.y.to_radians().sin_cos();
    let (sg, cg) = orientation.z.to_radians().sin_cos();

    [
        [ca * cb, ca * sb * sg - sa * cg, ca * sb * cg + sa * sg],
        [sa * cb, sa * sb * sg + ca * cg, sa * sb * cg - ca * sg],
        [-sb, cb * sg, cb * cg],
    ]
}

/// Inverse of [`euler_to_matrix`]. At gimbal lock (`|cos b| ~ 0`) the first
/// angle is pinned to zero and the roll absorbs it.
pub fn matrix_to_euler(m: &RotationMatrix) -> Vector3 {
    let sb = (-m[2][0]).clamp(-1.0, 1.0);
    let b = sb.asin();

    if b.cos() > GIMBAL_LOCK_COS {
        let a = m[1][0].atan2(m[0][0]);
        let g = m[2][1].atan2(m[2][2]);
        Vector3::new(a.to_degrees(), b.to_degrees(), g.to_degrees())
    } else {
        let s = sb.signum();
        let g = (s * m[0][1]).atan2(m[1][1]);
        Vector3::new(0.0, b.to_degrees(), g.to_degrees())
    }
}

/// Rotates a body-frame vector into the world frame.
pub fn body_to_world(orientation: Vector3, body: Vector3) -> Vector3 {
    let m = euler_to_matrix(orientation);
    Vector3::new(
        m[0][0] * body.x + m[0][1] * body.y + m[0][2] * body.z,
        m[1][0] * body.x + m[1][1] * body.y + m[1][2] * body.z,
        m[2][0] * body.x + m[2][1] * body.y + m[2][2] * body.z,
    )
}

/// Orientation whose body z-axis points along `up`, leaving the lander's
/// base facing the planet. `up` must already be a unit vector.
pub fn base_down_orientation(up: Vector3) -> Vector3 {
    let left = if up.x.abs() > GIMBAL_LOCK_COS || up.y.abs() > GIMBAL_LOCK_COS {
        let planar = Vector3::new(-up.y, up.x, 0.0);
        planar / planar.magnitude()
    } else {
        Vector3::new(1.0, 0.0, 0.0)
    };
    let out = up.cross(&left);

    let m = [
        [left.x, out.x, up.x],
        [left.y, out.y, up.y],
        [left.z, out.z, up.z],
    ];
    matrix_to_euler(&m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_vec_eq(a: Vector3, b: Vector3) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-9);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-9);
        assert_abs_diff_eq!(a.z, b.z, epsilon = 1e-9);
    }

    #[test]
    fn test_identity_orientation() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert_vec_eq(body_to_world(Vector3::zero(), v), v);
    }

    #[test]
    fn test_engine_axis_for_preset_orientations() {
        let engine = Vector3::new(0.0, 0.0, 1.0);
        assert_vec_eq(
            body_to_world(Vector3::new(0.0, 90.0, 0.0), engine),
            Vector3::new(1.0, 0.0, 0.0),
        );
        assert_vec_eq(
            body_to_world(Vector3::new(0.0, 0.0, 90.0), engine),
            Vector3::new(0.0, -1.0, 0.0),
        );
    }

    #[test]
    fn test_matrix_round_trip() {
        for orientation in [
            Vector3::new(10.0, 20.0, 30.0),
            Vector3::new(-120.0, 45.0, 170.0),
            Vector3::new(0.0, -60.0, -90.0),
        ] {
            let m = euler_to_matrix(orientation);
            let recovered = euler_to_matrix(matrix_to_euler(&m));
            for (row, expected) in recovered.iter().zip(m.iter()) {
                for (value, want) in row.iter().zip(expected.iter()) {
                    assert_abs_diff_eq!(*value, *want, epsilon = 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_gimbal_lock_preserves_rotation() {
        let orientation = Vector3::new(30.0, 90.0, 10.0);
        let m = euler_to_matrix(orientation);
        let probe = Vector3::new(0.3, -0.7, 0.2);
        assert_vec_eq(
            body_to_world(matrix_to_euler(&m), probe),
            body_to_world(orientation, probe),
        );
    }

    #[test]
    fn test_base_down_points_engine_up() {
        let engine = Vector3::new(0.0, 0.0, 1.0);
        for up in [
            Vector3::new(0.0, -1.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(0.0, 0.0, -1.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.6, 0.0, 0.8),
            Vector3::new(1.0, -2.0, 2.0) / 3.0,
        ] {
            let orientation = base_down_orientation(up);
            assert_vec_eq(body_to_world(orientation, engine), up);
        }
    }

    #[test]
    fn test_base_down_matches_descent_preset() {
        let orientation = base_down_orientation(Vector3::new(0.0, -1.0, 0.0));
        assert_vec_eq(orientation, Vector3::new(0.0, 0.0, 90.0));
    }
}
