use nalgebra::{IsometryMatrix3, Matrix3xX, Rotation3, Translation3, Vector3};

/// A 3×N matrix of atomic coordinates, one column per atom.
pub type PoseMatrix = Matrix3xX<f64>;

/// A rigid-body transform (rotation followed by translation).
pub type Transform = IsometryMatrix3<f64>;

/// Builds the Z-X-Z Euler rotation `Rz(a0) · Rx(a1) · Rz(a2)`.
///
/// Angles are in radians. With `reverse` set the inverse rotation is returned,
/// which is how the docking search stores most of its rotations.
pub fn euler_rotation(angles: &[f64; 3], reverse: bool) -> Rotation3<f64> {
    let rotation = Rotation3::from_axis_angle(&Vector3::z_axis(), angles[0])
        * Rotation3::from_axis_angle(&Vector3::x_axis(), angles[1])
        * Rotation3::from_axis_angle(&Vector3::z_axis(), angles[2]);
    if reverse {
        rotation.inverse()
    } else {
        rotation
    }
}

/// Undoes the circular wrap of the search grid.
///
/// Any component at or above `box_size / 2` is shifted down by `box_size`,
/// yielding a displacement centered on the origin (still in grid cells).
pub fn boxed_grid_coord(cell: &[i32; 3], box_size: i32) -> Vector3<f64> {
    let half = box_size / 2;
    let unwrap = |v: i32| f64::from(if v >= half { v - box_size } else { v });
    Vector3::new(unwrap(cell[0]), unwrap(cell[1]), unwrap(cell[2]))
}

pub fn rotation(angles: &[f64; 3], reverse: bool) -> Transform {
    Transform::from_parts(Translation3::identity(), euler_rotation(angles, reverse))
}

pub fn translation(v: &Vector3<f64>) -> Transform {
    Transform::from_parts(Translation3::from(*v), Rotation3::identity())
}

/// Applies a rigid-body transform to every column of a coordinate matrix.
pub fn apply_transform(transform: &Transform, matrix: &PoseMatrix) -> PoseMatrix {
    let mut out = transform.rotation.matrix() * matrix;
    let shift = transform.translation.vector;
    for mut column in out.column_iter_mut() {
        column += shift;
    }
    out
}

/// Root-mean-square deviation between two equally sized coordinate matrices.
///
/// Returns `None` when the shapes differ or the matrices are empty.
pub fn calculate_rmsd(a: &PoseMatrix, b: &PoseMatrix) -> Option<f64> {
    if a.ncols() != b.ncols() || a.ncols() == 0 {
        return None;
    }
    Some(((a - b).norm_squared() / a.ncols() as f64).sqrt())
}

pub fn centroid(matrix: &PoseMatrix) -> Option<Vector3<f64>> {
    if matrix.ncols() == 0 {
        None
    } else {
        Some(matrix.column_mean())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const TOLERANCE: f64 = 1e-9;

    fn vec_approx_equal(a: &Vector3<f64>, b: &Vector3<f64>) -> bool {
        (a - b).norm() < TOLERANCE
    }

    #[test]
    fn euler_rotation_with_zero_angles_is_identity() {
        let r = euler_rotation(&[0.0, 0.0, 0.0], false);
        assert!((r.matrix() - nalgebra::Matrix3::identity()).norm() < TOLERANCE);
    }

    #[test]
    fn euler_rotation_first_angle_rotates_about_z() {
        let r = euler_rotation(&[FRAC_PI_2, 0.0, 0.0], false);
        let v = r * Vector3::new(1.0, 0.0, 0.0);
        assert!(vec_approx_equal(&v, &Vector3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn euler_rotation_second_angle_rotates_about_x() {
        let r = euler_rotation(&[0.0, FRAC_PI_2, 0.0], false);
        let v = r * Vector3::new(0.0, 1.0, 0.0);
        assert!(vec_approx_equal(&v, &Vector3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn euler_rotation_composes_in_z_x_z_order() {
        let angles = [0.3, 1.1, -0.7];
        let expected = Rotation3::from_axis_angle(&Vector3::z_axis(), 0.3)
            * Rotation3::from_axis_angle(&Vector3::x_axis(), 1.1)
            * Rotation3::from_axis_angle(&Vector3::z_axis(), -0.7);
        let r = euler_rotation(&angles, false);
        assert!((r.matrix() - expected.matrix()).norm() < TOLERANCE);
    }

    #[test]
    fn reverse_euler_rotation_is_the_inverse() {
        let angles = [0.4, 2.0, PI / 3.0];
        let product = euler_rotation(&angles, false) * euler_rotation(&angles, true);
        assert!((product.matrix() - nalgebra::Matrix3::identity()).norm() < TOLERANCE);
    }

    #[test]
    fn boxed_grid_coord_unwraps_upper_half_of_the_box() {
        let d = boxed_grid_coord(&[0, 45, 91], 92);
        assert_eq!(d, Vector3::new(0.0, 45.0, -1.0));
        let d = boxed_grid_coord(&[46, 47, 1], 92);
        assert_eq!(d, Vector3::new(-46.0, -45.0, 1.0));
    }

    #[test]
    fn boxed_grid_coord_uses_integer_half_for_odd_boxes() {
        let d = boxed_grid_coord(&[39, 40, 80], 81);
        assert_eq!(d, Vector3::new(39.0, -41.0, -1.0));
    }

    #[test]
    fn apply_transform_rotates_then_translates_every_column() {
        let t = translation(&Vector3::new(1.0, 2.0, 3.0)) * rotation(&[FRAC_PI_2, 0.0, 0.0], false);
        let m = PoseMatrix::from_columns(&[Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 5.0)]);
        let out = apply_transform(&t, &m);
        assert!(vec_approx_equal(&out.column(0).into_owned(), &Vector3::new(1.0, 3.0, 3.0)));
        assert!(vec_approx_equal(&out.column(1).into_owned(), &Vector3::new(1.0, 2.0, 8.0)));
    }

    #[test]
    fn calculate_rmsd_of_shifted_matrix_equals_shift_length() {
        let a = PoseMatrix::from_columns(&[Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0)]);
        let b = a.map(|v| v + 2.0);
        let rmsd = calculate_rmsd(&a, &b).unwrap();
        assert!((rmsd - 12.0f64.sqrt()).abs() < TOLERANCE);
    }

    #[test]
    fn calculate_rmsd_rejects_mismatched_or_empty_input() {
        let a = PoseMatrix::zeros(2);
        let b = PoseMatrix::zeros(3);
        assert!(calculate_rmsd(&a, &b).is_none());
        assert!(calculate_rmsd(&PoseMatrix::zeros(0), &PoseMatrix::zeros(0)).is_none());
    }

    #[test]
    fn centroid_is_column_mean() {
        let m = PoseMatrix::from_columns(&[Vector3::new(0.0, 0.0, 0.0), Vector3::new(2.0, 4.0, 6.0)]);
        assert!(vec_approx_equal(&centroid(&m).unwrap(), &Vector3::new(1.0, 2.0, 3.0)));
        assert!(centroid(&PoseMatrix::zeros(0)).is_none());
    }
}
