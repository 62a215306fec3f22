use super::{Matrix3, Matrix4, Point3, Vector3, TOLERANCE};

/// Builds a 4x4 rotation matrix around a unit axis by an angle (Rodrigues).
#[allow(clippy::many_single_char_names)]
#[must_use]
pub fn rotation_matrix(axis: &Vector3, angle: f64) -> Matrix4 {
    let c = angle.cos();
    let s = angle.sin();
    let t = 1.0 - c;
    let (x, y, z) = (axis.x, axis.y, axis.z);

    #[allow(clippy::suspicious_operation_groupings)]
    Matrix4::new(
        t * x * x + c,     t * x * y - s * z, t * x * z + s * y, 0.0,
        t * x * y + s * z, t * y * y + c,     t * y * z - s * x, 0.0,
        t * x * z - s * y, t * y * z + s * x, t * z * z + c,     0.0,
        0.0,               0.0,               0.0,               1.0,
    )
}

/// Rotation by `angle` about the line through `origin` along unit `axis`.
#[must_use]
pub fn rotation_about(origin: &Point3, axis: &Vector3, angle: f64) -> Matrix4 {
    let t_neg = Matrix4::new_translation(&(-origin.coords));
    let t_pos = Matrix4::new_translation(&origin.coords);
    t_pos * rotation_matrix(axis, angle) * t_neg
}

/// Reflection through the plane with unit normal `normal` passing through the origin.
#[must_use]
pub fn reflection_matrix(normal: &Vector3) -> Matrix4 {
    let m = Matrix3::identity() - 2.0 * normal * normal.transpose();
    m.to_homogeneous()
}

/// Reflects a point through the plane with unit normal `normal` passing
/// through the origin.
#[must_use]
pub fn reflect(point: &Point3, normal: &Vector3) -> Point3 {
    point - 2.0 * normal.dot(&point.coords) * normal
}

/// A scaled, right-handed orthonormal frame: an origin, a primary axis and a
/// secondary axis perpendicular to it.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    origin: Point3,
    axes: Matrix3,
    scale: f64,
}

impl Frame {
    /// Creates a frame. `secondary` is made perpendicular to `primary`.
    ///
    /// Returns `None` if either direction is zero or they are parallel.
    #[must_use]
    pub fn new(origin: Point3, primary: Vector3, secondary: Vector3, scale: f64) -> Option<Self> {
        let u = primary.try_normalize(TOLERANCE)?;
        let v = (secondary - u * u.dot(&secondary)).try_normalize(TOLERANCE)?;
        let w = u.cross(&v);
        Some(Self {
            origin,
            axes: Matrix3::from_columns(&[u, v, w]),
            scale,
        })
    }

    #[must_use]
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// The similarity transform taking this frame onto `target`.
    #[must_use]
    pub fn transform_to(&self, target: &Frame) -> Matrix4 {
        let linear = target.axes * self.axes.transpose() * (target.scale / self.scale);
        let to_origin = Matrix4::new_translation(&(-self.origin.coords));
        let from_origin = Matrix4::new_translation(&target.origin.coords);
        from_origin * linear.to_homogeneous() * to_origin
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::assert_relative_eq;
    use proptest::prelude::*;

    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn rotate_90_around_z() {
        let m = rotation_matrix(&Vector3::z(), FRAC_PI_2);
        assert_relative_eq!(
            m.transform_point(&p(1.0, 0.0, 0.0)),
            p(0.0, 1.0, 0.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn rotate_about_offset_axis() {
        let m = rotation_about(&p(1.0, 0.0, 0.0), &Vector3::z(), FRAC_PI_2);
        assert_relative_eq!(
            m.transform_point(&p(2.0, 0.0, 0.0)),
            p(1.0, 1.0, 0.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn reflection_flips_normal_component() {
        let n = Vector3::new(1.0, 1.0, 0.0).normalize();
        let q = reflect(&p(1.0, 0.0, 0.0), &n);
        assert_relative_eq!(q, p(0.0, -1.0, 0.0), epsilon = 1e-12);
        let m = reflection_matrix(&n);
        assert_relative_eq!(m.transform_point(&p(1.0, 0.0, 0.0)), q, epsilon = 1e-12);
    }

    #[test]
    fn parallel_axes_make_no_frame() {
        assert!(Frame::new(Point3::origin(), Vector3::x(), Vector3::x() * 2.0, 1.0).is_none());
    }

    #[test]
    fn frame_maps_origin_and_axes() {
        let from = Frame::new(p(0.0, 0.0, 0.0), Vector3::y(), Vector3::x(), 1.0).unwrap();
        let to = Frame::new(p(1.0, 2.0, 3.0), Vector3::z(), Vector3::y(), 2.0).unwrap();
        let m = from.transform_to(&to);
        assert_relative_eq!(
            m.transform_point(&p(0.0, 0.0, 0.0)),
            p(1.0, 2.0, 3.0),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            m.transform_point(&p(0.0, 1.0, 0.0)),
            p(1.0, 2.0, 5.0),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            m.transform_point(&p(1.0, 0.0, 0.0)),
            p(1.0, 4.0, 3.0),
            epsilon = 1e-12
        );
    }

    proptest! {
        #[test]
        fn rotation_preserves_distance(
            x in -5.0..5.0f64, y in -5.0..5.0f64, z in -5.0..5.0f64,
            ax in -1.0..1.0f64, ay in -1.0..1.0f64, az in 0.1..1.0f64,
            angle in -6.3..6.3f64,
        ) {
            let axis = Vector3::new(ax, ay, az).normalize();
            let m = rotation_matrix(&axis, angle);
            let q = m.transform_point(&p(x, y, z));
            prop_assert!((q.coords.norm() - p(x, y, z).coords.norm()).abs() < 1e-9);
            prop_assert!((q.coords.dot(&axis) - p(x, y, z).coords.dot(&axis)).abs() < 1e-9);
        }
    }
}
