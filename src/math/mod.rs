pub mod polygon;
pub mod rotation;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 3x3 matrix type.
pub type Matrix3 = nalgebra::Matrix3<f64>;

/// 4x4 transformation matrix.
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// The golden ratio.
pub const PHI: f64 = 1.618_033_988_749_895;

/// Arithmetic mean of a set of points. Returns the origin for an empty set.
#[must_use]
pub fn centroid(points: &[Point3]) -> Point3 {
    if points.is_empty() {
        return Point3::origin();
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    #[allow(clippy::cast_precision_loss)]
    let inv_n = 1.0 / points.len() as f64;
    Point3::from(sum * inv_n)
}

/// Finds a root of `f` in `[lo, hi]` by bisection.
///
/// `f(lo)` and `f(hi)` must have opposite signs; the interval is halved until
/// it is narrower than machine precision allows.
#[must_use]
pub fn bisect(f: impl Fn(f64) -> f64, mut lo: f64, mut hi: f64) -> f64 {
    let lo_negative = f(lo) < 0.0;
    for _ in 0..200 {
        let mid = 0.5 * (lo + hi);
        if mid <= lo || mid >= hi {
            break;
        }
        if (f(mid) < 0.0) == lo_negative {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}

/// Solves the 3x3 system `rows * x = rhs`. Returns `None` when singular.
#[must_use]
pub fn solve3(rows: [Vector3; 3], rhs: Vector3) -> Option<Vector3> {
    Matrix3::from_rows(&[rows[0].transpose(), rows[1].transpose(), rows[2].transpose()])
        .lu()
        .solve(&rhs)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn golden_ratio() {
        assert_relative_eq!(PHI * PHI, PHI + 1.0, epsilon = 1e-12);
    }

    #[test]
    fn bisect_finds_sqrt_two() {
        let root = bisect(|x| x * x - 2.0, 0.0, 2.0);
        assert_relative_eq!(root, 2.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn centroid_of_square() {
        let c = centroid(&[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 2.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ]);
        assert_relative_eq!(c, Point3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn solve_diagonal_system() {
        let x = solve3(
            [Vector3::x() * 2.0, Vector3::y() * 4.0, Vector3::z()],
            Vector3::new(1.0, 1.0, 1.0),
        )
        .unwrap();
        assert_relative_eq!(x, Vector3::new(0.5, 0.25, 1.0));
    }

    #[test]
    fn singular_system() {
        assert!(solve3([Vector3::x(), Vector3::x(), Vector3::z()], Vector3::zeros()).is_none());
    }
}
