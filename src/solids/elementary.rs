//! Johnson solids with no construction from caps, prisms or classical solids.

use std::f64::consts::FRAC_PI_4;

use super::capstone::cap;
use crate::error::{LookupError, Result};
use crate::math::{self, Matrix3, Point3, PHI};
use crate::mesh::{attach, CapType, Polyhedron};
use crate::specs::Elementary;

/// Every sign combination of the flagged coordinates of each point.
fn sign_orbit(points: &[[f64; 3]], flip: [bool; 3]) -> Vec<Point3> {
    let mut out: Vec<Point3> = Vec::new();
    for p in points {
        for mask in 0..8_u8 {
            let mut q = *p;
            for (axis, coordinate) in q.iter_mut().enumerate() {
                if flip[axis] && mask & (1 << axis) != 0 {
                    *coordinate = -*coordinate;
                }
            }
            let q = Point3::from(q);
            if out.iter().all(|o| (o - q).norm() > 1e-9) {
                out.push(q);
            }
        }
    }
    out
}

fn halved(points: Vec<Point3>) -> Vec<Point3> {
    points.into_iter().map(|p| Point3::from(p.coords * 0.5)).collect()
}

/// J84.
pub(super) fn snub_disphenoid() -> Result<Polyhedron> {
    let q = math::bisect(|x| 2.0 * x.powi(3) + 11.0 * x * x + 4.0 * x - 1.0, 0.0, 1.0);
    let r = q.sqrt();
    let s = ((1.0 - q) / (2.0 * q)).sqrt();
    let t = (2.0 - 2.0 * q).sqrt();
    let points = vec![
        Point3::new(t, r, 0.0),
        Point3::new(-t, r, 0.0),
        Point3::new(0.0, -r, t),
        Point3::new(0.0, -r, -t),
        Point3::new(1.0, -s, 0.0),
        Point3::new(-1.0, -s, 0.0),
        Point3::new(0.0, s, 1.0),
        Point3::new(0.0, s, -1.0),
    ];
    Polyhedron::from_points(halved(points))
}

/// J85, as two orbits of its antiprismatic symmetry group about z.
pub(super) fn snub_square_antiprism() -> Result<Polyhedron> {
    let quarter_turn = Matrix3::new(0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0);
    let mirror_x = Matrix3::new(-1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0);
    let (s, c) = FRAC_PI_4.sin_cos();
    let rotoreflection = Matrix3::new(c, -s, 0.0, s, c, 0.0, 0.0, 0.0, -1.0);
    let generators = [quarter_turn, mirror_x, rotoreflection];
    let mut points = Vec::new();
    for seed in [
        Point3::new(0.0, -0.707_106_781_187_749_9, 0.676_868_509_023_489_2),
        Point3::new(0.0, -1.213_205_545_871_483_9, -0.185_607_021_287_227_92),
    ] {
        let mut orbit = vec![seed];
        let mut i = 0;
        while i < orbit.len() {
            let current = orbit[i];
            for g in &generators {
                let image = Point3::from(g * current.coords);
                if orbit.iter().all(|p| (p - image).norm() > 1e-7) {
                    orbit.push(image);
                }
            }
            i += 1;
        }
        points.extend(orbit);
    }
    let centre = math::centroid(&points);
    Polyhedron::from_points(points.into_iter().map(|p| Point3::from(p - centre)).collect())
}

/// J86.
fn sphenocorona() -> Result<Polyhedron> {
    let k = math::bisect(
        |x| 60.0 * x.powi(4) - 48.0 * x.powi(3) - 100.0 * x * x + 56.0 * x + 23.0,
        0.5,
        0.9,
    );
    let a = (1.0 - k * k).sqrt();
    let seeds = [
        [0.0, 1.0, 2.0 * a],
        [2.0 * k, 1.0, 0.0],
        [0.0, 1.0 + (3.0 - 4.0 * k * k).sqrt() / a, (1.0 - 2.0 * k * k) / a],
        [1.0, 0.0, -(2.0 + 4.0 * k - 4.0 * k * k).sqrt()],
    ];
    Polyhedron::from_points(halved(sign_orbit(&seeds, [true, true, false])))
}

/// J87: a square pyramid on one of the sphenocorona's squares.
fn augmented_sphenocorona() -> Result<Polyhedron> {
    let host = sphenocorona()?;
    let (pyramid, base) = cap(CapType::Pyramid, 4)?;
    let square = host
        .faces_with_sides(4)
        .next()
        .map(|f| f.index())
        .ok_or_else(|| LookupError::NoGeometry("augmented sphenocorona".into()))?;
    attach(&host, square, &pyramid, base, 0)
}

/// J91.
fn bilunabirotunda() -> Result<Polyhedron> {
    let seeds = [
        [0.5, 0.5, PHI / 2.0],
        [PHI * PHI / 2.0, 0.0, 0.5],
        [0.0, PHI / 2.0, 0.0],
    ];
    Polyhedron::from_points(sign_orbit(&seeds, [true, true, true]))
}

/// J92, with its hexagon at the bottom.
fn triangular_hebesphenorotunda() -> Result<Polyhedron> {
    const POINTS: [[f64; 3]; 18] = [
        [-0.223_372_159_850_612, 0.851_986_358_941_109, -0.532_389_154_225_559],
        [-0.349_376_452_333_340, 0.851_986_358_941_109, 0.459_640_542_041_608],
        [0.572_748_612_183_952, 0.851_986_358_941_109, 0.072_748_612_183_951],
        [-0.012_047_294_445_424, 0.274_636_089_751_483, -1.321_064_288_820_372],
        [-0.934_172_358_962_716, 0.274_636_089_751_483, -0.934_172_358_962_716],
        [-1.138_051_586_928_153, 0.274_636_089_751_483, 0.670_965_407_446_795],
        [-0.341_930_814_893_590, 0.274_636_089_751_483, 1.276_103_173_856_306],
        [1.150_098_881_373_577, 0.274_636_089_751_483, 0.650_098_881_373_577],
        [1.276_103_173_856_304, 0.274_636_089_751_483, -0.341_930_814_893_589],
        [0.914_679_427_077_541, -0.082_186_000_021_607, -1.203_354_561_672_353],
        [0.584_795_906_629_376, -0.082_186_000_021_607, 1.393_812_901_004_323],
        [-1.499_475_333_706_917, -0.082_186_000_021_607, -0.190_458_339_331_970],
        [0.922_125_064_517_291, -0.659_536_269_211_234, -0.386_891_929_857_657],
        [0.126_004_292_482_728, -0.659_536_269_211_234, -0.992_029_696_267_167],
        [-0.796_120_772_034_563, -0.659_536_269_211_234, -0.605_137_766_409_511],
        [-0.922_125_064_517_291, -0.659_536_269_211_234, 0.386_891_929_857_657],
        [-0.126_004_292_482_728, -0.659_536_269_211_234, 0.992_029_696_267_167],
        [0.796_120_772_034_564, -0.659_536_269_211_234, 0.605_137_766_409_510],
    ];
    Polyhedron::from_points(POINTS.iter().copied().map(Point3::from).collect())
}

/// J88: a spheno of two squares over a twelve-triangle corona.
fn sphenomegacorona() -> Result<Polyhedron> {
    let seeds = [
        [0.0, 0.5, 0.856_404_155_013_930],
        [0.594_633_335_632_639, 0.5, 0.052_407_142_485_648],
        [0.0, 1.283_102_338_831_270, 0.234_511_296_945_117],
        [0.5, 0.0, -0.808_432_291_896_305],
        [0.0, 0.854_743_082_488_965, -0.669_097_217_570_915],
    ];
    Polyhedron::from_points(sign_orbit(&seeds, [true, true, false]))
}

/// J89: as J88 with a row of three squares on top.
fn hebesphenomegacorona() -> Result<Polyhedron> {
    let seeds = [
        [0.5, 0.5, 1.130_578_030_412_740],
        [0.716_844_815_713_457, 0.5, 0.154_371_942_592_040],
        [0.0, 1.101_296_042_047_277, 0.507_326_018_929_201],
        [0.5, 0.0, -0.684_066_084_872_243],
        [0.0, 0.835_659_071_722_367, -0.456_747_111_075_262],
    ];
    Polyhedron::from_points(sign_orbit(&seeds, [true, true, false]))
}

/// J90: two sphenos a quarter turn apart, joined by a band of triangles.
fn disphenocingulum() -> Result<Polyhedron> {
    let top = [
        [0.0, 0.5, 1.104_437_942_079_934],
        [0.767_131_113_983_462, 0.5, 0.462_947_603_915_365],
        [0.0, 1.126_483_147_078_980, 0.325_002_975_949_970],
    ];
    let quarter = Matrix3::new(0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, -1.0);
    let mut points = sign_orbit(&top, [true, true, false]);
    let bottom: Vec<Point3> = points.iter().map(|p| Point3::from(quarter * p.coords)).collect();
    points.extend(bottom);
    Polyhedron::from_points(points)
}

pub(super) fn build(solid: Elementary) -> Result<Polyhedron> {
    match solid {
        Elementary::Sphenocorona => sphenocorona(),
        Elementary::AugmentedSphenocorona => augmented_sphenocorona(),
        Elementary::Bilunabirotunda => bilunabirotunda(),
        Elementary::TriangularHebesphenorotunda => triangular_hebesphenorotunda(),
        Elementary::Sphenomegacorona => sphenomegacorona(),
        Elementary::Hebesphenomegacorona => hebesphenomegacorona(),
        Elementary::Disphenocingulum => disphenocingulum(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn check(solid: &Polyhedron, faces: &[(usize, usize)]) {
        assert!(solid.is_valid());
        assert!(solid.is_convex());
        assert_relative_eq!(solid.edge_length(), 1.0, epsilon = 1e-6);
        assert_eq!(solid.faces_by_sides(), faces.iter().copied().collect());
    }

    #[test]
    fn snub_antiprisms() {
        check(&snub_disphenoid().unwrap(), &[(3, 12)]);
        check(&snub_square_antiprism().unwrap(), &[(3, 24), (4, 2)]);
    }

    #[test]
    fn coronae() {
        check(&sphenocorona().unwrap(), &[(3, 12), (4, 2)]);
        check(&augmented_sphenocorona().unwrap(), &[(3, 16), (4, 1)]);
    }

    #[test]
    fn lunes_and_rotundae() {
        let j91 = bilunabirotunda().unwrap();
        check(&j91, &[(3, 8), (4, 2), (5, 4)]);
        assert_eq!(j91.vertex_configuration().get("3.5.5"), Some(&4));
        check(&triangular_hebesphenorotunda().unwrap(), &[(3, 13), (4, 3), (5, 3), (6, 1)]);
    }

    #[test]
    fn megacoronae() {
        let j88 = sphenomegacorona().unwrap();
        check(&j88, &[(3, 16), (4, 2)]);
        assert_eq!(j88.num_vertices(), 12);
        let j89 = hebesphenomegacorona().unwrap();
        check(&j89, &[(3, 18), (4, 3)]);
        assert_eq!(j89.num_vertices(), 14);
    }

    #[test]
    fn disphenocingulum_is_two_sphenos_and_a_belt() {
        let j90 = disphenocingulum().unwrap();
        check(&j90, &[(3, 20), (4, 4)]);
        assert_eq!(j90.num_vertices(), 16);
        assert_eq!(j90.num_edges(), 38);
    }

    #[test]
    fn every_elementary_solid_builds() {
        for solid in Elementary::ALL {
            let polyhedron = build(solid).unwrap();
            assert!(polyhedron.is_convex(), "{}", solid.name());
        }
    }
}
