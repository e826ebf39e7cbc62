use lin_alg::f64::Vec3;
use zalign_algos::linalg::{determinant, is_orthogonal};
use zalign_algos::{align, kabsch, rmsd, validate, AlignError, AlignOptions};
use zalign_mol::{Atom, ElementFilter, Structure};

const ELEMENTS: [&str; 8] = ["N", "C", "C", "O", "C", "S", "N", "H"];

fn points() -> Vec<Vec3> {
    vec![
        Vec3::new(1.204, -0.331, 0.118),
        Vec3::new(2.451, 0.397, -0.072),
        Vec3::new(3.652, -0.530, 0.051),
        Vec3::new(3.553, -1.751, 0.210),
        Vec3::new(2.566, 1.521, 0.958),
        Vec3::new(3.811, 2.764, 0.684),
        Vec3::new(4.821, 0.061, -0.013),
        Vec3::new(0.387, 0.254, -0.447),
    ]
}

fn structure(title: &str, coords: &[Vec3]) -> Structure {
    let mut builder = Structure::builder(title);
    for (i, (&p, e)) in coords.iter().zip(ELEMENTS.iter().cycle()).enumerate() {
        builder.push_atom(Atom::builder(i as i32 + 1, *e).coord(p).build());
    }
    builder.build()
}

/// Rodrigues rotation of `p` about unit `axis` by `angle` radians
fn rotate(p: Vec3, axis: Vec3, angle: f64) -> Vec3 {
    let (s, c) = angle.sin_cos();
    let dot = axis.x * p.x + axis.y * p.y + axis.z * p.z;
    let cross = Vec3::new(
        axis.y * p.z - axis.z * p.y,
        axis.z * p.x - axis.x * p.z,
        axis.x * p.y - axis.y * p.x,
    );
    p * c + cross * s + axis * (dot * (1.0 - c))
}

fn unit_axis() -> Vec3 {
    let (x, y, z) = (0.3_f64, -0.5_f64, 0.8_f64);
    let n = (x * x + y * y + z * z).sqrt();
    Vec3::new(x / n, y / n, z / n)
}

fn max_deviation(a: &Structure, b: &Structure) -> f64 {
    a.atoms()
        .iter()
        .zip(b.atoms())
        .map(|(p, q)| {
            let d = p.coord() - q.coord();
            d.x.abs().max(d.y.abs()).max(d.z.abs())
        })
        .fold(0.0, f64::max)
}

#[test]
fn self_alignment_is_identity() {
    let reference = structure("ref", &points());
    let mut movable = reference.clone();

    let outcome = align(&mut movable, &reference, &AlignOptions::default()).unwrap();
    let report = outcome.rmsd.unwrap();

    assert_eq!(report.count, 8);
    assert!(report.value < 1e-9, "rmsd = {}", report.value);
    assert!(max_deviation(&movable, &reference) < 1e-9);
}

#[test]
fn rotation_is_orthogonal() {
    let p = points();
    let q: Vec<Vec3> = p
        .iter()
        .map(|&x| rotate(x, unit_axis(), 1.1) + Vec3::new(0.4, 0.0, -2.0))
        .collect();
    let sup = kabsch(&p, &q).unwrap();

    assert!(is_orthogonal(&sup.rotation, 1e-9));
    assert!((determinant(&sup.rotation) - 1.0).abs() < 1e-9);
}

#[test]
fn rotated_and_translated_copy_is_recovered() {
    let reference = structure("ref", &points());
    let moved: Vec<Vec3> = points()
        .iter()
        .map(|&x| rotate(x, unit_axis(), 2.3) + Vec3::new(-7.0, 12.5, 3.25))
        .collect();
    let mut movable = structure("mov", &moved);

    let outcome = align(&mut movable, &reference, &AlignOptions::default()).unwrap();

    assert!(outcome.rmsd.unwrap().value < 1e-9);
    assert!(max_deviation(&movable, &reference) < 1e-9);
    assert!(outcome.superposition.is_proper_rotation());
}

#[test]
fn rmsd_is_translation_invariant() {
    // Perturbed reference so the fit is not exact
    let noise = [0.05, -0.02, 0.03, -0.04, 0.01, 0.06, -0.03, 0.02];
    let ref_coords: Vec<Vec3> = points()
        .iter()
        .zip(noise)
        .map(|(&p, n)| p + Vec3::new(n, -n, 0.5 * n))
        .collect();
    let reference = structure("ref", &ref_coords);

    let mut near = structure("near", &points());
    let mut far = structure("far", &points());
    far.translate(Vec3::new(100.0, -250.0, 42.0));

    let a = align(&mut near, &reference, &AlignOptions::default())
        .unwrap()
        .rmsd
        .unwrap();
    let b = align(&mut far, &reference, &AlignOptions::default())
        .unwrap()
        .rmsd
        .unwrap();

    assert!(a.value > 1e-3);
    assert!((a.value - b.value).abs() < 1e-9);
    assert!(max_deviation(&near, &far) < 1e-9);
}

#[test]
fn filter_count_matches_selection() {
    let reference = structure("ref", &points());
    let mut movable = structure("mov", &points());
    movable.translate(Vec3::new(1.0, 2.0, 3.0));

    let filter: ElementFilter = "C N".parse().unwrap();
    let expected = movable.count(Some(&filter));
    assert_eq!(expected, 5);
    assert_eq!(reference.count(Some(&filter)), expected);

    let options = AlignOptions::with_filter(filter.clone());
    let outcome = align(&mut movable, &reference, &options).unwrap();
    assert_eq!(outcome.rmsd.unwrap().count, expected);
    assert_eq!(rmsd(&movable, &reference, Some(&filter)).unwrap().count, expected);
}

#[test]
fn count_mismatch_fails_without_mutation() {
    let p = points();
    let mut movable = structure("mov", &p[..5]);
    let reference = structure("ref", &p[..4]);
    let before = movable.clone();

    assert_eq!(
        validate(&movable, &reference, None).unwrap_err(),
        AlignError::CountMismatch {
            movable: 5,
            reference: 4
        }
    );
    assert_eq!(
        align(&mut movable, &reference, &AlignOptions::default()).unwrap_err(),
        AlignError::CountMismatch {
            movable: 5,
            reference: 4
        }
    );
    assert_eq!(movable, before);
}

#[test]
fn quarter_turn_about_z() {
    let mut movable = Structure::builder("mov")
        .atom(Atom::new(1, "C", Vec3::new(0.0, 0.0, 0.0)))
        .atom(Atom::new(2, "O", Vec3::new(1.0, 0.0, 0.0)))
        .atom(Atom::new(3, "N", Vec3::new(0.0, 1.0, 0.0)))
        .build();
    // (x, y, z) -> (-y, x, z) + (5, 5, 5)
    let reference = Structure::builder("ref")
        .atom(Atom::new(1, "C", Vec3::new(5.0, 5.0, 5.0)))
        .atom(Atom::new(2, "O", Vec3::new(5.0, 6.0, 5.0)))
        .atom(Atom::new(3, "N", Vec3::new(4.0, 5.0, 5.0)))
        .build();

    let outcome = align(&mut movable, &reference, &AlignOptions::default()).unwrap();

    // Row-vector convention: p · R, so R is the transpose of the column form
    let expected = [[0.0, 1.0, 0.0], [-1.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
    let r = outcome.superposition.rotation;
    for i in 0..3 {
        for j in 0..3 {
            assert!(
                (r[i][j] - expected[i][j]).abs() < 1e-6,
                "R[{i}][{j}] = {}",
                r[i][j]
            );
        }
    }
    let report = outcome.rmsd.unwrap();
    assert_eq!(report.count, 3);
    assert!(report.value < 1e-6);
}

#[test]
fn single_carbon_filter_selects_one_row_per_side() {
    let movable_elements = ["C", "H", "H", "O", "N"];
    let reference_elements = ["H", "O", "C", "S", "S"];
    let mut movable = Structure::builder("mov");
    let mut reference = Structure::builder("ref");
    for i in 0..5 {
        let x = i as f64;
        movable.push_atom(Atom::new(i + 1, movable_elements[i as usize], Vec3::new(x, 0.0, 0.0)));
        reference.push_atom(Atom::new(i + 1, reference_elements[i as usize], Vec3::new(0.0, x, 1.0)));
    }
    let mut movable = movable.build();
    let reference = reference.build();
    let filter: ElementFilter = "C".parse().unwrap();

    assert_eq!(movable.coords(Some(&filter)).len(), 1);
    assert_eq!(reference.coords(Some(&filter)).len(), 1);

    let outcome = align(&mut movable, &reference, &AlignOptions::with_filter(filter)).unwrap();
    let report = outcome.rmsd.unwrap();
    assert_eq!(report.count, 1);
    assert!(report.value < 1e-12);

    // The lone carbon lands exactly on the reference carbon
    let c = movable.atom(0).unwrap().coord();
    assert!((c.x - 0.0).abs() < 1e-12);
    assert!((c.y - 2.0).abs() < 1e-12);
    assert!((c.z - 1.0).abs() < 1e-12);
}
