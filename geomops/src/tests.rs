use super::*;
use approx::{assert_abs_diff_eq, assert_relative_eq};
use crystal::Constraint;
use lattice::Lattice;
use vector3::Vector3f64;

fn species(n: usize) -> Vec<String> {
    vec!["Mo".to_string(); n]
}

// three layers at z = 10-10.5, 12.5-13 and 15 in a 30 Angstrom cell
fn layered_slab() -> Crystal {
    let positions = vec![
        Vector3f64::new(0.0, 0.0, 10.0),
        Vector3f64::new(5.0, 5.0, 10.5),
        Vector3f64::new(2.5, 2.5, 12.5),
        Vector3f64::new(7.5, 7.5, 13.0),
        Vector3f64::new(5.0, 0.0, 15.0),
    ];

    Crystal::new(Lattice::orthorhombic(10.0, 10.0, 30.0), positions, species(5))
}

fn z_values(crystal: &Crystal) -> Vec<f64> {
    crystal.get_atom_positions().iter().map(|p| p.z).collect()
}

#[test]
fn test_registry_keys() {
    let keys: Vec<&str> = REGISTRY.iter().map(|op| op.key()).collect();

    assert_eq!(
        keys,
        vec![
            "wslab", "rmlayer", "vset", "vadd", "zalign", "translate", "w", "noc", "scale",
            "rotate", "align", "elsort", "zsort", "torec", "repeat"
        ]
    );

    assert_eq!(find("vset").unwrap().key(), "vset");
    assert_eq!(find("r").unwrap().key(), "repeat");
    assert_eq!(find("l").unwrap().key(), "translate");
    assert_eq!(
        find("nope").err(),
        Some(OpError::UnknownOperation("nope".to_string()))
    );
}

#[test]
fn test_safe_name() {
    assert_eq!(safe_name("0,2"), "02");
    assert_eq!(safe_name("a/b c(1)"), "abc1");
    assert_eq!(safe_name("{x}[y]!$&=|:<>+*"), "xy");
    assert_eq!(safe_name_with("1,0,-2", "_"), "1_0_-2");
}

#[test]
fn test_suffixes() {
    assert_eq!(find("wslab").unwrap().output_suffix(""), "");
    assert_eq!(find("rmlayer").unwrap().output_suffix("0,2"), "_RL02");
    assert_eq!(find("vset").unwrap().output_suffix("15"), "_SV15");
    assert_eq!(find("vadd").unwrap().output_suffix("5"), "_V5");
    assert_eq!(find("zalign").unwrap().output_suffix(""), "_Z");
    assert_eq!(find("translate").unwrap().output_suffix("1,0,-2"), "_T1_0_-2");
    assert_eq!(find("w").unwrap().output_suffix(""), "");
    assert_eq!(find("noc").unwrap().output_suffix(""), "_NoC");
    assert_eq!(find("scale").unwrap().output_suffix("1.02"), "_SC1.02");
    assert_eq!(find("scale").unwrap().output_suffix("1,1,1.1"), "_SC1_1_1.1");
    assert_eq!(find("rotate").unwrap().output_suffix("C90z"), "_RC90z");
    assert_eq!(find("align").unwrap().output_suffix("ax,cz"), "_Aaxcz");
    assert_eq!(find("elsort").unwrap().output_suffix(""), "");
    assert_eq!(find("zsort").unwrap().output_suffix(""), "");
    assert_eq!(find("torec").unwrap().output_suffix(""), "_Rect");
    assert_eq!(find("repeat").unwrap().output_suffix("2,2,1"), "_2x2x1");
    assert_eq!(find("repeat").unwrap().output_suffix("1/2,1,1"), "_1%2x1x1");
}

#[test]
fn test_rmlayer() {
    let control = Control::new();
    let op = find("rmlayer").unwrap();

    let out = op.process(&layered_slab(), "0,2", &control).unwrap();
    assert_eq!(z_values(&out), vec![12.5, 13.0]);

    // index 5 does not exist and is skipped
    let out = op.process(&layered_slab(), "1,5", &control).unwrap();
    assert_eq!(z_values(&out), vec![10.0, 10.5, 15.0]);

    // every atom is its own layer with a 0.4 gap
    let out = op.process(&layered_slab(), "0,0.4", &control).unwrap();
    assert_eq!(out.get_n_atoms(), 4);
    assert_eq!(z_values(&out)[0], 10.5);
}

#[test]
fn test_rmlayer_bad_argument() {
    let err = find("rmlayer")
        .unwrap()
        .process(&layered_slab(), "0,wide", &Control::new())
        .err();

    assert_eq!(
        err,
        Some(OpError::InvalidArgument {
            op: "rmlayer",
            value: "wide".to_string()
        })
    );
}

#[test]
fn test_rmlayer_bulk_is_unchanged() {
    let bulk = Crystal::new(
        Lattice::orthorhombic(3.0, 3.0, 3.0),
        vec![Vector3f64::new(0.0, 0.0, 0.0)],
        species(1),
    );

    let out = find("rmlayer").unwrap().process(&bulk, "0", &Control::new()).unwrap();

    assert_eq!(out.get_n_atoms(), 1);
}

#[test]
fn test_wslab_keeps_atoms() {
    let out = find("wslab")
        .unwrap()
        .process(&layered_slab(), "", &Control::new())
        .unwrap();

    assert_eq!(out.get_n_atoms(), 5);
    assert_eq!(out.get_latt(), layered_slab().get_latt());
}

#[test]
fn test_vset() {
    let out = find("vset")
        .unwrap()
        .process(&layered_slab(), "15", &Control::new())
        .unwrap();

    assert_relative_eq!(out.get_latt().lengths()[2], 20.0, epsilon = 1e-6);

    assert!(find("vset")
        .unwrap()
        .process(&layered_slab(), "big", &Control::new())
        .is_err());
}

#[test]
fn test_vadd_periodic() {
    let out = find("vadd")
        .unwrap()
        .process(&layered_slab(), "5", &Control::new())
        .unwrap();

    assert_relative_eq!(out.get_latt().lengths()[2], 35.0, epsilon = 1e-10);
    assert_eq!(z_values(&out), z_values(&layered_slab()));
}

#[test]
fn test_vadd_molecule() {
    let molecule = Crystal::new(
        Lattice::zeros(),
        vec![Vector3f64::new(1.0, 1.0, 1.0), Vector3f64::new(3.0, 2.0, 1.0)],
        species(2),
    );

    let out = find("vadd").unwrap().process(&molecule, "4", &Control::new()).unwrap();

    let lengths = out.get_latt().lengths();
    assert_relative_eq!(lengths[0], 6.0);
    assert_relative_eq!(lengths[1], 5.0);
    assert_relative_eq!(lengths[2], 4.0);
    assert_eq!(out.get_atom_positions()[0], Vector3f64::zeros());
}

#[test]
fn test_zalign() {
    // vacuum along a
    let crystal = Crystal::new(
        Lattice::orthorhombic(30.0, 10.0, 10.0),
        vec![
            Vector3f64::new(10.0, 0.0, 0.0),
            Vector3f64::new(12.0, 1.0, 1.0),
            Vector3f64::new(14.0, 2.0, 2.0),
        ],
        species(3),
    );

    let out = find("zalign").unwrap().process(&crystal, "", &Control::new()).unwrap();

    let c = out.get_latt().get_vector_c();
    assert_relative_eq!(c.z, 30.0, epsilon = 1e-8);
    assert_relative_eq!(out.get_latt().volume(), crystal.get_latt().volume(), epsilon = 1e-8);
}

#[test]
fn test_zalign_needs_slab() {
    let bulk = Crystal::new(
        Lattice::orthorhombic(3.0, 3.0, 3.0),
        vec![Vector3f64::new(0.0, 0.0, 0.0)],
        species(1),
    );

    assert_eq!(
        find("zalign").unwrap().process(&bulk, "", &Control::new()).err(),
        Some(OpError::NoSlabAxis("zalign"))
    );
}

#[test]
fn test_translate() {
    let op = find("translate").unwrap();

    let out = op.process(&layered_slab(), "1, 0, -2", &Control::new()).unwrap();
    assert_eq!(out.get_atom_positions()[0], Vector3f64::new(1.0, 0.0, 8.0));

    assert!(op.process(&layered_slab(), "1,2", &Control::new()).is_err());
}

#[test]
fn test_apply_all() {
    let (out, suffix) = apply_all(
        &layered_slab(),
        &[("vadd", "5"), ("translate", "0,0,1")],
        &Control::new(),
    )
    .unwrap();

    assert_eq!(suffix, "_V5_T0_0_1");
    assert_relative_eq!(out.get_latt().lengths()[2], 35.0, epsilon = 1e-10);
    assert_eq!(out.get_atom_positions()[4].z, 16.0);

    assert!(apply_all(&layered_slab(), &[("shear", "")], &Control::new()).is_err());
}

fn hexagonal_sheet(gamma: f64) -> Crystal {
    let g = gamma.to_radians();
    let latt = Lattice::new(
        &[2.46, 0.0, 0.0],
        &[2.46 * g.cos(), 2.46 * g.sin(), 0.0],
        &[0.0, 0.0, 20.0],
    );

    Crystal::from_frac(
        latt,
        &[
            Vector3f64::new(1.0 / 3.0, 2.0 / 3.0, 0.5),
            Vector3f64::new(2.0 / 3.0, 1.0 / 3.0, 0.5),
        ],
        vec!["B".to_string(), "N".to_string()],
    )
}

fn assert_vec_eq(v: Vector3f64, x: f64, y: f64, z: f64) {
    assert_abs_diff_eq!(v.x, x, epsilon = 1e-8);
    assert_abs_diff_eq!(v.y, y, epsilon = 1e-8);
    assert_abs_diff_eq!(v.z, z, epsilon = 1e-8);
}

#[test]
fn test_wrap() {
    let crystal = Crystal::new(
        Lattice::orthorhombic(10.0, 10.0, 30.0),
        vec![Vector3f64::new(-1.0, 12.0, 35.0)],
        species(1),
    );

    let out = find("w").unwrap().process(&crystal, "", &Control::new()).unwrap();

    assert_vec_eq(out.get_atom_positions()[0], 9.0, 2.0, 5.0);
}

#[test]
fn test_noc() {
    let crystal = layered_slab().with_constraints(vec![
        Constraint::Fixed,
        Constraint::Fixed,
        Constraint::Free,
        Constraint::Mask([false, false, true]),
        Constraint::Free,
    ]);

    let out = find("noc").unwrap().process(&crystal, "", &Control::new()).unwrap();

    assert!(!out.has_constraints());
    assert_eq!(z_values(&out), z_values(&crystal));
}

#[test]
fn test_scale_single_factor_skips_slab_axis() {
    let op = find("scale").unwrap();

    let out = op.process(&layered_slab(), "2", &Control::new()).unwrap();

    let lengths = out.get_latt().lengths();
    assert_relative_eq!(lengths[0], 20.0);
    assert_relative_eq!(lengths[1], 20.0);
    assert_relative_eq!(lengths[2], 30.0);
    assert_vec_eq(out.get_atom_positions()[1], 10.0, 10.0, 10.5);
}

#[test]
fn test_scale_per_axis() {
    let op = find("scale").unwrap();
    let crystal = layered_slab().with_constraints(vec![Constraint::Fixed; 5]);

    let out = op.process(&crystal, "1,1,2", &Control::new()).unwrap();

    assert_relative_eq!(out.get_latt().lengths()[2], 60.0);
    for (z, expected) in z_values(&out).iter().zip([20.0, 21.0, 25.0, 26.0, 30.0]) {
        assert_relative_eq!(*z, expected, epsilon = 1e-10);
    }
    assert!(out.has_constraints());

    assert!(op.process(&crystal, "1,2", &Control::new()).is_err());
    assert!(op.process(&crystal, "big", &Control::new()).is_err());
}

#[test]
fn test_scale_molecule() {
    let molecule = Crystal::new(
        Lattice::zeros(),
        vec![Vector3f64::new(1.0, 2.0, 3.0)],
        species(1),
    );

    let out = find("scale")
        .unwrap()
        .process(&molecule, "2,3,4", &Control::new())
        .unwrap();

    assert_vec_eq(out.get_atom_positions()[0], 2.0, 6.0, 12.0);
}

#[test]
fn test_rotate_atoms_only() {
    let crystal = Crystal::new(
        Lattice::orthorhombic(10.0, 10.0, 10.0),
        vec![Vector3f64::new(1.0, 0.0, 0.0)],
        species(1),
    );
    let op = find("rotate").unwrap();

    let out = op.process(&crystal, "90z", &Control::new()).unwrap();
    assert_vec_eq(out.get_atom_positions()[0], 0.0, 1.0, 0.0);
    assert_eq!(out.get_latt(), crystal.get_latt());

    let out = op.process(&crystal, "90-z", &Control::new()).unwrap();
    assert_vec_eq(out.get_atom_positions()[0], 0.0, -1.0, 0.0);

    // c is along z here
    let out = op.process(&crystal, "90c,90z", &Control::new()).unwrap();
    assert_vec_eq(out.get_atom_positions()[0], -1.0, 0.0, 0.0);
}

#[test]
fn test_rotate_with_cell() {
    let crystal = Crystal::new(
        Lattice::orthorhombic(10.0, 10.0, 10.0),
        vec![Vector3f64::new(1.0, 0.0, 0.0)],
        species(1),
    );

    let out = find("rotate")
        .unwrap()
        .process(&crystal, "C90z", &Control::new())
        .unwrap();

    assert_vec_eq(out.get_latt().get_vector_a(), 0.0, 10.0, 0.0);
    assert_vec_eq(out.get_atom_positions()[0], 0.0, 1.0, 0.0);

    let frac = out.get_atom_positions_frac()[0];
    assert_abs_diff_eq!(frac.x, 0.1, epsilon = 1e-8);
}

#[test]
fn test_rotate_bad_expression() {
    assert_eq!(
        find("rotate")
            .unwrap()
            .process(&layered_slab(), "spin", &Control::new())
            .err(),
        Some(OpError::InvalidArgument {
            op: "rotate",
            value: "spin".to_string()
        })
    );
}

#[test]
fn test_align_a_to_x() {
    let crystal = Crystal::new(
        Lattice::new(&[3.0, 3.0, 0.0], &[-3.0, 3.0, 0.0], &[0.0, 0.0, 10.0]),
        vec![Vector3f64::new(3.0, 3.0, 5.0)],
        species(1),
    );

    let out = find("align").unwrap().process(&crystal, "ax", &Control::new()).unwrap();

    let l = 18.0f64.sqrt();
    assert_vec_eq(out.get_latt().get_vector_a(), l, 0.0, 0.0);
    assert_vec_eq(out.get_latt().get_vector_b(), 0.0, l, 0.0);
    assert_vec_eq(out.get_atom_positions()[0], l, 0.0, 5.0);
}

#[test]
fn test_align_opposite_vector() {
    let crystal = Crystal::new(
        Lattice::new(&[-4.0, 0.0, 0.0], &[0.0, -4.0, 0.0], &[0.0, 0.0, 5.0]),
        vec![Vector3f64::new(-1.0, 0.0, 0.0)],
        species(1),
    );

    let op = find("align").unwrap();

    let out = op.process(&crystal, "ax", &Control::new()).unwrap();
    assert_vec_eq(out.get_latt().get_vector_a(), 4.0, 0.0, 0.0);
    assert_vec_eq(out.get_latt().get_vector_c(), 0.0, 0.0, 5.0);
    assert_vec_eq(out.get_atom_positions()[0], 1.0, 0.0, 0.0);

    assert!(op.process(&crystal, "xa", &Control::new()).is_err());
}

#[test]
fn test_elsort() {
    let names = ["S", "Mo", "S", "C", "Xq"];
    let crystal = Crystal::new(
        Lattice::orthorhombic(10.0, 10.0, 10.0),
        (0..5).map(|i| Vector3f64::new(i as f64, 0.0, 0.0)).collect(),
        names.iter().map(|s| s.to_string()).collect(),
    );

    let out = find("elsort").unwrap().process(&crystal, "", &Control::new()).unwrap();

    assert_eq!(out.get_atom_species(), &["C", "S", "S", "Mo", "Xq"]);
    // the two S keep their order
    assert_eq!(out.get_atom_positions()[1].x, 0.0);
    assert_eq!(out.get_atom_positions()[2].x, 2.0);

    assert_eq!(atomic_number("Mo"), Some(42));
    assert_eq!(atomic_number("Og"), Some(118));
    assert_eq!(atomic_number("Xq"), None);
}

#[test]
fn test_zsort() {
    let crystal = Crystal::new(
        Lattice::orthorhombic(10.0, 10.0, 10.0),
        vec![
            Vector3f64::new(2.0, 0.0, 5.0),
            Vector3f64::new(0.0, 1.0, 1.0),
            Vector3f64::new(1.0, 0.0, 5.001),
            Vector3f64::new(0.0, 0.0, 1.0),
        ],
        species(4),
    );

    let out = find("zsort").unwrap().process(&crystal, "", &Control::new()).unwrap();

    let xs: Vec<f64> = out.get_atom_positions().iter().map(|p| p.x).collect();
    let ys: Vec<f64> = out.get_atom_positions().iter().map(|p| p.y).collect();

    // z = 5.0 and 5.001 share a plane, x breaks the tie
    assert_eq!(ys, vec![0.0, 1.0, 0.0, 0.0]);
    assert_eq!(xs, vec![0.0, 0.0, 1.0, 2.0]);
}

#[test]
fn test_elsort_after_zsort() {
    let crystal = Crystal::new(
        Lattice::orthorhombic(10.0, 10.0, 10.0),
        vec![
            Vector3f64::new(0.0, 0.0, 3.0),
            Vector3f64::new(0.0, 0.0, 1.0),
            Vector3f64::new(0.0, 0.0, 2.0),
        ],
        vec!["S".to_string(), "S".to_string(), "Mo".to_string()],
    );

    let (out, suffix) = apply_all(
        &crystal,
        &[("zsort", ""), ("elsort", "")],
        &Control::new(),
    )
    .unwrap();

    assert_eq!(suffix, "");
    assert_eq!(out.get_atom_species(), &["S", "S", "Mo"]);
    assert_eq!(z_values(&out), vec![1.0, 3.0, 2.0]);
}

#[test]
fn test_torec() {
    for gamma in [60.0, 120.0] {
        let sheet = hexagonal_sheet(gamma);

        let out = find("torec").unwrap().process(&sheet, "", &Control::new()).unwrap();

        assert_eq!(out.get_n_atoms(), 4);
        assert_relative_eq!(out.get_latt().angles()[2], 90.0, epsilon = 1e-8);
        assert_relative_eq!(
            out.get_latt().volume().abs(),
            2.0 * sheet.get_latt().volume().abs(),
            epsilon = 1e-8
        );

        let mut lengths = out.get_latt().lengths();
        lengths[..2].sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_relative_eq!(lengths[0], 2.46, epsilon = 1e-8);
        assert_relative_eq!(lengths[1], 2.46 * 3.0f64.sqrt(), epsilon = 1e-8);

        let borons = out.get_atom_species().iter().filter(|s| *s == "B").count();
        assert_eq!(borons, 2);
    }
}

#[test]
fn test_torec_hexagonal_plane_along_a() {
    let latt = Lattice::new(&[20.0, 0.0, 0.0], &[0.0, 2.46, 0.0], &[0.0, -1.23, 2.46 * 0.75f64.sqrt()]);
    let crystal = Crystal::from_frac(latt, &[Vector3f64::new(0.5, 0.0, 0.0)], species(1));

    let out = find("torec").unwrap().process(&crystal, "", &Control::new()).unwrap();

    assert_eq!(out.get_n_atoms(), 2);
    // the old a becomes c
    assert_vec_eq(out.get_latt().get_vector_c(), 20.0, 0.0, 0.0);
    assert_relative_eq!(out.get_latt().angles()[2], 90.0, epsilon = 1e-8);
}

#[test]
fn test_torec_needs_hexagonal_cell() {
    let op = find("torec").unwrap();

    assert!(matches!(
        op.process(&layered_slab(), "", &Control::new()),
        Err(OpError::InvalidArgument { op: "torec", .. })
    ));

    let molecule = Crystal::new(Lattice::zeros(), vec![Vector3f64::zeros()], species(1));
    assert_eq!(
        op.process(&molecule, "", &Control::new()).err(),
        Some(OpError::NonPeriodic("torec"))
    );
}

#[test]
fn test_repeat() {
    let crystal = Crystal::new(
        Lattice::orthorhombic(3.0, 3.0, 20.0),
        vec![Vector3f64::new(0.0, 0.0, 10.0)],
        species(1),
    );

    let out = find("r").unwrap().process(&crystal, "2,2,1", &Control::new()).unwrap();

    assert_eq!(out.get_n_atoms(), 4);
    let lengths = out.get_latt().lengths();
    assert_relative_eq!(lengths[0], 6.0);
    assert_relative_eq!(lengths[1], 6.0);
    assert_relative_eq!(lengths[2], 20.0);

    let mut xs: Vec<f64> = out.get_atom_positions().iter().map(|p| p.x).collect();
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_abs_diff_eq!(xs[3], 3.0, epsilon = 1e-8);
}

#[test]
fn test_repeat_fraction_halves_cell() {
    let crystal = Crystal::new(
        Lattice::orthorhombic(6.0, 4.0, 20.0),
        vec![Vector3f64::new(0.0, 0.0, 10.0), Vector3f64::new(3.0, 0.0, 10.0)],
        species(2),
    );

    let out = find("repeat").unwrap().process(&crystal, "1/2,1,1", &Control::new()).unwrap();

    assert_eq!(out.get_n_atoms(), 1);
    assert_relative_eq!(out.get_latt().lengths()[0], 3.0);
}

#[test]
fn test_repeat_supercell_mode() {
    let crystal = Crystal::new(
        Lattice::orthorhombic(3.0, 3.0, 20.0),
        vec![Vector3f64::new(3.5, 0.0, 10.0)],
        species(1),
    )
    .with_constraints(vec![Constraint::Fixed]);

    let out = find("repeat")
        .unwrap()
        .process(&crystal, "2,1,1,-1", &Control::new())
        .unwrap();

    // copies are not wrapped
    let xs: Vec<f64> = out.get_atom_positions().iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![3.5, 6.5]);
    assert_eq!(out.get_constraints(), &[Constraint::Fixed, Constraint::Fixed]);
}

#[test]
fn test_repeat_errors() {
    let op = find("repeat").unwrap();

    // an atom at x = 1.5 does not fit the halved cell evenly
    let crystal = Crystal::new(
        Lattice::orthorhombic(6.0, 4.0, 20.0),
        vec![Vector3f64::new(0.0, 0.0, 10.0), Vector3f64::new(1.5, 0.0, 10.0)],
        species(2),
    );

    assert_eq!(
        op.process(&crystal, "1/2,1,1", &Control::new()).err(),
        Some(OpError::AtomCount {
            op: "repeat",
            expected: 1,
            found: 2
        })
    );

    assert!(op.process(&crystal, "2,x,1", &Control::new()).is_err());
    assert!(op.process(&crystal, "2,1", &Control::new()).is_err());
    assert!(op.process(&crystal, "1.5,1,1,-1", &Control::new()).is_err());

    let molecule = Crystal::new(Lattice::zeros(), vec![Vector3f64::zeros()], species(1));
    assert_eq!(
        op.process(&molecule, "2,2,2", &Control::new()).err(),
        Some(OpError::NonPeriodic("repeat"))
    );
}

#[test]
fn test_cut_keeps_constraints() {
    let crystal = Crystal::new(
        Lattice::orthorhombic(3.0, 3.0, 20.0),
        vec![Vector3f64::new(1.0, 1.0, 10.0)],
        species(1),
    )
    .with_constraints(vec![Constraint::Mask([true, false, false])]);

    let rows = [[1.0, 1.0, 0.0], [-1.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
    let out = cut(&crystal, &rows, 0.0).unwrap();

    assert_eq!(out.get_n_atoms(), 2);
    assert!(out
        .get_constraints()
        .iter()
        .all(|c| *c == Constraint::Mask([true, false, false])));

    assert!(cut(&crystal, &[[1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 0.0, 1.0]], 0.0).is_none());
}
