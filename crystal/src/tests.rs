//! Test module for crystal structure functionality.

use super::*;
use approx::assert_relative_eq;

fn species(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Helper function to create a small orthorhombic crystal for testing
fn create_test_crystal() -> Crystal {
    let latt = Lattice::orthorhombic(4.0, 5.0, 10.0);

    let frac = vec![
        Vector3f64::new(0.0, 0.0, 0.1),
        Vector3f64::new(0.5, 0.5, 0.2),
        Vector3f64::new(0.25, 0.75, 0.3),
    ];

    Crystal::from_frac(latt, &frac, species(&["Mo", "S", "S"]))
}

#[test]
fn test_crystal_new() {
    let crystal = Crystal::new(Lattice::zeros(), Vec::new(), Vec::new());
    assert_eq!(crystal.get_n_atoms(), 0);
    assert!(crystal.get_unique_species().is_empty());
    assert!(!crystal.is_periodic());
}

#[test]
#[should_panic]
fn test_crystal_new_mismatched_lengths() {
    Crystal::new(
        Lattice::orthorhombic(1.0, 1.0, 1.0),
        vec![Vector3f64::zeros()],
        Vec::new(),
    );
}

#[test]
fn test_crystal_from_frac_stores_cartesian() {
    let crystal = create_test_crystal();

    let pos = crystal.get_atom_positions();
    assert_relative_eq!(pos[1].x, 2.0);
    assert_relative_eq!(pos[1].y, 2.5);
    assert_relative_eq!(pos[1].z, 2.0);

    let frac = crystal.get_atom_positions_frac();
    assert_relative_eq!(frac[2].y, 0.75, epsilon = 1e-12);
}

#[test]
fn test_get_unique_species_and_types() {
    let crystal = create_test_crystal();

    assert_eq!(crystal.get_unique_species(), species(&["Mo", "S"]));
    assert_eq!(crystal.get_atom_types(), vec![1, 2, 2]);
}

#[test]
fn test_constraints_default_to_free() {
    let crystal = create_test_crystal();
    assert_eq!(crystal.get_constraints().len(), 3);
    assert!(!crystal.has_constraints());

    let crystal = crystal.with_constraints(vec![
        Constraint::Fixed,
        Constraint::Free,
        Constraint::Mask([false, false, true]),
    ]);
    assert!(crystal.has_constraints());
    assert_eq!(crystal.get_constraints()[2], Constraint::Mask([false, false, true]));
}

#[test]
fn test_translate_and_wrap() {
    let mut crystal = create_test_crystal();

    crystal.translate(&Vector3f64::new(0.0, 0.0, 9.5));
    let frac = crystal.get_atom_positions_frac();
    assert_relative_eq!(frac[0].z, 1.05, epsilon = 1e-12);

    crystal.wrap();
    let frac = crystal.get_atom_positions_frac();
    assert_relative_eq!(frac[0].z, 0.05, epsilon = 1e-9);
    assert_relative_eq!(frac[1].z, 0.15, epsilon = 1e-9);
    assert_relative_eq!(frac[2].z, 0.25, epsilon = 1e-9);
}

#[test]
fn test_wrap_upper_face_goes_to_zero() {
    let latt = Lattice::orthorhombic(1.0, 1.0, 1.0);
    let mut crystal = Crystal::from_frac(
        latt,
        &[Vector3f64::new(1.0, -0.25, 0.5)],
        species(&["C"]),
    );

    crystal.wrap();

    let frac = crystal.get_atom_positions_frac();
    assert!(frac[0].x.abs() < 1e-6);
    assert_relative_eq!(frac[0].y, 0.75, epsilon = 1e-9);
    assert_relative_eq!(frac[0].z, 0.5, epsilon = 1e-9);
}

#[test]
fn test_wrap_non_periodic_is_noop() {
    let mut crystal = Crystal::new(
        Lattice::zeros(),
        vec![Vector3f64::new(12.0, -3.0, 40.0)],
        species(&["O"]),
    );

    crystal.wrap();
    assert_eq!(crystal.get_atom_positions()[0], Vector3f64::new(12.0, -3.0, 40.0));
}

#[test]
fn test_add_vacuum_orthogonal() {
    let mut crystal = create_test_crystal();
    let before = crystal.get_atom_positions().to_vec();

    crystal.add_vacuum(5.0);

    assert_relative_eq!(crystal.get_latt().lengths()[2], 15.0, epsilon = 1e-12);
    assert_eq!(crystal.get_atom_positions(), before.as_slice());
}

#[test]
fn test_add_vacuum_tilted_c() {
    let latt = Lattice::new(&[3.0, 0.0, 0.0], &[0.0, 3.0, 0.0], &[1.0, 0.0, 10.0]);
    let mut crystal = Crystal::new(latt, Vec::new(), Vec::new());

    crystal.add_vacuum(4.0);

    // the height along z grows by exactly the requested vacuum
    assert_relative_eq!(crystal.get_latt().get_vector_c().z, 14.0, epsilon = 1e-12);
}

#[test]
fn test_remove_atoms_keeps_metadata() {
    let crystal = create_test_crystal().with_constraints(vec![
        Constraint::Fixed,
        Constraint::Free,
        Constraint::Mask([true, false, false]),
    ]);

    let reduced = crystal.remove_atoms(&[1]);

    assert_eq!(reduced.get_n_atoms(), 2);
    assert_eq!(reduced.get_atom_species(), species(&["Mo", "S"]).as_slice());
    assert_eq!(
        reduced.get_constraints(),
        &[Constraint::Fixed, Constraint::Mask([true, false, false])]
    );
}

#[test]
fn test_select_atoms_reorders() {
    let crystal = create_test_crystal().with_constraints(vec![
        Constraint::Fixed,
        Constraint::Free,
        Constraint::Mask([false, false, true]),
    ]);

    let picked = crystal.select_atoms(&[2, 0]);

    assert_eq!(picked.get_atom_species(), species(&["S", "Mo"]).as_slice());
    assert_eq!(picked.get_atom_positions()[1], crystal.get_atom_positions()[0]);
    assert_eq!(
        picked.get_constraints(),
        &[Constraint::Mask([false, false, true]), Constraint::Fixed]
    );
}

#[test]
fn test_clear_constraints() {
    let mut crystal = create_test_crystal().with_constraints(vec![
        Constraint::Fixed,
        Constraint::Free,
        Constraint::Mask([true, true, false]),
    ]);
    assert!(crystal.has_constraints());

    crystal.clear_constraints();

    assert!(!crystal.has_constraints());
    assert_eq!(crystal.get_constraints().len(), 3);
}

#[test]
fn test_display() {
    create_test_crystal().display();
}
