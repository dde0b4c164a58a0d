use super::ids::{AtomId, ResidueId};
use nalgebra::Point3;
use std::collections::HashMap;

/// Represents a single atom in a chemical structure.
///
/// An atom carries the physicochemical fields a PDB record can populate
/// (element, mass, formal charge, occupancy, temperature factor, alternate
/// location code, Cartesian position) plus the bookkeeping the owning
/// [`Structure`](super::structure::Structure) maintains: a back-reference to
/// the residue it belongs to, the alternate-conformation map for disordered
/// sites, and the per-kind partner registries that cross-registering
/// topology terms keep in sync.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The atom name as it appeared in the source (e.g., "CA", "OXT").
    pub name: String,
    /// Atomic number; 0 means the element could not be resolved.
    pub atomic_number: usize,
    /// Atomic mass in daltons; 0.0 when the element is unresolved.
    pub mass: f64,
    /// Formal charge in elementary charge units.
    pub charge: f64,
    /// Crystallographic occupancy.
    pub occupancy: f64,
    /// Temperature (B-) factor.
    pub bfactor: f64,
    /// Alternate-location code; `' '` for ordered sites.
    pub altloc: char,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// The residue this atom belongs to, once it has been inserted.
    pub residue: Option<ResidueId>,
    /// Alternate conformations of this site, keyed by altloc code.
    ///
    /// Owned exclusively by the primary (first-encountered) atom at a
    /// disordered site; the alternates themselves never enter the atom
    /// arena.
    pub other_locations: HashMap<char, Atom>,
    /// Partner atoms from bonds this atom participates in.
    pub bond_partners: Vec<AtomId>,
    /// Partner atoms from angles this atom participates in.
    pub angle_partners: Vec<AtomId>,
    /// Partner atoms from dihedrals this atom participates in.
    pub dihedral_partners: Vec<AtomId>,
    /// Partner atoms from Urey-Bradley terms this atom participates in.
    pub urey_partners: Vec<AtomId>,
    /// Partner atoms from improper torsions this atom participates in.
    pub improper_partners: Vec<AtomId>,
    /// Partner atoms from CMAP terms this atom participates in.
    pub cmap_partners: Vec<AtomId>,
    /// Partner atoms from coupled torsion-torsion terms.
    pub tortor_partners: Vec<AtomId>,
}

impl Atom {
    /// Creates a new `Atom` with the given name and position.
    ///
    /// All other fields start at their neutral defaults (unresolved element,
    /// zero charge/occupancy/bfactor, blank altloc, no residue, no
    /// registered partners) and are filled in afterward by the parser or the
    /// caller.
    pub fn new(name: &str, position: Point3<f64>) -> Self {
        Self {
            name: name.to_string(),
            atomic_number: 0,
            mass: 0.0,
            charge: 0.0,
            occupancy: 0.0,
            bfactor: 0.0,
            altloc: ' ',
            position,
            residue: None,
            other_locations: HashMap::new(),
            bond_partners: Vec::new(),
            angle_partners: Vec::new(),
            dihedral_partners: Vec::new(),
            urey_partners: Vec::new(),
            improper_partners: Vec::new(),
            cmap_partners: Vec::new(),
            tortor_partners: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn new_atom_has_expected_default_fields() {
        let atom = Atom::new("CA", Point3::new(1.0, 2.0, 3.0));

        assert_eq!(atom.name, "CA");
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.atomic_number, 0);
        assert_eq!(atom.mass, 0.0);
        assert_eq!(atom.charge, 0.0);
        assert_eq!(atom.occupancy, 0.0);
        assert_eq!(atom.bfactor, 0.0);
        assert_eq!(atom.altloc, ' ');
        assert!(atom.residue.is_none());
        assert!(atom.other_locations.is_empty());
    }

    #[test]
    fn new_atom_has_no_registered_partners() {
        let atom = Atom::new("N", Point3::origin());
        assert!(atom.bond_partners.is_empty());
        assert!(atom.angle_partners.is_empty());
        assert!(atom.dihedral_partners.is_empty());
        assert!(atom.urey_partners.is_empty());
        assert!(atom.improper_partners.is_empty());
        assert!(atom.cmap_partners.is_empty());
        assert!(atom.tortor_partners.is_empty());
    }

    #[test]
    fn atom_equality_and_clone_works() {
        let mut atom1 = Atom::new("OXT", Point3::new(0.5, 0.5, 0.5));
        atom1.atomic_number = 8;
        atom1.mass = 15.9994;
        let atom2 = atom1.clone();
        assert_eq!(atom1, atom2);
    }

    #[test]
    fn other_locations_holds_alternate_conformations() {
        let mut primary = Atom::new("CG", Point3::origin());
        primary.altloc = 'A';
        let mut alt = Atom::new("CG", Point3::new(0.1, 0.0, 0.0));
        alt.altloc = 'B';

        primary.other_locations.insert('B', alt);
        assert_eq!(primary.other_locations.len(), 1);
        assert_eq!(primary.other_locations[&'B'].altloc, 'B');
    }
}
