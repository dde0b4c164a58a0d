use super::atom::Atom;
use super::ids::AtomId;
use slotmap::SlotMap;

/// Common interface over every topology term kind.
///
/// A term is a fixed-arity relation over atoms. Each kind stores its atom
/// references as a fixed-size array of `Option<AtomId>`, so one generic
/// pruning sweep can classify any term: "empty" means every slot is `None`,
/// "dangling" means some set slot names an atom no longer in the arena.
///
/// Kinds that cross-register (bonds, angles, dihedrals, Urey-Bradleys,
/// impropers, CMAPs, torsion-torsions) override [`register`](TermSlots::register)
/// and [`unregister`](TermSlots::unregister) to keep the per-atom partner
/// lists in sync; the remaining kinds use the no-op defaults.
pub trait TermSlots {
    /// Fixed atom-reference slots in declaration order.
    fn slots(&self) -> &[Option<AtomId>];

    /// Records this term on its referenced atoms' partner lists.
    fn register(&self, _atoms: &mut SlotMap<AtomId, Atom>) {}

    /// Removes this term from its referenced atoms' partner lists.
    ///
    /// Must undo exactly one [`register`](TermSlots::register); atoms that
    /// have already left the arena are skipped.
    fn unregister(&self, _atoms: &mut SlotMap<AtomId, Atom>) {}
}

type PartnerList = fn(&mut Atom) -> &mut Vec<AtomId>;

fn register_partners(atoms: &mut SlotMap<AtomId, Atom>, slots: &[Option<AtomId>], list: PartnerList) {
    for (i, slot) in slots.iter().enumerate() {
        let Some(id) = *slot else { continue };
        let Some(atom) = atoms.get_mut(id) else { continue };
        for (j, other) in slots.iter().enumerate() {
            if i == j {
                continue;
            }
            if let Some(partner) = *other {
                list(atom).push(partner);
            }
        }
    }
}

fn unregister_partners(
    atoms: &mut SlotMap<AtomId, Atom>,
    slots: &[Option<AtomId>],
    list: PartnerList,
) {
    for (i, slot) in slots.iter().enumerate() {
        let Some(id) = *slot else { continue };
        let Some(atom) = atoms.get_mut(id) else { continue };
        for (j, other) in slots.iter().enumerate() {
            if i == j {
                continue;
            }
            let Some(partner) = *other else { continue };
            // Remove a single occurrence; duplicate terms each hold one.
            let partners = list(atom);
            if let Some(pos) = partners.iter().position(|&p| p == partner) {
                partners.remove(pos);
            }
        }
    }
}

/// A covalent bond between two atoms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bond {
    pub atoms: [Option<AtomId>; 2],
}

impl Bond {
    pub fn new(atom1: AtomId, atom2: AtomId) -> Self {
        Self {
            atoms: [Some(atom1), Some(atom2)],
        }
    }

    pub fn atom1(&self) -> Option<AtomId> {
        self.atoms[0]
    }

    pub fn atom2(&self) -> Option<AtomId> {
        self.atoms[1]
    }
}

impl TermSlots for Bond {
    fn slots(&self) -> &[Option<AtomId>] {
        &self.atoms
    }

    fn register(&self, atoms: &mut SlotMap<AtomId, Atom>) {
        register_partners(atoms, &self.atoms, |a| &mut a.bond_partners);
    }

    fn unregister(&self, atoms: &mut SlotMap<AtomId, Atom>) {
        unregister_partners(atoms, &self.atoms, |a| &mut a.bond_partners);
    }
}

/// A valence angle over three atoms, the central atom second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Angle {
    pub atoms: [Option<AtomId>; 3],
}

impl Angle {
    pub fn new(atom1: AtomId, atom2: AtomId, atom3: AtomId) -> Self {
        Self {
            atoms: [Some(atom1), Some(atom2), Some(atom3)],
        }
    }
}

impl TermSlots for Angle {
    fn slots(&self) -> &[Option<AtomId>] {
        &self.atoms
    }

    fn register(&self, atoms: &mut SlotMap<AtomId, Atom>) {
        register_partners(atoms, &self.atoms, |a| &mut a.angle_partners);
    }

    fn unregister(&self, atoms: &mut SlotMap<AtomId, Atom>) {
        unregister_partners(atoms, &self.atoms, |a| &mut a.angle_partners);
    }
}

/// A proper torsion over four atoms.
///
/// Only one term per entry; multi-term torsion profiles repeat the same four
/// atoms in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dihedral {
    pub atoms: [Option<AtomId>; 4],
}

impl Dihedral {
    pub fn new(atom1: AtomId, atom2: AtomId, atom3: AtomId, atom4: AtomId) -> Self {
        Self {
            atoms: [Some(atom1), Some(atom2), Some(atom3), Some(atom4)],
        }
    }
}

impl TermSlots for Dihedral {
    fn slots(&self) -> &[Option<AtomId>] {
        &self.atoms
    }

    fn register(&self, atoms: &mut SlotMap<AtomId, Atom>) {
        register_partners(atoms, &self.atoms, |a| &mut a.dihedral_partners);
    }

    fn unregister(&self, atoms: &mut SlotMap<AtomId, Atom>) {
        unregister_partners(atoms, &self.atoms, |a| &mut a.dihedral_partners);
    }
}

/// A CHARMM-style Urey-Bradley 1-3 interaction across an angle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UreyBradley {
    pub atoms: [Option<AtomId>; 2],
}

impl UreyBradley {
    pub fn new(atom1: AtomId, atom2: AtomId) -> Self {
        Self {
            atoms: [Some(atom1), Some(atom2)],
        }
    }
}

impl TermSlots for UreyBradley {
    fn slots(&self) -> &[Option<AtomId>] {
        &self.atoms
    }

    fn register(&self, atoms: &mut SlotMap<AtomId, Atom>) {
        register_partners(atoms, &self.atoms, |a| &mut a.urey_partners);
    }

    fn unregister(&self, atoms: &mut SlotMap<AtomId, Atom>) {
        unregister_partners(atoms, &self.atoms, |a| &mut a.urey_partners);
    }
}

/// A CHARMM-style improper torsion over four atoms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Improper {
    pub atoms: [Option<AtomId>; 4],
}

impl Improper {
    pub fn new(atom1: AtomId, atom2: AtomId, atom3: AtomId, atom4: AtomId) -> Self {
        Self {
            atoms: [Some(atom1), Some(atom2), Some(atom3), Some(atom4)],
        }
    }
}

impl TermSlots for Improper {
    fn slots(&self) -> &[Option<AtomId>] {
        &self.atoms
    }

    fn register(&self, atoms: &mut SlotMap<AtomId, Atom>) {
        register_partners(atoms, &self.atoms, |a| &mut a.improper_partners);
    }

    fn unregister(&self, atoms: &mut SlotMap<AtomId, Atom>) {
        unregister_partners(atoms, &self.atoms, |a| &mut a.improper_partners);
    }
}

/// A CMAP coupled-torsion correction over five consecutive atoms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cmap {
    pub atoms: [Option<AtomId>; 5],
}

impl Cmap {
    pub fn new(atom1: AtomId, atom2: AtomId, atom3: AtomId, atom4: AtomId, atom5: AtomId) -> Self {
        Self {
            atoms: [Some(atom1), Some(atom2), Some(atom3), Some(atom4), Some(atom5)],
        }
    }
}

impl TermSlots for Cmap {
    fn slots(&self) -> &[Option<AtomId>] {
        &self.atoms
    }

    fn register(&self, atoms: &mut SlotMap<AtomId, Atom>) {
        register_partners(atoms, &self.atoms, |a| &mut a.cmap_partners);
    }

    fn unregister(&self, atoms: &mut SlotMap<AtomId, Atom>) {
        unregister_partners(atoms, &self.atoms, |a| &mut a.cmap_partners);
    }
}

/// An AMOEBA-style trigonal angle over four atoms. Not cross-registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrigonalAngle {
    pub atoms: [Option<AtomId>; 4],
}

impl TrigonalAngle {
    pub fn new(atom1: AtomId, atom2: AtomId, atom3: AtomId, atom4: AtomId) -> Self {
        Self {
            atoms: [Some(atom1), Some(atom2), Some(atom3), Some(atom4)],
        }
    }
}

impl TermSlots for TrigonalAngle {
    fn slots(&self) -> &[Option<AtomId>] {
        &self.atoms
    }
}

/// An AMOEBA-style out-of-plane bend over four atoms. Not cross-registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutOfPlaneBend {
    pub atoms: [Option<AtomId>; 4],
}

impl OutOfPlaneBend {
    pub fn new(atom1: AtomId, atom2: AtomId, atom3: AtomId, atom4: AtomId) -> Self {
        Self {
            atoms: [Some(atom1), Some(atom2), Some(atom3), Some(atom4)],
        }
    }
}

impl TermSlots for OutOfPlaneBend {
    fn slots(&self) -> &[Option<AtomId>] {
        &self.atoms
    }
}

/// An AMOEBA-style pi-torsion over six atoms. Not cross-registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PiTorsion {
    pub atoms: [Option<AtomId>; 6],
}

impl PiTorsion {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        atom1: AtomId,
        atom2: AtomId,
        atom3: AtomId,
        atom4: AtomId,
        atom5: AtomId,
        atom6: AtomId,
    ) -> Self {
        Self {
            atoms: [
                Some(atom1),
                Some(atom2),
                Some(atom3),
                Some(atom4),
                Some(atom5),
                Some(atom6),
            ],
        }
    }
}

impl TermSlots for PiTorsion {
    fn slots(&self) -> &[Option<AtomId>] {
        &self.atoms
    }
}

/// An AMOEBA-style stretch-bend compound term over three atoms.
/// Not cross-registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StretchBend {
    pub atoms: [Option<AtomId>; 3],
}

impl StretchBend {
    pub fn new(atom1: AtomId, atom2: AtomId, atom3: AtomId) -> Self {
        Self {
            atoms: [Some(atom1), Some(atom2), Some(atom3)],
        }
    }
}

impl TermSlots for StretchBend {
    fn slots(&self) -> &[Option<AtomId>] {
        &self.atoms
    }
}

/// An AMOEBA-style coupled torsion-torsion term over five atoms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorsionTorsion {
    pub atoms: [Option<AtomId>; 5],
}

impl TorsionTorsion {
    pub fn new(atom1: AtomId, atom2: AtomId, atom3: AtomId, atom4: AtomId, atom5: AtomId) -> Self {
        Self {
            atoms: [Some(atom1), Some(atom2), Some(atom3), Some(atom4), Some(atom5)],
        }
    }
}

impl TermSlots for TorsionTorsion {
    fn slots(&self) -> &[Option<AtomId>] {
        &self.atoms
    }

    fn register(&self, atoms: &mut SlotMap<AtomId, Atom>) {
        register_partners(atoms, &self.atoms, |a| &mut a.tortor_partners);
    }

    fn unregister(&self, atoms: &mut SlotMap<AtomId, Atom>) {
        unregister_partners(atoms, &self.atoms, |a| &mut a.tortor_partners);
    }
}

/// An AMOEBA-style chiral frame: a chirality-defining atom pair.
///
/// Pruned under the simplified rule: any unset or dangling slot removes the
/// whole entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChiralFrame {
    pub atoms: [Option<AtomId>; 2],
}

impl ChiralFrame {
    pub fn new(atom1: AtomId, atom2: AtomId) -> Self {
        Self {
            atoms: [Some(atom1), Some(atom2)],
        }
    }
}

impl TermSlots for ChiralFrame {
    fn slots(&self) -> &[Option<AtomId>] {
        &self.atoms
    }
}

/// An AMOEBA-style multipole frame anchored to a single atom.
///
/// Pruned under the simplified rule, like [`ChiralFrame`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipoleFrame {
    pub atoms: [Option<AtomId>; 1],
}

impl MultipoleFrame {
    pub fn new(atom: AtomId) -> Self {
        Self { atoms: [Some(atom)] }
    }
}

impl TermSlots for MultipoleFrame {
    fn slots(&self) -> &[Option<AtomId>] {
        &self.atoms
    }
}

/// A nonbonded pair-exception rule over two atoms. Not cross-registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonbondedException {
    pub atoms: [Option<AtomId>; 2],
}

impl NonbondedException {
    pub fn new(atom1: AtomId, atom2: AtomId) -> Self {
        Self {
            atoms: [Some(atom1), Some(atom2)],
        }
    }
}

impl TermSlots for NonbondedException {
    fn slots(&self) -> &[Option<AtomId>] {
        &self.atoms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn arena_with(n: usize) -> (SlotMap<AtomId, Atom>, Vec<AtomId>) {
        let mut atoms = SlotMap::with_key();
        let ids = (0..n)
            .map(|i| atoms.insert(Atom::new(&format!("A{i}"), Point3::origin())))
            .collect();
        (atoms, ids)
    }

    #[test]
    fn bond_register_records_partners_on_both_atoms() {
        let (mut atoms, ids) = arena_with(2);
        let bond = Bond::new(ids[0], ids[1]);
        bond.register(&mut atoms);

        assert_eq!(atoms[ids[0]].bond_partners, vec![ids[1]]);
        assert_eq!(atoms[ids[1]].bond_partners, vec![ids[0]]);
    }

    #[test]
    fn bond_unregister_undoes_exactly_one_registration() {
        let (mut atoms, ids) = arena_with(2);
        let bond = Bond::new(ids[0], ids[1]);
        bond.register(&mut atoms);
        bond.register(&mut atoms); // duplicate term over the same atoms
        bond.unregister(&mut atoms);

        assert_eq!(atoms[ids[0]].bond_partners, vec![ids[1]]);
        assert_eq!(atoms[ids[1]].bond_partners, vec![ids[0]]);
    }

    #[test]
    fn angle_register_links_every_pair() {
        let (mut atoms, ids) = arena_with(3);
        let angle = Angle::new(ids[0], ids[1], ids[2]);
        angle.register(&mut atoms);

        assert_eq!(atoms[ids[0]].angle_partners, vec![ids[1], ids[2]]);
        assert_eq!(atoms[ids[1]].angle_partners, vec![ids[0], ids[2]]);
        assert_eq!(atoms[ids[2]].angle_partners, vec![ids[0], ids[1]]);
    }

    #[test]
    fn unregister_skips_atoms_already_removed_from_arena() {
        let (mut atoms, ids) = arena_with(2);
        let bond = Bond::new(ids[0], ids[1]);
        bond.register(&mut atoms);

        atoms.remove(ids[1]);
        bond.unregister(&mut atoms);

        assert!(atoms[ids[0]].bond_partners.is_empty());
    }

    #[test]
    fn partial_term_registers_only_set_slots() {
        let (mut atoms, ids) = arena_with(2);
        let angle = Angle {
            atoms: [Some(ids[0]), None, Some(ids[1])],
        };
        angle.register(&mut atoms);

        assert_eq!(atoms[ids[0]].angle_partners, vec![ids[1]]);
        assert_eq!(atoms[ids[1]].angle_partners, vec![ids[0]]);
    }

    #[test]
    fn non_registering_kinds_leave_atoms_untouched() {
        let (mut atoms, ids) = arena_with(6);
        let pit = PiTorsion::new(ids[0], ids[1], ids[2], ids[3], ids[4], ids[5]);
        pit.register(&mut atoms);
        pit.unregister(&mut atoms);

        for &id in &ids {
            let atom = &atoms[id];
            assert!(atom.bond_partners.is_empty());
            assert!(atom.angle_partners.is_empty());
            assert!(atom.dihedral_partners.is_empty());
        }
    }

    #[test]
    fn slots_report_declared_arity() {
        let (_, ids) = arena_with(6);
        assert_eq!(Bond::new(ids[0], ids[1]).slots().len(), 2);
        assert_eq!(Angle::new(ids[0], ids[1], ids[2]).slots().len(), 3);
        assert_eq!(
            Cmap::new(ids[0], ids[1], ids[2], ids[3], ids[4]).slots().len(),
            5
        );
        assert_eq!(
            PiTorsion::new(ids[0], ids[1], ids[2], ids[3], ids[4], ids[5])
                .slots()
                .len(),
            6
        );
        assert_eq!(MultipoleFrame::new(ids[0]).slots().len(), 1);
    }
}
