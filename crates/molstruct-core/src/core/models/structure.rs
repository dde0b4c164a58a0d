use super::atom::Atom;
use super::ids::{AtomId, ResidueId};
use super::params::{
    AcceptorDonor, AdjustType, AngleType, BondType, CmapType, DihedralType, Group, ImproperType,
    OutOfPlaneBendType, PiTorsionType, StretchBendType, TorsionTorsionType, TrigonalAngleType,
    UreyBradleyType,
};
use super::residue::Residue;
use super::terms::{
    Angle, Bond, ChiralFrame, Cmap, Dihedral, Improper, MultipoleFrame, NonbondedException,
    OutOfPlaneBend, PiTorsion, StretchBend, TermSlots, TorsionTorsion, TrigonalAngle, UreyBradley,
};
use super::tracked::TrackedList;
use slotmap::SlotMap;

/// How the pruning sweep decides whether a term should be removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PruneRule {
    /// Remove when every slot is unset, or when any set slot dangles.
    /// Partially-null terms whose set slots are all live are kept.
    EmptyOrDangling,
    /// Remove when any slot is unset or dangles (chiral and multipole
    /// frames, which have no distinct "fully empty" branch).
    AnyUnsetOrDangling,
}

/// One reverse-order sweep over a term list.
///
/// Reverse iteration keeps positional removal from skipping or re-visiting
/// entries. Only the dangling branch unregisters: a fully empty term never
/// registered anything.
fn prune_terms<T: TermSlots>(
    list: &mut TrackedList<T>,
    atoms: &mut SlotMap<AtomId, Atom>,
    rule: PruneRule,
) {
    for i in (0..list.len()).rev() {
        let slots = list[i].slots();
        let all_unset = slots.iter().all(Option::is_none);
        let any_unset = slots.iter().any(Option::is_none);
        let dangling = slots.iter().flatten().any(|id| !atoms.contains_key(*id));

        match rule {
            PruneRule::EmptyOrDangling => {
                if all_unset {
                    list.remove(i);
                } else if dangling {
                    let term = list.remove(i);
                    term.unregister(atoms);
                }
            }
            PruneRule::AnyUnsetOrDangling => {
                if any_unset || dangling {
                    list.remove(i);
                }
            }
        }
    }
}

/// A chemical structure composed of atoms, bonds, angles, torsions, and
/// other topological features.
///
/// The structure is the central registry of structural entities. Atoms and
/// residues live in generational arenas ([`SlotMap`]) with separate tracked
/// lists recording insertion order; removing an atom invalidates its key,
/// which is what makes a term "dangling" — no numeric sentinel involved.
/// Every collection is a [`TrackedList`], so [`is_changed`](Structure::is_changed)
/// can report whether anything mutated since the last
/// [`clear_changed`](Structure::clear_changed).
///
/// Not designed for shared concurrent access; callers needing concurrency
/// must serialize externally.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    atoms: SlotMap<AtomId, Atom>,
    atom_order: TrackedList<AtomId>,
    residues: SlotMap<ResidueId, Residue>,
    residue_order: TrackedList<ResidueId>,

    // Topology terms.
    pub bonds: TrackedList<Bond>,
    pub angles: TrackedList<Angle>,
    pub dihedrals: TrackedList<Dihedral>,
    pub urey_bradleys: TrackedList<UreyBradley>,
    pub impropers: TrackedList<Improper>,
    pub cmaps: TrackedList<Cmap>,
    pub trigonal_angles: TrackedList<TrigonalAngle>,
    pub out_of_plane_bends: TrackedList<OutOfPlaneBend>,
    pub pi_torsions: TrackedList<PiTorsion>,
    pub stretch_bends: TrackedList<StretchBend>,
    pub torsion_torsions: TrackedList<TorsionTorsion>,
    pub chiral_frames: TrackedList<ChiralFrame>,
    pub multipole_frames: TrackedList<MultipoleFrame>,
    pub adjusts: TrackedList<NonbondedException>,

    // PSF extras; tracked but never pruned.
    pub acceptors: TrackedList<AcceptorDonor>,
    pub donors: TrackedList<AcceptorDonor>,
    pub groups: TrackedList<Group>,

    // Parameter-type catalogs.
    pub bond_types: TrackedList<BondType>,
    pub angle_types: TrackedList<AngleType>,
    pub dihedral_types: TrackedList<DihedralType>,
    pub urey_bradley_types: TrackedList<UreyBradleyType>,
    pub improper_types: TrackedList<ImproperType>,
    pub cmap_types: TrackedList<CmapType>,
    pub trigonal_angle_types: TrackedList<TrigonalAngleType>,
    pub out_of_plane_bend_types: TrackedList<OutOfPlaneBendType>,
    pub pi_torsion_types: TrackedList<PiTorsionType>,
    pub stretch_bend_types: TrackedList<StretchBendType>,
    pub torsion_torsion_types: TrackedList<TorsionTorsionType>,
    pub adjust_types: TrackedList<AdjustType>,

    /// Unit cell dimensions (a, b, c, alpha, beta, gamma), if defined.
    pub box_dimensions: Option<[f64; 6]>,
}

impl Structure {
    /// Creates a new, empty structure.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Atom and residue access ---

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    pub fn atom_mut(&mut self, id: AtomId) -> Option<&mut Atom> {
        self.atoms.get_mut(id)
    }

    /// Iterates atoms in insertion order.
    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atom_order.iter().map(|&id| (id, &self.atoms[id]))
    }

    /// The atom at `index` in insertion order.
    pub fn atom_at(&self, index: usize) -> Option<(AtomId, &Atom)> {
        let id = *self.atom_order.get(index)?;
        Some((id, &self.atoms[id]))
    }

    /// The live position of `id` in the atom sequence, if it is still live.
    pub fn atom_index(&self, id: AtomId) -> Option<usize> {
        if !self.atoms.contains_key(id) {
            return None;
        }
        self.atom_order.iter().position(|&other| other == id)
    }

    pub fn atom_count(&self) -> usize {
        self.atom_order.len()
    }

    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    pub fn residue_mut(&mut self, id: ResidueId) -> Option<&mut Residue> {
        self.residues.get_mut(id)
    }

    /// Iterates residues in insertion order.
    pub fn residues_iter(&self) -> impl Iterator<Item = (ResidueId, &Residue)> {
        self.residue_order.iter().map(|&id| (id, &self.residues[id]))
    }

    pub fn residue_count(&self) -> usize {
        self.residue_order.len()
    }

    /// The most recently created residue, if any.
    pub fn last_residue(&self) -> Option<(ResidueId, &Residue)> {
        let id = *self.residue_order.last()?;
        Some((id, &self.residues[id]))
    }

    // --- Insertion ---

    /// Adds an atom, merging it into the current last residue when the
    /// (name, number, chain, insertion code) tuple matches, or opening a
    /// new residue otherwise. Sets the atom's residue back-reference.
    pub fn add_atom(
        &mut self,
        mut atom: Atom,
        resname: &str,
        resnum: isize,
        chain: &str,
        inscode: char,
    ) -> AtomId {
        let continuing = match self.last_residue() {
            Some((id, res)) if res.matches(resname, resnum, chain, inscode) => Some(id),
            _ => None,
        };
        let residue_id = match continuing {
            Some(id) => id,
            None => {
                let id = self
                    .residues
                    .insert(Residue::new(resname, resnum, chain, inscode));
                self.residue_order.push(id);
                id
            }
        };

        atom.residue = Some(residue_id);
        let atom_id = self.atoms.insert(atom);
        self.residues[residue_id].add_atom(atom_id);
        self.atom_order.push(atom_id);
        atom_id
    }

    /// Removes an atom from the structure.
    ///
    /// The atom leaves the arena immediately, so its key dangles in any
    /// term still referencing it; call
    /// [`prune_empty_terms`](Structure::prune_empty_terms) to sweep those.
    /// A residue emptied by the removal is dropped as well.
    pub fn remove_atom(&mut self, atom_id: AtomId) -> Option<Atom> {
        let atom = self.atoms.remove(atom_id)?;

        if let Some(residue_id) = atom.residue {
            if let Some(residue) = self.residues.get_mut(residue_id) {
                residue.remove_atom(atom_id);
                if residue.atoms().is_empty() {
                    self.residues.remove(residue_id);
                    if let Some(pos) = self.residue_order.iter().position(|&id| id == residue_id) {
                        self.residue_order.remove(pos);
                    }
                }
            }
        }

        if let Some(pos) = self.atom_order.iter().position(|&id| id == atom_id) {
            self.atom_order.remove(pos);
        }

        Some(atom)
    }

    pub fn add_bond(&mut self, atom1: AtomId, atom2: AtomId) {
        let bond = Bond::new(atom1, atom2);
        bond.register(&mut self.atoms);
        self.bonds.push(bond);
    }

    pub fn add_angle(&mut self, atom1: AtomId, atom2: AtomId, atom3: AtomId) {
        let angle = Angle::new(atom1, atom2, atom3);
        angle.register(&mut self.atoms);
        self.angles.push(angle);
    }

    pub fn add_dihedral(&mut self, atom1: AtomId, atom2: AtomId, atom3: AtomId, atom4: AtomId) {
        let dihedral = Dihedral::new(atom1, atom2, atom3, atom4);
        dihedral.register(&mut self.atoms);
        self.dihedrals.push(dihedral);
    }

    pub fn add_urey_bradley(&mut self, atom1: AtomId, atom2: AtomId) {
        let urey = UreyBradley::new(atom1, atom2);
        urey.register(&mut self.atoms);
        self.urey_bradleys.push(urey);
    }

    pub fn add_improper(&mut self, atom1: AtomId, atom2: AtomId, atom3: AtomId, atom4: AtomId) {
        let improper = Improper::new(atom1, atom2, atom3, atom4);
        improper.register(&mut self.atoms);
        self.impropers.push(improper);
    }

    pub fn add_cmap(
        &mut self,
        atom1: AtomId,
        atom2: AtomId,
        atom3: AtomId,
        atom4: AtomId,
        atom5: AtomId,
    ) {
        let cmap = Cmap::new(atom1, atom2, atom3, atom4, atom5);
        cmap.register(&mut self.atoms);
        self.cmaps.push(cmap);
    }

    pub fn add_trigonal_angle(
        &mut self,
        atom1: AtomId,
        atom2: AtomId,
        atom3: AtomId,
        atom4: AtomId,
    ) {
        self.trigonal_angles
            .push(TrigonalAngle::new(atom1, atom2, atom3, atom4));
    }

    pub fn add_out_of_plane_bend(
        &mut self,
        atom1: AtomId,
        atom2: AtomId,
        atom3: AtomId,
        atom4: AtomId,
    ) {
        self.out_of_plane_bends
            .push(OutOfPlaneBend::new(atom1, atom2, atom3, atom4));
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_pi_torsion(
        &mut self,
        atom1: AtomId,
        atom2: AtomId,
        atom3: AtomId,
        atom4: AtomId,
        atom5: AtomId,
        atom6: AtomId,
    ) {
        self.pi_torsions
            .push(PiTorsion::new(atom1, atom2, atom3, atom4, atom5, atom6));
    }

    pub fn add_stretch_bend(&mut self, atom1: AtomId, atom2: AtomId, atom3: AtomId) {
        self.stretch_bends
            .push(StretchBend::new(atom1, atom2, atom3));
    }

    pub fn add_torsion_torsion(
        &mut self,
        atom1: AtomId,
        atom2: AtomId,
        atom3: AtomId,
        atom4: AtomId,
        atom5: AtomId,
    ) {
        let tortor = TorsionTorsion::new(atom1, atom2, atom3, atom4, atom5);
        tortor.register(&mut self.atoms);
        self.torsion_torsions.push(tortor);
    }

    pub fn add_chiral_frame(&mut self, atom1: AtomId, atom2: AtomId) {
        self.chiral_frames.push(ChiralFrame::new(atom1, atom2));
    }

    pub fn add_multipole_frame(&mut self, atom: AtomId) {
        self.multipole_frames.push(MultipoleFrame::new(atom));
    }

    pub fn add_adjust(&mut self, atom1: AtomId, atom2: AtomId) {
        self.adjusts.push(NonbondedException::new(atom1, atom2));
    }

    // --- Mutation tracking ---

    /// Determines if any of the topology has changed for this structure.
    pub fn is_changed(&self) -> bool {
        self.atom_order.changed()
            || self.residue_order.changed()
            || self.bonds.changed()
            || self.angles.changed()
            || self.dihedrals.changed()
            || self.urey_bradleys.changed()
            || self.impropers.changed()
            || self.cmaps.changed()
            || self.trigonal_angles.changed()
            || self.out_of_plane_bends.changed()
            || self.pi_torsions.changed()
            || self.stretch_bends.changed()
            || self.torsion_torsions.changed()
            || self.chiral_frames.changed()
            || self.multipole_frames.changed()
            || self.adjusts.changed()
            || self.acceptors.changed()
            || self.donors.changed()
            || self.groups.changed()
            || self.bond_types.changed()
            || self.angle_types.changed()
            || self.dihedral_types.changed()
            || self.urey_bradley_types.changed()
            || self.improper_types.changed()
            || self.cmap_types.changed()
            || self.trigonal_angle_types.changed()
            || self.out_of_plane_bend_types.changed()
            || self.pi_torsion_types.changed()
            || self.stretch_bend_types.changed()
            || self.torsion_torsion_types.changed()
            || self.adjust_types.changed()
    }

    /// Clears every tracked collection's changed flag. Nothing else moves.
    pub fn clear_changed(&mut self) {
        self.atom_order.clear_changed();
        self.residue_order.clear_changed();
        self.bonds.clear_changed();
        self.angles.clear_changed();
        self.dihedrals.clear_changed();
        self.urey_bradleys.clear_changed();
        self.impropers.clear_changed();
        self.cmaps.clear_changed();
        self.trigonal_angles.clear_changed();
        self.out_of_plane_bends.clear_changed();
        self.pi_torsions.clear_changed();
        self.stretch_bends.clear_changed();
        self.torsion_torsions.clear_changed();
        self.chiral_frames.clear_changed();
        self.multipole_frames.clear_changed();
        self.adjusts.clear_changed();
        self.acceptors.clear_changed();
        self.donors.clear_changed();
        self.groups.clear_changed();
        self.bond_types.clear_changed();
        self.angle_types.clear_changed();
        self.dihedral_types.clear_changed();
        self.urey_bradley_types.clear_changed();
        self.improper_types.clear_changed();
        self.cmap_types.clear_changed();
        self.trigonal_angle_types.clear_changed();
        self.out_of_plane_bend_types.clear_changed();
        self.pi_torsion_types.clear_changed();
        self.stretch_bend_types.clear_changed();
        self.torsion_torsion_types.clear_changed();
        self.adjust_types.clear_changed();
    }

    // --- Pruning ---

    /// Removes terms that are fully empty or reference a removed atom.
    ///
    /// Each term list gets one reverse-order sweep. Cross-registering kinds
    /// are unregistered from their still-live atoms before removal. Order
    /// across kinds carries no dependency.
    pub fn prune_empty_terms(&mut self) {
        prune_terms(&mut self.bonds, &mut self.atoms, PruneRule::EmptyOrDangling);
        prune_terms(&mut self.angles, &mut self.atoms, PruneRule::EmptyOrDangling);
        prune_terms(
            &mut self.dihedrals,
            &mut self.atoms,
            PruneRule::EmptyOrDangling,
        );
        prune_terms(
            &mut self.urey_bradleys,
            &mut self.atoms,
            PruneRule::EmptyOrDangling,
        );
        prune_terms(
            &mut self.impropers,
            &mut self.atoms,
            PruneRule::EmptyOrDangling,
        );
        prune_terms(&mut self.cmaps, &mut self.atoms, PruneRule::EmptyOrDangling);
        prune_terms(
            &mut self.trigonal_angles,
            &mut self.atoms,
            PruneRule::EmptyOrDangling,
        );
        prune_terms(
            &mut self.out_of_plane_bends,
            &mut self.atoms,
            PruneRule::EmptyOrDangling,
        );
        prune_terms(
            &mut self.pi_torsions,
            &mut self.atoms,
            PruneRule::EmptyOrDangling,
        );
        prune_terms(
            &mut self.stretch_bends,
            &mut self.atoms,
            PruneRule::EmptyOrDangling,
        );
        prune_terms(
            &mut self.torsion_torsions,
            &mut self.atoms,
            PruneRule::EmptyOrDangling,
        );
        prune_terms(
            &mut self.chiral_frames,
            &mut self.atoms,
            PruneRule::AnyUnsetOrDangling,
        );
        prune_terms(
            &mut self.multipole_frames,
            &mut self.atoms,
            PruneRule::AnyUnsetOrDangling,
        );
        prune_terms(
            &mut self.adjusts,
            &mut self.atoms,
            PruneRule::EmptyOrDangling,
        );
    }
}
