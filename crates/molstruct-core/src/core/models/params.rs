use super::ids::AtomId;
use serde::Serialize;

// Parameter-type catalogs. These are data-only records: a structure keeps
// one tracked list per kind so parameter assignment survives mutation
// tracking, but no energy evaluation happens here.

/// Harmonic bond parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BondType {
    pub k: f64,
    pub req: f64,
}

/// Harmonic angle parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AngleType {
    pub k: f64,
    pub theteq: f64,
}

/// One Fourier term of a torsion profile.
///
/// Multi-term profiles store several `DihedralType` entries; the dihedral
/// terms referencing them repeat the same four atoms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DihedralType {
    pub phi_k: f64,
    pub per: i32,
    pub phase: f64,
    pub scee: f64,
    pub scnb: f64,
}

/// Urey-Bradley 1-3 parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UreyBradleyType {
    pub k: f64,
    pub req: f64,
}

/// CHARMM improper torsion parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImproperType {
    pub psi_k: f64,
    pub psi_eq: f64,
}

/// A CMAP correction grid of `resolution` x `resolution` energies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CmapType {
    pub resolution: usize,
    pub grid: Vec<f64>,
}

/// AMOEBA trigonal angle parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrigonalAngleType {
    pub k: f64,
    pub theteq: f64,
}

/// AMOEBA out-of-plane bend parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutOfPlaneBendType {
    pub k: f64,
}

/// AMOEBA pi-torsion parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PiTorsionType {
    pub phi_k: f64,
}

/// AMOEBA stretch-bend compound parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StretchBendType {
    pub k: f64,
    pub req1: f64,
    pub req2: f64,
    pub theteq: f64,
}

/// A coupled torsion-torsion interpolation grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TorsionTorsionType {
    pub dims: (usize, usize),
    pub angles: Vec<f64>,
    pub energies: Vec<f64>,
}

/// Per-pair scaling applied to a nonbonded exception.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AdjustType {
    pub vdw: f64,
    pub elec: f64,
}

// Extra records carried over from CHARMM PSF files. They are tracked like
// the term lists but never pruned.

/// A hydrogen-bond acceptor or donor pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptorDonor {
    pub atom1: AtomId,
    pub atom2: AtomId,
}

impl AcceptorDonor {
    pub fn new(atom1: AtomId, atom2: AtomId) -> Self {
        Self { atom1, atom2 }
    }
}

/// A CHARMM GROUP record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Group {
    pub bs: i32,
    pub kind: i32,
    pub move_: i32,
}

impl Group {
    pub fn new(bs: i32, kind: i32, move_: i32) -> Self {
        Self { bs, kind, move_ }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn dummy_atom_id(n: u64) -> AtomId {
        AtomId::from(KeyData::from_ffi(n))
    }

    #[test]
    fn acceptor_donor_holds_its_pair() {
        let ad = AcceptorDonor::new(dummy_atom_id(1), dummy_atom_id(2));
        assert_eq!(ad.atom1, dummy_atom_id(1));
        assert_eq!(ad.atom2, dummy_atom_id(2));
    }

    #[test]
    fn cmap_type_grid_length_is_caller_defined() {
        let ct = CmapType {
            resolution: 2,
            grid: vec![0.0; 4],
        };
        assert_eq!(ct.grid.len(), ct.resolution * ct.resolution);
    }
}
