use super::ids::AtomId;

/// Represents a named, numbered, chain-tagged group of atoms.
///
/// Residue identity for merge and continuation purposes is the tuple
/// (name, number, chain, insertion code): the parser keeps appending atoms
/// to the current residue until one of those four fields changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    /// Residue name (e.g., "ALA", "HOH").
    pub name: String,
    /// Residue sequence number from the source file.
    pub number: isize,
    /// Chain identifier, whitespace-stripped.
    pub chain: String,
    /// Insertion code; `' '` when absent.
    pub insertion_code: char,
    /// Whether a TER record closed this residue's chain segment.
    pub ter: bool,
    atoms: Vec<AtomId>,
}

impl Residue {
    pub(crate) fn new(name: &str, number: isize, chain: &str, insertion_code: char) -> Self {
        Self {
            name: name.to_string(),
            number,
            chain: chain.trim().to_string(),
            insertion_code,
            ter: false,
            atoms: Vec::new(),
        }
    }

    pub(crate) fn add_atom(&mut self, atom_id: AtomId) {
        self.atoms.push(atom_id);
    }

    pub(crate) fn remove_atom(&mut self, atom_id: AtomId) {
        self.atoms.retain(|&id| id != atom_id);
    }

    /// The member atoms in insertion order.
    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    /// Whether `name`, `number`, `chain`, and `insertion_code` all match.
    ///
    /// The chain comparison strips surrounding whitespace, mirroring the
    /// single-column chain field of fixed-layout formats.
    pub fn matches(&self, name: &str, number: isize, chain: &str, insertion_code: char) -> bool {
        self.name == name
            && self.number == number
            && self.chain == chain.trim()
            && self.insertion_code == insertion_code
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
    fn new_residue_initializes_fields_correctly() {
        let residue = Residue::new("GLY", 10, "A", ' ');
        assert_eq!(residue.name, "GLY");
        assert_eq!(residue.number, 10);
        assert_eq!(residue.chain, "A");
        assert_eq!(residue.insertion_code, ' ');
        assert!(!residue.ter);
        assert!(residue.atoms().is_empty());
    }

    #[test]
    fn new_residue_strips_chain_whitespace() {
        let residue = Residue::new("ALA", 1, " B ", ' ');
        assert_eq!(residue.chain, "B");
    }

    #[test]
    fn add_and_remove_atom_maintain_membership() {
        let mut residue = Residue::new("SER", 5, "A", ' ');
        let a1 = dummy_atom_id(1);
        let a2 = dummy_atom_id(2);
        residue.add_atom(a1);
        residue.add_atom(a2);
        assert_eq!(residue.atoms(), &[a1, a2]);

        residue.remove_atom(a1);
        assert_eq!(residue.atoms(), &[a2]);
    }

    #[test]
    fn matches_compares_full_identity_tuple() {
        let residue = Residue::new("LYS", 42, "A", 'B');
        assert!(residue.matches("LYS", 42, "A", 'B'));
        assert!(residue.matches("LYS", 42, " A ", 'B'));
        assert!(!residue.matches("LYS", 42, "A", ' '));
        assert!(!residue.matches("LYS", 43, "A", 'B'));
        assert!(!residue.matches("ARG", 42, "A", 'B'));
        assert!(!residue.matches("LYS", 42, "C", 'B'));
    }
}
