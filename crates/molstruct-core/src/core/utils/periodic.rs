use phf::{Map, phf_map};

/// Atomic number and standard atomic weight, keyed by element symbol in
/// canonical capitalization ("Na", not "NA"). "EP" is the massless extra
/// point used by some polarizable force fields.
static ELEMENTS: Map<&'static str, (usize, f64)> = phf_map! {
    "EP" => (0, 0.0),
    "H" => (1, 1.00794), "He" => (2, 4.002602), "Li" => (3, 6.941),
    "Be" => (4, 9.012182), "B" => (5, 10.811), "C" => (6, 12.0107),
    "N" => (7, 14.0067), "O" => (8, 15.9994), "F" => (9, 18.9984032),
    "Ne" => (10, 20.1797), "Na" => (11, 22.98977), "Mg" => (12, 24.305),
    "Al" => (13, 26.981538), "Si" => (14, 28.0855), "P" => (15, 30.973761),
    "S" => (16, 32.065), "Cl" => (17, 35.453), "Ar" => (18, 39.948),
    "K" => (19, 39.0983), "Ca" => (20, 40.078), "Sc" => (21, 44.95591),
    "Ti" => (22, 47.867), "V" => (23, 50.9415), "Cr" => (24, 51.9961),
    "Mn" => (25, 54.938049), "Fe" => (26, 55.845), "Co" => (27, 58.9332),
    "Ni" => (28, 58.6934), "Cu" => (29, 63.546), "Zn" => (30, 65.39),
    "Ga" => (31, 69.723), "Ge" => (32, 72.64), "As" => (33, 74.9216),
    "Se" => (34, 78.96), "Br" => (35, 79.904), "Kr" => (36, 83.8),
    "Rb" => (37, 85.4678), "Sr" => (38, 87.62), "Y" => (39, 88.90585),
    "Zr" => (40, 91.224), "Nb" => (41, 92.90638), "Mo" => (42, 95.94),
    "Tc" => (43, 98.0), "Ru" => (44, 101.07), "Rh" => (45, 102.9055),
    "Pd" => (46, 106.42), "Ag" => (47, 107.8682), "Cd" => (48, 112.411),
    "In" => (49, 114.818), "Sn" => (50, 118.71), "Sb" => (51, 121.76),
    "Te" => (52, 127.6), "I" => (53, 126.90447), "Xe" => (54, 131.293),
    "Cs" => (55, 132.90545), "Ba" => (56, 137.327), "La" => (57, 138.9055),
    "Ce" => (58, 140.116), "Pr" => (59, 140.90765), "Nd" => (60, 144.24),
    "Pm" => (61, 145.0), "Sm" => (62, 150.36), "Eu" => (63, 151.964),
    "Gd" => (64, 157.25), "Tb" => (65, 158.92534), "Dy" => (66, 162.5),
    "Ho" => (67, 164.93032), "Er" => (68, 167.259), "Tm" => (69, 168.93421),
    "Yb" => (70, 173.04), "Lu" => (71, 174.967), "Hf" => (72, 178.49),
    "Ta" => (73, 180.9479), "W" => (74, 183.84), "Re" => (75, 186.207),
    "Os" => (76, 190.23), "Ir" => (77, 192.217), "Pt" => (78, 195.078),
    "Au" => (79, 196.96655), "Hg" => (80, 200.59), "Tl" => (81, 204.3833),
    "Pb" => (82, 207.2), "Bi" => (83, 208.98038), "Po" => (84, 209.0),
    "At" => (85, 210.0), "Rn" => (86, 222.0), "Fr" => (87, 223.0),
    "Ra" => (88, 226.0), "Ac" => (89, 227.0), "Th" => (90, 232.0381),
    "Pa" => (91, 231.03588), "U" => (92, 238.02891), "Np" => (93, 237.0),
    "Pu" => (94, 244.0), "Am" => (95, 243.0), "Cm" => (96, 247.0),
    "Bk" => (97, 247.0), "Cf" => (98, 251.0), "Es" => (99, 252.0),
    "Fm" => (100, 257.0), "Md" => (101, 258.0), "No" => (102, 259.0),
    "Lr" => (103, 262.0), "Rf" => (104, 261.0), "Db" => (105, 262.0),
    "Sg" => (106, 266.0), "Bh" => (107, 264.0), "Hs" => (108, 277.0),
    "Mt" => (109, 268.0),
};

/// Looks up `(atomic number, mass)` for an exact canonical symbol.
pub fn element_info(symbol: &str) -> Option<(usize, f64)> {
    ELEMENTS.get(symbol.trim()).copied()
}

/// Resolves an element from PDB record fields.
///
/// Tries, in order: the element-symbol columns normalized to canonical
/// capitalization; the first character of the atom name as a one-letter
/// symbol; the first two characters of the atom name reshaped to canonical
/// capitalization. Calcium in a "CA" atom name is deliberately never found
/// this way; distinguishing it from an alpha carbon needs context a single
/// record does not carry.
///
/// # Return
///
/// The `(atomic number, mass)` pair, or `(0, 0.0)` when every strategy
/// misses.
pub fn resolve_element(element_field: &str, atom_name: &str) -> (usize, f64) {
    let field = element_field.trim();
    let canonical: String = field
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if i == 0 {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect();
    if let Some(info) = element_info(&canonical) {
        return info;
    }

    let name = atom_name.trim();
    if let Some(first) = name.chars().next() {
        if let Some(info) = element_info(&first.to_ascii_uppercase().to_string()) {
            return info;
        }
    }

    let mut chars = name.chars();
    if let (Some(first), Some(second)) = (chars.next(), chars.next()) {
        let two = format!(
            "{}{}",
            first.to_ascii_uppercase(),
            second.to_ascii_lowercase()
        );
        if let Some(info) = element_info(&two) {
            return info;
        }
    }

    (0, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_info_requires_canonical_capitalization() {
        assert_eq!(element_info("Na"), Some((11, 22.98977)));
        assert_eq!(element_info(" C "), Some((6, 12.0107)));
        assert_eq!(element_info("NA"), None);
    }

    #[test]
    fn resolve_element_prefers_the_element_columns() {
        assert_eq!(resolve_element("FE", "CA").0, 26);
        assert_eq!(resolve_element(" N", "ND1").0, 7);
    }

    #[test]
    fn resolve_element_falls_back_to_atom_name_first_char() {
        // "CA" resolves as carbon, never calcium.
        assert_eq!(resolve_element("", "CA").0, 6);
        assert_eq!(resolve_element("  ", "OXT").0, 8);
    }

    #[test]
    fn resolve_element_tries_two_letter_name_prefix_last() {
        // No one-letter "M" element, so "MG" reshapes to "Mg".
        assert_eq!(resolve_element("", "MG").0, 12);
    }

    #[test]
    fn resolve_element_gives_up_gracefully() {
        assert_eq!(resolve_element("", "XX99"), (0, 0.0));
        assert_eq!(resolve_element("??", ""), (0, 0.0));
    }
}
