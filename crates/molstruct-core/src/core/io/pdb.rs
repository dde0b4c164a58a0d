use crate::core::io::traits::StructureFile;
use crate::core::models::atom::Atom;
use crate::core::models::ids::AtomId;
use crate::core::models::structure::Structure;
use crate::core::utils::periodic::resolve_element;
use nalgebra::Point3;
use regex::Regex;
use std::io::{self, BufRead};
use thiserror::Error;

const RELATED_PATTERN: &str = r"(?i)RELATED ID: *(\w+) *RELATED DB: *(\w+)";

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: PdbParseErrorKind,
    },
    #[error("Inconsistent atom counts across models")]
    InconsistentAtomCount,
    #[error("Model ended before any atoms were read")]
    ModelBeforeAtoms,
    #[error("Atom {index} differs in model {model} [{expected} vs. {found}]")]
    AtomMismatch {
        index: usize,
        model: usize,
        expected: String,
        found: String,
    },
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid coordinate in columns {columns} (value: '{value}')")]
    InvalidCoordinate { columns: String, value: String },
    #[error("Invalid residue number (value: '{value}')")]
    InvalidResidueNumber { value: String },
    #[error("Invalid atom serial (value: '{value}')")]
    InvalidAtomSerial { value: String },
    #[error("Invalid cell parameter in columns {columns} (value: '{value}')")]
    InvalidCellParameter { columns: String, value: String },
}

/// Bibliographic and experimental metadata collected from PDB header
/// records, plus the per-model coordinate archive.
///
/// Free-text fields accumulate across continuation lines and come back
/// trimmed; `keywords` is split into non-empty tokens after the whole file
/// has been consumed. `pdbxyz` holds one flat `[x, y, z, x, y, z, ...]`
/// list per model, each of length three times the atom count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdbMetadata {
    pub experimental: String,
    pub journal: String,
    pub authors: String,
    pub keywords: Vec<String>,
    pub doi: String,
    pub pmid: String,
    pub journal_authors: String,
    pub volume: String,
    pub page: String,
    pub title: String,
    pub year: Option<i32>,
    pub related_entries: Vec<(String, String)>,
    pub pdbxyz: Vec<Vec<f64>>,
}

/// Identity of the most recently parsed atom site, used to detect
/// alternate-location records and to drive residue continuation. The atom
/// id is only kept for model 1; later models never insert atoms, so an
/// alternate there has nothing to attach to and is simply skipped.
#[derive(Debug, Clone)]
struct LastSite {
    atom: Option<AtomId>,
    name: String,
    resname: String,
    resid: isize,
    chain: String,
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

fn char_at(line: &str, index: usize) -> char {
    line.get(index..index + 1)
        .and_then(|s| s.chars().next())
        .unwrap_or(' ')
}

fn parse_coord(line: &str, line_num: usize, start: usize, end: usize) -> Result<f64, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidCoordinate {
            columns: format!("{}-{}", start + 1, end),
            value: value.into(),
        },
    })
}

fn parse_cell(line: &str, line_num: usize, start: usize, end: usize) -> Result<f64, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidCellParameter {
            columns: format!("{}-{}", start + 1, end),
            value: value.into(),
        },
    })
}

/// Incremental PDB parser.
///
/// Feed lines through [`process_line`](PdbReader::process_line) and collect
/// the result with [`finish`](PdbReader::finish). All sticky parsing state
/// lives in named fields rather than ambient variables: the current model
/// number, the per-model running atom position, the open coordinate buffer,
/// the previous atom site, and the two hex-numbering mode latches. Hex mode
/// is entered lazily the first time a numbering field overflows its decimal
/// capacity and then applies for the rest of the file.
pub struct PdbReader {
    structure: Structure,
    metadata: PdbMetadata,
    keywords_raw: String,
    model_number: usize,
    position_in_model: usize,
    coordinates: Vec<f64>,
    frames: Vec<Vec<f64>>,
    previous_site: Option<LastSite>,
    previous_residue_number: isize,
    residue_hex_mode: bool,
    atom_hex_mode: bool,
    related_re: Regex,
}

impl Default for PdbReader {
    fn default() -> Self {
        Self::new()
    }
}

impl PdbReader {
    pub fn new() -> Self {
        Self {
            structure: Structure::new(),
            metadata: PdbMetadata::default(),
            keywords_raw: String::new(),
            model_number: 1,
            position_in_model: 0,
            coordinates: Vec::new(),
            frames: Vec::new(),
            previous_site: None,
            previous_residue_number: 1,
            residue_hex_mode: false,
            atom_hex_mode: false,
            related_re: Regex::new(RELATED_PATTERN).unwrap(),
        }
    }

    /// Consumes one line of PDB text.
    ///
    /// The first six characters select the record handler; unrecognized
    /// record types are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error on unparseable mandatory fields, on a model ending
    /// before any atom was read, on coordinate buffers whose length does
    /// not match the atom count, and on later models whose atoms disagree
    /// with model 1.
    pub fn process_line(&mut self, line: &str, line_num: usize) -> Result<(), PdbError> {
        let rec = line.get(0..6).unwrap_or(line);
        match rec {
            "ATOM  " | "HETATM" => self.handle_atom(line, line_num),
            "ENDMDL" => self.handle_endmdl(),
            "MODEL " => self.handle_model(),
            "CRYST1" => self.handle_cryst1(line, line_num),
            "EXPDTA" => {
                self.metadata.experimental = slice_and_trim(line, 6, line.len()).to_string();
                Ok(())
            }
            "AUTHOR" => {
                self.metadata.authors += slice_and_trim(line, 10, line.len());
                Ok(())
            }
            "JRNL  " => {
                self.handle_journal(line);
                Ok(())
            }
            "KEYWDS" => {
                self.keywords_raw += line.get(10..).unwrap_or("");
                self.keywords_raw.push(',');
                Ok(())
            }
            "REMARK" => {
                if line.get(6..10) == Some(" 900") {
                    if let Some(caps) = self.related_re.captures(line.get(11..).unwrap_or("")) {
                        self.metadata
                            .related_entries
                            .push((caps[1].to_string(), caps[2].to_string()));
                    }
                }
                Ok(())
            }
            other if other.trim() == "TER" => {
                if self.model_number == 1 {
                    if let Some((id, _)) = self.structure.last_residue() {
                        if let Some(residue) = self.structure.residue_mut(id) {
                            residue.ter = true;
                        }
                    }
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn handle_atom(&mut self, line: &str, line_num: usize) -> Result<(), PdbError> {
        self.position_in_model += 1;

        let serial_str = slice_and_trim(line, 6, 11);
        let atname = slice_and_trim(line, 12, 16).to_string();
        let altloc = char_at(line, 16);
        let resname = slice_and_trim(line, 17, 20).to_string();
        let chain = char_at(line, 21).to_string();
        let resid_str = slice_and_trim(line, 22, 26);
        let inscode = char_at(line, 26);

        let x = parse_coord(line, line_num, 30, 38)?;
        let y = parse_coord(line, line_num, 38, 46)?;
        let z = parse_coord(line, line_num, 47, 54)?;

        let occupancy: f64 = slice_and_trim(line, 54, 60).parse().unwrap_or(0.0);
        let bfactor: f64 = slice_and_trim(line, 60, 66).parse().unwrap_or(0.0);
        let charge: f64 = slice_and_trim(line, 78, 80).parse().unwrap_or(0.0);
        let (atomic_number, mass) = resolve_element(line.get(76..78).unwrap_or(""), &atname);

        // Some writers (VMD among them) roll numbering fields over into
        // hexadecimal once decimal capacity runs out.
        let resid = if self.previous_residue_number >= 9999 {
            if !self.residue_hex_mode && resid_str != "9999" {
                self.residue_hex_mode =
                    isize::from_str_radix(resid_str, 16).is_ok_and(|v| v == 10000);
            }
            if self.residue_hex_mode {
                if resid_str == "****" {
                    // Overflowed past hex too; resolved against the last
                    // residue below.
                    None
                } else {
                    Some(isize::from_str_radix(resid_str, 16).map_err(|_| PdbError::Parse {
                        line: line_num,
                        kind: PdbParseErrorKind::InvalidResidueNumber {
                            value: resid_str.into(),
                        },
                    })?)
                }
            } else {
                Some(self.parse_decimal_resid(resid_str, line_num)?)
            }
        } else {
            Some(self.parse_decimal_resid(resid_str, line_num)?)
        };

        if self.atom_hex_mode {
            usize::from_str_radix(serial_str, 16).map_err(|_| PdbError::Parse {
                line: line_num,
                kind: PdbParseErrorKind::InvalidAtomSerial {
                    value: serial_str.into(),
                },
            })?;
        } else if serial_str.parse::<usize>().is_err() {
            usize::from_str_radix(serial_str, 16).map_err(|_| PdbError::Parse {
                line: line_num,
                kind: PdbParseErrorKind::InvalidAtomSerial {
                    value: serial_str.into(),
                },
            })?;
            self.atom_hex_mode = true;
        }

        // A '****' residue field starts a new residue only when the atom
        // name repeats within the most recent residue; otherwise the atom
        // still belongs to it.
        let resid = match resid {
            Some(r) => r,
            None => {
                let repeats_name = self.structure.last_residue().is_some_and(|(_, residue)| {
                    residue.atoms().iter().any(|&id| {
                        self.structure.atom(id).is_some_and(|a| a.name == atname)
                    })
                });
                if repeats_name {
                    self.previous_residue_number + 1
                } else {
                    self.previous_residue_number
                }
            }
        };
        self.previous_residue_number = resid;

        let mut atom = Atom::new(&atname, Point3::new(x, y, z));
        atom.atomic_number = atomic_number;
        atom.mass = mass;
        atom.charge = charge;
        atom.occupancy = occupancy;
        atom.bfactor = bfactor;
        atom.altloc = altloc;

        // Same site as the previous atom means this record is an alternate
        // conformation, not a new atom.
        if let Some(site) = &self.previous_site {
            if site.name == atname
                && site.resname == resname
                && site.resid == resid
                && site.chain == chain.trim()
            {
                if let Some(prev_id) = site.atom {
                    if let Some(prev) = self.structure.atom(prev_id) {
                        atom.residue = prev.residue;
                    }
                    if let Some(prev) = self.structure.atom_mut(prev_id) {
                        prev.other_locations.insert(altloc, atom);
                    }
                }
                return Ok(());
            }
        }

        let inserted = if self.model_number == 1 {
            Some(
                self.structure
                    .add_atom(atom, &resname, resid, &chain, inscode),
            )
        } else {
            let expected = self
                .structure
                .atom_at(self.position_in_model - 1)
                .map(|(_, existing)| {
                    let existing_resname = existing
                        .residue
                        .and_then(|rid| self.structure.residue(rid))
                        .map(|r| r.name.clone())
                        .unwrap_or_default();
                    (existing_resname, existing.name.clone())
                });
            match expected {
                Some((existing_resname, existing_name))
                    if existing_resname == resname && existing_name == atname => {}
                other => {
                    return Err(PdbError::AtomMismatch {
                        index: self.position_in_model,
                        model: self.model_number,
                        expected: other
                            .map(|(r, n)| format!("{r} {n}"))
                            .unwrap_or_else(|| "<none>".to_string()),
                        found: format!("{resname} {atname}"),
                    });
                }
            }
            None
        };

        self.previous_site = Some(LastSite {
            atom: inserted,
            name: atname,
            resname,
            resid,
            chain: chain.trim().to_string(),
        });
        self.coordinates.extend([x, y, z]);
        Ok(())
    }

    fn parse_decimal_resid(&self, value: &str, line_num: usize) -> Result<isize, PdbError> {
        value.parse().map_err(|_| PdbError::Parse {
            line: line_num,
            kind: PdbParseErrorKind::InvalidResidueNumber {
                value: value.into(),
            },
        })
    }

    fn handle_model(&mut self) -> Result<(), PdbError> {
        // A leading MODEL record in a single-model file would otherwise
        // open a spurious empty frame.
        if self.model_number == 1 && self.structure.atom_count() == 0 {
            return Ok(());
        }
        if !self.coordinates.is_empty() {
            if self.structure.atom_count() * 3 != self.coordinates.len() {
                return Err(PdbError::InconsistentAtomCount);
            }
            tracing::warn!(model = self.model_number, "MODEL not explicitly ended");
            self.frames.push(std::mem::take(&mut self.coordinates));
        }
        self.model_number += 1;
        self.position_in_model = 0;
        Ok(())
    }

    fn handle_endmdl(&mut self) -> Result<(), PdbError> {
        if self.structure.atom_count() == 0 {
            return Err(PdbError::ModelBeforeAtoms);
        }
        if self.structure.atom_count() * 3 != self.coordinates.len() {
            return Err(PdbError::InconsistentAtomCount);
        }
        self.model_number += 1;
        self.frames.push(std::mem::take(&mut self.coordinates));
        self.position_in_model = 0;
        Ok(())
    }

    fn handle_cryst1(&mut self, line: &str, line_num: usize) -> Result<(), PdbError> {
        let a = parse_cell(line, line_num, 6, 15)?;
        let b = parse_cell(line, line_num, 15, 24)?;
        let c = parse_cell(line, line_num, 24, 33)?;
        let alpha: f64 = slice_and_trim(line, 33, 40).parse().unwrap_or(90.0);
        let beta: f64 = slice_and_trim(line, 40, 47).parse().unwrap_or(90.0);
        let gamma: f64 = slice_and_trim(line, 47, 54).parse().unwrap_or(90.0);
        self.structure.box_dimensions = Some([a, b, c, alpha, beta, gamma]);
        Ok(())
    }

    fn handle_journal(&mut self, line: &str) {
        let remainder = |start: usize| slice_and_trim(line, start, line.len());
        match line.get(12..16).unwrap_or("") {
            "AUTH" => self.metadata.journal_authors += remainder(19),
            "TITL" => {
                self.metadata.title.push(' ');
                self.metadata.title += remainder(19);
            }
            "REF " => {
                self.metadata.journal.push(' ');
                self.metadata.journal += slice_and_trim(line, 19, 47);
                // Volume, page, and year appear only on the first REF line,
                // whose continuation-number field is blank.
                if slice_and_trim(line, 16, 18).is_empty() {
                    self.metadata.volume = slice_and_trim(line, 51, 55).to_string();
                    self.metadata.page = slice_and_trim(line, 56, 61).to_string();
                    if let Ok(year) = slice_and_trim(line, 62, 66).parse() {
                        self.metadata.year = Some(year);
                    }
                }
            }
            "PMID" => self.metadata.pmid = remainder(19).to_string(),
            "DOI " => self.metadata.doi = remainder(19).to_string(),
            _ => {}
        }
    }

    /// Finalizes the parse after the stream ends.
    ///
    /// Splits keywords into tokens, trims the accumulated journal and title
    /// strings, flushes any still-open coordinate buffer as the last frame,
    /// and clears every changed flag so the fresh structure starts
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the final coordinate buffer length disagrees
    /// with the atom count.
    pub fn finish(mut self) -> Result<(Structure, PdbMetadata), PdbError> {
        self.metadata.keywords = self
            .keywords_raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        self.metadata.journal = self.metadata.journal.trim().to_string();
        self.metadata.title = self.metadata.title.trim().to_string();

        if !self.coordinates.is_empty() {
            if self.coordinates.len() != self.structure.atom_count() * 3 {
                return Err(PdbError::InconsistentAtomCount);
            }
            self.frames.push(std::mem::take(&mut self.coordinates));
        }
        self.metadata.pdbxyz = self.frames;

        self.structure.clear_changed();
        Ok((self.structure, self.metadata))
    }
}

/// The PDB file format.
///
/// Only the reading side is implemented. PDB carries no bond records on
/// this path, so the parsed structure contains atoms, residues, box
/// geometry, and metadata, but no topology terms.
pub struct PdbFile;

impl StructureFile for PdbFile {
    type Metadata = PdbMetadata;
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<(Structure, Self::Metadata), Self::Error> {
        let mut parser = PdbReader::new();
        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            parser.process_line(&line, line_num + 1)?;
        }
        parser.finish()
    }
}
