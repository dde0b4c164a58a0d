//! Provides input functionality for molecular file formats.
//!
//! This module contains the trait-based interface for structure file reading
//! and the PDB fixed-column format implementation, with transparent `.gz` /
//! `.bz2` decompression selected by file-name extension.

pub mod pdb;
pub mod traits;
