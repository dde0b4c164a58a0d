//! # Core Module
//!
//! Fundamental building blocks for molecular structure representation and I/O.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, residues, topology terms,
//!   parameter-type catalogs, and the tracked containers binding them together
//! - **File I/O** ([`io`]) - Reading molecular file formats, currently the PDB
//!   fixed-column format with transparent decompression
//! - **Utilities** ([`utils`]) - Periodic-table lookups shared by the parsers

pub mod io;
pub mod models;
pub mod utils;
