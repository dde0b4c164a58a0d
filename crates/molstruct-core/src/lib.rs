//! # MolStruct Core Library
//!
//! A library for representing chemical structures — atoms plus the topological
//! terms that connect them — and populating that representation from legacy
//! molecular file formats.
//!
//! ## Overview
//!
//! The library is built around two pieces:
//!
//! - **[`core::models`]: The Topology Container.** A [`Structure`](core::models::structure::Structure)
//!   holds atoms and residues in generational arenas, with tracked insertion-order
//!   sequences for every term and parameter kind. Mutation tracking and a pruning
//!   sweep keep the cross-referential object graph consistent as atoms come and go.
//!
//! - **[`core::io`]: The Format Reader.** A fixed-column PDB parser that reconstructs
//!   a consistent structure from an ambiguous, decades-old text format, including
//!   hexadecimal numbering overflow, alternate-location merging, multi-model
//!   coordinate frames, and bibliographic header metadata.

pub mod core;
