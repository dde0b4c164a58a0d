//! # Core Models Module
//!
//! Data structures representing a chemical structure and its topology.
//!
//! ## Key Components
//!
//! - [`atom`] - Individual atom representation with coordinates, element data,
//!   alternate locations, and per-kind partner registries
//! - [`residue`] - Residue grouping with the identity tuple used for continuation
//! - [`terms`] - Fixed-arity topology terms (bonds, angles, dihedrals, ...) and
//!   the slot/registration contract they share
//! - [`params`] - Parameter-type catalogs and PSF-style extras
//! - [`structure`] - The central container tying all of the above together
//! - [`tracked`] - Ordered sequence with a mutation dirty-flag
//! - [`ids`] - Generational arena key types for atoms and residues

pub mod atom;
pub mod ids;
pub mod params;
pub mod residue;
pub mod structure;
pub mod terms;
pub mod tracked;
