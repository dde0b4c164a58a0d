//! Shared lookup utilities.

pub mod periodic;
