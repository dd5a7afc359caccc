//! Export core modules shared across CLI and WASM wrappers.

pub mod csv;
