//! Application layer: selection logic, per-resource store, and the grid binding.

pub mod datagrid;
pub mod replay;
pub mod selection;
pub mod store;
