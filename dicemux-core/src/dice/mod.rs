//! Per-die state shared between the interrupt and the main context

pub mod table;

pub use table::{Die, DieTable};
