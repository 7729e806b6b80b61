//! CLI library components for the NeuroWorkbench export reader.

pub mod logging;
pub mod window;
