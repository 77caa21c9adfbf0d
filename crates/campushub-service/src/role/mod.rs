//! Admin role gate.

pub mod gate;

pub use gate::AdminGate;
