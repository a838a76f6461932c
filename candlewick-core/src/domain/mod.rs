//! Domain types for the Candlewick engine.

pub mod bar;
pub mod ids;

pub use bar::Bar;
pub use ids::SignalId;

/// Symbol type alias
pub type Symbol = String;
