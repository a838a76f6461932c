//! Risk sizing — confidence to bounded risk allocation.
//!
//! Sizing is a pure function of (confidence, instrument, balance,
//! configuration). No position state, no account drift, no lot/pip
//! conversion — the output contract is `risk_percent` and `risk_amount`;
//! order construction belongs to the execution collaborator.

pub mod sizer;
pub mod tiers;

pub use sizer::{RejectionReason, RiskConfig, RiskSizer, SizingResult};
pub use tiers::{RiskTier, RiskTierError, RiskTierTable};
