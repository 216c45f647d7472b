//! Execute handlers for the native bridge contracts.
//!
//! This module contains all state-changing handlers, organized by category:
//! - `relay` - createCrossChainTx and processCrossChainTx (cross-chain manager)
//! - `outgoing` - lock (lock proxy)
//! - `incoming` - unlock (lock proxy)
//! - `config` - bindProxy and bindAsset
//! - `withdraw` - withdrawcntm gas-token sweep

mod config;
mod incoming;
mod outgoing;
mod relay;
mod withdraw;

pub use config::*;
pub use incoming::*;
pub use outgoing::*;
pub use relay::*;
pub use withdraw::*;
