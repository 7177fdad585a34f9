//! Finality Gate - checkpoint-based finality for a proof-of-work chain
//!
//! # Architecture
//!
//! The crate is organized into logical modules:
//!
//! ## Checkpoints
//! - [`checkpoints`] - The height -> hash store and the validation gate
//! - [`loader`] - Default, hash file and DNS checkpoint sources
//! - [`shared`] - Lock-guarded store for multi-threaded callers
//!
//! ## Network Parameters
//! - [`network`] - Mainnet / testnet / stagenet selector
//! - [`params`] - Default checkpoints, hard-fork schedule, DNS domains
//!
//! ## Primitives & Utilities
//! - [`hash`] - 32-byte block hash
//! - [`config`] - Configuration management
//! - [`error`] - Error types

#![forbid(unsafe_code)]

// ============================================================================
// Checkpoints
// ============================================================================
pub mod checkpoints;
pub mod loader;
pub mod shared;

// ============================================================================
// Network Parameters
// ============================================================================
pub mod network;
pub mod params;

// ============================================================================
// Primitives & Utilities
// ============================================================================
pub mod config;
pub mod error;
pub mod hash;

pub use checkpoints::{AddOutcome, BlockCheck, Checkpoint, CheckpointStore, ValidationGate};
pub use error::{CheckpointError, Result};
pub use hash::BlockHash;
pub use network::NetworkType;
