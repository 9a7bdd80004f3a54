//! Tracking of the latest attestation seen from each validator.
//!
//! Inbound attestations are staged by a single ingestion task and merged into
//! a per-validator table in adaptively sized batches. The table is the vote
//! input of fork choice: [`Manager::latest_attestation_target`] resolves the
//! block a validator last voted for into an [`AttestationTarget`].
//!
//! The subsystem owns no external resources. Blocks, the head state and
//! committee assignments are reached through capability traits
//! ([`BlockStore`], [`ChainStateProvider`], [`CommitteeOracle`]),
//! acquired per call.
//!
//! [`AttestationTarget`]: types::nonstandard::AttestationTarget

pub use crate::{
    error::Error,
    manager::Manager,
    messages::{AttestationSender, ControlMessage},
    pool::Pool,
    service::{Service, DEFAULT_BUFFER_SIZE},
    traits::{BlockStore, ChainStateProvider, CommitteeOracle, Controller},
};

mod error;
mod manager;
mod messages;
mod pool;
mod service;
mod traits;

#[cfg(test)]
mod test_utils;
