//! # Paystream Core
//!
//! Core domain types for the salary streaming engine:
//! - `Address` - checked participant identifiers
//! - `Stream` / `StreamStatus` - the central salary stream entity
//! - `accrual` - the pure linear-vesting calculator
//! - `WithdrawalRecord` - immutable payout log entries
//! - `StreamEvent` - audit events mirrored on every committed mutation
//! - `EncryptionGateway` - capability trait for the external FHE collaborator
//!
//! This crate is pure: no I/O, no locks, no clocks. All amounts are integer
//! base units (`u64`) and all timestamps are integer seconds (`u64`).

pub mod accrual;
pub mod address;
pub mod error;
pub mod event;
pub mod gateway;
pub mod stream;
pub mod withdrawal;

pub use address::Address;
pub use error::{EngineError, EngineResult};
pub use event::{StreamEvent, StreamEventKind};
pub use gateway::{CiphertextHandle, EncryptionGateway, PublicKey};
pub use stream::{Stream, StreamId, StreamStatus};
pub use withdrawal::{WithdrawalId, WithdrawalRecord};
