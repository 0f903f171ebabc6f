//! maasinv - MAAS dynamic inventory for Ansible
//!
//! Fetches the machine list from a MAAS region controller, memoizes it in a
//! file for a configurable window and republishes it as an Ansible dynamic
//! inventory grouped by hostname prefix.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod inventory;
pub mod maas;
pub mod types;

pub use cache::MemoizingFetcher;
pub use error::{MaasInvError, Result};
pub use inventory::InventoryBuilder;
pub use types::*;
