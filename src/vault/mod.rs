//! Vault module — custody of the encrypted API key.
//!
//! This module provides:
//! - The `Clock` seam used for session expiry (`clock`)
//! - The in-memory `VaultSession` (`session`)
//! - `PersistentStore` and its file/memory backends (`store`)
//! - The `Vault` state machine (`lifecycle`)

pub mod clock;
pub mod lifecycle;
pub mod session;
pub mod store;

// Re-export the most commonly used items.
pub use clock::{Clock, ManualClock, SystemClock};
pub use lifecycle::{
    Vault, VaultState, VaultStatus, MSG_CLEAR_FAILED, MSG_INCORRECT_PASSWORD, MSG_NO_VAULT,
    MSG_SAVE_FAILED,
};
pub use session::VaultSession;
pub use store::{FileStore, MemoryStore, PersistentStore};
