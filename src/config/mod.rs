//! Configuration loaded from `.smartcv-vault.toml`.

pub mod settings;

pub use settings::{Settings, MIN_PBKDF2_ITERATIONS};
