//! Command-line interface for Pathwise concept graphs.
//!
//! This crate provides the `pathwise` binary and the pieces it is built
//! from, so host applications can embed the same commands with their own
//! [`ConfigProvider`](pathwise_core::ConfigProvider).
//!
//! # Key Abstractions
//!
//! - [`PathwiseCli<C>`]: CLI application parameterized over config provider
//! - [`PathwiseConfig`]: confyg-backed configuration with XDG defaults
//! - [`graph_handlers`]: query and dataset commands over a loaded graph

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod graph_handlers;

pub use app::PathwiseCli;
pub use cli::{CliArgs, Command, ConfigAction, ConfigCommand};
pub use config::{DEFAULT_MAX_DISTANCE, PathwiseConfig};

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::{Mutex, MutexGuard};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Serializes tests that set or depend on `PATHWISE_*` variables.
    pub(crate) fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// RAII guard for env var manipulation in tests. Holds the env lock
    /// until dropped.
    pub(crate) struct EnvGuard {
        key: String,
        prev: Option<String>,
        _lock: MutexGuard<'static, ()>,
    }

    impl EnvGuard {
        pub(crate) fn new(key: &str, value: &str) -> Self {
            let lock = env_lock();
            let prev = std::env::var(key).ok();
            // SAFETY: env writes happen only while holding `ENV_LOCK`.
            unsafe { std::env::set_var(key, value) };
            Self {
                key: key.to_string(),
                prev,
                _lock: lock,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            // SAFETY: `ENV_LOCK` is still held here.
            unsafe {
                match &self.prev {
                    Some(val) => std::env::set_var(&self.key, val),
                    None => std::env::remove_var(&self.key),
                }
            }
        }
    }
}
