//! In-memory adapters for deterministic tests.
//!
//! These stand in for the live adapters when a test needs a fixed runfiles
//! layout, environment, or time without touching the host.

pub mod clock;
pub mod environment;
pub mod filesystem;

pub use clock::FixedClock;
pub use environment::MemoryEnvironment;
pub use filesystem::MemoryFileSystem;
