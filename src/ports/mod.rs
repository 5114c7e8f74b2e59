//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the resolver/verifier core and
//! the host (time, filesystem, process environment). Implementations live in
//! `src/adapters/`.

pub mod clock;
pub mod environment;
pub mod filesystem;

pub use clock::Clock;
pub use environment::Environment;
pub use filesystem::FileSystem;
