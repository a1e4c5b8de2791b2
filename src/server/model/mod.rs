//! Server-side domain models and parameter types.
//!
//! Domain models are converted from entity models at the repository boundary and transformed
//! to DTOs at the controller boundary. The progression engine operates on these types directly.

pub mod progress;
pub mod session;
pub mod settings;
