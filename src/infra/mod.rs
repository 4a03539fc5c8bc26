//! Infrastructure layer
//!
//! Handles the side effects of building: spawning external processes and
//! the kind-specific builders that drive them.

pub mod builders;
pub mod process;
