//! Combat systems (attack executor + hit resolution)

pub mod attacks;
pub mod hits;

// Re-export all systems
pub use attacks::*;
pub use hits::*;
