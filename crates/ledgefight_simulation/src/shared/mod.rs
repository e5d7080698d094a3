//! Shared domain: cross-cutting типы
//!
//! - SimClock: fixed-timestep часы симуляции (тик + dt)
//! - move_towards / approx helpers для frame-exact математики

pub mod clock;
pub mod math;

pub use clock::*;
pub use math::*;
