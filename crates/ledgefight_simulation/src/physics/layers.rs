//! Collision layers (битовые маски).
//!
//! - Layer 1 (0b01): Ground, платформы сцены
//! - Layer 2 (0b10): Hurtbox, уязвимые зоны бойцов

use serde::{Deserialize, Serialize};

/// Bit mask of collision layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const GROUND: LayerMask = LayerMask(0b01);
    pub const HURTBOX: LayerMask = LayerMask(0b10);

    /// True if the masks share at least one layer.
    pub fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }

    pub fn union(self, other: LayerMask) -> LayerMask {
        LayerMask(self.0 | other.0)
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::GROUND
    }
}
