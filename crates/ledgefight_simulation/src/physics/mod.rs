//! Physics domain: 2D geometry collaborator + kinematic integration
//!
//! Архитектура:
//! - `OverlapQuery`: единый интерфейс "shape vs layer → hits"
//!   (stage для grounding, hurtbox snapshot для хитов)
//! - GroundProbe: чистый boolean query, без состояния
//! - integrate_fighters: gravity + position + посадка на платформы
//!
//! Детерминизм: только fixed dt из SimClock, без wall-clock.

pub mod ground;
pub mod integrate;
pub mod layers;
pub mod shapes;
pub mod stage;

pub use ground::*;
pub use integrate::*;
pub use layers::*;
pub use shapes::*;
pub use stage::*;
