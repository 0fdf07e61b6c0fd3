//! Deterministic game core
//!
//! All prize and progression logic lives here. This module must stay pure:
//! - No rendering, audio or platform dependencies
//! - No clocks; time only advances through explicit `tick(dt)` calls
//! - Events are queued, never pushed into presentation code

pub mod prize;
pub mod session;
pub mod wheel;

pub use prize::Prize;
pub use session::{GameEvent, GamePhase, GameSession, GameSummary, SessionRules, ThrowToken};
pub use wheel::{Sector, Wheel, WheelLayout};
