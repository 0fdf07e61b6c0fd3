//! Prize Darts - a dart-throwing prize wheel minigame
//!
//! Core modules:
//! - `sim`: Deterministic game core (prizes, wheel sectors, session state machine)
//! - `round`: Round controller (timers, dart flight, presenter wiring)
//! - `config`: Data-driven game configuration
//! - `error`: Error taxonomy

pub mod config;
pub mod error;
pub mod round;
pub mod sim;

pub use config::GameConfig;
pub use error::GameError;
pub use round::{LogPresenter, Presenter, Round};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz is plenty for a wheel and a dart)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Darts per round
    pub const THROW_BUDGET: u32 = 3;

    /// Items needed to finish the collection, in slot order
    pub const REQUIRED_ITEMS: [&str; 3] = ["PayPal", "Amazon", "PiggyBank"];

    /// Prize label for the obstacle sector
    pub const OBSTACLE_LABEL: &str = "Bomb";

    /// Wheel spin speed (one full clockwise turn every 10 seconds)
    pub const ROTATION_DEG_PER_SEC: f32 = -36.0;

    /// World-space angle the dart flies toward (straight up)
    pub const POINTER_DEG: f32 = 90.0;

    /// Seconds the dart spends in the air before it sticks
    pub const DART_FLIGHT_SECS: f32 = 0.5;

    /// Delay between completing the collection and Frenzy (slot animation)
    pub const FRENZY_DELAY_SECS: f32 = 1.0;

    /// Idle time before the tutorial hand appears
    pub const HINT_DELAY_SECS: f32 = 2.0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    ((angle % 360.0) + 360.0) % 360.0
}

/// Whole fixed timesteps covering a duration in seconds
#[inline]
pub fn secs_to_ticks(secs: f32) -> u32 {
    (secs / consts::SIM_DT).round() as u32
}

/// Convert cartesian (x, y) to a polar angle in degrees, normalized to [0, 360)
#[inline]
pub fn point_to_degrees(pos: Vec2) -> f32 {
    normalize_degrees(pos.y.atan2(pos.x).to_degrees())
}

/// Convert polar (r, degrees) to cartesian (x, y)
#[inline]
pub fn degrees_to_point(r: f32, degrees: f32) -> Vec2 {
    let theta = degrees.to_radians();
    Vec2::new(r * theta.cos(), r * theta.sin())
}
