//! Prize wheel: sector table and orientation
//!
//! Angles are in degrees. Sector bounds live in wheel-local space; the wheel's
//! orientation maps them into world space (a sector at local angle `a` shows
//! up at world angle `a + orientation`).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::prize::Prize;
use crate::consts::ROTATION_DEG_PER_SEC;
use crate::error::GameError;
use crate::{normalize_degrees, point_to_degrees};

/// Tolerance for sector boundary comparisons
const BOUNDARY_EPSILON: f32 = 1e-3;

/// A contiguous angular range `[start, end)` mapped to one prize
///
/// `start > end` wraps through 0°; `start == end` covers the full circle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSector")]
pub struct Sector {
    pub start: f32,
    pub end: f32,
    pub prize: Prize,
}

/// Sector bounds as written in config files, before normalization
#[derive(Deserialize)]
struct RawSector {
    start: f32,
    end: f32,
    prize: Prize,
}

impl From<RawSector> for Sector {
    fn from(raw: RawSector) -> Self {
        Sector::new(raw.start, raw.end, raw.prize)
    }
}

impl Sector {
    pub fn new(start: f32, end: f32, prize: impl Into<Prize>) -> Self {
        Self {
            start: normalize_degrees(start),
            end: normalize_degrees(end),
            prize: prize.into(),
        }
    }

    /// Angular width in degrees (handles wraparound)
    pub fn width(&self) -> f32 {
        let w = normalize_degrees(self.end - self.start);
        if w == 0.0 { 360.0 } else { w }
    }

    /// Check whether a normalized angle falls inside this sector
    pub fn contains(&self, a: f32) -> bool {
        if self.start < self.end {
            a >= self.start && a < self.end
        } else if self.start > self.end {
            a >= self.start || a < self.end
        } else {
            !a.is_nan()
        }
    }
}

/// Ordered sector table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelLayout {
    pub sectors: Vec<Sector>,
}

impl Default for WheelLayout {
    /// Eight 45° sectors, PayPal centered on 0°
    fn default() -> Self {
        Self {
            sectors: vec![
                Sector::new(22.5, 67.5, "$5"),
                Sector::new(67.5, 112.5, "$1"),
                Sector::new(112.5, 157.5, "$1"),
                Sector::new(157.5, 202.5, "$10"),
                Sector::new(202.5, 247.5, "Bomb"),
                Sector::new(247.5, 292.5, "PiggyBank"),
                Sector::new(292.5, 337.5, "Amazon"),
                Sector::new(337.5, 22.5, "PayPal"),
            ],
        }
    }
}

impl WheelLayout {
    pub fn new(sectors: Vec<Sector>) -> Self {
        Self { sectors }
    }

    /// Prize for an arbitrary angle; `Unknown` if no sector matches
    pub fn prize_for_angle(&self, angle: f32) -> Prize {
        let a = normalize_degrees(angle);
        match self.sectors.iter().find(|s| s.contains(a)) {
            Some(sector) => sector.prize.clone(),
            None => {
                log::error!("No wheel sector contains {:.2}° (raw {}); layout is broken", a, angle);
                Prize::Unknown
            }
        }
    }

    /// Same lookup, but a miss (or an unparseable sector label) is an error
    pub fn resolve_angle(&self, angle: f32) -> Result<Prize, GameError> {
        match self.prize_for_angle(angle) {
            Prize::Unknown => Err(GameError::UnmappedAngle { angle }),
            prize => Ok(prize),
        }
    }

    /// Check the table covers the circle exactly once with no gaps or overlaps
    pub fn validate(&self) -> Result<(), GameError> {
        if self.sectors.is_empty() {
            return Err(GameError::InvalidLayout("wheel has no sectors".into()));
        }
        for s in &self.sectors {
            let in_range = |a: f32| (0.0..360.0).contains(&a);
            if !in_range(s.start) || !in_range(s.end) {
                return Err(GameError::InvalidLayout(format!(
                    "sector [{}, {}) has bounds outside [0, 360)",
                    s.start, s.end
                )));
            }
            if s.prize.is_unknown() {
                return Err(GameError::InvalidLayout(format!(
                    "sector [{}, {}) has an unplayable prize",
                    s.start, s.end
                )));
            }
        }

        let total: f32 = self.sectors.iter().map(Sector::width).sum();
        if (total - 360.0).abs() > BOUNDARY_EPSILON {
            return Err(GameError::InvalidLayout(format!(
                "sectors span {:.3}° instead of 360°",
                total
            )));
        }

        let mut sorted: Vec<&Sector> = self.sectors.iter().collect();
        sorted.sort_by(|a, b| a.start.total_cmp(&b.start));
        for (i, s) in sorted.iter().enumerate() {
            let next = sorted[(i + 1) % sorted.len()];
            if !same_angle(s.end, next.start) {
                return Err(GameError::InvalidLayout(format!(
                    "sector ending at {}° is not followed by one starting there (next starts at {}°)",
                    s.end, next.start
                )));
            }
        }
        Ok(())
    }

    /// Distinct item names present on the wheel
    pub fn item_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for s in &self.sectors {
            if let Prize::Item(name) = &s.prize {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }
}

fn same_angle(a: f32, b: f32) -> bool {
    let d = normalize_degrees(a - b);
    d < BOUNDARY_EPSILON || d > 360.0 - BOUNDARY_EPSILON
}

/// The rotating wheel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wheel {
    pub layout: WheelLayout,
    /// Current orientation (degrees, normalized to [0, 360))
    pub orientation: f32,
    /// Spin speed while rotating (negative = clockwise)
    pub deg_per_sec: f32,
    rotating: bool,
}

impl Default for Wheel {
    fn default() -> Self {
        Self::new(WheelLayout::default())
    }
}

impl Wheel {
    pub fn new(layout: WheelLayout) -> Self {
        Self {
            layout,
            orientation: 0.0,
            deg_per_sec: ROTATION_DEG_PER_SEC,
            rotating: false,
        }
    }

    pub fn with_speed(mut self, deg_per_sec: f32) -> Self {
        self.deg_per_sec = deg_per_sec;
        self
    }

    pub fn is_rotating(&self) -> bool {
        self.rotating
    }

    /// Begin continuous rotation. Returns false if already rotating.
    pub fn start_rotation(&mut self) -> bool {
        if self.rotating {
            return false;
        }
        self.rotating = true;
        log::debug!("Wheel rotation started at {:.1}°", self.orientation);
        true
    }

    /// Halt rotation. Returns false if already stopped.
    pub fn stop_rotation(&mut self) -> bool {
        if !self.rotating {
            return false;
        }
        self.rotating = false;
        log::debug!("Wheel rotation stopped at {:.1}°", self.orientation);
        true
    }

    /// Advance orientation by one timestep (no-op when stopped)
    pub fn advance(&mut self, dt: f32) {
        if self.rotating {
            self.orientation = normalize_degrees(self.orientation + self.deg_per_sec * dt);
        }
    }

    /// Wheel-local angle sitting under a world-space direction
    pub fn local_angle(&self, world_deg: f32) -> f32 {
        normalize_degrees(world_deg - self.orientation)
    }

    /// Wheel-local angle of a world-space point (wheel centered at origin)
    pub fn angle_of_point(&self, point: Vec2) -> f32 {
        self.local_angle(point_to_degrees(point))
    }

    /// Prize for a wheel-local angle
    pub fn prize_for_angle(&self, angle: f32) -> Prize {
        self.layout.prize_for_angle(angle)
    }

    /// Prize currently under a world-space direction
    pub fn prize_under(&self, world_deg: f32) -> Result<Prize, GameError> {
        self.layout.resolve_angle(self.local_angle(world_deg))
    }
}
