//! Round controller
//!
//! Owns one wheel, one session and the presenter for a single round. Runs the
//! fixed-timestep clock: wheel spin, dart flight and the session timers. The
//! presenter only ever sees events; it never touches core state.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::GameConfig;
use crate::error::GameError;
use crate::secs_to_ticks;
use crate::sim::{GameEvent, GamePhase, GameSession, Prize, ThrowToken, Wheel};

/// Presentation-layer sink for core events
pub trait Presenter {
    fn present(&mut self, event: &GameEvent);
}

/// Records events (handy for headless runs and tests)
impl Presenter for Vec<GameEvent> {
    fn present(&mut self, event: &GameEvent) {
        self.push(event.clone());
    }
}

/// Writes every event to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn present(&mut self, event: &GameEvent) {
        match event {
            GameEvent::ThrowAccepted(token) => log::info!("Dart {} thrown", token.0),
            GameEvent::ItemCollected { name, progress } => {
                log::info!("Item {} lit up ({:.0}%)", name, progress * 100.0)
            }
            GameEvent::AlreadyCollected(name) => log::info!("{} already in its slot", name),
            GameEvent::CashEarned { amount, total } => log::info!("+${} (total ${})", amount, total),
            GameEvent::ObstacleHit => log::info!("Bomb!"),
            GameEvent::AllItemsCollected => log::info!("Collection complete"),
            GameEvent::PhaseChanged(phase) => log::info!("Phase: {:?}", phase),
            GameEvent::GameOver(summary) => log::info!("Game over: {}", summary.to_json()),
            GameEvent::Reset => log::info!("Round reset"),
            GameEvent::HintShown => log::debug!("Tutorial hand shown"),
            GameEvent::HintHidden => log::debug!("Tutorial hand hidden"),
        }
    }
}

/// A dart in the air
#[derive(Debug, Clone, Copy)]
struct DartFlight {
    token: ThrowToken,
    /// World-space direction the dart lands at
    aim_deg: f32,
    ticks_left: u32,
}

/// One round of play
pub struct Round<P: Presenter> {
    config: GameConfig,
    wheel: Wheel,
    session: GameSession,
    presenter: P,
    rng: Pcg32,
    flight: Option<DartFlight>,
    /// Set when the wheel failed to map a landing; throws are refused
    unplayable: bool,
    time_ticks: u64,
}

impl<P: Presenter> Round<P> {
    /// Validate the configuration and start the wheel spinning
    pub fn new(config: GameConfig, presenter: P) -> Result<Self, GameError> {
        if let Err(e) = config.validate() {
            log::error!("Round configuration rejected: {}", e);
            return Err(e);
        }

        let mut wheel = config.build_wheel();
        wheel.start_rotation();

        Ok(Self {
            session: GameSession::new(config.session_rules()),
            rng: Pcg32::seed_from_u64(config.seed),
            config,
            wheel,
            presenter,
            flight: None,
            unplayable: false,
            time_ticks: 0,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn wheel(&self) -> &Wheel {
        &self.wheel
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase()
    }

    pub fn is_unplayable(&self) -> bool {
        self.unplayable
    }

    pub fn dart_in_flight(&self) -> bool {
        self.flight.is_some()
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Prize for a wheel-local angle
    pub fn prize_for_angle(&self, angle: f32) -> Prize {
        self.wheel.prize_for_angle(angle)
    }

    /// Throw a dart toward the pointer. It lands after the flight time.
    pub fn throw_dart(&mut self) -> Result<ThrowToken, GameError> {
        if self.unplayable {
            return Err(GameError::invalid("round is unplayable until the wheel layout is fixed"));
        }
        let token = match self.session.begin_throw() {
            Ok(token) => token,
            Err(e) => {
                log::debug!("Throw rejected: {}", e);
                return Err(e);
            }
        };

        let spread = self.config.aim_spread_deg;
        let jitter = if spread > 0.0 {
            self.rng.random_range(-spread..=spread)
        } else {
            0.0
        };
        self.flight = Some(DartFlight {
            token,
            aim_deg: self.config.pointer_deg + jitter,
            ticks_left: secs_to_ticks(self.config.dart_flight_secs),
        });

        self.flush_events();
        Ok(token)
    }

    /// Resolve a throw at a world-space hit point (presenter-side hit detection)
    pub fn resolve_hit(&mut self, token: ThrowToken, point: Vec2) -> Result<(), GameError> {
        match self.flight {
            Some(flight) if flight.token == token => self.flight = None,
            _ => {
                return Err(GameError::invalid(format!(
                    "no dart in flight for token {}",
                    token.0
                )));
            }
        }
        let result = self.land(token, self.wheel.angle_of_point(point));
        self.flush_events();
        result
    }

    /// Advance the round by one fixed timestep
    ///
    /// Timers count whole ticks; `dt` only drives the wheel spin.
    pub fn tick(&mut self, dt: f32) -> Result<(), GameError> {
        self.time_ticks += 1;
        self.wheel.advance(dt);
        self.session.tick();

        let mut result = Ok(());
        if let Some(flight) = self.flight.as_mut() {
            flight.ticks_left = flight.ticks_left.saturating_sub(1);
            if flight.ticks_left == 0 {
                let flight = *flight;
                self.flight = None;
                result = self.land(flight.token, self.wheel.local_angle(flight.aim_deg));
            }
        }

        self.flush_events();
        result
    }

    /// Start a fresh round: session defaults, wheel spinning again
    pub fn reset(&mut self) {
        self.flight = None;
        self.session.reset();
        self.wheel.start_rotation();
        self.unplayable = match self.wheel.layout.validate() {
            Ok(()) => false,
            Err(e) => {
                log::error!("Wheel layout still broken after reset: {}", e);
                true
            }
        };
        self.flush_events();
    }

    fn land(&mut self, token: ThrowToken, local_angle: f32) -> Result<(), GameError> {
        let prize = match self.wheel.layout.resolve_angle(local_angle) {
            Ok(prize) => prize,
            Err(e) => return Err(self.fail_throw(token, e)),
        };

        if let Err(e) = self.session.resolve_throw(token, prize) {
            if e.is_configuration() {
                return Err(self.fail_throw(token, e));
            }
            log::debug!("Landing rejected: {}", e);
            return Err(e);
        }

        if self.session.throws_remaining() == 0 && self.wheel.stop_rotation() {
            log::info!("Out of darts, wheel stopped");
        }
        Ok(())
    }

    /// Configuration defect while landing: drop the throw, refuse further play
    fn fail_throw(&mut self, token: ThrowToken, error: GameError) -> GameError {
        log::error!("Throw {} could not be resolved: {}", token.0, error);
        if let Err(e) = self.session.abort_throw(token) {
            log::warn!("Abort failed: {}", e);
        }
        self.unplayable = true;
        error
    }

    fn flush_events(&mut self) {
        for event in self.session.drain_events() {
            if event == GameEvent::PhaseChanged(GamePhase::Frenzy) && self.wheel.stop_rotation() {
                log::info!("Frenzy: wheel stopped");
            }
            self.presenter.present(&event);
        }
    }
}
