//! Round progression state machine
//!
//! The session owns everything that changes while darts are thrown: the
//! throw budget, winnings, collected items and the current phase. It never
//! waits on animation. Every change is queued as a [`GameEvent`] for the
//! presentation layer to drain.

use serde::{Deserialize, Serialize};

use super::prize::Prize;
use crate::consts::{FRENZY_DELAY_SECS, HINT_DELAY_SECS, REQUIRED_ITEMS, THROW_BUDGET};
use crate::error::GameError;
use crate::secs_to_ticks;

/// Coarse progression stage of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No dart resolved yet
    Idle,
    /// Throwing darts
    InProgress,
    /// Collection complete, waiting for Frenzy to kick in
    Collected,
    /// Phase 2: wheel stopped, ordinary budget no longer applies
    Frenzy,
    /// Round ended (out of darts)
    GameOver,
}

impl GamePhase {
    /// Phases in which a new throw may begin
    pub fn accepts_throws(&self) -> bool {
        matches!(self, GamePhase::Idle | GamePhase::InProgress | GamePhase::Collected)
    }
}

/// Handle for the single open throw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThrowToken(pub u32);

/// End-of-round report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub cash_total: u64,
    pub collected_items: Vec<String>,
    pub prize_history: Vec<Prize>,
    pub throws_made: u32,
}

impl GameSummary {
    pub fn to_json(&self) -> String {
        // Only strings and integers inside, serialization cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Events for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ThrowAccepted(ThrowToken),
    ItemCollected { name: String, progress: f32 },
    AlreadyCollected(String),
    CashEarned { amount: u32, total: u64 },
    ObstacleHit,
    AllItemsCollected,
    PhaseChanged(GamePhase),
    GameOver(GameSummary),
    Reset,
    /// Tutorial hand should appear (player idle before first throw)
    HintShown,
    /// Tutorial hand should disappear
    HintHidden,
}

/// Fixed per-round rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRules {
    pub throw_budget: u32,
    pub required_items: Vec<String>,
    pub frenzy_delay_secs: f32,
    pub hint_delay_secs: f32,
}

impl Default for SessionRules {
    fn default() -> Self {
        Self {
            throw_budget: THROW_BUDGET,
            required_items: REQUIRED_ITEMS.iter().map(|s| s.to_string()).collect(),
            frenzy_delay_secs: FRENZY_DELAY_SECS,
            hint_delay_secs: HINT_DELAY_SECS,
        }
    }
}

/// Mutable per-round record
#[derive(Debug, Clone)]
pub struct GameSession {
    rules: SessionRules,
    phase: GamePhase,
    throws_remaining: u32,
    open_throw: Option<ThrowToken>,
    /// Keeps counting across resets so stale tokens never match
    next_token: u32,
    prize_history: Vec<Prize>,
    cash_total: u64,
    /// Insertion order, no duplicates, always a subset of the required items
    collected_items: Vec<String>,
    /// Ticks until the scheduled Frenzy transition
    frenzy_ticks: Option<u32>,
    idle_ticks: u32,
    hint_visible: bool,
    events: Vec<GameEvent>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(SessionRules::default())
    }
}

impl GameSession {
    pub fn new(rules: SessionRules) -> Self {
        Self {
            throws_remaining: rules.throw_budget,
            rules,
            phase: GamePhase::Idle,
            open_throw: None,
            next_token: 1,
            prize_history: Vec::new(),
            cash_total: 0,
            collected_items: Vec::new(),
            frenzy_ticks: None,
            idle_ticks: 0,
            hint_visible: false,
            events: Vec::new(),
        }
    }

    pub fn rules(&self) -> &SessionRules {
        &self.rules
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn throws_remaining(&self) -> u32 {
        self.throws_remaining
    }

    pub fn is_throw_in_flight(&self) -> bool {
        self.open_throw.is_some()
    }

    pub fn open_throw(&self) -> Option<ThrowToken> {
        self.open_throw
    }

    pub fn prize_history(&self) -> &[Prize] {
        &self.prize_history
    }

    pub fn cash_total(&self) -> u64 {
        self.cash_total
    }

    pub fn collected_items(&self) -> &[String] {
        &self.collected_items
    }

    pub fn required_items(&self) -> &[String] {
        &self.rules.required_items
    }

    pub fn is_collected(&self, name: &str) -> bool {
        self.collected_items.iter().any(|n| n == name)
    }

    /// Collected fraction of the required set (0.0 - 1.0)
    pub fn progress(&self) -> f32 {
        if self.rules.required_items.is_empty() {
            return 0.0;
        }
        self.collected_items.len() as f32 / self.rules.required_items.len() as f32
    }

    pub fn frenzy_pending(&self) -> bool {
        self.frenzy_ticks.is_some()
    }

    pub fn hint_visible(&self) -> bool {
        self.hint_visible
    }

    /// Queued events, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            cash_total: self.cash_total,
            collected_items: self.collected_items.clone(),
            prize_history: self.prize_history.clone(),
            throws_made: self.prize_history.len() as u32,
        }
    }

    /// Open a throw. Only one may be open at a time.
    pub fn begin_throw(&mut self) -> Result<ThrowToken, GameError> {
        if let Some(open) = self.open_throw {
            return Err(GameError::invalid(format!("throw {} already in flight", open.0)));
        }
        if !self.phase.accepts_throws() {
            return Err(GameError::invalid(format!("cannot throw during {:?}", self.phase)));
        }
        if self.throws_remaining == 0 {
            return Err(GameError::invalid("no throws remaining"));
        }

        let token = ThrowToken(self.next_token);
        self.next_token = self.next_token.wrapping_add(1);
        self.open_throw = Some(token);

        self.idle_ticks = 0;
        if self.hint_visible {
            self.hint_visible = false;
            self.events.push(GameEvent::HintHidden);
        }

        self.events.push(GameEvent::ThrowAccepted(token));
        Ok(token)
    }

    /// Record where the open throw landed and advance the round
    pub fn resolve_throw(&mut self, token: ThrowToken, prize: Prize) -> Result<(), GameError> {
        self.check_token(token)?;
        if self.throws_remaining == 0 {
            return Err(GameError::invalid("no throws remaining"));
        }
        match &prize {
            Prize::Unknown => return Err(GameError::UnknownPrize(prize.label())),
            Prize::Item(name) if !self.rules.required_items.contains(name) => {
                return Err(GameError::UnknownPrize(name.clone()));
            }
            _ => {}
        }

        self.open_throw = None;
        self.throws_remaining -= 1;
        self.prize_history.push(prize.clone());
        log::info!("Prize {} won: {}", self.prize_history.len(), prize);

        if self.phase == GamePhase::Idle {
            self.set_phase(GamePhase::InProgress);
        }
        let phase_before = self.phase;

        match prize {
            Prize::Cash { amount } => self.earn_cash(amount),
            Prize::Item(name) => self.collect_item(name),
            Prize::Obstacle => {
                // Penalty policy is not decided; only the event fires
                log::info!("Bomb hit");
                self.events.push(GameEvent::ObstacleHit);
            }
            // Rejected above
            Prize::Unknown => {}
        }

        // The throw that completes the collection hands over to Frenzy instead
        let still_playing = self.phase == phase_before
            && matches!(self.phase, GamePhase::InProgress | GamePhase::Collected);
        if self.throws_remaining == 0 && still_playing {
            self.end_game();
        }
        Ok(())
    }

    /// Drop the open throw without consuming a dart (unresolvable landing)
    pub fn abort_throw(&mut self, token: ThrowToken) -> Result<(), GameError> {
        self.check_token(token)?;
        self.open_throw = None;
        log::warn!("Throw {} aborted without a prize", token.0);
        Ok(())
    }

    /// Scheduled Collected -> Frenzy transition
    pub fn enter_frenzy(&mut self) -> Result<(), GameError> {
        if self.phase != GamePhase::Collected {
            return Err(GameError::invalid(format!("cannot enter Frenzy from {:?}", self.phase)));
        }
        self.frenzy_ticks = None;
        log::info!("Phase 2: Frenzy");
        self.set_phase(GamePhase::Frenzy);
        Ok(())
    }

    /// Advance session timers (Frenzy delay, tutorial hint) by one fixed step
    pub fn tick(&mut self) {
        if let Some(ticks) = self.frenzy_ticks {
            let ticks = ticks.saturating_sub(1);
            self.frenzy_ticks = Some(ticks);
            if ticks == 0 {
                if let Err(e) = self.enter_frenzy() {
                    log::warn!("Scheduled Frenzy dropped: {}", e);
                    self.frenzy_ticks = None;
                }
            }
        }

        if self.phase == GamePhase::Idle && self.open_throw.is_none() && !self.hint_visible {
            self.idle_ticks += 1;
            if self.idle_ticks >= secs_to_ticks(self.rules.hint_delay_secs) {
                self.hint_visible = true;
                self.events.push(GameEvent::HintShown);
            }
        }
    }

    /// Start the round over. Valid from any phase.
    pub fn reset(&mut self) {
        if self.hint_visible {
            self.events.push(GameEvent::HintHidden);
        }
        self.phase = GamePhase::Idle;
        self.throws_remaining = self.rules.throw_budget;
        self.open_throw = None;
        self.prize_history.clear();
        self.cash_total = 0;
        self.collected_items.clear();
        self.frenzy_ticks = None;
        self.idle_ticks = 0;
        self.hint_visible = false;
        log::info!("Session reset ({} throws)", self.throws_remaining);
        self.events.push(GameEvent::Reset);
    }

    fn check_token(&self, token: ThrowToken) -> Result<(), GameError> {
        match self.open_throw {
            Some(open) if open == token => Ok(()),
            Some(open) => Err(GameError::invalid(format!(
                "token {} does not match open throw {}",
                token.0, open.0
            ))),
            None => Err(GameError::invalid(format!("no throw open for token {}", token.0))),
        }
    }

    fn set_phase(&mut self, phase: GamePhase) {
        log::debug!("Phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.events.push(GameEvent::PhaseChanged(phase));
    }

    fn earn_cash(&mut self, amount: u32) {
        self.cash_total += u64::from(amount);
        log::info!("Cash earned: ${} | Total: ${}", amount, self.cash_total);
        self.events.push(GameEvent::CashEarned {
            amount,
            total: self.cash_total,
        });
    }

    fn collect_item(&mut self, name: String) {
        if self.is_collected(&name) {
            log::info!("{} already collected", name);
            self.events.push(GameEvent::AlreadyCollected(name));
            return;
        }

        self.collected_items.push(name.clone());
        log::info!(
            "Collected: {} | Progress: {}/{}",
            name,
            self.collected_items.len(),
            self.rules.required_items.len()
        );
        self.events.push(GameEvent::ItemCollected {
            name,
            progress: self.progress(),
        });

        if self.collected_items.len() == self.rules.required_items.len() {
            log::info!("All items collected, Frenzy in {:.1}s", self.rules.frenzy_delay_secs);
            self.events.push(GameEvent::AllItemsCollected);
            self.set_phase(GamePhase::Collected);
            self.frenzy_ticks = Some(secs_to_ticks(self.rules.frenzy_delay_secs));
        }
    }

    fn end_game(&mut self) {
        self.frenzy_ticks = None;
        self.set_phase(GamePhase::GameOver);
        let summary = self.summary();
        log::info!(
            "Game over: ${} cash, items [{}], {} prizes",
            summary.cash_total,
            summary.collected_items.join(", "),
            summary.throws_made
        );
        self.events.push(GameEvent::GameOver(summary));
    }
}
