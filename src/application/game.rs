use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use log::{debug, info, trace, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::clock::SimulationClock;
use super::config::LifeConfig;
use super::intent::Intent;
use super::stream::{StateObserver, StateStream};
use crate::domain::{Coordinates, Grid, Life, SpeedLevel, presets, rules};

type IntentQueue = Rc<RefCell<VecDeque<Intent>>>;

/// Tunables for a [`Game`] that are not part of the observable state
#[derive(Clone, Debug, PartialEq)]
pub struct GameOptions {
    pub speed_level: SpeedLevel,
    pub alive_probability: f64,
    pub pause_on_toggle: bool,
    pub seed: Option<u64>,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            speed_level: SpeedLevel::default(),
            alive_probability: 0.25,
            pause_on_toggle: true,
            seed: None,
        }
    }
}

impl From<&LifeConfig> for GameOptions {
    fn from(config: &LifeConfig) -> Self {
        Self {
            speed_level: SpeedLevel::new(config.speed_level),
            alive_probability: config.alive_probability,
            pause_on_toggle: config.pause_on_toggle,
            seed: config.seed,
        }
    }
}

/// The three observable projections of the simulation
struct LifeStreams {
    life: StateStream<Life>,
    is_running: StateStream<bool>,
    speed_level: StateStream<SpeedLevel>,
}

/// Game is the single source of truth for one simulation session.
///
/// It owns the [`Life`] state and is the only thing allowed to change it.
/// Every mutation produces a new snapshot that is published on the state
/// streams before the call returns. Frontends get a [`GameHandle`]: they can
/// read the streams and queue [`Intent`]s, which the game applies on its
/// next [`Game::pump`].
pub struct Game {
    life: Life,
    clock: SimulationClock,
    /// (is_running, interval) the clock was last armed with
    armed_with: (bool, Duration),
    now: Duration,
    rng: StdRng,
    alive_probability: f64,
    pause_on_toggle: bool,
    intents: IntentQueue,
    streams: LifeStreams,
}

impl Game {
    /// Create a paused game around a starting grid
    pub fn new(grid: Grid, options: GameOptions) -> Self {
        let life = Life::new(grid, options.speed_level);
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        info!(
            "Game created: {}x{} grid, speed level {}",
            life.grid.columns(),
            life.grid.rows(),
            options.speed_level.value()
        );

        Self {
            streams: LifeStreams {
                life: StateStream::new(life.clone()),
                is_running: StateStream::new(life.is_running),
                speed_level: StateStream::new(life.speed_level()),
            },
            armed_with: (life.is_running, life.interval),
            life,
            clock: SimulationClock::stopped(),
            now: Duration::ZERO,
            rng,
            alive_probability: clamp_probability(options.alive_probability),
            pause_on_toggle: options.pause_on_toggle,
            intents: Rc::default(),
        }
    }

    /// Build the starting board from configuration: a centered preset when
    /// one is named, random noise otherwise.
    pub fn from_config(config: &LifeConfig) -> Self {
        let options = GameOptions::from(config);
        let mut game = Self::new(Grid::dead(config.columns, config.rows), options);

        match config.pattern.as_deref().and_then(presets::find) {
            Some(pattern) => game.set_life(pattern.centered(config.columns, config.rows)),
            None => game.randomize(config.columns, config.rows),
        }
        game
    }

    /// Handle for frontends: read-only streams plus an intent queue
    pub fn handle(&self) -> GameHandle {
        GameHandle {
            intents: Rc::clone(&self.intents),
            life: self.streams.life.observer(),
            is_running: self.streams.is_running.observer(),
            speed_level: self.streams.speed_level.observer(),
        }
    }

    /// Current snapshot
    pub fn life(&self) -> &Life {
        &self.life
    }

    /// Last time seen by [`Game::pump`]
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn is_running(&self) -> bool {
        self.life.is_running
    }

    pub fn speed_level(&self) -> SpeedLevel {
        self.life.speed_level()
    }

    /// When the next generation is due, if running
    pub fn next_tick_due(&self) -> Option<Duration> {
        self.clock.next_due()
    }

    pub fn play(&mut self) {
        if self.life.is_running {
            return;
        }
        info!("Simulation started at generation {}", self.life.generation);
        self.commit(Life {
            is_running: true,
            ..self.life.clone()
        });
    }

    pub fn pause(&mut self) {
        if !self.life.is_running {
            return;
        }
        info!("Simulation paused at generation {}", self.life.generation);
        self.commit(Life {
            is_running: false,
            ..self.life.clone()
        });
    }

    /// Clamp `level`, derive the interval and apply it without touching
    /// the grid or the running flag.
    pub fn set_speed(&mut self, level: i32) {
        let speed = SpeedLevel::new(level);
        if speed.interval() == self.life.interval {
            return;
        }
        debug!("Speed level {} -> {}", self.speed_level().value(), speed.value());
        self.commit(Life {
            interval: speed.interval(),
            ..self.life.clone()
        });
    }

    /// Replace the grid wholesale. The new grid's dimensions become the
    /// board's bounds from now on.
    pub fn set_life(&mut self, grid: Grid) {
        debug!("Grid replaced ({}x{})", grid.columns(), grid.rows());
        self.commit(Life {
            grid: Rc::new(grid),
            generation: 0,
            ..self.life.clone()
        });
    }

    /// Seed a fresh random grid of the given size
    pub fn randomize(&mut self, columns: usize, rows: usize) {
        let grid = Grid::random(columns, rows, self.alive_probability, &mut self.rng);
        self.set_life(grid);
    }

    /// Kill every cell, keeping the current dimensions
    pub fn reset_life(&mut self) {
        let grid = self.life.grid.cleared();
        self.set_life(grid);
    }

    /// Flip one cell. Out-of-range coordinates are ignored entirely.
    /// With `pause_on_toggle` the simulation is paused in the same
    /// transition, so a queued tick cannot overwrite the edit.
    pub fn toggle_cell(&mut self, at: Coordinates) {
        if !self.life.grid.contains(at) {
            warn!(
                "Ignoring toggle at ({}, {}) outside {}x{} grid",
                at.x,
                at.y,
                self.life.grid.columns(),
                self.life.grid.rows()
            );
            return;
        }

        let mut next = self.life.clone();
        Rc::make_mut(&mut next.grid).toggle(at);
        if self.pause_on_toggle {
            next.is_running = false;
        }
        self.commit(next);
    }

    /// Translate a user intent into store operations
    pub fn apply(&mut self, intent: Intent) {
        debug!("Applying intent {}", intent.name());
        match intent {
            Intent::Start => self.play(),
            Intent::Stop => self.pause(),
            Intent::Randomize => {
                let (columns, rows) = self.life.grid.dimensions();
                self.randomize(columns, rows);
            }
            Intent::Reset => self.reset_life(),
            Intent::SetSpeedLevel(level) => self.set_speed(level),
            Intent::ToggleCell(at) => self.toggle_cell(at),
            Intent::SetLife(grid) => self.set_life(grid),
        }
    }

    /// One turn of the cooperative loop at time `now`.
    ///
    /// Applies queued intents first, so a pause issued before a due tick
    /// wins over it. Then runs at most one generation, then applies any
    /// intents queued by subscribers while that generation was published.
    /// Returns whether a generation was computed.
    pub fn pump(&mut self, now: Duration) -> bool {
        self.now = self.now.max(now);
        self.drain_intents();

        let ticked = self.clock.poll(self.now);
        if ticked {
            self.advance();
            self.drain_intents();
        }
        ticked
    }

    fn drain_intents(&mut self) {
        loop {
            let next = self.intents.borrow_mut().pop_front();
            match next {
                Some(intent) => self.apply(intent),
                None => break,
            }
        }
    }

    /// Compute the next generation from the current snapshot.
    /// Only reachable from a clock tick inside `pump`.
    fn advance(&mut self) {
        let grid = rules::advance(&self.life.grid);
        let generation = self.life.generation + 1;
        trace!("Generation {generation}: {} alive", grid.alive_count());
        self.commit(Life {
            grid: Rc::new(grid),
            generation,
            ..self.life.clone()
        });
    }

    /// Store the new snapshot, re-derive the clock if its inputs changed,
    /// then publish. All three streams hold their new value before any
    /// subscriber is notified.
    fn commit(&mut self, life: Life) {
        self.life = life;

        let inputs = (self.life.is_running, self.life.interval);
        if inputs != self.armed_with {
            self.clock.rearm(inputs.0, inputs.1, self.now);
            self.armed_with = inputs;
        }

        let life = self.streams.life.stage(self.life.clone());
        let is_running = self.streams.is_running.stage_if_changed(self.life.is_running);
        let speed_level = self.streams.speed_level.stage_if_changed(self.life.speed_level());

        life.deliver();
        if let Some(pending) = is_running {
            pending.deliver();
        }
        if let Some(pending) = speed_level {
            pending.deliver();
        }
    }
}

/// Randomize density within [0, 1]; NaN falls back to the default
fn clamp_probability(alive_probability: f64) -> f64 {
    if alive_probability.is_nan() {
        warn!("Alive probability is NaN, using the default");
        return GameOptions::default().alive_probability;
    }
    let clamped = alive_probability.clamp(0.0, 1.0);
    if clamped != alive_probability {
        warn!("Alive probability {alive_probability} clamped to {clamped}");
    }
    clamped
}

/// What a frontend holds: subscribe to state, queue intents.
/// It cannot touch the grid directly.
#[derive(Clone)]
pub struct GameHandle {
    intents: IntentQueue,
    life: StateObserver<Life>,
    is_running: StateObserver<bool>,
    speed_level: StateObserver<SpeedLevel>,
}

impl GameHandle {
    /// Queue an intent; applied in order on the game's next pump
    pub fn send(&self, intent: Intent) {
        self.intents.borrow_mut().push_back(intent);
    }

    pub fn pending_intents(&self) -> usize {
        self.intents.borrow().len()
    }

    /// Full snapshots, replaying the latest to each new subscriber
    pub fn life(&self) -> &StateObserver<Life> {
        &self.life
    }

    /// Running flag, published only when it changes
    pub fn is_running(&self) -> &StateObserver<bool> {
        &self.is_running
    }

    /// Speed level, published only when it changes
    pub fn speed_level(&self) -> &StateObserver<SpeedLevel> {
        &self.speed_level
    }
}
