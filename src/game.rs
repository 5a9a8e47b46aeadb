//! Match state machine and the per-frame driver.
//!
//! ```text
//!   NotStarted --start/flap--> Playing --collision--> Ended
//!                                 ^                     |
//!                                 +-------start---------+
//! ```
//!
//! Commands that do not apply to the current state are ignored.

use crate::clock::Stepper;
use crate::collision::Collision;
use crate::config::GameConfig;
use crate::sink::{PresentationSink, Snapshot, SoundKind};
use crate::timer::DeferredTask;
use crate::world::{World, WorldEvent};
use log::{debug, info};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    NotStarted,
    Playing,
    Ended,
}

pub struct Game<R> {
    world: World<R>,
    state: GameState,
    best: u32,
    /// Bumped on every match start; stale deferred tasks compare against it.
    generation: u64,
    stepper: Stepper,
    reveal: DeferredTask,
    /// Timestamp of the latest frame callback, in milliseconds.
    now_ms: f64,
    events: Vec<WorldEvent>,
}

impl<R: Rng> Game<R> {
    /// Build a game in the not-started state, reading the persisted best
    /// score from the sink.
    pub fn new<S: PresentationSink>(config: GameConfig, rng: R, sink: &mut S) -> Self {
        let best = sink.read_best_score();
        let stepper = Stepper::from_config(&config);
        Self {
            world: World::new(config, rng),
            state: GameState::NotStarted,
            best,
            generation: 0,
            stepper,
            reveal: DeferredTask::new(),
            now_ms: 0.0,
            events: Vec::new(),
        }
    }

    /// Begin a match from not-started or ended. Ignored while playing.
    pub fn start<S: PresentationSink>(&mut self, sink: &mut S) {
        if self.state == GameState::Playing {
            return;
        }

        self.generation += 1;
        self.reveal.cancel();
        self.world.reset();
        self.state = GameState::Playing;
        info!("match {} started (best {})", self.generation, self.best);

        sink.notify_state_changed(self.state);
        sink.notify_score_changed(0);
        sink.start_music();
    }

    /// Flap while playing. From not-started this starts the match instead;
    /// after a crash it does nothing.
    pub fn flap<S: PresentationSink>(&mut self, sink: &mut S) {
        match self.state {
            GameState::NotStarted => self.start(sink),
            GameState::Playing => {
                self.world.flap();
                sink.emit_sound(SoundKind::Flap);
            }
            GameState::Ended => {}
        }
    }

    /// Frame callback entry point. Fires the match-over reveal when due,
    /// then runs at most one scaled simulation step and renders it.
    ///
    /// Returns whether the frame was processed.
    pub fn frame<S: PresentationSink>(&mut self, now_ms: f64, sink: &mut S) -> bool {
        self.now_ms = now_ms;

        if self.reveal.poll(now_ms, self.generation) {
            debug!("revealing match-over screen for match {}", self.generation);
            sink.reveal_match_over(self.world.score(), self.best);
        }

        let Some(multiplier) = self.stepper.advance(now_ms) else {
            return false;
        };
        self.step(multiplier, sink);
        sink.render(&self.snapshot());
        true
    }

    /// One simulation step scaled by `multiplier` (1.0 = one tick at the
    /// target rate). Particles always evolve; everything else only while
    /// playing.
    pub fn step<S: PresentationSink>(&mut self, multiplier: f64, sink: &mut S) {
        self.world.update_particles(multiplier);

        if self.state != GameState::Playing {
            return;
        }

        self.events.clear();
        self.world.advance(multiplier, &mut self.events);
        for event in &self.events {
            match *event {
                WorldEvent::Scored { score, speed } => {
                    debug!("scored {score}, speed now {speed}");
                    self.world.score_burst();
                    sink.emit_sound(SoundKind::Score);
                    sink.notify_score_changed(score);
                }
            }
        }

        if let Some(collision) = self.world.collision() {
            self.end_match(collision, sink);
        }
    }

    fn end_match<S: PresentationSink>(&mut self, collision: Collision, sink: &mut S) {
        self.state = GameState::Ended;
        let score = self.world.score();
        info!(
            "match {} ended by {:?} with score {} (best {})",
            self.generation, collision, score, self.best
        );

        if score > self.best {
            self.best = score;
            sink.persist_best_score(score);
        }

        self.world.explode();
        sink.emit_sound(SoundKind::Death);
        sink.stop_music();
        sink.notify_state_changed(self.state);

        let delay = self.world.config().reveal_delay_ms;
        self.reveal.schedule(self.now_ms, delay, self.generation);
    }
}

impl<R> Game<R> {
    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn score(&self) -> u32 {
        self.world.score()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn world(&self) -> &World<R> {
        &self.world
    }

    /// Scripted access to the world, for scenario setup.
    pub fn world_mut(&mut self) -> &mut World<R> {
        &mut self.world
    }

    pub fn reveal_pending(&self) -> bool {
        self.reveal.is_pending()
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            config: self.world.config(),
            bird: self.world.bird(),
            pipes: self.world.pipes(),
            particles: self.world.particles(),
            clouds: self.world.clouds(),
            score: self.world.score(),
            best: self.best,
            speed: self.world.speed(),
            state: self.state,
        }
    }
}
