//! The boundary between the simulation and everything the player sees or hears.
//!
//! The core never depends on a sink call succeeding: every method is
//! fire-and-forget, and implementations must swallow their own failures.

use crate::bird::Bird;
use crate::clouds::Cloud;
use crate::config::GameConfig;
use crate::game::GameState;
use crate::particles::Particles;
use crate::pipes::Pipe;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundKind {
    Flap,
    Score,
    Death,
}

/// Read-only view of the world handed to [`PresentationSink::render`].
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub config: &'a GameConfig,
    pub bird: &'a Bird,
    pub pipes: &'a [Pipe],
    pub particles: &'a Particles,
    pub clouds: &'a [Cloud],
    pub score: u32,
    pub best: u32,
    pub speed: f64,
    pub state: GameState,
}

/// Rendering, audio, UI and persistence, as seen from the core.
///
/// All methods have no-op defaults so a sink only implements what it needs.
pub trait PresentationSink {
    /// Persisted best score, read once when the game is created.
    fn read_best_score(&mut self) -> u32 {
        0
    }

    /// Called once per match end that set a new record.
    fn persist_best_score(&mut self, _best: u32) {}

    fn emit_sound(&mut self, _kind: SoundKind) {}

    fn start_music(&mut self) {}

    fn stop_music(&mut self) {}

    /// Called once per processed frame.
    fn render(&mut self, _snapshot: &Snapshot<'_>) {}

    fn notify_score_changed(&mut self, _score: u32) {}

    fn notify_state_changed(&mut self, _state: GameState) {}

    /// The deferred match-over reveal, fired a fixed wall-clock delay after
    /// a crash unless a new match started first.
    fn reveal_match_over(&mut self, _score: u32, _best: u32) {}
}

/// A sink that ignores everything. Useful for headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl PresentationSink for NullSink {}
