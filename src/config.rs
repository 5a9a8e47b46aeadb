// ── World ───────────────────────────────────────────────────────────────────

pub const WORLD_WIDTH: f64 = 400.0;
pub const WORLD_HEIGHT: f64 = 600.0;
pub const GROUND_HEIGHT: f64 = 100.0;
// 60 Hz target rate.
pub const TICK_MS: f64 = 1000.0 / 60.0;

/// Tunable parameters for a match. `Default` gives the classic feel.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub world_width: f64,
    pub world_height: f64,
    pub ground_height: f64,

    // Bird
    pub bird_x: f64,
    pub bird_y: f64,
    pub bird_width: f64,
    pub bird_height: f64,
    /// Downward acceleration per tick.
    pub gravity: f64,
    /// Velocity set by a flap (negative = upward).
    pub jump: f64,

    // Pipes
    pub pipe_width: f64,
    pub pipe_gap: f64,
    pub pipe_min_height: f64,
    /// A new pipe spawns once the newest one is this far left of the right edge.
    pub pipe_spawn_distance: f64,

    // Difficulty
    pub base_speed: f64,
    pub speed_step: f64,
    pub points_per_step: u32,

    // Decoration
    pub cloud_count: usize,
    /// Clouds are placed within `[0, cloud_band)` vertically.
    pub cloud_band: f64,

    // Timing
    pub tick_ms: f64,
    /// Upper bound on a single tick multiplier.
    pub max_multiplier: f64,
    /// Wall-clock delay between a crash and the match-over reveal.
    pub reveal_delay_ms: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            ground_height: GROUND_HEIGHT,

            bird_x: 80.0,
            bird_y: 250.0,
            bird_width: 34.0,
            bird_height: 24.0,
            gravity: 0.5,
            jump: -9.0,

            pipe_width: 60.0,
            pipe_gap: 180.0,
            pipe_min_height: 50.0,
            pipe_spawn_distance: 250.0,

            base_speed: 2.5,
            speed_step: 0.5,
            points_per_step: 5,

            cloud_count: 5,
            cloud_band: 200.0,

            tick_ms: TICK_MS,
            max_multiplier: 15.0,
            reveal_delay_ms: 2000.0,
        }
    }
}

impl GameConfig {
        pub fn floor_y(&self) -> f64 {
        self.world_height - self.ground_height
    }

    /// Scroll speed for a given score: a step function, one increment per
    /// `points_per_step` points.
    pub fn speed_for_score(&self, score: u32) -> f64 {
        let steps = score / self.points_per_step.max(1);
        self.base_speed + steps as f64 * self.speed_step
    }

    /// Inclusive bounds for a pipe's top segment height. The upper bound is
    /// clamped so the range is never empty, whatever the tuning.
    pub fn top_height_range(&self) -> (f64, f64) {
        let min = self.pipe_min_height.max(0.0);
        let max = self.floor_y() - self.pipe_gap - self.pipe_min_height;
        (min, max.max(min))
    }
}
