use crate::config::GameConfig;
use log::debug;
use rand::Rng;

#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    /// Left edge. Decreases as the world scrolls.
    pub x: f64,
    pub width: f64,
    pub top_height: f64,
    pub bottom_y: f64,
    pub scored: bool,
}

impl Pipe {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn gap(&self) -> f64 {
        self.bottom_y - self.top_height
    }

    /// Whether the horizontal span `[left, right)` overlaps this pipe.
    pub fn overlaps(&self, left: f64, right: f64) -> bool {
        right > self.x && left < self.right()
    }
}

/// Create a pipe just off the right edge with a random gap position.
///
/// The top height is a whole number drawn uniformly from
/// [`GameConfig::top_height_range`], so both segments always fit above the
/// ground.
pub fn spawn_pipe<R: Rng>(config: &GameConfig, rng: &mut R) -> Pipe {
    let (min, max) = config.top_height_range();
    let (lo, hi) = (min.floor() as i64, max.floor() as i64);
    let top_height = if hi > lo {
        rng.gen_range(lo..=hi) as f64
    } else {
        min
    };

    debug!("spawned pipe with top height {top_height}");
    Pipe {
        x: config.world_width,
        width: config.pipe_width,
        top_height,
        bottom_y: top_height + config.pipe_gap,
        scored: false,
    }
}

/// A new pipe is due when there is none, or the newest has scrolled far
/// enough in from the right edge.
pub fn spawn_due(pipes: &[Pipe], config: &GameConfig) -> bool {
    match pipes.last() {
        None => true,
        Some(newest) => newest.x < config.world_width - config.pipe_spawn_distance,
    }
}
