use crate::config::GameConfig;
use rand::Rng;

#[derive(Debug, Clone, PartialEq)]
pub struct Cloud {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    /// Drift per tick at base scroll speed.
    pub speed: f64,
}

impl Cloud {
    pub fn random<R: Rng>(config: &GameConfig, rng: &mut R) -> Self {
        Self {
            x: rng.gen_range(0.0..config.world_width.max(1.0)),
            y: rng.gen_range(0.0..config.cloud_band.max(1.0)),
            width: 60.0 + rng.gen_range(0.0..40.0),
            speed: 0.3 + rng.gen_range(0.0..0.5),
        }
    }

    /// Drift left by `speed × ratio × dt`, wrapping to the right edge at a
    /// fresh height once fully off screen.
    pub fn drift<R: Rng>(&mut self, dt: f64, ratio: f64, config: &GameConfig, rng: &mut R) {
        self.x -= self.speed * ratio * dt;
        if self.x + self.width < 0.0 {
            self.x = config.world_width;
            self.y = rng.gen_range(0.0..config.cloud_band.max(1.0));
        }
    }
}

pub fn scatter<R: Rng>(config: &GameConfig, rng: &mut R) -> Vec<Cloud> {
    (0..config.cloud_count)
        .map(|_| Cloud::random(config, rng))
        .collect()
}
