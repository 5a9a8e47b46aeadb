//! Every entity of a match plus the random source that drives spawns and effects.

use crate::bird::Bird;
use crate::clouds::{self, Cloud};
use crate::collision::{self, Collision};
use crate::config::GameConfig;
use crate::particles::{Particles, Tint};
use crate::pipes::{self, Pipe};
use log::debug;
use rand::Rng;

/// Something a simulation step wants the caller to react to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldEvent {
    /// A pipe was passed. Carries the new score and scroll speed.
    Scored { score: u32, speed: f64 },
}

#[derive(Debug, Clone)]
pub struct World<R> {
    config: GameConfig,
    bird: Bird,
    pipes: Vec<Pipe>,
    particles: Particles,
    clouds: Vec<Cloud>,
    score: u32,
    speed: f64,
    rng: R,
}

impl<R: Rng> World<R> {
    pub fn new(config: GameConfig, mut rng: R) -> Self {
        let clouds = clouds::scatter(&config, &mut rng);
        Self {
            bird: Bird::new(&config),
            pipes: Vec::new(),
            particles: Particles::new(),
            clouds,
            score: 0,
            speed: config.base_speed,
            config,
            rng,
        }
    }

    /// Fresh match: score, bird, pipes, particles and speed back to their
    /// starting values, with one pipe already queued. Clouds carry over.
    pub fn reset(&mut self) {
        self.score = 0;
        self.speed = self.config.base_speed;
        self.bird = Bird::new(&self.config);
        self.pipes.clear();
        self.particles.clear();
        self.spawn_pipe();
    }

    /// Particle lifecycle. Runs every tick whatever the game state.
    pub fn update_particles(&mut self, dt: f64) {
        self.particles.update(dt);
    }

    /// Bird, pipes, scoring, spawning and clouds for one scaled tick.
    pub fn advance(&mut self, dt: f64, events: &mut Vec<WorldEvent>) {
        self.bird.integrate(dt);

        let bird_x = self.bird.x;
        for pipe in &mut self.pipes {
            pipe.x -= self.speed * dt;
            if !pipe.scored && pipe.right() < bird_x {
                pipe.scored = true;
                self.score += 1;
                self.speed = self.config.speed_for_score(self.score);
                events.push(WorldEvent::Scored {
                    score: self.score,
                    speed: self.speed,
                });
            }
        }
        self.pipes.retain(|pipe| pipe.right() >= 0.0);

        if pipes::spawn_due(&self.pipes, &self.config) {
            self.spawn_pipe();
        }

        let ratio = if self.config.base_speed > 0.0 {
            self.speed / self.config.base_speed
        } else {
            1.0
        };
        for cloud in &mut self.clouds {
            cloud.drift(dt, ratio, &self.config, &mut self.rng);
        }
    }

    pub fn collision(&self) -> Option<Collision> {
        collision::detect(&self.bird, &self.pipes, &self.config)
    }

    pub fn flap(&mut self) {
        self.bird.flap();
        let (x, y) = (self.bird.x, self.bird.y + self.bird.height / 2.0);
        self.particles.burst(x, y, Tint::Gold, &mut self.rng);
    }

    pub fn score_burst(&mut self) {
        let (x, y) = self.bird.center();
        self.particles.burst(x, y, Tint::Green, &mut self.rng);
    }

    pub fn explode(&mut self) {
        let (x, y) = self.bird.center();
        self.particles.explode(x, y, &mut self.rng);
    }

    fn spawn_pipe(&mut self) {
        let pipe = pipes::spawn_pipe(&self.config, &mut self.rng);
        self.pipes.push(pipe);
        debug!("{} pipes in play", self.pipes.len());
    }
}

impl<R> World<R> {
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    pub fn particles(&self) -> &Particles {
        &self.particles
    }

    pub fn clouds(&self) -> &[Cloud] {
        &self.clouds
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn bird_mut(&mut self) -> &mut Bird {
        &mut self.bird
    }

    pub fn pipes_mut(&mut self) -> &mut Vec<Pipe> {
        &mut self.pipes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn world() -> World<ChaCha8Rng> {
        World::new(GameConfig::default(), ChaCha8Rng::seed_from_u64(11))
    }

    fn pipe(x: f64) -> Pipe {
        Pipe {
            x,
            width: 60.0,
            top_height: 150.0,
            bottom_y: 330.0,
            scored: false,
        }
    }

    #[test]
    fn test_new_world_has_clouds_but_no_pipes() {
        let w = world();
        assert!(w.pipes().is_empty());
        assert_eq!(w.clouds().len(), 5);
        assert_eq!(w.speed(), 2.5);
    }

    #[test]
    fn test_reset_spawns_one_pipe() {
        let mut w = world();
        w.reset();
        assert_eq!(w.pipes().len(), 1);
        assert_eq!(w.pipes()[0].x, 400.0);
    }

    #[test]
    fn test_pipes_scroll_by_speed_times_multiplier() {
        let mut w = world();
        w.pipes_mut().push(pipe(300.0));
        let mut events = Vec::new();
        w.advance(2.0, &mut events);
        assert_eq!(w.pipes()[0].x, 295.0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_scoring_happens_once_per_pipe() {
        let mut w = world();
        // Right edge at 81: one tick at 2.5 puts it behind the bird.
        w.pipes_mut().push(pipe(21.0));
        let mut events = Vec::new();
        w.advance(1.0, &mut events);
        assert_eq!(w.score(), 1);
        assert!(w.pipes()[0].scored);
        assert_eq!(
            events,
            vec![WorldEvent::Scored {
                score: 1,
                speed: 2.5
            }]
        );

        events.clear();
        w.advance(1.0, &mut events);
        assert_eq!(w.score(), 1);
        assert!(events.is_empty());
    }

    #[test]
    fn test_fifth_point_raises_speed() {
        let mut w = world();
        w.score = 4;
        w.pipes_mut().push(pipe(21.0));
        let mut events = Vec::new();
        w.advance(1.0, &mut events);
        assert_eq!(w.score(), 5);
        assert_eq!(w.speed(), 3.0);
    }

    #[test]
    fn test_offscreen_pipes_are_removed_and_replaced() {
        let mut w = world();
        w.pipes_mut().push(pipe(-59.0));
        let mut events = Vec::new();
        w.advance(1.0, &mut events);
        // Old pipe left the screen; a fresh one spawned at the right edge.
        assert_eq!(w.pipes().len(), 1);
        assert_eq!(w.pipes()[0].x, 400.0);
    }

    #[test]
    fn test_spawn_waits_for_spacing() {
        let mut w = world();
        w.reset();
        let mut events = Vec::new();
        let mut ticks = 0;
        while w.pipes().len() == 1 {
            // Keep the bird hovering so nothing else interferes.
            w.bird_mut().velocity = -0.25;
            w.advance(1.0, &mut events);
            ticks += 1;
        }
        // 400 -> below 150 at 2.5 per tick.
        assert_eq!(ticks, 101);
        assert_eq!(w.pipes()[1].x, 400.0);
    }

    #[test]
    fn test_flap_emits_gold_sparks() {
        let mut w = world();
        w.flap();
        assert_eq!(w.bird().velocity, -9.0);
        assert_eq!(w.particles().sparks.len(), 5);
        assert!(w.particles().sparks.iter().all(|p| p.tint == Tint::Gold));
    }
}
