//! Cosmetic particle effects.
//!
//! Three populations live side by side: `sparks` (small bursts on flap and
//! score, plus the radial blood spray on death), `splatters` (falling blood
//! decals) and `feathers` (drifting, air-braked decals). None of them ever
//! touch collision or scoring, but they keep animating after a crash.

use rand::Rng;
use std::f64::consts::TAU;

/// Colour family of a particle. The frontend decides the actual shade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tint {
    Gold,
    Green,
    DarkRed,
    Crimson,
    Blood,
    Yellow,
    Cream,
    Orange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Remaining lifetime in ticks.
    pub life: f64,
    pub tint: Tint,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub spin: f64,
    /// Downward acceleration per tick, if the particle falls.
    pub gravity: Option<f64>,
    /// Per-tick multiplier on horizontal velocity.
    pub drag: Option<f64>,
}

impl Particle {
    fn new(x: f64, y: f64, vx: f64, vy: f64, life: f64, tint: Tint, size: f64) -> Self {
        Self {
            x,
            y,
            vx,
            vy,
            life,
            tint,
            width: size,
            height: size,
            rotation: 0.0,
            spin: 0.0,
            gravity: None,
            drag: None,
        }
    }

    /// Advance by a scaled tick. Returns false once the particle has expired.
    pub fn tick(&mut self, dt: f64) -> bool {
        self.x += self.vx * dt;
        self.y += self.vy * dt;
        if let Some(g) = self.gravity {
            self.vy += g * dt;
        }
        if let Some(drag) = self.drag {
            // Frame-rate independent.
            self.vx *= drag.powf(dt);
        }
        self.rotation += self.spin * dt;
        self.life -= dt;
        self.life > 0.0
    }
}

// ── Bursts ──────────────────────────────────────────────────────────────────

pub const SPARK_COUNT: usize = 5;
pub const SPARK_LIFE: f64 = 25.0;
pub const SPRAY_COUNT: usize = 30;
pub const SPLATTER_COUNT: usize = 20;
pub const SPLATTER_LIFE: f64 = 90.0;
pub const YELLOW_FEATHER_COUNT: usize = 20;
pub const ORANGE_FEATHER_COUNT: usize = 15;
pub const FEATHER_LIFE: f64 = 80.0;

const BLOOD_GRAVITY: f64 = 0.6;
const FEATHER_GRAVITY: f64 = 0.4;
const FEATHER_DRAG: f64 = 0.98;

fn spread<R: Rng>(rng: &mut R, half: f64) -> f64 {
    rng.gen_range(-half..half)
}

fn between<R: Rng>(rng: &mut R, lo: f64, span: f64) -> f64 {
    lo + rng.gen_range(0.0..span)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Particles {
    pub sparks: Vec<Particle>,
    pub splatters: Vec<Particle>,
    pub feathers: Vec<Particle>,
}

impl Particles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance every population and drop expired particles.
    pub fn update(&mut self, dt: f64) {
        for population in [&mut self.sparks, &mut self.splatters, &mut self.feathers] {
            population.retain_mut(|p| p.tick(dt));
        }
    }

    pub fn clear(&mut self) {
        self.sparks.clear();
        self.splatters.clear();
        self.feathers.clear();
    }

    pub fn len(&self) -> usize {
        self.sparks.len() + self.splatters.len() + self.feathers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Small puff of sparks, used for flap and score feedback.
    pub fn burst<R: Rng>(&mut self, x: f64, y: f64, tint: Tint, rng: &mut R) {
        for _ in 0..SPARK_COUNT {
            let vx = spread(rng, 2.0);
            let vy = spread(rng, 2.0);
            let size = between(rng, 3.0, 2.0);
            self.sparks
                .push(Particle::new(x, y, vx, vy, SPARK_LIFE, tint, size));
        }
    }

    /// The crash: a radial blood spray, falling splatters and two colours of feathers.
    pub fn explode<R: Rng>(&mut self, x: f64, y: f64, rng: &mut R) {
        for i in 0..SPRAY_COUNT {
            let angle = TAU * i as f64 / SPRAY_COUNT as f64;
            let speed = between(rng, 3.0, 5.0);
            let life = between(rng, 60.0, 30.0);
            let tint = if rng.gen_bool(0.5) {
                Tint::DarkRed
            } else {
                Tint::Crimson
            };
            let size = between(rng, 2.0, 4.0);
            let mut drop = Particle::new(
                x,
                y,
                angle.cos() * speed,
                angle.sin() * speed - 3.0,
                life,
                tint,
                size,
            );
            drop.gravity = Some(BLOOD_GRAVITY);
            self.sparks.push(drop);
        }

        for _ in 0..SPLATTER_COUNT {
            let px = x + spread(rng, 20.0);
            let py = y + spread(rng, 10.0);
            let vx = spread(rng, 4.0);
            let vy = -between(rng, 2.0, 6.0);
            let size = between(rng, 4.0, 6.0);
            let mut splat = Particle::new(px, py, vx, vy, SPLATTER_LIFE, Tint::Blood, size);
            splat.height = size * 0.7;
            splat.rotation = rng.gen_range(0.0..TAU);
            splat.spin = spread(rng, 0.15);
            splat.gravity = Some(BLOOD_GRAVITY);
            self.splatters.push(splat);
        }

        for _ in 0..YELLOW_FEATHER_COUNT {
            let tint = if rng.gen_bool(0.7) {
                Tint::Yellow
            } else {
                Tint::Cream
            };
            let vx = spread(rng, 4.0);
            let vy = -between(rng, 2.0, 6.0);
            let width = between(rng, 6.0, 4.0);
            let height = between(rng, 10.0, 6.0);
            self.feathers
                .push(feather(x, y, vx, vy, tint, width, height, rng));
        }

        for _ in 0..ORANGE_FEATHER_COUNT {
            let vx = spread(rng, 3.5);
            let vy = -between(rng, 1.0, 5.0);
            let width = between(rng, 5.0, 3.0);
            let height = between(rng, 8.0, 5.0);
            self.feathers
                .push(feather(x, y, vx, vy, Tint::Orange, width, height, rng));
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn feather<R: Rng>(
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    tint: Tint,
    width: f64,
    height: f64,
    rng: &mut R,
) -> Particle {
    Particle {
        x,
        y,
        vx,
        vy,
        life: FEATHER_LIFE,
        tint,
        width,
        height,
        rotation: rng.gen_range(0.0..TAU),
        spin: spread(rng, 0.2),
        gravity: Some(FEATHER_GRAVITY),
        drag: Some(FEATHER_DRAG),
    }
}
