use crate::config::GameConfig;

const MIN_ROTATION: f64 = -30.0;
const MAX_ROTATION: f64 = 90.0;
const ROTATION_PER_VELOCITY: f64 = 3.0;

/// Wing swing speed set by a flap (radians/tick, negative = downstroke).
const WING_FLAP_SPEED: f64 = -0.25;
const WING_RECOVERY: f64 = 0.05;
const WING_REST_ANGLE: f64 = 0.3;

#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    /// Left edge. Constant for the whole match.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Vertical velocity, positive = downward.
    pub velocity: f64,
    pub gravity: f64,
    pub jump: f64,
    /// Degrees, derived from velocity. Cosmetic.
    pub rotation: f64,
    pub wing_angle: f64,
    pub wing_speed: f64,
}

impl Bird {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            x: config.bird_x,
            y: config.bird_y,
            width: config.bird_width,
            height: config.bird_height,
            velocity: 0.0,
            gravity: config.gravity,
            jump: config.jump,
            rotation: 0.0,
            wing_angle: WING_REST_ANGLE,
            wing_speed: 0.0,
        }
    }

    /// Advance one scaled tick of gravity and wing motion.
    pub fn integrate(&mut self, dt: f64) {
        self.velocity += self.gravity * dt;
        self.y += self.velocity * dt;
        self.rotation = (self.velocity * ROTATION_PER_VELOCITY).clamp(MIN_ROTATION, MAX_ROTATION);

        self.wing_angle += self.wing_speed * dt;
        self.wing_speed += WING_RECOVERY * dt;
        if self.wing_angle >= WING_REST_ANGLE {
            self.wing_angle = WING_REST_ANGLE;
            self.wing_speed = 0.0;
        }
    }

    /// Upward impulse. Velocity is replaced, not added to.
    pub fn flap(&mut self) {
        self.velocity = self.jump;
        self.wing_speed = WING_FLAP_SPEED;
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}
