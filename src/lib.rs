//! A Flappy Bird clone for the terminal.
//!
//! The crate is split into a deterministic simulation core (everything but
//! [`frontend`]) and a terminal presentation sink that draws with half-block
//! pixels and synthesizes its own sound effects.

pub mod bird;
pub mod clock;
pub mod clouds;
pub mod collision;
pub mod config;
pub mod frontend;
pub mod game;
pub mod particles;
pub mod pipes;
pub mod sink;
pub mod timer;
pub mod world;

pub use bird::Bird;
pub use clock::Stepper;
pub use clouds::Cloud;
pub use collision::Collision;
pub use config::{GROUND_HEIGHT, GameConfig, TICK_MS, WORLD_HEIGHT, WORLD_WIDTH};
pub use game::{Game, GameState};
pub use particles::{Particle, Particles, Tint};
pub use pipes::Pipe;
pub use sink::{NullSink, PresentationSink, Snapshot, SoundKind};
pub use world::{World, WorldEvent};
