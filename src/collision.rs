use crate::bird::Bird;
use crate::config::GameConfig;
use crate::pipes::Pipe;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Ground,
    Ceiling,
    /// Index into the pipe list.
    Pipe(usize),
}

/// Bird touching the ground strip or leaving the top of the world.
///
/// Resting exactly on the ground line is not a hit.
pub fn hits_bounds(bird: &Bird, config: &GameConfig) -> Option<Collision> {
    if bird.bottom() > config.floor_y() {
        Some(Collision::Ground)
    } else if bird.y < 0.0 {
        Some(Collision::Ceiling)
    } else {
        None
    }
}

/// Bird horizontally inside the pipe but outside its gap.
pub fn hits_pipe(bird: &Bird, pipe: &Pipe) -> bool {
    pipe.overlaps(bird.x, bird.right())
        && (bird.y < pipe.top_height || bird.bottom() > pipe.bottom_y)
}

/// First collision found, if any.
pub fn detect(bird: &Bird, pipes: &[Pipe], config: &GameConfig) -> Option<Collision> {
    hits_bounds(bird, config).or_else(|| {
        pipes
            .iter()
            .position(|pipe| hits_pipe(bird, pipe))
            .map(Collision::Pipe)
    })
}
