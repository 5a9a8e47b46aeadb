//! Whole-match scenarios driven through the public API with a recording sink.

use flappy_tui::{
    Game, GameConfig, GameState, PresentationSink, Snapshot, SoundKind,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Persist(u32),
    Sound(SoundKind),
    StartMusic,
    StopMusic,
    Score(u32),
    State(GameState),
    Reveal(u32, u32),
}

#[derive(Default)]
struct RecordingSink {
    stored_best: u32,
    calls: Vec<Call>,
    renders: usize,
}

impl RecordingSink {
    fn with_best(best: u32) -> Self {
        Self {
            stored_best: best,
            ..Self::default()
        }
    }

    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    fn scores(&self) -> Vec<u32> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Score(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    fn reveals(&self) -> Vec<(u32, u32)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Reveal(s, b) => Some((*s, *b)),
                _ => None,
            })
            .collect()
    }
}

impl PresentationSink for RecordingSink {
    fn read_best_score(&mut self) -> u32 {
        self.stored_best
    }

    fn persist_best_score(&mut self, best: u32) {
        self.stored_best = best;
        self.calls.push(Call::Persist(best));
    }

    fn emit_sound(&mut self, kind: SoundKind) {
        self.calls.push(Call::Sound(kind));
    }

    fn start_music(&mut self) {
        self.calls.push(Call::StartMusic);
    }

    fn stop_music(&mut self) {
        self.calls.push(Call::StopMusic);
    }

    fn render(&mut self, _snapshot: &Snapshot<'_>) {
        self.renders += 1;
    }

    fn notify_score_changed(&mut self, score: u32) {
        self.calls.push(Call::Score(score));
    }

    fn notify_state_changed(&mut self, state: GameState) {
        self.calls.push(Call::State(state));
    }

    fn reveal_match_over(&mut self, score: u32, best: u32) {
        self.calls.push(Call::Reveal(score, best));
    }
}

fn new_game(sink: &mut RecordingSink, seed: u64) -> Game<ChaCha8Rng> {
    Game::new(GameConfig::default(), ChaCha8Rng::seed_from_u64(seed), sink)
}

/// Step without input until the match ends.
fn fall_to_death(game: &mut Game<ChaCha8Rng>, sink: &mut RecordingSink) {
    for _ in 0..1000 {
        if game.state() == GameState::Ended {
            return;
        }
        game.step(1.0, sink);
    }
    panic!("match never ended");
}

/// Keep the bird near the middle of the next gap.
fn steer(game: &mut Game<ChaCha8Rng>, sink: &mut RecordingSink) {
    let world = game.world();
    let bird = world.bird();
    let Some(pipe) = world.pipes().iter().find(|p| p.right() >= bird.x) else {
        return;
    };
    let target = pipe.top_height + pipe.gap() / 2.0;
    let (_, cy) = bird.center();
    if cy > target + 20.0 && bird.velocity >= 0.0 {
        game.flap(sink);
    }
}

#[test]
fn test_idle_frames_render_but_do_not_simulate() {
    let mut sink = RecordingSink::default();
    let mut game = new_game(&mut sink, 1);
    let bird = game.world().bird().clone();

    let mut now = 0.0;
    for _ in 0..120 {
        game.frame(now, &mut sink);
        now += 17.0;
    }

    assert_eq!(game.state(), GameState::NotStarted);
    assert_eq!(game.world().bird(), &bird);
    assert!(game.world().pipes().is_empty());
    assert_eq!(sink.renders, 119);
    assert!(sink.calls.is_empty());
}

#[test]
fn test_free_fall_ends_on_ground() {
    let mut sink = RecordingSink::with_best(7);
    let mut game = new_game(&mut sink, 2);
    assert_eq!(game.best(), 7);

    game.start(&mut sink);
    fall_to_death(&mut game, &mut sink);

    let world = game.world();
    assert!(world.bird().bottom() > world.config().floor_y());
    assert_eq!(game.score(), 0);
    assert_eq!(game.best(), 7);

    let particles = world.particles();
    assert_eq!(particles.sparks.len(), 30);
    assert_eq!(particles.splatters.len(), 20);
    assert_eq!(particles.feathers.len(), 35);

    assert_eq!(
        sink.calls,
        vec![
            Call::State(GameState::Playing),
            Call::Score(0),
            Call::StartMusic,
            Call::Sound(SoundKind::Death),
            Call::StopMusic,
            Call::State(GameState::Ended),
        ]
    );
}

#[test]
fn test_particles_keep_falling_after_the_crash() {
    let mut sink = RecordingSink::default();
    let mut game = new_game(&mut sink, 3);
    game.start(&mut sink);
    fall_to_death(&mut game, &mut sink);

    let before = game.world().particles().clone();
    let bird_y = game.world().bird().y;
    game.step(1.0, &mut sink);
    assert_ne!(game.world().particles(), &before);
    assert_eq!(game.world().bird().y, bird_y);

    for _ in 0..200 {
        game.step(1.0, &mut sink);
    }
    assert!(game.world().particles().is_empty());
}

#[test]
fn test_scoring_raises_speed_every_five_points() {
    let mut sink = RecordingSink::default();
    let mut game = new_game(&mut sink, 42);
    game.start(&mut sink);

    for _ in 0..5000 {
        if game.score() >= 5 {
            break;
        }
        steer(&mut game, &mut sink);
        game.step(1.0, &mut sink);
        assert_eq!(game.state(), GameState::Playing, "crashed at {}", game.score());
        if game.score() < 5 {
            assert_eq!(game.world().speed(), 2.5);
        }
    }

    assert_eq!(game.score(), 5);
    assert_eq!(game.world().speed(), 3.0);
    assert_eq!(sink.scores(), vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(sink.count(|c| *c == Call::Sound(SoundKind::Score)), 5);
    assert!(sink.count(|c| *c == Call::Sound(SoundKind::Flap)) > 0);

    fall_to_death(&mut game, &mut sink);
    assert_eq!(game.best(), 5);
    assert_eq!(sink.count(|c| matches!(c, Call::Persist(_))), 1);
    assert!(sink.calls.contains(&Call::Persist(5)));
}

#[test]
fn test_restart_resets_the_world() {
    let mut sink = RecordingSink::default();
    let mut game = new_game(&mut sink, 4);
    game.start(&mut sink);
    fall_to_death(&mut game, &mut sink);
    assert!(game.reveal_pending());

    game.start(&mut sink);
    let world = game.world();
    assert_eq!(game.state(), GameState::Playing);
    assert_eq!(game.generation(), 2);
    assert!(!game.reveal_pending());
    assert_eq!((world.bird().x, world.bird().y), (80.0, 250.0));
    assert_eq!(world.bird().velocity, 0.0);
    assert_eq!(game.score(), 0);
    assert_eq!(world.speed(), 2.5);
    assert_eq!(world.pipes().len(), 1);
    assert_eq!(world.pipes()[0].x, 400.0);
    assert!(world.particles().is_empty());
}

#[test]
fn test_reveal_fires_once_after_delay() {
    let mut sink = RecordingSink::default();
    let mut game = new_game(&mut sink, 5);
    let mut now = 0.0;
    game.frame(now, &mut sink);
    game.start(&mut sink);

    while game.state() != GameState::Ended {
        now += 17.0;
        game.frame(now, &mut sink);
        assert!(now < 10_000.0);
    }
    let crashed_at = now;

    while now + 17.0 < crashed_at + 1999.0 {
        now += 17.0;
        game.frame(now, &mut sink);
    }
    now = crashed_at + 1999.0;
    game.frame(now, &mut sink);
    assert!(sink.reveals().is_empty());

    now = crashed_at + 2000.0;
    game.frame(now, &mut sink);
    assert_eq!(sink.reveals(), vec![(0, 0)]);

    for _ in 0..200 {
        now += 17.0;
        game.frame(now, &mut sink);
    }
    assert_eq!(sink.reveals().len(), 1);
}

#[test]
fn test_restart_cancels_pending_reveal() {
    let mut sink = RecordingSink::default();
    let mut game = new_game(&mut sink, 6);
    let mut now = 0.0;
    game.frame(now, &mut sink);
    game.start(&mut sink);

    while game.state() != GameState::Ended {
        now += 17.0;
        game.frame(now, &mut sink);
    }
    let first_crash = now;

    now += 1000.0;
    game.frame(now, &mut sink);
    game.start(&mut sink);

    // The second match crashes too, but its reveal is not due yet.
    while now < first_crash + 2500.0 {
        now += 17.0;
        game.frame(now, &mut sink);
    }
    assert_eq!(game.state(), GameState::Ended);
    assert!(sink.reveals().is_empty());

    while now < first_crash + 5000.0 {
        now += 17.0;
        game.frame(now, &mut sink);
    }
    assert_eq!(sink.reveals().len(), 1);
}

#[test]
fn test_flap_after_crash_is_ignored() {
    let mut sink = RecordingSink::default();
    let mut game = new_game(&mut sink, 7);
    game.start(&mut sink);
    fall_to_death(&mut game, &mut sink);

    let calls = sink.calls.len();
    game.flap(&mut sink);
    assert_eq!(game.state(), GameState::Ended);
    assert_eq!(sink.calls.len(), calls);
}

#[test]
fn test_fall_speed_follows_wall_clock() {
    let tick = GameConfig::default().tick_ms;
    let gravity = GameConfig::default().gravity;

    for (frame_ms, frames) in [(17.0, 20), (25.0, 12), (16.0, 24)] {
        let mut sink = RecordingSink::default();
        let mut game = new_game(&mut sink, 8);
        game.frame(0.0, &mut sink);
        game.start(&mut sink);

        let mut now = 0.0;
        for _ in 0..frames {
            now += frame_ms;
            game.frame(now, &mut sink);
        }
        assert_eq!(game.state(), GameState::Playing);

        let expected = gravity * now / tick;
        let velocity = game.world().bird().velocity;
        assert!(
            (velocity - expected).abs() <= gravity + 1e-9,
            "{frame_ms}ms frames: velocity {velocity}, wall clock says {expected}"
        );
    }
}
