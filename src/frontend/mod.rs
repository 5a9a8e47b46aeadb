//! Terminal presentation: half-block graphics, synthesized audio and
//! best-score persistence behind a single [`PresentationSink`].

pub mod audio;
pub mod canvas;
pub mod draw;
pub mod store;

use crate::game::GameState;
use crate::sink::{PresentationSink, Snapshot, SoundKind};
use audio::Audio;
use canvas::Canvas;
use draw::Overlay;
use log::warn;
use std::io::{self, Write};
use store::BestScoreStore;

pub struct TerminalSink<W: Write> {
    out: W,
    canvas: Canvas,
    audio: Audio,
    store: Option<BestScoreStore>,
    overlay: Overlay,
    /// First terminal write failure, for the caller to act on.
    error: Option<io::Error>,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(
        out: W,
        cols: u16,
        rows: u16,
        audio: Audio,
        store: Option<BestScoreStore>,
    ) -> Self {
        Self {
            out,
            canvas: Canvas::for_terminal(cols, rows),
            audio,
            store,
            overlay: Overlay::default(),
            error: None,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.canvas.resize(cols as usize, rows as usize * 2);
    }

    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PresentationSink for TerminalSink<W> {
    fn read_best_score(&mut self) -> u32 {
        self.store.as_ref().map_or(0, BestScoreStore::load)
    }

    fn persist_best_score(&mut self, best: u32) {
        if let Some(store) = &self.store {
            if let Err(e) = store.save(best) {
                warn!("could not save best score to {}: {e}", store.path().display());
            }
        }
    }

    fn emit_sound(&mut self, kind: SoundKind) {
        self.audio.play(kind);
    }

    fn start_music(&mut self) {
        self.audio.start_music();
    }

    fn stop_music(&mut self) {
        self.audio.stop_music();
    }

    fn render(&mut self, snapshot: &Snapshot<'_>) {
        if self.error.is_some() {
            return;
        }
        draw::draw_frame(&mut self.canvas, snapshot, &self.overlay);
        if let Err(e) = self.canvas.render(&mut self.out) {
            warn!("terminal write failed: {e}");
            self.error = Some(e);
        }
    }

    fn notify_state_changed(&mut self, state: GameState) {
        match state {
            GameState::Playing => {
                self.overlay.show_score = true;
                self.overlay.match_over = None;
            }
            GameState::NotStarted | GameState::Ended => self.overlay.show_score = false,
        }
    }

    fn reveal_match_over(&mut self, score: u32, best: u32) {
        self.overlay.match_over = Some((score, best));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;
    use crate::config::GameConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sink() -> TerminalSink<Vec<u8>> {
        TerminalSink::new(Vec::new(), 40, 30, Audio::silent(), None)
    }

    #[test]
    fn test_overlay_follows_match() {
        let mut sink = sink();
        let mut game = Game::new(GameConfig::default(), ChaCha8Rng::seed_from_u64(1), &mut sink);
        game.start(&mut sink);
        assert!(sink.overlay().show_score);

        game.world_mut().bird_mut().y = 480.0;
        game.step(1.0, &mut sink);
        assert!(!sink.overlay().show_score);
        assert_eq!(sink.overlay().match_over, None);

        sink.reveal_match_over(game.score(), game.best());
        assert_eq!(sink.overlay().match_over, Some((0, 0)));

        game.start(&mut sink);
        assert_eq!(sink.overlay().match_over, None);
    }

    #[test]
    fn test_render_writes_frame() {
        let mut sink = sink();
        let mut game = Game::new(GameConfig::default(), ChaCha8Rng::seed_from_u64(1), &mut sink);
        game.frame(0.0, &mut sink);
        game.frame(20.0, &mut sink);
        assert!(sink.take_error().is_none());
        assert!(!sink.into_inner().is_empty());
    }
}
