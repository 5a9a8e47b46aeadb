//! Synthesized sound effects and background music.
//!
//! Every sound is rendered once into a sample buffer with fundsp, then
//! handed to rodio whenever it plays. If no audio device is available the
//! whole module goes quiet; nothing upstream notices.

use crate::sink::SoundKind;
use fundsp::prelude::*;
use log::{info, warn};
use rodio::{OutputStream, OutputStreamHandle, Sink, Source, buffer::SamplesBuffer};

const SAMPLE_RATE: u32 = 44_100;
const MUSIC_VOLUME: f32 = 0.3;

/// Render `secs` seconds of a mono graph.
fn render(unit: &mut dyn AudioUnit, secs: f64) -> Vec<f32> {
    unit.set_sample_rate(SAMPLE_RATE as f64);
    unit.reset();
    let n = (SAMPLE_RATE as f64 * secs).round() as usize;
    (0..n).map(|_| unit.get_mono()).collect()
}

// Exponential ramps below are written as a * exp(-k t), with
// k = ln(a / b) / duration for a ramp from a to b.

/// Short downward chirp: 400 Hz to 200 Hz over 0.1s.
pub fn flap_samples() -> Vec<f32> {
    let mut unit = (lfo(|t: f32| 400.0 * (-6.931 * t).exp()) >> sine::<f32>())
        * lfo(|t: f32| 0.3 * (-34.01 * t).exp());
    render(&mut unit, 0.1)
}

/// Two-step ding: 800 Hz, then 1000 Hz after 50ms.
pub fn score_samples() -> Vec<f32> {
    let mut unit = (lfo(|t: f32| 800.0 + 200.0 * (t * 20.0).floor().min(1.0)) >> sine::<f32>())
        * lfo(|t: f32| 0.2 * (-19.97 * t).exp());
    render(&mut unit, 0.15)
}

/// Sawtooth dive from 400 Hz to 50 Hz, with a burst of noise 50ms in.
pub fn death_samples() -> Vec<f32> {
    let mut tone = (lfo(|t: f32| 400.0 * (-4.159 * t).exp()) >> saw())
        * lfo(|t: f32| 0.4 * (-7.378 * t).exp());
    let mut samples = render(&mut tone, 0.5);

    let mut crash = noise() * lfo(|t: f32| 0.3 * (-11.34 * t).exp());
    let burst = render(&mut crash, 0.3);
    let offset = (SAMPLE_RATE as f64 * 0.05) as usize;
    if samples.len() < offset + burst.len() {
        samples.resize(offset + burst.len(), 0.0);
    }
    for (i, s) in burst.into_iter().enumerate() {
        samples[offset + i] = (samples[offset + i] + s).clamp(-1.0, 1.0);
    }
    samples
}

/// A two-bar arpeggio that loops seamlessly.
pub fn music_samples() -> Vec<f32> {
    // Six notes a second: root, minor third, fifth, octave; the second bar
    // drops the root a fourth.
    let mut unit = (lfo(|t: f32| {
        let s = (t * 6.0).floor() % 4.0;
        let semis = s * (s + 5.0) / 2.0 - 5.0 * ((t * 1.5).floor() % 2.0);
        220.0 * (semis * 0.057_762).exp()
    }) >> sine::<f32>())
        * lfo(|t: f32| 0.12 * (-8.0 * (t * 6.0).fract()).exp());
    render(&mut unit, 8.0 / 6.0)
}

struct Bank {
    flap: Vec<f32>,
    score: Vec<f32>,
    death: Vec<f32>,
    music: Vec<f32>,
}

impl Bank {
    fn synthesize() -> Self {
        Self {
            flap: flap_samples(),
            score: score_samples(),
            death: death_samples(),
            music: music_samples(),
        }
    }

    fn get(&self, kind: SoundKind) -> &[f32] {
        match kind {
            SoundKind::Flap => &self.flap,
            SoundKind::Score => &self.score,
            SoundKind::Death => &self.death,
        }
    }
}

struct Output {
    // Dropping the stream stops all playback.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    bank: Bank,
}

pub struct Audio {
    output: Option<Output>,
    music: Option<Sink>,
}

impl Audio {
    /// Open the default output device. Falls back to silence on failure.
    pub fn new(muted: bool) -> Self {
        if muted {
            info!("audio muted");
            return Self::silent();
        }
        match OutputStream::try_default() {
            Ok((stream, handle)) => Self {
                output: Some(Output {
                    _stream: stream,
                    handle,
                    bank: Bank::synthesize(),
                }),
                music: None,
            },
            Err(e) => {
                warn!("no audio output, continuing silently: {e}");
                Self::silent()
            }
        }
    }

    pub fn silent() -> Self {
        Self {
            output: None,
            music: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.output.is_some()
    }

    pub fn play(&mut self, kind: SoundKind) {
        let Some(output) = &self.output else {
            return;
        };
        match Sink::try_new(&output.handle) {
            Ok(sink) => {
                let samples = output.bank.get(kind).to_vec();
                sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
                sink.detach(); // Play in background
            }
            Err(e) => warn!("could not play {kind:?} sound: {e}"),
        }
    }

    pub fn start_music(&mut self) {
        self.stop_music();
        let Some(output) = &self.output else {
            return;
        };
        match Sink::try_new(&output.handle) {
            Ok(sink) => {
                let samples = output.bank.music.clone();
                sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples).repeat_infinite());
                sink.set_volume(MUSIC_VOLUME);
                self.music = Some(sink);
            }
            Err(e) => warn!("could not start music: {e}"),
        }
    }

    /// Stop and rewind: the next start plays from the beginning.
    pub fn stop_music(&mut self) {
        if let Some(sink) = self.music.take() {
            sink.stop();
        }
    }
}
