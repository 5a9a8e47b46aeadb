use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, MouseEventKind},
    execute, terminal,
};
use flappy_tui::{
    Game, GameConfig,
    frontend::{TerminalSink, audio::Audio, store::BestScoreStore},
};
use log::{info, warn};
use rand::{SeedableRng, rngs::StdRng};
use std::fs::File;
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Seed for pipe gaps, clouds and particles
    #[arg(long)]
    seed: Option<u64>,

    /// Disable sound effects and music
    #[arg(long)]
    mute: bool,

    /// Frames per second to poll at
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    fps: u32,

    /// Directory holding the best score
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Write log records to this file
    #[arg(long, value_name = "FILE")]
    log: Option<PathBuf>,
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    // The terminal is ours while playing; logs only go to a file.
    if let Some(path) = &cli.log {
        init_logging(path)?;
    }

    let store = match BestScoreStore::new(cli.data_dir.clone()) {
        Ok(store) => Some(store),
        Err(e) => {
            warn!("best score will not be saved: {e}");
            None
        }
    };
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    terminal::enable_raw_mode()?;
    let mut out = stdout();
    execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::DisableLineWrap,
        event::EnableMouseCapture,
    )?;

    let result = run(&cli, rng, store);

    execute!(
        out,
        event::DisableMouseCapture,
        terminal::LeaveAlternateScreen,
        cursor::Show,
        terminal::EnableLineWrap,
    )?;
    terminal::disable_raw_mode()?;
    result
}

fn run(cli: &Cli, rng: StdRng, store: Option<BestScoreStore>) -> io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut sink = TerminalSink::new(stdout(), cols, rows, Audio::new(cli.mute), store);
    let mut game = Game::new(GameConfig::default(), rng, &mut sink);
    info!("best score {}", game.best());

    let frame_dur = Duration::from_secs_f64(1.0 / cli.fps as f64);
    let epoch = Instant::now();

    loop {
        let frame_start = Instant::now();

        // Input
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char(' ') | KeyCode::Up => game.flap(&mut sink),
                    KeyCode::Enter | KeyCode::Char('r') => game.start(&mut sink),
                    _ => {}
                },
                Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
                    game.flap(&mut sink)
                }
                Event::Resize(c, r) => sink.resize(c, r),
                _ => {}
            }
        }

        game.frame(epoch.elapsed().as_secs_f64() * 1000.0, &mut sink);
        if let Some(e) = sink.take_error() {
            return Err(e);
        }

        // Frame pacing
        let elapsed = frame_start.elapsed();
        if elapsed < frame_dur {
            std::thread::sleep(frame_dur - elapsed);
        }
    }
}
