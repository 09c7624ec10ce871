pub mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{enable_raw_mode, EnterAlternateScreen},
    tty::IsTty,
};
use kegel::{
    config::{Config, ConfigStore, FileConfigStore},
    controller::SessionController,
    cue::{CueEmitter, TerminalBell},
    error::{Error, Result},
    logging,
    plan::ExercisePlan,
    runtime::{handle_event, CrosstermEventSource, EventSource, FixedTicker, Flow, Runner, Ticker},
    util::format_duration,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use serde::Serialize;
use std::{
    io::{self, stdin},
    path::PathBuf,
    time::Instant,
};

use crate::ui::TerminalRenderer;

/// guided pelvic-floor exercise timer for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Guides you through sets of timed contractions and rests, with an audible cue at every transition."
)]
pub struct Cli {
    /// seconds of rest between sets (overrides the config file)
    #[clap(long, value_parser = clap::value_parser!(u32).range(1..))]
    set_rest: Option<u32>,

    /// start with sound cues muted
    #[clap(long)]
    mute: bool,

    /// path to a JSON config file (default: platform config dir)
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// print the effective exercise plan as JSON and exit
    #[clap(long)]
    print_plan: bool,

    /// write the effective settings to the config file and exit
    #[clap(long, conflicts_with = "print_plan")]
    write_config: bool,
}

impl Cli {
    fn store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    /// Config file values with command-line overrides applied.
    fn settings(&self) -> Result<Config> {
        let mut cfg = self.store().load()?;
        if let Some(secs) = self.set_rest {
            cfg.set_rest_secs = secs;
        }
        if self.mute {
            cfg.sound = false;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

#[derive(Debug, Serialize)]
struct PlanReport<'a> {
    set_rest_secs: u32,
    total_secs: u64,
    total: String,
    sets: &'a ExercisePlan,
}

impl<'a> PlanReport<'a> {
    fn new(cfg: &'a Config) -> Self {
        let total_secs = cfg.plan.total_secs(cfg.set_rest_secs);
        Self {
            set_rest_secs: cfg.set_rest_secs,
            total_secs,
            total: format_duration(total_secs),
            sets: &cfg.plan,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let cfg = cli.settings()?;

    if cli.print_plan {
        println!("{}", serde_json::to_string_pretty(&PlanReport::new(&cfg))?);
        return Ok(());
    }

    if cli.write_config {
        let store = cli.store();
        store.save(&cfg)?;
        println!("wrote {}", store.path().display());
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Err(e) = logging::init() {
        eprintln!("warning: {e}");
    }
    install_panic_hook();

    let _guard = TerminalGuard::enter()?;
    let terminal = Terminal::new(CrosstermBackend::new(io::stdout())).map_err(Error::terminal)?;

    let renderer = TerminalRenderer::new(terminal, cfg.plan.clone(), cfg.set_rest_secs);
    let cues = TerminalBell::stdout(cfg.sound);
    let mut session = SessionController::new(cfg.plan, cfg.set_rest_secs, cues, renderer);

    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
    start_tui(&mut session, &runner);
    tracing::info!("kegel exiting");

    Ok(())
}

/// Raw mode and the alternate screen, held for as long as the guard lives.
///
/// Dropping it restores the terminal on every exit path, including a failed
/// setup half way through.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().map_err(Error::terminal)?;
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen).map_err(Error::terminal)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        ratatui::restore();
    }
}

/// Restore the terminal before the default hook prints the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));
}

fn start_tui<C, B, E, T>(
    session: &mut SessionController<C, TerminalRenderer<B>>,
    runner: &Runner<E, T>,
) where
    C: CueEmitter,
    B: Backend,
    E: EventSource,
    T: Ticker,
{
    session.refresh();

    loop {
        match handle_event(session, runner.step(), Instant::now()) {
            Flow::Continue => {}
            Flow::Redraw => session.renderer_mut().redraw(),
            Flow::Quit => break,
        }
    }
}
