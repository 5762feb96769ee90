//! qview-term: drive the command overlay in a terminal.
//!
//! The terminal plays the image window: a placeholder block stands in for the
//! image, and the overlay is drawn on top of it exactly as it would be over a
//! real picture.
use std::{
    fs::File,
    io, panic,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{Context, Result};
use clap::Parser;
use color_backtrace::{BacktracePrinter, default_output_stream};
use crossterm::{ExecutableCommand, cursor as ccursor, event as cevent, terminal};
use qview_overlay::{
    Config, EditorState, Event, Outcome,
    geom::Expanse,
    surface::{Refresh, Surface},
};
use scopeguard::defer;
use tracing::{debug, info};
use tracing_subscriber::fmt;

mod host;
mod keys;

use host::TermHost;

/// CLI flags.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Image names to cycle through.
    #[clap(default_values = ["1.jpg", "2.jpg", "3.jpg"])]
    images: Vec<String>,

    /// JSON configuration file.
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// External command program, overriding the configuration.
    #[clap(long)]
    command: Option<String>,

    /// Move the cursor to reported tag errors.
    #[clap(long)]
    tag_error_pos: bool,

    /// F2 to F10 run `:f2` to `:f10`.
    #[clap(long)]
    f_commands: bool,

    /// Return runs `:enter`.
    #[clap(long)]
    enter_command: bool,

    /// Write logs to this file.
    #[clap(long)]
    log: Option<PathBuf>,
}

impl Args {
    /// Build the overlay configuration from the file and flags.
    fn config(&self) -> Result<Config> {
        let mut cfg = match &self.config {
            Some(p) => Config::load(p).with_context(|| format!("loading {}", p.display()))?,
            None => Config::default(),
        };
        if let Some(c) = &self.command {
            cfg = cfg.with_command(c.clone());
        }
        if self.tag_error_pos {
            cfg = cfg.with_tag_error_pos(true);
        }
        if self.f_commands {
            cfg = cfg.with_f_commands(true);
        }
        if self.enter_command {
            cfg = cfg.with_enter_command(true);
        }
        Ok(cfg)
    }
}

/// Send logs to `path`. The terminal belongs to the UI, so without a log file
/// nothing is logged.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let format = fmt::format()
        .with_level(true)
        .with_line_number(true)
        .with_ansi(false)
        .without_time()
        .compact();
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_max_level(tracing::Level::TRACE)
        .event_format(format)
        .init();
    Ok(())
}

/// Put the terminal back the way we found it.
#[allow(unused_must_use)]
fn restore_terminal() {
    let mut stderr = io::stderr();
    stderr.execute(terminal::LeaveAlternateScreen);
    stderr.execute(ccursor::Show);
    terminal::disable_raw_mode();
}

/// Run the event loop until the overlay or the viewer asks to quit.
fn runloop(config: Config, images: Vec<String>) -> Result<()> {
    terminal::enable_raw_mode()?;
    io::stderr()
        .execute(terminal::EnterAlternateScreen)?
        .execute(ccursor::Hide)?;
    defer! {
        restore_terminal();
    }
    panic::set_hook(Box::new(|pi| {
        restore_terminal();
        #[allow(unused_must_use)]
        {
            BacktracePrinter::new().print_panic_info(pi, &mut default_output_stream());
        }
    }));

    let (w, h) = terminal::size()?;
    let mut host = TermHost::new(
        Expanse::new(u32::from(w), u32::from(h)),
        images,
        &config.command,
    );
    let mut state = EditorState::new(config);
    host.refresh(Refresh::Full)?;
    host.flush()?;

    loop {
        let Some(event) = keys::translate_event(cevent::read()?) else {
            continue;
        };
        if let Event::Resize(size) = event {
            host.resize(size);
            host.refresh(Refresh::Full)?;
            host.flush()?;
        }
        if state.handle_event(&mut host, &event)? == Outcome::Quit {
            debug!("quit");
            return Ok(());
        }
    }
}

/// Parse flags, set up logging and run.
fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log {
        init_logging(path)?;
    }
    let config = args.config()?;
    info!(?config, images = args.images.len(), "starting");
    runloop(config, args.images)
}
