//! mote entrypoint.
use anyhow::Result;
use clap::Parser;
use core_actions::{KeyTranslator, handle_key, io_ops};
use core_config::Config;
use core_input::{ByteSource, ChannelSource, InputPump, spawn_stdin_reader};
use core_render::{RenderPipeline, Viewport};
use core_state::EditorState;
use core_terminal::{CrosstermBackend, ScreenSize};
use std::io::{Write, stdout};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE_NAME: &str = "mote.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "mote", version, about = "A minimal terminal text editor")]
struct Args {
    /// File to edit. Created on first save if it does not exist.
    pub path: Option<PathBuf>,
    /// Configuration file path (overrides discovery of `mote.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join(LOG_FILE_NAME);
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }
    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .with_ansi(false)
        .try_init()
        .ok()
        .map(|_| guard)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

/// Build the session from CLI args and config. Open errors other than a
/// missing file are fatal.
fn load_session(path: Option<&Path>, config: &Config) -> Result<EditorState> {
    let mut state = EditorState::empty().with_tab_stop(config.tab_stop());
    if let Some(path) = path {
        io_ops::load_into(&mut state, path)?;
    }
    Ok(state)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopControl {
    Continue,
    Quit,
}

/// One editing session bound to a viewport and renderer. Terminal access is
/// passed in per step so tests can drive it with in-memory sources and sinks.
struct EditorRuntime {
    state: EditorState,
    translator: KeyTranslator,
    pipeline: RenderPipeline,
    viewport: Viewport,
    pump: InputPump,
}

impl EditorRuntime {
    fn new(state: EditorState, config: &Config) -> Self {
        Self {
            state,
            translator: KeyTranslator::new(config.letter_motions()),
            pipeline: RenderPipeline::new(config.status_name_width()),
            viewport: Viewport::default(),
            pump: InputPump::new(),
        }
    }

    /// Scroll to the cursor and paint one frame.
    fn paint<W: Write>(&mut self, size: ScreenSize, out: &mut W) -> Result<()> {
        self.state.tick_ephemeral();
        self.viewport.resize(size.text_rows(), size.cols());
        self.viewport
            .scroll(self.state.cursor.cy, self.state.cursor_visual_col());
        self.pipeline.render(&self.state, &self.viewport, out)
    }

    /// Gather input (one bounded wait), then dispatch every queued key.
    fn handle_input<S: ByteSource + ?Sized>(&mut self, src: &mut S) -> Result<LoopControl> {
        self.pump.pump(src)?;
        while let Some(key) = self.pump.pop() {
            let res = handle_key(&self.translator, key, &mut self.state, self.viewport.rows)?;
            if res.quit {
                return Ok(LoopControl::Quit);
            }
        }
        Ok(LoopControl::Continue)
    }

    fn log_exit(&self) {
        let (keys, noops) = self.pump.decoder().counters();
        debug!(
            target: "runtime",
            frames = self.pipeline.frames(),
            last_render_ns = self.pipeline.last_render_ns(),
            keys,
            noops,
            "event_loop_exit"
        );
    }

    fn step<S, W>(&mut self, size: ScreenSize, src: &mut S, out: &mut W) -> Result<LoopControl>
    where
        S: ByteSource + ?Sized,
        W: Write,
    {
        self.paint(size, out)?;
        self.handle_input(src)
    }
}

fn run(args: Args) -> Result<()> {
    let config = core_config::load_from(args.config.clone())?;
    let state = load_session(args.path.as_deref(), &config)?;
    info!(
        target: "runtime.startup",
        path = args.path.as_ref().map(|p| p.display().to_string()).as_deref(),
        lines = state.buffer.line_count(),
        config_override = args.config.is_some(),
        "bootstrap_complete"
    );

    let mut backend = CrosstermBackend::new();
    let guard = backend.enter_guard()?;
    let (reader, rx) = spawn_stdin_reader()?;
    let mut src = ChannelSource::new(rx, config.read_timeout());
    let mut runtime = EditorRuntime::new(state, &config);
    let mut out = stdout();

    let span = tracing::debug_span!(target: "runtime", "event_loop");
    let _enter = span.enter();
    loop {
        let size = guard.size()?;
        if runtime.step(size, &mut src, &mut out)? == LoopControl::Quit {
            break;
        }
    }
    runtime.log_exit();
    // The reader blocks in `read` until the next keystroke; only reap it when
    // it has already stopped on its own.
    if reader.is_finished() {
        match reader.join() {
            Ok(reason) => debug!(target: "runtime", ?reason, "input_reader_joined"),
            Err(_) => tracing::warn!(target: "runtime", "input_reader_panicked"),
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", "startup");
    let res = run(Args::parse());
    match &res {
        Ok(()) => info!(target: "runtime", "shutdown"),
        Err(e) => tracing::error!(target: "runtime", error = %e, "fatal"),
    }
    res
}
