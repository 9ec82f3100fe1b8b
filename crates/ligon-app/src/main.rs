mod assets;
mod cli;
mod headless;
mod logging;
mod preview;

use std::fs;
use std::io;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{anyhow, Context};
use clap::Parser;
use ligon_lang::{Error, FrameConfig, RuntimeState};

use assets::AssetDir;
use cli::Cli;
use headless::HeadlessBackend;
use logging::{init_logging, LoggingConfig};

// ─── Exit status ──────────────────────────────────────────────────────────────

/// A failed run: the process exit code and what caused it.
struct Failure {
    code: u8,
    error: anyhow::Error,
}

impl Failure {
    const PARSE: u8 = 1;
    /// Unreadable script: permissions, a directory, non-UTF-8 bytes.
    const UNREADABLE: u8 = 1;
    const NOT_FOUND: u8 = 2;
    const NO_BACKEND: u8 = 3;

    fn new(code: u8, error: anyhow::Error) -> Self {
        Self { code, error }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(LoggingConfig::from_cli(&cli));

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            log::error!("{:#}", failure.error);
            ExitCode::from(failure.code)
        }
    }
}

// ─── Run ──────────────────────────────────────────────────────────────────────

fn run(cli: &Cli) -> Result<(), Failure> {
    let source = read_source(&cli.file)?;

    let setup = ligon_lang::setup(&source)
        .with_context(|| format!("failed to parse {}", cli.file.display()))
        .map_err(|e| Failure::new(Failure::PARSE, e))?;
    check_warnings(cli, &setup.warnings)?;

    let mut state = setup.state;
    summarize(&state);

    if !state.is_2d() {
        log::debug!("mode `{}`: setup only", state.mode);
        return Ok(());
    }

    let dir = AssetDir::for_script(&cli.file);
    let diagnostics = match cli.headless {
        Some(ticks) => {
            let mut backend = HeadlessBackend::new(dir, ticks);
            let config = FrameConfig { paced: false, ..FrameConfig::default() };
            let stats = ligon_lang::run(&mut state, &mut backend, config)
                .map_err(|e| Failure::new(Failure::NO_BACKEND, e.into()))?;
            for sprite in &state.sprites {
                log::info!("sprite `{}` at ({:.3}, {:.3})", sprite.name, sprite.position.x, sprite.position.y);
            }
            stats.diagnostics
        }
        None => preview::run_preview(state, dir, FrameConfig::default())
            .map_err(|e| Failure::new(Failure::NO_BACKEND, anyhow!("no rendering backend available: {e}")))?,
    };
    check_warnings(cli, &diagnostics)
}

fn read_source(path: &Path) -> Result<String, Failure> {
    fs::read_to_string(path).map_err(|e| {
        let (code, what) = match e.kind() {
            io::ErrorKind::NotFound    => (Failure::NOT_FOUND, "file not found"),
            io::ErrorKind::InvalidData => (Failure::UNREADABLE, "script is not valid UTF-8"),
            _                          => (Failure::UNREADABLE, "failed to read script"),
        };
        Failure::new(code, anyhow::Error::new(e).context(format!("{what}: {}", path.display())))
    })
}

/// Warnings are informational unless `--strict` is set.
fn check_warnings(cli: &Cli, warnings: &[Error]) -> Result<(), Failure> {
    if warnings.is_empty() {
        return Ok(());
    }
    if cli.strict {
        for w in warnings {
            log::error!("{w}");
        }
        return Err(Failure::new(Failure::PARSE, anyhow!("{} warning(s) in strict mode", warnings.len())));
    }
    for w in warnings {
        log::debug!("{w}");
    }
    log::info!("{} warning(s); rerun with -v for details", warnings.len());
    Ok(())
}

fn summarize(state: &RuntimeState) {
    log::info!("mode: {}", state.mode);
    if let Some((name, w)) = state.main_window() {
        log::info!("window `{name}`: {}x{}", w.width, w.height);
    }
    log::debug!(
        "{} rect(s), {} sprite(s), {} binding(s), {} service(s), {} model(s)",
        state.rectangles.len(),
        state.sprites.len(),
        state.key_bindings.len(),
        state.services.len(),
        state.models.len(),
    );
}
