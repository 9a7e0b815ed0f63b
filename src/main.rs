use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gaitwatch::config::parse_patients;
use gaitwatch::data::duration::parse_duration;
use gaitwatch::app::export_store;
use gaitwatch::{events, ui};
use gaitwatch::{App, FileSource, HttpSource, Poller, SampleSource, Settings, Store};

#[derive(Parser, Debug)]
#[command(name = "gaitwatch")]
#[command(about = "Live terminal dashboard for pressure-insole patient telemetry")]
struct Args {
    /// TOML settings file
    #[arg(short, long, env = "GAITWATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Monitoring endpoint; readings are fetched from {endpoint}/{patient}
    #[arg(long)]
    endpoint: Option<String>,

    /// Comma-separated patient ids (e.g., "1,2,5")
    #[arg(short, long)]
    patients: Option<String>,

    /// Delay between polls (e.g., "200ms")
    #[arg(long)]
    poll_interval: Option<String>,

    /// How long readings are kept (e.g., "600s", "10m")
    #[arg(long)]
    retention: Option<String>,

    /// UI refresh interval (e.g., "1s")
    #[arg(short, long)]
    refresh: Option<String>,

    /// HTTP request timeout (e.g., "5s")
    #[arg(long)]
    timeout: Option<String>,

    /// Replay readings from {dir}/{patient}.json instead of polling HTTP
    #[arg(long, value_name = "DIR")]
    replay: Option<PathBuf>,

    /// Log file used while the TUI is running
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Poll every patient once, export the buffer to a JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = resolve_settings(&args)?;

    init_tracing(&settings, args.export.is_some())?;

    let store = Store::new();
    let source = build_source(&settings)?;
    let poller = Poller::new(source.clone(), store.clone(), settings.patients.clone())
        .interval(settings.poll_interval)
        .retention(settings.retention);

    let rt = tokio::runtime::Runtime::new()?;

    // Handle export mode (non-interactive)
    if let Some(ref export_path) = args.export {
        let summary = rt.block_on(poller.poll_once());
        info!(?summary, "polled once for export");
        let count = export_store(&store, export_path)?;
        println!("Exported {} patients to: {}", count, export_path.display());
        return Ok(());
    }

    let handle = {
        let _guard = rt.enter();
        poller.spawn()
    };

    let mut app = App::new(store, settings.patients.clone(), source.description())
        .window(settings.retention);
    let result = run_tui(&mut app, settings.refresh);

    rt.block_on(handle.shutdown());
    result
}

/// Layer command-line flags over file and environment settings.
fn resolve_settings(args: &Args) -> Result<Settings> {
    let mut settings = Settings::load(args.config.as_deref())?;

    let duration = |flag: &str, value: &str| {
        parse_duration(value).with_context(|| format!("Invalid --{}: {:?}", flag, value))
    };

    if let Some(ref endpoint) = args.endpoint {
        settings.endpoint = endpoint.clone();
    }
    if let Some(ref patients) = args.patients {
        settings.patients = parse_patients(patients)?;
    }
    if let Some(ref value) = args.poll_interval {
        settings.poll_interval = duration("poll-interval", value)?;
    }
    if let Some(ref value) = args.retention {
        settings.retention = duration("retention", value)?;
    }
    if let Some(ref value) = args.refresh {
        settings.refresh = duration("refresh", value)?;
    }
    if let Some(ref value) = args.timeout {
        settings.request_timeout = duration("timeout", value)?;
    }
    if let Some(ref dir) = args.replay {
        settings.replay_dir = Some(dir.clone());
    }
    if let Some(ref path) = args.log_file {
        settings.log_file = path.clone();
    }

    settings.validate()?;
    Ok(settings)
}

/// Log to stderr in export mode, otherwise to the log file so output does
/// not corrupt the alternate screen.
fn init_tracing(settings: &Settings, to_stderr: bool) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gaitwatch=info"));

    if to_stderr {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    } else {
        let file = File::create(&settings.log_file).with_context(|| {
            format!("Failed to create log file {}", settings.log_file.display())
        })?;
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .init();
    }

    Ok(())
}

fn build_source(settings: &Settings) -> Result<Arc<dyn SampleSource>> {
    let source: Arc<dyn SampleSource> = match settings.replay_dir {
        Some(ref dir) => Arc::new(FileSource::new(dir)),
        None => Arc::new(
            HttpSource::builder()
                .endpoint(settings.endpoint.as_str())
                .timeout(settings.request_timeout)
                .build()
                .context("Failed to build HTTP client")?,
        ),
    };
    info!(source = source.description(), "using sample source");
    Ok(source)
}

/// Run the TUI on the current thread until the user quits.
fn run_tui(app: &mut App, refresh_interval: Duration) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    app.refresh();

    let result = run_app(&mut terminal, app, refresh_interval);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh_interval: Duration,
) -> Result<()> {
    let mut last_refresh = Instant::now();

    while app.running {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    events::handle_key_event(app, key)
                }
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse, ui::TABS_ROW),
                _ => {}
            }
        }

        if last_refresh.elapsed() >= refresh_interval {
            app.refresh();
            last_refresh = Instant::now();
        }
    }

    info!("user quit");
    Ok(())
}
