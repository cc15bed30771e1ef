use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use crossbeam_channel::{bounded, never, select, unbounded};
use sysinfo::System;

use gesture_slides::audio_system::{AudioCue, CueManager, CueSink, SilentCues};
use gesture_slides::error::AppResult;
use gesture_slides::feed::{self, FeedItem};
use gesture_slides::input::{self, KeyBindings};
use gesture_slides::{Config, Event, FeedbackExecutor, GestureSession, NotificationDispatcher};

const LOG_TARGET_STARTUP: &str = "gesture_slides::startup";

/// Initialize tracing with file rotation
///
/// Logs are written to `<config dir>/GestureSlides/logs/`, one file per
/// day. Debug builds also log to stderr (stdout may carry piped frames in
/// some setups, so the console layer stays off it).
fn initialize_tracing() {
    use tracing_appender::rolling;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let log_dir = dirs::config_dir()
        .map(|dir| dir.join("GestureSlides").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"));

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Failed to create log directory: {}", e);
    }

    let file_appender = rolling::daily(&log_dir, "gesture-slides.log");

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true);

    #[cfg(debug_assertions)]
    {
        let console_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(console_layer)
            .init();
    }

    #[cfg(not(debug_assertions))]
    {
        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();
    }

    tracing::info!("Log directory: {}", log_dir.display());
}

fn log_runtime_environment() {
    let version = env!("CARGO_PKG_VERSION");
    let os_name = System::long_os_version()
        .or_else(System::name)
        .unwrap_or_else(|| "Unknown OS".to_string());
    let kernel = System::kernel_version().unwrap_or_else(|| "Unknown Kernel".to_string());
    let architecture = std::env::consts::ARCH;

    tracing::info!(target: LOG_TARGET_STARTUP, "Starting Gesture Slides v{} on ({})", version, architecture);
    tracing::info!(target: LOG_TARGET_STARTUP, "Operating System: {} (kernel {})", os_name, kernel);
}

/// Open the output device and preload the configured cues. Falls back to a
/// silent sink so a missing device never stops the presentation.
fn build_cue_sink(config: &Config) -> Box<dyn CueSink> {
    let mut manager = match CueManager::new() {
        Ok(manager) => manager,
        Err(e) => {
            tracing::warn!("Audio disabled: {}", e);
            return Box::new(SilentCues);
        }
    };

    let cues = [
        (AudioCue::Clap, config.audio.clap_cue_path.as_deref()),
        (AudioCue::HandsUpCheer, config.audio.hands_up_cue_path.as_deref()),
    ];
    for (cue, path) in cues {
        let Some(path) = path else {
            continue;
        };
        let loaded = config
            .resolve(path)
            .map_err(anyhow::Error::from)
            .and_then(|full| Ok(manager.load_cue(cue, &full, config.audio.volume)?));
        if let Err(e) = loaded {
            tracing::warn!("Cue {} unavailable: {:#}", cue, e);
        }
    }

    tracing::info!("Audio ready ({} cues loaded)", manager.loaded_count());
    Box::new(manager)
}

fn check_config(config: &Config) -> AppResult<()> {
    config.validate().context("Configuration is invalid")?;
    let slides = config.slide_list().context("Failed to list slides")?;
    println!("Configuration OK ({})", Config::config_dir_display());
    println!("{} slides:", slides.len());
    for slide in &slides {
        println!("  {}", slide);
    }
    KeyBindings::from_config(&config.actions, &config.input).context("Invalid key binding")?;
    Ok(())
}

fn run(config: &Config) -> AppResult<()> {
    let slides: Arc<[String]> = match config.slide_list() {
        Ok(slides) => slides.into(),
        Err(e) => {
            tracing::warn!("No slides loaded: {}", e);
            Arc::from(Vec::<String>::new())
        }
    };
    tracing::info!("{} slides", slides.len());

    let bindings = KeyBindings::from_config(&config.actions, &config.input)
        .context("Invalid key binding")?;

    let dispatcher = NotificationDispatcher::new(&config.notify);
    let executor = FeedbackExecutor::new(build_cue_sink(config), &dispatcher);
    let mut session = GestureSession::new(config, slides);

    let (command_tx, mut command_rx) = unbounded();
    let _keys = input::spawn_key_listener(bindings, command_tx);

    let (feed_tx, feed_rx) = bounded(256);
    let reader = feed::spawn_reader(io::BufReader::new(io::stdin()), feed_tx);

    tracing::info!(
        "Ready. Toggle gestures with {}, slides with {} / {}",
        config.actions.toggle_key,
        config.input.previous_slide_key,
        config.input.next_slide_key
    );

    loop {
        let events = select! {
            recv(feed_rx) -> item => match item {
                Ok(FeedItem::Tick { dt, frame }) => Some(session.tick(dt, &frame)),
                Ok(FeedItem::Command(command)) => Some(session.apply(command)),
                Err(_) => break,
            },
            recv(command_rx) -> command => command.ok().map(|command| session.apply(command)),
        };
        let Some(events) = events else {
            // Key listener gone; keep running on the input feed alone
            command_rx = never();
            continue;
        };

        for event in &events {
            match event {
                Event::SlideCompleted { .. }
                | Event::ActionsToggled { .. }
                | Event::FeedbackSuppressed { .. } => tracing::info!("{}", event.description()),
                _ => tracing::debug!("{}", event.description()),
            }
        }
        executor.execute(&events);
    }

    if reader.join().is_err() {
        tracing::error!("Input reader panicked");
    }

    for snapshot in session.snapshots() {
        tracing::info!(
            "{}: {} (detected {}, fired {}, notified {})",
            snapshot.name,
            snapshot.status,
            snapshot.detected,
            snapshot.fired,
            snapshot.notified
        );
    }
    let diagnostics = dispatcher.diagnostics();
    tracing::info!(
        "Notifications: {} queued, {} ok, {} failed, {} dropped",
        diagnostics.queued,
        diagnostics.succeeded,
        diagnostics.failed,
        diagnostics.dropped
    );

    drop(executor);
    dispatcher.shutdown();
    Ok(())
}

fn main() -> AppResult<()> {
    initialize_tracing();
    log_runtime_environment();

    let config = Config::load().context("Failed to load configuration")?;

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "--check" {
        return check_config(&config);
    }

    run(&config)
}
