//! SatlinkIO - telemetry link daemon for a small-satellite ground station
//!
//! ## Process layout
//!
//! - One dedicated worker runs the UDP telemetry receive loop for the life of
//!   the process.
//! - A second worker reads operator command tokens from stdin and relays each
//!   as one outbound datagram (fire-and-forget, separate socket).
//! - The main thread is a presentation collaborator: it snapshots the link
//!   state once a second and logs acquisition/loss transitions.
//!
//! Shutdown: Ctrl-C clears the running flag; the receive loop notices within
//! its 1 s socket timeout and exits, then the process joins it and stops.

use satlink_io::config::Config;
use satlink_io::error::Result;
use satlink_io::link::{CommandDispatcher, LinkStateStore, TelemetryReceiver};
use satlink_io::protocol::Command;
use satlink_io::radio;
use std::env;
use std::io::BufRead;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Parse config path from command line arguments.
///
/// Supports:
/// - `satlink-io <path>` (positional)
/// - `satlink-io --config <path>` (flag-based)
/// - `satlink-io -c <path>` (short flag)
///
/// Defaults to `/etc/satlink.toml` if not specified.
fn parse_config_path() -> String {
    let args: Vec<String> = env::args().collect();

    for i in 1..args.len() {
        if (args[i] == "--config" || args[i] == "-c") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }

    if args.len() > 1 && !args[1].starts_with('-') {
        return args[1].clone();
    }

    "/etc/satlink.toml".to_string()
}

fn main() -> Result<()> {
    // Load configuration before the logger so the configured level applies
    let config_path = parse_config_path();
    let config = if Path::new(&config_path).exists() {
        Config::from_file(&config_path)?
    } else {
        Config::defaults()
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    log::info!("SatlinkIO starting...");
    log::info!("Using config: {}", config_path);

    // Shared link state: written by the receiver, read by everyone else
    let store = Arc::new(LinkStateStore::new(config.link.timeout()));

    // Shutdown signal, checked by every loop
    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        r.store(false, Ordering::Relaxed);
    })
    .map_err(|e| satlink_io::Error::Other(format!("Error setting Ctrl-C handler: {}", e)))?;

    // =========================================================================
    // Telemetry receiver (dedicated worker, owns the ingest socket)
    // =========================================================================
    // Bind failure aborts here, before any loop starts
    let receiver = TelemetryReceiver::bind(
        &config.network.telemetry_bind,
        config.link.protocol,
        &config.link.device_tag,
        Arc::clone(&store),
        Arc::clone(&running),
    )?;
    log::info!(
        "Telemetry ingest on {} ({:?} protocol, {:?} liveness timeout)",
        config.network.telemetry_bind,
        config.link.protocol,
        config.link.timeout()
    );

    // Decoded frames also go to a logging consumer over a channel, so an
    // archiver can be attached without touching the receive path
    let (frame_tx, frame_rx) = crossbeam_channel::unbounded();
    let receiver = receiver.with_events(frame_tx);
    let rx_handle = receiver.spawn()?;

    let _frame_log_handle = thread::Builder::new()
        .name("frame-log".to_string())
        .spawn(move || {
            for update in frame_rx.iter() {
                log::debug!("Telemetry update: {:?}", update);
            }
        })
        .map_err(|e| satlink_io::Error::Other(format!("Failed to spawn frame logger: {}", e)))?;

    // =========================================================================
    // Command dispatch (operator tokens from stdin, one datagram each)
    // =========================================================================
    let dispatcher = Arc::new(CommandDispatcher::new(
        config.network.command_destination_addr()?,
    )?);
    log::info!("Command dispatch to {}", dispatcher.destination());

    let cmd_dispatcher = Arc::clone(&dispatcher);
    let cmd_running = Arc::clone(&running);
    let _cmd_handle = thread::Builder::new()
        .name("command-tx".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                if !cmd_running.load(Ordering::Relaxed) {
                    break;
                }
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        log::warn!("stdin read error: {}", e);
                        break;
                    }
                };
                let token = line.trim();
                if token.is_empty() {
                    continue;
                }
                if let Err(e) = cmd_dispatcher.send(&Command::parse(token)) {
                    log::error!("Command dispatch failed: {}", e);
                }
            }
            log::debug!("Command input closed");
        })
        .map_err(|e| satlink_io::Error::Other(format!("Failed to spawn command reader: {}", e)))?;

    // Optional radio front end (mock unless a live backend is wired in)
    let mut radio_frontend = if config.radio.enabled {
        Some(radio::create_radio(&config.radio)?)
    } else {
        None
    };

    log::info!("SatlinkIO running. Press Ctrl-C to stop.");

    // Main loop - presentation collaborator logging link transitions
    let mut was_connected = false;
    while running.load(Ordering::Relaxed) {
        thread::sleep(Duration::from_secs(1));

        let snapshot = store.snapshot();
        if snapshot.connected != was_connected {
            if snapshot.connected {
                log::info!(
                    "Link acquired: {:.2} V, {:.3} A, {:.1} C, msg {:?}",
                    snapshot.telemetry.voltage,
                    snapshot.telemetry.current,
                    snapshot.telemetry.temperature,
                    snapshot.telemetry.message
                );
            } else {
                log::warn!(
                    "Link lost (no telemetry for {:?})",
                    store.timeout()
                );
            }
            was_connected = snapshot.connected;
        }
    }

    // Shutdown
    log::info!("Shutting down...");
    if let Err(e) = rx_handle.join() {
        log::error!("Receiver thread panicked: {:?}", e);
    }
    if let Some(radio) = radio_frontend.as_mut() {
        radio.close()?;
    }

    let counters = store.counters();
    log::info!(
        "SatlinkIO stopped ({} frames applied, {} dropped, {} commands sent)",
        counters.frames_received.load(Ordering::Relaxed),
        counters.decode_failures.load(Ordering::Relaxed),
        dispatcher.sent_count()
    );
    Ok(())
}
