use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use kestrel::config::{load_config, HarnessConfig};
use kestrel::trace::{compare_traces, load_trace, record_trace, save_trace};

fn setup_file_logging(keep_count: usize) -> String {
    // Create logs directory if it doesn't exist
    let log_dir = PathBuf::from("logs");
    if !log_dir.exists() {
        fs::create_dir_all(&log_dir).expect("Failed to create logs directory");
    }

    // Clean up old log files, keeping only the most recent runs
    cleanup_old_logs(&log_dir, keep_count);

    // Generate timestamped filename
    let now = chrono::Local::now();
    let log_filename = format!("kestrel_{}.log", now.format("%Y%m%d_%H%M%S"));
    let log_file_path = log_dir.join(&log_filename);
    let log_path_str = log_file_path.to_string_lossy().to_string();

    // Create file appender with timestamped filename
    let file_appender = RollingFileAppender::new(
        Rotation::NEVER, // Don't rotate during a single run
        &log_dir,
        &log_filename,
    );

    // Create a formatting layer for the file
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false); // No ANSI colors in file

    // Create a formatting layer for stdout (minimal)
    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(false);

    // Set up the subscriber with both layers
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kestrel=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    log_path_str
}

fn cleanup_old_logs(log_dir: &PathBuf, keep_count: usize) {
    if let Ok(entries) = fs::read_dir(log_dir) {
        let mut log_files: Vec<_> = entries
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .file_name()
                    .and_then(|n| n.to_str())
                    .map(|s| s.starts_with("kestrel") && s.ends_with(".log"))
                    .unwrap_or(false)
            })
            .collect();

        // Sort by modified time (oldest first)
        log_files.sort_by_key(|e| e.metadata().ok().and_then(|m| m.modified().ok()));

        // Delete oldest files if we exceed keep_count
        if log_files.len() > keep_count {
            for file in log_files.iter().take(log_files.len() - keep_count) {
                let _ = fs::remove_file(file.path());
            }
        }
    }
}

fn run_record(config: &HarnessConfig, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        "[TRACE] Recording sweep: seed={:#X}, {} samples per op",
        config.seed, config.samples_per_op
    );
    let trace = record_trace(config.seed, config.samples_per_op);
    save_trace(path, &trace)?;
    info!("[TRACE] Wrote {} op digests to {}", trace.ops.len(), path);
    Ok(())
}

fn run_compare(ours_path: &str, theirs_path: &str) -> Result<bool, Box<dyn std::error::Error>> {
    let ours = load_trace(ours_path)?;
    let theirs = load_trace(theirs_path)?;
    let mismatches = compare_traces(&ours, &theirs);
    if mismatches.is_empty() {
        info!(
            "[TRACE] {} ops bit-identical between {} and {}",
            ours.ops.len(),
            ours_path,
            theirs_path
        );
        return Ok(true);
    }
    for m in &mismatches {
        error!(
            "[TRACE] {} diverged: {:#018X} vs {:#018X}",
            m.op, m.ours, m.theirs
        );
    }
    Ok(false)
}

fn run_check(config: &HarnessConfig) -> bool {
    info!("[TRACE] Self-check: recording the sweep twice in-process");
    let first = record_trace(config.seed, config.samples_per_op);
    let second = record_trace(config.seed, config.samples_per_op);
    let mismatches = compare_traces(&first, &second);
    if mismatches.is_empty() {
        info!("[TRACE] Self-check passed: {} ops stable", first.ops.len());
        true
    } else {
        for m in &mismatches {
            error!("[TRACE] {} unstable across runs", m.op);
        }
        false
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  kestrel record [path]      Record a golden trace (default path from harness.ron)");
    eprintln!("  kestrel compare <a> <b>    Compare two recorded traces");
    eprintln!("  kestrel check              Record twice in-process and compare");
}

fn main() -> ExitCode {
    let config = match load_config("harness.ron") {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load harness.ron: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let log_file = setup_file_logging(config.log_keep_count);
    info!("Kestrel determinism harness - logging to {}", log_file);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match args.first().map(String::as_str) {
        Some("record") => {
            let path = args.get(1).cloned().unwrap_or_else(|| config.trace_path.clone());
            match run_record(&config, &path) {
                Ok(()) => true,
                Err(e) => {
                    error!("[TRACE] Record failed: {}", e);
                    false
                }
            }
        }
        Some("compare") => match (args.get(1), args.get(2)) {
            (Some(a), Some(b)) => match run_compare(a, b) {
                Ok(identical) => identical,
                Err(e) => {
                    error!("[TRACE] Compare failed: {}", e);
                    false
                }
            },
            _ => {
                print_usage();
                false
            }
        },
        Some("check") | None => run_check(&config),
        Some(other) => {
            warn!("Unknown command '{}'", other);
            print_usage();
            false
        }
    };

    if result {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
