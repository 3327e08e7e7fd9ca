mod capture;
mod controller;
mod error;
mod notify;
mod output;
mod session;
mod snapshot;

use anyhow::{Context, Result};
use capture::{DeviceId, NokhwaDevices};
use clap::Parser;
use controller::{Action, Controller};
use notify::ConsoleReporter;
use output::FileDownload;
use snapshot::{SnapshotCapturer, DEFAULT_SIZE};
use std::io::BufRead;
use std::ops::ControlFlow;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Camera to open first (as listed by the `devices` command)
    #[arg(short, long)]
    device: Option<String>,

    /// Directory snapshots are saved to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Snapshot width when the camera reports none
    #[arg(long, default_value_t = DEFAULT_SIZE.0, value_parser = clap::value_parser!(u32).range(1..))]
    default_width: u32,

    /// Snapshot height when the camera reports none
    #[arg(long, default_value_t = DEFAULT_SIZE.1, value_parser = clap::value_parser!(u32).range(1..))]
    default_height: u32,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("camsnap starting");
    tracing::info!("Snapshots go to {}", args.output_dir.display());

    std::fs::create_dir_all(&args.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            args.output_dir.display()
        )
    })?;

    let mut controller = Controller::new(
        NokhwaDevices::new(),
        SnapshotCapturer::new(args.default_width, args.default_height),
        FileDownload::new(&args.output_dir),
        ConsoleReporter,
    );

    let initial = args.device.map(DeviceId::new);
    if !controller.init(initial.as_ref()) {
        return Ok(());
    }

    println!("{}", controller.device_list());
    println!("Type `help` for commands");

    let result = run_commands(&mut controller);
    controller.shutdown();
    result
}

/// Read one action per line until `quit` or end of input
fn run_commands<D, O, R>(controller: &mut Controller<D, O, R>) -> Result<()>
where
    D: capture::MediaDevices,
    O: output::DownloadSink,
    R: notify::ErrorReporter,
{
    let stdin = std::io::stdin();

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read command")?;
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Action>() {
            Ok(action) => {
                if let ControlFlow::Break(()) = controller.handle(action) {
                    break;
                }
            }
            Err(message) => controller.alert(&message),
        }
    }

    Ok(())
}
