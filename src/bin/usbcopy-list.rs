use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use usbcopy::config::{default_library_path, DEFAULT_SYMBOL};
use usbcopy::{fetch_listing, BridgeConfig};

const OUTPUT_LABEL: &str = "Got back ";

/// Print the USB device listing produced by the usbcopy native library.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the native library
    #[arg(short, long, env = "USBCOPY_LIBRARY", default_value_os_t = default_library_path())]
    library: PathBuf,

    /// Exported listing function
    #[arg(short, long, env = "USBCOPY_SYMBOL", default_value = DEFAULT_SYMBOL)]
    symbol: String,

    /// Exported function that frees the returned listing
    #[arg(short, long, env = "USBCOPY_RELEASE_SYMBOL")]
    release_symbol: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}
impl Cli {
    fn config(&self) -> BridgeConfig {
        let config = BridgeConfig::new(&self.library).with_symbol(&self.symbol);
        match &self.release_symbol {
            Some(name) => config.with_release_symbol(name),
            None => config,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    match fetch_listing(&cli.config()) {
        Ok(listing) => {
            println!("{} {}", OUTPUT_LABEL, listing);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {} failed: {}", e.stage(), e);
            ExitCode::FAILURE
        }
    }
}
