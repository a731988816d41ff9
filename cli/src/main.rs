use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::OnceLock;
use std::time::SystemTime;

use anyhow::{Context, Result};
use chainkeys_core::{KeyType, KeysDocument};
use clap::{CommandFactory, Parser};

mod util;

fn main() -> ExitCode {
    let app = match App::try_parse() {
        Ok(app) => app,
        // Help and version requests.
        Err(err) if !err.use_stderr() => {
            err.print().ok();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            err.print().ok();
            eprintln!("\n{}", App::command().render_help());
            return ExitCode::FAILURE;
        }
    };

    match app.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Generate EVM, Solana or Sui keypairs and save them into a JSON file.
#[derive(Parser)]
#[clap(name = "chainkeys")]
#[clap(version = version_string())]
struct App {
    /// key type
    #[clap(short = 't', long = "type", value_enum)]
    key_type: KeyType,

    /// number of keypairs to generate
    #[clap(
        short,
        long,
        default_value_t = 1,
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    count: u32,

    /// directory to write the keys file into
    #[clap(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// path to a JSON map of logger targets (overrides `RUST_LOG`)
    #[clap(long)]
    logger_config: Option<PathBuf>,
}

impl App {
    fn run(self) -> Result<()> {
        util::logger::init_logger(self.logger_config.as_deref())?;

        let count = self.count as usize;
        tracing::debug!(key_type = %self.key_type, count, "started");
        let keypairs = chainkeys_core::generate_batch_par(self.key_type, count)?;

        let document = KeysDocument::new(self.key_type, SystemTime::now(), keypairs);
        let path = document
            .save_to_dir(&self.output_dir)
            .context("failed to save keys")?;

        println!(
            "Successfully generated {count} {} keypairs and saved to {}",
            self.key_type,
            path.display()
        );
        Ok(())
    }
}

fn version_string() -> &'static str {
    static STRING: OnceLock<String> = OnceLock::new();
    STRING.get_or_init(|| format!("(release {CHAINKEYS_VERSION}) (rustc {RUSTC_VERSION})"))
}

static CHAINKEYS_VERSION: &str = env!("CHAINKEYS_VERSION");
static RUSTC_VERSION: &str = env!("CHAINKEYS_RUSTC_VERSION");
