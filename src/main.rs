use anyhow::Result;
use clap::Parser;
use noisefetch::fetch::{FetchConfig, fetch};
use noisefetch::http::HttpClient;
use noisefetch::runtime::RealRuntime;
use noisefetch::target::{TargetError, TargetOs, validate_arch};
use reqwest::Client;
use std::path::PathBuf;
use std::process;

/// noisefetch - build-time fetcher for the ss14_noise native library
///
/// Keeps a version-pinned copy of the prebuilt ss14_noise binary in the
/// repository dependency cache and copies it into the build output directory
/// whenever the output copy is missing or stale.
///
/// Invoked by the build system as:
///   noisefetch x64 <Windows|Linux|MacOS> <output dir>
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Build architecture; only "x64" binaries are published upstream
    #[arg(value_name = "ARCH")]
    arch: String,

    /// Target operating system: Windows, Linux or MacOS
    #[arg(value_name = "TARGET_OS")]
    target_os: String,

    /// Build output directory. MSBuild's Exec task splits a path containing
    /// spaces into separate arguments; all remaining tokens are rejoined
    /// with single spaces to recover the path.
    #[arg(value_name = "TARGET_DIR", required = true, num_args = 1..)]
    target_dir: Vec<String>,
}

impl Cli {
    /// The destination directory with any shell-split tokens rejoined.
    fn target_dir_path(&self) -> PathBuf {
        PathBuf::from(self.target_dir.join(" "))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if let Err(err) = run(&cli).await {
        // The two configuration errors carry their own exit codes; anything
        // else propagates with its full error chain.
        if let Some(target_err) = err.downcast_ref::<TargetError>() {
            eprintln!("Error: {}", target_err);
            process::exit(target_err.exit_code());
        }
        return Err(err);
    }
    Ok(())
}

async fn run(cli: &Cli) -> Result<()> {
    validate_arch(&cli.arch)?;
    let os: TargetOs = cli.target_os.parse()?;

    let runtime = RealRuntime;
    let config = FetchConfig::resolve(&runtime)?;
    let http_client = HttpClient::new(Client::new());

    fetch(&runtime, &config, os, &cli.target_dir_path(), &http_client).await
}
