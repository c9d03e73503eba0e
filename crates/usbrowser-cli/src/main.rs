use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use usbrowser_cli::commands::open::{self, OpenOptions};
use usbrowser_cli::{OutputFormat, config_paths, validate_url};
use usbrowser_core::HostSource;

#[derive(Parser)]
#[command(name = "usbrowser")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "URL Specific Browser Launcher",
    long_about = "Opens a URL in the browser profile whose rules match it. Profiles are read \
                  from /etc/usbrowser.yaml and then ~/.config/usbrowser.yaml; the first \
                  matching rule wins, otherwise the default profile is used."
)]
struct Cli {
    /// URL starting with 'http://' or 'https://'
    #[arg(value_name = "URL", value_parser = validate_url)]
    url: String,

    /// More verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debugging logs
    #[arg(short, long)]
    debug: bool,

    /// Read these config files, in order, instead of the default locations
    #[arg(short, long, value_name = "FILE")]
    config: Vec<PathBuf>,

    /// Match `domain` rules against the full authority (user@host:port)
    #[arg(long)]
    match_authority: bool,

    /// Print the selected command instead of launching it
    #[arg(long)]
    dry_run: bool,

    /// Output format for --dry-run
    #[arg(short, long, value_enum, default_value = "pretty")]
    format: OutputFormat,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if e.use_stderr() {
                init_logging(false, false);
                tracing::error!("Rejected command line: {:?}", e.kind());
            }
            e.exit();
        }
    };

    // Initialize logging
    init_logging(cli.verbose, cli.debug);

    let options = OpenOptions {
        config_paths: if cli.config.is_empty() {
            config_paths()
        } else {
            cli.config
        },
        host_source: if cli.match_authority {
            HostSource::Authority
        } else {
            HostSource::Hostname
        },
        dry_run: cli.dry_run,
        format: cli.format,
    };

    match open::execute(&cli.url, options) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool, debug: bool) {
    use tracing_subscriber::EnvFilter;

    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "usbrowser={level},usbrowser_cli={level},usbrowser_core={level},usbrowser_launch={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
