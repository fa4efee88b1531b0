use clap::Parser;
use tracing_subscriber::EnvFilter;
use ui_scenarios::cli::commands::{cmd_list, cmd_run};
use ui_scenarios::cli::config::{Cli, Commands, apply_run_overrides, load_config};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Run {
            scenarios,
            format,
            output,
            headless,
            webdriver_url,
            trace,
        } => {
            let config = apply_run_overrides(
                config,
                format.as_deref(),
                output.as_deref(),
                headless,
                webdriver_url.as_deref(),
                trace.as_deref(),
            );
            let all_passed = cmd_run(&scenarios, &config)?;
            if !all_passed {
                std::process::exit(1);
            }
        }
        Commands::List => cmd_list(),
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise `-v` picks the level.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
