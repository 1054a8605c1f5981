//! ifc command - query and configure network interfaces.

mod commands;
mod output;

use clap::{Parser, Subcommand};
use ifconfig::Handle;

use output::{OutputFormat, OutputOptions};

#[derive(Parser)]
#[command(name = "ifc", version, about = "Network interface configuration tool")]
struct Cli {
    /// Output JSON.
    #[arg(short = 'j', long, global = true)]
    json: bool,

    /// Pretty print JSON.
    #[arg(short = 'p', long, global = true)]
    pretty: bool,

    /// List every supported medium.
    #[arg(short = 'm', long, global = true)]
    verbose: bool,

    /// Limit the number of cached sockets (address families).
    #[arg(long, global = true)]
    max_sockets: Option<usize>,

    /// Reissue variable-length queries at most this many times.
    #[arg(long, global = true)]
    retries: Option<usize>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Show interface status.
    #[command(visible_alias = "s", visible_alias = "show")]
    Status(commands::status::StatusCmd),

    /// Show media information.
    Media(commands::media::MediaCmd),

    /// Set interface attributes.
    Set(commands::set::SetCmd),

    /// Create a cloned interface.
    Create(commands::clone::CreateCmd),

    /// Destroy a cloned interface.
    Destroy(commands::clone::DestroyCmd),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let opts = OutputOptions {
        pretty: cli.pretty,
        verbose: cli.verbose,
    };

    let mut builder = Handle::builder();
    if let Some(max) = cli.max_sockets {
        builder = builder.max_sockets(max);
    }
    if let Some(retries) = cli.retries {
        builder = builder.resize_retries(retries);
    }
    let mut handle = builder.build();

    let result = match cli.command {
        Some(Command::Status(cmd)) => cmd.run(&mut handle, format, &opts),
        Some(Command::Media(cmd)) => cmd.run(&mut handle, format, &opts),
        Some(Command::Set(cmd)) => cmd.run(&mut handle),
        Some(Command::Create(cmd)) => cmd.run(&mut handle, format, &opts),
        Some(Command::Destroy(cmd)) => cmd.run(&mut handle),
        None => commands::status::StatusCmd::default().run(&mut handle, format, &opts),
    };

    if let Err(e) = result {
        tracing::debug!(state = ?handle.last_error(), "command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    handle.close();
    Ok(())
}
