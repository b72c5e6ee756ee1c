use anyhow::Result;
use clap::{CommandFactory as _, Parser as _};

use seqops::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();

    match &args.command {
        cli::Command::Version => {
            let version = option_env!("SEQOPS_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
            println!("seqops {version}");
            return Ok(());
        }
        cli::Command::Completions(opts) => {
            clap_complete::generate(
                opts.shell,
                &mut cli::Cli::command(),
                "seqops",
                &mut std::io::stdout(),
            );
            return Ok(());
        }
        _ => {}
    }

    let name = args.command.name();
    logging::init_subscriber(args.verbose, name);
    let log = logging::Logger::new(name);

    match args.command {
        cli::Command::Copy(ref opts) => commands::copy::run(&args.global, opts, &log),
        cli::Command::Fetch(ref opts) => commands::fetch::run(&args.global, opts, &log),
        cli::Command::Verify(ref opts) => commands::verify::run(&args.global, opts, &log),
        cli::Command::Stage(ref opts) => commands::stage::run(&args.global, opts, &log),
        cli::Command::Rename(ref opts) => commands::rename::run(&args.global, opts, &log),
        cli::Command::Run(ref opts) => commands::run_file::run(&args.global, opts, &log),
        cli::Command::Version | cli::Command::Completions(_) => unreachable!("handled above"),
    }
}
