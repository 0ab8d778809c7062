//! testprep CLI - make an existing React or Vue project test-ready

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use testprep_core::logging::{init_logging, LoggingConfig};
use testprep_core::{
    LogProgress, ProgressSink, RunContext, RunSummary, SetupOrchestrator, ShellExecutor,
    SpinnerProgress,
};

#[derive(Parser, Debug)]
#[command(name = "testprep")]
#[command(about, version)]
#[command(arg_required_else_help = true)]
pub struct Args {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Install jest and wire it into the project
    Init(InitArgs),
    /// Update a previously initialized project
    Update,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Project directory containing package.json (defaults to the current directory)
    #[arg(short, long)]
    pub path: Option<PathBuf>,
}

/// Spinners on a terminal, plain log lines otherwise
fn progress_sink() -> Box<dyn ProgressSink> {
    if console::Term::stderr().is_term() {
        Box::new(SpinnerProgress::new())
    } else {
        Box::new(LogProgress)
    }
}

async fn run_init(args: InitArgs) -> Result<bool> {
    let interactive = console::Term::stderr().is_term();
    if interactive {
        cliclack::intro(env!("CARGO_PKG_NAME"))?;
    }

    let cwd = std::env::current_dir()?;
    let ctx = match RunContext::resolve(&cwd, args.path.as_deref()) {
        Ok(ctx) => ctx,
        Err(e) => {
            if interactive {
                cliclack::outro_cancel(e.to_string())?;
            } else {
                eprintln!("{} {}", "error:".red().bold(), e);
            }
            return Ok(false);
        }
    };

    let progress = progress_sink();
    let executor = ShellExecutor;
    let result = SetupOrchestrator::new(ctx, &executor, progress.as_ref())
        .run()
        .await;

    match result {
        Ok(summary) => {
            print_next_steps(&summary);
            if interactive {
                cliclack::outro("Project is test-ready")?;
            }
            Ok(true)
        }
        Err(_) => {
            // The sink has already reported the failure
            if interactive {
                cliclack::outro_cancel("Setup stopped")?;
            }
            Ok(false)
        }
    }
}

fn print_next_steps(summary: &RunSummary) {
    let test_command = summary.package_manager.run_script_command("test");

    println!();
    println!("  Next steps");
    println!();
    println!("  1.  Add a *.test.js file next to your code");
    println!("  2.  Run {}", test_command.cyan());
    println!(
        "  3.  Adjust {} if needed",
        summary.config_path.display().to_string().dimmed()
    );
    println!();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    init_logging(LoggingConfig::from_verbosity(args.verbose))?;

    match args.command {
        Some(Command::Init(init_args)) => {
            let succeeded = run_init(init_args).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            if !succeeded? {
                std::process::exit(1);
            }
            Ok(())
        }
        Some(Command::Update) => {
            let progress = progress_sink();
            testprep_core::update::run(progress.as_ref());
            Ok(())
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_init_path_flag() {
        let args = Args::try_parse_from(["testprep", "init", "--path", "web"]).unwrap();
        match args.command {
            Some(Command::Init(init)) => assert_eq!(init.path, Some(PathBuf::from("web"))),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_init_without_path() {
        let args = Args::try_parse_from(["testprep", "init"]).unwrap();
        assert!(matches!(args.command, Some(Command::Init(InitArgs { path: None }))));
    }

    #[test]
    fn test_update_subcommand() {
        let args = Args::try_parse_from(["testprep", "-vv", "update"]).unwrap();
        assert!(matches!(args.command, Some(Command::Update)));
        assert_eq!(args.verbose, 2);
    }
}
