use std::fs::File;
use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ci_version::agents::BuildAgentResolver;
use ci_version::config;
use ci_version::environment::ProcessEnvironment;
use ci_version::output;
use ci_version::VersionVariables;

#[derive(Parser)]
#[command(
    name = "ci-version",
    version,
    about = "Emit version variables and build numbers in your CI runner's command syntax"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, global = true, help = "Enable debug logging")]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the name of the detected build agent
    Detect,

    /// Print the current branch ref if the CI environment exposes it
    Branch {
        #[arg(long, help = "Repository is cloned dynamically")]
        dynamic_repos: bool,
    },

    /// Print whether a git fetch should be skipped
    PreventFetch,

    /// Print the commands that expose a single output variable
    SetParameter { name: String, value: String },

    /// Print the command that updates the CI build number
    SetVersion {
        #[arg(long, help = "Version variables JSON file, or '-' for stdin")]
        variables: String,
    },

    /// Print the build number update and every variable
    Integrate {
        #[arg(long, help = "Version variables JSON file, or '-' for stdin")]
        variables: String,

        #[arg(long, help = "Do not emit the build number update")]
        no_update_build_number: bool,
    },
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("ci_version=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("ci_version=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();
}

fn read_variables(path: &str) -> Result<VersionVariables> {
    let variables = if path == "-" {
        VersionVariables::from_reader(io::stdin().lock())
    } else {
        let file = File::open(path)
            .with_context(|| format!("Cannot open '{}'", path))?;
        VersionVariables::from_reader(file)
    };
    variables
        .with_context(|| format!("Invalid version variables in '{}'", path))
}

fn main() {
    let args = Args::parse();
    init_tracing(args.debug);

    match run(args) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            output::display_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    }
}

fn run(args: Args) -> Result<i32> {
    let config = config::load_config(args.config.as_deref())
        .context("Error loading config")?;
    let resolver = BuildAgentResolver::new(Arc::new(ProcessEnvironment::new()), &config);
    let agent = resolver.resolve();

    match args.command {
        Command::Detect => {
            output::display_agent_summary(agent.name(), agent.prevent_fetch());
            println!("{}", agent.name());
        }
        Command::Branch { dynamic_repos } => match agent.get_current_branch(dynamic_repos) {
            Some(branch) => println!("{}", branch),
            None => {
                output::display_status(&format!(
                    "{} does not expose a branch; use git to detect it",
                    agent.name()
                ));
                return Ok(1);
            }
        },
        Command::PreventFetch => println!("{}", agent.prevent_fetch()),
        Command::SetParameter { name, value } => {
            output::display_commands(&agent.generate_set_parameter_message(&name, &value));
        }
        Command::SetVersion { variables } => {
            let variables = read_variables(&variables)?;
            let message = agent.generate_set_version_message(&variables);
            if !message.is_empty() {
                println!("{}", message);
            }
        }
        Command::Integrate {
            variables,
            no_update_build_number,
        } => {
            let variables = read_variables(&variables)?;
            let update_build_number = config.agent.update_build_number && !no_update_build_number;
            let stdout = io::stdout();
            agent
                .write_integration(&mut stdout.lock(), &variables, update_build_number)
                .context("Failed to write integration output")?;
        }
    }

    Ok(0)
}
