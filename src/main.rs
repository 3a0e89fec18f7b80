use clap::{Parser as ClapParser, Subcommand};
use mathexpr::cli::{self, CheckOptions, CliError, Command};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "mathexpr")]
#[command(about = "mathexpr - Parse and inspect math expressions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the syntax of an expression
    Check {
        /// The expression (reads from stdin if not provided)
        expression: Option<String>,
    },

    /// Print the canonical form of an expression
    Render {
        /// The expression (reads from stdin if not provided)
        expression: Option<String>,
    },

    /// Print the syntax tree as JSON
    Ast {
        /// The expression (reads from stdin if not provided)
        expression: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Print the scanned tokens as JSON
    Tokens {
        /// The expression (reads from stdin if not provided)
        expression: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let (command, expression, pretty) = match cli.command {
        Commands::Check { expression } => (Command::Check, expression, false),
        Commands::Render { expression } => (Command::Render, expression, false),
        Commands::Ast { expression, pretty } => (Command::Ast, expression, pretty),
        Commands::Tokens { expression, pretty } => (Command::Tokens, expression, pretty),
    };

    if let Err(e) = run(command, expression, pretty) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(command: Command, expression: Option<String>, pretty: bool) -> Result<(), CliError> {
    let expression = match expression {
        Some(s) => s,
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            // The newline `echo` appends would otherwise wrap the tree in a block
            buffer.trim_end_matches(['\n', '\r']).to_string()
        }
        None => return Err(CliError::NoInput),
    };

    let options = CheckOptions {
        command,
        expression,
        pretty,
    };

    let result = cli::execute(&options)?;
    println!("{}", result.to_output(pretty)?);
    Ok(())
}
