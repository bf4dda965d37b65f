use std::cell::Cell;
use std::io::{BufRead, IsTerminal, Write};
use std::rc::Rc;

use clap::{Args, Parser, Subcommand};
use cli_parser_core::{CommandDef, Interface, InterfaceConfig, OptionDef, ParseOutcome, Sink};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Parser)]
#[command(name = "cli-parser")]
#[command(about = "Dispatch command lines through a demo command interface")]
struct Cli {
    /// Program name shown by the `help` command.
    #[arg(long, default_value = "cli-parser")]
    name: String,
    /// Interface settings as inline JSON (e.g. '{"name":"demo","version":"1.0"}').
    #[arg(long)]
    config: Option<String>,
    /// Do not give commands an automatic -h/--help option.
    #[arg(long)]
    no_auto_help: bool,
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Dispatch one line given as arguments (e.g. `run echo -t hello`).
    Run(RunArgs),
    /// Read lines from stdin and dispatch each one until `exit` or EOF.
    Repl(ReplArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Command name followed by its options and arguments.
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    line: Vec<String>,
}

#[derive(Debug, Args)]
struct ReplArgs {
    /// Prompt printed before each line when stdin is a terminal.
    #[arg(long, default_value = "> ")]
    prompt: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = interface_config(&cli).and_then(|config| {
        let exit = Rc::new(Cell::new(false));
        let interface = build_interface(config, Rc::clone(&exit))?;
        match cli.mode {
            Mode::Run(args) => run_line(&interface, &args.line.join(" ")),
            Mode::Repl(args) => run_repl(&interface, &args.prompt, &exit),
        }
    });

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn interface_config(cli: &Cli) -> Result<InterfaceConfig, String> {
    let mut config = match &cli.config {
        Some(raw) => serde_json::from_str::<InterfaceConfig>(raw)
            .map_err(|err| format!("Invalid --config JSON: {err}"))?,
        None => InterfaceConfig {
            name: cli.name.clone(),
            version: PACKAGE_VERSION.to_string(),
            description: "Demo command interface".to_string(),
            ..InterfaceConfig::default()
        },
    };
    if cli.no_auto_help {
        config.auto_help = false;
    }
    Ok(config)
}

/// Registers the demo commands and routes all output to stdout.
fn build_interface(config: InterfaceConfig, exit: Rc<Cell<bool>>) -> Result<Interface, String> {
    let mut interface = Interface::new(config);
    interface.add_sink(&Sink::new(|data| println!("{data}")));

    interface
        .command(
            "echo",
            CommandDef::new()
                .with_description("Print the arguments")
                .with_params("[text]...")
                .with_option(OptionDef::new(Some('t'), Some("twice")).with_description("Print twice")),
        )
        .map_err(|e| e.to_string())?
        .callback(|inv| {
            let text = inv.args().join(" ");
            inv.emit(&text);
            if inv.options().has("twice") {
                inv.emit(&text);
            }
            Ok(())
        });

    interface
        .command(
            "scream",
            CommandDef::new()
                .with_description("Print the arguments in upper case")
                .with_params("[text]...")
                .with_option(
                    OptionDef::new(Some('s'), Some("strength"))
                        .with_param("N")
                        .with_description("Number of exclamation marks"),
                ),
        )
        .map_err(|e| e.to_string())?
        .callback(|inv| {
            let strength = inv.options().parse::<usize>("strength").transpose()?.unwrap_or(1);
            let text = inv.args().join(" ").to_uppercase();
            inv.emit(&format!("{text}{}", "!".repeat(strength)));
            Ok(())
        });

    interface
        .command(
            "sum",
            CommandDef::new()
                .with_description("Add numbers")
                .with_params("<n>..."),
        )
        .map_err(|e| e.to_string())?
        .callback(|inv| {
            let mut total = 0.0;
            for arg in inv.args() {
                total += arg
                    .parse::<f64>()
                    .map_err(|err| format!("'{arg}' is not a number: {err}"))?;
            }
            inv.emit(&total.to_string());
            Ok(())
        });

    interface
        .command(
            "exit",
            CommandDef::new().with_description("Leave the read loop"),
        )
        .map_err(|e| e.to_string())?
        .callback(move |_| {
            exit.set(true);
            Ok(())
        });

    Ok(interface)
}

fn run_line(interface: &Interface, line: &str) -> Result<(), String> {
    let outcome = interface.parse(line).map_err(|e| e.to_string())?;
    debug!(?outcome, "line dispatched");
    Ok(())
}

fn run_repl(interface: &Interface, prompt: &str, exit: &Cell<bool>) -> Result<(), String> {
    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();

    loop {
        if interactive {
            print!("{prompt}");
            std::io::stdout()
                .flush()
                .map_err(|err| format!("Failed to flush stdout: {err}"))?;
        }

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .map_err(|err| format!("Failed to read stdin: {err}"))?;
        if read == 0 {
            break;
        }

        match interface.parse(&line) {
            Ok(ParseOutcome::Dispatched { command, invoked }) => {
                debug!(command, invoked, "line dispatched");
            }
            Ok(ParseOutcome::UnknownCommand { name }) => {
                debug!(name, "unknown command");
            }
            Err(err) => eprintln!("error: {err}"),
        }

        if exit.get() {
            break;
        }
    }

    Ok(())
}
