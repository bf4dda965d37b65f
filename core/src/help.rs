//! Built-in help output.
//!
//! Two renderers: the program overview emitted by the default `help` command,
//! and the per-command usage text emitted when a command is given `-h` or
//! `--help`.

use crate::registry::Interface;
use crate::table::{TableConfig, table};
use crate::types::{Callback, Command, OptionDef};

pub(crate) const HELP_COMMAND: &str = "help";

/// Option installed on every command when automatic help is enabled.
pub(crate) fn help_option() -> OptionDef {
    OptionDef::new(Some('h'), Some("help")).with_description("Show options taken by the command")
}

/// Callback that prints the command's usage when `--help` was given.
pub(crate) fn usage_callback() -> Callback {
    Callback::new(|inv| {
        if inv.options().has("help") {
            inv.emit(&command_usage(inv.command()));
        }
        Ok(())
    })
}

/// Callback of the default `help` command.
pub(crate) fn program_help_callback() -> Callback {
    Callback::new(|inv| {
        inv.emit(&program_help(inv.interface()));
        Ok(())
    })
}

/// Renders the program overview: name, version, description and a
/// two-per-row listing of every registered command with its usage.
///
/// # Examples
///
/// ```
/// use cli_parser_core::*;
///
/// let cli = Interface::new(InterfaceConfig {
///     name: "My program".into(),
///     version: "1.0.0".into(),
///     ..InterfaceConfig::default()
/// });
/// let text = program_help(&cli);
/// assert!(text.starts_with("My program <version 1.0.0>\n\n"));
/// assert!(text.contains("List of available commands <command> [params]"));
/// assert!(text.contains("help"));
/// ```
pub fn program_help(interface: &Interface) -> String {
    let mut info = String::new();

    if !interface.name().is_empty() {
        info.push_str(interface.name());
        info.push(' ');
    }
    if !interface.version().is_empty() {
        info.push_str(&format!("<version {}>\n\n", interface.version()));
    }
    if !interface.description().is_empty() {
        info.push_str(&format!("{}\n\n", interface.description()));
    }

    info.push_str("List of available commands <command> [params]\n\n");

    let rows = overview_rows(interface);
    info.push_str(&table(&rows, &TableConfig::default().with_cols(2).with_padding(5)));
    info
}

/// Commands paired two per row. An odd last row is filled with `" "`, the
/// cell an empty name and empty usage would render to.
fn overview_rows(interface: &Interface) -> Vec<Vec<Option<String>>> {
    let cells: Vec<String> = interface.commands().iter().map(command_cell).collect();
    cells
        .chunks(2)
        .map(|pair| {
            vec![
                pair.first().cloned(),
                Some(pair.get(1).cloned().unwrap_or_else(|| " ".to_string())),
            ]
        })
        .collect()
}

fn command_cell(command: &Command) -> String {
    format!("{} {}", command.name(), command.params().join(","))
}

/// Renders a command's usage lines, description and option table.
///
/// # Examples
///
/// ```
/// use cli_parser_core::*;
///
/// let mut cli = Interface::new(InterfaceConfig::default());
/// cli.command(
///     "login",
///     CommandDef::new()
///         .with_params("[name] [passwd]")
///         .with_description("Enter the server"),
/// )
/// .unwrap();
///
/// let text = command_usage(cli.find_command("login").unwrap());
/// assert!(text.starts_with("Usage: login [OPTION]... [name] [passwd]\n"));
/// assert!(text.contains("\nEnter the server\n"));
/// assert!(text.contains("-h, --help Show options taken by the command"));
/// ```
pub fn command_usage(command: &Command) -> String {
    let mut info = String::new();
    let option_hint = if command.options().is_empty() {
        " "
    } else {
        " [OPTION]... "
    };

    for (i, params) in command.params().iter().enumerate() {
        let lead = if i == 0 { "Usage: " } else { "  or:  " };
        info.push_str(&format!("{lead}{}{option_hint}{params}\n", command.name()));
    }

    if !command.description().is_empty() {
        info.push_str(&format!("\n{}\n", command.description()));
    }

    let rows: Vec<Vec<Option<String>>> = command
        .options()
        .iter()
        .map(|o| {
            let short = o.short.map(|c| format!("-{c},"));
            let long = o.long.as_ref().map(|l| {
                if o.param.is_empty() {
                    format!("--{l}")
                } else {
                    format!("--{l}={}", o.param)
                }
            });
            vec![short, long, Some(o.description.clone())]
        })
        .collect();

    info.push('\n');
    info.push_str(&table(&rows, &TableConfig::default().with_cols(3).with_padding(1)));
    info
}
