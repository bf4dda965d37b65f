//! Default help command example.
//!
//! The `help` command is registered by `Interface::new` and prints the
//! program name, version, description and every registered command.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p cli-parser-demos --example help
//! ```

use cli_parser_core::{CommandDef, Interface, InterfaceConfig, Sink};

fn main() {
    let mut cli = Interface::new(InterfaceConfig {
        name: "My program".into(),
        ..InterfaceConfig::default()
    });
    cli.set_version([1, 0, 0]);
    cli.add_sink(&Sink::new(|data| println!("{data}")));

    for (name, params) in [("add", "<file>..."), ("commit", "[message]"), ("push", "")] {
        let mut def = CommandDef::new();
        if !params.is_empty() {
            def = def.with_params(params);
        }
        cli.command(name, def).unwrap();
    }

    assert!(cli.find_command("help").is_some());
    cli.parse("help").unwrap();
}
