//! Process arguments example.
//!
//! The program is itself the command: its arguments are appended to the
//! command name and dispatched as one line.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p cli-parser-demos --example process_argv -- --twice "hello"
//! ```

use cli_parser_core::{Interface, InterfaceConfig, OptionDef, Sink};

fn main() {
    let mut cli = Interface::new(InterfaceConfig::default());
    cli.add_sink(&Sink::new(|data| println!("{data}")));

    cli.command_fn("process-argv", |inv| {
        let text = inv.args().join(" ");
        inv.emit(&text);
        if inv.options().has("twice") {
            inv.emit(&text);
        }
        Ok(())
    })
    .unwrap()
    .option(OptionDef::new(Some('t'), Some("twice")).with_description("Output twice"))
    .unwrap();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(err) = cli.parse(&format!("process-argv {}", args.join(" "))) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
