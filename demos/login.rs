//! Login example.
//!
//! Registers a `login` command that checks a name and password given as
//! positional arguments, and shows the program overview from `help`.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p cli-parser-demos --example login
//! ```

use cli_parser_core::{CommandDef, Interface, InterfaceConfig, Sink};

struct User {
    name: &'static str,
    pass: &'static str,
}

const USERS: &[User] = &[User {
    name: "John",
    pass: "qwerty123",
}];

fn main() {
    let mut cli = Interface::new(InterfaceConfig {
        name: "Interface example".into(),
        description: "Private server".into(),
        version: "1.0.0".into(),
        ..InterfaceConfig::default()
    });
    cli.add_sink(&Sink::new(|data| println!("{data}")));

    cli.command(
        "login",
        CommandDef::new()
            .with_params("[name] [passwd]")
            .with_description("Enter the server"),
    )
    .unwrap()
    .callback(|inv| {
        let (Some(name), Some(pass)) = (inv.arg(0), inv.arg(1)) else {
            inv.emit("Usage: login [name] [passwd]");
            return Ok(());
        };

        if USERS.iter().any(|u| u.name == name && u.pass == pass) {
            inv.emit(&format!("Welcome, {name}"));
        } else {
            inv.emit("User and password do not match");
        }
        Ok(())
    });

    cli.parse("login John qwerty123").unwrap();
    cli.parse("login John hunter2").unwrap();
    cli.parse("login --help").unwrap();
}
