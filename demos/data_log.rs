//! Data logging example.
//!
//! Every text emitted by the interface goes to all registered sinks; here a
//! second sink keeps a timestamped log next to the console output.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p cli-parser-demos --example data_log
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use cli_parser_core::{Interface, InterfaceConfig, Sink};

fn main() {
    let mut cli = Interface::new(InterfaceConfig::default());
    let console = Sink::new(|data| println!("{data}"));
    let log = Rc::new(RefCell::new(String::new()));

    let log_writer = Rc::clone(&log);
    let logger = Sink::new(move |data| {
        let stamp = chrono::Local::now().format("%a %b %d %Y %H:%M:%S");
        log_writer
            .borrow_mut()
            .push_str(&format!("{stamp} >>\n{data}\n"));
    });

    cli.add_sinks([&console, &logger]);

    cli.emit("Something");
    cli.emit("Hello\nI'm\nYour Father");
    cli.parse("unknown-command").unwrap();

    // Stop logging; later output only reaches the console.
    cli.remove_sink(&logger);
    cli.emit("Not logged");

    let summary = serde_json::json!({
        "sinks": cli.sinks().len(),
        "log_bytes": log.borrow().len(),
    });
    println!("\n{}\n{summary}", log.borrow());
}
