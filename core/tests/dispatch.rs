use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use cli_parser_core::{
    CliError, CommandDef, ErrorKind, ErrorTemplate, Interface, InterfaceConfig, OptionDef,
    ParseOutcome, Sink,
};

/// Interface with a sink that records everything emitted.
fn recording_interface() -> (Interface, Rc<RefCell<Vec<String>>>) {
    let mut cli = Interface::new(InterfaceConfig::default());
    let out = Rc::new(RefCell::new(Vec::new()));
    let sink_out = Rc::clone(&out);
    cli.add_sink(&Sink::new(move |data| {
        sink_out.borrow_mut().push(data.to_string())
    }));
    (cli, out)
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[test]
fn valid_names_register_and_resolve() {
    let mut cli = Interface::new(InterfaceConfig::default());
    for name in ["bag", "git-remote", "add_user", "x1"] {
        cli.command(name, CommandDef::new()).expect("valid name");
        assert_eq!(cli.find_command(name).map(|c| c.name()), Some(name));
    }
}

#[test]
fn invalid_names_are_rejected() {
    let mut cli = Interface::new(InterfaceConfig::default());
    for name in ["", "42", "a b", "semi;colon"] {
        let err = cli.command(name, CommandDef::new()).unwrap_err();
        assert!(matches!(err, CliError::InvalidName(_)), "{name:?}: {err}");
    }
    assert!(cli.find_command("42").is_none());
}

#[test]
fn invalid_option_in_definition_fails_registration() {
    let mut cli = Interface::new(InterfaceConfig::default());
    let def = CommandDef::new().with_option(OptionDef::new(Some('%'), None));
    assert!(matches!(
        cli.command("broken", def),
        Err(CliError::InvalidOption(_))
    ));
    assert!(cli.find_command("broken").is_none());
}

#[test]
fn re_registration_replaces_and_moves_to_end() {
    let (mut cli, out) = recording_interface();
    cli.command_fn("first", |inv| {
        inv.emit("old");
        Ok(())
    })
    .unwrap();
    cli.command("second", CommandDef::new()).unwrap();
    cli.command_fn("first", |inv| {
        inv.emit("new");
        Ok(())
    })
    .unwrap();

    let names: Vec<&str> = cli.commands().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["help", "second", "first"]);

    cli.parse("first").unwrap();
    assert_eq!(*out.borrow(), vec!["new"]);
}

#[test]
fn help_command_is_registered_at_construction() {
    let cli = Interface::new(InterfaceConfig::default());
    let help = cli.find_command("help").expect("help command");
    assert_eq!(help.description(), "Find information about the program");
}

// ---------------------------------------------------------------------------
// Option queries
// ---------------------------------------------------------------------------

#[test]
fn has_is_alias_aware() {
    let mut cli = Interface::new(InterfaceConfig::default());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let record = Rc::clone(&seen);

    cli.command_fn("bag", move |inv| {
        let opts = inv.options();
        record
            .borrow_mut()
            .extend([opts.has("carrots"), opts.has("c"), opts.has("apples")]);
        Ok(())
    })
    .unwrap()
    .option(OptionDef::new(Some('c'), Some("carrots")))
    .unwrap();

    cli.parse("bag --carrots").unwrap();
    assert_eq!(*seen.borrow(), vec![true, true, false]);
}

#[test]
fn values_are_reachable_through_either_alias() {
    let mut cli = Interface::new(InterfaceConfig::default());
    let seen = Rc::new(RefCell::new(HashMap::new()));
    let record = Rc::clone(&seen);

    cli.command_fn("scream", move |inv| {
        let opts = inv.options();
        let mut record = record.borrow_mut();
        for key in ["message", "m", "strength", "s"] {
            record.insert(key, opts.value(key).map(String::from));
        }
        Ok(())
    })
    .unwrap()
    .option(OptionDef::new(Some('m'), Some("message")))
    .unwrap()
    .option(OptionDef::new(Some('s'), Some("strength")))
    .unwrap();

    cli.parse("scream -s=3 --message=help").unwrap();
    let seen = seen.borrow();
    assert_eq!(seen["message"].as_deref(), Some("help"));
    assert_eq!(seen["m"].as_deref(), Some("help"));
    assert_eq!(seen["strength"].as_deref(), Some("3"));
    assert_eq!(seen["s"].as_deref(), Some("3"));
}

#[test]
fn undefined_options_and_numeric_transform() {
    let mut cli = Interface::new(InterfaceConfig::default());
    let seen = Rc::new(RefCell::new(None));
    let record = Rc::clone(&seen);

    cli.command_fn("shop", move |inv| {
        let opts = inv.options();
        let money = opts.get_with("money", |v| v.and_then(|s| s.parse::<i64>().ok()));
        let missing = opts.get_with("wallet", |_| -> i64 { panic!("not called") });
        *record.borrow_mut() = Some((
            opts.has("orange"),
            opts.has("tomato"),
            opts.has("lemon"),
            money,
            missing,
        ));
        Ok(())
    })
    .unwrap();

    cli.parse("shop --orange --tomato --lemon --money=20").unwrap();
    assert_eq!(
        *seen.borrow(),
        Some((true, true, true, Some(Some(20)), None))
    );
}

#[test]
fn positionals_exclude_command_name_and_options() {
    let mut cli = Interface::new(InterfaceConfig::default());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let record = Rc::clone(&seen);

    cli.command_fn("login", move |inv| {
        record.borrow_mut().extend(inv.args().iter().cloned());
        Ok(())
    })
    .unwrap();

    cli.parse("  login  John --remember qwerty123 -v ").unwrap();
    assert_eq!(*seen.borrow(), vec!["John", "qwerty123"]);
}

// ---------------------------------------------------------------------------
// Output sinks
// ---------------------------------------------------------------------------

#[test]
fn sinks_are_deduplicated_by_identity() {
    let mut cli = Interface::new(InterfaceConfig::default());
    let a = Sink::new(|_| {});
    let b = Sink::new(|_| {});

    cli.add_sink(&a).add_sink(&a).add_sink(&b);
    for _ in 0..10 {
        cli.add_sink(&b);
    }
    assert_eq!(cli.sinks().len(), 2);
    assert!(cli.has_sink(&a));

    cli.add_sinks([&a, &b]);
    assert_eq!(cli.sinks().len(), 2);
}

#[test]
fn removing_sinks_is_safe() {
    let mut cli = Interface::new(InterfaceConfig::default());
    let a = Sink::new(|_| {});
    let stranger = Sink::new(|_| {});

    cli.add_sink(&a);
    cli.remove_sink(&stranger);
    assert_eq!(cli.sinks().len(), 1);

    cli.remove_sink(&a).remove_sink(&a);
    assert!(cli.sinks().is_empty());
    assert!(!cli.has_sink(&a));
}

#[test]
fn emit_calls_remaining_sinks_in_order() {
    let mut cli = Interface::new(InterfaceConfig::default());
    let log = Rc::new(RefCell::new(Vec::new()));

    let sinks: Vec<Sink> = (0..3)
        .map(|i| {
            let log = Rc::clone(&log);
            Sink::new(move |data| log.borrow_mut().push(format!("{i}:{data}")))
        })
        .collect();
    cli.add_sinks(&sinks);
    cli.remove_sink(&sinks[2]);

    cli.emit("The data");
    assert_eq!(*log.borrow(), vec!["0:The data", "1:The data"]);
}

// ---------------------------------------------------------------------------
// Parse-time errors
// ---------------------------------------------------------------------------

#[test]
fn unknown_command_reports_and_runs_nothing() {
    let (mut cli, out) = recording_interface();
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    cli.command_fn("exists", move |_| {
        *counter.borrow_mut() += 1;
        Ok(())
    })
    .unwrap();

    let outcome = cli.parse("doesnotexist --flag arg").unwrap();
    assert_eq!(
        outcome,
        ParseOutcome::UnknownCommand {
            name: "doesnotexist".to_string()
        }
    );
    assert_eq!(*out.borrow(), vec!["doesnotexist: command was not found"]);
    assert_eq!(*calls.borrow(), 0);
}

#[test]
fn empty_line_is_an_unknown_command() {
    let (cli, out) = recording_interface();
    let outcome = cli.parse("   ").unwrap();
    assert_eq!(
        outcome,
        ParseOutcome::UnknownCommand {
            name: String::new()
        }
    );
    assert_eq!(*out.borrow(), vec![": command was not found"]);
}

#[test]
fn invalid_bundled_flag_reports_and_stops_that_token_only() {
    let (mut cli, out) = recording_interface();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let record = Rc::clone(&seen);

    cli.command_fn("run", move |inv| {
        let opts = inv.options();
        record.borrow_mut().extend(
            ["q", "z", "x", "v"]
                .into_iter()
                .map(|k| (k, opts.has(k))),
        );
        Ok(())
    })
    .unwrap();

    let outcome = cli.parse("run -qz9x -v").unwrap();
    assert!(matches!(outcome, ParseOutcome::Dispatched { .. }));
    assert_eq!(*out.borrow(), vec!["9: option invalid"]);
    assert_eq!(
        *seen.borrow(),
        vec![("q", true), ("z", true), ("x", false), ("v", true)]
    );
}

#[test]
fn custom_templates_and_handlers() {
    let (mut cli, out) = recording_interface();
    let handled = Rc::new(RefCell::new(false));
    let flag = Rc::clone(&handled);

    cli.set_error_template(ErrorKind::BadCommand, "no such command '{command}'");
    cli.set_error_template(
        ErrorKind::InvalidOption,
        ErrorTemplate::handler(move || *flag.borrow_mut() = true),
    );
    cli.command("run", CommandDef::new()).unwrap();

    cli.parse("nope").unwrap();
    cli.parse("run -a1").unwrap();

    assert_eq!(*out.borrow(), vec!["no such command 'nope'"]);
    assert!(*handled.borrow());
}

#[test]
fn raise_error_rejects_non_keyed_substitutions() {
    let cli = Interface::new(InterfaceConfig::default());
    let err = cli
        .raise_error(&ErrorKind::BadCommand, &serde_json::json!(42))
        .unwrap_err();
    assert!(matches!(err, CliError::InvalidArgument(_)));
}

#[test]
fn raising_unknown_kind_emits_nothing() {
    let (cli, out) = recording_interface();
    cli.raise_error(&ErrorKind::Other("quota".into()), &serde_json::json!({}))
        .unwrap();
    assert!(out.borrow().is_empty());
}

// ---------------------------------------------------------------------------
// Callback chain
// ---------------------------------------------------------------------------

#[test]
fn callbacks_run_in_registration_order() {
    let (mut cli, out) = recording_interface();
    cli.command_fn("chain", |inv| {
        inv.emit("one");
        Ok(())
    })
    .unwrap()
    .callback(|inv| {
        inv.emit(&format!("two:{}", inv.command().name()));
        Ok(())
    });

    let outcome = cli.parse("chain").unwrap();
    assert_eq!(*out.borrow(), vec!["one", "two:chain"]);
    // user callbacks plus the built-in usage callback
    assert_eq!(
        outcome,
        ParseOutcome::Dispatched {
            command: "chain".into(),
            invoked: 3
        }
    );
}

#[test]
fn failing_callback_stops_the_chain() {
    let (mut cli, out) = recording_interface();
    cli.command_fn("fail", |inv| {
        inv.emit("before");
        Err("boom".into())
    })
    .unwrap()
    .callback(|inv| {
        inv.emit("after");
        Ok(())
    });

    let err = cli.parse("fail").unwrap_err();
    match err {
        CliError::Callback { command, source } => {
            assert_eq!(command, "fail");
            assert_eq!(source.to_string(), "boom");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(*out.borrow(), vec!["before"]);
}

#[test]
fn auto_help_can_be_disabled() {
    let mut cli = Interface::new(InterfaceConfig {
        auto_help: false,
        ..InterfaceConfig::default()
    });
    let cmd = cli.command("quiet", CommandDef::new()).unwrap();
    assert!(cmd.options().is_empty());
    assert!(cmd.callbacks().is_empty());
    assert!(cli.find_command("help").unwrap().options().is_empty());
}
