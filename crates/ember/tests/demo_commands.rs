use ember::{perform, Action, DemoProcessor, Flow};
use ember_console::{Console, ConsoleConfig, Theme};
use ember_markup::{Extent, StyleKey};
use pretty_assertions::assert_eq;

fn demo() -> Console {
    let mut console = Console::default().with_processor(DemoProcessor::new());
    console.append(&DemoProcessor::banner(true));
    console
}

fn run(console: &mut Console, line: &str) -> Flow {
    for c in line.chars() {
        perform(console, Action::Type(c));
    }
    perform(console, Action::Submit)
}

#[test]
fn banner_ends_in_prompt() {
    let console = demo();
    assert!(console.text().starts_with("Ember console demo."));
    assert!(console.text().ends_with("\n> "));
    assert_eq!(console.region().extent(), Extent::Unbounded);
}

#[test]
fn help_lists_commands() {
    let mut console = demo();
    assert_eq!(run(&mut console, "help"), Flow::Submitted("help".to_string()));

    let text = console.text();
    for command in ["colors", "ansi on|off", "theme dark|light", "exit"] {
        assert!(text.contains(command), "missing {command}");
    }
    assert!(text.ends_with("\n> "));
}

#[test]
fn ranged_protected_prompt_round_trip() {
    let mut console = demo();
    run(&mut console, "demo input ranged protected");
    assert_eq!(console.region().extent(), Extent::Bounded(10));
    assert!(console.region().is_protected());

    run(&mut console, "s3cret");
    let text = console.text();
    assert!(text.contains("[******    ]"));
    assert!(text.contains("You entered: s3cret"));
    assert!(text.ends_with("\n> "));
}

#[test]
fn infinite_prompt_round_trip() {
    let mut console = demo();
    run(&mut console, "demo input infinite");
    assert_eq!(console.region().extent(), Extent::Unbounded);
    assert!(!console.region().is_protected());

    run(&mut console, "a longer answer");
    assert!(console.text().contains("You entered: a longer answer"));
}

#[test]
fn unknown_command_reports_error() {
    let mut console = demo();
    run(&mut console, "frobnicate");
    assert!(console.text().contains("Unknown command: frobnicate"));

    run(&mut console, "demo input sideways");
    assert!(console.text().contains("Unknown command: demo input sideways"));
}

#[test]
fn theme_command_switches_styles() {
    let mut console = demo();
    run(&mut console, "theme light");

    assert_eq!(console.config().default_style, Theme::Light.styles().default);
    assert_eq!(console.config().system_style, StyleKey::new('o', 'w'));
    assert!(console.text().starts_with("Ember console demo."));
}

#[test]
fn ansi_command_toggles_mode() {
    let mut console = demo();
    run(&mut console, "ansi on");
    assert!(console.config().use_ansi);
    assert!(console.text().contains("green on blue"));

    run(&mut console, "ansi off");
    assert!(!console.config().use_ansi);
}

#[test]
fn clear_command_empties_console() {
    let mut console = demo();
    run(&mut console, "colors");
    run(&mut console, "clear");
    assert_eq!(console.text(), "> ");
}

#[test]
fn exit_is_reported_to_caller() {
    let mut console = demo();
    assert_eq!(run(&mut console, "exit"), Flow::Submitted("exit".to_string()));
    assert!(console.text().contains("Bye."));
}

#[test]
fn separate_input_echoes_commands() {
    let config = ConsoleConfig {
        inline_input: false,
        ..ConsoleConfig::default()
    };
    let mut console = Console::new(config).with_processor(DemoProcessor::new());
    console.append(&DemoProcessor::banner(false));
    assert!(console.text().ends_with("commands.\n"));

    run(&mut console, "help");
    let text = console.text();
    assert!(text.contains("> help\nCommands"));
    assert!(text.ends_with('\n'));
    assert!(console.input_line().is_empty());

    perform(&mut console, Action::HistoryOlder);
    assert_eq!(console.input_line().value(), "help");
}

#[test]
fn input_command_switches_modes() {
    let mut console = demo();
    run(&mut console, "input separate");
    assert!(!console.config().inline_input);
    assert!(console.text().contains("Input is now separate"));
    assert!(!console.region().is_receiving_input());

    run(&mut console, "input inline");
    assert!(console.config().inline_input);
    assert!(console.text().contains("> input inline"));
    assert!(console.text().ends_with("Input is now inline\n> "));
    assert!(console.region().is_receiving_input());
}
