//! Demo command processor
//!
//! Exercises the console features from the keyboard: palette listing, ANSI
//! mode, bounded and open-ended input prompts, input modes, themes.

use ember_console::{CommandProcessor, Console, Theme};
use tracing::debug;

pub const PROMPT: &str = "\n&cb>&00 ";

/// Prompt for the separate input line
pub const LINE_PROMPT: &str = "&cb>>&00 ";

const HELP: &str = "\
&cbCommands&00
  &ybhelp&00                          this list
  &ybcolors&00                        show every registered color code
  &ybansi on|off&00                   interpret SGR escapes in output
  &ybdemo input ranged [protected]&00   ask for a fixed-width value
  &ybdemo input infinite [protected]&00 ask for an open-ended value
  &ybinput inline|separate&00         type inside the output or below it
  &ybtheme dark|light&00              switch theme (clears the console)
  &ybclear&00                         clear the console
  &ybexit&00                          quit
";

#[derive(Debug, Default)]
pub struct DemoProcessor {
    /// The next input answers a `demo input` prompt
    awaiting_answer: bool,
}

impl DemoProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text shown when the console starts
    pub fn banner(inline: bool) -> String {
        let prompt = prompt_for(inline);
        format!("&obEmber&00 console demo. Type &ybhelp&00 for commands.{prompt}")
    }

    fn command(&mut self, console: &mut Console, input: &str) {
        let words: Vec<&str> = input.split_whitespace().collect();
        debug!("Demo command {:?}", words);
        let prompt = prompt_for(console.config().inline_input);

        match words.as_slice() {
            [] => console.append(prompt),
            ["help"] => console.append(&format!("\n{HELP}{prompt}")),
            ["colors"] => {
                let codes: Vec<char> = console.palette().registry().codes().collect();
                let mut listing = String::from("\n");
                for code in codes {
                    listing.push_str(&format!("&{code}-{code}{code}{code}&00 "));
                }
                listing.push('\n');
                listing.push_str(prompt);
                console.append(&listing);
            }
            ["ansi", "on"] => {
                console.set_use_ansi(true);
                console.append_system_message("\nANSI escapes enabled\n");
                console.append(&format!("\x1b[1;32mgreen\x1b[0m \x1b[44mon blue\x1b[0m{prompt}"));
            }
            ["ansi", "off"] => {
                console.set_use_ansi(false);
                console.append_system_message("\nANSI escapes disabled\n");
                console.append(prompt);
            }
            ["demo", "input", kind, rest @ ..] if rest.len() <= 1 => {
                let protected = match rest {
                    [] => false,
                    ["protected"] => true,
                    _ => return self.unknown(console, input),
                };
                let marker = if protected { "+" } else { "" };
                match *kind {
                    "ranged" => {
                        self.awaiting_answer = true;
                        console.append(&format!("\nEnter up to 10 characters: [%i10{marker};]"));
                    }
                    "infinite" => {
                        self.awaiting_answer = true;
                        console.append(&format!("\nEnter anything: %i{marker};"));
                    }
                    _ => self.unknown(console, input),
                }
            }
            ["input", "inline"] => self.input_mode(console, true),
            ["input", "separate"] => self.input_mode(console, false),
            ["theme", "dark"] => self.theme(console, Theme::Dark),
            ["theme", "light"] => self.theme(console, Theme::Light),
            ["clear"] => {
                console.clear();
                console.append(prompt.trim_start());
            }
            ["exit"] => console.append_system_message("\nBye.\n"),
            _ => self.unknown(console, input),
        }
    }

    fn input_mode(&mut self, console: &mut Console, inline: bool) {
        console.set_prompt(LINE_PROMPT);
        console.set_inline_input(inline);
        let name = if inline { "inline" } else { "separate" };
        console.append_system_message(&format!("\nInput is now {name}\n"));
        console.append(prompt_for(inline).trim_start());
    }

    fn theme(&mut self, console: &mut Console, theme: Theme) {
        console.apply_theme(theme);
        console.append(&Self::banner(console.config().inline_input));
    }

    fn unknown(&mut self, console: &mut Console, input: &str) {
        console.append_error_message(&format!("\nUnknown command: {input}\n"));
        console.append(prompt_for(console.config().inline_input));
    }
}

/// Output that ends a command: a prompt for inline input, a line break when
/// input has its own line
fn prompt_for(inline: bool) -> &'static str {
    if inline {
        PROMPT
    } else {
        "\n"
    }
}

impl CommandProcessor for DemoProcessor {
    fn process(&mut self, console: &mut Console, input: &str) {
        let inline = console.config().inline_input;
        if !inline {
            // Typed text never reached the output
            console.append_without_processing(&format!("> {input}"));
        }

        if std::mem::take(&mut self.awaiting_answer) {
            console.append_without_processing(&format!("\nYou entered: {input}"));
            console.append(prompt_for(inline));
        } else {
            self.command(console, input);
        }
    }
}
