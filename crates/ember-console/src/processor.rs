//! Handlers for submitted input

use crate::console::Console;

/// Receives each submitted input and may write output back to the console
pub trait CommandProcessor {
    fn process(&mut self, console: &mut Console, input: &str);
}

impl<F> CommandProcessor for F
where
    F: FnMut(&mut Console, &str),
{
    fn process(&mut self, console: &mut Console, input: &str) {
        self(console, input)
    }
}

/// Writes every input back on a line of its own, without interpreting markup
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoProcessor;

impl CommandProcessor for EchoProcessor {
    fn process(&mut self, console: &mut Console, input: &str) {
        console.append_without_processing(&format!("\n{input}\n"));
    }
}
