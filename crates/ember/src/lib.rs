//! Ember: a styled text console in the terminal
//!
//! Wires the console from `ember-console` to a crossterm terminal and ships
//! a demo command processor.

pub mod app;
pub mod demo;
pub mod keys;
pub mod terminal_guard;

pub use demo::DemoProcessor;
pub use keys::{action_for, perform, Action, Flow};
