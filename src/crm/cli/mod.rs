//! Terminal client for crm: argument parsing, the terminal `View`, colours.

mod commands;
mod render;
mod setup;
mod styles;

pub use commands::run;
