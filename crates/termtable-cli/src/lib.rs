// termtable command-line front end.
//
// Reads CSV or JSON from a file or stdin, layers the TOML config and the
// command-line flags onto a TableBuilder, and prints the rendered table.
// All layout work happens in termtable-engine; this crate only resolves
// inputs and environment (terminal width, color support).

mod args;
mod commands;
pub mod config;
mod handlers;
pub mod input;
pub mod logging;
pub mod terminal;
pub mod types;

pub use args::{Cli, Commands, ConvertArgs, InputArgs, InspectArgs, RenderArgs};
pub use commands::run;
pub use handlers::render::render_to_string;
