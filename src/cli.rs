//! CLI domain: parse, route and presentation only.

mod parse;
mod presentation;
mod route;

pub use parse::{Cli, Commands, OutputFormat};
pub use presentation::{format_hashes_json, format_hashes_table};
pub use route::RunContext;
