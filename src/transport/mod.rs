pub mod cli;

pub use cli::{ReplCommand, ask_once, parse_line, run_repl};
