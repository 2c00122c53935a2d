// CLI subcommand handlers. main.rs parses arguments and dispatches here.

pub mod resort;
pub mod route;
