// callforward-cli/src/commands/mod.rs
pub mod setup;

pub use setup::run_setup;
