//! Step pipeline and the commands built on it.
//!
//! `init` drives the pipeline; `config` and `standards` share its config
//! loading through [`RunContext`].
mod context;
mod init;
mod locations;
mod runner;
mod standards;
mod state;
mod step_runner;
mod steps;
mod types;

#[cfg(test)]
mod test_support;

pub use init::run_init;
pub use locations::run_config;
pub use standards::run_standards;
