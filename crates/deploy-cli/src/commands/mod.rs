//! Command implementations for deploy-cli

pub mod check;
pub mod environments;
pub mod show;

pub use check::run_check;
pub use environments::run_environments;
pub use show::run_show;
