//! Live adapters for real external interactions.

pub mod filesystem;
pub mod git;
pub mod runner;

pub use filesystem::LiveFileSystem;
pub use git::LiveGitRepo;
pub use runner::LiveCommandRunner;
