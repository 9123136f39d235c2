pub mod audit;
pub mod config;
pub mod error;
pub mod git;

// Re-export commonly used types for convenience
pub use error::{AppError, AppResult, GitError, Result};
pub use git::{
    ChangeKind, CommandResult, DateFormat, DiffFileList, GitClient, GitVersion, LastUpdate,
    ProcessShell, ShellExecutor,
};
