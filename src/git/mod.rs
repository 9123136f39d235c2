pub mod client;
pub mod date;
pub mod executor;
pub mod parser;
pub mod version;

// Re-export commonly used types
pub use client::{DEFAULT_GIT_COMMAND, GitClient};
pub use date::{DateFormat, LastUpdate, MYSQL_DATETIME};
pub use executor::{CommandResult, ProcessShell, ShellExecutor};
pub use parser::{
    ChangeKind, DiffFileList, parse_current_branch, parse_diff_name_status,
    parse_last_commit_date,
};
pub use version::GitVersion;
