use crate::audit::AuditLogger;
use crate::config::{Config, ConfigError};
use crate::error::{AppResult, Result};
use crate::git::date::{self, DateFormat, LastUpdate};
use crate::git::executor::{CommandResult, ProcessShell, ShellExecutor};
use crate::git::parser::{self, DiffFileList};
use crate::git::version::GitVersion;
use std::path::Path;
use tracing::{debug, warn};

/// Conventional location of the git executable on unix systems
pub const DEFAULT_GIT_COMMAND: &str = "/usr/bin/git";

/// Status and log markers are matched against untranslated output
const OUTPUT_LOCALE: (&str, &str) = ("LC_ALL", "C");

/// Typed facade over the git command line.
///
/// Every operation builds a command line, hands it to the shell and reads
/// the outcome. A git command exiting nonzero is reported as `false` or
/// `None`; inspect [`last_result`](Self::last_result) for its output.
/// `Err` is returned only when the command could not be run at all.
#[derive(Debug)]
pub struct GitClient<S: ShellExecutor = ProcessShell> {
    shell: S,
    git_command: String,
    audit: Option<AuditLogger>,
}

impl GitClient<ProcessShell> {
    /// Client running commands in the process's current directory
    pub fn new() -> Result<Self> {
        let shell = ProcessShell::from_current_dir()?;
        Ok(Self::with_shell(shell.with_env(OUTPUT_LOCALE.0, OUTPUT_LOCALE.1)))
    }

    /// Client running commands in `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let shell = ProcessShell::new(path);
        Self::with_shell(shell.with_env(OUTPUT_LOCALE.0, OUTPUT_LOCALE.1))
    }

    /// Build a client from loaded settings
    pub fn from_config(config: &Config) -> AppResult<Self> {
        config.validate()?;

        let mut shell =
            ProcessShell::from_current_dir()?.with_env(OUTPUT_LOCALE.0, OUTPUT_LOCALE.1);
        if let Some(dir) = &config.git.working_dir {
            if !shell.cd(dir) {
                return Err(ConfigError::InvalidValue(format!(
                    "git.working_dir is not a directory: {}",
                    dir.display()
                ))
                .into());
            }
        }

        let mut client = Self::with_shell(shell).with_git_command(&config.git.executable);

        if config.audit.log_commands {
            let logger = match &config.audit.history_path {
                Some(path) => AuditLogger::with_path(path)?,
                None => AuditLogger::new()?,
            };
            client = client.with_audit_log(logger);
        }

        Ok(client)
    }
}

impl<S: ShellExecutor> GitClient<S> {
    pub fn with_shell(shell: S) -> Self {
        Self {
            shell,
            git_command: DEFAULT_GIT_COMMAND.to_string(),
            audit: None,
        }
    }

    pub fn with_git_command(mut self, git_command: impl Into<String>) -> Self {
        self.git_command = git_command.into();
        self
    }

    /// Record every executed command line in `logger`
    pub fn with_audit_log(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    pub fn git_command(&self) -> &str {
        &self.git_command
    }

    pub fn set_git_command(&mut self, git_command: impl Into<String>) {
        self.git_command = git_command.into();
    }

    pub fn shell(&self) -> &S {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut S {
        &mut self.shell
    }

    /// Change the directory git runs in
    pub fn change_directory<P: AsRef<Path>>(&mut self, path: P) -> bool {
        self.shell.cd(path.as_ref())
    }

    /// Name of the checked-out branch, or `None` when detached or on failure
    pub fn current_branch(&mut self) -> Result<Option<String>> {
        Ok(self
            .status()?
            .and_then(|out| parser::parse_current_branch(&out)))
    }

    /// Raw `git status` output
    pub fn status(&mut self) -> Result<Option<Vec<String>>> {
        self.stdout_on_success("status")
    }

    /// Raw `git log` output, optionally limited to `line_count` commits of
    /// `branch_name`
    pub fn log(
        &mut self,
        branch_name: Option<&str>,
        line_count: Option<usize>,
    ) -> Result<Option<Vec<String>>> {
        self.stdout_on_success(&log_args(branch_name, line_count))
    }

    /// Date of the newest commit on `branch_name` (the current branch when
    /// `None`).
    ///
    /// Fails only for a custom template chrono cannot render.
    pub fn last_update_date(
        &mut self,
        branch_name: Option<&str>,
        format: &DateFormat,
    ) -> Result<Option<LastUpdate>> {
        format.validate()?;

        let Some(log) = self.log(branch_name, Some(1))? else {
            return Ok(None);
        };
        let Some(raw) = parser::parse_last_commit_date(&log) else {
            debug!("no commit date in log output");
            return Ok(None);
        };

        date::render(raw, format)
    }

    /// Files added, modified and removed between `first_branch` and
    /// `second_branch` (the working tree when `None`)
    pub fn diff_file_list(
        &mut self,
        first_branch: &str,
        second_branch: Option<&str>,
    ) -> Result<Option<DiffFileList>> {
        Ok(self
            .stdout_on_success(&diff_args(first_branch, second_branch))?
            .map(|out| parser::parse_diff_name_status(&out)))
    }

    pub fn pull(&mut self, from_origin: bool, quiet: bool) -> Result<bool> {
        self.succeeds(&pull_args(from_origin, quiet))
    }

    pub fn checkout(&mut self, branch_name: &str, from_origin: bool, quiet: bool) -> Result<bool> {
        self.succeeds(&checkout_args(branch_name, from_origin, quiet))
    }

    pub fn fetch_origin(&mut self) -> Result<bool> {
        self.succeeds("fetch origin")
    }

    pub fn stash(&mut self) -> Result<bool> {
        self.succeeds("stash")
    }

    /// Version of the configured git executable
    pub fn version(&mut self) -> Result<Option<GitVersion>> {
        let Some(out) = self.stdout_on_success("--version")? else {
            return Ok(None);
        };

        let first = out.first().map(String::as_str).unwrap_or_default();
        match GitVersion::parse(first) {
            Ok(version) => Ok(Some(version)),
            Err(e) => {
                warn!(error = %e, "unrecognised git version output");
                Ok(None)
            }
        }
    }

    /// Output of the most recently executed command
    pub fn last_result(&self) -> Option<&CommandResult> {
        self.shell.last_result()
    }

    fn succeeds(&mut self, args: &str) -> Result<bool> {
        Ok(self.run_git_command(args)?.success())
    }

    fn stdout_on_success(&mut self, args: &str) -> Result<Option<Vec<String>>> {
        let result = self.run_git_command(args)?;
        Ok(result.success().then_some(result.stdout))
    }

    fn run_git_command(&mut self, args: &str) -> Result<CommandResult> {
        let command_line = format!("{} {}", self.git_command, args);
        debug!(command = %command_line, "running git");

        let result = self.shell.exec(&command_line)?;
        debug!(exit_code = result.exit_code, "git exited");

        if let Some(audit) = &self.audit {
            if let Err(e) =
                audit.log_command(&command_line, self.shell.current_dir(), result.exit_code)
            {
                warn!(error = %e, path = %audit.log_path().display(), "failed to write audit log");
            }
        }

        Ok(result)
    }
}

fn log_args(branch_name: Option<&str>, line_count: Option<usize>) -> String {
    let mut args = String::from("log");
    if let Some(count) = line_count {
        args.push_str(&format!(" -n {}", count));
    }
    if let Some(branch) = branch_name.filter(|b| !b.is_empty()) {
        args.push(' ');
        args.push_str(branch);
    }
    args
}

fn diff_args(first_branch: &str, second_branch: Option<&str>) -> String {
    match second_branch.filter(|b| !b.is_empty()) {
        Some(second) => format!("diff --name-status {} {}", first_branch, second),
        None => format!("diff --name-status {}", first_branch),
    }
}

fn pull_args(from_origin: bool, quiet: bool) -> String {
    format!(
        "pull{}{}",
        if quiet { " -q" } else { "" },
        if from_origin { " origin" } else { "" }
    )
}

fn checkout_args(branch_name: &str, from_origin: bool, quiet: bool) -> String {
    format!(
        "checkout {}{}{}",
        if quiet { "-q " } else { "" },
        if from_origin { "origin/" } else { "" },
        branch_name
    )
}
