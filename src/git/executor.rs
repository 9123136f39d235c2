use crate::error::{GitError, Result};
use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Captured outcome of one command execution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    pub exit_code: i32,
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
}

impl CommandResult {
    pub fn new(exit_code: i32, stdout: Vec<String>, stderr: Vec<String>) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
        }
    }

    /// Split captured process output into lines.
    ///
    /// A process terminated by a signal has no exit code and reports -1.
    pub fn from_output(output: &Output) -> Self {
        Self {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: split_lines(&output.stdout),
            stderr: split_lines(&output.stderr),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

fn split_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::to_string)
        .collect()
}

/// Runs command lines on behalf of a [`GitClient`](crate::git::GitClient).
///
/// Implementations own the working directory and the most recent result.
/// A command that runs and exits nonzero is still `Ok`; `Err` means the
/// command could not be run at all.
pub trait ShellExecutor {
    /// Change the directory commands run in. Returns false if `path` is not
    /// an existing directory, leaving the current one untouched.
    fn cd(&mut self, path: &Path) -> bool;

    /// Execute a command line and remember its result.
    fn exec(&mut self, command_line: &str) -> Result<CommandResult>;

    /// The result of the most recent successful spawn, if any.
    fn last_result(&self) -> Option<&CommandResult>;

    /// Directory commands currently run in, for shells that track one
    fn current_dir(&self) -> Option<&Path> {
        None
    }
}

/// Spawns commands as child processes, without a shell in between
#[derive(Debug)]
pub struct ProcessShell {
    working_dir: PathBuf,
    envs: Vec<(String, String)>,
    last_result: Option<CommandResult>,
}

impl ProcessShell {
    /// Create a shell that runs commands in `working_dir`
    pub fn new<P: AsRef<Path>>(working_dir: P) -> Self {
        Self {
            working_dir: working_dir.as_ref().to_path_buf(),
            envs: Vec::new(),
            last_result: None,
        }
    }

    /// Set an environment variable for every command this shell runs
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Create a shell rooted at the process's current directory
    pub fn from_current_dir() -> Result<Self> {
        Ok(Self::new(env::current_dir()?))
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Split a command line into program and arguments.
    ///
    /// Arguments are whitespace separated and never interpreted by a shell.
    fn split_command(command_line: &str) -> Result<Vec<&str>> {
        let args: Vec<&str> = command_line.split_whitespace().collect();
        if args.is_empty() {
            return Err(GitError::EmptyCommand);
        }

        Ok(args)
    }
}

impl ShellExecutor for ProcessShell {
    fn cd(&mut self, path: &Path) -> bool {
        let target = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_dir.join(path)
        };

        match target.canonicalize() {
            Ok(resolved) if resolved.is_dir() => {
                self.working_dir = resolved;
                true
            }
            _ => false,
        }
    }

    fn exec(&mut self, command_line: &str) -> Result<CommandResult> {
        let args = Self::split_command(command_line)?;
        let (program, args) = (args[0], &args[1..]);

        let output = Command::new(program)
            .args(args)
            .envs(self.envs.iter().map(|(k, v)| (k, v)))
            .current_dir(&self.working_dir)
            .output()
            .map_err(|source| GitError::SpawnFailed {
                program: program.to_string(),
                source,
            })?;

        let result = CommandResult::from_output(&output);
        self.last_result = Some(result.clone());

        Ok(result)
    }

    fn last_result(&self) -> Option<&CommandResult> {
        self.last_result.as_ref()
    }

    fn current_dir(&self) -> Option<&Path> {
        Some(&self.working_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let repo_path = temp_dir.path().to_path_buf();

        Command::new("git")
            .args(["init"])
            .current_dir(&repo_path)
            .output()
            .unwrap();

        (temp_dir, repo_path)
    }

    #[test]
    fn test_exec_status() {
        let (_temp, repo_path) = create_test_repo();
        let mut shell = ProcessShell::new(&repo_path);

        let result = shell.exec("git status --porcelain").unwrap();
        assert!(result.success());
        assert_eq!(result.exit_code, 0);
        assert!(result.stdout.is_empty());
    }

    #[test]
    fn test_exec_nonzero_exit_is_not_an_error() {
        let (_temp, repo_path) = create_test_repo();
        let mut shell = ProcessShell::new(&repo_path);

        // No commits yet, so log exits nonzero
        let result = shell.exec("git log --oneline").unwrap();
        assert!(!result.success());
        assert_ne!(result.exit_code, 0);
        assert!(!result.stderr.is_empty());
    }

    #[test]
    fn test_last_result_tracks_latest_exec() {
        let (_temp, repo_path) = create_test_repo();
        let mut shell = ProcessShell::new(&repo_path);
        assert!(shell.last_result().is_none());

        shell.exec("git log --oneline").unwrap();
        assert!(!shell.last_result().unwrap().success());

        shell.exec("git status").unwrap();
        assert!(shell.last_result().unwrap().success());
    }

    #[test]
    fn test_substitution_syntax_reaches_program_verbatim() {
        let temp_dir = TempDir::new().unwrap();
        let mut shell = ProcessShell::new(temp_dir.path());

        let result = shell.exec("echo price$fix `whoami` $(id)").unwrap();
        assert_eq!(result.stdout, vec!["price$fix `whoami` $(id)"]);
    }

    #[test]
    fn test_empty_command() {
        let mut shell = ProcessShell::new(env::temp_dir());

        assert!(matches!(shell.exec("").unwrap_err(), GitError::EmptyCommand));
        assert!(matches!(shell.exec("   ").unwrap_err(), GitError::EmptyCommand));
    }

    #[test]
    fn test_missing_program() {
        let mut shell = ProcessShell::new(env::temp_dir());

        let result = shell.exec("/nonexistent/bin/git status");
        assert!(matches!(result.unwrap_err(), GitError::SpawnFailed { .. }));
        assert!(shell.last_result().is_none());
    }

    #[test]
    fn test_cd_relative_and_absolute() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("sub")).unwrap();
        let mut shell = ProcessShell::new(temp_dir.path());

        assert!(shell.cd(Path::new("sub")));
        assert_eq!(
            shell.working_dir(),
            temp_dir.path().join("sub").canonicalize().unwrap()
        );

        assert!(shell.cd(temp_dir.path()));
        assert_eq!(shell.working_dir(), temp_dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_cd_rejects_missing_and_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("file.txt"), "x").unwrap();
        let mut shell = ProcessShell::new(temp_dir.path());

        assert!(!shell.cd(Path::new("missing")));
        assert!(!shell.cd(Path::new("file.txt")));
        assert_eq!(shell.working_dir(), temp_dir.path());
    }

    #[test]
    fn test_with_env() {
        let temp_dir = TempDir::new().unwrap();
        let mut shell = ProcessShell::new(temp_dir.path()).with_env("GITSHELL_TEST_VAR", "42");

        let result = shell.exec("printenv GITSHELL_TEST_VAR").unwrap();
        assert_eq!(result.stdout, vec!["42"]);
        assert_eq!(shell.current_dir(), Some(temp_dir.path()));
    }

    #[test]
    fn test_command_result_lines() {
        let result = CommandResult::new(0, vec!["a".into(), "b".into()], Vec::new());
        assert!(result.success());
        assert_eq!(split_lines(b"one\ntwo\r\nthree\n"), vec!["one", "two", "three"]);
        assert!(split_lines(b"").is_empty());
    }
}
