#![allow(dead_code)]

use gitshell::{CommandResult, GitClient, ShellExecutor};
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn git(repo_path: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo_path)
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Helper to create a test git repository whose unborn branch is `main`
pub fn create_test_repo() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let repo_path = temp_dir.path().to_path_buf();

    git(&repo_path, &["init", "-q"]);
    git(&repo_path, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    git(&repo_path, &["config", "user.name", "Test User"]);
    git(&repo_path, &["config", "user.email", "test@example.com"]);
    git(&repo_path, &["config", "commit.gpgsign", "false"]);

    (temp_dir, repo_path)
}

/// Helper to create a commit
pub fn create_commit(repo_path: &Path, file: &str, content: &str, message: &str) {
    fs::write(repo_path.join(file), content).expect("Failed to write file");
    git(repo_path, &["add", file]);
    git(repo_path, &["commit", "-q", "-m", message]);
}

/// Helper to create a commit with fixed author and committer dates, given in
/// git's internal `<unix seconds> <offset>` form
pub fn create_commit_at(repo_path: &Path, file: &str, content: &str, message: &str, date: &str) {
    fs::write(repo_path.join(file), content).expect("Failed to write file");
    git(repo_path, &["add", file]);

    let output = Command::new("git")
        .args(["commit", "-q", "-m", message])
        .env("GIT_AUTHOR_DATE", date)
        .env("GIT_COMMITTER_DATE", date)
        .current_dir(repo_path)
        .output()
        .expect("Failed to commit");
    assert!(output.status.success());
}

pub fn run_git(repo_path: &Path, args: &[&str]) {
    git(repo_path, args);
}

/// Client for a real repository, using `git` from PATH
pub fn real_client(repo_path: &Path) -> GitClient {
    GitClient::open(repo_path).with_git_command("git")
}

/// Shell double that records command lines and replays canned results
#[derive(Debug, Default)]
pub struct ScriptedShell {
    pub commands: Vec<String>,
    pub directories: Vec<PathBuf>,
    responses: VecDeque<CommandResult>,
    last: Option<CommandResult>,
}

impl ScriptedShell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a result with the given exit code and stdout lines
    pub fn respond(self, exit_code: i32, stdout: &[&str]) -> Self {
        self.respond_with_stderr(exit_code, stdout, &[])
    }

    pub fn respond_with_stderr(mut self, exit_code: i32, stdout: &[&str], stderr: &[&str]) -> Self {
        self.responses.push_back(CommandResult::new(
            exit_code,
            stdout.iter().map(|s| s.to_string()).collect(),
            stderr.iter().map(|s| s.to_string()).collect(),
        ));
        self
    }
}

impl ShellExecutor for ScriptedShell {
    fn cd(&mut self, path: &Path) -> bool {
        self.directories.push(path.to_path_buf());
        path.is_absolute()
    }

    fn exec(&mut self, command_line: &str) -> gitshell::Result<CommandResult> {
        self.commands.push(command_line.to_string());
        let result = self.responses.pop_front().unwrap_or_default();
        self.last = Some(result.clone());
        Ok(result)
    }

    fn last_result(&self) -> Option<&CommandResult> {
        self.last.as_ref()
    }
}

pub fn scripted_client(shell: ScriptedShell) -> GitClient<ScriptedShell> {
    GitClient::with_shell(shell).with_git_command("git")
}
