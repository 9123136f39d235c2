use serde::{Deserialize, Serialize};

/// Marker preceding the branch name on the first line of `git status`
pub const BRANCH_MARKER: &str = "On branch ";

/// Marker preceding the author date in `git log` output
pub const DATE_MARKER: &str = "Date:   ";

/// Line of `git log -n 1` expected to carry the date
const DATE_LINE_INDEX: usize = 3;

/// Extract the current branch from `git status` output
pub fn parse_current_branch<S: AsRef<str>>(status: &[S]) -> Option<String> {
    let first = status.first()?.as_ref();
    text_after(first, BRANCH_MARKER).map(str::to_string)
}

/// Locate the raw date text of the newest commit in `git log -n 1` output.
///
/// The date is read from the fourth line. When that line carries no date,
/// the commit header (everything before the first blank line) is searched
/// instead, which is where plain non-merge commits print it. Output shorter
/// than four lines never has a date, even when its header carries one.
pub fn parse_last_commit_date<S: AsRef<str>>(log: &[S]) -> Option<&str> {
    let expected = log.get(DATE_LINE_INDEX)?.as_ref();
    if let Some(date) = text_after(expected, DATE_MARKER) {
        return Some(date);
    }

    log.iter()
        .map(|line| line.as_ref())
        .take_while(|line| !line.trim().is_empty())
        .find_map(|line| text_after(line, DATE_MARKER))
}

/// Parse `git diff --name-status` output.
///
/// Lines with an unrecognised status code or no path are skipped.
pub fn parse_diff_name_status<S: AsRef<str>>(lines: &[S]) -> DiffFileList {
    let mut list = DiffFileList::default();

    for line in lines {
        let mut fields = line.as_ref().split('\t');
        let (Some(code), Some(path)) = (fields.next(), fields.next()) else {
            continue;
        };

        if let Some(kind) = ChangeKind::from_code(code) {
            list.push(kind, path);
        }
    }

    list
}

/// Text following the first occurrence of `marker` in `line`
fn text_after<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    line.find(marker).map(|pos| &line[pos + marker.len()..])
}

/// How a file changed between two revisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Modified,
    Removed,
}

impl ChangeKind {
    /// Classify a single-letter name-status code, ignoring case
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "A" | "a" => Some(ChangeKind::Added),
            "M" | "m" => Some(ChangeKind::Modified),
            "D" | "d" => Some(ChangeKind::Removed),
            _ => None,
        }
    }
}

/// Files changed between two revisions, grouped by kind of change
///
/// Each bucket keeps the order git reported the paths in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffFileList {
    #[serde(rename = "new")]
    pub added: Vec<String>,
    #[serde(rename = "modify")]
    pub modified: Vec<String>,
    #[serde(rename = "remove")]
    pub removed: Vec<String>,
}

impl DiffFileList {
    pub fn push(&mut self, kind: ChangeKind, path: &str) {
        let bucket = match kind {
            ChangeKind::Added => &mut self.added,
            ChangeKind::Modified => &mut self.modified,
            ChangeKind::Removed => &mut self.removed,
        };
        bucket.push(path.to_string());
    }

    pub fn paths(&self, kind: ChangeKind) -> &[String] {
        match kind {
            ChangeKind::Added => &self.added,
            ChangeKind::Modified => &self.modified,
            ChangeKind::Removed => &self.removed,
        }
    }

    pub fn len(&self) -> usize {
        self.added.len() + self.modified.len() + self.removed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
