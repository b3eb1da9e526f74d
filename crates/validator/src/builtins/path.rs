//! Filesystem paths.
//!
//! `isPath`, `isDirPath` and `isFilePath` stat the filesystem; the other two
//! only look at the syntax.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

static UNIX_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(/[^/\x00]*)+/?$").unwrap());

static WIN_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[a-zA-Z]:\\(?:[^\\/:*?"<>|\r\n]+\\)*[^\\/:*?"<>|\r\n]*$"#).unwrap()
});

pub(super) fn is_path(s: String) -> bool {
    !s.is_empty() && Path::new(&s).exists()
}

pub(super) fn is_dir_path(s: String) -> bool {
    !s.is_empty() && Path::new(&s).is_dir()
}

pub(super) fn is_file_path(s: String) -> bool {
    !s.is_empty() && Path::new(&s).is_file()
}

pub(super) fn is_unix_path(s: String) -> bool {
    UNIX_PATH.is_match(&s)
}

pub(super) fn is_win_path(s: String) -> bool {
    WIN_PATH.is_match(&s)
}
