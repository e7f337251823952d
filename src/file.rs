// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// File access for preamble/postamble templates and the rendered report.
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Error, io_error, write_error};

/// Reads a template file verbatim.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file is missing, unreadable, or not UTF-8.
pub fn read_template(path: &Path) -> Result<String, Error> {
    debug!("Reading template from {}", path.display());
    std::fs::read_to_string(path).map_err(|source| io_error(path, source))
}

/// Writes the rendered document, creating missing parent directories.
///
/// # Errors
///
/// Returns [`Error::Write`] when a parent directory cannot be created or
/// the file cannot be written.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// use contributions_markdown::write_markdown;
///
/// # fn example() -> Result<(), contributions_markdown::Error> {
/// write_markdown(Path::new("docs/contributions.md"), "## 2019-07-10 -> 2020-07-10")?;
/// # Ok(())
/// # }
/// ```
pub fn write_markdown(path: &Path, content: &str) -> Result<(), Error> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|source| write_error(path, source))?;
    }

    std::fs::write(path, content).map_err(|source| write_error(path, source))?;
    info!("Wrote {} bytes of markdown to {}", content.len(), path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn read_template_preserves_trailing_newline() {
        let dir = tempdir().expect("failed to create tempdir");
        let path = dir.path().join("after.md");
        std::fs::write(&path, "Generated by a tool\n").expect("failed to write template");

        let content = read_template(&path).expect("template should be readable");
        assert_eq!(content, "Generated by a tool\n");
    }

    #[test]
    fn read_template_rejects_missing_file() {
        let error = read_template(Path::new("/nonexistent/before.md")).unwrap_err();
        assert!(matches!(error, Error::Io { .. }));
    }

    #[test]
    fn write_markdown_creates_parent_directories() {
        let dir = tempdir().expect("failed to create tempdir");
        let dest = dir.path().join("nested/dir/contributions.md");

        write_markdown(&dest, "content").expect("write should succeed");

        let written = std::fs::read_to_string(&dest).expect("failed to read output");
        assert_eq!(written, "content");
    }

    #[test]
    fn write_markdown_overwrites_existing_file() {
        let dir = tempdir().expect("failed to create tempdir");
        let dest = dir.path().join("contributions.md");
        std::fs::write(&dest, "stale").expect("failed to seed output");

        write_markdown(&dest, "").expect("write should succeed");

        let written = std::fs::read_to_string(&dest).expect("failed to read output");
        assert!(written.is_empty());
    }

    #[test]
    fn write_markdown_reports_directory_destination() {
        let dir = tempdir().expect("failed to create tempdir");
        let error = write_markdown(dir.path(), "content").unwrap_err();
        assert!(matches!(error, Error::Write { .. }));
    }
}
