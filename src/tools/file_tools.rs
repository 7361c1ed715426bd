//! The four project file operations.
//!
//! [`FileTools`] is the typed interface the tool executors call into. Every
//! operation resolves its path through [`PathGuard`] first; the mutating ones
//! then ask the injected [`ConfirmationGate`] before touching the filesystem.
//! A rejected path therefore never reaches the operator, and an unconfirmed
//! action never reaches the disk.

use crate::tools::error::ToolError;
use crate::tools::security::{ConfirmationGate, PathGuard, ProjectRoot, RelativePath};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use tracing::info;

/// File access confined to one project root, with operator confirmation for
/// writes and deletes.
pub struct FileTools {
    root: ProjectRoot,
    gate: Box<dyn ConfirmationGate>,
}

impl FileTools {
    /// Creates the file tools for `root`, asking `gate` before mutations.
    pub fn new(root: ProjectRoot, gate: impl ConfirmationGate + 'static) -> Self {
        Self {
            root,
            gate: Box::new(gate),
        }
    }

    /// Lists the immediate children of a directory.
    ///
    /// Entries are returned as paths relative to the project root, in the
    /// order the filesystem enumerates them. Subdirectories are listed but not
    /// descended into. `None`, `""` and `"/"` all list the root.
    ///
    /// # Errors
    ///
    /// `InvalidPath`, `NotFound`, `NotADirectory`, or `Io` if enumeration fails.
    pub fn list_files(&self, directory: Option<&str>) -> Result<Vec<String>, ToolError> {
        let rel = PathGuard::resolve(directory)?;
        let target = self.root.join(&rel);
        info!(directory = %shown(&rel), "Getting files in directory");

        let metadata = fs::metadata(&target).map_err(|e| ToolError::from_io(shown(&rel), &e))?;
        if !metadata.is_dir() {
            return Err(ToolError::not_a_directory(shown(&rel)));
        }

        let entry_error = |e: io::Error| ToolError::io(shown(&rel), e.to_string());
        let mut entries = Vec::new();
        for entry in fs::read_dir(&target).map_err(entry_error)? {
            let name = entry.map_err(entry_error)?.file_name();
            let path = if rel.is_root() {
                name.to_string_lossy().into_owned()
            } else {
                Path::new(rel.as_str())
                    .join(&name)
                    .to_string_lossy()
                    .into_owned()
            };
            entries.push(path);
        }

        Ok(entries)
    }

    /// Reads a whole file as UTF-8 text, byte for byte.
    ///
    /// # Errors
    ///
    /// `InvalidPath`, `NotFound`, `NotReadable` for directories, non-UTF-8
    /// content or permission problems, `Io` otherwise.
    pub fn read_file(&self, filename: &str) -> Result<String, ToolError> {
        let rel = PathGuard::resolve(Some(filename))?;
        let target = self.root.join(&rel);
        info!(file = %shown(&rel), "Getting content of file");

        if target.is_dir() {
            return Err(ToolError::not_readable(shown(&rel), "it is a directory"));
        }

        let bytes = fs::read(&target).map_err(|e| match e.kind() {
            io::ErrorKind::PermissionDenied => ToolError::not_readable(shown(&rel), e.to_string()),
            _ => ToolError::from_io(shown(&rel), &e),
        })?;

        String::from_utf8(bytes)
            .map_err(|_| ToolError::not_readable(shown(&rel), "content is not valid UTF-8 text"))
    }

    /// Creates or overwrites a file, creating missing parent directories.
    ///
    /// The operator is asked first; on refusal nothing is written.
    ///
    /// # Errors
    ///
    /// `InvalidPath` (before any prompt, also for the project root itself),
    /// `UserCancelled`, or `Io` if the directories or the file cannot be
    /// written.
    pub fn write_file(&self, filename: &str, content: &str) -> Result<(), ToolError> {
        let rel = file_target(filename)?;
        let target = self.root.join(&rel);

        self.confirm(
            &format!("Update file '{rel}' with content:{content}"),
            &format!("Are you sure you want to update the content of {rel}? (yes/no)"),
        )?;

        info!(file = %shown(&rel), bytes = content.len(), "Updating content of file");

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| ToolError::io(shown(&rel), e.to_string()))?;
        }
        fs::write(&target, content).map_err(|e| ToolError::io(shown(&rel), e.to_string()))
    }

    /// Deletes a file after asking the operator.
    ///
    /// # Errors
    ///
    /// `InvalidPath` (before any prompt, also for the project root itself),
    /// `UserCancelled`, `NotFound`, or `Io` if removal fails for another
    /// reason (for example a directory).
    pub fn delete_file(&self, filename: &str) -> Result<(), ToolError> {
        let rel = file_target(filename)?;
        let target = self.root.join(&rel);

        self.confirm(
            &format!("Delete file '{rel}'"),
            &format!("Are you sure you want to delete {rel}? (yes/no)"),
        )?;

        info!(file = %shown(&rel), "Removing file");

        fs::remove_file(&target).map_err(|e| ToolError::from_io(shown(&rel), &e))
    }

    fn confirm(&self, action: &str, prompt: &str) -> Result<(), ToolError> {
        self.gate.confirm(action, prompt).inspect_err(|e| {
            if e.is_cancelled() {
                info!("Operation cancelled by the user");
            }
        })
    }
}

impl fmt::Debug for FileTools {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileTools")
            .field("root", &self.root)
            .field("gate", &self.gate)
            .finish()
    }
}

/// Resolves a path that must name a file, so never the root.
fn file_target(filename: &str) -> Result<RelativePath, ToolError> {
    let rel = PathGuard::resolve(Some(filename))?;
    if rel.is_root() {
        return Err(ToolError::invalid_path(format!(
            "'{filename}' names the project root; give a file name"
        )));
    }
    Ok(rel)
}

/// How a relative path appears in logs and error messages.
fn shown(rel: &RelativePath) -> String {
    if rel.is_root() {
        "/".to_string()
    } else {
        rel.to_string()
    }
}
