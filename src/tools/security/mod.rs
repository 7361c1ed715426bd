//! Security controls for the file tools.
//!
//! - **Path resolution**: [`PathGuard`] rejects traversal attempts and
//!   rooted paths before anything reaches the filesystem.
//! - **Confirmation**: [`ConfirmationGate`] asks the operator before any
//!   mutating action and cancels it on anything but an explicit yes.
//!
//! ```rust,ignore
//! use devhelper::tools::security::{PathGuard, ProjectRoot};
//!
//! let root = ProjectRoot::new(".")?;
//! let rel = PathGuard::resolve(Some("/src/main.rs"))?;
//! let absolute = root.join(&rel);
//! ```

mod confirm;
mod path;

pub use confirm::{AlwaysApprove, AlwaysRefuse, ConfirmationGate, ConsoleGate, ScriptedGate};
pub use path::{PathGuard, PathGuardError, PathGuardErrorKind, ProjectRoot, RelativePath};
