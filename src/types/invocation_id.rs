//! Tool invocation identifier using TypeID format.
//!
//! Every tool call the agent makes gets a fresh `InvocationId` so that the
//! log lines for path validation, confirmation and the file-system action can
//! be tied together. Format: `inv_01h455vb4pex5vsknk084sn02q`

use mti::prelude::*;
use std::fmt;

/// Identifier of a single tool invocation.
///
/// Time-sortable (UUIDv7), so ordering ids reproduces call order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InvocationId(MagicTypeId);

impl InvocationId {
    /// The TypeID prefix for invocation identifiers.
    pub const PREFIX: &'static str = "inv";

    /// Creates a new invocation id.
    #[must_use]
    pub fn new() -> Self {
        Self(Self::PREFIX.create_type_id::<V7>())
    }
}

impl Default for InvocationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InvocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ids_carry_prefix() {
        let id = InvocationId::new();
        let text = id.to_string();
        assert!(text.starts_with("inv_"));
        assert_eq!(text.len(), "inv_".len() + 26);
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(InvocationId::new(), InvocationId::new());
    }
}
