//! Identity types shared across the crate.

mod invocation_id;

pub use invocation_id::InvocationId;
