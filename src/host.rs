//! The host, a translation layer between the AST and the runtime graph.

mod encode;
mod readback;

pub use encode::{encode_term, EncodeError};
pub use readback::readback;
