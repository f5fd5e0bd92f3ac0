//! Source-to-source passes over [`Term`](crate::ast::Term)s.

mod linearize;
