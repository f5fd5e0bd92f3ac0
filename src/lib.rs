//! An optimal λ-calculus evaluator.
//!
//! The engine reduces a minimal term language, extended with colored sharing
//! nodes, through Lamping-style local rewrites over a flat graph. Shared
//! subterms are never copied wholesale: duplication happens lazily, one node
//! at a time, through fan nodes (superpositions and duplicators) whose colors
//! keep distinct sharings from interfering.
//!
//! The crate is split into:
//! - [`run`]: the graph runtime (heap, tagged pointers, the rewrite rules,
//!   and the whnf/normalization drivers). This is the core.
//! - [`ast`]: the textual term language, its parser and printer.
//! - [`transform`]: source-to-source passes over terms.
//! - [`host`]: the translation layer between terms and runtime graphs.

pub mod ast;
pub mod host;
pub mod run;
pub mod transform;
pub mod util;
