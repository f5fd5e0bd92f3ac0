//! The graph runtime: a flat heap of tagged pointers, rewritten in place.
//!
//! Every value is a cell holding one tagged pointer; a node occupies up to
//! three consecutive cells starting at its base position:
//!
//! | node        | cells | slots                                    |
//! |-------------|-------|------------------------------------------|
//! | `Lam`       | 2     | binder back-link, body                   |
//! | `App`       | 2     | function, argument                       |
//! | `Par`       | 2     | left value, right value                  |
//! | duplicator  | 3     | `Dp0` back-link, `Dp1` back-link, expr   |
//! | `Ctr`/`Cal` | arity | arguments                                |
//!
//! `Var`, `Dp0` and `Dp1` pointers are occurrences: their position names the
//! node that binds them, and the binder's back-link slot holds a `Lnk` to the
//! cell where the occurrence currently sits. [`Net::link`] maintains this
//! bond on every write; it is the only primitive allowed to store an
//! occurrence into the heap.
//!
//! `Par`, `Dp0` and `Dp1` carry an 8-bit color. A duplicator meeting a
//! superposition of its own color annihilates with it; distinct colors
//! commute past each other, so sharings of distinct origin never mix.
//!
//! Each rewrite rule consumes exactly the two nodes it interacts and frees
//! their cells after rewiring, allocating fresh cells only where duplication
//! demands them. Nodes carry no parent pointers, which keeps them small but
//! means normalization is a fixpoint: see [`Net::normalize`].

mod allocator;
mod collect;
mod interact;
mod linker;
mod net;
mod ptr;

pub use allocator::*;
pub use net::*;
pub use ptr::*;

use crate::util::{bi_enum, maybe_grow};
use arrayvec::ArrayVec;
use core::fmt;
use nohash_hasher::{IntMap, IntSet};
use thiserror::Error;
