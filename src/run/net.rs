use super::*;

/// A single-threaded reduction engine over a flat [`Heap`].
#[derive(Debug)]
pub struct Net {
  pub heap: Heap,
  pub rwts: Rewrites,
  limit: u64,
}

/// Per-rule rewrite counters; their sum is the engine's gas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rewrites {
  pub beta: u64, // lambda applications
  pub sapp: u64, // superposed applications
  pub dupl: u64, // lambda duplications
  pub anni: u64, // equal-color fan annihilations
  pub comm: u64, // distinct-color fan commutations
  pub dupc: u64, // constructor duplications
}

impl Rewrites {
  pub fn total(&self) -> u64 {
    self.beta + self.sapp + self.dupl + self.anni + self.comm + self.dupc
  }
}

/// A broken binder ↔ occurrence bond. These only arise from bugs in graph
/// construction or rewriting; reduction must not continue past one.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SanityError {
  #[error("occurrence at {occurrence} is not backed by its binder slot {binder}")]
  UnboundOccurrence { occurrence: u64, binder: u64 },
  #[error("binder slot {binder} names cell {occurrence}, which holds no matching occurrence")]
  DanglingBinder { binder: u64, occurrence: u64 },
}

impl Net {
  /// The root slot. A graph builder installs its term here; reduction of the
  /// whole graph starts here.
  pub const ROOT: u64 = 0;

  pub fn new() -> Self {
    Net { heap: Heap::new(), rwts: Rewrites::default(), limit: u64::MAX }
  }

  pub fn with_capacity(cells: usize) -> Self {
    Net { heap: Heap::with_capacity(cells), rwts: Rewrites::default(), limit: u64::MAX }
  }

  pub fn root(&self) -> Ptr {
    self.heap.get(Net::ROOT)
  }

  /// Clears the heap and the counters. The gas limit is kept.
  pub fn reset(&mut self) {
    self.heap.reset();
    self.rwts = Rewrites::default();
  }

  /// Total rewrite count.
  pub fn gas(&self) -> u64 {
    self.rwts.total()
  }

  /// Caps the number of rewrites. Once the cap is reached every rule becomes
  /// a no-op and the drivers return the current, possibly partial, term.
  pub fn set_limit(&mut self, limit: u64) {
    self.limit = limit;
  }

  pub fn exhausted(&self) -> bool {
    self.rwts.total() >= self.limit
  }

  /// Fetches the `i`-th slot of a node.
  #[inline(always)]
  pub fn arg(&self, term: Ptr, i: u64) -> Ptr {
    self.heap.get(term.loc(i))
  }

  /// Reduces the content of `host` to weak head normal form, following the
  /// left spine: an application forces its function first, a projection
  /// forces its duplicator's expression first.
  ///
  /// Rules that rewrite `host` to a plain substitution (App-Lam, Dup-Lam,
  /// annihilation) continue the loop, since the head changed in place. Rules that
  /// install a fresh fan or constructor at `host` return it: the new head
  /// exposes no further redex here.
  pub fn reduce(&mut self, host: u64) -> Ptr {
    maybe_grow(|| loop {
      let term = self.heap.get(host);
      match term.tag() {
        Tag::App => {
          let fun = self.reduce(term.loc(0));
          match fun.tag() {
            Tag::Lam => {
              if self.exhausted() {
                return term;
              }
              self.app_lam(host, term, fun);
            }
            Tag::Par => {
              if self.exhausted() {
                return term;
              }
              return self.app_par(host, term, fun);
            }
            _ => return term,
          }
        }
        Tag::Dp0 | Tag::Dp1 => {
          let expr = self.reduce(term.loc(2));
          match expr.tag() {
            Tag::Lam => {
              if self.exhausted() {
                return term;
              }
              self.dup_lam(term, expr);
            }
            Tag::Par => {
              if self.exhausted() {
                return term;
              }
              if term.col() == expr.col() {
                self.anni(term, expr);
              } else {
                return self.comm(term, expr);
              }
            }
            Tag::Ctr => {
              if self.exhausted() {
                return term;
              }
              return self.dup_ctr(term, expr);
            }
            _ => return term,
          }
        }
        _ => return term,
      }
    })
  }

  /// Forces a whnf at `host`, then at every child slot of the head, with a
  /// visited set keyed by node base position: duplicators make the live
  /// graph a DAG, and both projections must not force the shared expression
  /// twice.
  ///
  /// One pass is not always enough: nodes carry no parent pointers, so a
  /// rewrite below a slot this pass already left can put a new redex above
  /// it. [`Net::normalize`] runs this to a fixpoint; callers that can
  /// tolerate a partial result may call this directly.
  pub fn normal(&mut self, host: u64) -> Ptr {
    let mut seen = IntSet::default();
    self.normal_at(host, &mut seen)
  }

  fn normal_at(&mut self, host: u64, seen: &mut IntSet<u64>) -> Ptr {
    maybe_grow(|| {
      let term = self.reduce(host);
      match term.tag() {
        Tag::Nil | Tag::Var | Tag::Lnk => return term,
        _ => {}
      }
      if !seen.insert(term.pos()) {
        return term;
      }
      match term.tag() {
        Tag::Lam => {
          self.normal_at(term.loc(1), seen);
        }
        Tag::App | Tag::Par => {
          self.normal_at(term.loc(0), seen);
          self.normal_at(term.loc(1), seen);
        }
        Tag::Dp0 | Tag::Dp1 => {
          self.normal_at(term.loc(2), seen);
        }
        Tag::Ctr | Tag::Cal => {
          for i in 0 .. term.arity() as u64 {
            self.normal_at(term.loc(i), seen);
          }
        }
        Tag::Nil | Tag::Var | Tag::Lnk => {}
      }
      term
    })
  }

  /// Runs [`Net::normal`] until a pass performs no rewrite, then returns the
  /// head. This fixpoint is the public normalization contract.
  pub fn normalize(&mut self, host: u64) -> Ptr {
    loop {
      let before = self.rwts.total();
      let term = self.normal(host);
      if self.rwts.total() == before {
        return term;
      }
    }
  }

  /// Validates the binder ↔ occurrence invariant in both directions over the
  /// whole heap: every occurrence is backed by a `Lnk` in its binder slot,
  /// and every `Lnk` names a cell holding the matching occurrence.
  pub fn sanity_check(&self) -> Result<(), SanityError> {
    for pos in 0 .. self.heap.len() as u64 {
      let cell = self.heap.get(pos);
      match cell.tag() {
        Tag::Var | Tag::Dp0 | Tag::Dp1 => {
          let binder = if cell.is(Tag::Dp1) { cell.loc(1) } else { cell.loc(0) };
          if self.heap.get(binder) != Ptr::lnk(pos) {
            return Err(SanityError::UnboundOccurrence { occurrence: pos, binder });
          }
        }
        Tag::Lnk => {
          let occurrence = cell.loc(0);
          let occ = self.heap.get(occurrence);
          let back = match occ.tag() {
            Tag::Var | Tag::Dp0 => occ.loc(0),
            Tag::Dp1 => occ.loc(1),
            _ => return Err(SanityError::DanglingBinder { binder: pos, occurrence }),
          };
          if back != pos {
            return Err(SanityError::DanglingBinder { binder: pos, occurrence });
          }
        }
        _ => {}
      }
    }
    Ok(())
  }
}

impl Default for Net {
  fn default() -> Self {
    Net::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  // (λx.x λy.y), built by hand through the embedding API
  fn identity_application() -> Net {
    let mut net = Net::new();
    let fun = net.heap.alloc(2);
    let arg = net.heap.alloc(2);
    let app = net.heap.alloc(2);
    net.link(fun + 1, Ptr::var(fun));
    net.link(arg + 1, Ptr::var(arg));
    net.link(app, Ptr::lam(fun));
    net.link(app + 1, Ptr::lam(arg));
    net.link(Net::ROOT, Ptr::app(app));
    net
  }

  #[test]
  fn beta_reduces_in_place() {
    let mut net = identity_application();
    let head = net.reduce(Net::ROOT);
    assert_eq!(head.tag(), Tag::Lam);
    assert_eq!(net.rwts.beta, 1);
    assert_eq!(net.rwts.total(), 1);
    net.sanity_check().unwrap();
  }

  #[test]
  fn gas_limit_makes_rules_no_ops() {
    let mut net = identity_application();
    net.set_limit(0);
    let head = net.reduce(Net::ROOT);
    assert_eq!(head.tag(), Tag::App);
    assert_eq!(net.rwts.total(), 0);
    // raising the limit resumes exactly where reduction stopped
    net.set_limit(u64::MAX);
    let head = net.reduce(Net::ROOT);
    assert_eq!(head.tag(), Tag::Lam);
    assert_eq!(net.rwts.total(), 1);
  }

  #[test]
  fn reset_clears_counters_and_heap() {
    let mut net = identity_application();
    net.normalize(Net::ROOT);
    net.reset();
    assert_eq!(net.rwts.total(), 0);
    assert!(net.root().is_nil());
  }

  #[test]
  fn sanity_check_catches_a_raw_occurrence_write() {
    let mut net = Net::new();
    let lam = net.heap.alloc(2);
    // bypassing `link` leaves the binder slot empty
    net.heap.set(lam + 1, Ptr::var(lam));
    assert!(net.sanity_check().is_err());
  }
}
