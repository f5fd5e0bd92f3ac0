use super::*;

impl Net {
  /// Writes `ptr` into `cell[pos]`, re-establishing the binder back-edge when
  /// `ptr` is an occurrence. Every rewrite funnels its variable-bearing
  /// writes through here; a `Var`/`Dp0`/`Dp1` stored any other way breaks the
  /// binder ↔ occurrence bond.
  #[inline]
  pub fn link(&mut self, pos: u64, ptr: Ptr) -> Ptr {
    self.heap.set(pos, ptr);
    match ptr.tag() {
      Tag::Var | Tag::Dp0 => self.heap.set(ptr.loc(0), Ptr::lnk(pos)),
      Tag::Dp1 => self.heap.set(ptr.loc(1), Ptr::lnk(pos)),
      _ => {}
    }
    ptr
  }

  /// Replaces a binder's occurrence with `value`. `binder` is the content of
  /// the binder's back-link slot: a `Lnk` naming the occurrence cell, or
  /// `Nil` if the variable was never used. In that case `value` just became
  /// unreachable along this path and is collected instead.
  pub fn subst(&mut self, binder: Ptr, value: Ptr) {
    if binder.is_nil() {
      self.collect(value);
    } else {
      self.link(binder.loc(0), value);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn linking_an_occurrence_patches_its_binder() {
    let mut net = Net::new();
    let lam = net.heap.alloc(2);
    net.link(lam + 1, Ptr::var(lam));
    assert_eq!(net.heap.get(lam), Ptr::lnk(lam + 1));
  }

  #[test]
  fn relinking_moves_the_back_edge() {
    let mut net = Net::new();
    let lam = net.heap.alloc(2);
    let app = net.heap.alloc(2);
    net.link(lam + 1, Ptr::var(lam));
    net.link(app, Ptr::var(lam));
    assert_eq!(net.heap.get(lam), Ptr::lnk(app));
  }

  #[test]
  fn duplicator_projections_use_their_own_slots() {
    let mut net = Net::new();
    let dup = net.heap.alloc(3);
    let app = net.heap.alloc(2);
    net.link(app, Ptr::dp0(1, dup));
    net.link(app + 1, Ptr::dp1(1, dup));
    assert_eq!(net.heap.get(dup), Ptr::lnk(app));
    assert_eq!(net.heap.get(dup + 1), Ptr::lnk(app + 1));
  }

  #[test]
  fn substituting_an_unused_binder_collects_the_value() {
    let mut net = Net::new();
    let lam = net.heap.alloc(2);
    net.subst(Ptr::NIL, Ptr::lam(lam));
    assert!(net.heap.get(lam).is_nil());
    // the freed node is available again
    assert_eq!(net.heap.alloc(2), lam);
  }
}
