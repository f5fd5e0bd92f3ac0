use super::*;

impl Net {
  /// Frees a subgraph that became provably unreachable, niling every binder
  /// slot it passes so the surviving graph keeps the binder invariant.
  ///
  /// The walk is optimistic: it stops at superpositions without freeing
  /// them, since their contents may still be owned by a live duplicator
  /// elsewhere. Fan nodes orphaned this way leak until an external full
  /// sweep; normal forms are unaffected.
  pub fn collect(&mut self, term: Ptr) {
    maybe_grow(|| match term.tag() {
      Tag::Lam => {
        let bind = self.heap.get(term.loc(0));
        if !bind.is_nil() {
          self.heap.set(bind.loc(0), Ptr::NIL);
        }
        let body = self.heap.get(term.loc(1));
        self.collect(body);
        self.heap.free(term.pos(), 2);
      }
      Tag::App => {
        let fun = self.heap.get(term.loc(0));
        let arg = self.heap.get(term.loc(1));
        self.collect(fun);
        self.collect(arg);
        self.heap.free(term.pos(), 2);
      }
      Tag::Par => {}
      Tag::Var | Tag::Dp0 => {
        self.heap.set(term.loc(0), Ptr::NIL);
      }
      Tag::Dp1 => {
        self.heap.set(term.loc(1), Ptr::NIL);
      }
      Tag::Ctr | Tag::Cal => {
        for i in 0 .. term.arity() as u64 {
          let arg = self.heap.get(term.loc(i));
          self.collect(arg);
        }
        self.heap.free(term.pos(), term.arity() as usize);
      }
      Tag::Nil | Tag::Lnk => {}
    })
  }
}
