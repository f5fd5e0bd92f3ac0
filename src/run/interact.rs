use super::*;

// The six local rewrite rules. Each consumes exactly the two nodes it
// interacts, installs a fresh local subgraph through `link`/`subst`, frees
// the consumed cells, and bumps its counter. Slots of a consumed node are
// read before anything is written over them; the one exception is noted
// inline.
impl Net {
  /// `(λx.b a)`: the argument replaces the variable and the application
  /// becomes the body in place.
  pub(crate) fn app_lam(&mut self, host: u64, term: Ptr, fun: Ptr) {
    self.rwts.beta += 1;
    let arg = self.heap.get(term.loc(1));
    let bind = self.heap.get(fun.loc(0));
    self.subst(bind, arg);
    // when the body is the lambda's own variable, the subst above just
    // rewrote the body slot; it must be read after
    let body = self.heap.get(fun.loc(1));
    self.link(host, body);
    self.heap.free(term.pos(), 2);
    self.heap.free(fun.pos(), 2);
  }

  /// `(&c<f0 f1> a)`: the application superposes. Both branches get applied,
  /// sharing the argument through a fresh duplicator of the same color.
  pub(crate) fn app_par(&mut self, host: u64, term: Ptr, fun: Ptr) -> Ptr {
    self.rwts.sapp += 1;
    let col = fun.col();
    let arg = self.heap.get(term.loc(1));
    let fn0 = self.heap.get(fun.loc(0));
    let fn1 = self.heap.get(fun.loc(1));
    let dup = self.heap.alloc(3);
    let ap0 = self.heap.alloc(2);
    let ap1 = self.heap.alloc(2);
    let par = self.heap.alloc(2);
    self.link(dup + 2, arg);
    self.link(ap0, fn0);
    self.link(ap0 + 1, Ptr::dp0(col, dup));
    self.link(ap1, fn1);
    self.link(ap1 + 1, Ptr::dp1(col, dup));
    self.link(par, Ptr::app(ap0));
    self.link(par + 1, Ptr::app(ap1));
    let done = self.link(host, Ptr::par(col, par));
    self.heap.free(term.pos(), 2);
    self.heap.free(fun.pos(), 2);
    done
  }

  /// `!c<r s> = λx.f`: the lambda splits into two fresh lambdas whose bodies
  /// share `f` through a fresh duplicator of the same color; the bound
  /// variable becomes a superposition of the fresh binders.
  pub(crate) fn dup_lam(&mut self, term: Ptr, expr: Ptr) {
    self.rwts.dupl += 1;
    let col = term.col();
    let dup = term.pos();
    let lam = expr.pos();
    let lam0 = self.heap.alloc(2);
    let lam1 = self.heap.alloc(2);
    let ndup = self.heap.alloc(3);
    let npar = self.heap.alloc(2);
    let body = self.heap.get(expr.loc(1));
    self.link(ndup + 2, body);
    self.link(lam0 + 1, Ptr::dp0(col, ndup));
    self.link(lam1 + 1, Ptr::dp1(col, ndup));
    self.link(npar, Ptr::var(lam0));
    self.link(npar + 1, Ptr::var(lam1));
    let fst = self.heap.get(dup);
    let snd = self.heap.get(dup + 1);
    self.subst(fst, Ptr::lam(lam0));
    self.subst(snd, Ptr::lam(lam1));
    // if the body was the lambda's own variable, its occurrence moved into
    // the fresh duplicator's expr slot above, so the binder is read here
    let bind = self.heap.get(expr.loc(0));
    self.subst(bind, Ptr::par(col, npar));
    self.heap.free(dup, 3);
    self.heap.free(lam, 2);
  }

  /// `!A<r s> = &A<a b>`: fans of the same color annihilate, each projection
  /// taking its side of the pair.
  pub(crate) fn anni(&mut self, term: Ptr, expr: Ptr) {
    self.rwts.anni += 1;
    let dup = term.pos();
    let par = expr.pos();
    let fst = self.heap.get(par);
    let snd = self.heap.get(par + 1);
    let dp0 = self.heap.get(dup);
    let dp1 = self.heap.get(dup + 1);
    self.subst(dp0, fst);
    self.subst(dp1, snd);
    self.heap.free(dup, 3);
    self.heap.free(par, 2);
  }

  /// `!A<r s> = &B<a b>` with `A ≠ B`: fans of distinct colors commute.
  /// Each projection becomes a pair of projections, with both colors carried
  /// across the crossed structure.
  pub(crate) fn comm(&mut self, term: Ptr, expr: Ptr) -> Ptr {
    self.rwts.comm += 1;
    let dcol = term.col();
    let pcol = expr.col();
    let dup = term.pos();
    let par = expr.pos();
    let fst = self.heap.get(par);
    let snd = self.heap.get(par + 1);
    let par0 = self.heap.alloc(2);
    let par1 = self.heap.alloc(2);
    let dup0 = self.heap.alloc(3);
    let dup1 = self.heap.alloc(3);
    self.link(dup0 + 2, fst);
    self.link(dup1 + 2, snd);
    self.link(par0, Ptr::dp0(dcol, dup0));
    self.link(par0 + 1, Ptr::dp0(dcol, dup1));
    self.link(par1, Ptr::dp1(dcol, dup0));
    self.link(par1 + 1, Ptr::dp1(dcol, dup1));
    let dp0 = self.heap.get(dup);
    let dp1 = self.heap.get(dup + 1);
    self.subst(dp0, Ptr::par(pcol, par0));
    self.subst(dp1, Ptr::par(pcol, par1));
    self.heap.free(dup, 3);
    self.heap.free(par, 2);
    if term.is(Tag::Dp0) { Ptr::par(pcol, par0) } else { Ptr::par(pcol, par1) }
  }

  /// `!A<r s> = $id{a ..}`: the duplicator pushes through the constructor,
  /// one fresh duplicator per argument.
  pub(crate) fn dup_ctr(&mut self, term: Ptr, expr: Ptr) -> Ptr {
    self.rwts.dupc += 1;
    let col = term.col();
    let arity = expr.arity();
    let id = expr.id();
    let dup = term.pos();
    let ctr = expr.pos();
    let ctr0 = self.heap.alloc(arity as usize);
    let ctr1 = self.heap.alloc(arity as usize);
    let mut dups = ArrayVec::<u64, MAX_ARITY>::new();
    for _ in 0 .. arity {
      dups.push(self.heap.alloc(3));
    }
    for i in 0 .. arity as u64 {
      let field = self.heap.get(expr.loc(i));
      let each = dups[i as usize];
      self.link(each + 2, field);
      self.link(ctr0 + i, Ptr::dp0(col, each));
      self.link(ctr1 + i, Ptr::dp1(col, each));
    }
    let dp0 = self.heap.get(dup);
    let dp1 = self.heap.get(dup + 1);
    self.subst(dp0, Ptr::ctr(arity, id, ctr0));
    self.subst(dp1, Ptr::ctr(arity, id, ctr1));
    self.heap.free(dup, 3);
    self.heap.free(ctr, arity as usize);
    if term.is(Tag::Dp0) { Ptr::ctr(arity, id, ctr0) } else { Ptr::ctr(arity, id, ctr1) }
  }
}
