use nohash_hasher::{IntMap, IntSet};

use crate::ast::{Col, Term};
use crate::run::{Net, Ptr, Tag};
use crate::util::{create_var, maybe_grow};

/// Reads the graph under the root slot back into a term, generating fresh
/// names (`a`, `b`, …) for lambda and duplicator binders.
///
/// Residual duplicators are emitted as `!c<x y> = e;` bindings in front of
/// the head term, in discovery order. Their placement is best-effort display:
/// an expression may mention a lambda binder it sits above, so the output is
/// for inspection, not re-encoding.
pub fn readback(net: &Net) -> Term {
  let mut reader = Reader {
    net,
    names: IntMap::default(),
    seen: IntSet::default(),
    dups: Vec::new(),
    next: 0,
  };
  let term = reader.read(net.root());
  // reading a duplicator's expression may well discover further duplicators
  let mut exprs = Vec::new();
  while exprs.len() < reader.dups.len() {
    let (pos, _) = reader.dups[exprs.len()];
    let expr = reader.read(net.heap.get(pos + 2));
    exprs.push(expr);
  }
  let mut term = term;
  while let Some(expr) = exprs.pop() {
    let (pos, col) = reader.dups[exprs.len()];
    let nam0 = reader.name(pos);
    let nam1 = reader.name(pos + 1);
    term = Term::Let { col: Col::from(col), nam0, nam1, expr: Box::new(expr), body: Box::new(term) };
  }
  term
}

struct Reader<'n> {
  net: &'n Net,
  /// binder slot position → generated name; a lambda's key is its base, a
  /// duplicator's keys are its two back-link slots.
  names: IntMap<u64, String>,
  /// duplicator nodes already discovered.
  seen: IntSet<u64>,
  /// discovery-ordered duplicators, with their colors.
  dups: Vec<(u64, u8)>,
  next: usize,
}

impl<'n> Reader<'n> {
  fn name(&mut self, key: u64) -> String {
    if let Some(name) = self.names.get(&key) {
      return name.clone();
    }
    let name = create_var(self.next);
    self.next += 1;
    self.names.insert(key, name.clone());
    name
  }

  fn read(&mut self, ptr: Ptr) -> Term {
    maybe_grow(|| match ptr.tag() {
      Tag::Var => Term::Var { nam: self.name(ptr.pos()) },
      Tag::Lam => {
        let nam = self.name(ptr.pos());
        let bod = self.read(self.net.arg(ptr, 1));
        Term::Lam { nam, bod: Box::new(bod) }
      }
      Tag::App => {
        let fun = self.read(self.net.arg(ptr, 0));
        let arg = self.read(self.net.arg(ptr, 1));
        Term::App { fun: Box::new(fun), arg: Box::new(arg) }
      }
      Tag::Par => {
        let fst = self.read(self.net.arg(ptr, 0));
        let snd = self.read(self.net.arg(ptr, 1));
        Term::Par { col: Col::from(ptr.col()), fst: Box::new(fst), snd: Box::new(snd) }
      }
      Tag::Dp0 | Tag::Dp1 => {
        if self.seen.insert(ptr.pos()) {
          self.dups.push((ptr.pos(), ptr.col()));
        }
        let key = if ptr.is(Tag::Dp0) { ptr.pos() } else { ptr.pos() + 1 };
        Term::Var { nam: self.name(key) }
      }
      Tag::Ctr | Tag::Cal => {
        let args = (0 .. ptr.arity() as u64).map(|i| self.read(self.net.arg(ptr, i))).collect();
        match ptr.tag() {
          Tag::Ctr => Term::Ctr { id: ptr.id(), args },
          _ => Term::Cal { id: ptr.id(), args },
        }
      }
      // a hole: an erased slot, or a graph cut short by the gas limit
      Tag::Nil | Tag::Lnk => Term::Var { nam: "_".to_owned() },
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::host::encode_term;
  use insta::assert_display_snapshot;

  fn round_trip(src: &str) -> Term {
    let term: Term = src.parse().unwrap();
    let mut net = Net::new();
    encode_term(&mut net, &term).unwrap();
    readback(&net)
  }

  #[test]
  fn renames_binders_in_reading_order() {
    assert_display_snapshot!(round_trip("λx: λy: (x y)"), @"λa: λb: (a b)");
    assert_display_snapshot!(round_trip("&3<λt: t λf: λg: f>"), @"&3<λa: a λb: λc: b>");
  }

  #[test]
  fn residual_duplicators_are_hoisted() {
    assert_display_snapshot!(round_trip("λx: !2<a b> = x; (a b)"), @"!2<b c> = a; λa: (b c)");
  }

  #[test]
  fn constructors_and_calls_read_back() {
    assert_display_snapshot!(round_trip("$3:2{λx: x @1:0{}}"), @"$3:2{λa: a @1:0{}}");
  }
}
