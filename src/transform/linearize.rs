use crate::ast::{Col, Term};
use crate::util::maybe_grow;
use core::mem;

impl Term {
  /// Rewrites every binder that is used more than once into a chain of
  /// duplicators, renaming the occurrences apart. The rewriter assumes at
  /// most one occurrence per binder; surface terms are free to repeat names
  /// and go through here first.
  ///
  /// Each inserted duplicator gets a fresh color, strictly greater than any
  /// color written in the source, so hand-written sharings never annihilate
  /// against inserted ones.
  pub fn linearize(&mut self) {
    let mut next = self.max_color().map_or(0, |col| col + 1);
    self.linearize_go(&mut next);
  }

  fn linearize_go(&mut self, next: &mut Col) {
    maybe_grow(|| match self {
      Term::Var { .. } => {}
      Term::Lam { nam, bod } => {
        bod.linearize_go(next);
        split(nam, bod, next);
      }
      Term::App { fun, arg } => {
        fun.linearize_go(next);
        arg.linearize_go(next);
      }
      Term::Par { fst, snd, .. } => {
        fst.linearize_go(next);
        snd.linearize_go(next);
      }
      Term::Let { nam0, nam1, expr, body, .. } => {
        expr.linearize_go(next);
        body.linearize_go(next);
        split(nam0, body, next);
        split(nam1, body, next);
      }
      Term::Ctr { args, .. } | Term::Cal { args, .. } => {
        for arg in args {
          arg.linearize_go(next);
        }
      }
    })
  }

  fn max_color(&self) -> Option<Col> {
    maybe_grow(|| match self {
      Term::Var { .. } => None,
      Term::Lam { bod, .. } => bod.max_color(),
      Term::App { fun, arg } => fun.max_color().max(arg.max_color()),
      Term::Par { col, fst, snd } => Some(*col).max(fst.max_color()).max(snd.max_color()),
      Term::Let { col, expr, body, .. } => Some(*col).max(expr.max_color()).max(body.max_color()),
      Term::Ctr { args, .. } | Term::Cal { args, .. } => args.iter().filter_map(Term::max_color).max(),
    })
  }

  /// Free occurrences of `nam`, respecting shadowing.
  fn occurrences(&self, nam: &str) -> usize {
    maybe_grow(|| match self {
      Term::Var { nam: occ } => usize::from(occ == nam),
      Term::Lam { nam: bound, bod } => {
        if bound == nam {
          0
        } else {
          bod.occurrences(nam)
        }
      }
      Term::App { fun, arg } => fun.occurrences(nam) + arg.occurrences(nam),
      Term::Par { fst, snd, .. } => fst.occurrences(nam) + snd.occurrences(nam),
      Term::Let { nam0, nam1, expr, body, .. } => {
        let shadowed = nam0 == nam || nam1 == nam;
        expr.occurrences(nam) + if shadowed { 0 } else { body.occurrences(nam) }
      }
      Term::Ctr { args, .. } | Term::Cal { args, .. } => args.iter().map(|arg| arg.occurrences(nam)).sum(),
    })
  }

  /// Renames the free occurrences of `nam`, left to right, to `nam.0`,
  /// `nam.1`, ….
  fn rename_occurrences(&mut self, nam: &str, idx: &mut usize) {
    maybe_grow(|| match self {
      Term::Var { nam: occ } => {
        if occ.as_str() == nam {
          *occ = format!("{nam}.{idx}");
          *idx += 1;
        }
      }
      Term::Lam { nam: bound, bod } => {
        if bound.as_str() != nam {
          bod.rename_occurrences(nam, idx);
        }
      }
      Term::App { fun, arg } => {
        fun.rename_occurrences(nam, idx);
        arg.rename_occurrences(nam, idx);
      }
      Term::Par { fst, snd, .. } => {
        fst.rename_occurrences(nam, idx);
        snd.rename_occurrences(nam, idx);
      }
      Term::Let { nam0, nam1, expr, body, .. } => {
        expr.rename_occurrences(nam, idx);
        if nam0.as_str() != nam && nam1.as_str() != nam {
          body.rename_occurrences(nam, idx);
        }
      }
      Term::Ctr { args, .. } | Term::Cal { args, .. } => {
        for arg in args {
          arg.rename_occurrences(nam, idx);
        }
      }
    })
  }
}

/// Splits a binder with `n ≥ 2` occurrences in `body` into a chain of `n − 1`
/// duplicators: the outermost shares the binder itself, each inner one shares
/// the spill leg (`nam.sK`) of the duplicator above it, and the leaves
/// (`nam.K`) replace the original occurrences.
fn split(nam: &str, body: &mut Term, next: &mut Col) {
  let count = body.occurrences(nam);
  if count < 2 {
    return;
  }
  let mut idx = 0;
  body.rename_occurrences(nam, &mut idx);
  let mut inner = mem::replace(body, Term::Var { nam: String::new() });
  for i in (0 ..= count - 2).rev() {
    let col = *next;
    *next += 1;
    let expr = if i == 0 { nam.to_owned() } else { format!("{nam}.s{i}") };
    let nam0 = format!("{nam}.{i}");
    let nam1 = if i == count - 2 { format!("{nam}.{}", count - 1) } else { format!("{nam}.s{}", i + 1) };
    inner = Term::Let {
      col,
      nam0,
      nam1,
      expr: Box::new(Term::Var { nam: expr }),
      body: Box::new(inner),
    };
  }
  *body = inner;
}
