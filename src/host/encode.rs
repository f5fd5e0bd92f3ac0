use std::collections::HashMap;

use crate::ast::{Col, Term};
use crate::run::{Net, Ptr, Tag, MAX_ARITY};
use crate::util::maybe_grow;
use thiserror::Error;

/// A term that cannot be turned into a graph.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
  #[error("variable `{0}` is not bound")]
  UnboundVariable(String),
  #[error("binder `{0}` is used more than once; linearize the term first")]
  NonLinearVariable(String),
  #[error("color {0} does not fit in the 8-bit color field")]
  ColorOverflow(Col),
  #[error("arity {0} does not fit in the 8-bit arity field")]
  ArityOverflow(usize),
}

/// Builds the runtime graph of `term` at the root slot and returns the root
/// pointer. The binder ↔ occurrence invariant is established exclusively
/// through [`Net::link`]. On error the heap is left partially built; `reset`
/// it before reuse.
pub fn encode_term(net: &mut Net, term: &Term) -> Result<Ptr, EncodeError> {
  let mut encoder = Encoder { net, scope: HashMap::new() };
  encoder.encode(term, Net::ROOT)
}

struct Encoder<'n> {
  net: &'n mut Net,
  /// name → stack of binders in scope; an entry is taken on use, so a second
  /// use of the same binder is caught instead of silently rebinding.
  scope: HashMap<String, Vec<Option<Ptr>>>,
}

impl<'n> Encoder<'n> {
  fn encode(&mut self, term: &Term, host: u64) -> Result<Ptr, EncodeError> {
    maybe_grow(|| match term {
      Term::Var { nam } => {
        let slot = self
          .scope
          .get_mut(nam)
          .and_then(|stack| stack.last_mut())
          .ok_or_else(|| EncodeError::UnboundVariable(nam.clone()))?;
        let occurrence = slot.take().ok_or_else(|| EncodeError::NonLinearVariable(nam.clone()))?;
        Ok(self.net.link(host, occurrence))
      }
      Term::Lam { nam, bod } => {
        let pos = self.net.heap.alloc(2);
        self.bind(nam, Ptr::var(pos));
        let bod = self.encode(bod, pos + 1);
        self.unbind(nam);
        bod?;
        Ok(self.net.link(host, Ptr::lam(pos)))
      }
      Term::App { fun, arg } => {
        let pos = self.net.heap.alloc(2);
        self.encode(fun, pos)?;
        self.encode(arg, pos + 1)?;
        Ok(self.net.link(host, Ptr::app(pos)))
      }
      Term::Par { col, fst, snd } => {
        let col = fit_col(*col)?;
        let pos = self.net.heap.alloc(2);
        self.encode(fst, pos)?;
        self.encode(snd, pos + 1)?;
        Ok(self.net.link(host, Ptr::par(col, pos)))
      }
      Term::Let { col, nam0, nam1, expr, body } => {
        let col = fit_col(*col)?;
        let pos = self.net.heap.alloc(3);
        self.encode(expr, pos + 2)?;
        self.bind(nam0, Ptr::dp0(col, pos));
        self.bind(nam1, Ptr::dp1(col, pos));
        let body = self.encode(body, host);
        self.unbind(nam1);
        self.unbind(nam0);
        body
      }
      Term::Ctr { id, args } => self.node(Tag::Ctr, *id, args, host),
      Term::Cal { id, args } => self.node(Tag::Cal, *id, args, host),
    })
  }

  fn node(&mut self, tag: Tag, id: u8, args: &[Term], host: u64) -> Result<Ptr, EncodeError> {
    if args.len() > MAX_ARITY {
      return Err(EncodeError::ArityOverflow(args.len()));
    }
    let pos = self.net.heap.alloc(args.len());
    for (i, arg) in args.iter().enumerate() {
      self.encode(arg, pos + i as u64)?;
    }
    Ok(self.net.link(host, Ptr::new(tag, args.len() as u8, id, pos)))
  }

  fn bind(&mut self, nam: &str, occurrence: Ptr) {
    self.scope.entry(nam.to_owned()).or_default().push(Some(occurrence));
  }

  fn unbind(&mut self, nam: &str) {
    if let Some(stack) = self.scope.get_mut(nam) {
      stack.pop();
    }
  }
}

fn fit_col(col: Col) -> Result<u8, EncodeError> {
  u8::try_from(col).map_err(|_| EncodeError::ColorOverflow(col))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn encoded(src: &str) -> Result<Net, EncodeError> {
    let term: Term = src.parse().unwrap();
    let mut net = Net::new();
    encode_term(&mut net, &term)?;
    Ok(net)
  }

  #[test]
  fn encoded_graphs_are_sane() {
    for src in ["λx: x", "(λx: x λy: y)", "!0<a b> = λx: x; (a b)", "&1<λx: x λy: y>", "$2:1{λx: x}"] {
      encoded(src).unwrap().sanity_check().unwrap();
    }
  }

  #[test]
  fn unused_binders_stay_nil() {
    let net = encoded("λx: λy: x").unwrap();
    let outer = net.root();
    assert_eq!(outer.tag(), Tag::Lam);
    let inner = net.arg(outer, 1);
    assert!(net.arg(inner, 0).is_nil());
  }

  #[test]
  fn rejects_unbound_and_non_linear_variables() {
    assert_eq!(encoded("λx: y").unwrap_err(), EncodeError::UnboundVariable("y".to_owned()));
    assert_eq!(encoded("λx: (x x)").unwrap_err(), EncodeError::NonLinearVariable("x".to_owned()));
  }

  #[test]
  fn rejects_wide_colors() {
    assert_eq!(encoded("&999<λx: x λy: y>").unwrap_err(), EncodeError::ColorOverflow(999));
  }
}
