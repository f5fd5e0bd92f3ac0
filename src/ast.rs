//! The textual term language: AST, parser and printer.
//!
//! The grammar, one form per node kind:
//!
//! ```text
//! term ::= "λ" name ":" term              lambda
//!        | "(" term term ")"              application
//!        | "&" col "<" term term ">"      superposition
//!        | "!" col "<" name name ">" "=" term ";" term
//!                                         duplicator binding
//!        | "$" id ":" arity "{" term* "}" constructor
//!        | "@" id ":" arity "{" term* "}" function call
//!        | name                           variable occurrence
//! ```

use crate::run::MAX_ARITY;
use crate::util::maybe_grow;
use core::fmt;
use core::str::FromStr;
use thiserror::Error;
use TSPL::{new_parser, Parser};

/// A color distinguishing sharings of distinct origin. Stored in 8 bits at
/// runtime; kept wider here so the linearizer can mint fresh ones freely.
pub type Col = u32;

/// A parsed term, the currency between the surface syntax and the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Term {
  /// A variable occurrence.
  Var { nam: String },
  /// `λx: body`
  Lam { nam: String, bod: Box<Term> },
  /// `(f a)`
  App { fun: Box<Term>, arg: Box<Term> },
  /// `&c<a b>`
  Par { col: Col, fst: Box<Term>, snd: Box<Term> },
  /// `!c<a b> = e; k`
  Let { col: Col, nam0: String, nam1: String, expr: Box<Term>, body: Box<Term> },
  /// `$id:n{a b ..}`
  Ctr { id: u8, args: Vec<Term> },
  /// `@id:n{a b ..}`
  Cal { id: u8, args: Vec<Term> },
}

new_parser!(TermParser);

impl<'i> TermParser<'i> {
  fn parse_term(&mut self) -> Result<Term, String> {
    maybe_grow(|| {
      self.skip_trivia();
      match self.peek_one() {
        Some('λ') => {
          self.advance_one();
          let nam = self.parse_name()?;
          self.consume(":")?;
          let bod = Box::new(self.parse_term()?);
          Ok(Term::Lam { nam, bod })
        }
        Some('(') => {
          self.advance_one();
          let fun = Box::new(self.parse_term()?);
          let arg = Box::new(self.parse_term()?);
          self.consume(")")?;
          Ok(Term::App { fun, arg })
        }
        Some('&') => {
          self.advance_one();
          let col = self.parse_col()?;
          self.consume("<")?;
          let fst = Box::new(self.parse_term()?);
          let snd = Box::new(self.parse_term()?);
          self.consume(">")?;
          Ok(Term::Par { col, fst, snd })
        }
        Some('!') => {
          self.advance_one();
          let col = self.parse_col()?;
          self.consume("<")?;
          let nam0 = self.parse_name()?;
          let nam1 = self.parse_name()?;
          self.consume(">")?;
          self.consume("=")?;
          let expr = Box::new(self.parse_term()?);
          self.consume(";")?;
          let body = Box::new(self.parse_term()?);
          Ok(Term::Let { col, nam0, nam1, expr, body })
        }
        Some('$') => {
          self.advance_one();
          let (id, args) = self.parse_node_body()?;
          Ok(Term::Ctr { id, args })
        }
        Some('@') => {
          self.advance_one();
          let (id, args) = self.parse_node_body()?;
          Ok(Term::Cal { id, args })
        }
        _ => {
          let nam = self.parse_name()?;
          Ok(Term::Var { nam })
        }
      }
    })
  }

  fn parse_col(&mut self) -> Result<Col, String> {
    let val = self.parse_u64()?;
    Col::try_from(val).map_err(|_| format!("color {val} does not fit in 32 bits"))
  }

  fn parse_node_body(&mut self) -> Result<(u8, Vec<Term>), String> {
    let id = self.parse_u64()?;
    let id = u8::try_from(id).map_err(|_| format!("node id {id} does not fit in 8 bits"))?;
    self.consume(":")?;
    let arity = self.parse_u64()?;
    if arity as usize > MAX_ARITY {
      return Err(format!("arity {arity} does not fit in 8 bits"));
    }
    self.consume("{")?;
    let mut args = Vec::new();
    loop {
      self.skip_trivia();
      if self.peek_one() == Some('}') {
        self.advance_one();
        break;
      }
      args.push(self.parse_term()?);
    }
    if args.len() as u64 != arity {
      return Err(format!("node declares arity {arity} but has {} arguments", args.len()));
    }
    Ok((id, args))
  }
}

/// A surface-syntax error.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ParseError(pub String);

impl FromStr for Term {
  type Err = ParseError;

  fn from_str(str: &str) -> Result<Self, Self::Err> {
    let mut parser = TermParser::new(str);
    let term = parser.parse_term().map_err(ParseError)?;
    parser.skip_trivia();
    if parser.index != parser.input.len() {
      return Err(ParseError(format!("unexpected trailing input at byte {}", parser.index)));
    }
    Ok(term)
  }
}

impl fmt::Display for Term {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    maybe_grow(|| match self {
      Term::Var { nam } => f.write_str(nam),
      Term::Lam { nam, bod } => write!(f, "λ{nam}: {bod}"),
      Term::App { fun, arg } => write!(f, "({fun} {arg})"),
      Term::Par { col, fst, snd } => write!(f, "&{col}<{fst} {snd}>"),
      Term::Let { col, nam0, nam1, expr, body } => write!(f, "!{col}<{nam0} {nam1}> = {expr}; {body}"),
      Term::Ctr { id, args } => fmt_node(f, '$', *id, args),
      Term::Cal { id, args } => fmt_node(f, '@', *id, args),
    })
  }
}

fn fmt_node(f: &mut fmt::Formatter<'_>, sigil: char, id: u8, args: &[Term]) -> fmt::Result {
  write!(f, "{sigil}{id}:{}{{", args.len())?;
  for (i, arg) in args.iter().enumerate() {
    if i > 0 {
      f.write_str(" ")?;
    }
    write!(f, "{arg}")?;
  }
  f.write_str("}")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn surface_forms_round_trip() {
    for src in [
      "λx: x",
      "(λx: x λa: λb: a)",
      "&2<a b>",
      "!0<a b> = λx: x; (a b)",
      "$3:2{λx: x $0:0{}}",
      "@7:1{λk: k}",
    ] {
      let term: Term = src.parse().unwrap();
      assert_eq!(term.to_string(), src);
    }
  }

  #[test]
  fn rejects_malformed_input() {
    assert!("(λx: x".parse::<Term>().is_err());
    assert!("$1:2{a}".parse::<Term>().is_err());
    assert!("$1:300{}".parse::<Term>().is_err());
    assert!("λx: x x".parse::<Term>().is_err());
  }
}
