//! Graph-level properties that must hold across reductions.

use insta::assert_display_snapshot;
use olc::{ast::Term, host, run::Net};

fn encoded(src: &str) -> Net {
  let mut term: Term = src.parse().unwrap();
  term.linearize();
  let mut net = Net::new();
  host::encode_term(&mut net, &term).unwrap();
  net
}

const SAMPLES: &[&str] = &[
  "(λx: x λa: λb: a)",
  "(λx: (x x) λy: y)",
  "!0<a b> = λx: x; (a b)",
  "(&0<λx: x λx: x> λk: k)",
  "!0<a b> = $5:2{λx: x λy: y}; &1<a b>",
  "(λn: λs: λz: ((n λx: (s (s x))) z) λs: λz: (s z))",
];

#[test]
fn back_edges_hold_at_every_stage() {
  for src in SAMPLES {
    let mut net = encoded(src);
    net.sanity_check().unwrap();
    net.reduce(Net::ROOT);
    net.sanity_check().unwrap();
    net.normalize(Net::ROOT);
    net.sanity_check().unwrap();
  }
}

#[test]
fn normalization_is_idempotent_past_the_fixpoint() {
  for src in SAMPLES {
    let mut net = encoded(src);
    net.normalize(Net::ROOT);
    let gas = net.rwts.total();
    let before = host::readback(&net).to_string();
    net.normal(Net::ROOT);
    assert_eq!(net.rwts.total(), gas, "{src}");
    assert_eq!(host::readback(&net).to_string(), before, "{src}");
  }
}

#[test]
fn whnf_stops_at_the_head() {
  let mut net = encoded("(λx: x λa: (λy: y λb: b))");
  net.reduce(Net::ROOT);
  assert_eq!(net.rwts.total(), 1);
  assert_display_snapshot!(host::readback(&net), @"λa: (λb: b λc: c)");
  net.normalize(Net::ROOT);
  assert_eq!(net.rwts.total(), 2);
  assert_display_snapshot!(host::readback(&net), @"λa: λb: b");
}

#[test]
fn results_converge_as_the_gas_limit_grows() {
  let full = {
    let mut net = encoded("!0<a b> = λx: x; (a b)");
    net.normalize(Net::ROOT);
    host::readback(&net).to_string()
  };
  let mut last = String::new();
  for limit in 0 .. 8 {
    let mut net = encoded("!0<a b> = λx: x; (a b)");
    net.set_limit(limit);
    net.normalize(Net::ROOT);
    // stopping between rewrites never breaks the graph
    net.sanity_check().unwrap();
    assert!(net.rwts.total() <= limit);
    last = host::readback(&net).to_string();
  }
  assert_eq!(last, full);
}

#[test]
fn gas_exhaustion_is_idempotent() {
  let mut net = encoded("(λx: (x x) λy: y)");
  net.set_limit(2);
  net.normalize(Net::ROOT);
  assert_eq!(net.rwts.total(), 2);
  let stuck = host::readback(&net).to_string();
  // further calls with the limit reached change nothing
  net.normalize(Net::ROOT);
  net.reduce(Net::ROOT);
  assert_eq!(net.rwts.total(), 2);
  assert_eq!(host::readback(&net).to_string(), stuck);
}

#[test]
fn unrelated_redex_order_is_unobservable() {
  let src = "!0<a b> = λx: x; &1<a b>";
  let mut head_first = encoded(src);
  head_first.normalize(Net::ROOT);

  let mut tail_first = encoded(src);
  let par = tail_first.root();
  // force the right leg before anything else, then finish normally
  tail_first.reduce(par.loc(1));
  tail_first.normalize(Net::ROOT);

  assert_eq!(
    host::readback(&head_first).to_string(),
    host::readback(&tail_first).to_string()
  );
  assert_eq!(head_first.rwts.total(), tail_first.rwts.total());
}
