use clap::{Args, Parser, Subcommand};
use olc::{ast::Term, host, run::Net, util::parse_abbrev_number};

use std::{
  fs, process,
  time::{Duration, Instant},
};

fn main() {
  let cli = Cli::parse();
  match cli.mode {
    CliMode::Reduce { exprs, opts } => {
      let terms: Vec<Term> = exprs.iter().map(|src| parse_term(src)).collect();
      reduce_terms(&terms, &opts);
    }
    CliMode::Run { file, opts } => {
      let src = fs::read_to_string(&file).unwrap_or_else(|_| {
        eprintln!("Input file {:?} not found", file);
        process::exit(1);
      });
      let term = parse_term(&src);
      reduce_terms(&[term], &opts);
    }
  }
}

#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "An optimal λ-calculus evaluator",
  long_about = r##"
An optimal λ-calculus evaluator

Examples:
$ olc reduce -- "(λx: x λa: λb: a)"
$ olc reduce -s -- "!0<a b> = λx: x; (a b)"
$ olc run program.olc"##
)]
struct Cli {
  #[command(subcommand)]
  mode: CliMode,
}

#[derive(Subcommand, Debug)]
enum CliMode {
  /// Reduce expressions to their normal form.
  ///
  /// The expressions are passed as command-line arguments, after a double
  /// dash ('--'). The normal form of each expression is printed on its own
  /// line.
  Reduce {
    #[arg(required = false, last = true)]
    /// Expressions to reduce.
    exprs: Vec<String>,
    #[command(flatten)]
    opts: RuntimeOpts,
  },
  /// Reduce the term in a file to its normal form.
  Run {
    /// Name of the file to load.
    file: String,
    #[command(flatten)]
    opts: RuntimeOpts,
  },
}

#[derive(Args, Clone, Debug)]
struct RuntimeOpts {
  #[arg(short = 's', long = "stats")]
  /// Show rewrite statistics.
  show_stats: bool,
  #[arg(short = 'm', long = "memory", value_parser = parse_abbrev_number::<usize>)]
  /// How many heap cells to reserve on startup.
  ///
  /// Supports abbreviations such as '4G' or '400M'.
  memory: Option<usize>,
  #[arg(short = 'g', long = "gas", value_parser = parse_abbrev_number::<u64>)]
  /// Maximum number of rewrites; reduction stops cleanly at the limit.
  ///
  /// Falls back to the GAS_LIMIT environment variable when not given.
  gas: Option<u64>,
}

fn parse_term(src: &str) -> Term {
  src.parse().unwrap_or_else(|e| {
    eprintln!("Parsing error {e}");
    process::exit(1);
  })
}

fn gas_limit(opts: &RuntimeOpts) -> Option<u64> {
  opts.gas.or_else(|| std::env::var("GAS_LIMIT").ok().and_then(|v| parse_abbrev_number(&v).ok()))
}

fn reduce_terms(terms: &[Term], opts: &RuntimeOpts) {
  for term in terms {
    let mut term = term.clone();
    term.linearize();
    let mut net = Net::with_capacity(opts.memory.unwrap_or(0));
    if let Some(limit) = gas_limit(opts) {
      net.set_limit(limit);
    }
    if let Err(e) = host::encode_term(&mut net, &term) {
      eprintln!("Encoding error {e}");
      process::exit(1);
    }
    let start_time = Instant::now();
    net.normalize(Net::ROOT);
    let elapsed = start_time.elapsed();
    println!("{}", host::readback(&net));
    if opts.show_stats {
      print_stats(&net, elapsed);
    }
  }
}

fn print_stats(net: &Net, elapsed: Duration) {
  eprintln!("RWTS   : {:>15}", group_digits(net.rwts.total()));
  eprintln!("- BETA : {:>15}", group_digits(net.rwts.beta));
  eprintln!("- SAPP : {:>15}", group_digits(net.rwts.sapp));
  eprintln!("- DUPL : {:>15}", group_digits(net.rwts.dupl));
  eprintln!("- ANNI : {:>15}", group_digits(net.rwts.anni));
  eprintln!("- COMM : {:>15}", group_digits(net.rwts.comm));
  eprintln!("- DUPC : {:>15}", group_digits(net.rwts.dupc));
  eprintln!("TIME   : {:.3?}", elapsed);
  eprintln!("RPS    : {:.3} M", net.rwts.total() as f64 / elapsed.as_millis().max(1) as f64 / 1000.0);
}

/// `1234567` becomes `1_234_567`.
fn group_digits(n: u64) -> String {
  let digits = n.to_string();
  let mut out = String::with_capacity(digits.len() + digits.len() / 3);
  for (i, digit) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      out.push('_');
    }
    out.push(digit);
  }
  out
}
