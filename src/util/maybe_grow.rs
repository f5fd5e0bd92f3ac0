/// Executes `f`, growing the stack first if it is close to running out.
///
/// Reduction, readback and parsing all recurse to the depth of the term;
/// wrapping their recursive steps keeps pathological inputs from overflowing.
pub fn maybe_grow<R>(f: impl FnOnce() -> R) -> R {
  stacker::maybe_grow(32 * 1024, 1024 * 1024, f)
}
