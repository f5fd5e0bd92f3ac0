/// Turns an abbreviated number, such as `4G` or `400M`, into a number.
pub fn parse_abbrev_number<T: TryFrom<u64>>(arg: &str) -> Result<T, String>
where
  T::Error: core::fmt::Debug,
{
  let (base, scale) = match arg.chars().last() {
    Some('K' | 'k') => (&arg[0 .. arg.len() - 1], 1u64 << 10),
    Some('M' | 'm') => (&arg[0 .. arg.len() - 1], 1 << 20),
    Some('G' | 'g') => (&arg[0 .. arg.len() - 1], 1 << 30),
    _ => (arg, 1),
  };
  let base: u64 = base.parse().map_err(|e| format!("{e:?}"))?;
  T::try_from(base * scale).map_err(|e| format!("{e:?}"))
}
