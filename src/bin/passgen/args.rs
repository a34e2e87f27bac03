//! Command line normalisation.
//!
//! Flags may be written DOS-style (`/l 16`) as well as `-l 16`, and anything that isn't one of
//! the known flags or its value is ignored rather than rejected. clap handles neither, so the
//! raw arguments are rewritten into plain `-x value` pairs before parsing.

const FLAGS: &[char] = &['l', 'm', 'c'];

fn flag_name(arg: &str) -> Option<char> {
    let mut chars = arg.chars();
    let prefix = chars.next()?;
    let name = chars.next()?;
    if chars.next().is_none() && (prefix == '-' || prefix == '/') && FLAGS.contains(&name) {
        Some(name)
    } else {
        None
    }
}

/// Rewrite `raw` (program name first) into something clap can parse.
///
/// A known flag always takes the following token as its value, whatever it looks like. A
/// known flag at the very end gets an empty value, which fails validation like any other bad
/// value.
pub(crate) fn normalize<I>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut raw = raw.into_iter();
    let mut normalized = Vec::new();
    normalized.extend(raw.next());
    while let Some(arg) = raw.next() {
        match flag_name(&arg) {
            Some(name) => {
                normalized.push(format!("-{name}"));
                normalized.push(raw.next().unwrap_or_default());
            }
            None => log::debug!("ignoring unrecognised argument {arg:?}"),
        }
    }
    normalized
}
