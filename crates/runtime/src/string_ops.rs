//! Text helpers used by element branches

/// Repeat every character of `text` `count` times (negative counts give "")
///
/// `repeat_chars("ab", 2)` → `"aabb"`. Fails instead of aborting when the
/// result cannot be allocated.
pub fn repeat_chars(text: &str, count: i64) -> Result<String, String> {
    let count = usize::try_from(count).unwrap_or(0);
    let mut result = with_repeat_capacity(text, count)?;
    for c in text.chars() {
        result.extend(std::iter::repeat_n(c, count));
    }
    Ok(result)
}

/// `count` copies of `s` (negative counts give "")
pub fn repeat_str(s: &str, count: i64) -> Result<String, String> {
    let count = usize::try_from(count).unwrap_or(0);
    let mut result = with_repeat_capacity(s, count)?;
    for _ in 0..count {
        result.push_str(s);
    }
    Ok(result)
}

/// An empty string with room for `count` copies of `text`
fn with_repeat_capacity(text: &str, count: usize) -> Result<String, String> {
    let len = text
        .len()
        .checked_mul(count)
        .ok_or_else(|| format!("repeating {} bytes {} times overflows", text.len(), count))?;
    let mut result = String::new();
    result
        .try_reserve_exact(len)
        .map_err(|e| format!("cannot allocate {} bytes: {}", len, e))?;
    Ok(result)
}

/// `target` with the capitalisation of `source`, position by position
///
/// Where `source` has an uppercase letter the target character is
/// uppercased, a lowercase letter lowercases it, and anything else leaves it
/// alone. Target characters past the end of `source` are kept as they are.
pub fn transfer_capitalisation(source: &str, target: &str) -> String {
    let mut source = source.chars();
    let mut result = String::with_capacity(target.len());
    for t in target.chars() {
        match source.next() {
            Some(s) if s.is_uppercase() => result.extend(t.to_uppercase()),
            Some(s) if s.is_lowercase() => result.extend(t.to_lowercase()),
            _ => result.push(t),
        }
    }
    result
}
