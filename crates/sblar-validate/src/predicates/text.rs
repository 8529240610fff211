use super::failing_rows;

/// Values whose first `prefix_len` characters differ from `expected`.
///
/// With no expected value (the context parameter was not supplied) every
/// value passes.
pub fn string_contains(column: &[String], expected: Option<&str>, prefix_len: usize) -> Vec<usize> {
    let Some(expected) = expected else {
        return Vec::new();
    };
    failing_rows(column, |value| {
        let end = value
            .char_indices()
            .nth(prefix_len)
            .map_or(value.len(), |(idx, _)| idx);
        &value[..end] == expected
    })
}
