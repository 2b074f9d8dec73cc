/// Trim surrounding whitespace (spaces, tabs, unicode blanks) from a raw field.
pub fn clean_str(raw: &str) -> &str {
    raw.trim()
}

/// Drop any trailing `\r` / `\n` so they never count towards the line length.
pub fn strip_line_terminator(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}

/// Split `line` into consecutive slices of `widths[i]` characters each.
///
/// Widths are counted in `char`s, not bytes. Returns `None` if the line runs
/// out before the last width is consumed or has characters left over.
pub fn split_fixed<'a>(line: &'a str, widths: impl IntoIterator<Item = usize>) -> Option<Vec<&'a str>> {
    let mut out = Vec::new();
    let mut rest = line;
    for width in widths {
        let end = match rest.char_indices().nth(width) {
            Some((byte_idx, _)) => byte_idx,
            None if rest.chars().count() == width => rest.len(),
            None => return None,
        };
        let (field, tail) = rest.split_at(end);
        out.push(field);
        rest = tail;
    }
    if rest.is_empty() {
        Some(out)
    } else {
        None
    }
}
