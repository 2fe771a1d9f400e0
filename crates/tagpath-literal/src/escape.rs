/// Undo literal string escaping: `\"` becomes `"` and `\\` becomes `\`.
///
/// One left-to-right pass; any other backslash is kept as is.
pub fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next_if(|n| matches!(*n, '"' | '\\')) {
                out.push(next);
                continue;
            }
        }
        out.push(c);
    }
    out
}

/// Inner text of a fully double-quoted token, unescaped.
pub(crate) fn unquote(s: &str) -> Option<String> {
    let inner = s.strip_prefix('"')?.strip_suffix('"')?;
    Some(unescape(inner))
}
