/// Strip everything outside `[A-Za-z0-9\-_. ]` from user input.
///
/// Applied to every path segment and search term before it is placed in a
/// query clause. Disallowed characters are dropped, never rejected.
pub fn sanitize(raw: &str) -> String {
    raw.chars().filter(|c| is_allowed(*c)).collect()
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ' ')
}
