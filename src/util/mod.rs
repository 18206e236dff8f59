/// Minimum stack space left before recursion grows the stack.
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Runs `f`, growing the stack first if less than [`RED_ZONE`] bytes remain.
///
/// Parsing and evaluation recurse once per nesting level of the source, so
/// every recursive entry point goes through this.
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// A character is a letter if it has distinct upper and lower case forms.
#[inline]
pub fn is_alphabetic(c: char) -> bool {
    !c.to_uppercase().eq(c.to_lowercase())
}

#[inline]
pub fn is_numeric(c: char) -> bool {
    c.is_ascii_digit()
}

#[inline]
pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}
