//! Glob matching for record filters.

/// Matches field values against a shell-style glob.
///
/// `*` matches any run of characters (including `/`), `?` any single
/// character, `[...]` and `[!...]` a character class. A `[` with no closing
/// `]` is an ordinary character, so the other wildcards in the pattern stay
/// active. Matching is case-sensitive on the raw stored value.
///
/// A pattern containing a comma also matches a value equal to the whole
/// pattern text.
#[derive(Debug, Clone)]
pub struct GlobFilter {
    literal: Option<String>,
    pattern: Option<glob::Pattern>,
}

impl GlobFilter {
    /// Compiles a filter pattern.
    #[must_use]
    pub fn new(pattern: &str) -> Self {
        let source = escape_unclosed_brackets(&collapse_stars(pattern));
        let compiled = match glob::Pattern::new(&source) {
            Ok(compiled) => Some(compiled),
            Err(e) => {
                tracing::warn!(pattern, error = %e, "Glob did not compile, it matches nothing");
                None
            },
        };

        Self {
            literal: pattern.contains(',').then(|| pattern.to_string()),
            pattern: compiled,
        }
    }

    /// Returns whether a field value matches.
    #[must_use]
    pub fn matches(&self, value: &str) -> bool {
        self.pattern.as_ref().is_some_and(|p| p.matches(value))
            || self.literal.as_deref() == Some(value)
    }
}

/// Collapses runs of `*` so that `**` means the same as `*`.
///
/// The glob crate reserves `**` for recursive path components and rejects it
/// elsewhere.
fn collapse_stars(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if !(c == '*' && out.ends_with('*')) {
            out.push(c);
        }
    }
    out
}

/// Rewrites every `[` that opens no complete class as the escape `[[]`.
fn escape_unclosed_brackets(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() + 4);
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '[' {
            if let Some(end) = class_end(&chars, i) {
                out.extend(&chars[i..=end]);
                i = end + 1;
                continue;
            }
            out.push_str("[[]");
        } else {
            out.push(chars[i]);
        }
        i += 1;
    }
    out
}

/// Index of the `]` closing the class opened at `open`.
///
/// A `]` right after `[` or `[!` is a class member, not the terminator.
fn class_end(chars: &[char], open: usize) -> Option<usize> {
    let mut j = open + 1;
    if chars.get(j) == Some(&'!') {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    chars
        .get(j..)?
        .iter()
        .position(|&c| c == ']')
        .map(|offset| j + offset)
}
