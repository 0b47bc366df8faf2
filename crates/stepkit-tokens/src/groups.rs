//! Counting the capturing groups written by hand in a step template.
//!
//! Interpolation needs to know which capture-group numbers belong to the
//! author's own groups and which to the token fragments it inserts. The text
//! between token references is scanned with [`GroupCounter`], which follows
//! the `regex` crate's syntax closely enough to tell capturing groups apart
//! from escaped parentheses, parentheses inside character classes, and
//! non-capturing or flag groups.

/// Scanner state carried from one literal segment to the next.
#[derive(Debug, Default)]
pub(crate) struct GroupCounter {
    class_depth: usize,
    class_start: bool,
    escaped: bool,
}

impl GroupCounter {
    /// Count the capturing groups opened in `text`.
    pub(crate) fn count(&mut self, text: &str) -> usize {
        let mut groups = 0;
        let mut chars = text.chars();
        while let Some(ch) = chars.next() {
            let at_class_start = std::mem::take(&mut self.class_start);
            if std::mem::take(&mut self.escaped) {
                continue;
            }
            match ch {
                '\\' => self.escaped = true,
                '[' => {
                    self.class_depth += 1;
                    self.class_start = true;
                }
                '^' if at_class_start => self.class_start = true,
                ']' if self.class_depth > 0 && !at_class_start => self.class_depth -= 1,
                '(' if self.class_depth == 0 && opens_capture(chars.clone()) => groups += 1,
                _ => {}
            }
        }
        groups
    }
}

/// `(` opens a capture unless followed by `?`, except for named groups.
fn opens_capture(mut rest: impl Iterator<Item = char>) -> bool {
    match rest.next() {
        Some('?') => matches!(
            (rest.next(), rest.next()),
            (Some('P'), Some('<')) | (Some('<'), _)
        ),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use rstest::rstest;

    #[rstest]
    #[case::plain("^there are pods$", 0)]
    #[case::groups(r"^(a|b) and (\d+)$", 2)]
    #[case::nested("((a)(b))", 3)]
    #[case::escaped(r"\(not a group\)", 0)]
    #[case::escaped_backslash(r"\\(x)", 1)]
    #[case::class("[(][)]", 0)]
    #[case::class_with_bracket(r"[]()](x)", 1)]
    #[case::negated_class(r"[^]()](x)", 1)]
    #[case::nested_class("[[:alpha:](](x)", 1)]
    #[case::non_capturing("(?:a)(?i)(?i:b)", 0)]
    #[case::named("(?P<first>a)(?<second>b)", 2)]
    fn counts_capturing_groups(#[case] text: &str, #[case] expected: usize) {
        let regex =
            Regex::new(text).unwrap_or_else(|err| panic!("{text:?} should compile: {err}"));
        assert_eq!(regex.captures_len() - 1, expected);
        assert_eq!(GroupCounter::default().count(text), expected);
    }

    #[test]
    fn open_paren_before_a_fragment_captures() {
        let mut counter = GroupCounter::default();
        assert_eq!(counter.count("^("), 1);
        assert_eq!(counter.count(") pods$"), 0);
    }

    #[test]
    fn class_state_spans_segments() {
        let mut counter = GroupCounter::default();
        assert_eq!(counter.count("["), 0);
        assert_eq!(counter.count("()]"), 0);
        assert_eq!(counter.count("()"), 1);
    }
}
