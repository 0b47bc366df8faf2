//! Result of expanding a step template.

/// An expanded pattern together with the capture groups that carry step
/// arguments.
///
/// Token fragments may open groups of their own (the string fragment has
/// four nested inside its outer group), so the pattern's capture numbers do
/// not line up with the step's arguments. [`Expansion::argument_groups`]
/// lists, in template order, the groups written by the author and the outer
/// group of each token reference.
///
/// # Examples
/// ```
/// use stepkit_tokens::Tokenizer;
///
/// let expansion = Tokenizer::new()
///     .expand("^{string} has {int} replicas$")
///     .expect("predefined tokens resolve");
/// assert_eq!(expansion.argument_groups(), [1, 6]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pattern: String,
    argument_groups: Vec<usize>,
}

impl Expansion {
    pub(crate) const fn new(pattern: String, argument_groups: Vec<usize>) -> Self {
        Self {
            pattern,
            argument_groups,
        }
    }

    /// The expanded regular-expression source.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// One-based capture-group numbers binding the step's arguments, in order.
    #[must_use]
    pub fn argument_groups(&self) -> &[usize] {
        &self.argument_groups
    }

    /// Consume the expansion, keeping only the pattern.
    #[must_use]
    pub fn into_pattern(self) -> String {
        self.pattern
    }

    /// Split into the pattern and its argument groups.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<usize>) {
        (self.pattern, self.argument_groups)
    }
}
