//! Behavioural tests for template interpolation.

use regex::Regex;
use rstest::{fixture, rstest};
use stepkit_tokens::{
    INTEGER_FRAGMENT, STRING_FRAGMENT, Tokenizer, TokenizerError, WORD_FRAGMENT,
};

#[fixture]
fn tokenizer() -> Tokenizer {
    Tokenizer::new()
}

fn expand(tokenizer: &Tokenizer, template: &str) -> String {
    tokenizer
        .interpolate(template)
        .unwrap_or_else(|err| panic!("{template:?} should expand: {err}"))
}

#[rstest]
#[case::empty("")]
#[case::tokenless("some expression without tokens")]
#[case::stray_braces("a {  spaced} and { } brace")]
fn tokenless_templates_are_unchanged(tokenizer: Tokenizer, #[case] template: &str) {
    assert_eq!(expand(&tokenizer, template), template);
}

#[rstest]
fn unregistered_token_reports_placeholder(tokenizer: Tokenizer) {
    let Err(err) = tokenizer.interpolate("some expression with a {Token}") else {
        panic!("unregistered token should fail");
    };
    assert!(err.is_unknown_token());
    assert!(err.to_string().contains("{Token}"));
}

#[test]
fn registered_token_expands() {
    let mut tokenizer = Tokenizer::new();
    tokenizer.int("Token");
    assert_eq!(
        expand(&tokenizer, "some expression with a {Token}"),
        format!("some expression with a {INTEGER_FRAGMENT}")
    );
}

#[test]
fn repeated_token_expands_everywhere() {
    let mut tokenizer = Tokenizer::new();
    tokenizer.int("Token");
    assert_eq!(
        expand(&tokenizer, "some expression with a {Token} and another {Token}"),
        format!("some expression with a {INTEGER_FRAGMENT} and another {INTEGER_FRAGMENT}")
    );
}

#[test]
fn unregistered_multi_word_token_fails_whole_template() {
    let mut tokenizer = Tokenizer::new();
    tokenizer.int("Token");
    let result = tokenizer.interpolate(
        "some expression with a {Token} and another {Token} and unregistered {Sub Token}",
    );
    match result {
        Err(TokenizerError::UnknownToken { placeholder, name }) => {
            assert_eq!(placeholder, "{Sub Token}");
            assert_eq!(name, "Sub Token");
        }
        other => panic!("expected unknown token error, got {other:?}"),
    }
}

#[test]
fn distinct_tokens_expand_independently() {
    let mut tokenizer = Tokenizer::new();
    tokenizer.int("Token").string("Sub Token");
    assert_eq!(
        expand(
            &tokenizer,
            "some expression with a {Token} and another {Sub Token} and unregistered {Token}"
        ),
        format!(
            "some expression with a {INTEGER_FRAGMENT} and another {STRING_FRAGMENT} and unregistered {INTEGER_FRAGMENT}"
        )
    );
}

#[rstest]
fn predefined_tokens_expand(tokenizer: Tokenizer) {
    assert_eq!(
        expand(&tokenizer, "an expression with an {int}, {string} and {word} tokens"),
        format!(
            "an expression with an {INTEGER_FRAGMENT}, {STRING_FRAGMENT} and {WORD_FRAGMENT} tokens"
        )
    );
}

#[rstest]
#[case::positive_int("there are 34 pods", "^there are {int} pods$")]
#[case::negative_int("there is -567", "^there is {int}$")]
#[case::word("there is a statement", "^there is a {word}$")]
#[case::single_quoted("there is a 'statement string'", "^there is a {string}$")]
#[case::double_quoted(r#"there is a "say \"hi\"""#, "^there is a {string}$")]
fn expanded_patterns_match_step_text(
    tokenizer: Tokenizer,
    #[case] step: &str,
    #[case] definition: &str,
) {
    let source = expand(&tokenizer, definition);
    let regex = Regex::new(&source)
        .unwrap_or_else(|err| panic!("expanded pattern {source:?} should compile: {err}"));
    assert!(regex.is_match(step), "{source:?} should match {step:?}");
}

#[rstest]
#[case::word_rejects_spaces("there is a two words", "^there is a {word}$")]
#[case::int_rejects_letters("there are many pods", "^there are {int} pods$")]
#[case::string_requires_quotes("there is a bare", "^there is a {string}$")]
fn expanded_patterns_reject_other_shapes(
    tokenizer: Tokenizer,
    #[case] step: &str,
    #[case] definition: &str,
) {
    let source = expand(&tokenizer, definition);
    let regex = Regex::new(&source)
        .unwrap_or_else(|err| panic!("expanded pattern {source:?} should compile: {err}"));
    assert!(!regex.is_match(step), "{source:?} should not match {step:?}");
}

#[test]
fn shared_tokenizer_expands_from_many_threads() {
    let mut tokenizer = Tokenizer::new();
    tokenizer.int("Count");
    let tokenizer = &tokenizer;
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(move || expand(tokenizer, "{Count} pods")))
            .collect();
        for handle in handles {
            let expanded = handle
                .join()
                .unwrap_or_else(|_| panic!("expansion thread panicked"));
            assert_eq!(expanded, format!("{INTEGER_FRAGMENT} pods"));
        }
    });
}
