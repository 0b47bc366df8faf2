//! Behavioural tests for defining steps through a scenario context.
#![expect(
    clippy::needless_pass_by_value,
    reason = "step handlers receive owned captures"
)]

use std::sync::Arc;
use std::thread;

use rstest::{fixture, rstest};
use stepkit::{
    Recorder, RegistrationError, ScenarioContext, StepArgsError, StepError, StepFailure, StepRegistry,
    Tokenizer,
    record_failure,
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pod {
    name: String,
    phase: String,
}

impl std::str::FromStr for Pod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, phase) = s
            .split_once('/')
            .ok_or_else(|| format!("'{s}' is not name/phase"))?;
        Ok(Self {
            name: name.to_owned(),
            phase: phase.to_owned(),
        })
    }
}

fn pods_running(t: &mut Recorder, count: i64) {
    if count < 0 {
        record_failure!(t, "pod count cannot be negative: {count}");
    }
}

fn pod_in_phase(t: &mut Recorder, pod: Pod, expected: String) {
    if pod.phase != expected {
        record_failure!(t, "pod {} is {}, expected {expected}", pod.name, pod.phase);
    }
}

fn labelled(t: &mut Recorder, label: String) {
    if !label.starts_with('"') {
        record_failure!(t, "label {label} is not double-quoted");
    }
}

#[fixture]
fn cluster() -> StepRegistry {
    let mut registry = StepRegistry::new();
    ScenarioContext::new(&mut registry)
        .int_token("Count")
        .word_token("Pod")
        .word_token("Phase")
        .string_token("Label")
        .step("^there are {Count} running pods$", pods_running)
        .step("^pod {Pod} should be {Phase}$", pod_in_phase)
        .step("^the namespace is labelled {Label}$", labelled);
    registry
}

#[rstest]
#[case("there are 3 running pods", Ok(()))]
#[case(
    "there are -1 running pods",
    Err(StepError::Failed(StepFailure::new("pod count cannot be negative: -1")))
)]
#[case("pod web-0/Running should be Running", Ok(()))]
#[case(
    "pod web-1/Pending should be Running",
    Err(StepError::Failed(StepFailure::new("pod web-1 is Pending, expected Running")))
)]
#[case(r#"the namespace is labelled "team \"a\"""#, Ok(()))]
#[case(
    "the namespace is labelled 'team-b'",
    Err(StepError::Failed(StepFailure::new("label 'team-b' is not double-quoted")))
)]
fn dispatches_step_text(
    cluster: StepRegistry,
    #[case] text: &str,
    #[case] expected: Result<(), StepError>,
) {
    assert_eq!(cluster.run_step(text), expected);
}

#[rstest]
fn unmatched_text_is_reported(cluster: StepRegistry) {
    assert_eq!(
        cluster.run_step("there are many running pods"),
        Err(StepError::NoMatch {
            text: "there are many running pods".to_owned()
        })
    );
}

#[rstest]
fn argument_conversion_errors_name_the_pattern(cluster: StepRegistry) {
    let Err(StepError::Arguments { pattern, source }) =
        cluster.run_step("pod web-0 should be Running")
    else {
        panic!("pod without a phase should not convert");
    };
    assert!(pattern.starts_with("^pod "));
    let StepArgsError::Invalid { reason, .. } = &source else {
        panic!("expected a parse failure, got {source}");
    };
    assert!(reason.contains("is not name/phase"));
}

#[test]
fn predefined_tokens_need_no_registration() {
    let mut registry = StepRegistry::new();
    ScenarioContext::new(&mut registry).step(
        "^{word} has {int} replicas$",
        |t: &mut Recorder, name: String, replicas: u16| {
            if replicas == 0 {
                record_failure!(t, "{name} is scaled to zero");
            }
        },
    );
    assert_eq!(registry.run_step("api has 2 replicas"), Ok(()));
    assert_eq!(
        registry.run_step("api has 0 replicas"),
        Err(StepError::Failed(StepFailure::new("api is scaled to zero")))
    );
}

#[test]
fn string_token_before_integer_token_binds_in_order() {
    let mut registry = StepRegistry::new();
    ScenarioContext::new(&mut registry).step(
        "^{string} has {int} replicas$",
        |t: &mut Recorder, name: String, replicas: i64| {
            if replicas < 3 {
                record_failure!(t, "{name} has only {replicas} replicas");
            }
        },
    );
    assert_eq!(
        registry.run_step("'api' has 2 replicas"),
        Err(StepError::Failed(StepFailure::new("'api' has only 2 replicas")))
    );
    assert_eq!(registry.run_step(r#""web \"edge\"" has 4 replicas"#), Ok(()));
}

#[test]
fn try_step_reports_unknown_tokens() {
    let mut registry = StepRegistry::new();
    let mut context = ScenarioContext::new(&mut registry);
    let result = context.try_step("^{Replicas} replicas$", pods_running);
    assert!(matches!(result, Err(RegistrationError::Template(_))));
}

#[test]
fn try_step_reports_invalid_patterns() {
    let mut registry = StepRegistry::new();
    let mut context = ScenarioContext::new(&mut registry);
    let result = context.try_step("^({Count} pods$", pods_running);
    assert!(matches!(result, Err(RegistrationError::Template(_))));
    let result = context.int_token("Count").try_step("^({Count} pods$", pods_running);
    let Err(RegistrationError::Pattern { pattern, .. }) = result else {
        panic!("unbalanced group should not compile");
    };
    assert_eq!(pattern, r"^((-?\d+) pods$");
}

#[test]
#[should_panic(expected = "step definition is incorrect: token is unknown: {Phase} is not registered")]
fn step_panics_on_unknown_tokens() {
    let mut registry = StepRegistry::new();
    ScenarioContext::new(&mut registry)
        .word_token("Pod")
        .step("^pod {Pod} should be {Phase}$", pod_in_phase);
}

#[test]
#[should_panic(expected = "step definition is incorrect: step pattern '^a step$' captures 0 value(s)")]
fn step_panics_when_pattern_captures_too_little() {
    let mut registry = StepRegistry::new();
    ScenarioContext::new(&mut registry).step("^a step$", pods_running);
}

#[test]
fn shares_a_configured_tokenizer_across_threads() {
    let tokenizer = Arc::new(
        Tokenizer::builder()
            .delimiters("[[", "]]")
            .int("Count")
            .build(),
    );
    let patterns: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let tokenizer = Arc::clone(&tokenizer);
                scope.spawn(move || tokenizer.interpolate("^[[Count]] pods$"))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|_| panic!("interpolation thread panicked"))
            })
            .collect()
    });
    for pattern in patterns {
        assert_eq!(pattern.ok().as_deref(), Some(r"^(-?\d+) pods$"));
    }

    let mut registry = StepRegistry::new();
    ScenarioContext::with_tokenizer(&mut registry, Tokenizer::clone(&tokenizer))
        .step("^[[Count]] pods$", pods_running);
    assert_eq!(registry.run_step("12 pods"), Ok(()));
}

#[test]
fn registered_steps_run_concurrently() {
    let mut registry = StepRegistry::new();
    ScenarioContext::new(&mut registry)
        .int_token("Count")
        .step("^there are {Count} running pods$", pods_running);
    let outcomes: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = [-2_i64, 5, -7, 9]
            .into_iter()
            .map(|count| {
                let registry = &registry;
                scope.spawn(move || registry.run_step(&format!("there are {count} running pods")))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|_| panic!("step thread panicked"))
            })
            .collect()
    });
    assert_eq!(
        outcomes,
        vec![
            Err(StepError::Failed(StepFailure::new(
                "pod count cannot be negative: -2"
            ))),
            Ok(()),
            Err(StepError::Failed(StepFailure::new(
                "pod count cannot be negative: -7"
            ))),
            Ok(()),
        ]
    );
    assert!(registry.unused_steps().is_empty());
}
