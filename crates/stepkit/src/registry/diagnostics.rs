//! Diagnostics-only registry exports.

use serde::Serialize;

use super::StepRegistry;

#[derive(Serialize)]
struct DumpedStep<'a> {
    pattern: &'a str,
    params: &'a [&'static str],
    captures: usize,
    argument_groups: Vec<usize>,
    used: bool,
}

#[derive(Serialize)]
struct RegistryDump<'a> {
    steps: Vec<DumpedStep<'a>>,
}

pub(super) fn dump(registry: &StepRegistry) -> serde_json::Result<String> {
    let steps = registry
        .steps()
        .iter()
        .map(|step| DumpedStep {
            pattern: step.pattern(),
            params: step.signature().params(),
            captures: step.captures(),
            argument_groups: step.argument_groups(),
            used: step.was_used(),
        })
        .collect();
    serde_json::to_string(&RegistryDump { steps })
}
