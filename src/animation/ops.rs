use crate::animation::anim::TweenSpec;

/// One spec per element, each delayed by its entry in `offsets_ms` on top of `spec.delay_ms`.
pub fn stagger(spec: TweenSpec, offsets_ms: &[u64]) -> Vec<TweenSpec> {
    offsets_ms
        .iter()
        .map(|off| spec.with_delay(spec.delay_ms.saturating_add(*off)))
        .collect()
}

/// `n` copies of `spec`, all starting together.
pub fn simultaneous(spec: TweenSpec, n: usize) -> Vec<TweenSpec> {
    vec![spec; n]
}

/// Time from request until the last of `specs` finishes.
pub fn sequence_end_ms(specs: &[TweenSpec]) -> u64 {
    specs.iter().map(|s| s.total_ms()).max().unwrap_or(0)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ops.rs"]
mod tests;
