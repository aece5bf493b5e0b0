//! Stage ordering rules.
//!
//! The pinned stage is always first and exactly once. Every other stage must be in the
//! allow-set and appears at most once.

use revive_kernel::domain::constants::PINNED_STAGE;

fn stage_id(stage: &str) -> String {
    stage.trim().to_lowercase()
}

/// Stage ids of the allow-set, trimmed, lowercased and deduplicated.
pub fn allow_set<S: AsRef<str>>(allowed: &[S]) -> Vec<String> {
    let mut stages: Vec<String> = Vec::with_capacity(allowed.len());
    for stage in allowed.iter().map(|s| stage_id(s.as_ref())).filter(|s| !s.is_empty()) {
        if !stages.contains(&stage) {
            stages.push(stage);
        }
    }
    stages
}

/// Pinned stage first, then the allowed stages of `order` in their first-seen position.
pub fn normalize<S: AsRef<str>, A: AsRef<str>>(order: &[S], allowed: &[A]) -> Vec<String> {
    let allowed = allow_set(allowed);
    let mut stages = vec![PINNED_STAGE.to_owned()];
    for stage in order.iter().map(|s| stage_id(s.as_ref())) {
        if stage != PINNED_STAGE && allowed.contains(&stage) && !stages.contains(&stage) {
            stages.push(stage);
        }
    }
    stages
}

/// [`normalize`], then appends allowed stages the order is missing. Applied at load time only.
pub fn complete<S: AsRef<str>, A: AsRef<str>>(order: &[S], allowed: &[A]) -> Vec<String> {
    let mut stages = normalize(order, allowed);
    for stage in allow_set(allowed) {
        if !stages.contains(&stage) {
            stages.push(stage);
        }
    }
    stages
}

/// The part of the order a user may drag.
pub fn reorderable(order: &[String]) -> &[String] {
    match order.first() {
        Some(first) if first == PINNED_STAGE => &order[1..],
        _ => order,
    }
}

/// Moves a stage inside the reorderable part. Indices are relative to [`reorderable`].
///
/// # Errors
/// An index outside the reorderable part.
pub fn move_stage(order: &[String], from: usize, to: usize) -> Result<Vec<String>, String> {
    let mut tail = reorderable(order).to_vec();
    if from >= tail.len() || to >= tail.len() {
        return Err(format!("Cannot move stage {from} to {to} in a list of {}", tail.len()));
    }
    let stage = tail.remove(from);
    tail.insert(to, stage);

    let mut stages = vec![PINNED_STAGE.to_owned()];
    stages.extend(tail);
    Ok(stages)
}
