use proptest::prelude::*;
use revive_kernel::domain::constants::{DEFAULT_ALLOWED_STAGES, PINNED_STAGE};
use revive_pipeline::ordering::{complete, move_stage, normalize};

fn stage() -> impl Strategy<Value = String> {
    prop_oneof![
        proptest::sample::select(DEFAULT_ALLOWED_STAGES.to_vec()).prop_map(str::to_owned),
        "[a-z]{1,8}",
        Just("RESPAWN".to_owned()),
    ]
}

fn allowed() -> Vec<String> {
    DEFAULT_ALLOWED_STAGES.iter().map(|s| (*s).to_owned()).collect()
}

proptest! {
    #[test]
    fn normalized_order_starts_with_pinned_stage_once(order in proptest::collection::vec(stage(), 0..16)) {
        let allowed = allowed();
        let normalized = normalize(&order, &allowed);

        prop_assert_eq!(normalized[0].as_str(), PINNED_STAGE);
        prop_assert_eq!(normalized.iter().filter(|s| *s == PINNED_STAGE).count(), 1);
        prop_assert!(normalized.iter().all(|s| allowed.contains(s)));
        let mut unique = normalized.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(unique.len(), normalized.len());
        prop_assert_eq!(normalize(&normalized, &allowed), normalized);
    }

    #[test]
    fn completed_order_holds_every_allowed_stage(order in proptest::collection::vec(stage(), 0..16)) {
        let allowed = allowed();
        let completed = complete(&order, &allowed);
        prop_assert_eq!(completed.len(), allowed.len());
        prop_assert_eq!(completed[0].as_str(), PINNED_STAGE);
    }

    #[test]
    fn moves_keep_the_pinned_stage(from in 0usize..4, to in 0usize..4) {
        let order = complete::<&str, _>(&[], &allowed());
        let moved = move_stage(&order, from, to).unwrap();
        prop_assert_eq!(moved[0].as_str(), PINNED_STAGE);
        prop_assert_eq!(moved.len(), order.len());
    }
}
