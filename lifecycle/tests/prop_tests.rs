//! Property tests: whatever sequence of operations callers throw at the
//! engine, per-record status only ever moves forward and the code fields
//! track the status exactly.

use std::sync::Arc;

use proptest::prelude::*;

use goodhaul_lifecycle::{ClaimCoordinator, CreateDonation, DonationRegistry, HandoffVerifier};
use goodhaul_nullables::NullIssuer;
use goodhaul_store_memory::MemoryStore;
use goodhaul_types::{
    ClothesDetails, DonationId, DonationPayload, DonationStatus, FoodDetails, Timestamp, UserId,
};

#[derive(Clone, Debug)]
enum Op {
    CreateFood,
    CreateClothes,
    Claim { target: usize, user: u64 },
    VerifyRightCode { target: usize, user: u64, late: bool },
    VerifyWrongCode { target: usize, user: u64 },
    Reject { target: usize },
    Reissue { target: usize },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::CreateFood),
        Just(Op::CreateClothes),
        (0usize..8, 1u64..5).prop_map(|(target, user)| Op::Claim { target, user }),
        (0usize..8, 1u64..5, any::<bool>())
            .prop_map(|(target, user, late)| Op::VerifyRightCode { target, user, late }),
        (0usize..8, 1u64..5).prop_map(|(target, user)| Op::VerifyWrongCode { target, user }),
        (0usize..8).prop_map(|target| Op::Reject { target }),
        (0usize..8).prop_map(|target| Op::Reissue { target }),
    ]
}

fn rank(status: DonationStatus) -> u8 {
    match status {
        DonationStatus::Pending => 0,
        DonationStatus::Picked => 1,
        DonationStatus::Completed | DonationStatus::Rejected => 2,
    }
}

fn food() -> DonationPayload {
    DonationPayload::Food(FoodDetails {
        food_type: "rice".to_string(),
        quantity: 1,
        price: 0,
        provider_type: "household".to_string(),
    })
}

fn clothes() -> DonationPayload {
    DonationPayload::Clothes(ClothesDetails {
        cloth_type: "coats".to_string(),
        quantity: 1,
        condition: "good".to_string(),
    })
}

proptest! {
    #[test]
    fn status_monotone_under_any_interleaving(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let store = Arc::new(MemoryStore::new());
        let registry =
            DonationRegistry::new(store.clone(), Arc::new(NullIssuer::constant("AB12CD")));
        let claims = ClaimCoordinator::new(store.clone());
        let verifier = HandoffVerifier::new(store.clone());

        let mut ids: Vec<DonationId> = Vec::new();
        let mut last_status: Vec<DonationStatus> = Vec::new();
        // Step time forward one minute per op so reissue cooldowns clear and
        // `late` verifies land past the hour TTL when we want them to.
        let mut now = Timestamp::new(1000);

        for op in ops {
            now = now.plus_secs(60);
            let n = ids.len();
            let pick = move |target: usize| if n == 0 { None } else { Some(target % n) };
            match op {
                Op::CreateFood | Op::CreateClothes => {
                    let payload = if matches!(op, Op::CreateFood) { food() } else { clothes() };
                    let created = registry.create(
                        CreateDonation {
                            requester: UserId::new(1),
                            location: "somewhere".to_string(),
                            payload,
                        },
                        now,
                    ).unwrap();
                    ids.push(created.id);
                    last_status.push(DonationStatus::Pending);
                }
                Op::Claim { target, user } => {
                    if let Some(i) = pick(target) {
                        let _ = claims.claim(ids[i], UserId::new(user));
                    }
                }
                Op::VerifyRightCode { target, user, late } => {
                    if let Some(i) = pick(target) {
                        let at = if late { now.plus_secs(2 * 3600) } else { now };
                        let _ = verifier.verify(ids[i], UserId::new(user), "AB12CD", at);
                    }
                }
                Op::VerifyWrongCode { target, user } => {
                    if let Some(i) = pick(target) {
                        let _ = verifier.verify(ids[i], UserId::new(user), "ZZZZZZ", now);
                    }
                }
                Op::Reject { target } => {
                    if let Some(i) = pick(target) {
                        let _ = registry.reject(ids[i], "because");
                    }
                }
                Op::Reissue { target } => {
                    if let Some(i) = pick(target) {
                        let _ = registry.reissue(ids[i], now);
                    }
                }
            }

            for (i, id) in ids.iter().enumerate() {
                let record = registry.get(*id).unwrap();
                // Forward-only: rank never decreases, terminal never changes.
                prop_assert!(rank(record.status) >= rank(last_status[i]));
                if last_status[i].is_terminal() {
                    prop_assert_eq!(record.status, last_status[i]);
                }
                // Code fields are Some exactly while the status holds a code.
                prop_assert!(record.code_fields_consistent());
                // A picked or closed record always has its claimant from the
                // moment of the claim onwards.
                if record.status == DonationStatus::Picked
                    || record.status == DonationStatus::Completed
                {
                    prop_assert!(record.claimant.is_some());
                }
                last_status[i] = record.status;
            }
        }
    }
}
