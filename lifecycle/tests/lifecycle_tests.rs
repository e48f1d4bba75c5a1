//! Integration tests exercising the full donation lifecycle:
//! creation → contested claim → handoff verification → terminal state.
//!
//! These wire the components together over one shared store, the way the
//! daemon does, rather than testing each transition in isolation.

use std::sync::Arc;

use goodhaul_lifecycle::{
    ClaimCoordinator, CreateDonation, DonationRegistry, HandoffVerifier, LifecycleError,
    StatusQuery,
};
use goodhaul_nullables::{NullClock, NullIssuer};
use goodhaul_store_memory::MemoryStore;
use goodhaul_types::{
    ClothesDetails, DonationId, DonationKind, DonationPayload, DonationStatus, FoodDetails,
    Timestamp, UserId,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Service {
    registry: DonationRegistry,
    claims: ClaimCoordinator,
    verifier: HandoffVerifier,
    status: StatusQuery,
}

fn service() -> Service {
    service_with_issuer(NullIssuer::constant("AB12CD"))
}

fn service_with_issuer(issuer: NullIssuer) -> Service {
    let store = Arc::new(MemoryStore::new());
    Service {
        registry: DonationRegistry::new(store.clone(), Arc::new(issuer)),
        claims: ClaimCoordinator::new(store.clone()),
        verifier: HandoffVerifier::new(store.clone()),
        status: StatusQuery::new(store),
    }
}

fn food_request(requester: u64) -> CreateDonation {
    CreateDonation {
        requester: UserId::new(requester),
        location: "12 Hill Rd".to_string(),
        payload: DonationPayload::Food(FoodDetails {
            food_type: "rice".to_string(),
            quantity: 10,
            price: 0,
            provider_type: "household".to_string(),
        }),
    }
}

fn clothes_request(requester: u64) -> CreateDonation {
    CreateDonation {
        requester: UserId::new(requester),
        location: "3 Lake View".to_string(),
        payload: DonationPayload::Clothes(ClothesDetails {
            cloth_type: "jackets".to_string(),
            quantity: 4,
            condition: "good".to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// 1. Happy path and rival claimant
// ---------------------------------------------------------------------------

#[test]
fn full_handoff_with_rival_claimant() {
    let svc = service();

    let created = svc
        .registry
        .create(food_request(7), Timestamp::new(1000))
        .unwrap();
    assert_eq!(created.otp, "AB12CD");
    assert_eq!(
        svc.status.check_status(created.id).unwrap(),
        DonationStatus::Pending
    );

    let claimed = svc.claims.claim(created.id, UserId::new(42)).unwrap();
    assert_eq!(claimed.otp, "AB12CD");

    let rival = svc.claims.claim(created.id, UserId::new(99)).unwrap_err();
    assert!(matches!(rival, LifecycleError::AlreadyClaimed));

    // The rival cannot verify either, even holding the right code.
    let err = svc
        .verifier
        .verify(created.id, UserId::new(99), "AB12CD", Timestamp::new(2000))
        .unwrap_err();
    assert!(matches!(err, LifecycleError::NotAllowed));

    let kind = svc
        .verifier
        .verify(created.id, UserId::new(42), "AB12CD", Timestamp::new(2000))
        .unwrap();
    assert_eq!(kind, DonationKind::Food);

    let record = svc.registry.get(created.id).unwrap();
    assert_eq!(record.status, DonationStatus::Completed);
    assert!(record.otp.is_none());
    assert!(record.otp_expiry.is_none());
    assert_eq!(record.claimant, Some(UserId::new(42)));
}

// ---------------------------------------------------------------------------
// 2. Concurrent claims — exactly one winner
// ---------------------------------------------------------------------------

#[test]
fn concurrent_claims_exactly_one_winner() {
    let store = Arc::new(MemoryStore::new());
    let registry =
        DonationRegistry::new(store.clone(), Arc::new(NullIssuer::constant("AB12CD")));
    let claims = Arc::new(ClaimCoordinator::new(store.clone()));

    let id = registry
        .create(food_request(7), Timestamp::new(1000))
        .unwrap()
        .id;

    let handles: Vec<_> = (0..16)
        .map(|n| {
            let claims = Arc::clone(&claims);
            std::thread::spawn(move || (n, claims.claim(id, UserId::new(n))))
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let winners: Vec<u64> = results
        .iter()
        .filter(|(_, r)| r.is_ok())
        .map(|(n, _)| *n)
        .collect();
    assert_eq!(winners.len(), 1);
    assert!(results
        .iter()
        .filter(|(_, r)| r.is_err())
        .all(|(_, r)| matches!(r, Err(LifecycleError::AlreadyClaimed))));

    let record = registry.get(id).unwrap();
    assert_eq!(record.claimant, Some(UserId::new(winners[0])));
    assert_eq!(record.status, DonationStatus::Picked);
}

// ---------------------------------------------------------------------------
// 3. Expiry, reissue, and retry
// ---------------------------------------------------------------------------

#[test]
fn expired_code_recovers_via_reissue() {
    let svc = service_with_issuer(NullIssuer::new(vec!["AAAAAA", "BBBBBB"]));
    let clock = NullClock::new(1000);

    let created = svc.registry.create(food_request(7), clock.now()).unwrap();
    assert_eq!(created.otp, "AAAAAA");
    svc.claims.claim(created.id, UserId::new(42)).unwrap();

    // One second past expiry: rejected regardless of the code, not consumed.
    clock.advance(3600 + 1);
    let err = svc
        .verifier
        .verify(created.id, UserId::new(42), "AAAAAA", clock.now())
        .unwrap_err();
    assert!(matches!(err, LifecycleError::Expired));
    assert_eq!(
        svc.status.check_status(created.id).unwrap(),
        DonationStatus::Picked
    );

    // Reissue replaces code and expiry; the old code stops working.
    let fresh = svc.registry.reissue(created.id, clock.now()).unwrap();
    assert_eq!(fresh, "BBBBBB");
    clock.advance(1);
    let err = svc
        .verifier
        .verify(created.id, UserId::new(42), "AAAAAA", clock.now())
        .unwrap_err();
    assert!(matches!(err, LifecycleError::InvalidCode));

    clock.advance(1);
    let kind = svc
        .verifier
        .verify(created.id, UserId::new(42), "BBBBBB", clock.now())
        .unwrap();
    assert_eq!(kind, DonationKind::Food);
}

#[test]
fn wrong_code_then_correct_code() {
    let svc = service();
    let created = svc
        .registry
        .create(clothes_request(7), Timestamp::new(1000))
        .unwrap();
    svc.claims.claim(created.id, UserId::new(42)).unwrap();

    let err = svc
        .verifier
        .verify(created.id, UserId::new(42), "NOPE42", Timestamp::new(1500))
        .unwrap_err();
    assert!(matches!(err, LifecycleError::InvalidCode));

    let kind = svc
        .verifier
        .verify(created.id, UserId::new(42), "AB12CD", Timestamp::new(1501))
        .unwrap();
    assert_eq!(kind, DonationKind::Clothes);
}

// ---------------------------------------------------------------------------
// 4. Reject path
// ---------------------------------------------------------------------------

#[test]
fn reject_works_from_pending_and_picked() {
    let svc = service();

    let pending = svc
        .registry
        .create(food_request(7), Timestamp::new(1000))
        .unwrap();
    svc.registry.reject(pending.id, "withdrawn").unwrap();
    assert_eq!(
        svc.status.check_status(pending.id).unwrap(),
        DonationStatus::Rejected
    );

    let picked = svc
        .registry
        .create(food_request(7), Timestamp::new(1001))
        .unwrap();
    svc.claims.claim(picked.id, UserId::new(42)).unwrap();
    svc.registry.reject(picked.id, "agent no-show").unwrap();

    let record = svc.registry.get(picked.id).unwrap();
    assert_eq!(record.status, DonationStatus::Rejected);
    assert!(record.otp.is_none());
    assert_eq!(record.rejection_reason.as_deref(), Some("agent no-show"));

    // Terminal records stay terminal.
    assert!(matches!(
        svc.registry.reject(picked.id, "again").unwrap_err(),
        LifecycleError::AlreadyTerminal
    ));
    assert!(matches!(
        svc.claims.claim(pending.id, UserId::new(42)).unwrap_err(),
        LifecycleError::AlreadyClaimed
    ));
}

// ---------------------------------------------------------------------------
// 5. Listings
// ---------------------------------------------------------------------------

#[test]
fn list_pending_shows_only_pending_of_that_kind() {
    let svc = service();

    let a = svc
        .registry
        .create(food_request(7), Timestamp::new(1000))
        .unwrap();
    let b = svc
        .registry
        .create(food_request(8), Timestamp::new(2000))
        .unwrap();
    svc.registry
        .create(clothes_request(9), Timestamp::new(3000))
        .unwrap();

    svc.claims.claim(a.id, UserId::new(42)).unwrap();

    let pending = svc.registry.list_pending(DonationKind::Food).unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, b.id);
    assert!(pending.iter().all(|r| r.status == DonationStatus::Pending));

    let clothes = svc.registry.list_pending(DonationKind::Clothes).unwrap();
    assert_eq!(clothes.len(), 1);
    assert_eq!(clothes[0].kind(), DonationKind::Clothes);
}

#[test]
fn requester_and_claimant_histories() {
    let svc = service();

    let a = svc
        .registry
        .create(food_request(7), Timestamp::new(1000))
        .unwrap();
    let b = svc
        .registry
        .create(clothes_request(7), Timestamp::new(2000))
        .unwrap();
    svc.claims.claim(a.id, UserId::new(42)).unwrap();
    svc.verifier
        .verify(a.id, UserId::new(42), "AB12CD", Timestamp::new(2500))
        .unwrap();

    let mine = svc.registry.list_by_requester(UserId::new(7)).unwrap();
    assert_eq!(
        mine.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![b.id, a.id]
    );

    let hauled = svc.registry.list_by_claimant(UserId::new(42)).unwrap();
    assert_eq!(hauled.len(), 1);
    assert_eq!(hauled[0].status, DonationStatus::Completed);
}

// ---------------------------------------------------------------------------
// 6. Status queries
// ---------------------------------------------------------------------------

#[test]
fn check_status_spans_kinds_and_rejects_unknown_ids() {
    let svc = service();
    let food = svc
        .registry
        .create(food_request(7), Timestamp::new(1000))
        .unwrap();
    let clothes = svc
        .registry
        .create(clothes_request(8), Timestamp::new(1001))
        .unwrap();

    assert_eq!(
        svc.status.check_status(food.id).unwrap(),
        DonationStatus::Pending
    );
    assert_eq!(
        svc.status.check_status(clothes.id).unwrap(),
        DonationStatus::Pending
    );
    assert!(matches!(
        svc.status.check_status(DonationId::new(404)),
        Err(LifecycleError::NotFound)
    ));
}
