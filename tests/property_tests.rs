//! Property tests for the stamping policy.
//!
//! These tests check the create/update invariants over arbitrary principals,
//! prior field values and clock movements.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use traceable_core::{
    AuditFields, AuditStamper, ManualClock, NamedPrincipal, PrincipalRegistry, Traceable,
    UnitOfWork,
};

// Strategy: Generate arbitrary principal names
fn arb_principal() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9._-]{2,15}").unwrap()
}

// Strategy: Generate arbitrary instants between 2000 and 2100
fn arb_instant() -> impl Strategy<Value = DateTime<Utc>> {
    (946_684_800i64..4_102_444_800i64).prop_map(|secs| Utc.timestamp_opt(secs, 0).unwrap())
}

// Strategy: Generate pre-existing audit fields, possibly partially set
fn arb_fields(manual: bool) -> impl Strategy<Value = AuditFields> {
    (
        prop::option::of(arb_principal()),
        prop::option::of(arb_instant()),
        prop::option::of(arb_principal()),
        prop::option::of(arb_instant()),
    )
        .prop_map(move |(cu, cd, mu, md)| {
            let mut fields = AuditFields::new();
            if let Some(user) = cu {
                fields.set_creation_user(user);
            }
            if let Some(date) = cd {
                fields.set_creation_date(date);
            }
            if let Some(user) = mu {
                fields.set_modification_user(user);
            }
            if let Some(date) = md {
                fields.set_modification_date(date);
            }
            fields.set_manual_traceability_control(manual);
            fields
        })
}

fn stamper(fallback: Option<&str>, clock: &ManualClock) -> AuditStamper {
    let registry = Arc::new(PrincipalRegistry::new());
    if let Some(name) = fallback {
        registry.bind(NamedPrincipal::new(name));
    }
    AuditStamper::builder()
        .provider(registry)
        .clock(Arc::new(clock.clone()))
        .build()
}

proptest! {
    /// Property: Manual control leaves every audit field unchanged
    #[test]
    fn proptest_manual_control_is_never_touched(
        fields in arb_fields(true),
        principal in prop::option::of(arb_principal()),
        fallback in prop::option::of(arb_principal()),
        now in arb_instant()
    ) {
        let clock = ManualClock::new(now);
        let stamper = stamper(fallback.as_deref(), &clock);
        let uow = principal.map(|p| UnitOfWork::new("req-prop").with_principal(p));

        let mut record = fields.clone();
        prop_assert!(stamper.on_before_create(uow.as_ref(), &mut record).is_skipped());
        prop_assert!(stamper.on_before_update(uow.as_ref(), &mut record).is_skipped());

        prop_assert_eq!(record, fields);
    }

    /// Property: Create stamps both users identically and both dates identically
    #[test]
    fn proptest_create_sets_matching_pairs(
        fields in arb_fields(false),
        principal in prop::option::of(arb_principal()),
        fallback in prop::option::of(arb_principal()),
        now in arb_instant()
    ) {
        let clock = ManualClock::new(now);
        let stamper = stamper(fallback.as_deref(), &clock);
        let uow = principal.clone().map(|p| UnitOfWork::new("req-prop").with_principal(p));

        let mut record = fields.clone();
        stamper.on_before_create(uow.as_ref(), &mut record);

        prop_assert_eq!(record.creation_date(), Some(now));
        prop_assert_eq!(record.modification_date(), Some(now));

        match principal.or(fallback) {
            Some(expected) => {
                prop_assert_eq!(record.creation_user(), Some(expected.as_str()));
                prop_assert_eq!(record.modification_user(), Some(expected.as_str()));
            }
            None => {
                // No actor: user fields keep whatever they held before
                prop_assert_eq!(record.creation_user(), fields.creation_user());
                prop_assert_eq!(record.modification_user(), fields.modification_user());
            }
        }
    }

    /// Property: Update never touches creation fields and always advances the date
    #[test]
    fn proptest_update_preserves_creation(
        creator in arb_principal(),
        updater in prop::option::of(arb_principal()),
        start in arb_instant(),
        elapsed in 0i64..86_400
    ) {
        let clock = ManualClock::new(start);
        let stamper = stamper(None, &clock);
        let mut record = AuditFields::new();

        let create = UnitOfWork::new("req-create").with_principal(creator.clone());
        stamper.on_before_create(Some(&create), &mut record);

        clock.advance(Duration::seconds(elapsed));
        let update = updater.clone().map(|p| UnitOfWork::new("req-update").with_principal(p));
        stamper.on_before_update(update.as_ref(), &mut record);

        prop_assert_eq!(record.creation_user(), Some(creator.as_str()));
        prop_assert_eq!(record.creation_date(), Some(start));
        prop_assert_eq!(
            record.modification_user(),
            Some(updater.as_deref().unwrap_or(creator.as_str()))
        );
        prop_assert_eq!(record.modification_date(), Some(start + Duration::seconds(elapsed)));
        prop_assert!(record.modification_date() >= record.creation_date());
    }

    /// Property: The unit of work always beats the provider
    #[test]
    fn proptest_unit_of_work_has_priority(
        principal in arb_principal(),
        fallback in arb_principal()
    ) {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let stamper = stamper(Some(fallback.as_str()), &clock);
        let uow = UnitOfWork::new("req-priority").with_principal(principal.clone());

        prop_assert_eq!(stamper.resolver().resolve_name(Some(&uow)), Some(principal));
        prop_assert_eq!(stamper.resolver().resolve_name(None), Some(fallback));
    }
}
