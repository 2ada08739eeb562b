//! Stamp Property Tests
//!
//! Replays random actor traces (fork, event, join, message exchange) from a
//! single seed and checks the clock laws on every resulting stamp:
//!
//! 1. **Disjointness**: live actors never share identity
//! 2. **Monotone inflate**: `event` strictly advances history
//! 3. **Fork**: both halves keep the history and sum back to the original id
//! 4. **Peek**: anonymous, same history, same ordering
//! 5. **Join**: dominates both inputs
//! 6. **Raw input**: stamps decoded in non-normal form behave like their
//!    normal forms

mod common;

use common::{arb_pool, arb_raw_stamp, arb_stamp};
use itc_core::{CausalOrder, Id, ItcError, Stamp};
use proptest::prelude::*;

proptest! {
    /// Property: every pair of live actors holds disjoint ids
    #[test]
    fn prop_live_ids_disjoint(pool in arb_pool()) {
        for (i, a) in pool.iter().enumerate() {
            for b in pool.iter().skip(i + 1) {
                prop_assert!(a.id().is_disjoint(b.id()), "{} overlaps {}", a, b);
            }
        }
    }

    /// Property: the live ids of a trace always sum back to the seed id
    #[test]
    fn prop_live_ids_cover_seed(pool in arb_pool()) {
        let mut total = Id::Zero;
        for stamp in &pool {
            total = total.sum(stamp.id()).unwrap();
        }
        prop_assert_eq!(total, Id::One);
    }

    /// Property: event strictly advances history
    #[test]
    fn prop_event_is_monotone(s in arb_stamp()) {
        let next = s.event().unwrap();
        prop_assert!(s.leq(&next));
        prop_assert!(!next.leq(&s));
        prop_assert_ne!(&next, &s);
        prop_assert_eq!(next.id(), s.id());
        prop_assert_eq!(s.causal_order(&next), CausalOrder::Before);
    }

    /// Property: fill never lowers history and grow adds exactly one event
    #[test]
    fn prop_fill_and_grow_bounds(s in arb_stamp()) {
        let filled = s.fill();
        prop_assert!(s.event_tree().leq(&filled));

        // Growth is only attempted once fill has nothing left to claim.
        if filled.leq(s.event_tree()) {
            let (grown, _cost) = s.grow().unwrap();
            prop_assert!(s.event_tree().leq(&grown));
            prop_assert!(!grown.leq(s.event_tree()));
            let evented = s.event().unwrap();
            prop_assert_eq!(evented.event_tree(), &grown);
        }
    }

    /// Property: fork preserves history and partitions identity
    #[test]
    fn prop_fork_partitions_identity(s in arb_stamp()) {
        let (a, b) = s.fork();
        prop_assert_eq!(a.event_tree(), s.event_tree());
        prop_assert_eq!(b.event_tree(), s.event_tree());
        prop_assert!(s.leq(&a) && s.leq(&b));
        prop_assert!(a.id().is_disjoint(b.id()));
        prop_assert_eq!(a.id().sum(b.id()).unwrap(), s.id().normalize());
        prop_assert!(!a.is_anonymous() && !b.is_anonymous());
    }

    /// Property: peek is observational
    #[test]
    fn prop_peek_is_observational(s in arb_stamp(), x in arb_stamp()) {
        let p = s.peek();
        prop_assert!(p.is_anonymous());
        prop_assert_eq!(p.event_tree(), s.event_tree());
        prop_assert_eq!(p.leq(&x), s.leq(&x));
        prop_assert_eq!(x.leq(&p), x.leq(&s));
        prop_assert_eq!(p.event(), Err(ItcError::AnonymousInflate));
    }

    /// Property: join dominates both inputs
    #[test]
    fn prop_join_dominates(pool in arb_pool(), i in any::<usize>(), j in any::<usize>()) {
        let a = &pool[i % pool.len()];
        let b = &pool[j % pool.len()];
        // Actors only ever join disjoint peers; peek the second one when the
        // indices collide.
        let b = if std::ptr::eq(a, b) { b.peek() } else { b.clone() };
        let joined = a.join(&b).unwrap();
        prop_assert!(a.leq(&joined));
        prop_assert!(b.leq(&joined));
        prop_assert_eq!(joined.id(), &a.id().sum(b.id()).unwrap());
    }

    /// Property: join of a stamp with its own snapshot changes nothing
    #[test]
    fn prop_join_with_own_peek(s in arb_stamp()) {
        let s = s.normalize();
        prop_assert_eq!(s.join(&s.peek()).unwrap(), s.clone());
        let p = s.peek();
        prop_assert_eq!(p.join(&p).unwrap(), p.clone());
    }

    /// Property: join with an overlapping stamp is rejected
    #[test]
    fn prop_overlapping_join_rejected(s in arb_stamp()) {
        let rejected = matches!(s.join(&s), Err(ItcError::Overlap { .. }));
        prop_assert!(rejected);
    }

    /// Property: decoded stamps in any shape inflate and fork like their
    /// normal forms
    #[test]
    fn prop_event_on_raw_stamp(s in arb_raw_stamp()) {
        prop_assume!(!s.id().owns_nothing());

        let next = s.event().unwrap();
        prop_assert!(s.leq(&next));
        prop_assert!(!next.leq(&s));
        prop_assert_eq!(next.id(), &s.id().normalize());

        let (a, b) = s.fork();
        prop_assert!(!a.id().owns_nothing() && !b.id().owns_nothing());
        prop_assert!(a.id().is_disjoint(b.id()));
        prop_assert_eq!(a.id().sum(b.id()).unwrap(), s.id().normalize());
    }

    /// Property: fill with no identity is a no-op
    #[test]
    fn prop_fill_without_identity_noop(s in arb_raw_stamp()) {
        let anonymous = Stamp::new(Id::Zero, s.event_tree().clone());
        prop_assert_eq!(&anonymous.fill(), s.event_tree());
    }

    /// Property: causal order is antisymmetric between stamps
    #[test]
    fn prop_causal_order_mirrors(a in arb_stamp(), b in arb_stamp()) {
        let forward = a.causal_order(&b);
        let backward = b.causal_order(&a);
        let expected = match forward {
            CausalOrder::Before => CausalOrder::After,
            CausalOrder::After => CausalOrder::Before,
            other => other,
        };
        prop_assert_eq!(backward, expected);
    }
}
