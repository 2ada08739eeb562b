//! Actor Scenario Tests
//!
//! Concrete fork/event/join/peek walkthroughs with exact expected stamps.

use itc_core::{CausalOrder, Event, Id, ItcError, Stamp};

fn stamp(text: &str) -> Stamp {
    text.parse().unwrap()
}

// ============================================================================
// Seed and inflate
// ============================================================================

#[test]
fn seed_then_event() {
    let s0 = Stamp::seed();
    assert_eq!(s0.to_string(), "(1,0)");
    assert_eq!(s0.event().unwrap().to_string(), "(1,1)");
}

#[test]
fn repeated_events_on_sole_owner_count_up() {
    let mut s = Stamp::seed();
    for _ in 0..5 {
        s = s.event().unwrap();
    }
    assert_eq!(s, stamp("(1,5)"));
}

// ============================================================================
// Fork, event, join
// ============================================================================

#[test]
fn forked_actors_diverge_and_rejoin() {
    let s0 = Stamp::seed();
    let (sa, sb) = s0.fork();
    let sa = sa.event().unwrap();

    // b has seen nothing a has not, so it is still ordered before a.
    assert_eq!(sb.causal_order(&sa), CausalOrder::Before);

    let sb = sb.event().unwrap();
    assert_eq!(sa.causal_order(&sb), CausalOrder::Concurrent);

    let joined = sa.join(&sb).unwrap();
    assert!(sa.leq(&joined));
    assert!(sb.leq(&joined));
    assert_eq!(joined, stamp("(1,1)"));
}

#[test]
fn three_actor_exchange() {
    let (a, b) = Stamp::seed().fork();
    let (b, c) = b.fork();
    assert_eq!(b, stamp("((0,(1,0)),0)"));
    assert_eq!(c, stamp("((0,(0,1)),0)"));

    let a = a.event().unwrap();
    let (c, message) = c.send().unwrap();
    let b = b.receive(&message).unwrap();

    assert!(c.happens_before(&b));
    assert!(a.is_concurrent_with(&b));
    assert!(a.is_concurrent_with(&c));

    let everyone = a.join(&b).unwrap().join(&c).unwrap();
    assert_eq!(everyone.id(), &Id::One);
    for s in [&a, &b, &c] {
        assert!(s.leq(&everyone));
    }
}

#[test]
fn retiring_actor_returns_identity() {
    let (a, b) = Stamp::seed().fork();
    let b = b.event().unwrap();
    let a = a.join(&b).unwrap();
    assert!(a.id().owns_everything());
    assert_eq!(a.event().unwrap(), stamp("(1,1)"));
}

// ============================================================================
// Peek
// ============================================================================

#[test]
fn peek_never_advances() {
    let s0 = Stamp::seed();
    let s1 = s0.event().unwrap();
    let p = s1.peek();

    assert!(p.is_anonymous());
    assert_eq!(p.causal_order(&s1), CausalOrder::Equal);
    assert_eq!(p.event(), Err(ItcError::AnonymousInflate));

    let (x, y) = p.fork();
    assert!(x.is_anonymous() && y.is_anonymous());
}

#[test]
fn anonymous_join_with_itself_is_identity() {
    let p = Stamp::seed().event().unwrap().peek();
    assert_eq!(p.join(&p).unwrap(), p);
}

#[test]
fn fill_is_noop_without_identity() {
    let e: Event = "(1,0,(0,2,0))".parse().unwrap();
    let s = Stamp::new(Id::Zero, e.clone());
    assert_eq!(s.fill(), e);
}

// ============================================================================
// Rejections
// ============================================================================

#[test]
fn join_of_overlapping_stamps_is_rejected() {
    let (a, _) = Stamp::seed().fork();
    let err = a.join(&Stamp::seed()).unwrap_err();
    assert!(err.is_invalid_input());
    assert_eq!(
        err.to_string(),
        "Cannot sum overlapping ids (1,0) and 1"
    );
}

#[test]
fn mismatched_trees_are_reported_as_defects() {
    let broken = stamp("(0,(0,1,0))");
    let err = broken.grow().unwrap_err();
    assert!(err.is_defect());
}
