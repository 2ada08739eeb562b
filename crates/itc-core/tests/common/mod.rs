//! Shared proptest strategies for clock tests
//!
//! Reachable stamps are produced by replaying random actor traces from a
//! single seed, so every generated pool holds pairwise disjoint ids just like
//! a correct deployment. Raw trees (possibly unnormalized) come from
//! recursive strategies and are used where only structure matters.

#![allow(dead_code)]

use std::sync::Arc;

use itc_core::{Event, Id, Stamp};
use proptest::prelude::*;

/// One step of an actor trace; indices are reduced modulo the pool size
#[derive(Debug, Clone)]
pub enum TraceOp {
    Event(usize),
    Fork(usize),
    Join(usize, usize),
    Message { from: usize, to: usize },
}

pub fn arb_trace_op() -> impl Strategy<Value = TraceOp> {
    prop_oneof![
        3 => any::<usize>().prop_map(TraceOp::Event),
        2 => any::<usize>().prop_map(TraceOp::Fork),
        1 => (any::<usize>(), any::<usize>()).prop_map(|(a, b)| TraceOp::Join(a, b)),
        2 => (any::<usize>(), any::<usize>()).prop_map(|(from, to)| TraceOp::Message { from, to }),
    ]
}

/// Replay a trace starting from a single seed actor
pub fn run_trace(ops: &[TraceOp]) -> Vec<Stamp> {
    let mut pool = vec![Stamp::seed()];
    for op in ops {
        let len = pool.len();
        match *op {
            TraceOp::Event(i) => {
                let i = i % len;
                pool[i] = pool[i].event().unwrap();
            }
            TraceOp::Fork(i) => {
                let (a, b) = pool[i % len].fork();
                pool[i % len] = a;
                pool.push(b);
            }
            TraceOp::Join(a, b) => {
                let (a, b) = (a % len, b % len);
                if a != b {
                    let other = pool[b].clone();
                    pool[a] = pool[a].join(&other).unwrap();
                    pool.remove(b);
                }
            }
            TraceOp::Message { from, to } => {
                let (from, to) = (from % len, to % len);
                let (sender, message) = pool[from].send().unwrap();
                pool[from] = sender;
                pool[to] = pool[to].receive(&message).unwrap();
            }
        }
    }
    pool
}

/// Pool of live actors reachable from a seed
pub fn arb_pool() -> impl Strategy<Value = Vec<Stamp>> {
    prop::collection::vec(arb_trace_op(), 0..32).prop_map(|ops| run_trace(&ops))
}

/// A single stamp reachable from a seed
pub fn arb_stamp() -> impl Strategy<Value = Stamp> {
    (arb_pool(), any::<usize>()).prop_map(|(pool, i)| pool[i % pool.len()].clone())
}

/// Event trees that occur in reachable stamps
pub fn arb_event() -> impl Strategy<Value = Event> {
    arb_stamp().prop_map(|s| s.event_tree().clone())
}

/// Arbitrary, possibly unnormalized event trees
pub fn arb_raw_event() -> impl Strategy<Value = Event> {
    let leaf = (0u64..8).prop_map(Event::Leaf);
    leaf.prop_recursive(5, 32, 2, |inner| {
        (0u64..4, inner.clone(), inner)
            .prop_map(|(n, l, r)| Event::Node(n, Arc::new(l), Arc::new(r)))
    })
}

/// Arbitrary, possibly unnormalized ids
pub fn arb_raw_id() -> impl Strategy<Value = Id> {
    let leaf = prop_oneof![Just(Id::Zero), Just(Id::One)];
    leaf.prop_recursive(5, 32, 2, |inner| {
        (inner.clone(), inner).prop_map(|(l, r)| Id::Node(Arc::new(l), Arc::new(r)))
    })
}

/// Arbitrary, possibly unnormalized stamps
pub fn arb_raw_stamp() -> impl Strategy<Value = Stamp> {
    (arb_raw_id(), arb_raw_event()).prop_map(|(id, event)| Stamp::new(id, event))
}
