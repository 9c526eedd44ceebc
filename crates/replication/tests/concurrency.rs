//! Concurrent readers and writers.

use corelib::node::{Member, Node};
use replication::{CHash, Config};
use std::collections::HashSet;
use std::sync::Arc;

fn node(id: String) -> Arc<Node> {
    Arc::new(Node::new(id, 1.0))
}

#[test]
fn test_readers_never_see_partial_distribution() {
    let chash = CHash::new(Config::new(256, 3)).unwrap();
    chash
        .add_members((0..3).map(|i| node(format!("seed{}", i))))
        .unwrap();

    crossbeam::thread::scope(|s| {
        s.spawn(|_| {
            for i in 0..50 {
                let id = format!("w{}", i);
                chash.add_members(vec![node(id.clone())]).unwrap();
                if i % 2 == 0 {
                    chash.remove_members(&[id]).unwrap();
                }
            }
        });

        for r in 0..4 {
            let chash = &chash;
            s.spawn(move |_| {
                for i in 0..2_000 {
                    let replicas = chash.get_members(&format!("key-{}-{}", r, i));
                    let distinct: HashSet<_> = replicas.iter().map(|m| m.id()).collect();
                    // At least three members are always live, so every
                    // consistent table has three distinct replicas.
                    assert_eq!(replicas.len(), 3);
                    assert_eq!(distinct.len(), 3);
                }
            });
        }
    })
    .unwrap();

    assert_eq!(chash.member_count(), 3 + 25);
}

#[test]
fn test_navigation_under_concurrent_reconfigure() {
    let chash = CHash::new(Config::new(64, 2)).unwrap();
    chash
        .add_members(vec![node("a".into()), node("b".into())])
        .unwrap();

    crossbeam::thread::scope(|s| {
        s.spawn(|_| {
            for i in 0..100 {
                let mut members = vec![node("a".into()), node("b".into())];
                members.extend((0..i % 5).map(|j| node(format!("x{}", j))));
                chash.reconfigure(members).unwrap();
            }
        });
        s.spawn(|_| {
            for _ in 0..1_000 {
                // "a" is part of every configuration.
                let next = chash.get_next("a").unwrap();
                assert_ne!(next.id(), "a");
                assert!(chash.get_prev("a").is_ok());
            }
        });
    })
    .unwrap();
}
