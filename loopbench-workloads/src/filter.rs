//! Predicate selection cases
#![allow(clippy::needless_range_loop)]

use crate::SuiteConfig;
use crate::fixtures::Person;
use loopbench_core::{Case, Operation};
use std::fmt::Debug;
use std::sync::Arc;

/// Build a filter case with the three standard variants around one predicate
pub fn filter_case<T, P>(name: impl Into<String>, fixture: Vec<T>, keep: P) -> Case<T, Vec<T>>
where
    T: Clone + Debug + PartialEq + Send + Sync + 'static,
    P: Fn(&T) -> bool + Send + Sync + 'static,
{
    let indexed = Arc::new(keep);
    let iterator = Arc::clone(&indexed);
    let declarative = Arc::clone(&indexed);

    Case::new(name, Operation::Filter, fixture)
        .indexed(move |xs| {
            let mut out = Vec::new();
            for i in 0..xs.len() {
                if indexed(&xs[i]) {
                    out.push(xs[i].clone());
                }
            }
            Ok(out)
        })
        .iterator(move |xs| {
            let mut out = Vec::new();
            for x in xs {
                if iterator(x) {
                    out.push(x.clone());
                }
            }
            Ok(out)
        })
        .declarative(move |xs| Ok(xs.iter().filter(|x| declarative(*x)).cloned().collect()))
}

/// `filter_cheap`: even numbers
pub fn cheap(config: &SuiteConfig) -> Case<i64, Vec<i64>> {
    filter_case("filter_cheap", config.fixtures().sequential(), |x| {
        x % 2 == 0
    })
}

/// `filter_expensive`: transcendental predicate per element
pub fn expensive(config: &SuiteConfig) -> Case<i64, Vec<i64>> {
    filter_case(
        "filter_expensive",
        config.fixtures().sequential(),
        |&x| {
            let x = x as f64;
            x.sin() * (x + 1.0).ln() + x.sqrt() > 1000.0
        },
    )
}

/// `filter_string`: labels starting with `item1`
pub fn string(config: &SuiteConfig) -> Case<String, Vec<String>> {
    filter_case("filter_string", config.fixtures().labels(), |label| {
        label.starts_with("item1")
    })
}

/// `filter_object`: even ids whose name contains a 5
pub fn object(config: &SuiteConfig) -> Case<Person, Vec<Person>> {
    filter_case("filter_object", config.fixtures().persons("Name"), |p| {
        p.id % 2 == 0 && p.name.contains('5')
    })
}
