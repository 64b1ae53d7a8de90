//! Element-wise projection cases
#![allow(clippy::needless_range_loop)]

use crate::SuiteConfig;
use crate::fixtures::Person;
use loopbench_core::{Case, Operation};
use std::fmt::Debug;
use std::sync::Arc;

/// Build a map case with the three standard variants around one projection
pub fn map_case<TIn, TOut, F>(
    name: impl Into<String>,
    fixture: Vec<TIn>,
    project: F,
) -> Case<TIn, Vec<TOut>>
where
    TIn: Send + Sync + 'static,
    TOut: Debug + PartialEq + Send + 'static,
    F: Fn(&TIn) -> TOut + Send + Sync + 'static,
{
    let indexed = Arc::new(project);
    let iterator = Arc::clone(&indexed);
    let declarative = Arc::clone(&indexed);

    Case::new(name, Operation::Map, fixture)
        .indexed(move |xs| {
            let mut out = Vec::with_capacity(xs.len());
            for i in 0..xs.len() {
                out.push(indexed(&xs[i]));
            }
            Ok(out)
        })
        .iterator(move |xs| {
            let mut out = Vec::with_capacity(xs.len());
            for x in xs {
                out.push(iterator(x));
            }
            Ok(out)
        })
        .declarative(move |xs| Ok(xs.iter().map(|x| declarative(x)).collect()))
}

/// `map_numeric`: `x + x`
pub fn numeric(config: &SuiteConfig) -> Case<i64, Vec<i64>> {
    map_case("map_numeric", config.fixtures().sequential(), |x| x + x)
}

/// `map_string`: uppercase each label
pub fn string(config: &SuiteConfig) -> Case<String, Vec<String>> {
    map_case("map_string", config.fixtures().labels(), |label| {
        label.to_uppercase()
    })
}

/// `map_object_create`: build one record per number
pub fn object_create(config: &SuiteConfig) -> Case<i64, Vec<Person>> {
    map_case("map_object_create", config.fixtures().sequential(), |&x| {
        Person::new(x, format!("Name{x}"))
    })
}

/// `map_object_update`: rename a copy of every record
///
/// The fixture stays untouched; each run works on its own copies.
pub fn object_update(config: &SuiteConfig) -> Case<Person, Vec<Person>> {
    map_case(
        "map_object_update",
        config.fixtures().persons("OldName"),
        |person| {
            let mut updated = person.clone();
            updated.name = format!("Updated{}", updated.id);
            updated
        },
    )
}
