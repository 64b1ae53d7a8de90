//! Fold cases
#![allow(clippy::needless_range_loop)]

use crate::SuiteConfig;
use loopbench_core::{Case, Operation, Output};
use std::sync::Arc;

/// Build a reduce case with the three standard variants around one step function
///
/// An empty fixture yields `init` unchanged.
pub fn reduce_case<TIn, TAcc, F>(
    name: impl Into<String>,
    fixture: Vec<TIn>,
    init: TAcc,
    step: F,
) -> Case<TIn, TAcc>
where
    TIn: Send + Sync + 'static,
    TAcc: Output + Clone + Sync,
    F: Fn(TAcc, &TIn) -> TAcc + Send + Sync + 'static,
{
    let step = Arc::new(step);
    let init = Arc::new(init);
    let (indexed, indexed_init) = (Arc::clone(&step), Arc::clone(&init));
    let (iterator, iterator_init) = (Arc::clone(&step), Arc::clone(&init));

    Case::new(name, Operation::Reduce, fixture)
        .indexed(move |xs| {
            let mut acc = TAcc::clone(&indexed_init);
            for i in 0..xs.len() {
                acc = indexed(acc, &xs[i]);
            }
            Ok(acc)
        })
        .iterator(move |xs| {
            let mut acc = TAcc::clone(&iterator_init);
            for x in xs {
                acc = iterator(acc, x);
            }
            Ok(acc)
        })
        .declarative(move |xs| Ok(xs.iter().fold(TAcc::clone(&init), |acc, x| step(acc, x))))
}

/// `reduce_sum`: wrapping sum of random numbers
pub fn sum(config: &SuiteConfig) -> Case<i64, u64> {
    reduce_case(
        "reduce_sum",
        config.fixtures().random_numbers(),
        0_u64,
        |acc, &x| acc.wrapping_add(x as u64),
    )
}

/// `reduce_label_length`: total byte length of all labels
pub fn label_length(config: &SuiteConfig) -> Case<String, usize> {
    reduce_case(
        "reduce_label_length",
        config.fixtures().labels(),
        0_usize,
        |acc, label| acc + label.len(),
    )
}
