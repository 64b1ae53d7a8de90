//! Nested sequence concatenation
#![allow(clippy::needless_range_loop)]

use crate::SuiteConfig;
use loopbench_core::{Case, Operation};
use std::fmt::Debug;

/// Build a flatten case with the three standard variants
pub fn flatten_case<T>(name: impl Into<String>, fixture: Vec<Vec<T>>) -> Case<Vec<T>, Vec<T>>
where
    T: Clone + Debug + PartialEq + Send + Sync + 'static,
{
    Case::new(name, Operation::Flatten, fixture)
        .indexed(|xs| {
            let mut total = 0;
            for i in 0..xs.len() {
                total += xs[i].len();
            }
            let mut out = Vec::with_capacity(total);
            for i in 0..xs.len() {
                for j in 0..xs[i].len() {
                    out.push(xs[i][j].clone());
                }
            }
            Ok(out)
        })
        .iterator(|xs| {
            let mut out = Vec::new();
            for inner in xs {
                for x in inner {
                    out.push(x.clone());
                }
            }
            Ok(out)
        })
        .declarative(|xs| Ok(xs.iter().flatten().cloned().collect()))
}

/// `flatten_nested`: seeded random-length lists
pub fn nested(config: &SuiteConfig) -> Case<Vec<i64>, Vec<i64>> {
    flatten_case("flatten_nested", config.fixtures().nested(config.max_inner))
}
