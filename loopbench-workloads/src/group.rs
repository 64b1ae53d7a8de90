//! Group-by cases
//!
//! Key extraction may fail. The first failing element aborts the whole
//! variant invocation with an execution error that carries the cause.
#![allow(clippy::needless_range_loop)]

use crate::SuiteConfig;
use fxhash::FxHashMap;
use loopbench_core::{Case, Groups, Operation, VariantError};
use std::collections::BTreeMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::sync::Arc;

/// Build a group-by case with the three standard variants around one key selector
///
/// The indexed and declarative variants bucket through a hash map, the
/// iterator variant through an ordered map, so group order differs between
/// variants while the groupings stay equal.
pub fn group_case<T, K, E, F>(
    name: impl Into<String>,
    fixture: Vec<T>,
    key: F,
) -> Case<T, Groups<K, T>>
where
    T: Ord + Clone + Debug + Send + Sync + 'static,
    K: Ord + Hash + Clone + Debug + Send + 'static,
    E: Display,
    F: Fn(&T) -> Result<K, E> + Send + Sync + 'static,
{
    let key = Arc::new(move |item: &T| key(item).map_err(key_error));
    let indexed = Arc::clone(&key);
    let iterator = Arc::clone(&key);

    Case::new(name, Operation::GroupBy, fixture)
        .indexed(move |xs| {
            let mut groups: FxHashMap<K, Vec<T>> = FxHashMap::default();
            for i in 0..xs.len() {
                groups.entry(indexed(&xs[i])?).or_default().push(xs[i].clone());
            }
            Ok(groups.into_iter().collect())
        })
        .iterator(move |xs| {
            let mut groups: BTreeMap<K, Vec<T>> = BTreeMap::new();
            for x in xs {
                groups.entry(iterator(x)?).or_default().push(x.clone());
            }
            Ok(groups.into_iter().collect())
        })
        .declarative(move |xs| {
            xs.iter()
                .try_fold(
                    FxHashMap::default(),
                    |mut groups: FxHashMap<K, Vec<T>>, x| -> Result<_, VariantError> {
                        groups.entry(key(x)?).or_default().push(x.clone());
                        Ok(groups)
                    },
                )
                .map(|groups| groups.into_iter().collect())
        })
}

fn key_error<E: Display>(cause: E) -> VariantError {
    VariantError::execution(format!("key extraction failed: {cause}"))
}

/// `group_parity`: random numbers by `x % 2`
pub fn parity(config: &SuiteConfig) -> Case<i64, Groups<i64, i64>> {
    group_case(
        "group_parity",
        config.fixtures().random_numbers(),
        |x| Ok::<_, VariantError>(x.rem_euclid(2)),
    )
}

/// `group_label_digit`: labels by the last digit of their numeric suffix
pub fn label_digit(config: &SuiteConfig) -> Case<String, Groups<u8, String>> {
    group_case(
        "group_label_digit",
        config.fixtures().labels(),
        |label: &String| label_digit_key(label),
    )
}

fn label_digit_key(label: &str) -> Result<u8, String> {
    let suffix = label
        .strip_prefix("item")
        .ok_or_else(|| format!("label '{label}' has no item prefix"))?;
    let n: u64 = suffix
        .parse()
        .map_err(|e| format!("label '{label}': {e}"))?;
    Ok((n % 10) as u8)
}
