//! Variant outputs
//!
//! Outputs are summarized right after measurement and then dropped; the
//! summary (element count, short preview, fingerprint) is what reports carry.
//! The same trait supplies the default equality predicate used by `verify`.

use fxhash::FxHasher;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Write as _};
use std::hash::Hasher;

/// Number of leading elements shown in a preview
const PREVIEW_ELEMENTS: usize = 4;

/// Compact, comparable description of a variant's output
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutputSummary {
    /// Number of elements (groups for groupings, 1 for scalars)
    pub elements: usize,
    /// Leading elements, formatted with `Debug`
    pub preview: String,
    /// Digest of the full output
    pub fingerprint: u64,
}

/// A value a variant can produce
pub trait Output: Send + 'static {
    /// Summarize the output for reporting
    fn summarize(&self) -> OutputSummary;

    /// Describe the first difference from `other`, or `None` when equivalent
    fn diff(&self, other: &Self) -> Option<String>;
}

/// Hasher that accepts `Debug` formatting without allocating
struct HashWriter(FxHasher);

impl fmt::Write for HashWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.write(s.as_bytes());
        Ok(())
    }
}

fn fingerprint<I>(items: I) -> u64
where
    I: IntoIterator,
    I::Item: Debug,
{
    let mut writer = HashWriter(FxHasher::default());
    for item in items {
        // Writing into a hasher cannot fail
        let _ = write!(writer, "{item:?};");
    }
    writer.0.finish()
}

fn preview_list<T: Debug>(items: &[T]) -> String {
    let mut preview = String::from("[");
    for (i, item) in items.iter().take(PREVIEW_ELEMENTS).enumerate() {
        if i > 0 {
            preview.push_str(", ");
        }
        let _ = write!(preview, "{item:?}");
    }
    if items.len() > PREVIEW_ELEMENTS {
        preview.push_str(", …");
    }
    preview.push(']');
    preview
}

impl<T> Output for Vec<T>
where
    T: Debug + PartialEq + Send + 'static,
{
    fn summarize(&self) -> OutputSummary {
        OutputSummary {
            elements: self.len(),
            preview: preview_list(self),
            fingerprint: fingerprint(self),
        }
    }

    fn diff(&self, other: &Self) -> Option<String> {
        if let Some((i, (a, b))) = self
            .iter()
            .zip(other.iter())
            .enumerate()
            .find(|(_, (a, b))| a != b)
        {
            return Some(format!("element {i}: {a:?} vs {b:?}"));
        }
        (self.len() != other.len())
            .then(|| format!("lengths differ: {} vs {}", self.len(), other.len()))
    }
}

macro_rules! scalar_output {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Output for $ty {
                fn summarize(&self) -> OutputSummary {
                    OutputSummary {
                        elements: 1,
                        preview: format!("{self:?}"),
                        fingerprint: fingerprint(std::iter::once(self)),
                    }
                }

                fn diff(&self, other: &Self) -> Option<String> {
                    (self != other).then(|| format!("{self:?} vs {other:?}"))
                }
            }
        )*
    };
}

scalar_output!(i32, i64, u32, u64, usize, f64, bool, String);

/// Result of a group-by transformation
///
/// Neither the order of groups nor the order of members inside a group is
/// significant: two groupings are equal when they hold the same keys and each
/// key holds the same multiset of members.
#[derive(Debug, Clone, PartialEq)]
pub struct Groups<K, V> {
    entries: Vec<(K, Vec<V>)>,
}

impl<K, V> Default for Groups<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K, V> Groups<K, V> {
    /// Create an empty grouping
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no groups
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Groups in the order the producing variant emitted them
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[V])> {
        self.entries.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Members of the group with this key
    pub fn get(&self, key: &K) -> Option<&[V]>
    where
        K: PartialEq,
    {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_slice())
    }

    /// Order-independent form: keys sorted, members sorted within each key
    pub fn canonical(&self) -> Vec<(K, Vec<V>)>
    where
        K: Ord + Clone,
        V: Ord + Clone,
    {
        let mut canonical: Vec<(K, Vec<V>)> = self
            .entries
            .iter()
            .map(|(k, members)| {
                let mut members = members.clone();
                members.sort();
                (k.clone(), members)
            })
            .collect();
        canonical.sort_by(|a, b| a.0.cmp(&b.0));
        canonical
    }
}

/// Entries sharing a key are merged, members appended in arrival order
impl<K: PartialEq, V> FromIterator<(K, Vec<V>)> for Groups<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, Vec<V>)>>(iter: I) -> Self {
        let mut entries: Vec<(K, Vec<V>)> = Vec::new();
        for (key, members) in iter {
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some((_, existing)) => existing.extend(members),
                None => entries.push((key, members)),
            }
        }
        Self { entries }
    }
}

impl<K, V> Output for Groups<K, V>
where
    K: Ord + Clone + Debug + Send + 'static,
    V: Ord + Clone + Debug + Send + 'static,
{
    fn summarize(&self) -> OutputSummary {
        let canonical = self.canonical();

        let mut preview = String::from("{");
        for (i, (key, members)) in canonical.iter().take(PREVIEW_ELEMENTS).enumerate() {
            if i > 0 {
                preview.push_str(", ");
            }
            let _ = write!(preview, "{key:?}: {}", preview_list(members));
        }
        if canonical.len() > PREVIEW_ELEMENTS {
            preview.push_str(", …");
        }
        preview.push('}');

        OutputSummary {
            elements: canonical.len(),
            preview,
            fingerprint: fingerprint(&canonical),
        }
    }

    fn diff(&self, other: &Self) -> Option<String> {
        let ours = self.canonical();
        let theirs = other.canonical();

        for (key, members) in &ours {
            match theirs.iter().find(|(k, _)| k == key) {
                None => return Some(format!("group {key:?} missing from second output")),
                Some((_, other_members)) if other_members != members => {
                    return Some(format!(
                        "group {key:?}: {} vs {}",
                        preview_list(members),
                        preview_list(other_members)
                    ));
                }
                Some(_) => {}
            }
        }

        theirs
            .iter()
            .find(|(k, _)| !ours.iter().any(|(ours_k, _)| ours_k == k))
            .map(|(key, _)| format!("group {key:?} missing from first output"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_summary() {
        let summary = vec![2_i64, 4, 6].summarize();
        assert_eq!(summary.elements, 3);
        assert_eq!(summary.preview, "[2, 4, 6]");

        let long: Vec<i64> = (0..10).collect();
        assert_eq!(long.summarize().preview, "[0, 1, 2, 3, …]");
    }

    #[test]
    fn test_fingerprint_is_order_sensitive_for_sequences() {
        let a = vec![1_i64, 2, 3].summarize();
        let b = vec![3_i64, 2, 1].summarize();
        assert_ne!(a.fingerprint, b.fingerprint);
        assert_eq!(a, vec![1_i64, 2, 3].summarize());
    }

    #[test]
    fn test_vec_diff() {
        assert_eq!(vec![1, 2, 3].diff(&vec![1, 2, 3]), None);
        assert_eq!(
            vec![1, 2, 3].diff(&vec![1, 5, 3]),
            Some("element 1: 2 vs 5".to_string())
        );
        assert_eq!(
            vec![1, 2].diff(&vec![1, 2, 3]),
            Some("lengths differ: 2 vs 3".to_string())
        );
    }

    #[test]
    fn test_scalar_diff() {
        assert_eq!(10_i64.diff(&10), None);
        assert_eq!(10_i64.diff(&11), Some("10 vs 11".to_string()));
        assert_eq!(42_u64.summarize().preview, "42");
    }

    #[test]
    fn test_groups_equal_regardless_of_order() {
        let a: Groups<i64, i64> = vec![(0, vec![10, 12]), (1, vec![11, 13])]
            .into_iter()
            .collect();
        let b: Groups<i64, i64> = vec![(1, vec![13, 11]), (0, vec![12, 10])]
            .into_iter()
            .collect();

        assert_eq!(a.diff(&b), None);
        assert_eq!(a.summarize(), b.summarize());
        assert_eq!(a.summarize().preview, "{0: [10, 12], 1: [11, 13]}");
    }

    #[test]
    fn test_groups_multiset_members() {
        let a: Groups<i64, i64> = vec![(0, vec![2, 2, 4])].into_iter().collect();
        let b: Groups<i64, i64> = vec![(0, vec![2, 4, 4])].into_iter().collect();
        assert!(a.diff(&b).is_some());
    }

    #[test]
    fn test_groups_missing_key() {
        let a: Groups<i64, i64> = vec![(0, vec![2])].into_iter().collect();
        let b: Groups<i64, i64> = vec![(0, vec![2]), (1, vec![3])].into_iter().collect();
        assert_eq!(
            a.diff(&b),
            Some("group 1 missing from first output".to_string())
        );
        assert_eq!(
            b.diff(&a),
            Some("group 1 missing from second output".to_string())
        );
    }

    #[test]
    fn test_groups_lookup() {
        let groups: Groups<&'static str, i64> = vec![("odd", vec![1, 3])].into_iter().collect();
        assert_eq!(groups.get(&"odd"), Some(&[1, 3][..]));
        assert_eq!(groups.get(&"even"), None);
        assert_eq!(groups.len(), 1);
    }

    #[test]
    fn test_groups_merge_repeated_keys() {
        let split: Groups<i64, i64> = vec![(0, vec![1]), (1, vec![5]), (0, vec![2])]
            .into_iter()
            .collect();
        let merged: Groups<i64, i64> = vec![(0, vec![1, 2]), (1, vec![5])].into_iter().collect();
        assert_eq!(split.len(), 2);
        assert_eq!(split.get(&0), Some(&[1, 2][..]));
        assert_eq!(split.diff(&merged), None);
        assert_eq!(split.summarize(), merged.summarize());
    }
}
