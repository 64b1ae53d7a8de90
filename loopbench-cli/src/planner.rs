//! Case Planner
//!
//! Builds the execution plan by filtering registered cases.
//!
//! Filtering: regex pattern matching on the case name.
//!
//! Ordering: cases keep registration order, so reports line up with the
//! order the suite was declared in.

use regex::Regex;

/// Execution plan for cases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan<'a> {
    /// Ordered list of case names to run
    pub cases: Vec<&'a str>,
}

impl ExecutionPlan<'_> {
    /// Whether nothing matched
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

/// Build execution plan from registered case names
pub fn build_plan<'a>(
    cases: impl IntoIterator<Item = &'a str>,
    filter: Option<&Regex>,
) -> ExecutionPlan<'a> {
    let cases = cases
        .into_iter()
        .filter(|name| filter.is_none_or(|re| re.is_match(name)))
        .collect();

    ExecutionPlan { cases }
}
