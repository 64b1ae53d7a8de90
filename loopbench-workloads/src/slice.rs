//! Skip/take window cases
//!
//! Bounds past the end of the fixture clamp to what is available. Only
//! negative offsets or counts are rejected, and they are rejected when a
//! variant runs, not when the case is built.
#![allow(clippy::needless_range_loop)]

use crate::SuiteConfig;
use loopbench_core::{Case, Operation, VariantError};
use std::fmt::Debug;

/// Requested window: skip `skip` elements, then keep at most `take`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceParams {
    /// Elements to skip from the front
    pub skip: i64,
    /// Maximum elements to keep after skipping
    pub take: i64,
}

impl SliceParams {
    /// Create a window
    pub fn new(skip: i64, take: i64) -> Self {
        Self { skip, take }
    }

    /// Validate and convert to unsigned counts
    pub fn bounds(self) -> Result<(usize, usize), VariantError> {
        if self.skip < 0 || self.take < 0 {
            return Err(VariantError::Range {
                offset: self.skip,
                count: self.take,
            });
        }
        Ok((to_usize(self.skip), to_usize(self.take)))
    }
}

/// Zero-based page of fixed size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Page index, starting at 0
    pub number: i64,
    /// Elements per page
    pub size: i64,
}

impl Page {
    /// Create a page request
    pub fn new(number: i64, size: i64) -> Self {
        Self { number, size }
    }

    /// Equivalent skip/take window
    ///
    /// A negative page number or size carries over as a negative bound so the
    /// variant reports it; offsets beyond `i64::MAX` saturate and clamp to an
    /// empty page.
    pub fn window(self) -> SliceParams {
        let skip = if self.number < 0 || self.size < 0 {
            self.number.min(0)
        } else {
            self.number.saturating_mul(self.size)
        };
        SliceParams::new(skip, self.size)
    }
}

fn to_usize(value: i64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

/// Build a slice case with the three standard variants around one window
pub fn slice_case<T>(name: impl Into<String>, fixture: Vec<T>, window: SliceParams) -> Case<T, Vec<T>>
where
    T: Clone + Debug + PartialEq + Send + Sync + 'static,
{
    Case::new(name, Operation::Slice, fixture)
        .indexed(move |xs| {
            let (skip, take) = window.bounds()?;
            let start = skip.min(xs.len());
            let end = start + take.min(xs.len() - start);
            let mut out = Vec::with_capacity(end - start);
            for i in start..end {
                out.push(xs[i].clone());
            }
            Ok(out)
        })
        .iterator(move |xs| {
            let (skip, take) = window.bounds()?;
            let mut out = Vec::new();
            let mut skipped = 0;
            for x in xs {
                if skipped < skip {
                    skipped += 1;
                    continue;
                }
                if out.len() == take {
                    break;
                }
                out.push(x.clone());
            }
            Ok(out)
        })
        .declarative(move |xs| {
            let (skip, take) = window.bounds()?;
            Ok(xs.iter().skip(skip).take(take).cloned().collect())
        })
}

/// `slice_skip_take`: configured skip/take window over sequential numbers
pub fn skip_take(config: &SuiteConfig) -> Case<i64, Vec<i64>> {
    slice_case(
        "slice_skip_take",
        config.fixtures().sequential(),
        config.slice,
    )
}

/// `slice_paginate`: configured page over sequential numbers
pub fn paginate(config: &SuiteConfig) -> Case<i64, Vec<i64>> {
    slice_case(
        "slice_paginate",
        config.fixtures().sequential(),
        config.page.window(),
    )
}
