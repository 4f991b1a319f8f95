//! Special-card event counts.
//!
//! Counts are paired: `positive` records captured instances and `negative`
//! (already signed, `<= 0`) records lost ones. Older records stored a bare
//! number per card; [`normalize_special_cards`] is the only place that form
//! is understood.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialCount {
    #[serde(default)]
    pub positive: i32,
    #[serde(default)]
    pub negative: i32,
}

impl SpecialCount {
    pub fn new(positive: i32, negative: i32) -> Self {
        Self { positive, negative }
    }

    pub fn net(&self) -> i32 {
        self.positive + self.negative
    }

    pub fn is_zero(&self) -> bool {
        self.positive == 0 && self.negative == 0
    }
}

/// Special counts keyed by scoring rule id.
pub type SpecialCounts = BTreeMap<String, SpecialCount>;

/// A count as it may appear in storage: legacy bare number, paired form,
/// or an explicit null left behind by old clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpecialTally {
    Count(i32),
    Paired(SpecialCount),
    Empty,
}

impl SpecialTally {
    pub fn normalize(self) -> SpecialCount {
        match self {
            SpecialTally::Count(n) => SpecialCount::new(n, 0),
            SpecialTally::Paired(pair) => pair,
            SpecialTally::Empty => SpecialCount::default(),
        }
    }
}

impl From<SpecialCount> for SpecialTally {
    fn from(pair: SpecialCount) -> Self {
        SpecialTally::Paired(pair)
    }
}

/// Anything that can report a signed net occurrence count.
pub trait NetCount {
    fn net_count(&self) -> i32;
}

impl NetCount for i32 {
    fn net_count(&self) -> i32 {
        *self
    }
}

impl NetCount for SpecialCount {
    fn net_count(&self) -> i32 {
        self.net()
    }
}

impl NetCount for SpecialTally {
    fn net_count(&self) -> i32 {
        self.normalize().net()
    }
}

/// Convert stored tallies into the paired form.
pub fn normalize_special_cards<I>(raw: I) -> SpecialCounts
where
    I: IntoIterator<Item = (String, SpecialTally)>,
{
    raw.into_iter()
        .map(|(id, tally)| (id, tally.normalize()))
        .collect()
}
