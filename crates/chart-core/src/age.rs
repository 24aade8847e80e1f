// File: crates/chart-core/src/age.rs
// Summary: Age-band labels ("0", "1-4", "90+") and their numeric sort key.

use std::cmp::Ordering;

/// A labeled age interval plus the key it sorts by.
/// Contract: `key` is the integer prefix of the trimmed label, or 0 when the
/// label does not start with a digit.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AgeBand {
    pub label: String,
    pub key: u32,
}

impl AgeBand {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        let key = age_key(&label);
        Self { label, key }
    }
}

impl PartialOrd for AgeBand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for AgeBand {
    // Key first; the label only breaks ties so `Ord` stays consistent with `Eq`.
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key).then_with(|| self.label.cmp(&other.label))
    }
}

/// Integer prefix of an age-band label: "45-49" -> 45, "90+" -> 90, "0" -> 0.
/// Labels without a leading digit fall back to 0 so they sort first.
pub fn age_key(label: &str) -> u32 {
    let digits = label
        .trim_start()
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u64, |acc, b| (acc * 10 + u64::from(b - b'0')).min(u64::from(u32::MAX)));
    digits as u32
}

/// Sort labels by age key, keeping first-seen order for equal keys.
pub fn sort_labels(labels: &mut [String]) {
    labels.sort_by_key(|l| age_key(l));
}
