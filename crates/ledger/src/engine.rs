//! Sign-based consumption rule.
//!
//! A ledger is an ordered run of non-zero integers that all share one sign.
//! Inputs with the ledger's sign queue up at the tail; inputs with the other
//! sign eat magnitude from the head, and only an input larger than the whole
//! ledger can flip its sign.

use std::{borrow::Cow, cmp::Ordering, fmt};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    pub fn of(value: i64) -> Option<Self> {
        match value.cmp(&0) {
            Ordering::Greater => Some(Self::Positive),
            Ordering::Less => Some(Self::Negative),
            Ordering::Equal => None,
        }
    }

    /// Rebuilds a signed entry. Callers only pass magnitudes taken from a
    /// value of this sign, so the result always fits.
    fn with_magnitude(self, magnitude: u64) -> i64 {
        match self {
            Self::Positive => i64::try_from(magnitude).unwrap_or(i64::MAX),
            Self::Negative => 0i64.checked_sub_unsigned(magnitude).unwrap_or(i64::MIN),
        }
    }
}

/// Which branch of the rule handled an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    IgnoredZero,
    AppendedToEmpty(i64),
    AppendedAfterCompaction(i64),
    AppendedSameSign(i64),
    ConsumedOppositeSign(i64),
    FlippedSign(i64),
}

impl Action {
    pub fn changed_sign(&self) -> bool {
        matches!(self, Self::FlippedSign(_))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IgnoredZero => f.write_str("ignored zero (no-op)"),
            Self::AppendedToEmpty(input) => write!(f, "list empty, appended {input}"),
            Self::AppendedAfterCompaction(input) => {
                write!(f, "list empty after compaction, appended {input}")
            }
            Self::AppendedSameSign(input) => write!(f, "same sign, appended {input}"),
            Self::ConsumedOppositeSign(input) => write!(f, "opposite sign, applied {input}"),
            Self::FlippedSign(input) => {
                write!(f, "opposite sign, applied {input}, sign flipped")
            }
        }
    }
}

/// Applies `input` to `entries` and returns the action taken together with a
/// freshly allocated ledger. `entries` is never modified.
///
/// The returned ledger never contains zeros, even when `entries` did.
pub fn apply(entries: &[i64], input: i64) -> (Action, Vec<i64>) {
    let Some(input_sign) = Sign::of(input) else {
        return (Action::IgnoredZero, compact(entries));
    };

    let mut working = Cow::Borrowed(entries);
    if working.first() == Some(&0) {
        working = Cow::Owned(compact(&working));
        if working.is_empty() {
            return (Action::AppendedAfterCompaction(input), vec![input]);
        }
    }

    let Some(ledger_sign) = working.first().copied().and_then(Sign::of) else {
        return (Action::AppendedToEmpty(input), vec![input]);
    };

    if input_sign == ledger_sign {
        let mut next = compact(&working);
        next.push(input);
        return (Action::AppendedSameSign(input), next);
    }

    consume(&working, ledger_sign, input, input_sign)
}

fn consume(entries: &[i64], ledger_sign: Sign, input: i64, input_sign: Sign) -> (Action, Vec<i64>) {
    let mut remaining = input.unsigned_abs();

    for (index, &entry) in entries.iter().enumerate() {
        let magnitude = entry.unsigned_abs();
        let tail = &entries[index + 1..];
        match remaining.cmp(&magnitude) {
            Ordering::Greater => remaining -= magnitude,
            Ordering::Equal => return (Action::ConsumedOppositeSign(input), compact(tail)),
            Ordering::Less => {
                let mut next = Vec::with_capacity(tail.len() + 1);
                next.push(ledger_sign.with_magnitude(magnitude - remaining));
                next.extend(tail.iter().copied().filter(|entry| *entry != 0));
                return (Action::ConsumedOppositeSign(input), next);
            }
        }
    }

    // Every entry was eaten and `remaining` is still positive.
    (
        Action::FlippedSign(input),
        vec![input_sign.with_magnitude(remaining)],
    )
}

fn compact(entries: &[i64]) -> Vec<i64> {
    entries.iter().copied().filter(|entry| *entry != 0).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("entry {index} is zero")]
    ZeroEntry { index: usize },
    #[error("entry {index} ({value}) does not share the sign of the first entry")]
    MixedSigns { index: usize, value: i64 },
}

/// A ledger that upholds the non-zero, single-sign invariant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Ledger(Vec<i64>);

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_from_entries(entries: Vec<i64>) -> Result<Self, LedgerError> {
        let mut expected = None;
        for (index, &value) in entries.iter().enumerate() {
            let sign = Sign::of(value).ok_or(LedgerError::ZeroEntry { index })?;
            match expected {
                None => expected = Some(sign),
                Some(expected) if expected != sign => {
                    return Err(LedgerError::MixedSigns { index, value })
                }
                Some(_) => {}
            }
        }
        Ok(Self(entries))
    }

    pub fn entries(&self) -> &[i64] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<i64> {
        self.0.clone()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn sign(&self) -> Option<Sign> {
        self.0.first().copied().and_then(Sign::of)
    }

    /// Sum of absolute values. Widened so that no ledger can overflow it.
    pub fn total_magnitude(&self) -> u128 {
        self.0.iter().map(|entry| u128::from(entry.unsigned_abs())).sum()
    }

    pub fn apply(&self, input: i64) -> (Action, Ledger) {
        let (action, entries) = apply(&self.0, input);
        (action, Self(entries))
    }
}

impl TryFrom<Vec<i64>> for Ledger {
    type Error = LedgerError;

    fn try_from(entries: Vec<i64>) -> Result<Self, Self::Error> {
        Self::try_from_entries(entries)
    }
}

impl From<Ledger> for Vec<i64> {
    fn from(ledger: Ledger) -> Self {
        ledger.0
    }
}

#[cfg(test)]
#[path = "tests/engine_tests.rs"]
mod tests;
