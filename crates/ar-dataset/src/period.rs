//! Period-string parser.
//!
//! # Grammar
//!
//! ```text
//! periods := token ("," token)*
//! token   := index | index "-" index | "T" | ε
//! index   := [0-9]+
//! ```
//!
//! Whitespace anywhere in the string is ignored.  `T` marks the boundary as
//! still valid when the dataset was frozen ("ongoing"); it contributes no
//! index of its own.  Empty tokens (a trailing comma) are skipped.

use std::fmt;
use std::str::FromStr;

use crate::{DatasetError, DatasetResult};

// ── Period ────────────────────────────────────────────────────────────────────

/// One period: a single time index or an inclusive range of them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Period {
    Single(u32),
    /// Inclusive on both ends; `start <= end` is guaranteed by the parser.
    Range { start: u32, end: u32 },
}

impl Period {
    pub fn start(self) -> u32 {
        match self {
            Period::Single(i) => i,
            Period::Range { start, .. } => start,
        }
    }

    pub fn end(self) -> u32 {
        match self {
            Period::Single(i) => i,
            Period::Range { end, .. } => end,
        }
    }

    /// Every index covered, in ascending order.
    pub fn indices(self) -> std::ops::RangeInclusive<u32> {
        self.start()..=self.end()
    }

    /// Array form: `[i]` or `[start, end]`.
    pub fn to_vec(self) -> Vec<u32> {
        match self {
            Period::Single(i) => vec![i],
            Period::Range { start, end } => vec![start, end],
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Single(i) => write!(f, "{i}"),
            Period::Range { start, end } => write!(f, "{start}-{end}"),
        }
    }
}

impl FromStr for Period {
    type Err = DatasetError;

    /// Parse one whitespace-free token (`"7"` or `"3-9"`).
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let index = |s: &str| {
            let not_index = || DatasetError::malformed(token, format!("{s:?} is not a time index"));
            // `u32::from_str` also takes a leading `+`.
            if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
                return Err(not_index());
            }
            s.parse::<u32>().map_err(|_| not_index())
        };

        match token.split_once('-') {
            None => Ok(Period::Single(index(token)?)),
            Some((a, b)) => {
                let (start, end) = (index(a)?, index(b)?);
                if start > end {
                    return Err(DatasetError::malformed(
                        token,
                        format!("range start {start} is after end {end}"),
                    ));
                }
                Ok(Period::Range { start, end })
            }
        }
    }
}

// ── PeriodSet ─────────────────────────────────────────────────────────────────

/// All periods parsed from one period string, in written order.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct PeriodSet {
    pub periods: Vec<Period>,
    /// A `T` token was present.
    pub ongoing: bool,
}

impl PeriodSet {
    /// Every covered index, period by period.  Overlapping periods yield
    /// repeated indices; downstream aggregation resolves them.
    pub fn iter_indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.periods.iter().flat_map(|p| p.indices())
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}

/// Parse a period string such as `"1-166, T"`.
///
/// # Errors
///
/// [`DatasetError::MalformedPeriod`] if any token is neither an index nor an
/// `a-b` pair of indices, if a range is reversed, or if the string holds no
/// period at all.
pub fn parse_periods(text: &str) -> DatasetResult<PeriodSet> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();

    let mut set = PeriodSet::default();
    for token in compact.split(',') {
        match token {
            "" => continue,
            "T" => set.ongoing = true,
            tok => {
                let period = tok.parse::<Period>().map_err(|e| match e {
                    DatasetError::MalformedPeriod { reason, .. } => {
                        DatasetError::malformed(text, format!("token {tok:?}: {reason}"))
                    }
                    other => other,
                })?;
                set.periods.push(period);
            }
        }
    }

    if set.periods.is_empty() {
        return Err(DatasetError::malformed(text, "no period found"));
    }
    Ok(set)
}
