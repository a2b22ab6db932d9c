//! Recognized compaction flags and the option source handed to the builder.

use std::{collections::BTreeMap, fmt};

/// Flags understood by the compact command.
///
/// The table-identifying options are not part of this set; they are resolved
/// by the caller and passed alongside the option source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CompactFlag {
    /// First row of the compaction range.
    BeginRow,
    /// Row that ends the compaction range.
    EndRow,
    /// Skip flushing in-memory table data before compacting.
    NoFlush,
    /// Block until the compaction finishes.
    Wait,
    /// Iterator profile applied while compacting.
    Profile,
    /// Compaction strategy identifier.
    Strategy,
    /// `key=value` options for the compaction strategy.
    StrategyConfig,
    /// Cancel user-initiated compactions instead of starting one.
    Cancel,
}

impl CompactFlag {
    /// Every flag, in help-text order.
    pub const ALL: [CompactFlag; 8] = [
        CompactFlag::BeginRow,
        CompactFlag::EndRow,
        CompactFlag::NoFlush,
        CompactFlag::Wait,
        CompactFlag::Profile,
        CompactFlag::Strategy,
        CompactFlag::StrategyConfig,
        CompactFlag::Cancel,
    ];

    /// Short command-line spelling, when the flag has one.
    pub fn short_name(self) -> Option<&'static str> {
        match self {
            CompactFlag::BeginRow => Some("b"),
            CompactFlag::EndRow => Some("e"),
            CompactFlag::NoFlush => Some("nf"),
            CompactFlag::Wait => Some("w"),
            CompactFlag::Profile => Some("pn"),
            CompactFlag::Strategy => Some("s"),
            CompactFlag::StrategyConfig => Some("sc"),
            CompactFlag::Cancel => None,
        }
    }

    /// Long command-line spelling.
    pub fn long_name(self) -> &'static str {
        match self {
            CompactFlag::BeginRow => "begin-row",
            CompactFlag::EndRow => "end-row",
            CompactFlag::NoFlush => "noFlush",
            CompactFlag::Wait => "wait",
            CompactFlag::Profile => "profile",
            CompactFlag::Strategy => "strategy",
            CompactFlag::StrategyConfig => "strategyConfig",
            CompactFlag::Cancel => "cancel",
        }
    }

    /// Whether the flag carries a string value rather than mere presence.
    pub fn takes_value(self) -> bool {
        matches!(
            self,
            CompactFlag::BeginRow
                | CompactFlag::EndRow
                | CompactFlag::Profile
                | CompactFlag::Strategy
                | CompactFlag::StrategyConfig
        )
    }

    /// One-line help text.
    pub fn description(self) -> &'static str {
        match self {
            CompactFlag::BeginRow => "begin row (inclusive)",
            CompactFlag::EndRow => "end row (exclusive)",
            CompactFlag::NoFlush => "do not flush table data in memory before compacting.",
            CompactFlag::Wait => "wait for compact to finish",
            CompactFlag::Profile => "iterator profile name",
            CompactFlag::Strategy => "compaction strategy class name",
            CompactFlag::StrategyConfig => {
                "Key value options for compaction strategy.  Expects <prop>=<value>{,<prop>=<value>}"
            }
            CompactFlag::Cancel => "cancel user initiated compactions",
        }
    }

    /// Whether supplying this flag together with `--cancel` is a conflict.
    ///
    /// Every flag that shapes a compaction conflicts; only `--cancel` itself
    /// is compatible with a cancel request.
    pub fn conflicts_with_cancel(self) -> bool {
        !matches!(self, CompactFlag::Cancel)
    }
}

impl fmt::Display for CompactFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "--{}", self.long_name())
    }
}

/// Already-tokenized flag values for a single command invocation.
///
/// Each supplied flag maps to its value, or to `None` for presence-only flags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OptionValues {
    values: BTreeMap<CompactFlag, Option<String>>,
}

impl OptionValues {
    /// Empty option set: a plain flushing compaction over the whole table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a presence-only flag as supplied.
    #[must_use]
    pub fn with_flag(mut self, flag: CompactFlag) -> Self {
        self.values.insert(flag, None);
        self
    }

    /// Supply a value-bearing flag.
    #[must_use]
    pub fn with_value(mut self, flag: CompactFlag, value: impl Into<String>) -> Self {
        self.values.insert(flag, Some(value.into()));
        self
    }

    /// Mark `flag` as supplied in place.
    pub fn insert_flag(&mut self, flag: CompactFlag) {
        self.values.insert(flag, None);
    }

    /// Supply `value` for `flag` in place, replacing an earlier value.
    pub fn insert_value(&mut self, flag: CompactFlag, value: impl Into<String>) {
        self.values.insert(flag, Some(value.into()));
    }

    /// Whether `flag` was supplied.
    pub fn has(&self, flag: CompactFlag) -> bool {
        self.values.contains_key(&flag)
    }

    /// Value supplied for `flag`, if any.
    pub fn value(&self, flag: CompactFlag) -> Option<&str> {
        self.values.get(&flag).and_then(|value| value.as_deref())
    }

    /// Supplied flags in their canonical order.
    pub fn flags(&self) -> impl Iterator<Item = CompactFlag> + '_ {
        self.values.keys().copied()
    }
}

impl FromIterator<(CompactFlag, Option<String>)> for OptionValues {
    fn from_iter<I: IntoIterator<Item = (CompactFlag, Option<String>)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
