//! Validation and composition of compaction intents from option values.
//!
//! The builder is a pure function of the option source, the table name and a
//! read-only view of the iterator profile registry. It either yields exactly
//! one [`CompactionIntent`] or a [`RequestError`]; nothing is sent anywhere.

use std::collections::HashMap;

use bytes::Bytes;

use super::{
    error::RequestError,
    options::{CompactFlag, OptionValues},
    request::{CancelRequest, CompactionIntent, CompactionRequest, StrategyDescriptor},
};
use crate::{
    iterator::IteratorProfiles,
    observability::{log_debug, log_warn},
    scan::RowRange,
};

/// Builds compaction intents against an iterator profile registry.
#[derive(Clone, Copy)]
pub struct CompactionRequestBuilder<'a> {
    profiles: &'a dyn IteratorProfiles,
}

impl<'a> CompactionRequestBuilder<'a> {
    /// Create a builder resolving profile names through `profiles`.
    pub fn new(profiles: &'a dyn IteratorProfiles) -> Self {
        Self { profiles }
    }

    /// Validate `options` for `table` and compose the resulting intent.
    pub fn build(
        &self,
        table: &str,
        options: &OptionValues,
    ) -> Result<CompactionIntent, RequestError> {
        if table.is_empty() {
            return Err(RequestError::EmptyTable);
        }

        if options.has(CompactFlag::Cancel) {
            let conflicts: Vec<CompactFlag> = options
                .flags()
                .filter(|flag| flag.conflicts_with_cancel())
                .collect();
            if !conflicts.is_empty() {
                return Err(RequestError::ConflictingOptions { conflicts });
            }
            return Ok(CompactionIntent::Cancel(CancelRequest {
                table: table.to_string(),
            }));
        }

        if let Some(flag) = options
            .flags()
            .find(|flag| flag.takes_value() && options.value(*flag).is_none())
        {
            return Err(RequestError::MissingValue(flag));
        }

        let mut request = CompactionRequest::new(table);
        request.flush = !options.has(CompactFlag::NoFlush);
        request.wait = options.has(CompactFlag::Wait);
        request.range = RowRange::new(
            options.value(CompactFlag::BeginRow).map(row_bytes),
            options.value(CompactFlag::EndRow).map(row_bytes),
        );

        if let Some(profile) = options.value(CompactFlag::Profile) {
            request.iterators = self.profiles.lookup(profile).ok_or_else(|| {
                log_warn!(
                    "builder",
                    "unknown_iterator_profile",
                    table = %table,
                    profile = %profile,
                );
                RequestError::UnknownProfile(profile.to_string())
            })?;
        }

        match (
            options.value(CompactFlag::Strategy),
            options.value(CompactFlag::StrategyConfig),
        ) {
            (Some(name), config) => {
                let mut strategy = StrategyDescriptor::new(name);
                if let Some(config) = config {
                    strategy.options = parse_strategy_options(config)?;
                }
                request.strategy = Some(strategy);
            }
            (None, Some(config)) => {
                log_warn!(
                    "builder",
                    "strategy_config_ignored",
                    table = %table,
                    config = %config,
                );
            }
            (None, None) => {}
        }

        log_debug!(
            "builder",
            "compaction_request_built",
            table = %table,
            flush = request.flush,
            wait = request.wait,
            iterators = request.iterators.len(),
            strategy = ?request.strategy.as_ref().map(|s| s.name.as_str()),
        );
        Ok(CompactionIntent::Compact(request))
    }
}

/// Parse `key=value{,key=value}` strategy options.
///
/// Keys and values are kept exactly as given. Each token splits on its first
/// `=`, so values may themselves contain `=`. Trailing empty tokens are
/// dropped; any other token without `=` or with an empty key is malformed. A
/// later duplicate key replaces an earlier one.
pub fn parse_strategy_options(raw: &str) -> Result<HashMap<String, String>, RequestError> {
    let mut tokens: Vec<&str> = raw.split(',').collect();
    while tokens.last().is_some_and(|token| token.is_empty()) {
        tokens.pop();
    }

    let mut options = HashMap::new();
    for token in tokens {
        match token.split_once('=') {
            Some((key, value)) if !key.is_empty() => {
                options.insert(key.to_string(), value.to_string());
            }
            _ => {
                return Err(RequestError::MalformedStrategyOption {
                    token: token.to_string(),
                });
            }
        }
    }
    Ok(options)
}

fn row_bytes(row: &str) -> Bytes {
    Bytes::copy_from_slice(row.as_bytes())
}
