//! Token symbol to provider-ID mapping.
//!
//! Providers disagree about identity: CoinGecko keys everything by slug-like
//! IDs (`official-trump`), quote endpoints key by upper-case symbol (`TRUMP`),
//! and stored rows have historically carried either. `TokenMap` resolves a
//! user-supplied token through a fixed chain of fallbacks and reports which
//! stage matched, so diagnostics can explain *why* a token resolved the way
//! it did.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Built-in symbol -> CoinGecko ID table for the originally tracked tokens.
const BUILTIN: &[(&str, &str)] = &[
    ("BTC", "bitcoin"),
    ("ETH", "ethereum"),
    ("SOL", "solana"),
    ("XRP", "ripple"),
    ("BNB", "binancecoin"),
    ("AVAX", "avalanche-2"),
    ("DOT", "polkadot"),
    ("UNI", "uniswap"),
    ("NEAR", "near"),
    ("AAVE", "aave"),
    ("FIL", "filecoin"),
    ("POL", "matic-network"),
    ("KAITO", "kaito"),
    ("TRUMP", "official-trump"),
];

/// Which resolution stage produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchKind {
    /// Matched an alias loaded from the database.
    Extended,
    /// Matched the built-in table.
    Builtin,
    /// The input was already a known CoinGecko ID.
    Id,
    /// Matched only after case folding.
    CaseInsensitive,
}

/// A successful resolution: canonical symbol, provider ID, and how we got there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub symbol: String,
    pub coingecko_id: String,
    pub matched: MatchKind,
}

/// Symbol/ID mapping with database-extensible aliases.
#[derive(Debug, Clone, Default)]
pub struct TokenMap {
    /// Aliases loaded from storage; consulted before the built-in table.
    extended: BTreeMap<String, String>,
}

impl TokenMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a database-sourced alias. Symbols are stored upper-case.
    pub fn extend_alias(&mut self, symbol: &str, coingecko_id: &str) {
        self.extended
            .insert(symbol.to_uppercase(), coingecko_id.to_string());
    }

    /// Number of database-sourced aliases.
    pub fn extended_len(&self) -> usize {
        self.extended.len()
    }

    /// Symbols in the built-in table.
    pub fn builtin_symbols() -> impl Iterator<Item = &'static str> {
        BUILTIN.iter().map(|(sym, _)| *sym)
    }

    /// Resolve a token through the fallback chain:
    /// database aliases, built-in table, known IDs, case-insensitive retry.
    pub fn resolve(&self, token: &str) -> Option<Resolved> {
        let upper = token.to_uppercase();

        if let Some(id) = self.extended.get(upper.as_str()) {
            let matched = if token == upper {
                MatchKind::Extended
            } else {
                MatchKind::CaseInsensitive
            };
            return Some(Resolved {
                symbol: upper,
                coingecko_id: id.clone(),
                matched,
            });
        }

        if let Some((sym, id)) = BUILTIN.iter().find(|(sym, _)| *sym == upper) {
            return Some(Resolved {
                symbol: (*sym).to_string(),
                coingecko_id: (*id).to_string(),
                matched: if token == *sym {
                    MatchKind::Builtin
                } else {
                    MatchKind::CaseInsensitive
                },
            });
        }

        // The caller may already hold a CoinGecko ID (`bitcoin`, `official-trump`).
        let lower = token.to_lowercase();
        if let Some((sym, id)) = BUILTIN.iter().find(|(_, id)| *id == lower) {
            return Some(Resolved {
                symbol: (*sym).to_string(),
                coingecko_id: (*id).to_string(),
                matched: MatchKind::Id,
            });
        }
        if let Some((sym, id)) = self.extended.iter().find(|(_, id)| **id == lower) {
            return Some(Resolved {
                symbol: sym.clone(),
                coingecko_id: id.clone(),
                matched: MatchKind::Id,
            });
        }

        None
    }

    /// Shorthand for the common "just give me the ID" case.
    pub fn to_coingecko_id(&self, token: &str) -> Option<String> {
        self.resolve(token).map(|r| r.coingecko_id)
    }

    /// Reverse lookup: CoinGecko ID to canonical symbol.
    pub fn from_coingecko_id(&self, id: &str) -> Option<String> {
        let lower = id.to_lowercase();
        BUILTIN
            .iter()
            .find(|(_, cid)| *cid == lower)
            .map(|(sym, _)| (*sym).to_string())
            .or_else(|| {
                self.extended
                    .iter()
                    .find(|(_, cid)| **cid == lower)
                    .map(|(sym, _)| sym.clone())
            })
    }

    /// Coverage report for a set of symbols the caller intends to track.
    pub fn coverage<'a, I>(&self, symbols: I) -> CoverageReport
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut report = CoverageReport::default();
        for symbol in symbols {
            report.total += 1;
            match self.resolve(symbol) {
                Some(r) if r.matched == MatchKind::Extended => report.extended += 1,
                Some(_) => report.builtin += 1,
                None => report.unresolved.push(symbol.to_uppercase()),
            }
        }
        report
    }
}

/// Summary of how well the mapping covers a tracked-token set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CoverageReport {
    pub total: usize,
    pub builtin: usize,
    pub extended: usize,
    pub unresolved: Vec<String>,
}

impl CoverageReport {
    /// Resolved fraction in percent.
    pub fn coverage_pct(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let resolved = (self.total - self.unresolved.len()) as f64;
        #[allow(clippy::cast_precision_loss)]
        let total = self.total as f64;
        resolved / total * 100.0
    }
}
