//! Aggregate outcome of one orchestrator run.

use std::fmt;

use serde::Serialize;

/// What happened to one symbol during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolOutcome {
    pub symbol: String,
    /// Rows the fetcher produced (0 when there was no data or the provider failed).
    pub fetched: usize,
    /// Rows the loader reported as persisted (0 when the sink failed).
    pub loaded: usize,
}

impl SymbolOutcome {
    /// A symbol only counts as successful once at least one record was persisted.
    pub fn is_success(&self) -> bool {
        self.loaded > 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub attempted: usize,
    pub successful: usize,
    pub total_records: usize,
    /// Per-symbol outcomes in input order.
    pub outcomes: Vec<SymbolOutcome>,
}

impl RunSummary {
    pub fn record(&mut self, outcome: SymbolOutcome) {
        self.attempted += 1;
        if outcome.is_success() {
            self.successful += 1;
        }
        self.total_records += outcome.loaded;
        self.outcomes.push(outcome);
    }

    pub fn failed_symbols(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|o| !o.is_success())
            .map(|o| o.symbol.as_str())
    }
}

impl Extend<SymbolOutcome> for RunSummary {
    fn extend<I: IntoIterator<Item = SymbolOutcome>>(&mut self, iter: I) {
        for outcome in iter {
            self.record(outcome);
        }
    }
}

impl FromIterator<SymbolOutcome> for RunSummary {
    fn from_iter<I: IntoIterator<Item = SymbolOutcome>>(iter: I) -> Self {
        let mut summary = RunSummary::default();
        summary.extend(iter);
        summary
    }
}

const RULE: &str = "============================================================";

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(f, "COMPLETE")?;
        writeln!(f, "{RULE}")?;
        writeln!(
            f,
            "Successfully fetched: {}/{} stocks",
            self.successful, self.attempted
        )?;
        writeln!(
            f,
            "Total records loaded: {}",
            with_thousands(self.total_records)
        )?;
        write!(f, "{RULE}")
    }
}

/// `1234567` -> `"1,234,567"`.
pub fn with_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
