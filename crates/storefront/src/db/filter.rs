//! Field-matching filters over documents.
//!
//! A [`Filter`] is a conjunction of clauses. The same filter is evaluated in
//! memory by [`Filter::matches`] and translated to SQL by the `PostgreSQL`
//! store, and both must agree:
//!
//! - `Eq`: the field exists and equals the value exactly.
//! - `Range`: the field is a JSON number and lies within the inclusive
//!   bounds. Missing or non-numeric fields never match.

use rust_decimal::Decimal;
use serde_json::Value;

use super::Document;

/// One condition on one field.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Eq {
        field: String,
        value: Value,
    },
    Range {
        field: String,
        gte: Option<Decimal>,
        lte: Option<Decimal>,
    },
}

impl Clause {
    fn matches(&self, doc: &Document) -> bool {
        match self {
            Self::Eq { field, value } => doc.get(field) == Some(value),
            Self::Range { field, gte, lte } => {
                let Some(number) = doc.get(field).and_then(as_decimal) else {
                    return false;
                };
                gte.is_none_or(|min| number >= min) && lte.is_none_or(|max| number <= max)
            }
        }
    }
}

/// A conjunction of [`Clause`]s. The empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: Vec<Clause>,
}

impl Filter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field` to equal `value`.
    #[must_use]
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.clauses.push(Clause::Eq {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Require `field` to be a number within `[gte, lte]`.
    ///
    /// A clause is added only when at least one bound is given.
    #[must_use]
    pub fn range(
        mut self,
        field: impl Into<String>,
        gte: Option<Decimal>,
        lte: Option<Decimal>,
    ) -> Self {
        if gte.is_some() || lte.is_some() {
            self.clauses.push(Clause::Range {
                field: field.into(),
                gte,
                lte,
            });
        }
        self
    }

    #[must_use]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Whether `doc` satisfies every clause.
    #[must_use]
    pub fn matches(&self, doc: &Document) -> bool {
        self.clauses.iter().all(|clause| clause.matches(doc))
    }
}

/// Read a JSON number as a decimal.
fn as_decimal(value: &Value) -> Option<Decimal> {
    let Value::Number(number) = value else {
        return None;
    };
    let text = number.to_string();
    text.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}
