use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use time::Date;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Cadence {
    LumpSum,
    Weekly,
    Biweekly,
    Monthly,
}

impl Cadence {
    /// Parses the cadence tag as submitted by the loan-terms form.
    pub fn parse(tag: &str) -> CoreResult<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "lump_sum" | "lump-sum" | "lumpsum" => Ok(Self::LumpSum),
            "weekly" => Ok(Self::Weekly),
            "biweekly" | "bi-weekly" => Ok(Self::Biweekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(CoreError::UnsupportedCadenceError(other.to_string())),
        }
    }
}

/// Validated loan terms for a single promissory note. Amounts are integer
/// cents; constructed once and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoanTerms {
    pub principal_cents: u64,
    pub flat_fee_cents: u64,
    pub start_date: Date,
    pub due_date: Date,
    pub cadence: Cadence,
}

impl LoanTerms {
    pub fn new(principal_cents: u64, start_date: Date, due_date: Date, cadence: Cadence) -> Self {
        Self {
            principal_cents,
            flat_fee_cents: 0,
            start_date,
            due_date,
            cadence,
        }
    }

    pub fn with_flat_fee(mut self, flat_fee_cents: u64) -> Self {
        self.flat_fee_cents = flat_fee_cents;
        self
    }

    pub fn total_cents(&self) -> CoreResult<u64> {
        self.principal_cents
            .checked_add(self.flat_fee_cents)
            .ok_or_else(|| {
                CoreError::InvalidInputError("principal + flat fee overflows u64 cents".to_string())
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Installment {
    pub index: u32, // 1-based, dense
    pub due_date: Date,
    pub amount_cents: u64,
}

/// A computed payment schedule. Only the engine constructs these, so a
/// `Schedule` in caller hands is always non-empty, date-ordered, and
/// sum-exact against the terms it was computed from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Schedule {
    installments: Vec<Installment>,
}

impl Schedule {
    pub(crate) fn new(installments: Vec<Installment>) -> Self {
        Self { installments }
    }

    pub fn installments(&self) -> &[Installment] {
        &self.installments
    }

    pub fn total_cents(&self) -> u64 {
        self.installments.iter().map(|i| i.amount_cents).sum()
    }

    pub fn len(&self) -> usize {
        self.installments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.installments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Cadence;

    #[test]
    fn cadence_parse_accepts_form_tags() {
        assert_eq!(Cadence::parse("lump_sum").unwrap(), Cadence::LumpSum);
        assert_eq!(Cadence::parse("Lump-Sum").unwrap(), Cadence::LumpSum);
        assert_eq!(Cadence::parse("weekly").unwrap(), Cadence::Weekly);
        assert_eq!(Cadence::parse("bi-weekly").unwrap(), Cadence::Biweekly);
        assert_eq!(Cadence::parse(" MONTHLY ").unwrap(), Cadence::Monthly);
    }

    #[test]
    fn cadence_parse_rejects_unknown_tags() {
        assert!(Cadence::parse("quarterly").is_err());
        assert!(Cadence::parse("").is_err());
    }
}
