use super::model::Schedule;
use serde::{Deserialize, Serialize};

/// One row of the payment-schedule table as handed to the document renderer:
/// display strings only, no cents arithmetic on the rendering side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleRow {
    pub index: u32,
    pub due_date: String, // ISO calendar date, e.g. "2025-02-01"
    pub amount: String,   // e.g. "33.34"
}

pub fn schedule_rows(schedule: &Schedule) -> Vec<ScheduleRow> {
    schedule
        .installments()
        .iter()
        .map(|inst| ScheduleRow {
            index: inst.index,
            due_date: inst.due_date.to_string(),
            amount: format_cents(inst.amount_cents),
        })
        .collect()
}

pub fn format_cents(cents: u64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::format_cents;

    #[test]
    fn format_cents_pads_fractional_part() {
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(5), "0.05");
        assert_eq!(format_cents(3334), "33.34");
        assert_eq!(format_cents(100_000), "1000.00");
    }
}
