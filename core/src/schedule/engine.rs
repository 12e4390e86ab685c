use super::model::{Cadence, Installment, LoanTerms, Schedule};
use crate::error::{CoreError, CoreResult};
use time::{Date, Duration, Month};

/// Converts loan terms into a payment schedule.
///
/// The total (principal + flat fee) is split into floor-to-the-cent shares,
/// one per generated due date, with the division remainder added to the final
/// installment so the parts always reconstruct the total exactly. A zero
/// total collapses to one zero-amount installment at the due date regardless
/// of cadence. Pure and deterministic: identical terms produce identical
/// schedules.
pub fn compute_schedule(terms: &LoanTerms) -> CoreResult<Schedule> {
    if terms.due_date < terms.start_date {
        return Err(CoreError::InvalidRangeError(format!(
            "due date {} precedes start date {}",
            terms.due_date, terms.start_date
        )));
    }

    let total = terms.total_cents()?;
    if terms.cadence == Cadence::LumpSum || total == 0 {
        return Ok(Schedule::new(vec![Installment {
            index: 1,
            due_date: terms.due_date,
            amount_cents: total,
        }]));
    }

    let dates = installment_dates(terms)?;
    let n = dates.len() as u64;
    let share = total / n;
    let remainder = total - share * n;

    let mut installments = Vec::with_capacity(dates.len());
    for (i, due_date) in dates.iter().enumerate() {
        let mut amount_cents = share;
        if i == dates.len() - 1 {
            amount_cents += remainder;
        }
        installments.push(Installment {
            index: i as u32 + 1,
            due_date: *due_date,
            amount_cents,
        });
    }
    Ok(Schedule::new(installments))
}

// Candidate dates are anchored to the start date (start + k steps) rather than
// chained off the previous candidate, so a month-end start clamps per month
// (Jan 31 -> Feb 28 -> Mar 31) instead of drifting to the 28th forever.
fn installment_dates(terms: &LoanTerms) -> CoreResult<Vec<Date>> {
    let mut steps: u32 = 1;
    let mut cursor = nth_candidate(terms.start_date, terms.cadence, steps)?;
    if cursor <= terms.start_date {
        steps += 1;
        cursor = nth_candidate(terms.start_date, terms.cadence, steps)?;
    }

    let mut dates = Vec::new();
    while cursor <= terms.due_date {
        dates.push(cursor);
        steps += 1;
        cursor = nth_candidate(terms.start_date, terms.cadence, steps)?;
    }
    if dates.is_empty() {
        // Due date closer than one cadence step; everything comes due at once.
        dates.push(terms.due_date);
    }
    Ok(dates)
}

fn nth_candidate(start: Date, cadence: Cadence, n: u32) -> CoreResult<Date> {
    match cadence {
        Cadence::Weekly => add_days(start, 7 * i64::from(n)),
        Cadence::Biweekly => add_days(start, 14 * i64::from(n)),
        Cadence::Monthly => add_months(start, n),
        Cadence::LumpSum => Err(CoreError::UnsupportedCadenceError(
            "lump sum has no recurring step".to_string(),
        )),
    }
}

fn add_days(from: Date, days: i64) -> CoreResult<Date> {
    from.checked_add(Duration::days(days))
        .ok_or_else(|| CoreError::InvalidInputError(format!("date overflow: {from} + {days}d")))
}

/// Month arithmetic with day-of-month clamped to the target month's length
/// (Jan 31 + 1 month = Feb 28, or Feb 29 in a leap year).
pub fn add_months(from: Date, months: u32) -> CoreResult<Date> {
    let mut year = from.year();
    let mut month = from.month();
    for _ in 0..months {
        month = month.next();
        if month == Month::January {
            year = year
                .checked_add(1)
                .ok_or_else(|| CoreError::InvalidInputError("year overflow".to_string()))?;
        }
    }
    let day = from.day().min(month.length(year));
    Date::from_calendar_date(year, month, day)
        .map_err(|e| CoreError::InvalidInputError(format!("date arithmetic: {e}")))
}

#[cfg(test)]
mod tests {
    use super::add_months;
    use time::{Date, Month};

    fn d(year: i32, month: u8, day: u8) -> Date {
        Date::from_calendar_date(year, Month::try_from(month).unwrap(), day).unwrap()
    }

    #[test]
    fn add_months_clamps_to_month_end() {
        assert_eq!(add_months(d(2025, 1, 31), 1).unwrap(), d(2025, 2, 28));
        assert_eq!(add_months(d(2025, 8, 31), 1).unwrap(), d(2025, 9, 30));
    }

    #[test]
    fn add_months_clamps_to_leap_day() {
        assert_eq!(add_months(d(2024, 1, 31), 1).unwrap(), d(2024, 2, 29));
    }

    #[test]
    fn add_months_crosses_year_boundary() {
        assert_eq!(add_months(d(2025, 12, 15), 1).unwrap(), d(2026, 1, 15));
        assert_eq!(add_months(d(2025, 11, 30), 3).unwrap(), d(2026, 2, 28));
    }
}
