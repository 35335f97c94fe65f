use std::iter::successors;
use time::{error::ComponentRange, Date, Month};

/// One calendar day and its position within the year
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct DayRecord {
    /// 1-based index of the day within the year
    pub(crate) day_number: u16,
    pub(crate) day_of_month: u8,
    pub(crate) month: Month,
}

/// Returns a record for every day from January 1 through December 31 of
/// `year`, in order.
///
/// Fails only if `time` cannot represent January 1 of `year`.
pub(crate) fn year_days(year: i32) -> Result<Vec<DayRecord>, ComponentRange> {
    let new_years_day = Date::from_calendar_date(year, Month::January, 1)?;
    Ok(iter_days_from(new_years_day)
        .take_while(|d| d.year() == year)
        .zip(1u16..)
        .map(|(date, day_number)| DayRecord {
            day_number,
            day_of_month: date.day(),
            month: date.month(),
        })
        .collect())
}

fn iter_days_from(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.next_day())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month_index(day: &DayRecord) -> u8 {
        u8::from(day.month) - 1
    }

    fn is_leap(year: i32) -> bool {
        (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
    }

    #[test]
    fn test_2026() {
        let days = year_days(2026).unwrap();
        assert_eq!(days.len(), 365);
        assert_eq!(
            days.first().copied(),
            Some(DayRecord {
                day_number: 1,
                day_of_month: 1,
                month: Month::January,
            })
        );
        let last = days.last().copied().unwrap();
        assert_eq!(last.day_number, 365);
        assert_eq!(last.day_of_month, 31);
        assert_eq!(month_index(&last), 11);
    }

    #[test]
    fn test_2024_leap() {
        let days = year_days(2024).unwrap();
        assert_eq!(days.len(), 366);
        assert_eq!(
            days.last().copied(),
            Some(DayRecord {
                day_number: 366,
                day_of_month: 31,
                month: Month::December,
            })
        );
        assert!(days
            .iter()
            .any(|d| d.month == Month::February && d.day_of_month == 29));
    }

    #[test]
    fn test_century_years() {
        assert_eq!(year_days(1900).unwrap().len(), 365);
        assert_eq!(year_days(2000).unwrap().len(), 366);
        assert_eq!(year_days(2100).unwrap().len(), 365);
    }

    #[test]
    fn test_lengths_match_leap_rule() {
        for year in (1582..=2500).step_by(7) {
            let expected = if is_leap(year) { 366 } else { 365 };
            assert_eq!(year_days(year).unwrap().len(), expected, "year {year}");
        }
    }

    #[test]
    fn test_day_numbers_consecutive() {
        let days = year_days(2026).unwrap();
        for (i, day) in (1u16..).zip(&days) {
            assert_eq!(day.day_number, i);
        }
    }

    #[test]
    fn test_months_non_decreasing_and_reset() {
        let days = year_days(2025).unwrap();
        for pair in days.windows(2) {
            let [prev, next] = pair else { unreachable!() };
            assert!(month_index(next) >= month_index(prev));
            if next.month != prev.month {
                assert_eq!(month_index(next), month_index(prev) + 1);
                assert_eq!(next.day_of_month, 1);
            } else {
                assert_eq!(next.day_of_month, prev.day_of_month + 1);
            }
        }
        assert!(days.iter().all(|d| month_index(d) < 12));
    }

    #[test]
    fn test_last_representable_year() {
        let days = year_days(9999).unwrap();
        assert_eq!(days.len(), 365);
        assert_eq!(days.last().map(|d| d.day_number), Some(365));
    }

    #[test]
    fn test_negative_year() {
        // Year -4 (5 BCE) is a leap year in the proleptic Gregorian calendar
        assert_eq!(year_days(-4).unwrap().len(), 366);
    }

    #[test]
    fn test_unrepresentable_year() {
        assert!(year_days(10_000).is_err());
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(year_days(2030).unwrap(), year_days(2030).unwrap());
    }
}
