//! Annual evolution report: one record per month of a rolling window.

use chrono::{DateTime, Datelike};
use chrono_tz::Tz;
use models::{AnnualEvolution, EvolutionRecord, EvolutionReport};

use crate::currency::{CurrencyFormatter, UNKNOWN_VALUE};
use crate::datetime::{format_date_time, now_in_buenos_aires};

/// Builds the report, formatting each month's quote with `format_value`.
///
/// Entries are numbered 1..=N in payload order. An entry whose index is below
/// the current month belongs to the current year, every other entry to the
/// previous one. Records are then stably sorted by year.
fn build_report<F>(
    raw: &AnnualEvolution,
    now: &DateTime<Tz>,
    format_value: F,
) -> EvolutionReport
where
    F: Fn(&str) -> String,
{
    let current_month = now.month() as usize;
    let current_year = now.year();

    let mut months: Vec<EvolutionRecord> = raw
        .iter()
        .enumerate()
        .map(|(idx, (_key, rate))| {
            let index = idx + 1;
            let year = if index < current_month {
                current_year
            } else {
                current_year - 1
            };
            let value = match rate.text.as_deref() {
                Some(text) => format_value(text),
                None => UNKNOWN_VALUE.to_string(),
            };

            EvolutionRecord {
                year: year.to_string(),
                month: index.to_string(),
                value,
            }
        })
        .collect();

    months.sort_by_key(|record| record.year.parse::<i32>().unwrap_or(i32::MAX));

    EvolutionReport {
        date: format_date_time(now),
        months,
    }
}

/// Evolution report as of `now`, without taxes.
pub fn evolution_at(
    raw: &AnnualEvolution,
    formatter: &CurrencyFormatter,
    now: &DateTime<Tz>,
) -> EvolutionReport {
    build_report(raw, now, |text| formatter.format(text, None))
}

/// Evolution report as of `now`, with the configured tax applied to every month.
pub fn evolution_with_taxes_at(
    raw: &AnnualEvolution,
    formatter: &CurrencyFormatter,
    now: &DateTime<Tz>,
) -> EvolutionReport {
    build_report(raw, now, |text| formatter.format_with_taxes(text, None))
}

pub fn evolution(raw: &AnnualEvolution, formatter: &CurrencyFormatter) -> EvolutionReport {
    evolution_at(raw, formatter, &now_in_buenos_aires())
}

pub fn evolution_with_taxes(raw: &AnnualEvolution, formatter: &CurrencyFormatter) -> EvolutionReport {
    evolution_with_taxes_at(raw, formatter, &now_in_buenos_aires())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datetime::TIMEZONE;
    use chrono::TimeZone;
    use models::MonthlyRate;

    fn at(year: i32, month: u32, day: u32) -> DateTime<Tz> {
        TIMEZONE
            .with_ymd_and_hms(year, month, day, 12, 0, 0)
            .unwrap()
    }

    fn payload(texts: &[&str]) -> AnnualEvolution {
        AnnualEvolution::new(
            texts
                .iter()
                .enumerate()
                .map(|(i, text)| {
                    (
                        format!("mes{}", i + 1),
                        MonthlyRate {
                            text: Some(text.to_string()),
                        },
                    )
                })
                .collect(),
        )
    }

    fn years(report: &EvolutionReport) -> Vec<(&str, &str)> {
        report
            .months
            .iter()
            .map(|r| (r.month.as_str(), r.year.as_str()))
            .collect()
    }

    #[test]
    fn test_year_flips_at_current_month() {
        let raw = payload(&["1", "2", "3"]);
        let report = evolution_at(&raw, &CurrencyFormatter::default(), &at(2024, 2, 15));

        // Index 1 < 2 stays in 2024, indices 2 and 3 move to 2023 and sort first
        assert_eq!(years(&report), vec![("2", "2023"), ("3", "2023"), ("1", "2024")]);
    }

    #[test]
    fn test_full_year_window() {
        let texts: Vec<String> = (1..=12).map(|m| format!("{},5", m * 10)).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let raw = payload(&refs);

        let report = evolution_at(&raw, &CurrencyFormatter::default(), &at(2024, 5, 1));

        assert_eq!(report.months.len(), 12);
        // Months 5..=12 are last year, in payload order, then months 1..=4
        let months: Vec<&str> = report.months.iter().map(|r| r.month.as_str()).collect();
        assert_eq!(
            months,
            vec!["5", "6", "7", "8", "9", "10", "11", "12", "1", "2", "3", "4"]
        );
        assert!(report.months[..8].iter().all(|r| r.year == "2023"));
        assert!(report.months[8..].iter().all(|r| r.year == "2024"));
        assert_eq!(report.months[0].value, "50.50");
        assert_eq!(report.months[8].value, "10.50");
    }

    #[test]
    fn test_sorted_ascending_by_year() {
        let raw = payload(&["1", "2", "3", "4", "5", "6"]);
        let report = evolution_at(&raw, &CurrencyFormatter::default(), &at(2024, 4, 1));

        let ys: Vec<i32> = report.months.iter().map(|r| r.year.parse().unwrap()).collect();
        let mut sorted = ys.clone();
        sorted.sort();
        assert_eq!(ys, sorted);
    }

    #[test]
    fn test_january_puts_everything_in_previous_year() {
        let raw = payload(&["1", "2", "3"]);
        let report = evolution_at(&raw, &CurrencyFormatter::default(), &at(2025, 1, 10));
        assert!(report.months.iter().all(|r| r.year == "2024"));
    }

    #[test]
    fn test_empty_payload() {
        let raw = AnnualEvolution::default();
        let report = evolution(&raw, &CurrencyFormatter::new(21));

        assert!(report.months.is_empty());
        assert_eq!(report.date.len(), 19);
    }

    #[test]
    fn test_values_and_sentinels() {
        let raw = AnnualEvolution::new(vec![
            ("ene".to_string(), MonthlyRate { text: Some("1.234,56".to_string()) }),
            ("feb".to_string(), MonthlyRate { text: Some("s/c".to_string()) }),
            ("mar".to_string(), MonthlyRate { text: None }),
        ]);

        let report = evolution_at(&raw, &CurrencyFormatter::default(), &at(2024, 12, 1));
        let values: Vec<&str> = report.months.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["1234.56", "?", "?"]);
        assert_eq!(report.date, "2024/12/01 12:00:00");
    }

    #[test]
    fn test_with_taxes() {
        let raw = payload(&["100", "200,5"]);
        let formatter = CurrencyFormatter::new(21);

        let report = evolution_with_taxes_at(&raw, &formatter, &at(2024, 12, 1));
        let values: Vec<&str> = report.months.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["121.00", "242.61"]);

        let untaxed = evolution_at(&raw, &formatter, &at(2024, 12, 1));
        assert_eq!(untaxed.months[1].value, "200.50");
    }

    #[test]
    fn test_from_json_payload() {
        let raw: AnnualEvolution = serde_json::from_str(
            r#"{"ene": {"_text": "820,10"}, "feb": {"_text": "835,4"}, "mar": {"_text": "850"}}"#,
        )
        .unwrap();

        let report = evolution_at(&raw, &CurrencyFormatter::default(), &at(2024, 3, 20));
        assert_eq!(
            years(&report),
            vec![("3", "2023"), ("1", "2024"), ("2", "2024")]
        );
        assert_eq!(report.months[0].value, "850.00");
    }
}
