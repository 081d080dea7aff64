// Gap filling for yearly and monthly aggregate series.
//
// A filled series always has one row per period in the window, in ascending
// chronological order; periods missing from the source carry the value type's
// default. The period list is never reordered after filling.
use crate::config::Granularity;
use chrono::{Datelike, NaiveDate};
use std::collections::{HashMap, VecDeque};

/// Period keys for a trailing window of `periods` units ending at `end`
/// (inclusive). Years render as "2017", months as "2017-03".
pub fn trailing_window(granularity: Granularity, end: NaiveDate, periods: usize) -> Vec<String> {
    match granularity {
        Granularity::Year => {
            let last = end.year();
            let first = last - periods as i32 + 1;
            (first..=last).map(|y| y.to_string()).collect()
        }
        Granularity::Month => {
            let mut keys: VecDeque<String> = VecDeque::with_capacity(periods);
            let (mut y, mut m) = (end.year(), end.month());
            for _ in 0..periods {
                keys.push_front(format!("{y:04}-{m:02}"));
                if m == 1 {
                    y -= 1;
                    m = 12;
                } else {
                    m -= 1;
                }
            }
            keys.into()
        }
    }
}

/// Period keys spanning the data's own range, both ends inclusive. Returns
/// `None` when a key does not parse or the range is inverted.
pub fn span(granularity: Granularity, first: &str, last: &str) -> Option<Vec<String>> {
    match granularity {
        Granularity::Year => {
            let a: i32 = first.parse().ok()?;
            let b: i32 = last.parse().ok()?;
            if b < a {
                return None;
            }
            Some((a..=b).map(|y| y.to_string()).collect())
        }
        Granularity::Month => {
            let (ay, am) = parse_month_key(first)?;
            let (by, bm) = parse_month_key(last)?;
            if (by, bm) < (ay, am) {
                return None;
            }
            let (mut y, mut m) = (ay, am);
            let mut keys = Vec::new();
            loop {
                keys.push(format!("{y:04}-{m:02}"));
                if (y, m) == (by, bm) {
                    break;
                }
                if m == 12 {
                    y += 1;
                    m = 1;
                } else {
                    m += 1;
                }
            }
            Some(keys)
        }
    }
}

fn parse_month_key(key: &str) -> Option<(i32, u32)> {
    let (y, m) = key.split_once('-')?;
    let y = y.parse().ok()?;
    let m: u32 = m.parse().ok()?;
    (1..=12).contains(&m).then_some((y, m))
}

/// One output row per requested period, defaults where the source has no
/// entry.
pub fn fill<V: Default + Clone>(
    periods: &[String],
    by_period: &HashMap<String, V>,
) -> Vec<(String, V)> {
    periods
        .iter()
        .map(|p| (p.clone(), by_period.get(p).cloned().unwrap_or_default()))
        .collect()
}

/// Scale factor projecting a partially elapsed year to a full-year estimate
/// (12 over the number of elapsed months). Applied only to the final row of
/// the yearly import series, never to monthly series.
pub fn seasonal_scale(as_of: NaiveDate) -> f64 {
    12.0 / f64::from(as_of.month())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn five_year_window_ending_2018() {
        let periods = trailing_window(Granularity::Year, date(2018, 6, 1), 5);
        assert_eq!(periods, ["2014", "2015", "2016", "2017", "2018"]);
    }

    #[test]
    fn thirteen_month_window_crosses_year_boundary() {
        let periods = trailing_window(Granularity::Month, date(2019, 2, 10), 13);
        assert_eq!(periods.len(), 13);
        assert_eq!(periods.first().unwrap(), "2018-02");
        assert_eq!(periods.last().unwrap(), "2019-02");
        // strictly ascending, no duplicates
        for pair in periods.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn sparse_years_are_zero_filled() {
        let mut by_year: HashMap<String, f64> = HashMap::new();
        by_year.insert("2015".to_string(), 3.0);
        by_year.insert("2017".to_string(), 7.0);
        let periods = trailing_window(Granularity::Year, date(2018, 1, 1), 5);
        let filled = fill(&periods, &by_year);
        assert_eq!(filled.len(), 5);
        let values: Vec<f64> = filled.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, [0.0, 3.0, 0.0, 7.0, 0.0]);
    }

    #[test]
    fn natural_span_covers_every_month_between() {
        let keys = span(Granularity::Month, "2016-11", "2017-02").unwrap();
        assert_eq!(keys, ["2016-11", "2016-12", "2017-01", "2017-02"]);
        let years = span(Granularity::Year, "2011", "2015").unwrap();
        assert_eq!(years.len(), 5);
        assert!(span(Granularity::Month, "2017-02", "2016-11").is_none());
        assert!(span(Granularity::Month, "not-a-month", "2016-11").is_none());
    }

    #[test]
    fn seasonal_scale_projects_partial_year() {
        // 4 elapsed months: 40 shipments extrapolate to 120
        let factor = seasonal_scale(date(2019, 4, 20));
        assert_eq!(factor, 3.0);
        assert_eq!((40.0 * factor) as i64, 120);
        assert_eq!(seasonal_scale(date(2019, 12, 31)), 1.0);
    }
}
