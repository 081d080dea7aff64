// Parsing and formatting helpers.
//
// This module centralizes the "dirty" CSV/number/date handling so the rest of
// the code can assume clean, typed values. The formatting side matches the
// deck template's conventions: thousands separators for integer cells and
// two-decimal percentages with trailing zeros trimmed.
use chrono::NaiveDate;
use num_format::{Locale, ToFormattedString};

/// Parse a string-like value into `f64` while being forgiving about
/// formatting issues that are common in CSV exports (commas, spaces).
///
/// - Accepts `Option<&str>` so callers can pass through optional fields.
/// - Rejects values that contain alphabetic characters.
/// - Strips thousands separators before parsing.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let s = s.replace(',', "");
    s.parse::<f64>().ok()
}

pub fn parse_i64_safe(s: Option<&str>) -> Option<i64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    let s = s.replace(',', "");
    s.parse::<i64>().ok()
}

/// Dates arrive either as full `YYYY-MM-DD` days or as bare `YYYY-MM` months
/// (the export file keys rows by shipment month).
pub fn parse_date_safe(s: Option<&str>) -> Option<NaiveDate> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d"))
        .ok()
}

/// Month key used for grouping and window comparisons ("2017-03").
/// Lexicographic order on these keys is chronological order.
pub fn month_key(d: NaiveDate) -> String {
    d.format("%Y-%m").to_string()
}

/// Long month label for narrative sentences ("March 2017").
pub fn month_name(key: &str) -> String {
    match NaiveDate::parse_from_str(&format!("{key}-01"), "%Y-%m-%d") {
        Ok(d) => d.format("%B %Y").to_string(),
        Err(_) => key.to_string(),
    }
}

/// Short month label used on the monthly chart axis ("Mar-17").
pub fn month_label(key: &str) -> String {
    match NaiveDate::parse_from_str(&format!("{key}-01"), "%Y-%m-%d") {
        Ok(d) => d.format("%b-%y").to_string(),
        Err(_) => key.to_string(),
    }
}

/// US-style date for the recent-shipments listing.
pub fn format_mdy(d: NaiveDate) -> String {
    d.format("%m/%d/%Y").to_string()
}

/// Format a floating-point value with a fixed number of decimal places and
/// thousands separators (`1,234,567.89`).
pub fn format_number(n: f64, decimals: usize) -> String {
    let neg = n.is_sign_negative();
    let abs_n = n.abs();
    let s = format!("{:.*}", decimals, abs_n);
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        if decimals > 0 {
            res.push('.');
            res.push_str(frac);
        }
    } else if decimals > 0 {
        res.push('.');
        res.push_str(&"0".repeat(decimals));
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

/// Thousands-separated rendering for integer-valued cells and row counts.
pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}

/// Round to two decimals and render without trailing zero padding, keeping at
/// least one decimal digit: "70.0", "58.33", "58.3".
pub fn round2_str(v: f64) -> String {
    let mut s = format!("{:.2}", v);
    if s.ends_with('0') {
        s.pop();
    }
    s
}

/// Percentage cell for ranked tables. A zero grand total renders every share
/// as "0.0%" instead of dividing by zero.
pub fn format_percent(part: f64, total: f64) -> String {
    if total == 0.0 {
        return "0.0%".to_string();
    }
    format!("{}%", round2_str(part / total * 100.0))
}

/// Split a raw HS code cell into 2-digit category codes. Import cells may
/// carry several codes separated by `;`. Blank segments are dropped.
pub fn two_digit_codes(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.chars().take(2).collect())
        .collect()
}

/// First line of a multi-line goods description, first letter uppercased and
/// the remainder lowercased, matching the deck's listing style.
pub fn first_line_capitalized(s: &str) -> String {
    let line = s.lines().next().unwrap_or("").trim();
    let mut chars = line.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Quantities are usually whole numbers; render without a fake ".0" when so.
pub fn format_quantity(q: f64) -> String {
    if q.fract() == 0.0 {
        format!("{}", q as i64)
    } else {
        format!("{q}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_trims_trailing_zeros_but_keeps_one_decimal() {
        assert_eq!(format_percent(700.0, 1000.0), "70.0%");
        assert_eq!(format_percent(100.0, 1000.0), "10.0%");
        assert_eq!(format_percent(583.3, 1000.0), "58.33%");
        assert_eq!(format_percent(583.0, 1000.0), "58.3%");
    }

    #[test]
    fn percent_of_zero_total_is_defined() {
        assert_eq!(format_percent(0.0, 0.0), "0.0%");
        assert_eq!(format_percent(5.0, 0.0), "0.0%");
    }

    #[test]
    fn two_digit_codes_explode_and_truncate() {
        assert_eq!(two_digit_codes("01; 0203"), vec!["01", "02"]);
        assert_eq!(two_digit_codes("850440"), vec!["85"]);
        assert_eq!(two_digit_codes("01;;  ;02"), vec!["01", "02"]);
        assert!(two_digit_codes("").is_empty());
    }

    #[test]
    fn dates_accept_day_and_month_forms() {
        let d = parse_date_safe(Some("2017-03-15")).unwrap();
        assert_eq!(month_key(d), "2017-03");
        let m = parse_date_safe(Some("2017-03")).unwrap();
        assert_eq!(m, NaiveDate::from_ymd_opt(2017, 3, 1).unwrap());
        assert!(parse_date_safe(Some("March 2017")).is_none());
        assert!(parse_date_safe(None).is_none());
    }

    #[test]
    fn month_labels() {
        assert_eq!(month_name("2013-01"), "January 2013");
        assert_eq!(month_label("2026-08"), "Aug-26");
        // unparseable keys fall through untouched
        assert_eq!(month_label("bogus"), "bogus");
    }

    #[test]
    fn number_formatting() {
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(1234567.0, 0), "1,234,567");
        assert_eq!(format_number(-1234.5, 2), "-1,234.50");
        assert_eq!(format_int(9855i64), "9,855");
    }

    #[test]
    fn goods_description_keeps_first_line_only() {
        assert_eq!(
            first_line_capitalized("ELECTRIC KETTLES\nHS CODE 851610"),
            "Electric kettles"
        );
        assert_eq!(first_line_capitalized(""), "");
    }

    #[test]
    fn quantity_rendering() {
        assert_eq!(format_quantity(5.0), "5");
        assert_eq!(format_quantity(2.5), "2.5");
    }

    #[test]
    fn numeric_parsing_strips_separators() {
        assert_eq!(parse_f64_safe(Some("1,234.5")), Some(1234.5));
        assert_eq!(parse_i64_safe(Some(" 42 ")), Some(42));
        assert_eq!(parse_f64_safe(Some("12 units")), None);
        assert_eq!(parse_i64_safe(Some("")), None);
    }
}
