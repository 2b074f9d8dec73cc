use chrono::NaiveDate;

/// Fast parse of `"YYYY-MM-DD"` → `NaiveDate`
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    // exact length + separators check
    if !s.is_ascii() || s.len() != 10 || &s[4..5] != "-" || &s[7..8] != "-" {
        return None;
    }
    let digits = |r: &str| r.bytes().all(|b| b.is_ascii_digit());
    if !digits(&s[0..4]) || !digits(&s[5..7]) || !digits(&s[8..10]) {
        return None;
    }
    let year: i32 = s[0..4].parse().ok()?;
    let month: u32 = s[5..7].parse().ok()?;
    let day: u32 = s[8..10].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// `"YYYY-MM-DD"` → `"DD/MM/YYYY"`, or `None` when it is not a real date.
pub fn reformat_date(s: &str) -> Option<String> {
    parse_iso_date(s).map(|d| d.format("%d/%m/%Y").to_string())
}
