/// Validates a `YYYY-MM-DD` date string and returns it trimmed. The
/// stats API accepts only this format for `from`/`to`.
pub fn parse_iso_date(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    let parts: Vec<&str> = trimmed.split('-').collect();
    if parts.len() != 3 || parts[0].len() != 4 || parts[1].len() != 2 || parts[2].len() != 2 {
        return Err("expected format YYYY-MM-DD".to_string());
    }
    let _year: u16 = parts[0]
        .parse()
        .map_err(|_| "invalid year".to_string())?;
    let month: u8 = parts[1]
        .parse()
        .map_err(|_| "invalid month".to_string())?;
    let day: u8 = parts[2].parse().map_err(|_| "invalid day".to_string())?;
    if !(1..=12).contains(&month) {
        return Err(format!("month {month} out of range"));
    }
    if !(1..=31).contains(&day) {
        return Err(format!("day {day} out of range"));
    }
    Ok(trimmed.to_string())
}
