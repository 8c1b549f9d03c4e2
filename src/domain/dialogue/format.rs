//! Display formatting for transcript and summary text.
//!
//! All of this is cosmetic: raw answer values are what get stored and
//! transmitted. Dates render as a localized long form, budgets as grouped
//! currency, guest counts with a plural noun.

use chrono::{Datelike, NaiveDate, Weekday};

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "lunes",
        Weekday::Tue => "martes",
        Weekday::Wed => "miércoles",
        Weekday::Thu => "jueves",
        Weekday::Fri => "viernes",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    }
}

/// Renders an ISO date (`2025-03-14`) as "viernes, 14 de marzo de 2025".
///
/// Unparseable input is returned verbatim, unformatted.
pub fn format_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => format!(
            "{}, {} de {} de {}",
            weekday_name(date.weekday()),
            date.day(),
            MONTHS[date.month0() as usize],
            date.year()
        ),
        Err(_) => raw.to_string(),
    }
}

/// Renders a budget value as currency with thousands grouping (`$5,000`).
///
/// Unparseable input is returned verbatim.
pub fn format_currency(raw: &str) -> String {
    match raw.trim().parse::<f64>() {
        Ok(value) => format!("${}", group_thousands(value)),
        Err(_) => raw.to_string(),
    }
}

fn group_thousands(value: f64) -> String {
    let negative = value < 0.0;
    let rounded = value.abs().round() as u64;
    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Renders a guest count with its plural noun ("50 personas").
pub fn format_guests(raw: &str) -> String {
    format!("{} personas", raw.trim())
}
