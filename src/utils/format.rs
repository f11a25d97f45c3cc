// ============================================================================
// FORMAT - Fechas y números tal como los muestra la tabla de notas de frais
// ============================================================================

use chrono::{DateTime, Datelike, NaiveDate};

const MONTHS_FR: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

/// `2004-04-04` -> `4 Avr. 04`. Devuelve `None` si no es una fecha de calendario.
pub fn format_date(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(trimmed).ok().map(|dt| dt.date_naive()))?;
    let month = MONTHS_FR[date.month0() as usize];
    let year = date.year().rem_euclid(100);
    Some(format!("{} {}. {:02}", date.day(), month, year))
}

/// Intenta formatear; si falla se conserva la cadena original
pub fn format_date_or_raw(raw: &str) -> String {
    match format_date(raw) {
        Some(formatted) => formatted,
        None => {
            log::warn!("⚠️ [FORMAT] Fecha no válida, se muestra tal cual: {:?}", raw);
            raw.to_string()
        }
    }
}

/// Entero inicial como lo hacen los inputs numéricos (`"42abc"` -> 42, `""` -> None)
pub fn parse_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}
