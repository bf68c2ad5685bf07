//! Shared helpers for command handlers.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use secrecy::SecretString;

use hotelops_core::{Hotel, Session};

use crate::error::CliError;

/// Parse a `YYYY-MM-DD` date argument.
pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("expected a date like 2024-01-31, got '{raw}'"),
    })
}

/// Parse a non-negative amount such as `129.50` or `$129.50`.
pub fn parse_amount(field: &str, raw: &str) -> Result<Decimal, CliError> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    let amount: Decimal = cleaned.parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("expected an amount like 129.50, got '{raw}'"),
    })?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(CliError::Validation {
            field: field.into(),
            reason: format!("must not be negative (got {raw})"),
        });
    }
    Ok(amount)
}

/// Accept only one of the `known` status values (case-insensitive), then
/// hand it to `parse`.
pub fn parse_status<T>(
    raw: &str,
    known: &[&str],
    parse: impl Fn(&str) -> T,
) -> Result<T, CliError> {
    let normalized = raw.trim().to_ascii_lowercase();
    if known.contains(&normalized.as_str()) {
        Ok(parse(&normalized))
    } else {
        Err(CliError::Validation {
            field: "status".into(),
            reason: format!("expected one of {}, got '{raw}'", known.join(", ")),
        })
    }
}

/// The signed-in session, or `NotSignedIn`.
pub fn require_session(hotel: &Hotel) -> Result<Arc<Session>, CliError> {
    hotel.session().current().ok_or(CliError::NotSignedIn)
}

/// Use `given` or prompt for a password without echo.
pub fn password_or_prompt(given: Option<String>) -> Result<SecretString, CliError> {
    let password = match given {
        Some(p) => p,
        None => rpassword::prompt_password("Password: ").map_err(prompt_err)?,
    };
    if password.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }
    Ok(SecretString::from(password))
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Render an optional value for a table cell.
pub fn or_dash(value: Option<&str>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or("-").to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use hotelops_core::RoomStatus;

    #[test]
    fn dates_must_be_iso() {
        assert_eq!(
            parse_date("check-in", "2024-03-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert!(parse_date("check-in", "03/01/2024").is_err());
    }

    #[test]
    fn amounts_accept_currency_formatting() {
        assert_eq!(parse_amount("rate", "$1,299.50").unwrap(), Decimal::new(129_950, 2));
        assert_eq!(parse_amount("rate", "0").unwrap(), Decimal::ZERO);
        assert!(parse_amount("rate", "-1").is_err());
        assert!(parse_amount("rate", "cheap").is_err());
    }

    #[test]
    fn status_must_be_known() {
        let status = parse_status("Maintenance", RoomStatus::KNOWN, RoomStatus::parse_lenient).unwrap();
        assert_eq!(status, RoomStatus::Maintenance);

        let err = parse_status("haunted", RoomStatus::KNOWN, RoomStatus::parse_lenient).unwrap_err();
        assert!(err.to_string().contains("available"));
    }

    #[test]
    fn or_dash_fills_blanks() {
        assert_eq!(or_dash(None), "-");
        assert_eq!(or_dash(Some("")), "-");
        assert_eq!(or_dash(Some("x")), "x");
    }
}
