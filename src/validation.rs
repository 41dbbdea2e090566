//! Field validation helpers.
//!
//! Pure functions: no state, no I/O, deterministic. Each returns `Ok(())`
//! or a `ServiceError::Validation` carrying a human-readable message.

use std::sync::LazyLock;

use regex::Regex;

use crate::errors::ServiceError;

/// Minimum accepted password length.
pub const SENHA_TAMANHO_MINIMO: usize = 6;

/// Date pattern for birth dates and other day-granularity fields.
pub const FORMATO_DATA: &str = "%Y-%m-%d";

/// Date-time pattern for consultation scheduling.
pub const FORMATO_DATA_HORA: &str = "%Y-%m-%d %H:%M:%S";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap()
});

static TELEFONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{10,15}$").unwrap());

/// Check that every named field is present, failing with a single message
/// listing all the missing ones.
pub fn validar_campos_obrigatorios(campos: &[(&str, bool)]) -> Result<(), ServiceError> {
    let faltando: Vec<&str> = campos
        .iter()
        .filter(|(_, presente)| !presente)
        .map(|(nome, _)| *nome)
        .collect();

    if faltando.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::Validation(format!(
            "Missing required fields: {}",
            faltando.join(", ")
        )))
    }
}

/// Whether an optional text field counts as supplied (non-empty).
pub fn presente(valor: Option<&str>) -> bool {
    valor.is_some_and(|v| !v.trim().is_empty())
}

/// Whether an optional id field counts as supplied (positive).
pub fn presente_id(valor: Option<i64>) -> bool {
    valor.is_some_and(|id| id > 0)
}

pub fn validar_email(email: &str) -> Result<(), ServiceError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(ServiceError::Validation("Invalid email format".into()))
    }
}

pub fn validar_telefone(telefone: &str) -> Result<(), ServiceError> {
    if TELEFONE_RE.is_match(telefone) {
        Ok(())
    } else {
        Err(ServiceError::Validation(
            "Invalid phone number format".into(),
        ))
    }
}

pub fn validar_senha(senha: &str, tamanho_minimo: usize) -> Result<(), ServiceError> {
    if senha.chars().count() < tamanho_minimo {
        Err(ServiceError::Validation(format!(
            "Password must be at least {tamanho_minimo} characters"
        )))
    } else {
        Ok(())
    }
}

/// Validate a date (or date-time, when the pattern carries `%H`) string
/// against a chrono format pattern.
pub fn validar_data(valor: &str, formato: &str) -> Result<(), ServiceError> {
    let ok = if formato.contains("%H") {
        chrono::NaiveDateTime::parse_from_str(valor, formato).is_ok()
    } else {
        chrono::NaiveDate::parse_from_str(valor, formato).is_ok()
    };

    if ok {
        Ok(())
    } else {
        Err(ServiceError::Validation(format!(
            "Invalid date format. Expected: {formato}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_emails_pass() {
        for email in [
            "ana@x.com",
            "a.b+tag@sub.domain.org",
            "USER_99%x@clinica-sp.com.br",
        ] {
            assert!(validar_email(email).is_ok(), "{email} should pass");
        }
    }

    #[test]
    fn invalid_emails_fail() {
        for email in ["", "ana", "ana@", "@x.com", "ana@x", "ana@x.c", "ana x@y.com"] {
            assert!(validar_email(email).is_err(), "{email} should fail");
        }
    }

    #[test]
    fn phone_accepts_10_to_15_digits_with_optional_plus() {
        assert!(validar_telefone("5511999999999").is_ok());
        assert!(validar_telefone("+5511999999999").is_ok());
        assert!(validar_telefone("1234567890").is_ok());
    }

    #[test]
    fn phone_rejects_short_long_and_nondigit() {
        assert!(validar_telefone("123456789").is_err()); // 9 digits
        assert!(validar_telefone("1234567890123456").is_err()); // 16 digits
        assert!(validar_telefone("+55 11 9999").is_err());
        assert!(validar_telefone("abc1234567").is_err());
    }

    #[test]
    fn password_minimum_length_is_enforced() {
        assert!(validar_senha("12345", SENHA_TAMANHO_MINIMO).is_err());
        assert!(validar_senha("123456", SENHA_TAMANHO_MINIMO).is_ok());
        assert!(validar_senha("secret1", SENHA_TAMANHO_MINIMO).is_ok());
        // Configurable minimum.
        assert!(validar_senha("123456", 8).is_err());
    }

    #[test]
    fn date_format_checks_pattern() {
        assert!(validar_data("2024-01-01", FORMATO_DATA).is_ok());
        assert!(validar_data("2024-13-01", FORMATO_DATA).is_err());
        assert!(validar_data("01/01/2024", FORMATO_DATA).is_err());
        assert!(validar_data("2024-01-01 10:00:00", FORMATO_DATA_HORA).is_ok());
        assert!(validar_data("2024-01-01", FORMATO_DATA_HORA).is_err());
    }

    #[test]
    fn required_fields_lists_every_missing_one() {
        let erro = validar_campos_obrigatorios(&[
            ("nome", true),
            ("email", false),
            ("senha", false),
        ])
        .unwrap_err();
        let msg = erro.to_string();
        assert!(msg.contains("email"));
        assert!(msg.contains("senha"));
        assert!(!msg.contains("nome"));
    }

    #[test]
    fn blank_and_zero_values_are_not_present() {
        assert!(!presente(None));
        assert!(!presente(Some("")));
        assert!(!presente(Some("   ")));
        assert!(presente(Some("ok")));
        assert!(!presente_id(None));
        assert!(!presente_id(Some(0)));
        assert!(presente_id(Some(1)));
    }
}
