use crate::domain::model::Guest;
use crate::utils::error::{LoaderError, Result};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

/// Schemes the compiled-in sqlx drivers can open.
pub const SUPPORTED_SCHEMES: &[&str] = &["mysql", "mariadb", "sqlite"];

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn identifier_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier regex"))
}

pub fn validate_database_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(LoaderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) if SUPPORTED_SCHEMES.contains(&url.scheme()) => Ok(()),
        Ok(url) => Err(LoaderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: redact_url(url_str),
            reason: format!(
                "Unsupported database scheme: {}. Supported schemes: {}",
                url.scheme(),
                SUPPORTED_SCHEMES.join(", ")
            ),
        }),
        Err(e) => Err(LoaderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: redact_url(url_str),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// Table and column names end up in the statement text, so only plain
/// identifiers are accepted.
pub fn validate_identifier(field_name: &str, value: &str) -> Result<()> {
    if !identifier_regex().is_match(value) {
        return Err(LoaderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Must be a plain SQL identifier ([A-Za-z_][A-Za-z0-9_]*)".to_string(),
        });
    }
    Ok(())
}

pub fn validate_columns(field_name: &str, columns: &[String]) -> Result<()> {
    if columns.len() != 3 {
        return Err(LoaderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: columns.join(", "),
            reason: format!("Expected 3 columns, got {}", columns.len()),
        });
    }
    for column in columns {
        validate_identifier(field_name, column)?;
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LoaderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_email(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;

    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if !valid {
        return Err(LoaderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Not a valid email address".to_string(),
        });
    }
    Ok(())
}

pub fn validate_guest(index: usize, guest: &Guest) -> Result<()> {
    let check = |field: &str, result: Result<()>| {
        result.map_err(|e| LoaderError::ValidationError {
            message: format!("guest #{} {}: {}", index + 1, field, e),
        })
    };

    check(
        "first name",
        validate_non_empty_string("first_name", &guest.first_name),
    )?;
    check(
        "last name",
        validate_non_empty_string("last_name", &guest.last_name),
    )?;
    check("email", validate_email("email", &guest.email))?;
    Ok(())
}

/// Strips the password from a URL before it reaches logs or error output.
pub fn redact_url(url_str: &str) -> String {
    match Url::parse(url_str) {
        Ok(mut url) if url.password().is_some() => {
            // set_password only fails for cannot-be-a-base URLs, which carry no password
            let _ = url.set_password(Some("***"));
            url.to_string()
        }
        Ok(url) => url.to_string(),
        Err(_) => url_str.to_string(),
    }
}
