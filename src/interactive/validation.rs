//! Answer validators for interactive prompts
//!
//! Each validator inspects the [`Answer`] variant it is given and rejects
//! answers of the wrong kind, so the same validator can be attached to any
//! prompt without silently passing mismatched values.

use super::Answer;
use crate::arn;
use regex::Regex;
use std::net::IpAddr;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

/// A literal `""` typed at a prompt, meaning "clear this value"
const DOUBLE_QUOTES_TO_REMOVE: &str = "\"\"";

/// Boxed validator attached to an [`super::Input`]
pub type Validator = Box<dyn Fn(&Answer) -> Result<(), ValidationError> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("can only validate strings, got {0}")]
    NotText(String),

    #[error("can only validate boolean values, got {0}")]
    NotBool(String),

    #[error("can only validate a slice of string, got {0}")]
    NotChoices(String),

    #[error("Value is required")]
    Required,

    #[error("value is too long. Max length is {0}")]
    TooLong(usize),

    #[error("parse \"{value}\": {reason}")]
    InvalidUrl { value: String, reason: String },

    #[error("file '{0}' does not have a valid file extension")]
    InvalidCertExtension(String),

    #[error("file '{0}' does not exist on the file system")]
    CertNotFound(String),

    #[error("invalid CIDR address: {0}")]
    InvalidCidr(String),

    #[error("{value} does not match regular expression {pattern}")]
    NoMatch { value: String, pattern: String },

    #[error("{0}")]
    Invalid(String),
}

fn text(answer: &Answer) -> Result<&str, ValidationError> {
    match answer {
        Answer::Text(s) => Ok(s),
        other => Err(ValidationError::NotText(other.to_string())),
    }
}

fn choices(answer: &Answer) -> Result<&[String], ValidationError> {
    match answer {
        Answer::Choices(values) => Ok(values),
        other => Err(ValidationError::NotChoices(other.to_string())),
    }
}

/// Rejects empty text and empty selections
pub fn required(answer: &Answer) -> Result<(), ValidationError> {
    match answer {
        Answer::Text(s) if s.trim().is_empty() => Err(ValidationError::Required),
        Answer::Choices(values) if values.is_empty() => Err(ValidationError::Required),
        _ => Ok(()),
    }
}

pub fn max_length(length: usize) -> Validator {
    Box::new(move |answer| {
        if text(answer)?.chars().count() > length {
            return Err(ValidationError::TooLong(length));
        }
        Ok(())
    })
}

/// Absolute URL, or an absolute path, as accepted in an HTTP request line
pub fn is_url(answer: &Answer) -> Result<(), ValidationError> {
    let value = text(answer)?;
    if value.is_empty() || value.starts_with('/') {
        return Ok(());
    }
    url::Url::parse(value)
        .map(|_| ())
        .map_err(|e| ValidationError::InvalidUrl {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Path to an existing certificate or key file
pub fn is_cert(answer: &Answer) -> Result<(), ValidationError> {
    static CERT_EXTENSION: OnceLock<Option<Regex>> = OnceLock::new();

    let value = text(answer)?;
    if value.is_empty() || value == DOUBLE_QUOTES_TO_REMOVE {
        return Ok(());
    }

    let valid_extension = CERT_EXTENSION
        .get_or_init(|| Regex::new(r"\.(pem|ca-bundle|ce?rt?|key)$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(value));
    if !valid_extension {
        return Err(ValidationError::InvalidCertExtension(value.to_string()));
    }
    if !Path::new(value).exists() {
        return Err(ValidationError::CertNotFound(value.to_string()));
    }
    Ok(())
}

/// `address/prefix` for IPv4 or IPv6
pub fn is_cidr(answer: &Answer) -> Result<(), ValidationError> {
    let value = text(answer)?;
    let invalid = || ValidationError::InvalidCidr(value.to_string());

    let (address, prefix) = value.split_once('/').ok_or_else(invalid)?;
    let address: IpAddr = address.parse().map_err(|_| invalid())?;
    // Leading '+' or whitespace is accepted by u8::from_str but not by a CIDR
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let prefix: u8 = prefix.parse().map_err(|_| invalid())?;
    let max_prefix = match address {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    };
    if prefix > max_prefix {
        return Err(invalid());
    }
    Ok(())
}

/// Text must match `pattern`; the empty string passes
pub fn reg_exp(pattern: &str) -> Result<Validator, regex::Error> {
    let re = Regex::new(pattern)?;
    Ok(Box::new(move |answer| {
        let value = text(answer)?;
        if value.is_empty() || re.is_match(value) {
            return Ok(());
        }
        Err(ValidationError::NoMatch {
            value: value.to_string(),
            pattern: re.as_str().to_string(),
        })
    }))
}

/// Boolean answer, rendered as `true`/`false`, must match `pattern`
pub fn reg_exp_boolean(pattern: &str) -> Result<Validator, regex::Error> {
    let re = Regex::new(pattern)?;
    Ok(Box::new(move |answer| {
        let value = match answer {
            Answer::Bool(b) => b.to_string(),
            other => return Err(ValidationError::NotBool(other.to_string())),
        };
        if re.is_match(&value) {
            return Ok(());
        }
        Err(ValidationError::NoMatch {
            value,
            pattern: re.as_str().to_string(),
        })
    }))
}

/// Text must be empty or a well-formed ARN
pub fn arn_validator(answer: &Answer) -> Result<(), ValidationError> {
    arn::validate_arn(text(answer)?).map_err(|e| ValidationError::Invalid(e.to_string()))
}

/// Text must parse as a whole number
pub fn is_integer(answer: &Answer) -> Result<(), ValidationError> {
    let value = text(answer)?.trim();
    if value.is_empty() {
        return Ok(());
    }
    value
        .parse::<i64>()
        .map(|_| ())
        .map_err(|_| ValidationError::Invalid(format!("'{}' is not a valid integer", value)))
}

pub fn validate_subnets_count(
    multi_az: bool,
    private_link: bool,
    count: usize,
) -> Result<(), ValidationError> {
    let (kind, expected) = match (private_link, multi_az) {
        (true, true) => ("multi-AZ private link", 3),
        (true, false) => ("single AZ private link", 1),
        (false, true) => ("multi-AZ", 6),
        (false, false) => ("single AZ", 2),
    };
    if count != expected {
        return Err(ValidationError::Invalid(format!(
            "The number of subnets for a {} cluster should be {}, instead received: {}",
            kind, expected, count
        )));
    }
    Ok(())
}

pub fn validate_availability_zones_count(
    multi_az: bool,
    count: usize,
) -> Result<(), ValidationError> {
    let (kind, expected) = if multi_az {
        ("multi AZ", 3)
    } else {
        ("single AZ", 1)
    };
    if count != expected {
        return Err(ValidationError::Invalid(format!(
            "The number of availability zones for a {} cluster should be {}, instead received: {}",
            kind, expected, count
        )));
    }
    Ok(())
}

pub fn subnets_count_validator(multi_az: bool, private_link: bool) -> Validator {
    Box::new(move |answer| validate_subnets_count(multi_az, private_link, choices(answer)?.len()))
}

pub fn availability_zones_count_validator(multi_az: bool) -> Validator {
    Box::new(move |answer| validate_availability_zones_count(multi_az, choices(answer)?.len()))
}

#[cfg(test)]
#[path = "validation_test.rs"]
mod tests;
