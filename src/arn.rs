//! Amazon Resource Name parsing
//!
//! `arn:partition:service:region:account-id:resource`, where the resource
//! part may itself contain colons.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Service name for Secrets Manager ARNs
pub const SECRETS_MANAGER: &str = "secretsmanager";

const ARN_PREFIX: &str = "arn:";
const ARN_SECTIONS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArnError {
    #[error("arn: invalid prefix")]
    InvalidPrefix,

    #[error("arn: not enough sections")]
    NotEnoughSections,

    #[error("arn: invalid partition")]
    InvalidPartition,

    #[error("arn: invalid service")]
    InvalidService,

    #[error("arn: invalid resource")]
    InvalidResource,

    #[error("Invalid ARN: {0}")]
    Invalid(Box<ArnError>),

    #[error("unexpected secret resource '{0}', expected 'secret:<name>'")]
    NotASecret(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arn {
    pub partition: String,
    pub service: String,
    pub region: String,
    pub account_id: String,
    pub resource: String,
}

impl FromStr for Arn {
    type Err = ArnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.starts_with(ARN_PREFIX) {
            return Err(ArnError::InvalidPrefix);
        }

        let sections: Vec<&str> = s.splitn(ARN_SECTIONS, ':').collect();
        if sections.len() != ARN_SECTIONS {
            return Err(ArnError::NotEnoughSections);
        }
        if sections[1].is_empty() {
            return Err(ArnError::InvalidPartition);
        }
        if sections[2].is_empty() {
            return Err(ArnError::InvalidService);
        }
        if sections[5].is_empty() {
            return Err(ArnError::InvalidResource);
        }

        Ok(Arn {
            partition: sections[1].to_string(),
            service: sections[2].to_string(),
            region: sections[3].to_string(),
            account_id: sections[4].to_string(),
            resource: sections[5].to_string(),
        })
    }
}

impl fmt::Display for Arn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arn:{}:{}:{}:{}:{}",
            self.partition, self.service, self.region, self.account_id, self.resource
        )
    }
}

/// Validate an ARN supplied by the user
///
/// The empty string passes; whether a value is required is a separate check.
pub fn validate_arn(value: &str) -> Result<(), ArnError> {
    if value.is_empty() {
        return Ok(());
    }
    value
        .parse::<Arn>()
        .map(|_| ())
        .map_err(|e| ArnError::Invalid(Box::new(e)))
}

/// Secret name from a Secrets Manager ARN
///
/// `arn:aws:secretsmanager:us-east-1:123:secret:my-secret-AbCdEf` yields
/// `my-secret-AbCdEf`.
pub fn resource_id_from_secret_arn(secret_arn: &str) -> Result<String, ArnError> {
    let parsed: Arn = secret_arn.parse()?;
    match parsed.resource.split_once(':') {
        Some((_, name)) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(ArnError::NotASecret(parsed.resource)),
    }
}
