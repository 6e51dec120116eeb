//! `delete oidc-config`
//!
//! Resolves the private key secret ARN to a bucket name, refuses configs
//! still referenced by a cluster, dispatches the delete strategy and finally
//! removes the matching OIDC provider.

use super::oidc_provider;
use crate::arn::{self, Arn, SECRETS_MANAGER};
use crate::cli::DeleteOidcConfigArgs;
use crate::commands::{confirm, parse_mode, prompt_mode, CommandError};
use crate::interactive::{self, validation, Input};
use crate::mode::Mode;
use crate::runtime::Runtime;
use crate::strategies::{select_strategy, OidcConfigInput};
use tracing::info;

const PRIVATE_KEY_SECRET_PREFIX: &str = "rosa-private-key-";

/// Bucket backing the OIDC config whose private key is stored under `resource_id`
///
/// Customer-hosted secrets carry a random `-suffix` after the bucket name.
pub fn bucket_name_from_secret(resource_id: &str, hosted: bool) -> String {
    let bucket = resource_id
        .strip_prefix(PRIVATE_KEY_SECRET_PREFIX)
        .unwrap_or(resource_id);
    if hosted {
        return bucket.to_string();
    }
    match bucket.rfind('-') {
        Some(index) => bucket[..index].to_string(),
        None => bucket.to_string(),
    }
}

/// Discovery endpoint served from the config's bucket
pub fn oidc_endpoint_url(bucket: &str, region: &str) -> String {
    format!("https://{}.s3.{}.amazonaws.com", bucket, region)
}

async fn build_input(
    rt: &Runtime,
    secret_arn: &str,
    region: &str,
    hosted: bool,
) -> Result<OidcConfigInput, CommandError> {
    let parse_error = |e: arn::ArnError| {
        CommandError::Failed(format!(
            "There was a problem parsing secret ARN '{}' : {}",
            secret_arn, e
        ))
    };
    let parsed: Arn = secret_arn.parse().map_err(parse_error)?;
    if parsed.service != SECRETS_MANAGER {
        return Err(CommandError::Failed(
            "Supplied secret ARN is not a valid Secrets Manager ARN".to_string(),
        ));
    }
    if parsed.region != region {
        return Err(CommandError::Failed(format!(
            "Secret region '{}' differs from chosen region '{}', please run the command supplying region parameter.",
            parsed.region, region
        )));
    }
    let resource_id = arn::resource_id_from_secret_arn(secret_arn).map_err(parse_error)?;
    let bucket_name = bucket_name_from_secret(&resource_id, hosted);

    let in_use = rt
        .control_plane()?
        .has_cluster_using_oidc_config(&bucket_name)
        .await
        .map_err(|e| {
            CommandError::Failed(format!(
                "There was a problem checking if any clusters are using OIDC config '{}' : {}",
                bucket_name, e
            ))
        })?;
    if in_use {
        return Err(CommandError::Failed(format!(
            "There are clusters using OIDC config '{}', can't delete the configuration",
            bucket_name
        )));
    }

    Ok(OidcConfigInput {
        private_key_secret_arn: secret_arn.to_string(),
        bucket_name,
        region: region.to_string(),
    })
}

pub async fn run(args: DeleteOidcConfigArgs, rt: &Runtime) -> Result<(), CommandError> {
    let mut mode = parse_mode(args.mode.as_deref())?;
    if args.rh_hosted && mode != Some(Mode::Auto) {
        return Err(CommandError::Warning(
            "--rh-hosted param is not supported outside --mode auto flow.".to_string(),
        ));
    }
    let region = rt.region()?;

    let interactive = args.interactive || args.mode.is_none();
    if interactive {
        mode = Some(prompt_mode(rt, "OIDC config creation mode", Mode::Auto)?);
    }
    let mode = mode.unwrap_or_default();

    let mut secret_arn = args.oidc_private_key_secret_arn.unwrap_or_default();
    if secret_arn.is_empty() || interactive {
        secret_arn = interactive::get_string(
            rt.prompter.as_ref(),
            Input::new("OIDC Private Key Secret ARN")
                .help("AWS Secrets Manager ARN for identification of config")
                .default_text(secret_arn)
                .required()
                .validator(Box::new(validation::arn_validator)),
        )
        .map_err(|e| {
            CommandError::Failed(format!(
                "Expected a valid ARN to the secret containing the private key: {}",
                e
            ))
        })?;
    }
    arn::validate_arn(&secret_arn).map_err(|e| CommandError::Failed(e.to_string()))?;

    let input = build_input(rt, &secret_arn, region, args.rh_hosted).await?;

    if mode == Mode::Auto
        && !confirm(
            rt,
            args.yes,
            format!("Delete OIDC configuration '{}'?", input.bucket_name),
        )?
    {
        rt.reporter.info("Deletion of OIDC configuration aborted");
        return Ok(());
    }

    let strategy = select_strategy(mode, args.rh_hosted);
    info!(strategy = strategy.name(), bucket = %input.bucket_name, "Deleting OIDC configuration");
    strategy.execute(&input, rt).await?;

    oidc_provider::delete_provider(
        rt,
        mode,
        &oidc_endpoint_url(&input.bucket_name, region),
        true,
    )
    .await
}

#[cfg(test)]
#[path = "oidc_config_test.rs"]
mod tests;
