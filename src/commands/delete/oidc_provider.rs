//! `delete oidc-provider`

use crate::cli::DeleteOidcProviderArgs;
use crate::commandbuilder::{AwsCommandBuilder, Command, Param};
use crate::commands::{confirm, parse_mode, prompt_mode, CommandError};
use crate::helper;
use crate::interactive::{self, validation, Input};
use crate::mode::Mode;
use crate::runtime::Runtime;
use tracing::info;

/// IAM ARN of the OIDC provider registered for `endpoint_url`
pub fn provider_arn(account_id: &str, endpoint_url: &str) -> String {
    let issuer = endpoint_url
        .strip_prefix("https://")
        .unwrap_or(endpoint_url)
        .trim_end_matches('/');
    format!("arn:aws:iam::{}:oidc-provider/{}", account_id, issuer)
}

pub fn delete_command(arn: &str) -> String {
    AwsCommandBuilder::iam()
        .set_command(Command::DeleteOpenIdConnectProvider)
        .add_param(Param::OpenIdConnectProviderArn, arn)
        .build()
}

/// Delete the provider for `endpoint_url`, or print the command in manual mode
///
/// `confirmed` skips the confirmation prompt in auto mode.
pub async fn delete_provider(
    rt: &Runtime,
    mode: Mode,
    endpoint_url: &str,
    confirmed: bool,
) -> Result<(), CommandError> {
    let in_use = rt
        .control_plane()?
        .has_cluster_using_oidc_endpoint_url(endpoint_url)
        .await
        .map_err(|e| {
            CommandError::Failed(format!(
                "There was a problem checking if any clusters are using OIDC endpoint URL '{}' : {}",
                endpoint_url, e
            ))
        })?;
    if in_use {
        return Err(CommandError::Failed(format!(
            "There are clusters using OIDC endpoint URL '{}', can't delete the provider",
            endpoint_url
        )));
    }

    let account_id = rt.cloud.caller_account_id().await?;
    let arn = provider_arn(&account_id, endpoint_url);

    match mode {
        Mode::Manual => {
            rt.reporter.print(delete_command(&arn));
            Ok(())
        }
        Mode::Auto => {
            if !rt.cloud.oidc_provider_exists(&arn).await? {
                rt.reporter
                    .info(format!("OIDC provider '{}' does not exist, nothing to delete", arn));
                return Ok(());
            }
            if !confirm(rt, confirmed, format!("Delete OIDC provider '{}'?", arn))? {
                rt.reporter.info("Deletion of OIDC provider aborted");
                return Ok(());
            }

            let spin = helper::spinner(&rt.reporter, &format!("Deleting OIDC provider '{}'", arn));
            info!(arn = %arn, "Deleting OIDC provider");
            let result = rt.cloud.delete_oidc_provider(&arn).await;
            if let Some(spin) = spin {
                spin.finish_and_clear();
            }
            result.map_err(|e| {
                CommandError::Failed(format!(
                    "There was an error deleting the OIDC provider: {}",
                    e
                ))
            })?;

            rt.reporter
                .info(format!("Successfully deleted the OIDC provider {}", arn));
            Ok(())
        }
    }
}

pub async fn run(args: DeleteOidcProviderArgs, rt: &Runtime) -> Result<(), CommandError> {
    let mut mode = parse_mode(args.mode.as_deref())?;

    let interactive = args.interactive || args.mode.is_none();
    if interactive {
        mode = Some(prompt_mode(rt, "OIDC provider deletion mode", Mode::Auto)?);
    }
    let mode = mode.unwrap_or_default();

    let mut endpoint_url = args.oidc_endpoint_url.unwrap_or_default();
    if endpoint_url.is_empty() || interactive {
        endpoint_url = interactive::get_string(
            rt.prompter.as_ref(),
            Input::new("OIDC endpoint URL")
                .help("Endpoint URL of the OIDC provider to delete")
                .default_text(endpoint_url)
                .required()
                .validator(Box::new(validation::is_url)),
        )
        .map_err(|e| {
            CommandError::Failed(format!("Expected a valid OIDC endpoint URL: {}", e))
        })?;
    }
    let endpoint_url = endpoint_url.trim();
    if !endpoint_url.starts_with("https://") {
        return Err(CommandError::Failed(format!(
            "Expected OIDC endpoint URL '{}' to use the https scheme",
            endpoint_url
        )));
    }

    delete_provider(rt, mode, endpoint_url, args.yes).await
}
