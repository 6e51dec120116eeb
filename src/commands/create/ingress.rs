//! `create ingress`

use crate::cli::CreateIngressArgs;
use crate::commands::CommandError;
use crate::controlplane::{ClusterState, IngressBuilder, ListeningMethod, LoadBalancerType};
use crate::interactive::{self, Answer, Input, ValidationError};
use crate::runtime::Runtime;
use std::collections::BTreeMap;
use tracing::info;

const LABEL_MATCH_FORMAT: &str = "Expected key=value format for label-match";

/// Parse `key=value,key2=value2` into route selectors
///
/// Keys and values are trimmed; anything after a second `=` is ignored.
pub fn get_route_selector(label_match: &str) -> Result<BTreeMap<String, String>, CommandError> {
    let mut selectors = BTreeMap::new();
    if label_match.is_empty() {
        return Ok(selectors);
    }
    for pair in label_match.split(',') {
        let mut tokens = pair.split('=');
        let (Some(key), Some(value)) = (tokens.next(), tokens.next()) else {
            return Err(CommandError::Failed(LABEL_MATCH_FORMAT.to_string()));
        };
        selectors.insert(key.trim().to_string(), value.trim().to_string());
    }
    Ok(selectors)
}

fn label_validator(answer: &Answer) -> Result<(), ValidationError> {
    match answer {
        Answer::Text(value) => get_route_selector(value)
            .map(|_| ())
            .map_err(|e| ValidationError::Invalid(e.to_string())),
        other => Err(ValidationError::NotText(other.to_string())),
    }
}

pub async fn run(args: CreateIngressArgs, rt: &Runtime) -> Result<(), CommandError> {
    let cluster_key = rt.cluster_key(args.cluster.as_deref())?;

    let mut label_match = args.label_match;
    if args.interactive {
        label_match = interactive::get_string(
            rt.prompter.as_ref(),
            Input::new("Label match for ingress")
                .help("Label match for ingress. Format should be a comma-separated list of 'key=value'.")
                .default_text(label_match)
                .validator(Box::new(label_validator)),
        )
        .map_err(|e| {
            CommandError::Failed(format!(
                "Expected a valid comma-separated list of attributes: {}",
                e
            ))
        })?;
    }
    let route_selectors = get_route_selector(&label_match)?;

    let cluster = rt.fetch_cluster(cluster_key).await?;
    if cluster.is_private_link() {
        return Err(CommandError::Failed(format!(
            "Cluster '{}' is PrivateLink and does not support creating new ingresses",
            cluster_key
        )));
    }
    if cluster.state != ClusterState::Ready {
        return Err(CommandError::Failed(format!(
            "Cluster '{}' is not yet ready",
            cluster_key
        )));
    }

    let mut private = args.private;
    if args.interactive {
        private = interactive::get_bool(
            rt.prompter.as_ref(),
            Input::new("Private ingress")
                .help("Restrict application route to direct, private connectivity.")
                .default_bool(private),
        )
        .map_err(|e| CommandError::Failed(format!("Expected a valid private value: {}", e)))?;
    }

    let mut nlb = args.nlb;
    if args.interactive {
        nlb = interactive::get_bool(
            rt.prompter.as_ref(),
            Input::new("Network Load Balancer")
                .help("Chooses type of load balancer to be NLB.")
                .default_bool(nlb),
        )
        .map_err(|e| CommandError::Failed(format!("Expected a valid nlb value: {}", e)))?;
    }

    let mut builder = IngressBuilder::new()
        .listening(if private {
            ListeningMethod::Internal
        } else {
            ListeningMethod::External
        })
        .load_balancer_type(if nlb {
            LoadBalancerType::Nlb
        } else {
            LoadBalancerType::Classic
        });
    if !route_selectors.is_empty() {
        builder = builder.route_selectors(route_selectors);
    }
    let ingress = builder.build().map_err(|e| {
        CommandError::Failed(format!(
            "Failed to create ingress for cluster '{}': {}",
            cluster_key, e
        ))
    })?;

    info!(cluster = %cluster.id, private, nlb, "Creating ingress");
    rt.control_plane()?
        .create_ingress(&cluster.id, &ingress)
        .await
        .map_err(|e| {
            CommandError::Failed(format!(
                "Failed to add ingress to cluster '{}': {}",
                cluster_key, e
            ))
        })?;

    rt.reporter.info(format!(
        "Ingress has been created on cluster '{}'.",
        cluster_key
    ));
    rt.reporter.info(format!(
        "To view all ingresses, run 'pilvi list ingresses -c {}'",
        cluster_key
    ));
    Ok(())
}
