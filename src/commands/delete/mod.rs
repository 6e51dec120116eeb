pub mod ingress;
pub mod machinepool;
pub mod oidc_config;
pub mod oidc_provider;
