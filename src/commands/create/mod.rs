pub mod ingress;
pub mod machinepool;
