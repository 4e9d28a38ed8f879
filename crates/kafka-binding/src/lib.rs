//! Binds Kubernetes workloads to Kafka brokers.
//!
//! A [`crd::KafkaBinding`] names a workload and describes how to reach the brokers: the
//! bootstrap servers plus optional SASL, Kerberos (GSSAPI) and TLS settings. The [`binding`]
//! module turns that description into environment variables, volumes and volume mounts in
//! the pod template of the workload, and removes them again when the binding goes away.
//!
//! The crate does not talk to the Kubernetes API. Fetching the workload, persisting the
//! mutated template and retrying are up to the reconciler using it.

pub mod binding;
pub mod builder;
pub mod crd;
pub mod logging;
pub mod status;
pub mod yaml;

// External re-exports
pub use k8s_openapi;
pub use kube;
pub use schemars;
