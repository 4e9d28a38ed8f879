//! The `KafkaBinding` custom resource.
//!
//! A `KafkaBinding` connects a workload (the subject) to a set of Kafka brokers. The
//! reconciler resolves the subject, then hands the [`KafkaAuthSpec`] and the pod template of
//! the subject to [`crate::binding::apply`].

use k8s_openapi::api::core::v1::SecretKeySelector;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::status::KafkaBindingStatus;

pub use self::reference::Reference;

mod reference;

/// Separator of the broker addresses in `KAFKA_BOOTSTRAP_SERVERS`.
pub const BOOTSTRAP_SERVERS_SEPARATOR: &str = ",";

/// Binds the containers of the workload named by `subject` to the Kafka brokers in
/// `bootstrapServers`, using the SASL, Kerberos and TLS settings in `net`.
#[derive(Clone, CustomResource, Debug, Deserialize, JsonSchema, PartialEq, Serialize)]
#[kube(
    group = "bindings.knative.dev",
    version = "v1beta1",
    kind = "KafkaBinding",
    plural = "kafkabindings",
    status = "KafkaBindingStatus",
    namespaced,
    crates(
        kube_core = "kube::core",
        k8s_openapi = "k8s_openapi",
        schemars = "schemars"
    )
)]
#[serde(rename_all = "camelCase")]
pub struct KafkaBindingSpec {
    #[serde(flatten)]
    pub binding: BindingSpec,

    #[serde(flatten)]
    pub auth: KafkaAuthSpec,
}

/// The workload side of a binding.
#[derive(Clone, Debug, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingSpec {
    /// The workload whose pod template receives the Kafka connection settings.
    pub subject: Reference,
}

/// Everything a client needs to reach the Kafka brokers.
#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KafkaAuthSpec {
    /// Addresses of the Kafka brokers, e.g. `my-cluster-kafka-bootstrap.kafka:9092`.
    /// The order is kept in the injected `KAFKA_BOOTSTRAP_SERVERS` value.
    pub bootstrap_servers: Vec<String>,

    /// Security settings of the broker connection.
    #[serde(default)]
    pub net: KafkaNetSpec,
}

impl KafkaAuthSpec {
    /// The broker list as injected into `KAFKA_BOOTSTRAP_SERVERS`.
    pub fn bootstrap_servers_value(&self) -> String {
        self.bootstrap_servers.join(BOOTSTRAP_SERVERS_SEPARATOR)
    }
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KafkaNetSpec {
    /// SASL authentication with username and password.
    #[serde(default)]
    pub sasl: KafkaSaslSpec,

    /// TLS encryption, optionally with a client certificate.
    #[serde(default)]
    pub tls: KafkaTlsSpec,

    /// SASL/GSSAPI (Kerberos) authentication.
    #[serde(default)]
    pub gssapi: KafkaGssapiSpec,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KafkaSaslSpec {
    #[serde(default)]
    pub enable: bool,

    /// The SASL user.
    #[serde(default)]
    pub user: SecretValueFromSource,

    /// The SASL password.
    #[serde(default)]
    pub password: SecretValueFromSource,

    /// The SASL mechanism, e.g. `PLAIN` or `SCRAM-SHA-512`.
    #[serde(default, rename = "type")]
    pub type_: SecretValueFromSource,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KafkaTlsSpec {
    #[serde(default)]
    pub enable: bool,

    /// The client certificate, PEM encoded.
    #[serde(default)]
    pub cert: SecretValueFromSource,

    /// The private key of the client certificate, PEM encoded.
    #[serde(default)]
    pub key: SecretValueFromSource,

    /// The CA certificate used to verify the brokers, PEM encoded.
    #[serde(default)]
    pub ca_cert: SecretValueFromSource,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KafkaGssapiSpec {
    #[serde(default)]
    pub enable: bool,

    /// The Kerberos keytab. Mounted into every container as `/etc/krb5.keytab`.
    #[serde(default)]
    pub keytab: SecretValueFromSource,

    /// The Kerberos configuration. Mounted into every container as `/etc/krb5.conf`.
    #[serde(default)]
    pub config: SecretValueFromSource,

    #[serde(default)]
    pub principal: SecretValueFromSource,

    /// The Kerberos service name of the brokers, usually `kafka`.
    #[serde(default)]
    pub service: SecretValueFromSource,

    #[serde(default)]
    pub realm: SecretValueFromSource,

    #[serde(default)]
    pub username: SecretValueFromSource,

    #[serde(default)]
    pub password: SecretValueFromSource,
}

/// A value which is read from a key of a Secret.
#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretValueFromSource {
    /// The Secret key to select from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key_ref: Option<SecretKeySelector>,
}

impl SecretValueFromSource {
    pub fn from_secret_key(secret_name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            secret_key_ref: Some(SecretKeySelector {
                name: secret_name.into(),
                key: key.into(),
                ..SecretKeySelector::default()
            }),
        }
    }

    pub fn selector(&self) -> Option<&SecretKeySelector> {
        self.secret_key_ref.as_ref()
    }
}

impl From<SecretKeySelector> for SecretValueFromSource {
    fn from(selector: SecretKeySelector) -> Self {
        Self {
            secret_key_ref: Some(selector),
        }
    }
}
