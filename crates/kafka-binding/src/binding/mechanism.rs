//! Renders a [`KafkaAuthSpec`] into the objects injected into a pod template.
//!
//! Every mechanism is described by a [`MechanismSlice`]: the Kerberos files it mounts, its
//! literal env vars and its secret backed env vars, in injection order. The slices are folded
//! into one [`BindingArtifacts`], which is identical for every container of the pod.

use k8s_openapi::api::core::v1::{Container, EnvVar, SecretKeySelector, Volume, VolumeMount};

use crate::{
    binding::vocabulary::{ENABLED, KERBEROS_MOUNT_DIR, KerberosFile, ManagedEnvVar, Mechanism},
    builder::pod::{
        env::{env_var_from_secret_key_selector, env_var_from_value},
        volume::{VolumeBuilder, VolumeMountBuilder},
    },
    crd::{KafkaAuthSpec, SecretValueFromSource},
};

/// What a single mechanism contributes to the pod template.
#[derive(Debug)]
pub(crate) struct MechanismSlice<'a> {
    pub mechanism: Mechanism,

    /// Mounted before anything else, each adds its path env var.
    pub files: Vec<(KerberosFile, &'a SecretKeySelector)>,

    pub literals: Vec<(ManagedEnvVar, String)>,

    /// Entries without a secret key reference are skipped.
    pub secrets: Vec<(ManagedEnvVar, &'a SecretValueFromSource)>,
}

impl<'a> MechanismSlice<'a> {
    fn new(mechanism: Mechanism) -> Self {
        Self {
            mechanism,
            files: Vec::new(),
            literals: Vec::new(),
            secrets: Vec::new(),
        }
    }

    fn with_literal(mut self, env_var: ManagedEnvVar, value: impl Into<String>) -> Self {
        self.literals.push((env_var, value.into()));
        self
    }

    fn with_secret(mut self, env_var: ManagedEnvVar, source: &'a SecretValueFromSource) -> Self {
        self.secrets.push((env_var, source));
        self
    }

    fn with_file(mut self, file: KerberosFile, source: &'a SecretValueFromSource) -> Self {
        if let Some(selector) = source.selector() {
            self.files.push((file, selector));
        }
        self
    }
}

/// Returns the slices of all enabled mechanisms, in injection order.
pub(crate) fn mechanism_slices(spec: &KafkaAuthSpec) -> Vec<MechanismSlice<'_>> {
    let net = &spec.net;
    let mut slices = vec![
        MechanismSlice::new(Mechanism::Bootstrap)
            .with_literal(ManagedEnvVar::BootstrapServers, spec.bootstrap_servers_value()),
    ];

    if net.sasl.enable {
        slices.push(
            MechanismSlice::new(Mechanism::Sasl)
                .with_literal(ManagedEnvVar::SaslEnable, ENABLED)
                .with_secret(ManagedEnvVar::SaslUser, &net.sasl.user)
                .with_secret(ManagedEnvVar::SaslPassword, &net.sasl.password)
                .with_secret(ManagedEnvVar::SaslType, &net.sasl.type_),
        );
    }

    if net.gssapi.enable {
        let gssapi = &net.gssapi;
        slices.push(
            MechanismSlice::new(Mechanism::Kerberos)
                .with_file(KerberosFile::Keytab, &gssapi.keytab)
                .with_file(KerberosFile::Config, &gssapi.config)
                .with_literal(ManagedEnvVar::KerberosEnable, ENABLED)
                .with_secret(ManagedEnvVar::KerberosPrincipal, &gssapi.principal)
                .with_secret(ManagedEnvVar::KerberosService, &gssapi.service)
                .with_secret(ManagedEnvVar::KerberosRealm, &gssapi.realm)
                .with_secret(ManagedEnvVar::KerberosUsername, &gssapi.username)
                .with_secret(ManagedEnvVar::KerberosPassword, &gssapi.password),
        );
    }

    if net.tls.enable {
        slices.push(
            MechanismSlice::new(Mechanism::Tls)
                .with_literal(ManagedEnvVar::TlsEnable, ENABLED)
                .with_secret(ManagedEnvVar::TlsCert, &net.tls.cert)
                .with_secret(ManagedEnvVar::TlsKey, &net.tls.key)
                .with_secret(ManagedEnvVar::TlsCaCert, &net.tls.ca_cert),
        );
    }

    slices
}

/// Kubernetes objects generated from a [`KafkaAuthSpec`] which should be added to the pod.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BindingArtifacts {
    /// Pod level volumes holding the Kerberos files
    pub volumes: Vec<Volume>,
    /// Mounts of [`Self::volumes`], added to every container
    pub volume_mounts: Vec<VolumeMount>,
    /// Environment variables added to every container
    pub env: Vec<EnvVar>,
    /// The mechanisms which contributed to the artifacts
    pub mechanisms: Vec<Mechanism>,
}

impl BindingArtifacts {
    pub fn new(spec: &KafkaAuthSpec) -> Self {
        mechanism_slices(spec)
            .into_iter()
            .fold(Self::default(), |mut artifacts, slice| {
                artifacts.add_slice(slice);
                artifacts
            })
    }

    fn add_slice(&mut self, slice: MechanismSlice<'_>) {
        for (file, selector) in slice.files {
            self.volumes.push(
                VolumeBuilder::new(file.volume_name(), &selector.name)
                    .with_item(&selector.key, file.file_name())
                    .build(),
            );
            self.volume_mounts
                .push(VolumeMountBuilder::new(file.volume_name(), KERBEROS_MOUNT_DIR).build());
            self.env
                .push(env_var_from_value(file.path_env_var().as_str(), file.path()));
        }

        for (env_var, value) in slice.literals {
            self.env.push(env_var_from_value(env_var.as_str(), value));
        }

        for (env_var, source) in slice.secrets {
            if let Some(selector) = source.selector() {
                self.env
                    .push(env_var_from_secret_key_selector(env_var.as_str(), selector));
            }
        }

        self.mechanisms.push(slice.mechanism);
    }

    /// Appends the env vars and volume mounts to `container`, after everything it already has.
    pub fn inject_into(&self, container: &mut Container) {
        container
            .env
            .get_or_insert_with(Vec::new)
            .extend(self.env.iter().cloned());

        if !self.volume_mounts.is_empty() {
            container
                .volume_mounts
                .get_or_insert_with(Vec::new)
                .extend(self.volume_mounts.iter().cloned());
        }
    }
}
