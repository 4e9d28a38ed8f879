//! Injects the Kafka connection settings of a binding into a pod template, and removes them
//! again.
//!
//! [`apply`] always starts with a [`remove`], so it can be called on every reconciliation,
//! including after the binding changed. [`remove`] strips exactly the env vars, volumes and
//! volume mounts listed in [`vocabulary`] and keeps everything else in its original order.
//!
//! # Example
//!
//! ```
//! use k8s_openapi::api::core::v1::{Container, PodSpec, PodTemplateSpec};
//! use kafka_binding::{binding, crd::KafkaAuthSpec};
//!
//! let spec = KafkaAuthSpec {
//!     bootstrap_servers: vec!["b1:9092".to_string()],
//!     ..KafkaAuthSpec::default()
//! };
//! let mut template = PodTemplateSpec {
//!     spec: Some(PodSpec {
//!         containers: vec![Container::default()],
//!         ..PodSpec::default()
//!     }),
//!     ..PodTemplateSpec::default()
//! };
//!
//! binding::apply(&spec, &mut template);
//! binding::remove(&mut template);
//! ```

use k8s_openapi::api::core::v1::{Container, PodSpec, PodTemplateSpec};
use tracing::{debug, instrument};

use crate::{
    crd::{KafkaAuthSpec, KafkaBinding, Reference},
    status::KafkaBindingStatus,
};

pub use self::{
    mechanism::BindingArtifacts,
    vocabulary::{KERBEROS_MOUNT_DIR, KerberosFile, ManagedEnvVar, Mechanism},
    workload::WithPodTemplate,
};

mod mechanism;
pub mod vocabulary;
mod workload;

/// A resource which projects settings into the pod template of its subject.
pub trait Bindable {
    type Status;

    /// The workload the binding applies to.
    fn subject(&self) -> &Reference;

    /// The status of the binding, created if it is missing.
    fn binding_status_mut(&mut self) -> &mut Self::Status;

    /// Projects the binding into `template`, replacing an earlier projection.
    fn do_binding(&self, template: &mut PodTemplateSpec);

    /// Removes the projection of the binding from `template`.
    fn undo_binding(&self, template: &mut PodTemplateSpec);
}

impl Bindable for KafkaBinding {
    type Status = KafkaBindingStatus;

    fn subject(&self) -> &Reference {
        &self.spec.binding.subject
    }

    fn binding_status_mut(&mut self) -> &mut KafkaBindingStatus {
        self.status.get_or_insert_with(KafkaBindingStatus::default)
    }

    fn do_binding(&self, template: &mut PodTemplateSpec) {
        apply(&self.spec.auth, template);
    }

    fn undo_binding(&self, template: &mut PodTemplateSpec) {
        remove(template);
    }
}

/// Injects the broker list and every enabled mechanism into all (init) containers of
/// `template`.
///
/// Kerberos volumes are appended to the pod, everything else is appended to each container,
/// init containers first. Previously injected settings are removed beforehand.
#[instrument(
    skip_all,
    fields(
        sasl = spec.net.sasl.enable,
        gssapi = spec.net.gssapi.enable,
        tls = spec.net.tls.enable,
    )
)]
pub fn apply(spec: &KafkaAuthSpec, template: &mut PodTemplateSpec) {
    remove(template);

    let Some(pod_spec) = template.spec.as_mut() else {
        debug!("pod template has no spec, nothing to bind");
        return;
    };

    let artifacts = BindingArtifacts::new(spec);

    if !artifacts.volumes.is_empty() {
        pod_spec
            .volumes
            .get_or_insert_with(Vec::new)
            .extend(artifacts.volumes.iter().cloned());
    }

    let mut bound_containers = 0usize;
    for container in containers_mut(pod_spec) {
        artifacts.inject_into(container);
        bound_containers += 1;
    }

    debug!(
        bound_containers,
        env_vars = artifacts.env.len(),
        volumes = artifacts.volumes.len(),
        mechanisms = ?artifacts.mechanisms,
        "applied Kafka binding to pod template"
    );
}

/// Removes every env var, volume and volume mount [`apply`] may have added to `template`.
///
/// Entries with other names are kept in their original order. A list which only contained
/// binding entries is removed entirely, lists which are already absent or empty are not
/// touched.
#[instrument(skip_all)]
pub fn remove(template: &mut PodTemplateSpec) {
    let Some(pod_spec) = template.spec.as_mut() else {
        return;
    };

    for container in containers_mut(pod_spec) {
        strip(&mut container.env, |env| ManagedEnvVar::is_managed(&env.name));
        strip(&mut container.volume_mounts, |mount| {
            KerberosFile::is_managed(&mount.name)
        });
    }

    strip(&mut pod_spec.volumes, |volume| {
        KerberosFile::is_managed(&volume.name)
    });
}

/// Init containers first, then the regular containers, both in declaration order.
fn containers_mut(pod_spec: &mut PodSpec) -> impl Iterator<Item = &mut Container> {
    pod_spec
        .init_containers
        .iter_mut()
        .flatten()
        .chain(pod_spec.containers.iter_mut())
}

fn strip<T>(entries: &mut Option<Vec<T>>, is_managed: impl Fn(&T) -> bool) {
    let Some(list) = entries.as_mut() else {
        return;
    };
    if list.is_empty() {
        return;
    }

    list.retain(|entry| !is_managed(entry));

    if list.is_empty() {
        *entries = None;
    }
}
