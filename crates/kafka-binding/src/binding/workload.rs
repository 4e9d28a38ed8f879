use k8s_openapi::api::{
    apps::v1::{DaemonSet, Deployment, ReplicaSet, StatefulSet},
    batch::v1::{CronJob, Job},
    core::v1::PodTemplateSpec,
};

/// A workload which runs its containers from a [`PodTemplateSpec`].
///
/// This is what a binding subject usually points at. Returns [`None`] if the workload has no
/// spec (or no template) yet.
pub trait WithPodTemplate {
    fn pod_template_mut(&mut self) -> Option<&mut PodTemplateSpec>;
}

impl WithPodTemplate for PodTemplateSpec {
    fn pod_template_mut(&mut self) -> Option<&mut PodTemplateSpec> {
        Some(self)
    }
}

impl WithPodTemplate for Deployment {
    fn pod_template_mut(&mut self) -> Option<&mut PodTemplateSpec> {
        self.spec.as_mut().map(|spec| &mut spec.template)
    }
}

impl WithPodTemplate for StatefulSet {
    fn pod_template_mut(&mut self) -> Option<&mut PodTemplateSpec> {
        self.spec.as_mut().map(|spec| &mut spec.template)
    }
}

impl WithPodTemplate for DaemonSet {
    fn pod_template_mut(&mut self) -> Option<&mut PodTemplateSpec> {
        self.spec.as_mut().map(|spec| &mut spec.template)
    }
}

impl WithPodTemplate for ReplicaSet {
    fn pod_template_mut(&mut self) -> Option<&mut PodTemplateSpec> {
        self.spec.as_mut().and_then(|spec| spec.template.as_mut())
    }
}

impl WithPodTemplate for Job {
    fn pod_template_mut(&mut self) -> Option<&mut PodTemplateSpec> {
        self.spec.as_mut().map(|spec| &mut spec.template)
    }
}

impl WithPodTemplate for CronJob {
    fn pod_template_mut(&mut self) -> Option<&mut PodTemplateSpec> {
        self.spec
            .as_mut()
            .and_then(|spec| spec.job_template.spec.as_mut())
            .map(|job_spec| &mut job_spec.template)
    }
}
