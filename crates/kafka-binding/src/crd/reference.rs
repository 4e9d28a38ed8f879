use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Points at the workload(s) a binding applies to, either by `name` or by label `selector`.
#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    /// API version of the referent, e.g. `apps/v1`.
    pub api_version: String,

    /// Kind of the referent, e.g. `Deployment`.
    pub kind: String,

    /// Namespace of the referent. Defaults to the namespace of the binding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Name of the referent. Mutually exclusive with `selector`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Label selector matching the referents. Mutually exclusive with `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<LabelSelector>,
}

impl Reference {
    /// Returns the namespace of the referent, falling back to the namespace of the binding.
    pub fn namespace_or<'a>(&'a self, binding_namespace: &'a str) -> &'a str {
        self.namespace.as_deref().unwrap_or(binding_namespace)
    }

    /// Whether the reference names exactly one object instead of selecting by labels.
    pub fn is_named(&self) -> bool {
        self.name.is_some()
    }
}
