use k8s_openapi::{apimachinery::pkg::apis::meta::v1::Time, jiff::Timestamp};
use schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingCondition {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Last time the condition transitioned from one status to another.
    pub last_transition_time: Option<Time>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// A human readable message indicating details about the transition.
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// The reason for the condition's last transition.
    pub reason: Option<String>,
    /// Status of the condition, one of True, False, Unknown.
    pub status: BindingConditionStatus,
    /// Type of binding condition.
    #[serde(rename = "type")]
    pub type_: BindingConditionType,
}

impl BindingCondition {
    pub fn new(type_: BindingConditionType, status: BindingConditionStatus) -> Self {
        Self {
            last_transition_time: Some(now()),
            message: None,
            reason: None,
            status,
            type_,
        }
    }

    /// Moves the condition to `status`.
    ///
    /// The transition time is only bumped if the status actually changes, reason and message
    /// always reflect the latest call.
    pub(crate) fn transition(
        &mut self,
        status: BindingConditionStatus,
        reason: Option<String>,
        message: Option<String>,
    ) {
        if self.status != status {
            self.status = status;
            self.last_transition_time = Some(now());
        }
        self.reason = reason;
        self.message = message;
    }
}

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub enum BindingConditionType {
    #[default]
    /// Ready indicates that the binding has been applied to its subject and the subject's
    /// containers receive the Kafka connection settings.
    Ready,
}

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub enum BindingConditionStatus {
    /// True means a resource is in the condition.
    True,
    /// False means a resource is not in the condition.
    False,
    #[default]
    /// Unknown means the condition has not been evaluated yet.
    Unknown,
}

fn now() -> Time {
    Time(Timestamp::now())
}
