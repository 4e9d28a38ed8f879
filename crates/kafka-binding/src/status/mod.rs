//! The status of a `KafkaBinding`.
//!
//! A binding carries a single `Ready` condition. The reconciler initializes it on first
//! sight of the binding and flips it after every attempt to bind the subject.

use schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use self::condition::{BindingCondition, BindingConditionStatus, BindingConditionType};

pub mod condition;

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KafkaBindingStatus {
    /// The generation of the binding most recently observed by the reconciler.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,

    #[serde(default)]
    pub conditions: Vec<BindingCondition>,
}

impl KafkaBindingStatus {
    /// Adds every missing condition with status `Unknown`. Existing conditions are kept.
    pub fn initialize_conditions(&mut self) {
        if self.condition(BindingConditionType::Ready).is_none() {
            self.conditions.push(BindingCondition::new(
                BindingConditionType::Ready,
                BindingConditionStatus::Unknown,
            ));
        }
    }

    /// Marks the binding `Ready`.
    pub fn mark_binding_available(&mut self) {
        self.set_ready(BindingConditionStatus::True, None, None);
    }

    /// Marks the binding as not `Ready`, e.g. because the subject could not be found.
    pub fn mark_binding_unavailable(
        &mut self,
        reason: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.set_ready(
            BindingConditionStatus::False,
            Some(reason.into()),
            Some(message.into()),
        );
    }

    pub fn set_observed_generation(&mut self, generation: i64) {
        self.observed_generation = Some(generation);
    }

    pub fn is_ready(&self) -> bool {
        self.condition(BindingConditionType::Ready)
            .is_some_and(|condition| condition.status == BindingConditionStatus::True)
    }

    pub fn condition(&self, type_: BindingConditionType) -> Option<&BindingCondition> {
        self.conditions
            .iter()
            .find(|condition| condition.type_ == type_)
    }

    fn set_ready(
        &mut self,
        status: BindingConditionStatus,
        reason: Option<String>,
        message: Option<String>,
    ) {
        debug!(?status, ?reason, "setting Ready condition of binding");

        match self
            .conditions
            .iter_mut()
            .find(|condition| condition.type_ == BindingConditionType::Ready)
        {
            Some(condition) => condition.transition(status, reason, message),
            None => {
                let mut condition = BindingCondition::new(BindingConditionType::Ready, status);
                condition.reason = reason;
                condition.message = message;
                self.conditions.push(condition);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::*;

    use super::*;

    #[fixture]
    fn initialized() -> KafkaBindingStatus {
        let mut status = KafkaBindingStatus::default();
        status.initialize_conditions();
        status
    }

    #[rstest]
    fn initialize_adds_unknown_ready_condition(initialized: KafkaBindingStatus) {
        assert_eq!(initialized.conditions.len(), 1);
        assert_eq!(
            initialized
                .condition(BindingConditionType::Ready)
                .map(|condition| condition.status),
            Some(BindingConditionStatus::Unknown)
        );
        assert!(!initialized.is_ready());
    }

    #[rstest]
    fn initialize_keeps_existing_condition(mut initialized: KafkaBindingStatus) {
        initialized.mark_binding_available();
        initialized.initialize_conditions();

        assert_eq!(initialized.conditions.len(), 1);
        assert!(initialized.is_ready());
    }

    #[rstest]
    fn available_clears_reason(mut initialized: KafkaBindingStatus) {
        initialized.mark_binding_unavailable("SubjectMissing", "no Deployment named consumer");
        assert!(!initialized.is_ready());

        let ready = initialized
            .condition(BindingConditionType::Ready)
            .expect("Ready condition must be present");
        assert_eq!(ready.status, BindingConditionStatus::False);
        assert_eq!(ready.reason.as_deref(), Some("SubjectMissing"));

        initialized.mark_binding_available();
        let ready = initialized
            .condition(BindingConditionType::Ready)
            .expect("Ready condition must be present");
        assert_eq!(ready.status, BindingConditionStatus::True);
        assert_eq!(ready.reason, None);
        assert_eq!(ready.message, None);
    }

    #[test]
    fn mark_without_initialize() {
        let mut status = KafkaBindingStatus::default();
        status.mark_binding_unavailable("BindingFailed", "conflict while updating Deployment");
        status.set_observed_generation(3);

        assert_eq!(status.conditions.len(), 1);
        assert_eq!(status.observed_generation, Some(3));
        assert!(!status.is_ready());
    }
}
