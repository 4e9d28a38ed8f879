use k8s_openapi::api::core::v1::{EnvVar, EnvVarSource, SecretKeySelector};

/// Builds an [`EnvVar`] carrying a literal value.
pub fn env_var_from_value(env_var_name: impl Into<String>, value: impl Into<String>) -> EnvVar {
    EnvVar {
        name: env_var_name.into(),
        value: Some(value.into()),
        ..Default::default()
    }
}

/// Builds an [`EnvVar`] which Kubernetes resolves from the given secret key.
///
/// The selector is copied as is, so an `optional` flag set on it is preserved.
pub fn env_var_from_secret_key_selector(
    env_var_name: impl Into<String>,
    selector: &SecretKeySelector,
) -> EnvVar {
    EnvVar {
        name: env_var_name.into(),
        value_from: Some(EnvVarSource {
            secret_key_ref: Some(selector.clone()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn env_var_from_secret(
    env_var_name: impl Into<String>,
    secret_name: impl Into<String>,
    secret_key: impl Into<String>,
) -> EnvVar {
    env_var_from_secret_key_selector(
        env_var_name,
        &SecretKeySelector {
            name: secret_name.into(),
            key: secret_key.into(),
            ..Default::default()
        },
    )
}
