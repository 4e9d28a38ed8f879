use k8s_openapi::api::core::v1::{KeyToPath, SecretVolumeSource, Volume, VolumeMount};

/// A builder to build secret backed [`Volume`] objects.
///
/// Only the keys added with [`VolumeBuilder::with_item`] are projected into the volume, every
/// other key of the secret stays hidden from the container.
#[derive(Clone, Debug, Default)]
pub struct VolumeBuilder {
    name: String,
    secret_name: String,
    items: Vec<KeyToPath>,
}

impl VolumeBuilder {
    pub fn new(name: impl Into<String>, secret_name: impl Into<String>) -> VolumeBuilder {
        VolumeBuilder {
            name: name.into(),
            secret_name: secret_name.into(),
            ..VolumeBuilder::default()
        }
    }

    /// Projects the secret key `key` to the file `path`, relative to the mount point.
    pub fn with_item(&mut self, key: impl Into<String>, path: impl Into<String>) -> &mut Self {
        self.items.push(KeyToPath {
            key: key.into(),
            path: path.into(),
            ..KeyToPath::default()
        });
        self
    }

    /// Consumes the Builder and returns a constructed Volume
    pub fn build(&self) -> Volume {
        Volume {
            name: self.name.clone(),
            secret: Some(SecretVolumeSource {
                secret_name: Some(self.secret_name.clone()),
                items: (!self.items.is_empty()).then(|| self.items.clone()),
                ..SecretVolumeSource::default()
            }),
            ..Volume::default()
        }
    }
}

/// A builder to build [`VolumeMount`] objects.
#[derive(Clone, Debug, Default)]
pub struct VolumeMountBuilder {
    mount_path: String,
    name: String,
}

impl VolumeMountBuilder {
    pub fn new(name: impl Into<String>, mount_path: impl Into<String>) -> VolumeMountBuilder {
        VolumeMountBuilder {
            mount_path: mount_path.into(),
            name: name.into(),
            ..VolumeMountBuilder::default()
        }
    }

    /// Consumes the Builder and returns a constructed VolumeMount
    pub fn build(&self) -> VolumeMount {
        VolumeMount {
            mount_path: self.mount_path.clone(),
            name: self.name.clone(),
            ..VolumeMount::default()
        }
    }
}
