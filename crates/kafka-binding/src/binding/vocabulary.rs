//! The fixed set of names a binding writes into a pod template.
//!
//! Injection can only emit [`ManagedEnvVar`]s and [`KerberosFile`] volumes, and removal strips
//! exactly the names these enums parse from. Both directions share this vocabulary, so
//! nothing outside of it is ever touched.

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Directory the Kerberos files are mounted into.
pub const KERBEROS_MOUNT_DIR: &str = "/etc/";

/// Literal value of the `*_ENABLE` flags.
pub const ENABLED: &str = "true";

/// A connection mechanism, which can be switched on and off independently of the others.
///
/// `Bootstrap` is the broker list every binding injects, regardless of the other mechanisms.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum Mechanism {
    Bootstrap,
    Sasl,
    Kerberos,
    Tls,
}

/// Every environment variable a binding injects into a container.
#[derive(Clone, Copy, Debug, Display, EnumIter, EnumString, Eq, Hash, IntoStaticStr, PartialEq)]
pub enum ManagedEnvVar {
    #[strum(serialize = "KAFKA_BOOTSTRAP_SERVERS")]
    BootstrapServers,

    #[strum(serialize = "KAFKA_NET_SASL_ENABLE")]
    SaslEnable,
    #[strum(serialize = "KAFKA_NET_SASL_USER")]
    SaslUser,
    #[strum(serialize = "KAFKA_NET_SASL_PASSWORD")]
    SaslPassword,
    #[strum(serialize = "KAFKA_NET_SASL_TYPE")]
    SaslType,

    #[strum(serialize = "KAFKA_NET_SASL_KERBEROS_ENABLE")]
    KerberosEnable,
    #[strum(serialize = "KAFKA_NET_SASL_KERBEROS_KEYTAB_FILE")]
    KerberosKeytabFile,
    #[strum(serialize = "KAFKA_NET_SASL_KERBEROS_CONFIG_FILE")]
    KerberosConfigFile,
    #[strum(serialize = "KAFKA_NET_SASL_KERBEROS_PRINCIPAL")]
    KerberosPrincipal,
    #[strum(serialize = "KAFKA_NET_SASL_KERBEROS_SERVICE")]
    KerberosService,
    #[strum(serialize = "KAFKA_NET_SASL_KERBEROS_REALM")]
    KerberosRealm,
    #[strum(serialize = "KAFKA_NET_SASL_KERBEROS_USERNAME")]
    KerberosUsername,
    #[strum(serialize = "KAFKA_NET_SASL_KERBEROS_PASSWORD")]
    KerberosPassword,

    #[strum(serialize = "KAFKA_NET_TLS_ENABLE")]
    TlsEnable,
    #[strum(serialize = "KAFKA_NET_TLS_CERT")]
    TlsCert,
    #[strum(serialize = "KAFKA_NET_TLS_KEY")]
    TlsKey,
    #[strum(serialize = "KAFKA_NET_TLS_CA_CERT")]
    TlsCaCert,
}

impl ManagedEnvVar {
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    pub const fn mechanism(self) -> Mechanism {
        match self {
            Self::BootstrapServers => Mechanism::Bootstrap,
            Self::SaslEnable | Self::SaslUser | Self::SaslPassword | Self::SaslType => {
                Mechanism::Sasl
            }
            Self::KerberosEnable
            | Self::KerberosKeytabFile
            | Self::KerberosConfigFile
            | Self::KerberosPrincipal
            | Self::KerberosService
            | Self::KerberosRealm
            | Self::KerberosUsername
            | Self::KerberosPassword => Mechanism::Kerberos,
            Self::TlsEnable | Self::TlsCert | Self::TlsKey | Self::TlsCaCert => Mechanism::Tls,
        }
    }

    /// Whether an environment variable called `name` is owned by the binding.
    pub fn is_managed(name: &str) -> bool {
        name.parse::<Self>().is_ok()
    }
}

/// A Kerberos file projected from a Secret into every container.
///
/// The volume, the volume mount and the file itself all carry the same name.
#[derive(Clone, Copy, Debug, Display, EnumIter, EnumString, Eq, Hash, IntoStaticStr, PartialEq)]
pub enum KerberosFile {
    #[strum(serialize = "krb5.keytab")]
    Keytab,
    #[strum(serialize = "krb5.conf")]
    Config,
}

impl KerberosFile {
    pub fn file_name(self) -> &'static str {
        self.into()
    }

    pub fn volume_name(self) -> &'static str {
        self.file_name()
    }

    /// Absolute path of the file inside the containers.
    pub fn path(self) -> String {
        format!(
            "{dir}/{file}",
            dir = KERBEROS_MOUNT_DIR.trim_end_matches('/'),
            file = self.file_name()
        )
    }

    /// The environment variable pointing the client at [`Self::path`].
    pub const fn path_env_var(self) -> ManagedEnvVar {
        match self {
            Self::Keytab => ManagedEnvVar::KerberosKeytabFile,
            Self::Config => ManagedEnvVar::KerberosConfigFile,
        }
    }

    /// Whether a volume or volume mount called `name` is owned by the binding.
    pub fn is_managed(name: &str) -> bool {
        name.parse::<Self>().is_ok()
    }
}
