use k8s_openapi::api::core::v1::{
    Container, EnvVar, PodSpec, PodTemplateSpec, Volume, VolumeMount,
};
use kafka_binding::{
    binding::{self, BindingArtifacts, KerberosFile, ManagedEnvVar, Mechanism},
    builder::pod::env::{env_var_from_secret, env_var_from_value},
    crd::{
        KafkaAuthSpec, KafkaGssapiSpec, KafkaNetSpec, KafkaSaslSpec, KafkaTlsSpec,
        SecretValueFromSource,
    },
};
use rstest::*;

fn secret(name: &str, key: &str) -> SecretValueFromSource {
    SecretValueFromSource::from_secret_key(name, key)
}

fn sasl() -> KafkaSaslSpec {
    KafkaSaslSpec {
        enable: true,
        user: secret("s1", "u"),
        password: secret("s1", "p"),
        type_: secret("s1", "t"),
    }
}

fn tls() -> KafkaTlsSpec {
    KafkaTlsSpec {
        enable: true,
        cert: secret("tls", "tls.crt"),
        key: secret("tls", "tls.key"),
        ca_cert: secret("tls", "ca.crt"),
    }
}

fn gssapi() -> KafkaGssapiSpec {
    KafkaGssapiSpec {
        enable: true,
        keytab: secret("krb", "keytab"),
        config: secret("krb", "krb5.conf"),
        principal: secret("krb", "principal"),
        service: secret("krb", "service"),
        realm: secret("krb", "realm"),
        username: secret("krb", "username"),
        password: secret("krb", "password"),
    }
}

fn auth_spec(net: KafkaNetSpec) -> KafkaAuthSpec {
    KafkaAuthSpec {
        bootstrap_servers: vec!["b1:9092".to_string(), "b2:9092".to_string()],
        net,
    }
}

fn container(name: &str, env: Option<Vec<EnvVar>>) -> Container {
    Container {
        name: name.to_string(),
        env,
        ..Container::default()
    }
}

fn env_names(container: &Container) -> Vec<String> {
    container
        .env
        .iter()
        .flatten()
        .map(|env| env.name.clone())
        .collect()
}

fn all_containers(template: &PodTemplateSpec) -> Vec<&Container> {
    let pod_spec = template.spec.as_ref().expect("template has a pod spec");
    pod_spec
        .init_containers
        .iter()
        .flatten()
        .chain(&pod_spec.containers)
        .collect()
}

/// A template with an init container, a bare container and a container with foreign env
/// vars, volumes and mounts.
#[fixture]
fn template() -> PodTemplateSpec {
    let mut app = container(
        "app",
        Some(vec![
            env_var_from_value("LOG_LEVEL", "debug"),
            env_var_from_secret("DB_PASSWORD", "db", "password"),
        ]),
    );
    app.volume_mounts = Some(vec![VolumeMount {
        name: "data".to_string(),
        mount_path: "/data".to_string(),
        ..VolumeMount::default()
    }]);

    PodTemplateSpec {
        spec: Some(PodSpec {
            init_containers: Some(vec![container("init", None)]),
            containers: vec![app, container("sidecar", Some(vec![]))],
            volumes: Some(vec![Volume {
                name: "data".to_string(),
                ..Volume::default()
            }]),
            ..PodSpec::default()
        }),
        ..PodTemplateSpec::default()
    }
}

fn specs() -> Vec<KafkaAuthSpec> {
    vec![
        auth_spec(KafkaNetSpec::default()),
        auth_spec(KafkaNetSpec {
            sasl: sasl(),
            ..KafkaNetSpec::default()
        }),
        auth_spec(KafkaNetSpec {
            tls: tls(),
            ..KafkaNetSpec::default()
        }),
        auth_spec(KafkaNetSpec {
            gssapi: gssapi(),
            ..KafkaNetSpec::default()
        }),
        auth_spec(KafkaNetSpec {
            sasl: sasl(),
            tls: tls(),
            gssapi: gssapi(),
        }),
    ]
}

#[rstest]
fn apply_is_idempotent(template: PodTemplateSpec) {
    for spec in specs() {
        let mut once = template.clone();
        binding::apply(&spec, &mut once);

        let mut twice = once.clone();
        binding::apply(&spec, &mut twice);

        assert_eq!(once, twice, "applying twice differs for {spec:?}");
    }
}

#[rstest]
fn apply_replaces_previous_binding(template: PodTemplateSpec) {
    let full = auth_spec(KafkaNetSpec {
        sasl: sasl(),
        tls: tls(),
        gssapi: gssapi(),
    });
    let plaintext = auth_spec(KafkaNetSpec::default());

    let mut updated = template.clone();
    binding::apply(&full, &mut updated);
    binding::apply(&plaintext, &mut updated);

    let mut expected = template;
    binding::apply(&plaintext, &mut expected);

    assert_eq!(updated, expected);
}

#[rstest]
fn remove_restores_original_template(template: PodTemplateSpec) {
    for spec in specs() {
        let mut bound = template.clone();
        binding::apply(&spec, &mut bound);
        binding::remove(&mut bound);

        let original = all_containers(&template);
        let restored = all_containers(&bound);
        for (original, restored) in original.iter().zip(&restored) {
            assert_eq!(
                original.env.clone().unwrap_or_default(),
                restored.env.clone().unwrap_or_default()
            );
            assert_eq!(original.volume_mounts, restored.volume_mounts);
        }

        let volumes = |template: &PodTemplateSpec| {
            template
                .spec
                .as_ref()
                .and_then(|pod_spec| pod_spec.volumes.clone())
        };
        assert_eq!(volumes(&bound), volumes(&template));
    }
}

#[rstest]
fn every_container_receives_the_same_env(template: PodTemplateSpec) {
    let spec = auth_spec(KafkaNetSpec {
        sasl: sasl(),
        gssapi: gssapi(),
        ..KafkaNetSpec::default()
    });
    let mut bound = template;
    binding::apply(&spec, &mut bound);

    let injected: Vec<Vec<String>> = all_containers(&bound)
        .into_iter()
        .map(|container| {
            env_names(container)
                .into_iter()
                .filter(|name| ManagedEnvVar::is_managed(name))
                .collect()
        })
        .collect();

    assert_eq!(injected.len(), 3);
    assert!(injected.windows(2).all(|pair| pair[0] == pair[1]));
}

#[rstest]
fn mechanisms_are_orthogonal(template: PodTemplateSpec) {
    let managed_env = |net: KafkaNetSpec| {
        let mut bound = template.clone();
        binding::apply(&auth_spec(net), &mut bound);
        all_containers(&bound)[0].env.clone().unwrap_or_default()
    };

    let sasl_only = managed_env(KafkaNetSpec {
        sasl: sasl(),
        ..KafkaNetSpec::default()
    });
    let sasl_and_tls = managed_env(KafkaNetSpec {
        sasl: sasl(),
        tls: tls(),
        ..KafkaNetSpec::default()
    });

    let mechanisms = |env: &[EnvVar]| -> Vec<Mechanism> {
        env.iter()
            .filter_map(|env| env.name.parse::<ManagedEnvVar>().ok())
            .map(ManagedEnvVar::mechanism)
            .collect()
    };
    assert_eq!(mechanisms(&sasl_only), [
        Mechanism::Bootstrap,
        Mechanism::Sasl,
        Mechanism::Sasl,
        Mechanism::Sasl,
        Mechanism::Sasl,
    ]);

    // Enabling TLS appends exactly the TLS slice and leaves the SASL slice as it was.
    assert_eq!(sasl_and_tls[..sasl_only.len()], sasl_only[..]);
    assert_eq!(
        sasl_and_tls[sasl_only.len()..]
            .iter()
            .map(|env| env.name.as_str())
            .collect::<Vec<_>>(),
        [
            "KAFKA_NET_TLS_ENABLE",
            "KAFKA_NET_TLS_CERT",
            "KAFKA_NET_TLS_KEY",
            "KAFKA_NET_TLS_CA_CERT",
        ]
    );
}

#[rstest]
fn missing_keytab_only_drops_keytab_slice(template: PodTemplateSpec) {
    let spec = auth_spec(KafkaNetSpec {
        gssapi: KafkaGssapiSpec {
            keytab: SecretValueFromSource::default(),
            ..gssapi()
        },
        ..KafkaNetSpec::default()
    });
    let mut bound = template;
    binding::apply(&spec, &mut bound);

    let pod_spec = bound.spec.as_ref().expect("template has a pod spec");
    let volume_names: Vec<&str> = pod_spec
        .volumes
        .iter()
        .flatten()
        .map(|volume| volume.name.as_str())
        .collect();
    assert_eq!(volume_names, ["data", "krb5.conf"]);

    for container in all_containers(&bound) {
        let names = env_names(container);
        assert!(!names.contains(&"KAFKA_NET_SASL_KERBEROS_KEYTAB_FILE".to_string()));
        assert!(names.contains(&"KAFKA_NET_SASL_KERBEROS_CONFIG_FILE".to_string()));

        let mounts: Vec<&str> = container
            .volume_mounts
            .iter()
            .flatten()
            .map(|mount| mount.name.as_str())
            .filter(|name| KerberosFile::is_managed(name))
            .collect();
        assert_eq!(mounts, ["krb5.conf"]);
    }
}

#[test]
fn full_kerberos_env_order() {
    let artifacts = BindingArtifacts::new(&auth_spec(KafkaNetSpec {
        gssapi: gssapi(),
        ..KafkaNetSpec::default()
    }));

    assert_eq!(artifacts.env, vec![
        env_var_from_value("KAFKA_BOOTSTRAP_SERVERS", "b1:9092,b2:9092"),
        env_var_from_value("KAFKA_NET_SASL_KERBEROS_KEYTAB_FILE", "/etc/krb5.keytab"),
        env_var_from_value("KAFKA_NET_SASL_KERBEROS_CONFIG_FILE", "/etc/krb5.conf"),
        env_var_from_value("KAFKA_NET_SASL_KERBEROS_ENABLE", "true"),
        env_var_from_secret("KAFKA_NET_SASL_KERBEROS_PRINCIPAL", "krb", "principal"),
        env_var_from_secret("KAFKA_NET_SASL_KERBEROS_SERVICE", "krb", "service"),
        env_var_from_secret("KAFKA_NET_SASL_KERBEROS_REALM", "krb", "realm"),
        env_var_from_secret("KAFKA_NET_SASL_KERBEROS_USERNAME", "krb", "username"),
        env_var_from_secret("KAFKA_NET_SASL_KERBEROS_PASSWORD", "krb", "password"),
    ]);
}

#[test]
fn all_mechanisms_env_order() {
    let spec = auth_spec(KafkaNetSpec {
        sasl: sasl(),
        tls: tls(),
        gssapi: gssapi(),
    });
    let mut template = PodTemplateSpec {
        spec: Some(PodSpec {
            containers: vec![container("main", None)],
            ..PodSpec::default()
        }),
        ..PodTemplateSpec::default()
    };

    binding::apply(&spec, &mut template);

    // Brokers, then SASL, then Kerberos, then TLS.
    assert_eq!(all_containers(&template)[0].env, Some(vec![
        env_var_from_value("KAFKA_BOOTSTRAP_SERVERS", "b1:9092,b2:9092"),
        env_var_from_value("KAFKA_NET_SASL_ENABLE", "true"),
        env_var_from_secret("KAFKA_NET_SASL_USER", "s1", "u"),
        env_var_from_secret("KAFKA_NET_SASL_PASSWORD", "s1", "p"),
        env_var_from_secret("KAFKA_NET_SASL_TYPE", "s1", "t"),
        env_var_from_value("KAFKA_NET_SASL_KERBEROS_KEYTAB_FILE", "/etc/krb5.keytab"),
        env_var_from_value("KAFKA_NET_SASL_KERBEROS_CONFIG_FILE", "/etc/krb5.conf"),
        env_var_from_value("KAFKA_NET_SASL_KERBEROS_ENABLE", "true"),
        env_var_from_secret("KAFKA_NET_SASL_KERBEROS_PRINCIPAL", "krb", "principal"),
        env_var_from_secret("KAFKA_NET_SASL_KERBEROS_SERVICE", "krb", "service"),
        env_var_from_secret("KAFKA_NET_SASL_KERBEROS_REALM", "krb", "realm"),
        env_var_from_secret("KAFKA_NET_SASL_KERBEROS_USERNAME", "krb", "username"),
        env_var_from_secret("KAFKA_NET_SASL_KERBEROS_PASSWORD", "krb", "password"),
        env_var_from_value("KAFKA_NET_TLS_ENABLE", "true"),
        env_var_from_secret("KAFKA_NET_TLS_CERT", "tls", "tls.crt"),
        env_var_from_secret("KAFKA_NET_TLS_KEY", "tls", "tls.key"),
        env_var_from_secret("KAFKA_NET_TLS_CA_CERT", "tls", "ca.crt"),
    ]));
}

#[test]
fn emptied_lists_become_absent() {
    let spec = auth_spec(KafkaNetSpec {
        gssapi: gssapi(),
        ..KafkaNetSpec::default()
    });
    let mut template = PodTemplateSpec {
        spec: Some(PodSpec {
            containers: vec![Container {
                volume_mounts: Some(vec![]),
                ..container("main", Some(vec![]))
            }],
            volumes: Some(vec![]),
            ..PodSpec::default()
        }),
        ..PodTemplateSpec::default()
    };

    binding::apply(&spec, &mut template);
    binding::remove(&mut template);

    // An empty list holding only binding entries does not come back as an empty list.
    let pod_spec = template.spec.expect("template has a pod spec");
    assert_eq!(pod_spec.volumes, None);
    assert_eq!(pod_spec.containers[0].env, None);
    assert_eq!(pod_spec.containers[0].volume_mounts, None);
}

#[rstest]
fn remove_only_touches_managed_entries(template: PodTemplateSpec) {
    let mut template = template;
    if let Some(pod_spec) = template.spec.as_mut() {
        pod_spec.containers[0].env = Some(vec![
            env_var_from_value("KAFKA_NET_TLS_ENABLE", "true"),
            env_var_from_value("LOG_LEVEL", "debug"),
            env_var_from_value("KAFKA_BOOTSTRAP_SERVERS", "old:9092"),
            env_var_from_value("KAFKA_TOPIC", "events"),
            env_var_from_value("kafka_bootstrap_servers", "lowercase"),
        ]);
    }

    binding::remove(&mut template);

    assert_eq!(env_names(all_containers(&template)[1]), [
        "LOG_LEVEL",
        "KAFKA_TOPIC",
        "kafka_bootstrap_servers",
    ]);
}

#[test]
fn sasl_scenario() {
    let spec = auth_spec(KafkaNetSpec {
        sasl: sasl(),
        ..KafkaNetSpec::default()
    });
    let mut template = PodTemplateSpec {
        spec: Some(PodSpec {
            containers: vec![container("main", None)],
            ..PodSpec::default()
        }),
        ..PodTemplateSpec::default()
    };

    binding::apply(&spec, &mut template);
    assert_eq!(all_containers(&template)[0].env, Some(vec![
        env_var_from_value("KAFKA_BOOTSTRAP_SERVERS", "b1:9092,b2:9092"),
        env_var_from_value("KAFKA_NET_SASL_ENABLE", "true"),
        env_var_from_secret("KAFKA_NET_SASL_USER", "s1", "u"),
        env_var_from_secret("KAFKA_NET_SASL_PASSWORD", "s1", "p"),
        env_var_from_secret("KAFKA_NET_SASL_TYPE", "s1", "t"),
    ]));

    binding::remove(&mut template);
    assert_eq!(
        all_containers(&template)[0].env.clone().unwrap_or_default(),
        Vec::<EnvVar>::new()
    );
}
