//! Utility functions for rendering the `KafkaBinding` CustomResourceDefinition as YAML
use std::{fs::File, io::Write, path::Path};

use kube::CustomResourceExt;
use serde::Serialize;
use snafu::{ResultExt, Snafu};

use crate::crd::KafkaBinding;

type Result<T, E = Error> = std::result::Result<T, E>;

/// Represents every error which can be encountered during YAML serialization.
#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to serialize YAML"))]
    SerializeYaml { source: serde_yaml::Error },

    #[snafu(display("failed to write YAML document separator"))]
    WriteDocumentSeparator { source: std::io::Error },

    #[snafu(display("failed to create YAML file {}", path.display()))]
    CreateFile {
        source: std::io::Error,
        path: std::path::PathBuf,
    },

    #[snafu(display("failed to parse bytes as valid UTF-8 string"))]
    ParseUtf8Bytes { source: std::string::FromUtf8Error },
}

/// Serializes `value` into `writer` as an explicit YAML document, with leading dashes (`---`).
pub fn serialize_to_explicit_document<T, W>(mut writer: W, value: &T) -> Result<()>
where
    T: Serialize,
    W: Write,
{
    writer
        .write_all(b"---\n")
        .context(WriteDocumentSeparatorSnafu)?;
    serde_yaml::to_writer(writer, value).context(SerializeYamlSnafu)
}

/// Generates the YAML schema of the `KafkaBinding` CustomResourceDefinition.
pub fn yaml_schema() -> Result<String> {
    let mut buffer = Vec::new();
    serialize_to_explicit_document(&mut buffer, &KafkaBinding::crd())?;
    String::from_utf8(buffer).context(ParseUtf8BytesSnafu)
}

/// Generates the YAML schema of the `KafkaBinding` CustomResourceDefinition and writes it to
/// the file at `path`.
pub fn write_yaml_schema(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).context(CreateFileSnafu { path })?;
    serialize_to_explicit_document(file, &KafkaBinding::crd())
}

/// Generates the YAML schema of the `KafkaBinding` CustomResourceDefinition and prints it to
/// [stdout](std::io::stdout).
pub fn print_yaml_schema() -> Result<()> {
    serialize_to_explicit_document(std::io::stdout().lock(), &KafkaBinding::crd())
}
