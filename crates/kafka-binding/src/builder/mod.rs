//! This module provides builders for the (Kubernetes) objects a binding injects into a pod
//! template.
pub mod pod;
