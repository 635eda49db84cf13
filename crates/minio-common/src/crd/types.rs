//! Supporting types for the MinIOInstance spec
//!
//! Zones, certificate sources, and KES settings, plus the closed enumerations
//! derived from them that the StatefulSet compiler branches on.

use k8s_openapi::api::core::v1::LocalObjectReference;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// =============================================================================
// Topology
// =============================================================================

/// A named group of MinIO servers
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    /// Zone name, also used as the emptyDir volume name for ephemeral storage
    pub name: String,

    /// Number of MinIO servers in this zone
    pub servers: i32,
}

impl Zone {
    /// Create a zone with the given name and server count
    pub fn new(name: impl Into<String>, servers: i32) -> Self {
        Self {
            name: name.into(),
            servers,
        }
    }
}

// =============================================================================
// Certificates
// =============================================================================

/// Secret type written by `kubectl create secret tls`
pub const KUBERNETES_TLS_SECRET_TYPE: &str = "kubernetes.io/tls";

/// Secret type written by cert-manager v1alpha2 Certificates
pub const CERT_MANAGER_SECRET_TYPE: &str = "cert-manager.io/v1alpha2";

/// Reference to a user-supplied secret holding the server key pair
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExternalCertSecret {
    /// Name of the secret in the instance namespace
    pub name: String,

    /// Secret type, selects the key names inside the secret
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
}

impl ExternalCertSecret {
    /// Key naming convention declared by this secret
    pub fn format(&self) -> CertificateFormat {
        CertificateFormat::from_secret_type(self.type_.as_deref())
    }
}

/// File MinIO loads its public certificate from
pub const PUBLIC_CERT_FILE: &str = "public.crt";

/// File MinIO loads its private key from
pub const PRIVATE_KEY_FILE: &str = "private.key";

/// File MinIO trusts as a CA certificate
pub const CA_CERT_FILE: &str = "CAs/public.crt";

/// Key naming convention of a certificate secret.
///
/// Each format maps secret keys onto the same three files MinIO expects
/// under its certs directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CertificateFormat {
    /// `public.crt` / `private.key`, used by operator-generated secrets
    Canonical,
    /// `tls.crt` / `tls.key` (`kubernetes.io/tls`)
    KubernetesTls,
    /// `tls.crt` / `tls.key` / `ca.crt` (`cert-manager.io/v1alpha2`)
    CertManager,
}

impl CertificateFormat {
    /// Determine the format from a Kubernetes secret type.
    ///
    /// Unknown or missing types use the canonical key names.
    pub fn from_secret_type(secret_type: Option<&str>) -> Self {
        match secret_type {
            Some(KUBERNETES_TLS_SECRET_TYPE) => Self::KubernetesTls,
            Some(CERT_MANAGER_SECRET_TYPE) => Self::CertManager,
            _ => Self::Canonical,
        }
    }

    /// `(secret key, projected file)` pairs for this format
    pub fn key_paths(self) -> [(&'static str, &'static str); 3] {
        match self {
            Self::Canonical => [
                ("public.crt", PUBLIC_CERT_FILE),
                ("private.key", PRIVATE_KEY_FILE),
                ("public.crt", CA_CERT_FILE),
            ],
            Self::KubernetesTls => [
                ("tls.crt", PUBLIC_CERT_FILE),
                ("tls.key", PRIVATE_KEY_FILE),
                ("tls.crt", CA_CERT_FILE),
            ],
            Self::CertManager => [
                ("tls.crt", PUBLIC_CERT_FILE),
                ("tls.key", PRIVATE_KEY_FILE),
                ("ca.crt", CA_CERT_FILE),
            ],
        }
    }
}

/// How the MinIO servers obtain their TLS certificate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CertificateMode<'a> {
    /// Plain HTTP, no certificate material
    None,
    /// Operator-generated certificate stored in `<name>-tls`
    SelfSigned,
    /// User-supplied certificate secret
    External(&'a ExternalCertSecret),
}

impl CertificateMode<'_> {
    /// Whether certificate material must be mounted into the pods
    pub fn is_required(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Key naming convention of the primary certificate secret
    pub fn format(&self) -> CertificateFormat {
        match self {
            Self::External(secret) => secret.format(),
            Self::None | Self::SelfSigned => CertificateFormat::Canonical,
        }
    }
}

// =============================================================================
// KES
// =============================================================================

/// KES (key encryption service) integration for server-side encryption
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KesConfig {
    /// KES server image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Number of KES replicas
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,

    /// Name of the master key MinIO requests from KES
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_name: Option<String>,

    /// Secret holding the KES server configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<LocalObjectReference>,
}
