//! Custom Resource Definitions for the MinIO operator

mod instance;
mod types;
mod validation;

pub use instance::{MinIOInstance, MinIOInstanceSpec};
pub use types::{
    CertificateFormat, CertificateMode, ExternalCertSecret, KesConfig, Zone, CA_CERT_FILE,
    CERT_MANAGER_SECRET_TYPE, KUBERNETES_TLS_SECRET_TYPE, PRIVATE_KEY_FILE, PUBLIC_CERT_FILE,
};
