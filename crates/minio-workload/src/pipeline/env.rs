//! MinIO container environment
//!
//! User entries come first, then credential references, then KES settings.
//! Credentials are always `secretKeyRef`s so no key material ever lands in
//! the StatefulSet itself.

use k8s_openapi::api::core::v1::{EnvVar, EnvVarSource, SecretKeySelector};
use kube::ResourceExt;
use minio_common::crd::MinIOInstance;
use minio_common::{OperatorConfig, MINIO_CERTS_PATH};
use tracing::debug;

/// Access key variable read by the MinIO server
pub const ACCESS_KEY_ENV: &str = "MINIO_ACCESS_KEY";
/// Secret key variable read by the MinIO server
pub const SECRET_KEY_ENV: &str = "MINIO_SECRET_KEY";
/// Key holding the access key inside the credential secret
pub const ACCESS_KEY_SECRET_KEY: &str = "accesskey";
/// Key holding the secret key inside the credential secret
pub const SECRET_KEY_SECRET_KEY: &str = "secretkey";

/// KES endpoint variable
pub const KES_ENDPOINT_ENV: &str = "MINIO_KMS_KES_ENDPOINT";
/// Client certificate MinIO presents to KES
pub const KES_CERT_FILE_ENV: &str = "MINIO_KMS_KES_CERT_FILE";
/// Client key MinIO presents to KES
pub const KES_KEY_FILE_ENV: &str = "MINIO_KMS_KES_KEY_FILE";
/// CA MinIO trusts for the KES server certificate
pub const KES_CA_PATH_ENV: &str = "MINIO_KMS_KES_CA_PATH";
/// Master key name requested from KES
pub const KES_KEY_NAME_ENV: &str = "MINIO_KMS_KES_KEY_NAME";

/// Compile the MinIO container environment.
pub fn compile(instance: &MinIOInstance, config: &OperatorConfig) -> Vec<EnvVar> {
    let mut env = instance.spec.env.clone();

    if instance.has_creds_secret() {
        let secret = instance
            .spec
            .creds_secret
            .as_ref()
            .map(|s| s.name.as_str())
            .unwrap_or_default();
        env.push(secret_env(ACCESS_KEY_ENV, secret, ACCESS_KEY_SECRET_KEY));
        env.push(secret_env(SECRET_KEY_ENV, secret, SECRET_KEY_SECRET_KEY));
    }

    if instance.has_kes_enabled() {
        env.extend([
            value_env(
                KES_ENDPOINT_ENV,
                instance.kes_endpoint(&config.cluster_domain),
            ),
            value_env(KES_CERT_FILE_ENV, format!("{}/client.crt", MINIO_CERTS_PATH)),
            value_env(KES_KEY_FILE_ENV, format!("{}/client.key", MINIO_CERTS_PATH)),
            value_env(KES_CA_PATH_ENV, format!("{}/CAs/server.crt", MINIO_CERTS_PATH)),
            value_env(KES_KEY_NAME_ENV, instance.kes_key_name()),
        ]);
    }

    debug!(
        instance = %instance.name_any(),
        user = instance.spec.env.len(),
        total = env.len(),
        "compiled MinIO environment"
    );
    env
}

fn value_env(name: &str, value: impl Into<String>) -> EnvVar {
    EnvVar {
        name: name.to_string(),
        value: Some(value.into()),
        ..Default::default()
    }
}

fn secret_env(name: &str, secret: &str, key: &str) -> EnvVar {
    EnvVar {
        name: name.to_string(),
        value_from: Some(EnvVarSource {
            secret_key_ref: Some(SecretKeySelector {
                name: secret.to_string(),
                key: key.to_string(),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}
