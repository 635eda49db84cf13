//! Pod volumes
//!
//! Ephemeral storage is one emptyDir per zone. Certificate material for the
//! MinIO server, and for its KES client when enabled, is projected into a
//! single `<name>-tls` volume.

use k8s_openapi::api::core::v1::{
    EmptyDirVolumeSource, KeyToPath, ProjectedVolumeSource, SecretProjection, Volume,
    VolumeProjection,
};
use kube::ResourceExt;
use minio_common::crd::{CertificateMode, MinIOInstance, PRIVATE_KEY_FILE, PUBLIC_CERT_FILE};
use tracing::debug;

/// Key pair MinIO presents to KES: `(secret key, projected file)`
const KES_CLIENT_KEY_PATHS: [(&str, &str); 2] = [
    (PUBLIC_CERT_FILE, "client.crt"),
    (PRIVATE_KEY_FILE, "client.key"),
];

/// KES server certificate MinIO trusts
const KES_SERVER_KEY_PATHS: [(&str, &str); 1] = [(PUBLIC_CERT_FILE, "CAs/server.crt")];

/// Compile the pod volumes for a MinIOInstance.
pub fn compile(instance: &MinIOInstance) -> Vec<Volume> {
    let mut volumes: Vec<Volume> = Vec::new();

    if !instance.has_volume_claim_template() {
        volumes.extend(instance.spec.zones.iter().map(|zone| Volume {
            name: zone.name.clone(),
            empty_dir: Some(EmptyDirVolumeSource::default()),
            ..Default::default()
        }));
    }

    if let Some(tls) = tls_volume(instance) {
        volumes.push(tls);
    }

    debug!(
        instance = %instance.name_any(),
        volumes = volumes.len(),
        "compiled pod volumes"
    );
    volumes
}

/// Projected volume carrying every certificate the server needs, if any.
fn tls_volume(instance: &MinIOInstance) -> Option<Volume> {
    let mode = instance.certificate_mode();
    let primary = match mode {
        CertificateMode::None => return None,
        CertificateMode::SelfSigned => instance.tls_secret_name(),
        CertificateMode::External(secret) => secret.name.clone(),
    };

    let mut sources = vec![secret_projection(primary, &mode.format().key_paths())];
    if instance.has_kes_enabled() {
        sources.push(secret_projection(
            instance.client_tls_secret_name(),
            &KES_CLIENT_KEY_PATHS,
        ));
        sources.push(secret_projection(
            instance.kes_tls_secret_name(),
            &KES_SERVER_KEY_PATHS,
        ));
    }

    Some(Volume {
        name: instance.tls_secret_name(),
        projected: Some(ProjectedVolumeSource {
            sources: Some(sources),
            ..Default::default()
        }),
        ..Default::default()
    })
}

fn secret_projection(name: String, key_paths: &[(&str, &str)]) -> VolumeProjection {
    VolumeProjection {
        secret: Some(SecretProjection {
            name,
            items: Some(
                key_paths
                    .iter()
                    .map(|(key, path)| KeyToPath {
                        key: key.to_string(),
                        path: path.to_string(),
                        ..Default::default()
                    })
                    .collect(),
            ),
            ..Default::default()
        }),
        ..Default::default()
    }
}
