//! MinIO container volume mounts

use k8s_openapi::api::core::v1::VolumeMount;
use kube::ResourceExt;
use minio_common::crd::MinIOInstance;
use minio_common::{MINIO_CERTS_PATH, MINIO_VOLUME_MOUNT_PATH};
use tracing::debug;

/// Compile the container mounts: one per data volume, plus the TLS volume
/// when certificates are required.
///
/// Data mounts are named `<base><i>` so they line up with the claim templates.
/// A single volume mounts at `/export`; several mount at `/export<i>`.
pub fn compile(instance: &MinIOInstance) -> Vec<VolumeMount> {
    let base = instance.volume_base_name();
    let count = instance.spec.volumes_per_server;

    let mut mounts: Vec<VolumeMount> = if count == 1 {
        vec![mount(format!("{}0", base), MINIO_VOLUME_MOUNT_PATH.to_string())]
    } else {
        (0..count)
            .map(|i| {
                mount(
                    format!("{}{}", base, i),
                    format!("{}{}", MINIO_VOLUME_MOUNT_PATH, i),
                )
            })
            .collect()
    };

    if instance.requires_cert_setup() {
        mounts.push(mount(
            instance.tls_secret_name(),
            MINIO_CERTS_PATH.to_string(),
        ));
    }

    debug!(
        instance = %instance.name_any(),
        mounts = mounts.len(),
        "compiled volume mounts"
    );
    mounts
}

fn mount(name: String, mount_path: String) -> VolumeMount {
    VolumeMount {
        name,
        mount_path,
        ..Default::default()
    }
}
