//! MinIO server container

use k8s_openapi::api::core::v1::{Container, ContainerPort};
use kube::ResourceExt;
use minio_common::crd::MinIOInstance;
use minio_common::{OperatorConfig, MINIO_PORT, MINIO_SERVER_NAME, MINIO_VOLUME_MOUNT_PATH};
use tracing::debug;

use super::{env, mounts};

/// Compile the single MinIO server container.
pub fn compile(instance: &MinIOInstance, config: &OperatorConfig) -> Container {
    let args = server_args(instance, config);

    debug!(
        instance = %instance.name_any(),
        endpoints = args.len() - 1,
        "compiled MinIO container"
    );

    Container {
        name: MINIO_SERVER_NAME.to_string(),
        image: Some(instance.spec.image.clone()),
        image_pull_policy: instance.spec.image_pull_policy.clone(),
        ports: Some(vec![ContainerPort {
            container_port: MINIO_PORT,
            ..Default::default()
        }]),
        args: Some(args),
        env: Some(env::compile(instance, config)),
        volume_mounts: Some(mounts::compile(instance)),
        resources: instance.spec.resources.clone(),
        liveness_probe: instance.spec.liveness.clone(),
        readiness_probe: instance.spec.readiness.clone(),
        ..Default::default()
    }
}

/// `server` followed by the data path (standalone) or every server endpoint
/// (distributed).
fn server_args(instance: &MinIOInstance, config: &OperatorConfig) -> Vec<String> {
    let standalone = instance
        .spec
        .zones
        .first()
        .is_some_and(|zone| zone.servers == 1);

    let mut args = vec!["server".to_string()];
    if standalone {
        args.push(MINIO_VOLUME_MOUNT_PATH.to_string());
    } else {
        let scheme = instance.scheme();
        let path = instance.volume_path();
        args.extend(
            instance
                .hosts(&config.cluster_domain)
                .into_iter()
                .map(|host| format!("{}://{}{}", scheme, host, path)),
        );
    }
    args
}
