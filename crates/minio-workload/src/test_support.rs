//! Shared fixtures for unit tests

use k8s_openapi::api::core::v1::PersistentVolumeClaim;
use minio_common::crd::{MinIOInstance, MinIOInstanceSpec, Zone};

pub(crate) fn instance(spec: MinIOInstanceSpec) -> MinIOInstance {
    let mut mi = MinIOInstance::new("tenant-a", spec);
    mi.metadata.namespace = Some("storage".to_string());
    mi
}

/// One zone with a single server and one volume
pub(crate) fn standalone_spec() -> MinIOInstanceSpec {
    MinIOInstanceSpec {
        image: "minio/minio:latest".to_string(),
        zones: vec![Zone::new("zone-0", 1)],
        volumes_per_server: 1,
        ..Default::default()
    }
}

/// One zone with four servers and one volume each
pub(crate) fn distributed_spec() -> MinIOInstanceSpec {
    MinIOInstanceSpec {
        zones: vec![Zone::new("zone-0", 4)],
        ..standalone_spec()
    }
}

pub(crate) fn with_claim_template(spec: MinIOInstanceSpec, name: &str) -> MinIOInstanceSpec {
    let mut template = PersistentVolumeClaim::default();
    template.metadata.name = Some(name.to_string());
    MinIOInstanceSpec {
        volume_claim_template: Some(template),
        ..spec
    }
}
