//! Pod template metadata
//!
//! Labels are built as a sequence of overlays where later writes win:
//! user metadata, then the instance label, then user selector labels.

use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::ResourceExt;
use minio_common::crd::MinIOInstance;
use tracing::debug;

/// Compile the pod template metadata for a MinIOInstance.
pub fn compile(instance: &MinIOInstance) -> ObjectMeta {
    let mut meta = if instance.has_metadata() {
        instance.spec.metadata.clone().unwrap_or_default()
    } else {
        ObjectMeta::default()
    };

    let labels = meta.labels.get_or_insert_with(BTreeMap::new);
    labels.extend(instance.pod_labels());
    if instance.has_selector() {
        let match_labels = instance
            .spec
            .selector
            .as_ref()
            .and_then(|s| s.match_labels.clone())
            .unwrap_or_default();
        labels.extend(match_labels);
    }
    let label_count = labels.len();

    meta.annotations.get_or_insert_with(BTreeMap::new);

    debug!(
        instance = %instance.name_any(),
        labels = label_count,
        "compiled pod metadata"
    );
    meta
}
