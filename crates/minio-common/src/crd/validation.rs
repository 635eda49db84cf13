//! Defaulting and validation for MinIOInstance
//!
//! The workload compiler assumes a defaulted, validated instance. Callers run
//! [`MinIOInstance::ensure_defaults`] then [`MinIOInstance::validate`] before
//! compiling.

use kube::ResourceExt;
use tracing::debug;

use super::instance::MinIOInstance;
use super::types::Zone;
use crate::{
    Error, Result, DEFAULT_IMAGE_PULL_POLICY, DEFAULT_KES_KEY_NAME, DEFAULT_MINIO_IMAGE,
    DEFAULT_POD_MANAGEMENT_POLICY, DEFAULT_ZONE_NAME, INSTANCE_LABEL,
};

/// Smallest drive count MinIO accepts for a distributed (erasure coded) setup
const MIN_DISTRIBUTED_DRIVES: i32 = 4;

impl MinIOInstance {
    /// Fill unset fields with operator defaults.
    ///
    /// Idempotent: applying defaults twice leaves the instance unchanged.
    pub fn ensure_defaults(&mut self) {
        let spec = &mut self.spec;

        if spec.image.is_empty() {
            spec.image = DEFAULT_MINIO_IMAGE.to_string();
        }
        if spec.image_pull_policy.is_none() {
            spec.image_pull_policy = Some(DEFAULT_IMAGE_PULL_POLICY.to_string());
        }
        if spec.volumes_per_server == 0 {
            spec.volumes_per_server = 1;
        }
        if spec.zones.is_empty() {
            spec.zones.push(Zone::new(DEFAULT_ZONE_NAME, 1));
        }
        if spec.pod_management_policy.is_none() {
            spec.pod_management_policy = Some(DEFAULT_POD_MANAGEMENT_POLICY.to_string());
        }
        if let Some(kes) = spec.kes.as_mut() {
            if kes.key_name.is_none() {
                kes.key_name = Some(DEFAULT_KES_KEY_NAME.to_string());
            }
        }

        debug!(instance = %self.name_any(), "applied MinIOInstance defaults");
    }

    /// Reject instances the workload compiler cannot turn into a usable StatefulSet.
    pub fn validate(&self) -> Result<()> {
        let name = self.name_any();
        let spec = &self.spec;

        if spec.zones.is_empty() {
            return Err(Error::validation_for_field(
                &name,
                "spec.zones",
                "at least one zone is required",
            ));
        }

        for (i, zone) in spec.zones.iter().enumerate() {
            if zone.name.is_empty() {
                return Err(Error::validation_for_field(
                    &name,
                    format!("spec.zones[{}].name", i),
                    "zone name cannot be empty",
                ));
            }
            if zone.servers < 1 {
                return Err(Error::validation_for_field(
                    &name,
                    format!("spec.zones[{}].servers", i),
                    format!(
                        "zone '{}' must have at least one server, got {}",
                        zone.name, zone.servers
                    ),
                ));
            }
        }

        if spec.volumes_per_server < 1 {
            return Err(Error::validation_for_field(
                &name,
                "spec.volumesPerServer",
                format!(
                    "volumesPerServer must be at least 1, got {}",
                    spec.volumes_per_server
                ),
            ));
        }

        if spec.request_auto_cert && spec.external_cert_secret.is_some() {
            return Err(Error::validation_for_field(
                &name,
                "spec.requestAutoCert",
                "requestAutoCert and externalCertSecret are mutually exclusive",
            ));
        }

        if let Some(secret) = &spec.external_cert_secret {
            if secret.name.is_empty() {
                return Err(Error::validation_for_field(
                    &name,
                    "spec.externalCertSecret.name",
                    "external certificate secret name cannot be empty",
                ));
            }
        }

        if self.has_kes_enabled() && !self.requires_cert_setup() {
            return Err(Error::validation_for_field(
                &name,
                "spec.kes",
                "KES requires requestAutoCert or externalCertSecret",
            ));
        }

        let drives = spec
            .zones
            .iter()
            .try_fold(0i32, |total, z| total.checked_add(z.servers))
            .and_then(|replicas| {
                replicas
                    .checked_mul(spec.volumes_per_server)
                    .map(|drives| (replicas, drives))
            });
        let Some((replicas, drives)) = drives else {
            return Err(Error::validation_for_field(
                &name,
                "spec.zones",
                format!("total drive count exceeds {}", i32::MAX),
            ));
        };
        if replicas > 1 && drives < MIN_DISTRIBUTED_DRIVES {
            return Err(Error::validation_for_field(
                &name,
                "spec.volumesPerServer",
                format!(
                    "distributed setup needs at least {} drives, got {} servers x {} volumes",
                    MIN_DISTRIBUTED_DRIVES, replicas, spec.volumes_per_server
                ),
            ));
        }

        if let Some(value) = spec
            .selector
            .as_ref()
            .and_then(|s| s.match_labels.as_ref())
            .and_then(|labels| labels.get(INSTANCE_LABEL))
        {
            if *value != self.statefulset_name() {
                return Err(Error::validation_for_field(
                    &name,
                    format!("spec.selector.matchLabels[{}]", INSTANCE_LABEL),
                    format!(
                        "selector label {} must be '{}', got '{}'",
                        INSTANCE_LABEL,
                        self.statefulset_name(),
                        value
                    ),
                ));
            }
        }

        Ok(())
    }
}
