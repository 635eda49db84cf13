//! StatefulSetCompiler — assembles the MinIO StatefulSet
//!
//! Single entry point for turning a defaulted, validated MinIOInstance into
//! the StatefulSet that runs its servers. Compilation is pure: the same
//! instance and config always produce an equal StatefulSet.

use k8s_openapi::api::apps::v1::{StatefulSet, StatefulSetSpec, StatefulSetUpdateStrategy};
use k8s_openapi::api::core::v1::{PersistentVolumeClaim, PodSpec, PodTemplateSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use kube::{Resource, ResourceExt};
use minio_common::crd::MinIOInstance;
use minio_common::{OperatorConfig, DEFAULT_UPDATE_STRATEGY};
use tracing::{debug, warn};

use crate::pipeline::{container, metadata, volumes};

/// Compiles a MinIOInstance into a StatefulSet.
///
/// ```rust,ignore
/// let sts = StatefulSetCompiler::new(&instance, &instance.headless_service_name())
///     .with_config(&config)
///     .compile();
/// ```
pub struct StatefulSetCompiler<'a> {
    instance: &'a MinIOInstance,
    service_name: &'a str,
    config: OperatorConfig,
}

impl<'a> StatefulSetCompiler<'a> {
    /// Create a compiler for `instance`, governed by the headless service `service_name`.
    pub fn new(instance: &'a MinIOInstance, service_name: &'a str) -> Self {
        Self {
            instance,
            service_name,
            config: OperatorConfig::default(),
        }
    }

    /// Set operator-wide configuration (cluster domain).
    pub fn with_config(mut self, config: &OperatorConfig) -> Self {
        self.config = config.clone();
        self
    }

    /// Compile the StatefulSet.
    ///
    /// Runs the pipeline: container (env, mounts) → volumes → claim templates
    /// → pod metadata.
    pub fn compile(self) -> StatefulSet {
        let instance = self.instance;
        let spec = &instance.spec;

        if instance.requires_auto_cert_setup() && instance.requires_external_cert_setup() {
            warn!(
                instance = %instance.name_any(),
                "both requestAutoCert and externalCertSecret are set, using the self-signed certificate"
            );
        }

        let pod_spec = PodSpec {
            containers: vec![container::compile(instance, &self.config)],
            volumes: Some(volumes::compile(instance)),
            affinity: spec.affinity.clone(),
            tolerations: Some(spec.tolerations.clone()),
            scheduler_name: spec.scheduler_name.clone(),
            security_context: Some(spec.security_context.clone().unwrap_or_default()),
            image_pull_secrets: spec.image_pull_secret.clone().map(|s| vec![s]),
            restart_policy: Some("Always".to_string()),
            ..Default::default()
        };

        let claims = claim_templates(instance);
        let replicas = instance.replicas();

        debug!(
            instance = %instance.name_any(),
            namespace = %instance.namespace().unwrap_or_default(),
            replicas,
            claims = claims.len(),
            "compiled MinIO StatefulSet"
        );

        StatefulSet {
            metadata: ObjectMeta {
                name: Some(instance.statefulset_name()),
                namespace: instance.namespace(),
                owner_references: instance.controller_owner_ref(&()).map(|r| vec![r]),
                ..Default::default()
            },
            spec: Some(StatefulSetSpec {
                update_strategy: Some(StatefulSetUpdateStrategy {
                    type_: Some(DEFAULT_UPDATE_STRATEGY.to_string()),
                    ..Default::default()
                }),
                pod_management_policy: spec.pod_management_policy.clone(),
                selector: LabelSelector {
                    match_labels: Some(instance.pod_labels()),
                    ..Default::default()
                },
                service_name: Some(self.service_name.to_string()),
                replicas: Some(replicas),
                template: PodTemplateSpec {
                    metadata: Some(metadata::compile(instance)),
                    spec: Some(pod_spec),
                },
                volume_claim_templates: if claims.is_empty() { None } else { Some(claims) },
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}

/// One claim per volume per server, named `<base><i>` to match the mounts.
fn claim_templates(instance: &MinIOInstance) -> Vec<PersistentVolumeClaim> {
    let Some(template) = &instance.spec.volume_claim_template else {
        return Vec::new();
    };
    let base = instance.volume_base_name();

    (0..instance.spec.volumes_per_server)
        .map(|i| {
            let mut claim = template.clone();
            claim.metadata.name = Some(format!("{}{}", base, i));
            claim
        })
        .collect()
}
