//! MinIOInstance CRD
//!
//! A MinIOInstance describes one MinIO object storage cluster: its server
//! topology, storage layout, credentials, and TLS policy. The derived
//! accessors on [`MinIOInstance`] are the only way the workload compiler
//! reads the spec, so naming conventions (secret names, hostnames, volume
//! paths) live here in one place.

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{
    Affinity, EnvVar, LocalObjectReference, PersistentVolumeClaim, PodSecurityContext, Probe,
    ResourceRequirements, Toleration,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use kube::{CustomResource, ResourceExt};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::types::{CertificateMode, ExternalCertSecret, KesConfig, Zone};
use crate::{
    DEFAULT_KES_KEY_NAME, INSTANCE_LABEL, KES_PORT, MINIO_PORT, MINIO_VOLUME_MOUNT_PATH,
    MINIO_VOLUME_NAME,
};

/// Specification for a MinIO object storage cluster
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "operator.min.io",
    version = "v1",
    kind = "MinIOInstance",
    plural = "minioinstances",
    shortname = "minio",
    namespaced,
    derive = "PartialEq",
    printcolumn = r#"{"name":"Replicas", "type":"integer", "jsonPath":".spec.zones[0].servers"}"#,
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct MinIOInstanceSpec {
    /// MinIO server image
    #[serde(default)]
    pub image: String,

    /// Image pull policy for the MinIO container
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_pull_policy: Option<String>,

    /// Server topology; replicas are the sum of all zone servers
    #[serde(default)]
    pub zones: Vec<Zone>,

    /// Number of volumes mounted into every server
    #[serde(default)]
    pub volumes_per_server: i32,

    /// Template for per-server persistent volumes.
    ///
    /// When omitted, servers store data on emptyDir volumes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_claim_template: Option<PersistentVolumeClaim>,

    /// Secret holding `accesskey` and `secretkey`.
    ///
    /// When omitted, MinIO generates default credentials itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creds_secret: Option<LocalObjectReference>,

    /// Have the operator issue a self-signed certificate for the servers
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub request_auto_cert: bool,

    /// User-supplied certificate secret
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_cert_secret: Option<ExternalCertSecret>,

    /// KES integration for server-side encryption
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kes: Option<KesConfig>,

    /// StatefulSet pod management policy (OrderedReady or Parallel)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_management_policy: Option<String>,

    /// Pod affinity rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affinity: Option<Affinity>,

    /// Pod tolerations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tolerations: Vec<Toleration>,

    /// Custom scheduler for MinIO pods
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduler_name: Option<String>,

    /// Pod-level security context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_context: Option<PodSecurityContext>,

    /// Secret used to pull the MinIO image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_pull_secret: Option<LocalObjectReference>,

    /// Container resource requirements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,

    /// Liveness probe for the MinIO container
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liveness: Option<Probe>,

    /// Readiness probe for the MinIO container
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readiness: Option<Probe>,

    /// Extra environment variables for the MinIO container
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<EnvVar>,

    /// Labels and annotations added to every MinIO pod
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ObjectMeta>,

    /// Extra selector labels added to every MinIO pod
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<LabelSelector>,
}

impl MinIOInstance {
    // =========================================================================
    // Presence checks
    // =========================================================================

    /// Whether credentials come from a named secret
    pub fn has_creds_secret(&self) -> bool {
        self.spec.creds_secret.is_some()
    }

    /// Whether the operator must issue a self-signed certificate
    pub fn requires_auto_cert_setup(&self) -> bool {
        self.spec.request_auto_cert
    }

    /// Whether the servers use a user-supplied certificate
    pub fn requires_external_cert_setup(&self) -> bool {
        self.spec.external_cert_secret.is_some()
    }

    /// Whether any certificate material must be mounted
    pub fn requires_cert_setup(&self) -> bool {
        self.certificate_mode().is_required()
    }

    /// Whether KES integration is enabled
    pub fn has_kes_enabled(&self) -> bool {
        self.spec.kes.is_some()
    }

    /// Whether the user supplied pod metadata
    pub fn has_metadata(&self) -> bool {
        self.spec.metadata.is_some()
    }

    /// Whether the user supplied selector labels
    pub fn has_selector(&self) -> bool {
        self.spec.selector.is_some()
    }

    /// Whether servers store data on persistent volumes
    pub fn has_volume_claim_template(&self) -> bool {
        self.spec.volume_claim_template.is_some()
    }

    /// Certificate provisioning mode.
    ///
    /// A self-signed request wins over an external secret; validation
    /// rejects specs that set both.
    pub fn certificate_mode(&self) -> CertificateMode<'_> {
        if self.spec.request_auto_cert {
            CertificateMode::SelfSigned
        } else if let Some(secret) = &self.spec.external_cert_secret {
            CertificateMode::External(secret)
        } else {
            CertificateMode::None
        }
    }

    // =========================================================================
    // Topology
    // =========================================================================

    /// Total number of MinIO servers across all zones.
    ///
    /// Saturates at `i32::MAX`; [`MinIOInstance::validate`] rejects topologies
    /// that overflow.
    pub fn replicas(&self) -> i32 {
        self.spec
            .zones
            .iter()
            .fold(0i32, |total, z| total.saturating_add(z.servers))
    }

    /// Name of the StatefulSet that runs the servers
    pub fn statefulset_name(&self) -> String {
        self.name_any()
    }

    /// Name of the headless service giving every server a stable DNS name
    pub fn headless_service_name(&self) -> String {
        format!("{}-hl-svc", self.name_any())
    }

    /// Labels every MinIO pod carries and the StatefulSet selects on
    pub fn pod_labels(&self) -> BTreeMap<String, String> {
        BTreeMap::from([(INSTANCE_LABEL.to_string(), self.statefulset_name())])
    }

    /// URL scheme the servers talk to each other with
    pub fn scheme(&self) -> &'static str {
        if self.requires_cert_setup() {
            "https"
        } else {
            "http"
        }
    }

    /// `host:port` of every server, in pod ordinal order
    pub fn hosts(&self, cluster_domain: &str) -> Vec<String> {
        let sts = self.statefulset_name();
        let service = self.headless_service_name();
        let namespace = self.namespace().unwrap_or_default();
        (0..self.replicas())
            .map(|i| {
                format!(
                    "{}-{}.{}.{}.svc.{}:{}",
                    sts, i, service, namespace, cluster_domain, MINIO_PORT
                )
            })
            .collect()
    }

    // =========================================================================
    // Storage
    // =========================================================================

    /// Base name shared by data volume mounts and claim templates
    pub fn volume_base_name(&self) -> String {
        self.spec
            .volume_claim_template
            .as_ref()
            .and_then(|t| t.metadata.name.clone())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| MINIO_VOLUME_NAME.to_string())
    }

    /// Data path passed to every server.
    ///
    /// `/export` for one volume, `/export{0...N-1}` for N volumes.
    pub fn volume_path(&self) -> String {
        if self.spec.volumes_per_server == 1 {
            MINIO_VOLUME_MOUNT_PATH.to_string()
        } else {
            format!(
                "{}{{0...{}}}",
                MINIO_VOLUME_MOUNT_PATH,
                self.spec.volumes_per_server - 1
            )
        }
    }

    // =========================================================================
    // Secrets and KES
    // =========================================================================

    /// Name of the TLS volume, and of the self-signed certificate secret
    pub fn tls_secret_name(&self) -> String {
        format!("{}-tls", self.name_any())
    }

    /// Secret holding the key pair MinIO presents to KES
    pub fn client_tls_secret_name(&self) -> String {
        format!("{}-client-tls", self.name_any())
    }

    /// Name of the KES StatefulSet
    pub fn kes_statefulset_name(&self) -> String {
        format!("{}-kes", self.name_any())
    }

    /// Secret holding the KES server certificate
    pub fn kes_tls_secret_name(&self) -> String {
        format!("{}-tls", self.kes_statefulset_name())
    }

    /// Headless service in front of the KES servers
    pub fn kes_headless_service_name(&self) -> String {
        format!("{}-hl-svc", self.kes_statefulset_name())
    }

    /// Fully qualified KES service hostname
    pub fn kes_service_host(&self, cluster_domain: &str) -> String {
        format!(
            "{}.{}.svc.{}",
            self.kes_headless_service_name(),
            self.namespace().unwrap_or_default(),
            cluster_domain
        )
    }

    /// HTTPS endpoint MinIO uses to reach KES
    pub fn kes_endpoint(&self, cluster_domain: &str) -> String {
        format!(
            "https://{}:{}",
            self.kes_service_host(cluster_domain),
            KES_PORT
        )
    }

    /// Master key name MinIO requests from KES
    pub fn kes_key_name(&self) -> String {
        self.spec
            .kes
            .as_ref()
            .and_then(|k| k.key_name.clone())
            .unwrap_or_else(|| DEFAULT_KES_KEY_NAME.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crd::types::KUBERNETES_TLS_SECRET_TYPE;

    fn instance(spec: MinIOInstanceSpec) -> MinIOInstance {
        let mut mi = MinIOInstance::new("tenant-a", spec);
        mi.metadata.namespace = Some("storage".to_string());
        mi
    }

    fn distributed_spec() -> MinIOInstanceSpec {
        MinIOInstanceSpec {
            image: "minio/minio:latest".to_string(),
            zones: vec![Zone::new("zone-0", 4)],
            volumes_per_server: 1,
            ..Default::default()
        }
    }

    // =========================================================================
    // Story: Topology accessors
    // =========================================================================

    #[test]
    fn replicas_sum_all_zones() {
        let mi = instance(MinIOInstanceSpec {
            zones: vec![Zone::new("zone-0", 4), Zone::new("zone-1", 2)],
            ..distributed_spec()
        });
        assert_eq!(mi.replicas(), 6);
    }

    #[test]
    fn replicas_saturate_instead_of_overflowing() {
        let mi = instance(MinIOInstanceSpec {
            zones: vec![Zone::new("zone-0", i32::MAX), Zone::new("zone-1", 1)],
            ..distributed_spec()
        });
        assert_eq!(mi.replicas(), i32::MAX);
    }

    #[test]
    fn hosts_list_every_pod_in_order() {
        let mi = instance(distributed_spec());
        let hosts = mi.hosts("cluster.local");
        assert_eq!(hosts.len(), 4);
        assert_eq!(
            hosts[0],
            "tenant-a-0.tenant-a-hl-svc.storage.svc.cluster.local:9000"
        );
        assert_eq!(
            hosts[3],
            "tenant-a-3.tenant-a-hl-svc.storage.svc.cluster.local:9000"
        );
    }

    #[test]
    fn hosts_use_configured_cluster_domain() {
        let mi = instance(distributed_spec());
        assert!(mi.hosts("corp.internal")[0].ends_with(".svc.corp.internal:9000"));
    }

    #[test]
    fn pod_labels_select_the_statefulset() {
        let mi = instance(distributed_spec());
        assert_eq!(
            mi.pod_labels().get(INSTANCE_LABEL),
            Some(&"tenant-a".to_string())
        );
    }

    // =========================================================================
    // Story: Storage accessors
    // =========================================================================

    #[test]
    fn single_volume_path_has_no_ellipsis() {
        let mi = instance(distributed_spec());
        assert_eq!(mi.volume_path(), "/export");
    }

    #[test]
    fn multi_volume_path_uses_ellipsis() {
        let mi = instance(MinIOInstanceSpec {
            volumes_per_server: 4,
            ..distributed_spec()
        });
        assert_eq!(mi.volume_path(), "/export{0...3}");
    }

    #[test]
    fn volume_base_name_prefers_claim_template_name() {
        let mut template = PersistentVolumeClaim::default();
        template.metadata.name = Some("data".to_string());
        let mi = instance(MinIOInstanceSpec {
            volume_claim_template: Some(template),
            ..distributed_spec()
        });
        assert_eq!(mi.volume_base_name(), "data");
    }

    #[test]
    fn volume_base_name_falls_back_to_export() {
        let mi = instance(distributed_spec());
        assert_eq!(mi.volume_base_name(), MINIO_VOLUME_NAME);

        let unnamed = instance(MinIOInstanceSpec {
            volume_claim_template: Some(PersistentVolumeClaim::default()),
            ..distributed_spec()
        });
        assert_eq!(unnamed.volume_base_name(), MINIO_VOLUME_NAME);
    }

    // =========================================================================
    // Story: Certificate mode
    // =========================================================================

    #[test]
    fn no_certificates_means_http() {
        let mi = instance(distributed_spec());
        assert_eq!(mi.certificate_mode(), CertificateMode::None);
        assert_eq!(mi.scheme(), "http");
        assert!(!mi.requires_cert_setup());
    }

    #[test]
    fn auto_cert_means_https() {
        let mi = instance(MinIOInstanceSpec {
            request_auto_cert: true,
            ..distributed_spec()
        });
        assert_eq!(mi.certificate_mode(), CertificateMode::SelfSigned);
        assert_eq!(mi.scheme(), "https");
    }

    #[test]
    fn external_cert_is_reported_with_its_secret() {
        let secret = ExternalCertSecret {
            name: "minio-cert".to_string(),
            type_: Some(KUBERNETES_TLS_SECRET_TYPE.to_string()),
        };
        let mi = instance(MinIOInstanceSpec {
            external_cert_secret: Some(secret.clone()),
            ..distributed_spec()
        });
        assert_eq!(mi.certificate_mode(), CertificateMode::External(&secret));
        assert!(mi.requires_external_cert_setup());
        assert_eq!(mi.scheme(), "https");
    }

    #[test]
    fn auto_cert_wins_over_external_secret() {
        let mi = instance(MinIOInstanceSpec {
            request_auto_cert: true,
            external_cert_secret: Some(ExternalCertSecret {
                name: "minio-cert".to_string(),
                type_: None,
            }),
            ..distributed_spec()
        });
        assert_eq!(mi.certificate_mode(), CertificateMode::SelfSigned);
    }

    // =========================================================================
    // Story: Secret and KES names
    // =========================================================================

    #[test]
    fn derived_secret_names() {
        let mi = instance(distributed_spec());
        assert_eq!(mi.tls_secret_name(), "tenant-a-tls");
        assert_eq!(mi.client_tls_secret_name(), "tenant-a-client-tls");
        assert_eq!(mi.kes_tls_secret_name(), "tenant-a-kes-tls");
    }

    #[test]
    fn kes_endpoint_points_at_headless_service() {
        let mi = instance(distributed_spec());
        assert_eq!(
            mi.kes_endpoint("cluster.local"),
            "https://tenant-a-kes-hl-svc.storage.svc.cluster.local:7373"
        );
    }

    #[test]
    fn kes_key_name_defaults() {
        let mut mi = instance(MinIOInstanceSpec {
            kes: Some(KesConfig::default()),
            ..distributed_spec()
        });
        assert_eq!(mi.kes_key_name(), DEFAULT_KES_KEY_NAME);

        mi.spec.kes = Some(KesConfig {
            key_name: Some("tenant-key".to_string()),
            ..Default::default()
        });
        assert_eq!(mi.kes_key_name(), "tenant-key");
    }

    // =========================================================================
    // Story: Manifest parsing
    // =========================================================================

    #[test]
    fn parses_camel_case_manifest() {
        let yaml = r#"
apiVersion: operator.min.io/v1
kind: MinIOInstance
metadata:
  name: tenant-a
  namespace: storage
spec:
  image: minio/minio:latest
  zones:
    - name: zone-0
      servers: 4
  volumesPerServer: 2
  credsSecret:
    name: minio-creds
  externalCertSecret:
    name: minio-cert
    type: cert-manager.io/v1alpha2
  volumeClaimTemplate:
    metadata:
      name: data
    spec:
      accessModes: ["ReadWriteOnce"]
"#;
        let mi: MinIOInstance = serde_yaml::from_str(yaml).expect("valid manifest");
        assert_eq!(mi.replicas(), 4);
        assert_eq!(mi.spec.volumes_per_server, 2);
        assert!(mi.has_creds_secret());
        assert!(mi.requires_external_cert_setup());
        assert_eq!(mi.volume_base_name(), "data");
    }
}
