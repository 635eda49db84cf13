//! Common types for the MinIO operator: the MinIOInstance CRD, errors, and configuration

#![deny(missing_docs)]

pub mod config;
pub mod crd;
pub mod error;

pub use config::OperatorConfig;
pub use error::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Label key that ties every MinIO pod to its MinIOInstance
pub const INSTANCE_LABEL: &str = "v1.min.io/instance";

/// Name of the MinIO server container
pub const MINIO_SERVER_NAME: &str = "minio";

/// Port the MinIO server listens on
pub const MINIO_PORT: i32 = 9000;

/// Base name for MinIO data volumes when no claim template name is given
pub const MINIO_VOLUME_NAME: &str = "export";

/// Mount path for MinIO data volumes (suffixed by index with multiple volumes)
pub const MINIO_VOLUME_MOUNT_PATH: &str = "/export";

/// Directory MinIO reads its TLS material from
pub const MINIO_CERTS_PATH: &str = "/root/.minio/certs";

/// Port the KES server listens on
pub const KES_PORT: u16 = 7373;

/// Key name MinIO asks KES for when none is configured
pub const DEFAULT_KES_KEY_NAME: &str = "my-minio-key";

/// Default MinIO server image
pub const DEFAULT_MINIO_IMAGE: &str = "minio/minio:RELEASE.2020-09-10T22-02-45Z";

/// Default image pull policy for the MinIO container
pub const DEFAULT_IMAGE_PULL_POLICY: &str = "IfNotPresent";

/// Default StatefulSet pod management policy
pub const DEFAULT_POD_MANAGEMENT_POLICY: &str = "Parallel";

/// StatefulSet update strategy used for every MinIOInstance
pub const DEFAULT_UPDATE_STRATEGY: &str = "RollingUpdate";

/// Default Kubernetes cluster domain used in pod DNS names
pub const DEFAULT_CLUSTER_DOMAIN: &str = "cluster.local";

/// Name given to the zone created when a MinIOInstance declares none
pub const DEFAULT_ZONE_NAME: &str = "zone-0";
