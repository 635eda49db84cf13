//! StatefulSet compilation for MinIOInstance
//!
//! Compiles a `MinIOInstance` into the `StatefulSet` that runs its MinIO
//! servers: pod metadata, pod volumes, the server container (environment,
//! mounts, arguments), and per-volume claim templates.
//!
//! # Usage
//!
//! ```rust,ignore
//! instance.ensure_defaults();
//! instance.validate()?;
//! let sts = StatefulSetCompiler::new(&instance, &instance.headless_service_name())
//!     .with_config(&OperatorConfig::resolve(cluster_domain))
//!     .compile();
//! ```

mod compiler;
pub mod pipeline;

#[cfg(test)]
mod test_support;

pub use compiler::StatefulSetCompiler;
