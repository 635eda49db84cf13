//! MinIO Operator - compiles MinIOInstance resources into StatefulSets

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use k8s_openapi::api::apps::v1::StatefulSet;
use kube::{CustomResourceExt, ResourceExt};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use minio_common::config::CLUSTER_DOMAIN_ENV;
use minio_common::crd::MinIOInstance;
use minio_common::{Error, OperatorConfig};
use minio_workload::StatefulSetCompiler;

/// MinIO Operator - Kubernetes operator for MinIO object storage clusters
#[derive(Parser, Debug)]
#[command(name = "minio-operator", version, about, long_about = None)]
struct Cli {
    /// Generate the MinIOInstance CRD manifest and exit
    #[arg(long)]
    crd: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the StatefulSet for a MinIOInstance manifest
    ///
    /// Applies defaults, validates the instance, and prints the StatefulSet
    /// the operator would submit for it.
    Render(RenderArgs),
}

/// Render mode arguments
#[derive(Parser, Debug)]
struct RenderArgs {
    /// Path to the MinIOInstance YAML manifest
    #[arg(short = 'f', long = "file")]
    file: PathBuf,

    /// Headless service governing the StatefulSet (defaults to `<name>-hl-svc`)
    #[arg(long)]
    service_name: Option<String>,

    /// Kubernetes cluster domain used in server hostnames
    #[arg(long, env = CLUSTER_DOMAIN_ENV)]
    cluster_domain: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
    output: OutputFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Yaml,
    Json,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.crd {
        let crd = serde_yaml::to_string(&MinIOInstance::crd())
            .map_err(|e| anyhow::anyhow!("Failed to serialize CRD: {}", e))?;
        println!("{crd}");
        return Ok(());
    }

    match cli.command {
        Some(Commands::Render(args)) => run_render(args),
        None => {
            anyhow::bail!("no command given, pass --crd or `render -f <file>`")
        }
    }
}

/// Read, default, validate, and compile a MinIOInstance, then print the StatefulSet
fn run_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut instance = read_instance(&args.file)?;
    instance.ensure_defaults();
    instance
        .validate()
        .with_context(|| format!("invalid MinIOInstance in {}", args.file.display()))?;

    let config = OperatorConfig::resolve(args.cluster_domain.as_deref());
    let service_name = args
        .service_name
        .unwrap_or_else(|| instance.headless_service_name());

    tracing::info!(
        instance = %instance.name_any(),
        cluster_domain = %config.cluster_domain,
        "rendering StatefulSet"
    );

    let sts = StatefulSetCompiler::new(&instance, &service_name)
        .with_config(&config)
        .compile();

    println!("{}", render(&sts, args.output)?);
    Ok(())
}

fn read_instance(path: &Path) -> anyhow::Result<MinIOInstance> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let instance: MinIOInstance = serde_yaml::from_str(&content)
        .map_err(|e| Error::serialization_for_kind("MinIOInstance", e.to_string()))?;

    if instance.metadata.name.is_none() {
        anyhow::bail!("MinIOInstance in {} must have metadata.name", path.display());
    }
    Ok(instance)
}

fn render(sts: &StatefulSet, format: OutputFormat) -> anyhow::Result<String> {
    let out = match format {
        OutputFormat::Yaml => serde_yaml::to_string(sts).map_err(Error::from)?,
        OutputFormat::Json => serde_json::to_string_pretty(sts).map_err(Error::from)?,
    };
    Ok(out)
}
