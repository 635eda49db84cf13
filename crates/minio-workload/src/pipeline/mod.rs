//! Compilation pipeline stages, run in order by the StatefulSet compiler

pub mod container;
pub mod env;
pub mod metadata;
pub mod mounts;
pub mod volumes;
