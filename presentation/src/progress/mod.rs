//! Progress reporting while the pipeline runs

pub mod reporter;
