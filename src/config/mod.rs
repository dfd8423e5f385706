//! Analysis Configuration Module
//!
//! Provides the divergence-method parameter set loaded from TOML files.
//!
//! ## Loading Order
//!
//! 1. `GEOPRESSURE_CONFIG` environment variable (path to TOML file)
//! 2. `geopressure.toml` in the current working directory
//! 3. Built-in defaults (the published reference parameters)
//!
//! ## Usage
//!
//! The config is passed explicitly to the pipeline, once per run:
//!
//! ```ignore
//! let config = AnalysisConfig::load();
//! let pipeline = Pipeline::new(&config)?;
//! let profile = pipeline.run(&log);
//! ```

mod analysis_config;
pub mod defaults;
pub mod validation;

pub use analysis_config::*;
