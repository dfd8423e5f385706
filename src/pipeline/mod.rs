//! Processing Pipeline Module
//!
//! ## Stage Order
//!
//! ```text
//! STAGE 1: Velocity          Vp = K / DTC
//! STAGE 2: Gardner density   0.31 * Vp^0.25
//! STAGE 3: Troughton density po + k * max(D - z, 0)^c
//! STAGE 4: Overburden        SV, GSV
//! STAGE 5: Trend             forward moving average of DTC, Athy DTN
//! STAGE 6: Divergence        ratchet(avg / DTN), factor, DTSH
//! STAGE 7: Pore pressure     Eaton Pp, mud-weight calibration
//! STAGE 8: Fracture pressure parameter V, Pf
//! ```
//!
//! Stages 5 and 6 depend on row order (lookahead window, running maximum)
//! and always run over the full table in increasing-depth order.

mod coordinator;
mod stages;

pub use coordinator::{Pipeline, PipelineError};
