#![deny(missing_docs)]

//! # Guided Report Models
//!
//! Wire types shared by the concern submission client and the analysis
//! service.
//!
//! ## Exchange
//!
//! ```text
//! POST /analyze   AnalyzeRequest { concern }  ->  AnalyzeResponse { analysis }
//!                                             ->  ErrorBody { error }   (4xx / 5xx)
//! GET  /health                                ->  HealthStatus { status }
//! ```
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`concern`] | Validated free-text [`Concern`] |
//! | [`analysis`] | Request / response bodies of the analysis endpoint |
//! | [`health`] | Liveness probe body |
//! | [`error`] | [`ModelError`] |

pub mod analysis;
pub mod concern;
pub mod error;
pub mod health;

pub use analysis::*;
pub use concern::*;
pub use error::*;
pub use health::*;
