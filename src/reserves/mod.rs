//! Reserve calculation for term life cohorts
//!
//! A single basis is supported: the prospective net premium reserve, valued
//! on the same mortality table and interest rate as the projection itself.
//!
//! # Example
//!
//! ```rust,ignore
//! use term_projection::reserves::ReserveCalculator;
//!
//! let calculator = ReserveCalculator::new(&cohort);
//! // Reserve per surviving policy at the end of month 5
//! let reserve = calculator.reserve_per_policy(6, survivors)?;
//! ```

mod types;
mod discount;
mod prospective;

pub use types::{ReserveComponents, ValuationPoint};
pub use discount::DiscountCurve;
pub use prospective::{prospective_reserve, ReserveCalculator};
