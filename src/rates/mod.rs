//! Raw per-age observations and their conversion to mortality rates

mod data;
mod converter;

pub use data::{RateObservation, Gender, CohortKey, ObservationKey};
pub use converter::{RateConverter, Rates, RatedObservation};
