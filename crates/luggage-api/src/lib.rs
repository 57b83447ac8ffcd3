//! Luggage Estimator API Library
//!
//! HTTP handlers, middleware and application setup for the size-estimation endpoint.

mod handlers;
mod middleware;
mod utils;

pub mod error;
pub mod setup;
pub mod state;

pub use error::{EstimateRequestBody, HttpAppError};
pub use state::AppState;
