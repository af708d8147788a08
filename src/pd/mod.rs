pub mod client;
pub mod types;

pub use client::PagerDutyClient;

use crate::errors::AppResult;
use crate::models::PdUser;
use crate::pd::types::{CreatedOverride, OverrideRequest};

/// The slice of the PagerDuty API the upload pipeline needs. Keeping it
/// behind a trait lets tests drive the pipeline without a network.
pub trait OverrideApi {
    fn create_override(
        &self,
        request: &OverrideRequest,
        user_id: &str,
    ) -> AppResult<CreatedOverride>;

    fn resolve_user(&self, email: &str) -> AppResult<PdUser>;
}
