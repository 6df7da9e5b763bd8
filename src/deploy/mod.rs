//! Blueprint deployment from a published repository
//!
//! [`RenderDeployer`] starts a deploy and polls it until it reaches a terminal status or the
//! [`Deadline`] expires. A failed or timed-out deploy is reported as a [`DeployOutcome`], not
//! as an error.

mod clock;
mod render;
mod status;

pub use clock::{Clock, Deadline, ManualClock, SystemClock};
pub use render::{DeployError, RenderDeployer};
pub use status::{
    DeployOutcome, DeployStatus, StatusReport, DEPLOYED_PLACEHOLDER, FAILED_PLACEHOLDER,
    TIMEOUT_PLACEHOLDER,
};
