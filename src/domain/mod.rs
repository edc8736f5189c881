//! Domain layer: backend record types and the error taxonomy.
//!
//! Nothing here performs I/O. The records mirror what the job-board backend
//! returns and are treated as immutable snapshots on the client side.
//!
//! - [`error`]: Error types and result alias
//! - [`models`]: Jobs, companies, tags, users and auth payloads

pub mod error;
pub mod models;

pub use error::{JobBoardError, Result};
pub use models::{
    Company, CompanyJobSummary, CompanyRegistration, HealthStatus, Job, NewJob, Role, Tag, TokenResponse,
    User, UserRegistration,
};
