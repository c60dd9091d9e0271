//! # Notely Models
//!
//! Database entities and request/response DTOs for the Notely API.
//!
//! - [`ids`]: strongly-typed UUID wrappers
//! - [`tenants`]: tenants, plans and the note quota
//! - [`users`]: users, roles and the public projection
//! - [`notes`]: notes and their DTOs
//! - [`auth`]: signup/signin bodies

pub mod auth;
pub mod ids;
pub mod notes;
pub mod tenants;
pub mod users;

pub use auth::{
    MeResponse, MessageResponse, SigninRequest, SigninResponse, SignupRequest, SignupResponse,
};
pub use ids::{NoteId, TenantId, UserId};
pub use notes::{
    CreateNoteDto, NOTE_COLUMNS, Note, NoteMutationResponse, NoteResponse, NotesResponse,
    UpdateNoteDto,
};
pub use tenants::{
    FREE_NOTE_LIMIT, InviteResponse, InviteUserDto, Plan, Tenant, TenantCounts,
    TenantDetailResponse, TenantPlanInfo, TenantSummary, UpgradeResponse, UpgradeUserDto,
    UpgradeUserResponse,
};
pub use users::{USER_COLUMNS, User, UserCredentials, UserRole};
