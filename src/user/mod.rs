//! n8n users: the managed `n8n_user` resource and the `n8n_user` / `n8n_users` data sources.

pub mod datasource;
pub mod resource;
pub mod translate;

pub use datasource::{UserDataSource, UserListing, UsersDataSource};
pub use resource::{UserEntity, UserPatch, UserResource};
