// Profile aggregate: persistence, mutations and the profile-scoped HTTP surface.

pub mod handlers;
pub mod mutations;
pub mod repository;
