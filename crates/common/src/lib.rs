//! Shared types used across the rent-management workspace.

pub mod types;

pub use types::{AggregateId, EntityId, TenantId, UnitId};
