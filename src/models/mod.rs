//! Database models and DTOs for all domain entities.

pub mod area;
pub mod assignment;
pub mod clinical;
pub mod inventory;
pub mod pagination;
pub mod patient;
pub mod staff;
pub mod training;
