//! Business logic services.

pub mod area;
pub mod assignment;
pub mod clinical;
pub mod dashboard;
pub mod inventory;
pub mod patient;
pub mod staff;
pub mod training;
