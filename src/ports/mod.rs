//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the application core and an
//! external system (the Asana API, the calendar). Implementations live in
//! `src/adapters/`.

pub mod asana;
pub mod clock;

pub use asana::{
    ApiFuture, AsanaApi, CreatedTask, CustomFieldSetting, EnumOption, Project, User, Workspace,
};
pub use clock::Clock;
