//! `pymes-navigation`: permission-aware routing, render gating and menus.
//!
//! Everything here consumes the evaluator from `pymes-auth`; nothing here
//! mutates a session.

pub mod config;
pub mod gate;
pub mod guard;
pub mod menu;
pub mod routes;

pub use config::{ConfigError, GateConfig, MissingRequirementPolicy};
pub use gate::{Gate, Rendered};
pub use guard::{
    DENIAL_MESSAGE, GuardOutcome, NavigationState, NoticeKind, Redirect, Route, RouteAccess,
    RouteGuard,
};
pub use menu::{NavigationNode, application_menu, filter_navigation};
pub use routes::{Resolution, RouteTable};
