//! # ViewModel Module
//!
//! Page behavior split by responsibility: routing between views, binding
//! controls to API calls, drawing JSON into targets and theming.

pub mod binder;
pub mod payload;
pub mod renderer;
pub mod router;
pub mod theme_manager;

pub use binder::{BinderRegistry, Binding, PendingCall, Presentation, TriggerKind};
pub use payload::{coerce_number, PathTemplate, PayloadShape};
pub use router::{ViewRouter, HOME_VIEW};
pub use theme_manager::ThemeManager;
