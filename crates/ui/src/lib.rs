pub mod dialog;
pub mod prompt;
pub mod routes;

pub use dialog::{ConfirmDialog, ConfirmDialogConfig, ConfirmOutcome};
pub use routes::{contracts_routes, feature_routes, tiers_routes, Page, Route, RouteMatch, RouteTable};
