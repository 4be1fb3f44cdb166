pub mod app;
pub mod errors;
pub mod format;
pub mod handlers;
pub mod models;
pub mod overview;
pub mod source;
pub mod state;
pub mod trend;
pub mod ui;

pub use app::router;
pub use source::{MaterialSource, resolve_base_url, resolve_legacy_url};
pub use state::AppState;
