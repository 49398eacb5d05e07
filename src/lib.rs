pub mod app;
pub mod chat;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod handlers;
pub mod journal;
pub mod ledger;
pub mod metrics;
pub mod models;
pub mod overview;
pub mod state;
pub mod tasks;
pub mod ui;

pub use app::router;
pub use chat::{MentorChat, ResponseProvider, ScriptedMentor};
pub use config::Config;
pub use dashboard::Dashboard;
pub use state::AppState;
