//! UI layer for the dashboard: app shell, screens, and the backend worker.

pub mod app;

pub use app::DashboardApp;
