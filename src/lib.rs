pub mod action;
pub mod app;
pub mod event;
pub mod format;
pub mod launch_agent;
pub mod menu;
pub mod settings;
pub mod system;
pub mod ui;
