pub mod catalog;
pub mod controller;
pub mod favorites;
pub mod gui;
pub mod icon;
pub mod ingest;
pub mod launcher;
pub mod layout;
pub mod logging;
pub mod settings;
pub mod shortcut;
pub mod toast_log;
