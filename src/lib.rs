//! Dockable terminal chat widget backed by a remote chatbot API.
//!
//! The widget renders a floating button in one corner of the terminal;
//! opening it reveals a chat panel whose display settings and welcome
//! message come from the configuration endpoint, and whose replies come
//! from the chat endpoint.

pub mod app;
pub mod client;
pub mod config;
pub mod controller;
pub mod model;
pub mod ui;

pub use client::{ChatClient, ClientError};
pub use config::WidgetOptions;
pub use controller::{ChatController, Phase, SendRequest};
pub use model::{ChatbotConfig, CornerPosition, Message, Role};
pub use ui::ChatDock;
