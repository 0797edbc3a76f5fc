//! `assist-chat` is the service side of AssistChat: a reqwest gateway to
//! the retrieval backend, a search session orchestrator, and an axum
//! proxy exposing the backend contract to the browser UI.

pub mod client;
pub mod config;
pub mod error;
pub mod server;
pub mod session;

pub use client::{RagClient, RagGateway};
pub use config::{ClientConfig, SearchConfig, ServerConfig};
pub use error::{AssistChatError, Result};
pub use server::{AppState, app_router, run_server};
pub use session::{SearchPhase, SearchSession, SessionSnapshot};
