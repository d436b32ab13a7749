pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod mock;
pub mod reload;
pub mod session;
pub mod transform;
pub mod types;
pub mod validation;

pub use api::Platform;
pub use client::ApiClient;
pub use error::{BatchError, PlatformError, RequestError, SessionError};
pub use reload::{Query, ReloadBus, Resource};
pub use session::SessionStore;
