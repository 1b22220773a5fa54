//! Chrome DevTools Protocol (CDP) client.
//!
//! Connects to Chrome/Chromium over WebSocket and speaks the CDP JSON-RPC
//! protocol. Only the domains the probe needs are wired up: Page, Runtime,
//! Network, and Emulation.

mod client;
mod error;
mod protocol;
mod session;

pub use client::CdpClient;
pub use error::CdpError;
pub use protocol::{BrowserVersion, CdpEvent, CdpRequest, CdpResponse, PageInfo};
pub use session::PageSession;
