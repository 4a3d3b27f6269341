//! Frame-driven rendering session for the map engine.
//!
//! This crate wires `map-core` geometry and fog composition to scene content
//! from `map-content`. Consumers build a [`RenderSession`], feed it
//! [`SessionEvent`]s as the table changes, and call
//! [`RenderSession::render`] once per frame per viewer.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the session, its events and frame output
//! - [`registry`] serves zone grid metadata to templates
//! - [`config`] reads runtime settings from files and the environment
pub mod config;
pub mod error;
pub mod registry;
pub mod session;

pub use config::RuntimeConfig;
pub use error::{Result, SessionError};
pub use registry::{ZoneEntry, ZoneRegistry};
pub use session::{FrameOutput, FrameStats, RenderSession, SessionEvent, TemplateFrame};
