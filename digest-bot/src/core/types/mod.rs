//! Core types: inbound event, handler response, and Handler trait.

mod event;
mod handler;
mod response;

pub use event::InboundEvent;
pub use handler::Handler;
pub use response::HandlerResponse;
