//! Handlers for the relay chain. Each acts on one [`Route`](crate::mention::Route):
//! help → [`HelpHandler`], summary command → [`CommandHandler`], everything else →
//! [`StoreHandler`].

pub mod command_handler;
pub mod help_handler;
pub mod store_handler;

pub use command_handler::{CommandHandler, MSG_NOT_UNDERSTOOD_EXAMPLES};
pub use help_handler::{HelpHandler, GREETING_TEXT, HELP_TEXT};
pub use store_handler::StoreHandler;
