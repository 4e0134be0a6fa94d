//! UI Components
//!
//! Render from the controller's state and forward every mutation to its intents.

mod error_notification;
mod footer;
mod header;
mod todo_item;
mod todo_list;

pub use error_notification::ErrorNotification;
pub use footer::Footer;
pub use header::Header;
pub use todo_item::TodoItem;
pub use todo_list::TodoList;
