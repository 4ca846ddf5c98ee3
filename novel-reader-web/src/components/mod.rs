mod auth_forms;
mod bookshelf;
mod history_list;
mod modal;
mod nav;
mod reader;
mod settings;
mod sidebar;
mod toast;

pub use auth_forms::*;
pub use bookshelf::*;
pub use history_list::*;
pub use nav::*;
pub use reader::*;
pub use toast::*;
