//! UI Components
//!
//! Reusable Leptos components.

mod chat_message;
mod chat_panel;
mod delete_confirm_button;
mod error_banner;
mod login_form;
mod nav_bar;
mod signup_form;
mod task_empty;
mod task_form;
mod task_item;
mod task_list;

pub use chat_message::ChatMessage;
pub use chat_panel::ChatPanel;
pub use delete_confirm_button::DeleteConfirmButton;
pub use error_banner::ErrorBanner;
pub use login_form::LoginForm;
pub use nav_bar::NavBar;
pub use signup_form::SignupForm;
pub use task_empty::TaskEmpty;
pub use task_form::TaskForm;
pub use task_item::TaskItem;
pub use task_list::TaskListView;
