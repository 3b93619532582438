pub mod health;
pub mod add;
pub mod list;
pub mod update;
pub mod delete;
pub mod categories;
pub mod client_config;
pub mod client;

pub use health::health_handler;
pub use add::add_record_handler;
pub use list::list_records_handler;
pub use update::update_record_handler;
pub use delete::delete_record_handler;
pub use categories::list_categories_handler;
pub use client_config::client_config_handler;
pub use client::serve_client;
