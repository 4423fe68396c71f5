pub use super::customer::Entity as Customer;
pub use super::invoice::Entity as Invoice;
pub use super::log_message::Entity as LogMessage;
