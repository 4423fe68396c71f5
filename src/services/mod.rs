pub mod customer_manager;
pub mod invoice_manager;
pub mod log_message_manager;
