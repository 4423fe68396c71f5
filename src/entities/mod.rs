pub mod prelude;

pub mod customer;
pub mod invoice;
pub mod log_message;
