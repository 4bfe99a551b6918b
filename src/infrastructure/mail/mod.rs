pub mod smtp_delivery;

pub use smtp_delivery::SmtpDelivery;
