//! Delivery of confirmation codes over email and SMS

mod traits;

pub use traits::{EmailSender, SmsSender};
