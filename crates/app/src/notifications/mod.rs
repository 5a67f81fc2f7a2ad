//! Transactional email.

mod errors;
pub mod mailer;
pub mod sendgrid;
pub mod templates;

pub use errors::MailerError;
pub use mailer::*;
pub use sendgrid::{SendGridConfig, SendGridMailer};
