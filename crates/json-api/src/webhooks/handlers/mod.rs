//! Webhook Handlers

pub(crate) mod payment;
