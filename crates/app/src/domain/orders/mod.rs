//! Orders

pub mod number;
pub mod records;
pub(crate) mod repository;
pub mod status;

pub use number::generate_order_number;
pub use records::{Address, OrderItemRecord, OrderRecord, OrderUuid};
pub use status::{OrderStatus, PaymentEvent, PaymentStatus, TransitionError};
