//! Order domain types
//!
//! Cart lines, order lifecycle enums, server order snapshots, and the
//! client-side order view.

mod snapshot;
mod types;
mod view;

pub use snapshot::{LocalOrderRecord, ServerOrder, ServerOrderItem};
pub use types::{
    CartItem, LocalOrderStatus, OrderStatus, OrderType, PaymentMethod, PaymentStatus,
};
pub use view::OrderView;
