//! Saltbee Client - customer ordering client for the Saltbee backend
//!
//! Client-side session/cart/order coordination over the remote ordering
//! API: QR table sessions, cart management, checkout submission, customer
//! auth, and live order-status snapshots. State is written through to an
//! embedded key/value store so a restart restores the session.

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod history;
pub mod http;
pub mod scan;
pub mod session;
pub mod storage;

pub use auth::{AuthManager, LoginSummary};
pub use cart::CartContainer;
pub use checkout::{Checkout, CheckoutError, CheckoutOutcome, PaymentSelection};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use history::OrderHistory;
pub use http::{HttpClient, OrderingApi};
pub use scan::{CodeScanner, ScanCoordinator, ScanError, ScanOutcome, Welcome};
pub use session::{SessionContainer, SessionPhase, SubmitError};
pub use storage::{ClientStore, KeyValueStore, StorageError};

// Re-export shared types for convenience
pub use shared::models::{Customer, MenuItem};
pub use shared::order::{CartItem, OrderStatus, OrderType, OrderView, ServerOrder};
