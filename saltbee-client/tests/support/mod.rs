//! Shared test support: a recording mock of the ordering API plus
//! fixture builders.

#![allow(dead_code)]

use async_trait::async_trait;
use rust_decimal_macros::dec;
use saltbee_client::{ClientError, ClientResult, CodeScanner, OrderingApi, ScanError};
use shared::client::{
    AddOrderItemRequest, AuthTokens, CreateOrderRequest, GoogleLoginRequest, LoginRequest,
    OrderCreated, SignupRequest, StartSessionRequest, StartSessionResponse,
};
use shared::models::{Customer, MenuItem};
use shared::order::{CartItem, OrderStatus, ServerOrder};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Records every call and serves scripted responses.
#[derive(Default)]
pub struct MockApi {
    calls: Mutex<Vec<String>>,
    /// Scripted session-start response; `None` makes the call fail
    pub session: Mutex<Option<StartSessionResponse>>,
    /// Scripted current order; `None` answers 404
    pub order: Mutex<Option<ServerOrder>>,
    /// Answer `current_order` with 401 (dead session token)
    pub refresh_unauthorized: AtomicBool,
    /// Fail add-item calls starting at this zero-based index
    pub fail_adds_from: Mutex<Option<usize>>,
    add_count: AtomicUsize,
    /// Scripted auth tokens; `None` makes login/signup fail
    pub tokens: Mutex<Option<AuthTokens>>,
    /// Scripted profile for `current_customer`
    pub customer: Mutex<Option<Customer>>,
    bearer: Mutex<Option<String>>,
}

impl MockApi {
    pub fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }
}

#[async_trait]
impl OrderingApi for MockApi {
    async fn start_session(
        &self,
        table_id: &str,
        _request: &StartSessionRequest,
    ) -> ClientResult<StartSessionResponse> {
        self.record(format!("start_session:{table_id}"));
        self.session
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ClientError::Internal("session start rejected".into()))
    }

    async fn add_order_item(
        &self,
        table_id: &str,
        _session_token: &str,
        request: &AddOrderItemRequest,
    ) -> ClientResult<()> {
        let index = self.add_count.fetch_add(1, Ordering::SeqCst);
        self.record(format!("add_item:{table_id}:{}", request.menu_item_id));
        if let Some(from) = *self.fail_adds_from.lock().unwrap() {
            if index >= from {
                return Err(ClientError::Internal("item rejected".into()));
            }
        }
        Ok(())
    }

    async fn current_order(
        &self,
        table_id: &str,
        session_token: &str,
    ) -> ClientResult<ServerOrder> {
        self.record(format!("current_order:{table_id}:{session_token}"));
        if self.refresh_unauthorized.load(Ordering::SeqCst) {
            return Err(ClientError::Unauthorized);
        }
        self.order
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ClientError::NotFound("no open order".into()))
    }

    async fn request_bill(&self, table_id: &str, session_token: &str) -> ClientResult<()> {
        self.record(format!("request_bill:{table_id}:{session_token}"));
        Ok(())
    }

    async fn login(
        &self,
        request: &LoginRequest,
        session_token: Option<&str>,
    ) -> ClientResult<AuthTokens> {
        self.record(format!(
            "login:{}:{}",
            request.email,
            session_token.unwrap_or("-")
        ));
        self.tokens
            .lock()
            .unwrap()
            .clone()
            .ok_or(ClientError::Unauthorized)
    }

    async fn signup(&self, request: &SignupRequest) -> ClientResult<AuthTokens> {
        self.record(format!("signup:{}", request.email));
        self.tokens
            .lock()
            .unwrap()
            .clone()
            .ok_or(ClientError::Unauthorized)
    }

    async fn login_with_google(
        &self,
        _request: &GoogleLoginRequest,
        session_token: Option<&str>,
    ) -> ClientResult<AuthTokens> {
        self.record(format!("login_google:{}", session_token.unwrap_or("-")));
        self.tokens
            .lock()
            .unwrap()
            .clone()
            .ok_or(ClientError::Unauthorized)
    }

    async fn logout(&self) -> ClientResult<()> {
        self.record("logout");
        Ok(())
    }

    async fn current_customer(&self) -> ClientResult<Customer> {
        self.record("current_customer");
        self.customer
            .lock()
            .unwrap()
            .clone()
            .ok_or(ClientError::Unauthorized)
    }

    async fn menu_items(&self) -> ClientResult<Vec<MenuItem>> {
        self.record("menu_items");
        Ok(Vec::new())
    }

    async fn create_order(&self, request: &CreateOrderRequest) -> ClientResult<OrderCreated> {
        self.record(format!("create_order:{}", request.items.len()));
        Ok(OrderCreated {
            order_id: Some("ord-local-1".into()),
        })
    }

    fn set_bearer_token(&self, token: Option<String>) {
        *self.bearer.lock().unwrap() = token;
    }

    fn bearer_token(&self) -> Option<String> {
        self.bearer.lock().unwrap().clone()
    }
}

// ========== Fixtures ==========

pub fn session_response(token: &str, table_id: i64) -> StartSessionResponse {
    StartSessionResponse {
        session_token: token.to_string(),
        is_guest: true,
        table_id,
    }
}

pub fn server_order(order_id: &str, table_id: i64) -> ServerOrder {
    ServerOrder {
        order_id: order_id.to_string(),
        table_id,
        items: vec![],
        total_amount: dec!(25.00),
        final_amount: dec!(27.50),
        status: OrderStatus::Pending,
        tax_amount: Some(dec!(2.50)),
        service_charge_amount: None,
    }
}

pub fn cart_item(id: &str, price: rust_decimal::Decimal, quantity: u32) -> CartItem {
    CartItem {
        id: id.to_string(),
        name: id.to_string(),
        price,
        image: None,
        category: None,
        quantity,
    }
}

pub fn customer(name: &str) -> Customer {
    Customer {
        id: "cust-1".into(),
        name: name.to_string(),
        email: format!("{}@example.test", name.to_lowercase()),
        phone: Some("+34600000000".into()),
        picture: None,
    }
}

// ========== Scanner stub ==========

/// Observable scanner state shared with the coordinator-owned stub
#[derive(Default)]
pub struct ScannerProbe {
    pub active: bool,
    pub stop_calls: usize,
    pub fail_stop: bool,
}

pub struct StubScanner(pub Arc<Mutex<ScannerProbe>>);

impl StubScanner {
    pub fn active() -> (Self, Arc<Mutex<ScannerProbe>>) {
        let probe = Arc::new(Mutex::new(ScannerProbe {
            active: true,
            ..Default::default()
        }));
        (Self(probe.clone()), probe)
    }
}

impl CodeScanner for StubScanner {
    fn stop(&mut self) -> Result<(), ScanError> {
        let mut probe = self.0.lock().unwrap();
        probe.stop_calls += 1;
        if probe.fail_stop {
            return Err(ScanError("camera busy".into()));
        }
        probe.active = false;
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.0.lock().unwrap().active
    }
}
