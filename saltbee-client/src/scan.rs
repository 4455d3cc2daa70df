//! QR-scan coordination
//!
//! Turns a decoded code string into a started table session exactly once
//! per physical scan. Camera decoders invoke the decode callback several
//! times per code within a short window (frame-rate artifacts), so a
//! synchronous processing guard and a last-scanned memo sit in front of
//! the session-start call. The camera itself stays behind the
//! [`CodeScanner`] seam.

use crate::session::SessionContainer;
use crate::storage::{KeyValueStore, keys, write_key};
use shared::client::StartSessionRequest;
use shared::models::Customer;
use std::sync::Arc;
use thiserror::Error;

/// Decoder/camera error
#[derive(Debug, Error)]
#[error("scanner error: {0}")]
pub struct ScanError(pub String);

/// Handle on an active camera/decoder session
pub trait CodeScanner: Send {
    /// Stop the decoder. Must be safe to call when already stopped.
    fn stop(&mut self) -> Result<(), ScanError>;

    /// Whether a decoder session is currently running
    fn is_active(&self) -> bool;
}

/// Scanner handle for decode sources without a camera to manage
/// (tests, kiosks with an external scanner feeding decode events).
pub struct NoopScanner;

impl CodeScanner for NoopScanner {
    fn stop(&mut self) -> Result<(), ScanError> {
        Ok(())
    }

    fn is_active(&self) -> bool {
        false
    }
}

/// Which welcome message the UI should show after a connect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Welcome {
    /// Authenticated customer recognized by the backend
    ReturningCustomer,
    /// Backend recognized the guest from an earlier session
    ReturningGuest,
    /// Fresh guest session
    NewGuest,
}

/// Outcome of one decode callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Duplicate or overlapping decode, dropped without side effects
    Ignored,
    /// No table digits in the decoded text; scanning stays active
    InvalidCode { decoded: String },
    /// Session started and installed in the session container
    Connected { table: String, welcome: Welcome },
    /// Backend rejected the session start; a retry scan is possible
    Failed { message: String },
}

/// QR-scan coordinator
pub struct ScanCoordinator {
    scanner: Box<dyn CodeScanner>,
    store: Arc<dyn KeyValueStore>,
    processing: bool,
    last_scanned: Option<String>,
}

impl ScanCoordinator {
    pub fn new(scanner: Box<dyn CodeScanner>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            scanner,
            store,
            processing: false,
            last_scanned: None,
        }
    }

    /// Handle one decode callback from the scanner.
    ///
    /// Guest identity is pre-filled from `identity` when the customer is
    /// logged in, else a generic guest label. On success the decoder is
    /// stopped and the session container carries the new session; the
    /// last-scanned memo stays set until [`Self::close`] so trailing
    /// duplicate frames of the same physical code keep being dropped.
    pub async fn handle_decode(
        &mut self,
        decoded: &str,
        session: &mut SessionContainer,
        identity: Option<&Customer>,
    ) -> ScanOutcome {
        // Synchronous guards, checked before any await: the decoder may
        // fire several callbacks per physical code.
        if self.processing {
            tracing::debug!("decode dropped: scan already being processed");
            return ScanOutcome::Ignored;
        }
        if self.last_scanned.as_deref() == Some(decoded) {
            tracing::debug!("decode dropped: same code as last accepted scan");
            return ScanOutcome::Ignored;
        }

        self.processing = true;
        self.last_scanned = Some(decoded.to_string());

        let Some(table) = extract_table_id(decoded) else {
            tracing::warn!(decoded, "no table number in scanned code");
            self.processing = false;
            self.last_scanned = None;
            return ScanOutcome::InvalidCode {
                decoded: decoded.to_string(),
            };
        };

        // Stop the camera before the network call; a stop failure is
        // logged and must not block the session start.
        self.stop_scanner();

        let request = match identity {
            Some(customer) => StartSessionRequest::prefilled(customer),
            None => StartSessionRequest::anonymous(),
        };

        match session.begin_session(&table, &request).await {
            Ok(response) => {
                let welcome = if !response.is_guest && identity.is_some() {
                    Welcome::ReturningCustomer
                } else if !response.is_guest {
                    Welcome::ReturningGuest
                } else {
                    Welcome::NewGuest
                };

                // One-shot flag consumed on next load
                write_key(&*self.store, keys::QR_SCAN_SUCCESS, Some(table.as_str()));

                self.processing = false;
                ScanOutcome::Connected { table, welcome }
            }
            Err(err) => {
                tracing::warn!(table = %table, error = %err, "failed to start table session");
                self.processing = false;
                self.last_scanned = None;
                ScanOutcome::Failed {
                    message: err.to_string(),
                }
            }
        }
    }

    /// Close the scan UI: stop the decoder before yielding control, then
    /// clear the guards so a reopened scanner accepts fresh codes.
    pub fn close(&mut self) {
        self.stop_scanner();
        self.processing = false;
        self.last_scanned = None;
    }

    fn stop_scanner(&mut self) {
        if self.scanner.is_active()
            && let Err(err) = self.scanner.stop()
        {
            tracing::warn!(error = %err, "failed to stop code scanner");
        }
    }
}

/// First run of decimal digits in the decoded text,
/// e.g. "TABLE-07-ABC" -> "07"
fn extract_table_id(decoded: &str) -> Option<String> {
    let start = decoded.find(|c: char| c.is_ascii_digit())?;
    let digits: String = decoded[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    Some(digits)
}
