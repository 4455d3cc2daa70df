mod support;

use saltbee_client::{
    ClientStore, KeyValueStore, ScanCoordinator, ScanOutcome, SessionContainer, Welcome,
};
use std::sync::Arc;
use support::{MockApi, StubScanner, customer, session_response};

struct Fixture {
    api: Arc<MockApi>,
    store: Arc<dyn KeyValueStore>,
    session: SessionContainer,
    scan: ScanCoordinator,
    probe: Arc<std::sync::Mutex<support::ScannerProbe>>,
}

fn fixture() -> Fixture {
    let api = Arc::new(MockApi::default());
    *api.session.lock().unwrap() = Some(session_response("tok1", 7));

    let store: Arc<dyn KeyValueStore> = Arc::new(ClientStore::open_in_memory().unwrap());
    let session = SessionContainer::new(api.clone(), store.clone());
    let (scanner, probe) = StubScanner::active();
    let scan = ScanCoordinator::new(Box::new(scanner), store.clone());

    Fixture {
        api,
        store,
        session,
        scan,
        probe,
    }
}

#[tokio::test]
async fn test_scan_extracts_digits_and_starts_session() {
    let mut f = fixture();

    let outcome = f
        .scan
        .handle_decode("TABLE-07-ABC", &mut f.session, None)
        .await;

    assert_eq!(
        outcome,
        ScanOutcome::Connected {
            table: "07".into(),
            welcome: Welcome::NewGuest,
        }
    );
    assert_eq!(f.api.count("start_session:07"), 1);

    // Session context installed from the response
    assert_eq!(f.session.table_number(), Some("7"));
    assert_eq!(f.session.session_token(), Some("tok1"));

    // Camera stopped before the network call
    assert!(!f.probe.lock().unwrap().active);

    // One-shot success flag set, consumed on next read
    assert_eq!(
        f.store.take("qr-scan-success").unwrap().as_deref(),
        Some("07")
    );
    assert_eq!(f.store.take("qr-scan-success").unwrap(), None);
}

#[tokio::test]
async fn test_duplicate_decode_is_dropped() {
    let mut f = fixture();

    let first = f
        .scan
        .handle_decode("TABLE-07-ABC", &mut f.session, None)
        .await;
    assert!(matches!(first, ScanOutcome::Connected { .. }));

    // The decoder fires the same code again a frame later
    let second = f
        .scan
        .handle_decode("TABLE-07-ABC", &mut f.session, None)
        .await;
    assert_eq!(second, ScanOutcome::Ignored);

    // Exactly one session-start request went out
    assert_eq!(f.api.count("start_session:"), 1);
}

#[tokio::test]
async fn test_scan_without_digits_keeps_scanning() {
    let mut f = fixture();

    let outcome = f
        .scan
        .handle_decode("no digits here", &mut f.session, None)
        .await;

    assert_eq!(
        outcome,
        ScanOutcome::InvalidCode {
            decoded: "no digits here".into(),
        }
    );
    assert!(f.api.calls().is_empty());

    // Decoder still running, and the guard was reset: the next decode of
    // a valid code goes through
    assert!(f.probe.lock().unwrap().active);
    let outcome = f.scan.handle_decode("12", &mut f.session, None).await;
    assert!(matches!(outcome, ScanOutcome::Connected { .. }));
}

#[tokio::test]
async fn test_failed_session_start_allows_retry_of_same_code() {
    let mut f = fixture();
    *f.api.session.lock().unwrap() = None;

    let outcome = f.scan.handle_decode("7", &mut f.session, None).await;
    assert!(matches!(outcome, ScanOutcome::Failed { .. }));
    assert_eq!(f.session.session_token(), None);

    // Guards were cleared, so rescanning the very same code retries
    *f.api.session.lock().unwrap() = Some(session_response("tok1", 7));
    let outcome = f.scan.handle_decode("7", &mut f.session, None).await;
    assert!(matches!(outcome, ScanOutcome::Connected { .. }));
    assert_eq!(f.api.count("start_session:"), 2);
}

#[tokio::test]
async fn test_welcome_distinguishes_customer_and_guest() {
    // Linked session + logged-in identity
    let mut f = fixture();
    f.api.session.lock().unwrap().as_mut().unwrap().is_guest = false;
    let identity = customer("Mina");
    let outcome = f
        .scan
        .handle_decode("7", &mut f.session, Some(&identity))
        .await;
    assert!(matches!(
        outcome,
        ScanOutcome::Connected {
            welcome: Welcome::ReturningCustomer,
            ..
        }
    ));

    // Linked session without local identity
    let mut f = fixture();
    f.api.session.lock().unwrap().as_mut().unwrap().is_guest = false;
    let outcome = f.scan.handle_decode("7", &mut f.session, None).await;
    assert!(matches!(
        outcome,
        ScanOutcome::Connected {
            welcome: Welcome::ReturningGuest,
            ..
        }
    ));

    // Plain guest session
    let mut f = fixture();
    let outcome = f.scan.handle_decode("7", &mut f.session, None).await;
    assert!(matches!(
        outcome,
        ScanOutcome::Connected {
            welcome: Welcome::NewGuest,
            ..
        }
    ));
}

#[tokio::test]
async fn test_scanner_stop_failure_is_not_fatal() {
    let mut f = fixture();
    f.probe.lock().unwrap().fail_stop = true;

    let outcome = f.scan.handle_decode("7", &mut f.session, None).await;
    assert!(matches!(outcome, ScanOutcome::Connected { .. }));
    assert_eq!(f.probe.lock().unwrap().stop_calls, 1);
}

#[tokio::test]
async fn test_close_stops_active_decoder_and_rearms() {
    let mut f = fixture();

    let outcome = f.scan.handle_decode("7", &mut f.session, None).await;
    assert!(matches!(outcome, ScanOutcome::Connected { .. }));

    f.scan.close();

    // After close the same code is accepted again (fresh scan UI)
    let outcome = f.scan.handle_decode("7", &mut f.session, None).await;
    assert!(matches!(outcome, ScanOutcome::Connected { .. }));
    assert_eq!(f.api.count("start_session:"), 2);
}
