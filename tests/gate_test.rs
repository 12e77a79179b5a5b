use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};

use spotify_export::{
    gate::{GateError, token_gate},
    types::Token,
};

fn make_token(access_token: &str) -> Token {
    Token::issued_now(access_token.to_string(), "Bearer".to_string(), 3600)
}

#[tokio::test]
async fn test_waiter_receives_sent_token() {
    let (signal, waiter) = token_gate();

    let sent = signal.send_with(|| make_token("abc")).await.unwrap();
    let received = waiter.await_token(Duration::from_secs(1)).await.unwrap();

    assert_eq!(sent, received);
    assert_eq!(received.access_token, "abc");
}

#[tokio::test]
async fn test_waiter_is_released_by_a_later_send() {
    let (signal, waiter) = token_gate();
    let signal = Arc::new(signal);

    let sender = Arc::clone(&signal);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        sender.send_with(|| make_token("late")).await.unwrap();
    });

    let token = waiter.await_token(Duration::from_secs(5)).await.unwrap();
    assert_eq!(token.access_token, "late");
}

#[tokio::test]
async fn test_second_send_is_rejected_without_building_a_token() {
    let (signal, waiter) = token_gate();
    signal.send_with(|| make_token("first")).await.unwrap();

    let built = AtomicBool::new(false);
    let second = signal
        .send_with(|| {
            built.store(true, Ordering::SeqCst);
            make_token("second")
        })
        .await;

    assert_eq!(second, Err(GateError::AlreadyResolved));
    assert!(!built.load(Ordering::SeqCst));

    let token = waiter.await_token(Duration::from_secs(1)).await.unwrap();
    assert_eq!(token.access_token, "first");
}

#[tokio::test]
async fn test_times_out_without_a_token() {
    let (signal, waiter) = token_gate();

    let result = waiter.await_token(Duration::from_millis(50)).await;

    assert_eq!(result, Err(GateError::TimedOut(Duration::from_millis(50))));
    assert!(!signal.is_resolved().await);
}

#[tokio::test]
async fn test_dropped_signal_closes_the_gate() {
    let (signal, waiter) = token_gate();
    drop(signal);

    let result = waiter.await_token(Duration::from_secs(5)).await;

    assert_eq!(result, Err(GateError::Closed));
}

#[tokio::test]
async fn test_send_after_waiter_gave_up_reports_closed() {
    let (signal, waiter) = token_gate();
    drop(waiter);

    let result = signal.send_with(|| make_token("abc")).await;

    assert_eq!(result, Err(GateError::Closed));
    assert!(signal.is_resolved().await);
}

#[tokio::test]
async fn test_is_resolved_tracks_delivery() {
    let (signal, _waiter) = token_gate();

    assert!(!signal.is_resolved().await);
    signal.send_with(|| make_token("abc")).await.unwrap();
    assert!(signal.is_resolved().await);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_senders_deliver_exactly_once() {
    let (signal, waiter) = token_gate();
    let signal = Arc::new(signal);
    let delivered = Arc::new(AtomicUsize::new(0));

    let mut handles = Vec::new();
    for i in 0..16 {
        let signal = Arc::clone(&signal);
        let delivered = Arc::clone(&delivered);
        handles.push(tokio::spawn(async move {
            if signal
                .send_with(|| make_token(&format!("token-{}", i)))
                .await
                .is_ok()
            {
                delivered.fetch_add(1, Ordering::SeqCst);
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(delivered.load(Ordering::SeqCst), 1);
    let token = waiter.await_token(Duration::from_secs(1)).await.unwrap();
    assert!(token.access_token.starts_with("token-"));
}
