//! Concurrency properties of the booking engine, driven directly against
//! the engine rather than through HTTP.

mod helpers;

use helpers::{unique, TestApp};
use railhub_service::booking::BookingError;

/// N concurrent grants of Q seats against capacity (N-1)*Q: exactly N-1
/// succeed, and the ledger never oversells.
#[tokio::test]
async fn test_no_oversell_under_concurrent_grants() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    const N: usize = 4;
    const Q: i32 = 3;

    let capacity = (N as i32 - 1) * Q;
    let train_id = app
        .create_train(&unique("Contended"), "Delhi", "Mumbai", capacity)
        .await;

    let mut user_ids = Vec::new();
    for i in 0..N {
        let username = unique(&format!("racer{i}"));
        user_ids.push(app.create_user(&username, "Valid1Password", "user").await);
    }

    let mut handles = Vec::new();
    for user_id in user_ids {
        let engine = app.engine();
        handles.push(tokio::spawn(async move {
            engine.book(user_id, train_id, Q).await
        }));
    }

    let mut successes = 0;
    let mut rejections = 0;
    for handle in handles {
        match handle.await.expect("task panicked") {
            Ok(confirmation) => {
                assert_eq!(confirmation.seats, Q);
                successes += 1;
            }
            Err(
                BookingError::InsufficientSeats { .. } | BookingError::ConcurrentConflict,
            ) => rejections += 1,
            Err(other) => panic!("unexpected booking failure: {other}"),
        }
    }

    assert_eq!(successes, N - 1);
    assert_eq!(rejections, 1);

    // Ledger identity: available = total - sum(active bookings)
    assert_eq!(app.available_seats(train_id).await, 0);
    assert_eq!(app.active_booked_seats(train_id).await, capacity as i64);
}

/// Two concurrent cancellations of the same booking: the restore happens
/// exactly once.
#[tokio::test]
async fn test_concurrent_double_cancel_restores_once() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let username = unique("doublecancel");
    let user_id = app.create_user(&username, "Valid1Password", "user").await;
    let train_id = app
        .create_train(&unique("RaceCancel"), "Kochi", "Goa", 12)
        .await;

    let confirmation = app
        .engine()
        .book(user_id, train_id, 5)
        .await
        .expect("booking failed");
    assert_eq!(app.available_seats(train_id).await, 7);

    let engine_a = app.engine();
    let engine_b = app.engine();
    let booking_id = confirmation.booking_id;

    let a = tokio::spawn(async move { engine_a.cancel(user_id, booking_id).await });
    let b = tokio::spawn(async move { engine_b.cancel(user_id, booking_id).await });

    let results = [a.await.unwrap(), b.await.unwrap()];
    let ok_count = results.iter().filter(|r| r.is_ok()).count();
    let already = results
        .iter()
        .filter(|r| matches!(r, Err(BookingError::AlreadyCancelled)))
        .count();

    assert_eq!(ok_count, 1);
    assert_eq!(already, 1);
    assert_eq!(app.available_seats(train_id).await, 12);
}

/// Grants across different trains do not contend: all succeed.
#[tokio::test]
async fn test_independent_trains_book_in_parallel() {
    let Some(app) = TestApp::new().await else {
        return;
    };

    let mut handles = Vec::new();
    for i in 0..4 {
        let username = unique(&format!("parallel{i}"));
        let user_id = app.create_user(&username, "Valid1Password", "user").await;
        let train_id = app
            .create_train(&unique("Line"), "Start", "End", 10)
            .await;
        let engine = app.engine();
        handles.push((
            train_id,
            tokio::spawn(async move { engine.book(user_id, train_id, 2).await }),
        ));
    }

    for (train_id, handle) in handles {
        handle
            .await
            .expect("task panicked")
            .expect("independent booking failed");
        assert_eq!(app.available_seats(train_id).await, 8);
    }
}

/// Capacity invariant holds at every commit point across a mixed
/// grant/cancel sequence.
#[tokio::test]
async fn test_capacity_invariant_through_sequence() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let train_id = app
        .create_train(&unique("Invariant"), "Lucknow", "Varanasi", 20)
        .await;

    let mut booking_ids = Vec::new();
    for i in 0..3 {
        let username = unique(&format!("inv{i}"));
        let user_id = app.create_user(&username, "Valid1Password", "user").await;
        let confirmation = app
            .engine()
            .book(user_id, train_id, i + 1)
            .await
            .expect("booking failed");
        booking_ids.push((user_id, confirmation.booking_id));

        let available = app.available_seats(train_id).await;
        let active = app.active_booked_seats(train_id).await;
        assert_eq!(available as i64 + active, 20);
    }

    for (user_id, booking_id) in booking_ids {
        app.engine()
            .cancel(user_id, booking_id)
            .await
            .expect("cancel failed");

        let available = app.available_seats(train_id).await;
        let active = app.active_booked_seats(train_id).await;
        assert_eq!(available as i64 + active, 20);
    }

    assert_eq!(app.available_seats(train_id).await, 20);
}
