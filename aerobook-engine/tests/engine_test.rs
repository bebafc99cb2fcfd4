//! Engine tests.
//!
//! The first group needs no database: operations whose preconditions fail
//! never touch the pool, so a lazy (never-dialed) client is enough.
//!
//! The `#[ignore]`d group runs the full booking workflow against Postgres.
//! Point `AEROBOOK__DATABASE__URL` at a scratch database and run:
//!
//! ```text
//! cargo test -p aerobook-engine -- --ignored --test-threads=1
//! ```

use aerobook_engine::{reply, BookingEngine, ErrorKind, OpError, Session};
use aerobook_store::app_config::DatabaseConfig;
use aerobook_store::DbClient;

fn lazy_engine() -> BookingEngine {
    let db = DbClient::lazy("postgres://localhost/unused").expect("lazy pool");
    BookingEngine::with_postgres_search(db)
}

#[tokio::test]
async fn operations_require_login() {
    let engine = lazy_engine();
    let session = Session::new();

    let book = engine.book(&session, 0).await;
    assert!(matches!(book, Err(OpError::NotLoggedIn)));
    assert_eq!(reply::book(&book), "Cannot book reservations, not logged in\n");

    let pay = engine.pay(&session, 1).await;
    assert!(matches!(pay, Err(OpError::NotLoggedIn)));
    assert_eq!(reply::pay(1, &pay), "Cannot pay, not logged in\n");

    let list = engine.list_reservations(&session).await;
    assert!(matches!(list, Err(OpError::NotLoggedIn)));

    let cancel = engine.cancel(&session, 1).await;
    assert!(matches!(cancel, Err(OpError::NotLoggedIn)));
    assert_eq!(reply::cancel(1, &cancel), "Failed to cancel reservation 1\n");
}

#[tokio::test]
async fn negative_initial_balance_is_rejected_before_the_store() {
    let engine = lazy_engine();

    let res = engine.create_customer("bob", "secret", -1).await;

    assert!(matches!(res, Err(OpError::NegativeBalance(-1))));
    assert_eq!(res.unwrap_err().kind(), ErrorKind::Validation);
}

mod with_database {
    use super::*;
    use aerobook_core::format::ReferenceFormatter;
    use aerobook_core::search::SearchRequest;

    async fn engine() -> BookingEngine {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "aerobook_engine=debug".into()),
            )
            .try_init();

        let url = std::env::var("AEROBOOK__DATABASE__URL")
            .expect("set AEROBOOK__DATABASE__URL to a scratch database");
        let db = DbClient::new(&DatabaseConfig {
            url,
            max_connections: 5,
            acquire_timeout_secs: 3,
        })
        .await
        .expect("connect");
        db.migrate().await.expect("migrate");

        let eng = BookingEngine::with_postgres_search(db);
        eng.clear_tables().await.expect("clear tables");
        eng
    }

    /// (fid, day, origin, dest, duration, capacity, price)
    async fn seed_flights(eng: &BookingEngine, flights: &[(i32, i32, &str, &str, i32, i32, i32)]) {
        let pool = eng.pool();
        for (fid, day, origin, dest, time, capacity, price) in flights {
            sqlx::query(
                r#"
                INSERT INTO flights
                    (fid, day_of_month, carrier_id, flight_num, origin_city, dest_city,
                     actual_time, capacity, price)
                VALUES ($1, $2, 'AS', $1::TEXT, $3, $4, $5, $6, $7)
                ON CONFLICT (fid) DO UPDATE
                    SET day_of_month = EXCLUDED.day_of_month,
                        origin_city = EXCLUDED.origin_city,
                        dest_city = EXCLUDED.dest_city,
                        actual_time = EXCLUDED.actual_time,
                        capacity = EXCLUDED.capacity,
                        price = EXCLUDED.price,
                        canceled = FALSE
                "#,
            )
            .bind(fid)
            .bind(day)
            .bind(origin)
            .bind(dest)
            .bind(time)
            .bind(capacity)
            .bind(price)
            .execute(pool)
            .await
            .expect("seed flight");
        }
    }

    async fn balance_of(eng: &BookingEngine, username: &str) -> i64 {
        sqlx::query_scalar("SELECT balance FROM users WHERE username = $1")
            .bind(username)
            .fetch_one(eng.pool())
            .await
            .expect("balance")
    }

    fn sea_lax(limit: usize) -> SearchRequest {
        SearchRequest {
            origin_city: "SEA".to_string(),
            dest_city: "LAX".to_string(),
            day_of_month: 5,
            direct_only: false,
            limit,
        }
    }

    #[tokio::test]
    #[ignore = "requires AEROBOOK__DATABASE__URL"]
    async fn search_ranks_one_hop_before_slower_direct() {
        let eng = engine().await;
        seed_flights(
            &eng,
            &[
                (101, 5, "SEA", "LAX", 120, 10, 300),
                (102, 5, "SEA", "SFO", 40, 10, 100),
                (103, 5, "SFO", "LAX", 50, 10, 150),
            ],
        )
        .await;
        let mut session = Session::new();

        let results = eng.search(&mut session, &sea_lax(3)).await.expect("search");

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].leg_count(), 2);
        assert_eq!(results[0].total_time(), 90);
        assert_eq!(results[1].first.fid, 101);

        // Idempotent against unchanged data.
        let again = eng.search(&mut session, &sea_lax(3)).await.expect("search");
        assert_eq!(results, again);
    }

    #[tokio::test]
    #[ignore = "requires AEROBOOK__DATABASE__URL"]
    async fn full_round_trip_restores_balance() {
        let eng = engine().await;
        seed_flights(&eng, &[(201, 5, "SEA", "LAX", 120, 10, 300)]).await;
        eng.create_customer("alice", "pw", 500).await.expect("create");

        let mut session = Session::new();
        eng.login(&mut session, "alice", "pw").await.expect("login");
        eng.search(&mut session, &sea_lax(1)).await.expect("search");

        let rid = eng.book(&session, 0).await.expect("book");
        let remaining = eng.pay(&session, rid).await.expect("pay");
        assert_eq!(remaining, 200);
        assert_eq!(balance_of(&eng, "alice").await, 200);

        // Listing twice without intervening writes renders identically.
        let first = eng.list_reservations(&session).await;
        let second = eng.list_reservations(&session).await;
        assert_eq!(
            reply::list_reservations(&first, &ReferenceFormatter),
            reply::list_reservations(&second, &ReferenceFormatter)
        );

        eng.cancel(&session, rid).await.expect("cancel");
        assert_eq!(balance_of(&eng, "alice").await, 500);

        // The canceled reservation is gone from the listing but its id
        // stays burned.
        let listed = eng.list_reservations(&session).await.expect("list");
        assert!(listed.is_empty());
    }

    #[tokio::test]
    #[ignore = "requires AEROBOOK__DATABASE__URL"]
    async fn capacity_is_never_exceeded() {
        let eng = engine().await;
        seed_flights(&eng, &[(301, 6, "SEA", "BOS", 300, 1, 500)]).await;
        eng.create_customer("carol", "pw", 0).await.expect("create");
        eng.create_customer("dave", "pw", 0).await.expect("create");

        let mut carol = Session::new();
        eng.login(&mut carol, "carol", "pw").await.expect("login");
        let req = SearchRequest {
            origin_city: "SEA".to_string(),
            dest_city: "BOS".to_string(),
            day_of_month: 6,
            direct_only: true,
            limit: 1,
        };
        eng.search(&mut carol, &req).await.expect("search");
        eng.book(&carol, 0).await.expect("first booking fits");

        let mut dave = Session::new();
        eng.login(&mut dave, "dave", "pw").await.expect("login");
        eng.search(&mut dave, &req).await.expect("search");
        let res = eng.book(&dave, 0).await;

        assert!(matches!(res, Err(OpError::FlightFull(301))));
        assert_eq!(reply::book(&res), "Booking failed\n");
    }

    #[tokio::test]
    #[ignore = "requires AEROBOOK__DATABASE__URL"]
    async fn overlapping_bookings_admit_exactly_one() {
        let eng = engine().await;
        seed_flights(&eng, &[(311, 6, "SEA", "DEN", 180, 1, 400)]).await;
        eng.create_customer("heidi", "pw", 0).await.expect("create");
        eng.create_customer("ivan", "pw", 0).await.expect("create");

        let req = SearchRequest {
            origin_city: "SEA".to_string(),
            dest_city: "DEN".to_string(),
            day_of_month: 6,
            direct_only: true,
            limit: 1,
        };
        let mut heidi = Session::new();
        eng.login(&mut heidi, "heidi", "pw").await.expect("login");
        eng.search(&mut heidi, &req).await.expect("search");
        let mut ivan = Session::new();
        eng.login(&mut ivan, "ivan", "pw").await.expect("login");
        eng.search(&mut ivan, &req).await.expect("search");

        // Both transactions run at once against the last seat. Serializable
        // isolation decides the winner; the loser sees either the full
        // flight or a serialization abort, and both render the same way.
        let (a, b) = tokio::join!(eng.book(&heidi, 0), eng.book(&ivan, 0));

        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
        let loser = if a.is_err() { &a } else { &b };
        assert!(matches!(
            loser,
            Err(OpError::FlightFull(311)) | Err(OpError::StoreConflict(_))
        ));
        assert_eq!(reply::book(loser), "Booking failed\n");

        let seats: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reservations WHERE fid1 = 311 AND canceled = FALSE",
        )
        .fetch_one(eng.pool())
        .await
        .expect("seat count");
        assert_eq!(seats, 1);
    }

    #[tokio::test]
    #[ignore = "requires AEROBOOK__DATABASE__URL"]
    async fn one_reservation_per_day_and_monotonic_rids() {
        let eng = engine().await;
        seed_flights(
            &eng,
            &[
                (401, 7, "SEA", "LAX", 100, 10, 100),
                (402, 7, "SEA", "LAX", 110, 10, 100),
                (403, 8, "SEA", "LAX", 100, 10, 100),
            ],
        )
        .await;
        eng.create_customer("erin", "pw", 1000).await.expect("create");

        let mut session = Session::new();
        eng.login(&mut session, "erin", "pw").await.expect("login");

        let day7 = SearchRequest {
            origin_city: "SEA".to_string(),
            dest_city: "LAX".to_string(),
            day_of_month: 7,
            direct_only: true,
            limit: 2,
        };
        eng.search(&mut session, &day7).await.expect("search");
        let first = eng.book(&session, 0).await.expect("book");

        let res = eng.book(&session, 1).await;
        assert!(matches!(res, Err(OpError::DuplicateDay(7))));
        assert_eq!(
            reply::book(&res),
            "You cannot book two flights in the same day\n"
        );

        // Cancel, then book another day: the freed id must not be reused.
        eng.cancel(&session, first).await.expect("cancel");
        let day8 = SearchRequest {
            day_of_month: 8,
            ..day7.clone()
        };
        eng.search(&mut session, &day8).await.expect("search");
        let second = eng.book(&session, 0).await.expect("book");
        assert!(second > first);
    }

    #[tokio::test]
    #[ignore = "requires AEROBOOK__DATABASE__URL"]
    async fn insufficient_balance_leaves_balance_untouched() {
        let eng = engine().await;
        seed_flights(&eng, &[(501, 9, "SEA", "LAX", 100, 10, 150)]).await;
        eng.create_customer("frank", "pw", 100).await.expect("create");

        let mut session = Session::new();
        eng.login(&mut session, "frank", "pw").await.expect("login");
        let req = SearchRequest {
            origin_city: "SEA".to_string(),
            dest_city: "LAX".to_string(),
            day_of_month: 9,
            direct_only: true,
            limit: 1,
        };
        eng.search(&mut session, &req).await.expect("search");
        let rid = eng.book(&session, 0).await.expect("book");

        let res = eng.pay(&session, rid).await;
        assert_eq!(
            reply::pay(rid, &res),
            "User has only 100 in account but itinerary costs 150\n"
        );
        assert_eq!(balance_of(&eng, "frank").await, 100);

        // Paying someone else's or a missing reservation reads as not found.
        let missing = eng.pay(&session, rid + 1000).await;
        assert!(matches!(missing, Err(OpError::UnpaidNotFound { .. })));
    }

    #[tokio::test]
    #[ignore = "requires AEROBOOK__DATABASE__URL"]
    async fn duplicate_usernames_are_rejected() {
        let eng = engine().await;
        eng.create_customer("grace", "pw", 10).await.expect("create");

        let res = eng.create_customer("grace", "other", 10).await;

        assert!(matches!(res, Err(OpError::DuplicateUser)));
        assert_eq!(reply::create_customer("grace", &res), "Failed to create user\n");
    }
}
