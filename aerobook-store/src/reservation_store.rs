use aerobook_core::{Flight, Reservation};
use sqlx::{Postgres, Transaction};

pub struct ReservationStore;

#[derive(sqlx::FromRow)]
struct ReservationRow {
    rid: i64,
    username: String,
    day_of_month: i32,
    fid1: i32,
    fid2: Option<i32>,
    price: i64,
    paid: bool,
    canceled: bool,
}

impl From<ReservationRow> for Reservation {
    fn from(row: ReservationRow) -> Self {
        Reservation {
            rid: row.rid,
            username: row.username,
            day_of_month: row.day_of_month,
            fid1: row.fid1,
            fid2: row.fid2,
            price: row.price,
            paid: row.paid,
            canceled: row.canceled,
        }
    }
}

#[derive(sqlx::FromRow)]
struct FlightRow {
    fid: i32,
    day_of_month: i32,
    carrier_id: String,
    flight_num: String,
    origin_city: String,
    dest_city: String,
    actual_time: i32,
    capacity: i32,
    price: i32,
}

impl From<FlightRow> for Flight {
    fn from(row: FlightRow) -> Self {
        Flight {
            fid: row.fid,
            day_of_month: row.day_of_month,
            carrier_id: row.carrier_id,
            flight_num: row.flight_num,
            origin_city: row.origin_city,
            dest_city: row.dest_city,
            actual_time: row.actual_time,
            capacity: row.capacity,
            price: row.price,
        }
    }
}

impl ReservationStore {
    /// Seats currently held on a flight: non-canceled reservations that
    /// reference it as either leg.
    pub async fn seats_taken(
        tx: &mut Transaction<'_, Postgres>,
        fid: i32,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM reservations
            WHERE (fid1 = $1 OR fid2 = $1) AND canceled = FALSE
            "#,
        )
        .bind(fid)
        .fetch_one(&mut **tx)
        .await
    }

    pub async fn flight_capacity(
        tx: &mut Transaction<'_, Postgres>,
        fid: i32,
    ) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar("SELECT capacity FROM flights WHERE fid = $1")
            .bind(fid)
            .fetch_optional(&mut **tx)
            .await
    }

    pub async fn flight_price(
        tx: &mut Transaction<'_, Postgres>,
        fid: i32,
    ) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar("SELECT price FROM flights WHERE fid = $1")
            .bind(fid)
            .fetch_optional(&mut **tx)
            .await
    }

    pub async fn flight(
        tx: &mut Transaction<'_, Postgres>,
        fid: i32,
    ) -> Result<Option<Flight>, sqlx::Error> {
        let row = sqlx::query_as::<_, FlightRow>(
            r#"
            SELECT fid, day_of_month, carrier_id, flight_num, origin_city, dest_city,
                   actual_time, capacity, price
            FROM flights
            WHERE fid = $1
            "#,
        )
        .bind(fid)
        .fetch_optional(&mut **tx)
        .await?;
        Ok(row.map(Flight::from))
    }

    pub async fn has_reservation_on_day(
        tx: &mut Transaction<'_, Postgres>,
        username: &str,
        day: i32,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM reservations
                WHERE username = $1 AND day_of_month = $2 AND canceled = FALSE
            )
            "#,
        )
        .bind(username)
        .bind(day)
        .fetch_one(&mut **tx)
        .await
    }

    /// One plus the largest rid ever issued. Canceled reservations are
    /// retained, so ids stay strictly increasing for the system's lifetime.
    pub async fn next_rid(tx: &mut Transaction<'_, Postgres>) -> Result<i64, sqlx::Error> {
        let max: i64 = sqlx::query_scalar("SELECT COALESCE(MAX(rid), 0) FROM reservations")
            .fetch_one(&mut **tx)
            .await?;
        Ok(max + 1)
    }

    pub async fn insert(
        tx: &mut Transaction<'_, Postgres>,
        rid: i64,
        username: &str,
        day: i32,
        fid1: i32,
        fid2: Option<i32>,
        price: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO reservations (rid, username, day_of_month, fid1, fid2, price, paid, canceled)
            VALUES ($1, $2, $3, $4, $5, $6, FALSE, FALSE)
            "#,
        )
        .bind(rid)
        .bind(username)
        .bind(day)
        .bind(fid1)
        .bind(fid2)
        .bind(price)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Looks up a non-canceled reservation owned by the user; returns its
    /// paid flag and total price.
    pub async fn find_active(
        tx: &mut Transaction<'_, Postgres>,
        rid: i64,
        username: &str,
    ) -> Result<Option<(bool, i64)>, sqlx::Error> {
        let row: Option<(bool, i64)> = sqlx::query_as(
            r#"
            SELECT paid, price FROM reservations
            WHERE rid = $1 AND username = $2 AND canceled = FALSE
            "#,
        )
        .bind(rid)
        .bind(username)
        .fetch_optional(&mut **tx)
        .await?;
        Ok(row)
    }

    pub async fn set_paid(
        tx: &mut Transaction<'_, Postgres>,
        rid: i64,
        paid: bool,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE reservations SET paid = $1 WHERE rid = $2")
            .bind(paid)
            .bind(rid)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    pub async fn mark_canceled(
        tx: &mut Transaction<'_, Postgres>,
        rid: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE reservations SET canceled = TRUE WHERE rid = $1")
            .bind(rid)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// All non-canceled reservations owned by the user, by ascending rid so
    /// repeated listings come back in the same order.
    pub async fn list_for_user(
        tx: &mut Transaction<'_, Postgres>,
        username: &str,
    ) -> Result<Vec<Reservation>, sqlx::Error> {
        let rows = sqlx::query_as::<_, ReservationRow>(
            r#"
            SELECT rid, username, day_of_month, fid1, fid2, price, paid, canceled
            FROM reservations
            WHERE username = $1 AND canceled = FALSE
            ORDER BY rid
            "#,
        )
        .bind(username)
        .fetch_all(&mut **tx)
        .await?;
        Ok(rows.into_iter().map(Reservation::from).collect())
    }

    pub async fn delete_all(tx: &mut Transaction<'_, Postgres>) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM reservations")
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
