use aerobook_core::repository::{BoxError, FlightRepository};
use aerobook_core::Flight;
use async_trait::async_trait;

pub struct PostgresFlightRepository {
    pub pool: sqlx::PgPool,
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

// The self-join row carries both legs, column-aliased the same way on each
// side.
#[derive(sqlx::FromRow)]
struct HopRow {
    fid1: i32,
    day1: i32,
    carrier1: String,
    num1: String,
    origin1: String,
    dest1: String,
    time1: i32,
    cap1: i32,
    price1: i32,
    fid2: i32,
    day2: i32,
    carrier2: String,
    num2: String,
    origin2: String,
    dest2: String,
    time2: i32,
    cap2: i32,
    price2: i32,
}

impl From<HopRow> for (Flight, Flight) {
    fn from(row: HopRow) -> Self {
        (
            Flight {
                fid: row.fid1,
                day_of_month: row.day1,
                carrier_id: row.carrier1,
                flight_num: row.num1,
                origin_city: row.origin1,
                dest_city: row.dest1,
                actual_time: row.time1,
                capacity: row.cap1,
                price: row.price1,
            },
            Flight {
                fid: row.fid2,
                day_of_month: row.day2,
                carrier_id: row.carrier2,
                flight_num: row.num2,
                origin_city: row.origin2,
                dest_city: row.dest2,
                actual_time: row.time2,
                capacity: row.cap2,
                price: row.price2,
            },
        )
    }
}

#[async_trait]
impl FlightRepository for PostgresFlightRepository {
    async fn count_direct(&self, origin: &str, dest: &str, day: i32) -> Result<i64, BoxError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM flights
            WHERE origin_city = $1 AND dest_city = $2 AND day_of_month = $3
              AND canceled = FALSE
            "#,
        )
        .bind(origin)
        .bind(dest)
        .bind(day)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn direct_flights(
        &self,
        origin: &str,
        dest: &str,
        day: i32,
        limit: i64,
    ) -> Result<Vec<Flight>, BoxError> {
        let rows = sqlx::query_as::<_, FlightRow>(
            r#"
            SELECT fid, day_of_month, carrier_id, flight_num, origin_city, dest_city,
                   actual_time, capacity, price
            FROM flights
            WHERE origin_city = $1 AND dest_city = $2 AND day_of_month = $3
              AND canceled = FALSE
            ORDER BY actual_time, fid
            LIMIT $4
            "#,
        )
        .bind(origin)
        .bind(dest)
        .bind(day)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Flight::from).collect())
    }

    async fn one_hop_flights(
        &self,
        origin: &str,
        dest: &str,
        day: i32,
        limit: i64,
    ) -> Result<Vec<(Flight, Flight)>, BoxError> {
        let rows = sqlx::query_as::<_, HopRow>(
            r#"
            SELECT x1.fid AS fid1, x1.day_of_month AS day1, x1.carrier_id AS carrier1,
                   x1.flight_num AS num1, x1.origin_city AS origin1, x1.dest_city AS dest1,
                   x1.actual_time AS time1, x1.capacity AS cap1, x1.price AS price1,
                   x2.fid AS fid2, x2.day_of_month AS day2, x2.carrier_id AS carrier2,
                   x2.flight_num AS num2, x2.origin_city AS origin2, x2.dest_city AS dest2,
                   x2.actual_time AS time2, x2.capacity AS cap2, x2.price AS price2
            FROM flights x1
            JOIN flights x2
              ON x1.dest_city = x2.origin_city AND x1.day_of_month = x2.day_of_month
            WHERE x1.origin_city = $1 AND x2.dest_city = $2 AND x1.day_of_month = $3
              AND x1.canceled = FALSE AND x2.canceled = FALSE
            ORDER BY x1.actual_time + x2.actual_time, x1.fid, x2.fid
            LIMIT $4
            "#,
        )
        .bind(origin)
        .bind(dest)
        .bind(day)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(<(Flight, Flight)>::from).collect())
    }
}
