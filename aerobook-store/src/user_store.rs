use sqlx::{Postgres, Transaction};

pub struct UserStore;

impl UserStore {
    pub async fn insert(
        tx: &mut Transaction<'_, Postgres>,
        username: &str,
        password: &str,
        balance: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO users (username, password, balance) VALUES ($1, $2, $3)")
            .bind(username)
            .bind(password)
            .bind(balance)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    pub async fn credentials_match(
        tx: &mut Transaction<'_, Postgres>,
        username: &str,
        password: &str,
    ) -> Result<bool, sqlx::Error> {
        let found: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM users WHERE username = $1 AND password = $2)",
        )
        .bind(username)
        .bind(password)
        .fetch_one(&mut **tx)
        .await?;
        Ok(found)
    }

    pub async fn balance(
        tx: &mut Transaction<'_, Postgres>,
        username: &str,
    ) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar("SELECT balance FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&mut **tx)
            .await
    }

    pub async fn set_balance(
        tx: &mut Transaction<'_, Postgres>,
        username: &str,
        balance: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET balance = $1 WHERE username = $2")
            .bind(balance)
            .bind(username)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    pub async fn delete_all(tx: &mut Transaction<'_, Postgres>) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM users").execute(&mut **tx).await?;
        Ok(())
    }
}
