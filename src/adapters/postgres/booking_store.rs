use crate::domain::{
    Client, ClientId, Costume, CostumeId, Email, Money, Reservation, ReservationId,
    ReservationStatus,
};
use crate::ports::{
    BookingStore as BookingStoreTrait, BookingTransaction, ClientDirectory, InventoryStore,
    ReservationStore, StoreError,
};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Row, postgres::PgRow};
use std::str::FromStr;
use tokio::sync::Mutex;

type Result<T> = std::result::Result<T, StoreError>;

const COSTUME_COLUMNS: &str = r#"
    costume_id,
    name,
    description,
    price_per_day,
    image,
    category,
    size,
    available,
    created_at,
    updated_at
"#;

const CLIENT_COLUMNS: &str = r#"
    client_id,
    name,
    email,
    phone,
    address,
    created_at
"#;

const RESERVATION_COLUMNS: &str = r#"
    reservation_id,
    client_id,
    costume_id,
    start_date,
    end_date,
    total_price,
    status,
    created_at,
    updated_at
"#;

/// PostgreSQLの行データをCostumeに変換する
///
/// 金額はMoneyの不変条件（非負）で再検証する。
fn map_row_to_costume(row: &PgRow) -> Result<Costume> {
    Ok(Costume {
        costume_id: CostumeId::from_uuid(row.try_get("costume_id")?),
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        price_per_day: Money::new(row.try_get("price_per_day")?)?,
        image: row.try_get("image")?,
        category: row.try_get("category")?,
        size: row.try_get("size")?,
        available: row.try_get("available")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn map_row_to_client(row: &PgRow) -> Result<Client> {
    let email: String = row.try_get("email")?;

    Ok(Client {
        client_id: ClientId::from_uuid(row.try_get("client_id")?),
        name: row.try_get("name")?,
        email: Email::parse(&email)?,
        phone: row.try_get("phone")?,
        address: row.try_get("address")?,
        created_at: row.try_get("created_at")?,
    })
}

fn map_row_to_reservation(row: &PgRow) -> Result<Reservation> {
    let status: String = row.try_get("status")?;

    Ok(Reservation {
        reservation_id: ReservationId::from_uuid(row.try_get("reservation_id")?),
        client_id: ClientId::from_uuid(row.try_get("client_id")?),
        costume_id: CostumeId::from_uuid(row.try_get("costume_id")?),
        start_date: row.try_get("start_date")?,
        end_date: row.try_get("end_date")?,
        total_price: Money::new(row.try_get("total_price")?)?,
        status: ReservationStatus::from_str(&status)?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// BookingStoreのPostgreSQL実装
///
/// 1回の予約操作を1つのデータベーストランザクションに対応させる。
pub struct BookingStore {
    pool: PgPool,
}

impl BookingStore {
    /// PostgreSQLコネクションプールから新しいBookingStoreを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStoreTrait for BookingStore {
    async fn begin(&self) -> Result<Box<dyn BookingTransaction>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(Transaction { tx: Mutex::new(tx) }))
    }
}

/// PostgreSQLのトランザクション
///
/// ポートのメソッドは`&self`を取るため、接続は非同期Mutexで包む。
/// ドロップ時にsqlxがロールバックする。
pub struct Transaction {
    tx: Mutex<sqlx::Transaction<'static, Postgres>>,
}

#[async_trait]
impl InventoryStore for Transaction {
    async fn get_costume(&self, costume_id: CostumeId) -> Result<Option<Costume>> {
        let mut tx = self.tx.lock().await;
        let row = sqlx::query(&format!(
            "SELECT {COSTUME_COLUMNS} FROM costumes WHERE costume_id = $1"
        ))
        .bind(costume_id.value())
        .fetch_optional(&mut **tx)
        .await?;

        row.as_ref().map(map_row_to_costume).transpose()
    }

    /// 行ロック（SELECT ... FOR UPDATE）を取得する
    ///
    /// 同じ衣装への並行予約は、先行トランザクションの終了まで待たされる。
    async fn get_costume_for_update(&self, costume_id: CostumeId) -> Result<Option<Costume>> {
        let mut tx = self.tx.lock().await;
        let row = sqlx::query(&format!(
            "SELECT {COSTUME_COLUMNS} FROM costumes WHERE costume_id = $1 FOR UPDATE"
        ))
        .bind(costume_id.value())
        .fetch_optional(&mut **tx)
        .await?;

        row.as_ref().map(map_row_to_costume).transpose()
    }

    async fn set_availability(&self, costume_id: CostumeId, available: bool) -> Result<bool> {
        let mut tx = self.tx.lock().await;
        let result = sqlx::query(
            r#"
            UPDATE costumes
            SET available = $2, updated_at = NOW()
            WHERE costume_id = $1
            "#,
        )
        .bind(costume_id.value())
        .bind(available)
        .execute(&mut **tx)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn claim(&self, costume_id: CostumeId) -> Result<bool> {
        let mut tx = self.tx.lock().await;
        let result = sqlx::query(
            r#"
            UPDATE costumes
            SET available = FALSE, updated_at = NOW()
            WHERE costume_id = $1 AND available
            "#,
        )
        .bind(costume_id.value())
        .execute(&mut **tx)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn list_available(&self) -> Result<Vec<Costume>> {
        let mut tx = self.tx.lock().await;
        let rows = sqlx::query(&format!(
            "SELECT {COSTUME_COLUMNS} FROM costumes WHERE available ORDER BY created_at, costume_id"
        ))
        .fetch_all(&mut **tx)
        .await?;

        rows.iter().map(map_row_to_costume).collect()
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Costume>> {
        let mut tx = self.tx.lock().await;
        let rows = sqlx::query(&format!(
            "SELECT {COSTUME_COLUMNS} FROM costumes \
             WHERE LOWER(category) = LOWER($1) ORDER BY created_at, costume_id"
        ))
        .bind(category.trim())
        .fetch_all(&mut **tx)
        .await?;

        rows.iter().map(map_row_to_costume).collect()
    }
}

#[async_trait]
impl ClientDirectory for Transaction {
    async fn find_by_email(&self, email: &Email) -> Result<Option<Client>> {
        let mut tx = self.tx.lock().await;
        let row = sqlx::query(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&mut **tx)
        .await?;

        row.as_ref().map(map_row_to_client).transpose()
    }

    async fn get_client(&self, client_id: ClientId) -> Result<Option<Client>> {
        let mut tx = self.tx.lock().await;
        let row = sqlx::query(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE client_id = $1"
        ))
        .bind(client_id.value())
        .fetch_optional(&mut **tx)
        .await?;

        row.as_ref().map(map_row_to_client).transpose()
    }

    /// ON CONFLICT DO NOTHING で登録し、保存されている行を読み直す
    ///
    /// 並行する同一メールアドレスの登録は一意制約で待たされ、先に確定した行が返る。
    async fn insert_if_absent(&self, client: Client) -> Result<Client> {
        let mut tx = self.tx.lock().await;
        sqlx::query(
            r#"
            INSERT INTO clients (client_id, name, email, phone, address, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(client.client_id.value())
        .bind(&client.name)
        .bind(client.email.as_str())
        .bind(&client.phone)
        .bind(&client.address)
        .bind(client.created_at)
        .execute(&mut **tx)
        .await?;

        let row = sqlx::query(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE email = $1"
        ))
        .bind(client.email.as_str())
        .fetch_one(&mut **tx)
        .await?;

        map_row_to_client(&row)
    }
}

#[async_trait]
impl ReservationStore for Transaction {
    async fn insert_reservation(&self, reservation: &Reservation) -> Result<()> {
        let mut tx = self.tx.lock().await;
        sqlx::query(
            r#"
            INSERT INTO reservations (
                reservation_id,
                client_id,
                costume_id,
                start_date,
                end_date,
                total_price,
                status,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(reservation.reservation_id.value())
        .bind(reservation.client_id.value())
        .bind(reservation.costume_id.value())
        .bind(reservation.start_date)
        .bind(reservation.end_date)
        .bind(reservation.total_price.amount())
        .bind(reservation.status.as_str())
        .bind(reservation.created_at)
        .bind(reservation.updated_at)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    async fn get_reservation(&self, reservation_id: ReservationId) -> Result<Option<Reservation>> {
        let mut tx = self.tx.lock().await;
        let row = sqlx::query(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE reservation_id = $1"
        ))
        .bind(reservation_id.value())
        .fetch_optional(&mut **tx)
        .await?;

        row.as_ref().map(map_row_to_reservation).transpose()
    }

    async fn update_reservation(&self, reservation: &Reservation) -> Result<bool> {
        let mut tx = self.tx.lock().await;
        let result = sqlx::query(
            r#"
            UPDATE reservations
            SET start_date = $2,
                end_date = $3,
                total_price = $4,
                status = $5,
                updated_at = $6
            WHERE reservation_id = $1
            "#,
        )
        .bind(reservation.reservation_id.value())
        .bind(reservation.start_date)
        .bind(reservation.end_date)
        .bind(reservation.total_price.amount())
        .bind(reservation.status.as_str())
        .bind(reservation.updated_at)
        .execute(&mut **tx)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_reservation(&self, reservation_id: ReservationId) -> Result<bool> {
        let mut tx = self.tx.lock().await;
        let result = sqlx::query("DELETE FROM reservations WHERE reservation_id = $1")
            .bind(reservation_id.value())
            .execute(&mut **tx)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_reservations(&self, status: Option<ReservationStatus>) -> Result<Vec<Reservation>> {
        let mut tx = self.tx.lock().await;
        let rows = sqlx::query(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations \
             WHERE ($1::varchar IS NULL OR status = $1) ORDER BY seq"
        ))
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&mut **tx)
        .await?;

        rows.iter().map(map_row_to_reservation).collect()
    }

    async fn list_reservations_by_client(&self, client_id: ClientId) -> Result<Vec<Reservation>> {
        let mut tx = self.tx.lock().await;
        let rows = sqlx::query(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE client_id = $1 ORDER BY seq"
        ))
        .bind(client_id.value())
        .fetch_all(&mut **tx)
        .await?;

        rows.iter().map(map_row_to_reservation).collect()
    }
}

#[async_trait]
impl BookingTransaction for Transaction {
    async fn commit(self: Box<Self>) -> Result<()> {
        let Transaction { tx } = *self;
        tx.into_inner().commit().await?;
        Ok(())
    }
}
