use crate::domain::{
    Client, ClientId, Costume, CostumeId, Email, Reservation, ReservationId, ReservationStatus,
};
use crate::ports::{
    BookingStore as BookingStoreTrait, BookingTransaction, ClientDirectory, InventoryStore,
    ReservationStore, StoreError,
};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::OwnedMutexGuard;

type Result<T> = std::result::Result<T, StoreError>;

/// ストア全体の状態
///
/// 各コレクションは挿入順を保持する。
#[derive(Debug, Clone, Default)]
struct StoreState {
    costumes: Vec<Costume>,
    clients: Vec<Client>,
    reservations: Vec<Reservation>,
}

/// BookingStoreのインメモリ実装
///
/// ストア全体を1つの非同期ロックで保護する。トランザクションは開始から
/// 確定（またはドロップ）までロックを保持するため、すべての操作は直列化される。
/// テストと、データベースなしでの起動に使用する。
#[derive(Clone, Default)]
pub struct BookingStore {
    state: Arc<tokio::sync::Mutex<StoreState>>,
}

impl BookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 衣装カタログを読み込んだ状態で作成する
    pub fn with_costumes(costumes: Vec<Costume>) -> Self {
        Self {
            state: Arc::new(tokio::sync::Mutex::new(StoreState {
                costumes,
                ..Default::default()
            })),
        }
    }

    /// 衣装を登録する
    pub async fn add_costume(&self, costume: Costume) {
        self.state.lock().await.costumes.push(costume);
    }
}

#[async_trait]
impl BookingStoreTrait for BookingStore {
    async fn begin(&self) -> Result<Box<dyn BookingTransaction>> {
        let guard = self.state.clone().lock_owned().await;
        let working = guard.clone();

        Ok(Box::new(Transaction {
            guard,
            working: Mutex::new(working),
        }))
    }
}

/// インメモリのトランザクション
///
/// 開始時点の状態のコピーに対して変更を行い、`commit`で書き戻す。
pub struct Transaction {
    guard: OwnedMutexGuard<StoreState>,
    working: Mutex<StoreState>,
}

impl Transaction {
    fn state(&self) -> Result<MutexGuard<'_, StoreState>> {
        self.working
            .lock()
            .map_err(|_| StoreError::from("in-memory transaction state poisoned"))
    }
}

#[async_trait]
impl InventoryStore for Transaction {
    async fn get_costume(&self, costume_id: CostumeId) -> Result<Option<Costume>> {
        let state = self.state()?;
        Ok(state
            .costumes
            .iter()
            .find(|c| c.costume_id == costume_id)
            .cloned())
    }

    /// ストア全体がロック済みなので通常の取得と同じ
    async fn get_costume_for_update(&self, costume_id: CostumeId) -> Result<Option<Costume>> {
        self.get_costume(costume_id).await
    }

    async fn set_availability(&self, costume_id: CostumeId, available: bool) -> Result<bool> {
        let mut state = self.state()?;
        match state
            .costumes
            .iter_mut()
            .find(|c| c.costume_id == costume_id)
        {
            Some(costume) => {
                costume.available = available;
                costume.updated_at = chrono::Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn claim(&self, costume_id: CostumeId) -> Result<bool> {
        let mut state = self.state()?;
        match state
            .costumes
            .iter_mut()
            .find(|c| c.costume_id == costume_id && c.available)
        {
            Some(costume) => {
                costume.available = false;
                costume.updated_at = chrono::Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_available(&self) -> Result<Vec<Costume>> {
        let state = self.state()?;
        Ok(state
            .costumes
            .iter()
            .filter(|c| c.available)
            .cloned()
            .collect())
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Costume>> {
        let state = self.state()?;
        Ok(state
            .costumes
            .iter()
            .filter(|c| c.in_category(category))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ClientDirectory for Transaction {
    async fn find_by_email(&self, email: &Email) -> Result<Option<Client>> {
        let state = self.state()?;
        Ok(state.clients.iter().find(|c| &c.email == email).cloned())
    }

    async fn get_client(&self, client_id: ClientId) -> Result<Option<Client>> {
        let state = self.state()?;
        Ok(state
            .clients
            .iter()
            .find(|c| c.client_id == client_id)
            .cloned())
    }

    async fn insert_if_absent(&self, client: Client) -> Result<Client> {
        let mut state = self.state()?;
        if let Some(existing) = state.clients.iter().find(|c| c.email == client.email) {
            return Ok(existing.clone());
        }
        state.clients.push(client.clone());
        Ok(client)
    }
}

#[async_trait]
impl ReservationStore for Transaction {
    async fn insert_reservation(&self, reservation: &Reservation) -> Result<()> {
        let mut state = self.state()?;
        if state
            .reservations
            .iter()
            .any(|r| r.reservation_id == reservation.reservation_id)
        {
            return Err(StoreError::from(format!(
                "reservation {} already exists",
                reservation.reservation_id
            )));
        }
        state.reservations.push(reservation.clone());
        Ok(())
    }

    async fn get_reservation(&self, reservation_id: ReservationId) -> Result<Option<Reservation>> {
        let state = self.state()?;
        Ok(state
            .reservations
            .iter()
            .find(|r| r.reservation_id == reservation_id)
            .cloned())
    }

    async fn update_reservation(&self, reservation: &Reservation) -> Result<bool> {
        let mut state = self.state()?;
        match state
            .reservations
            .iter_mut()
            .find(|r| r.reservation_id == reservation.reservation_id)
        {
            Some(stored) => {
                *stored = reservation.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_reservation(&self, reservation_id: ReservationId) -> Result<bool> {
        let mut state = self.state()?;
        let before = state.reservations.len();
        state
            .reservations
            .retain(|r| r.reservation_id != reservation_id);
        Ok(state.reservations.len() < before)
    }

    async fn list_reservations(&self, status: Option<ReservationStatus>) -> Result<Vec<Reservation>> {
        let state = self.state()?;
        Ok(state
            .reservations
            .iter()
            .filter(|r| status.is_none_or(|s| r.status == s))
            .cloned()
            .collect())
    }

    async fn list_reservations_by_client(&self, client_id: ClientId) -> Result<Vec<Reservation>> {
        let state = self.state()?;
        Ok(state
            .reservations
            .iter()
            .filter(|r| r.client_id == client_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BookingTransaction for Transaction {
    async fn commit(self: Box<Self>) -> Result<()> {
        let Transaction { mut guard, working } = *self;
        *guard = working
            .into_inner()
            .map_err(|_| StoreError::from("in-memory transaction state poisoned"))?;
        Ok(())
    }
}
