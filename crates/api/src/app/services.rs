//! Store wiring for the API process.
//!
//! Domain persistence is an external collaborator to the authentication
//! core; these in-memory stores stand in for it behind the same contracts
//! a database-backed implementation would satisfy.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock};

use chrono::Duration;

use cuehall_auth::{
    AuthService, RefreshTokenRecord, RefreshTokenStore, UserDirectory, UserRecord,
};
use cuehall_billing::{Bill, Order, OrderItem, Product};
use cuehall_bookings::Booking;
use cuehall_core::{
    BillId, BookingId, ClubId, CompanyId, DomainError, DomainResult, OrderId, OrderItemId,
    ProductId, TableId,
};
use cuehall_venues::{Club, Company, Table};

use crate::config::AppConfig;

/// Keyed in-memory store for domain rows.
pub struct InMemoryStore<K, V> {
    inner: RwLock<HashMap<K, V>>,
}

impl<K, V> InMemoryStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.read().ok()?.get(key).cloned()
    }

    pub fn insert(&self, key: K, value: V) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(key, value);
        }
    }

    /// Apply `f` to the stored value, if present, and persist the result.
    pub fn update<R>(&self, key: &K, f: impl FnOnce(&mut V) -> R) -> Option<R> {
        let mut map = self.inner.write().ok()?;
        map.get_mut(key).map(f)
    }

    pub fn remove(&self, key: &K) -> bool {
        match self.inner.write() {
            Ok(mut map) => map.remove(key).is_some(),
            Err(_) => false,
        }
    }

    pub fn list(&self) -> Vec<V> {
        match self.inner.read() {
            Ok(map) => map.values().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn list_filtered(&self, predicate: impl Fn(&V) -> bool) -> Vec<V> {
        match self.inner.read() {
            Ok(map) => map.values().filter(|v| predicate(v)).cloned().collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl<K, V> Default for InMemoryStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

/// User rows keyed by username; doubles as the read-only directory the
/// authentication core consumes.
pub struct UserStore {
    inner: RwLock<HashMap<String, UserRecord>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Insert a new user, enforcing username and email uniqueness.
    pub fn create(&self, user: UserRecord) -> DomainResult<UserRecord> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| DomainError::conflict("user store poisoned"))?;

        if map.contains_key(&user.username) {
            return Err(DomainError::conflict("username already taken"));
        }
        if map.values().any(|u| u.email == user.email) {
            return Err(DomainError::conflict("email already registered"));
        }

        map.insert(user.username.clone(), user.clone());
        Ok(user)
    }

    pub fn list(&self) -> Vec<UserRecord> {
        match self.inner.read() {
            Ok(map) => map.values().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Flip the active flag; returns false for unknown usernames.
    pub fn set_active(&self, username: &str, active: bool) -> bool {
        match self.inner.write() {
            Ok(mut map) => match map.get_mut(username) {
                Some(user) => {
                    user.is_active = active;
                    true
                }
                None => false,
            },
            Err(_) => false,
        }
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserDirectory for UserStore {
    fn find_by_username(&self, username: &str) -> Option<UserRecord> {
        self.inner.read().ok()?.get(username).cloned()
    }
}

/// Refresh-token rows keyed by the token value.
#[derive(Default)]
pub struct InMemoryRefreshTokenStore {
    rows: RwLock<HashMap<String, RefreshTokenRecord>>,
}

impl RefreshTokenStore for InMemoryRefreshTokenStore {
    fn put(&self, record: RefreshTokenRecord) {
        if let Ok(mut rows) = self.rows.write() {
            rows.insert(record.token.clone(), record);
        }
    }

    fn find(&self, token: &str) -> Option<RefreshTokenRecord> {
        self.rows.read().ok()?.get(token).cloned()
    }

    fn remove(&self, token: &str) {
        if let Ok(mut rows) = self.rows.write() {
            rows.remove(token);
        }
    }
}

/// Everything the route handlers need, shared via an extension.
pub struct AppServices {
    pub auth: Arc<AuthService>,
    pub users: Arc<UserStore>,
    pub companies: InMemoryStore<CompanyId, Company>,
    pub clubs: InMemoryStore<ClubId, Club>,
    pub tables: InMemoryStore<TableId, Table>,
    pub bookings: InMemoryStore<BookingId, Booking>,
    pub products: InMemoryStore<ProductId, Product>,
    pub orders: InMemoryStore<OrderId, Order>,
    pub order_items: InMemoryStore<OrderItemId, OrderItem>,
    pub bills: InMemoryStore<BillId, Bill>,
}

pub fn build_services(config: &AppConfig) -> AppServices {
    let users = Arc::new(UserStore::new());
    let refresh_tokens = Arc::new(InMemoryRefreshTokenStore::default());

    let auth = Arc::new(AuthService::new(
        users.clone(),
        refresh_tokens,
        config.jwt_secret.as_bytes(),
        Duration::seconds(config.access_ttl_secs),
        Duration::seconds(config.refresh_ttl_secs),
    ));

    AppServices {
        auth,
        users,
        companies: InMemoryStore::new(),
        clubs: InMemoryStore::new(),
        tables: InMemoryStore::new(),
        bookings: InMemoryStore::new(),
        products: InMemoryStore::new(),
        orders: InMemoryStore::new(),
        order_items: InMemoryStore::new(),
        bills: InMemoryStore::new(),
    }
}
