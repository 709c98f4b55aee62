//! Integration test harness for PlatePalette.
//!
//! [`FakeBackend`] is an in-memory [`RecipeBackend`] that records every call
//! and can be told to fail, stall or hang per operation. Tests build an
//! `AppState` around it exactly as the binaries do around the HTTP backend.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p plate-palette-integration-tests
//! ```

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use plate_palette_client::backend::{
    BackendError, FilterValue, RecipeBackend, RecordQuery, SortDirection, fields,
};
use plate_palette_core::{
    Email, Identity, Order, OrderId, OrderStatus, Recipe, RecipeId, Role, UserId, UserRef,
};
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};

/// Backend operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Health,
    Login,
    Logout,
    CurrentSession,
    /// `find_recipes` without a chef filter.
    Catalog,
    /// `find_recipes` filtered by chef.
    AuthoredRecipes,
    Orders,
}

/// How the fake answers `health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthMode {
    Ok,
    Fail,
    /// Never answers.
    Hang,
}

struct Account {
    email: String,
    password: String,
    identity: Identity,
}

#[derive(Default)]
struct Calls {
    health: AtomicUsize,
    login: AtomicUsize,
    logout: AtomicUsize,
    current_session: AtomicUsize,
    find_recipes: AtomicUsize,
    find_orders: AtomicUsize,
}

/// In-memory recipe backend.
pub struct FakeBackend {
    accounts: Vec<Account>,
    recipes: Vec<Recipe>,
    orders: Vec<Order>,
    session: Mutex<Option<Identity>>,
    failing: Mutex<HashSet<Op>>,
    health: Mutex<HealthMode>,
    query_delay: Mutex<Duration>,
    recipe_queries: Mutex<Vec<RecordQuery>>,
    order_queries: Mutex<Vec<RecordQuery>>,
    calls: Calls,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeBackend {
    #[must_use]
    pub fn new() -> Self {
        Self {
            accounts: Vec::new(),
            recipes: Vec::new(),
            orders: Vec::new(),
            session: Mutex::new(None),
            failing: Mutex::new(HashSet::new()),
            health: Mutex::new(HealthMode::Ok),
            query_delay: Mutex::new(Duration::ZERO),
            recipe_queries: Mutex::new(Vec::new()),
            order_queries: Mutex::new(Vec::new()),
            calls: Calls::default(),
        }
    }

    /// Register an account that can sign in with `email` / `password`.
    #[must_use]
    pub fn with_account(mut self, email: &str, password: &str, identity: Identity) -> Self {
        self.accounts.push(Account {
            email: email.to_owned(),
            password: password.to_owned(),
            identity,
        });
        self
    }

    #[must_use]
    pub fn with_recipes(mut self, recipes: impl IntoIterator<Item = Recipe>) -> Self {
        self.recipes.extend(recipes);
        self
    }

    #[must_use]
    pub fn with_orders(mut self, orders: impl IntoIterator<Item = Order>) -> Self {
        self.orders.extend(orders);
        self
    }

    /// Start with `identity` already signed in on the backend side.
    #[must_use]
    pub fn with_session(self, identity: Identity) -> Self {
        *lock(&self.session) = Some(identity);
        self
    }

    pub fn fail(&self, op: Op) {
        lock(&self.failing).insert(op);
    }

    pub fn recover(&self, op: Op) {
        lock(&self.failing).remove(&op);
    }

    pub fn set_health(&self, mode: HealthMode) {
        *lock(&self.health) = mode;
    }

    /// Delay every `find_*` answer by `delay`.
    pub fn set_query_delay(&self, delay: Duration) {
        *lock(&self.query_delay) = delay;
    }

    /// Identity the backend currently considers signed in.
    #[must_use]
    pub fn backend_session(&self) -> Option<Identity> {
        lock(&self.session).clone()
    }

    #[must_use]
    pub fn recipe_queries(&self) -> Vec<RecordQuery> {
        lock(&self.recipe_queries).clone()
    }

    #[must_use]
    pub fn order_queries(&self) -> Vec<RecordQuery> {
        lock(&self.order_queries).clone()
    }

    #[must_use]
    pub fn health_calls(&self) -> usize {
        self.calls.health.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn login_calls(&self) -> usize {
        self.calls.login.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn logout_calls(&self) -> usize {
        self.calls.logout.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn current_session_calls(&self) -> usize {
        self.calls.current_session.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn find_recipes_calls(&self) -> usize {
        self.calls.find_recipes.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn find_orders_calls(&self) -> usize {
        self.calls.find_orders.load(Ordering::SeqCst)
    }

    /// Recipe queries carrying a chef filter.
    #[must_use]
    pub fn authored_queries(&self) -> Vec<RecordQuery> {
        self.recipe_queries()
            .into_iter()
            .filter(|q| q.filter_value(fields::CHEF_ID).is_some())
            .collect()
    }

    fn check(&self, op: Op) -> Result<(), BackendError> {
        if lock(&self.failing).contains(&op) {
            return Err(BackendError::Api {
                status: 500,
                message: format!("injected {op:?} failure"),
            });
        }
        Ok(())
    }

    async fn stall(&self) {
        let delay = *lock(&self.query_delay);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

fn recipe_field(recipe: &Recipe, field: &str) -> Option<FilterValue> {
    match field {
        fields::IS_PUBLISHED => Some(FilterValue::Bool(recipe.is_published)),
        fields::CHEF_ID => recipe.chef.as_ref().map(|c| FilterValue::from(c.id)),
        _ => None,
    }
}

fn order_field(order: &Order, field: &str) -> Option<FilterValue> {
    match field {
        fields::CUSTOMER_ID => order.customer.as_ref().map(|c| FilterValue::from(c.id)),
        _ => None,
    }
}

#[async_trait]
impl RecipeBackend for FakeBackend {
    async fn health(&self) -> Result<(), BackendError> {
        self.calls.health.fetch_add(1, Ordering::SeqCst);
        let mode = *lock(&self.health);
        match mode {
            HealthMode::Ok => self.check(Op::Health),
            HealthMode::Fail => Err(BackendError::Api {
                status: 503,
                message: "unavailable".to_string(),
            }),
            HealthMode::Hang => std::future::pending().await,
        }
    }

    async fn login(&self, email: &Email, password: &SecretString) -> Result<(), BackendError> {
        self.calls.login.fetch_add(1, Ordering::SeqCst);
        self.check(Op::Login)?;

        let account = self
            .accounts
            .iter()
            .find(|a| a.email == email.as_str() && a.password == password.expose_secret())
            .ok_or(BackendError::Unauthorized)?;
        *lock(&self.session) = Some(account.identity.clone());
        Ok(())
    }

    async fn logout(&self) -> Result<(), BackendError> {
        self.calls.logout.fetch_add(1, Ordering::SeqCst);
        self.check(Op::Logout)?;
        *lock(&self.session) = None;
        Ok(())
    }

    async fn current_session(&self) -> Result<Option<Identity>, BackendError> {
        self.calls.current_session.fetch_add(1, Ordering::SeqCst);
        self.check(Op::CurrentSession)?;
        Ok(lock(&self.session).clone())
    }

    async fn find_recipes(&self, query: &RecordQuery) -> Result<Vec<Recipe>, BackendError> {
        self.calls.find_recipes.fetch_add(1, Ordering::SeqCst);
        lock(&self.recipe_queries).push(query.clone());
        self.stall().await;

        let op = if query.filter_value(fields::CHEF_ID).is_some() {
            Op::AuthoredRecipes
        } else {
            Op::Catalog
        };
        self.check(op)?;

        let mut recipes: Vec<Recipe> = self
            .recipes
            .iter()
            .filter(|recipe| {
                query.filters().iter().all(|(field, expected)| {
                    recipe_field(recipe, field).as_ref() == Some(expected)
                })
            })
            .cloned()
            .collect();

        if let Some((fields::CREATED_AT, direction)) = query.sort() {
            recipes.sort_by_key(|r| r.created_at);
            if direction == SortDirection::Desc {
                recipes.reverse();
            }
        }
        if let Some(limit) = query.page_size() {
            recipes.truncate(limit as usize);
        }
        Ok(recipes)
    }

    async fn find_orders(&self, query: &RecordQuery) -> Result<Vec<Order>, BackendError> {
        self.calls.find_orders.fetch_add(1, Ordering::SeqCst);
        lock(&self.order_queries).push(query.clone());
        self.stall().await;
        self.check(Op::Orders)?;

        Ok(self
            .orders
            .iter()
            .filter(|order| {
                query.filters().iter().all(|(field, expected)| {
                    order_field(order, field).as_ref() == Some(expected)
                })
            })
            .cloned()
            .collect())
    }
}

// =============================================================================
// Fixtures
// =============================================================================

#[must_use]
pub fn identity(id: i32, name: &str, role: Role) -> Identity {
    Identity {
        id: UserId::new(id),
        name: name.to_owned(),
        email: Email::parse(&format!("{}@example.com", name.to_lowercase())).ok(),
        role,
        avatar: None,
    }
}

#[must_use]
pub fn user_ref(identity: &Identity) -> UserRef {
    UserRef {
        id: identity.id,
        name: identity.name.clone(),
        avatar: identity.avatar.clone(),
    }
}

/// A recipe by `chef`, created `age_days` days before a fixed epoch.
#[must_use]
pub fn recipe(id: i32, title: &str, chef: &Identity, published: bool, age_days: i64) -> Recipe {
    let epoch = chrono_epoch();
    Recipe {
        id: RecipeId::new(id),
        title: title.to_owned(),
        main_image: None,
        price: Decimal::new(1250, 2),
        difficulty: None,
        is_published: published,
        chef: Some(user_ref(chef)),
        reviews: Vec::new(),
        categories: Vec::new(),
        created_at: epoch.map(|t| t - TimeDelta::days(age_days)),
    }
}

/// A pending order by `customer` for `recipes`.
#[must_use]
pub fn order(id: i32, customer: &Identity, recipes: Vec<Recipe>) -> Order {
    let total_amount = recipes.iter().map(|r| r.price).sum::<Decimal>();
    Order {
        id: OrderId::new(id),
        customer: Some(user_ref(customer)),
        recipes,
        order_date: chrono_epoch().map(|t| t.date_naive()),
        total_amount,
        status: OrderStatus::Pending,
    }
}

fn chrono_epoch() -> Option<DateTime<Utc>> {
    // 2026-01-01T00:00:00Z
    DateTime::from_timestamp(1_767_225_600, 0)
}
