//! # Mock Framework & Testing Guide
//!
//! `MockClient<T>` hands out a real [`ResourceClient<T>`] whose requests are
//! answered from pre-programmed expectations instead of a running actor. It makes
//! tests of code *around* the reference clients (the order service, enrichment)
//! fast and deterministic, and makes failures easy to inject.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **Determinism** | 100% Deterministic | Subject to scheduler |
//! | **State** | No real state (expectations) | Real state management |
//! | **Use Case** | Unit testing logic *around* the client | Testing the actor itself or full system |
//! | **Error Injection** | Easy (`return_err`) | Hard (requires specific state) |
//!
//! ## Expectation Matching
//!
//! `Get` expectations are matched by ID, not by arrival order, because the
//! listing path resolves many orders concurrently and the requests reach the
//! mock in scheduler order. `Create` expectations are consumed first-in first-out.
//! A request with no matching expectation is recorded and its response channel
//! is dropped, so the caller sees [`FrameworkError::ActorDropped`]; [`MockClient::verify`]
//! then fails the test.
//!
//! ```rust
//! use sales_service::framework::mock::MockClient;
//! use sales_service::framework::FrameworkError;
//! use sales_service::model::{Customer, CustomerId};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Customer>::new();
//!     mock.expect_get(CustomerId(1))
//!         .return_ok(Some(Customer::new(CustomerId(1), "João", "99999-0001")));
//!     mock.expect_get(CustomerId(2))
//!         .return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     let found = client.get(CustomerId(1)).await.unwrap();
//!     assert_eq!(found.unwrap().name, "João");
//!     assert!(client.get(CustomerId(2)).await.is_err());
//!
//!     mock.verify();
//! }
//! ```
//!
//! ## Hand-Driven Replies
//!
//! For tests that need control over *when* a reply is sent (ordering, timeouts),
//! use [`create_mock_client`] and pull requests off the receiver with [`expect_get`].

use crate::framework::client::ResourceClient;
use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{mpsc, oneshot};

enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
}

struct MockState<T: ActorEntity> {
    expectations: VecDeque<Expectation<T>>,
    unexpected: Vec<String>,
}

type SharedState<T> = Arc<Mutex<MockState<T>>>;

fn lock<T: ActorEntity>(state: &SharedState<T>) -> MutexGuard<'_, MockState<T>> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A mock client with expectation tracking for fluent testing.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    state: SharedState<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let state: SharedState<T> = Arc::new(Mutex::new(MockState {
            expectations: VecDeque::new(),
            unexpected: Vec::new(),
        }));
        let task_state = state.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                match request {
                    ResourceRequest::Get { id, respond_to } => {
                        let mut state = lock(&task_state);
                        let position = state
                            .expectations
                            .iter()
                            .position(|e| matches!(e, Expectation::Get { id: expected, .. } if *expected == id));
                        match position.and_then(|p| state.expectations.remove(p)) {
                            Some(Expectation::Get { response, .. }) => {
                                let _ = respond_to.send(response);
                            }
                            _ => state.unexpected.push(format!("get({id})")),
                        }
                    }
                    ResourceRequest::Create { params, respond_to } => {
                        let mut state = lock(&task_state);
                        let position = state
                            .expectations
                            .iter()
                            .position(|e| matches!(e, Expectation::Create { .. }));
                        match position.and_then(|p| state.expectations.remove(p)) {
                            Some(Expectation::Create { response }) => {
                                let _ = respond_to.send(response);
                            }
                            _ => state.unexpected.push(format!("create({params:?})")),
                        }
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            state,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects a `get` operation for `id`.
    pub fn expect_get(&mut self, id: T::Id) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            id,
            state: self.state.clone(),
        }
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> CreateExpectationBuilder<T> {
        CreateExpectationBuilder {
            state: self.state.clone(),
        }
    }

    /// Verifies that all expectations were met and nothing unexpected arrived.
    ///
    /// # Panics
    ///
    /// Panics if expectations remain or an unexpected request was received.
    pub fn verify(&self) {
        let state = lock(&self.state);
        if !state.unexpected.is_empty() {
            panic!("Unexpected requests: {}", state.unexpected.join(", "));
        }
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    state: SharedState<T>,
}

impl<T: ActorEntity> GetExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: Option<T>) {
        lock(&self.state).expectations.push_back(Expectation::Get {
            id: self.id,
            response: Ok(value),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        lock(&self.state).expectations.push_back(Expectation::Get {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for `create` expectations.
pub struct CreateExpectationBuilder<T: ActorEntity> {
    state: SharedState<T>,
}

impl<T: ActorEntity> CreateExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, id: T::Id) {
        lock(&self.state)
            .expectations
            .push_back(Expectation::Create { response: Ok(id) });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        lock(&self.state).expectations.push_back(Expectation::Create {
            response: Err(error),
        });
    }
}

/// Creates a client and the receiver its requests arrive on.
///
/// Nothing answers the requests until the test does so itself, which makes it
/// possible to reply out of order or not at all.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Waits for the next request and returns it if it is a `Get`.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}
