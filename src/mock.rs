//! # Mock API
//!
//! An in-process stand-in for the n8n API, for testing reconcilers without a server.
//!
//! Queue the calls you expect with the `expect_*` builders, hand [`MockApi::client`] to
//! the reconciler under test, then check [`MockApi::calls`] and [`MockApi::verify`].
//! Calls are matched in order; an unexpected call panics with both sides printed.
//!
//! ```ignore
//! let mock = MockApi::new();
//! mock.expect_create_user().return_ok(created);
//! mock.expect_get_user("u1").return_ok(user);
//!
//! let users = UserResource::with_client(Arc::new(mock.client()));
//! users.create(&ctx, plan).await?;
//! mock.verify(); // Ensures all expectations were met
//! ```

use crate::clients::{ExecutionListFilters, ExecutionsApi, N8nClient, UserListFilters, UsersApi};
use crate::model::wire::{
    Execution, ExecutionList, RoleChange, User, UserCreateRequest, UserCreateResponse, UserList,
};
use async_trait::async_trait;
use reconcile_framework::{CallContext, RemoteError};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Base URL reported by clients built from a [`MockApi`].
pub const MOCK_BASE_URL: &str = "http://n8n.mock";

/// One call the reconciler made, with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteCall {
    GetUser { id_or_email: String, include_role: bool },
    CreateUser(UserCreateRequest),
    PatchUserRole { id: String, change: RoleChange },
    DeleteUser { id: String },
    ListUsers(UserListFilters),
    RetryExecution { id: u64 },
    GetExecution { id: u64, include_data: Option<bool> },
    ListExecutions(ExecutionListFilters),
}

impl RemoteCall {
    /// Operation name, e.g. `"get_user"`.
    pub fn name(&self) -> &'static str {
        match self {
            RemoteCall::GetUser { .. } => "get_user",
            RemoteCall::CreateUser(_) => "create_user",
            RemoteCall::PatchUserRole { .. } => "patch_user_role",
            RemoteCall::DeleteUser { .. } => "delete_user",
            RemoteCall::ListUsers(_) => "list_users",
            RemoteCall::RetryExecution { .. } => "retry_execution",
            RemoteCall::GetExecution { .. } => "get_execution",
            RemoteCall::ListExecutions(_) => "list_executions",
        }
    }
}

#[derive(Debug)]
enum Expectation {
    GetUser {
        id_or_email: String,
        response: Result<User, RemoteError>,
    },
    CreateUser {
        response: Result<UserCreateResponse, RemoteError>,
    },
    PatchUserRole {
        id: String,
        response: Result<(), RemoteError>,
    },
    DeleteUser {
        id: String,
        response: Result<(), RemoteError>,
    },
    ListUsers {
        response: Result<UserList, RemoteError>,
    },
    RetryExecution {
        id: u64,
        response: Result<Execution, RemoteError>,
    },
    GetExecution {
        id: u64,
        response: Result<Execution, RemoteError>,
    },
    ListExecutions {
        response: Result<ExecutionList, RemoteError>,
    },
}

#[derive(Default)]
struct MockState {
    expectations: Mutex<VecDeque<Expectation>>,
    calls: Mutex<Vec<RemoteCall>>,
    contexts: Mutex<Vec<CallContext>>,
}

/// Scripted fake implementing [`UsersApi`] and [`ExecutionsApi`].
///
/// Clones share the same queue and call log.
#[derive(Clone, Default)]
pub struct MockApi {
    state: Arc<MockState>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// A client whose users and executions APIs are both this mock.
    pub fn client(&self) -> N8nClient {
        N8nClient::from_api(MOCK_BASE_URL, Arc::new(self.clone()))
    }

    pub fn expect_get_user(&self, id_or_email: impl Into<String>) -> ExpectationBuilder<User> {
        let id_or_email = id_or_email.into();
        self.builder(move |response| Expectation::GetUser {
            id_or_email,
            response,
        })
    }

    pub fn expect_create_user(&self) -> ExpectationBuilder<UserCreateResponse> {
        self.builder(|response| Expectation::CreateUser { response })
    }

    pub fn expect_patch_user_role(&self, id: impl Into<String>) -> ExpectationBuilder<()> {
        let id = id.into();
        self.builder(move |response| Expectation::PatchUserRole { id, response })
    }

    pub fn expect_delete_user(&self, id: impl Into<String>) -> ExpectationBuilder<()> {
        let id = id.into();
        self.builder(move |response| Expectation::DeleteUser { id, response })
    }

    pub fn expect_list_users(&self) -> ExpectationBuilder<UserList> {
        self.builder(|response| Expectation::ListUsers { response })
    }

    pub fn expect_retry_execution(&self, id: u64) -> ExpectationBuilder<Execution> {
        self.builder(move |response| Expectation::RetryExecution { id, response })
    }

    pub fn expect_get_execution(&self, id: u64) -> ExpectationBuilder<Execution> {
        self.builder(move |response| Expectation::GetExecution { id, response })
    }

    pub fn expect_list_executions(&self) -> ExpectationBuilder<ExecutionList> {
        self.builder(|response| Expectation::ListExecutions { response })
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<RemoteCall> {
        self.state.calls.lock().unwrap().clone()
    }

    /// Operation names of [`calls`](Self::calls).
    pub fn call_names(&self) -> Vec<&'static str> {
        self.calls().iter().map(RemoteCall::name).collect()
    }

    /// The context each call received, in call order.
    pub fn contexts(&self) -> Vec<CallContext> {
        self.state.contexts.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.state.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining: {:?}", exps.len(), exps);
        }
    }

    fn builder<T>(
        &self,
        make: impl FnOnce(Result<T, RemoteError>) -> Expectation + Send + 'static,
    ) -> ExpectationBuilder<T> {
        ExpectationBuilder {
            state: self.state.clone(),
            make: Box::new(make),
        }
    }

    fn record(&self, ctx: &CallContext, call: RemoteCall) -> Expectation {
        self.state.contexts.lock().unwrap().push(ctx.clone());
        self.state.calls.lock().unwrap().push(call.clone());
        let next = self.state.expectations.lock().unwrap().pop_front();
        match next {
            Some(expectation) => expectation,
            None => panic!("Unexpected call {call:?}: no expectations left"),
        }
    }
}

/// Completes one queued expectation with its response.
pub struct ExpectationBuilder<T> {
    state: Arc<MockState>,
    make: Box<dyn FnOnce(Result<T, RemoteError>) -> Expectation + Send>,
}

impl<T> ExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: T) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: RemoteError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<T, RemoteError>) {
        let expectation = (self.make)(response);
        self.state
            .expectations
            .lock()
            .unwrap()
            .push_back(expectation);
    }
}

fn mismatch(call: &RemoteCall, expectation: &Expectation) -> ! {
    panic!("Unexpected request or expectation mismatch: got {call:?}, expected {expectation:?}")
}

#[async_trait]
impl UsersApi for MockApi {
    async fn get_user(
        &self,
        ctx: &CallContext,
        id_or_email: &str,
        include_role: bool,
    ) -> Result<User, RemoteError> {
        let call = RemoteCall::GetUser {
            id_or_email: id_or_email.to_string(),
            include_role,
        };
        match self.record(ctx, call.clone()) {
            Expectation::GetUser {
                id_or_email: expected,
                response,
            } if expected == id_or_email => response,
            other => mismatch(&call, &other),
        }
    }

    async fn create_user(
        &self,
        ctx: &CallContext,
        request: UserCreateRequest,
    ) -> Result<UserCreateResponse, RemoteError> {
        let call = RemoteCall::CreateUser(request);
        match self.record(ctx, call.clone()) {
            Expectation::CreateUser { response } => response,
            other => mismatch(&call, &other),
        }
    }

    async fn patch_user_role(
        &self,
        ctx: &CallContext,
        id: &str,
        change: RoleChange,
    ) -> Result<(), RemoteError> {
        let call = RemoteCall::PatchUserRole {
            id: id.to_string(),
            change,
        };
        match self.record(ctx, call.clone()) {
            Expectation::PatchUserRole {
                id: expected,
                response,
            } if expected == id => response,
            other => mismatch(&call, &other),
        }
    }

    async fn delete_user(&self, ctx: &CallContext, id: &str) -> Result<(), RemoteError> {
        let call = RemoteCall::DeleteUser { id: id.to_string() };
        match self.record(ctx, call.clone()) {
            Expectation::DeleteUser {
                id: expected,
                response,
            } if expected == id => response,
            other => mismatch(&call, &other),
        }
    }

    async fn list_users(
        &self,
        ctx: &CallContext,
        filters: &UserListFilters,
    ) -> Result<UserList, RemoteError> {
        let call = RemoteCall::ListUsers(filters.clone());
        match self.record(ctx, call.clone()) {
            Expectation::ListUsers { response } => response,
            other => mismatch(&call, &other),
        }
    }
}

#[async_trait]
impl ExecutionsApi for MockApi {
    async fn retry_execution(&self, ctx: &CallContext, id: u64) -> Result<Execution, RemoteError> {
        let call = RemoteCall::RetryExecution { id };
        match self.record(ctx, call.clone()) {
            Expectation::RetryExecution {
                id: expected,
                response,
            } if expected == id => response,
            other => mismatch(&call, &other),
        }
    }

    async fn get_execution(
        &self,
        ctx: &CallContext,
        id: u64,
        include_data: Option<bool>,
    ) -> Result<Execution, RemoteError> {
        let call = RemoteCall::GetExecution { id, include_data };
        match self.record(ctx, call.clone()) {
            Expectation::GetExecution {
                id: expected,
                response,
            } if expected == id => response,
            other => mismatch(&call, &other),
        }
    }

    async fn list_executions(
        &self,
        ctx: &CallContext,
        filters: &ExecutionListFilters,
    ) -> Result<ExecutionList, RemoteError> {
        let call = RemoteCall::ListExecutions(filters.clone());
        match self.record(ctx, call.clone()) {
            Expectation::ListExecutions { response } => response,
            other => mismatch(&call, &other),
        }
    }
}
