// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::TokenValidator;
use crate::providers::{ChatModel, Embedder, Store};

/// Shared request state. The JWKS cache inside the validator is the only
/// mutable state shared across requests.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<TokenValidator>,
    pub store: Arc<dyn Store>,
    pub embedder: Arc<dyn Embedder>,
    pub chat: Arc<dyn ChatModel>,
}

impl AppState {
    pub fn new(
        auth: TokenValidator,
        store: Arc<dyn Store>,
        embedder: Arc<dyn Embedder>,
        chat: Arc<dyn ChatModel>,
    ) -> Self {
        Self {
            auth: Arc::new(auth),
            store,
            embedder,
            chat,
        }
    }
}
