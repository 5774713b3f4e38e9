// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Petmatch - Pet Adoption Matching API
//!
//! Thin HTTP backend for a pet adoption app. Supabase provides auth and the
//! Postgres/pgvector store; an OpenAI-compatible API provides embeddings and
//! chat completions.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Supabase JWT verification and access policy
//! - `providers` - Store, embedding, and chat adapters
//! - `prompts` - Prompt text for the LLM-backed routes

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod prompts;
pub mod providers;
pub mod state;
pub mod telemetry;

#[cfg(test)]
mod test_support;
