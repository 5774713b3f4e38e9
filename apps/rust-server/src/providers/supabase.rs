// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Supabase PostgREST implementation of [`Store`].
//!
//! Tables: `profiles` (`id`, `lifestyle_text`, `lifestyle_vector`),
//! `pets`, `applications`. Similarity search is the `match_pets(query_vector,
//! match_limit)` SQL function exposed under `/rest/v1/rpc/`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use uuid::Uuid;

use super::{Store, UpstreamError};
use crate::models::{Embedding, NewApplication, NewPet, Pet, PetSummary};

const SERVICE: &str = "supabase";

const PREFER: &str = "Prefer";

#[derive(Clone)]
pub struct SupabaseStore {
    /// `{SUPABASE_URL}/rest/v1`
    rest_url: String,
    service_key: String,
    http: Client,
}

#[derive(Deserialize)]
struct LifestyleVectorRow {
    #[serde(default)]
    lifestyle_vector: Option<Embedding>,
}

#[derive(Deserialize)]
struct LifestyleTextRow {
    #[serde(default)]
    lifestyle_text: Option<String>,
}

impl SupabaseStore {
    pub fn new(
        project_url: &str,
        service_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UpstreamError::from_reqwest(SERVICE, e))?;

        Ok(Self {
            rest_url: format!("{}/rest/v1", project_url.trim_end_matches('/')),
            service_key: service_key.into(),
            http,
        })
    }

    fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}/{}", self.rest_url, path))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .header(header::ACCEPT, "application/json")
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, UpstreamError> {
        let response = request
            .send()
            .await
            .map_err(|e| UpstreamError::from_reqwest(SERVICE, e))?;
        UpstreamError::check_status(SERVICE, response).await
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, UpstreamError> {
        self.send(request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| UpstreamError::from_reqwest(SERVICE, e))
    }

    /// `GET /{table}?select={columns}&{column}=eq.{value}`
    async fn select_eq<T: DeserializeOwned>(
        &self,
        table: &str,
        columns: &str,
        column: &str,
        value: &str,
    ) -> Result<Vec<T>, UpstreamError> {
        let request = self
            .request(reqwest::Method::GET, table)
            .query(&[("select", columns.to_string()), (column, format!("eq.{value}"))]);
        self.send_json(request).await
    }
}

#[async_trait]
impl Store for SupabaseStore {
    async fn update_lifestyle(
        &self,
        user_id: &str,
        text: &str,
        vector: &Embedding,
    ) -> Result<bool, UpstreamError> {
        let request = self
            .request(reqwest::Method::PATCH, "profiles")
            .query(&[("id", format!("eq.{user_id}")), ("select", "id".to_string())])
            .header(PREFER, "return=representation")
            .json(&json!({
                "lifestyle_vector": vector,
                "lifestyle_text": text,
            }));
        let rows: Vec<Value> = self.send_json(request).await?;
        Ok(!rows.is_empty())
    }

    async fn insert_pet(&self, pet: &NewPet) -> Result<Value, UpstreamError> {
        let request = self
            .request(reqwest::Method::POST, "pets")
            .header(PREFER, "return=representation")
            .json(pet);
        let rows: Vec<Value> = self.send_json(request).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| UpstreamError::InvalidResponse {
                service: SERVICE,
                message: "insert returned no rows".to_string(),
            })
    }

    async fn lifestyle_vector(&self, user_id: &str) -> Result<Option<Embedding>, UpstreamError> {
        let rows: Vec<LifestyleVectorRow> = self
            .select_eq("profiles", "lifestyle_vector", "id", user_id)
            .await?;
        Ok(rows.into_iter().next().and_then(|row| row.lifestyle_vector))
    }

    async fn lifestyle_text(&self, user_id: &str) -> Result<Option<String>, UpstreamError> {
        let rows: Vec<LifestyleTextRow> = self
            .select_eq("profiles", "lifestyle_text", "id", user_id)
            .await?;
        Ok(rows.into_iter().next().and_then(|row| row.lifestyle_text))
    }

    async fn match_pets(&self, query: &Embedding, limit: u32) -> Result<Vec<Value>, UpstreamError> {
        let request = self
            .request(reqwest::Method::POST, "rpc/match_pets")
            .json(&json!({
                "query_vector": query,
                "match_limit": limit,
            }));
        self.send_json(request).await
    }

    async fn insert_application(&self, application: &NewApplication) -> Result<(), UpstreamError> {
        let request = self
            .request(reqwest::Method::POST, "applications")
            .header(PREFER, "return=minimal")
            .json(application);
        self.send(request).await?;
        Ok(())
    }

    async fn get_pet(&self, pet_id: Uuid) -> Result<Option<Pet>, UpstreamError> {
        let rows: Vec<Pet> = self
            .select_eq("pets", "*", "id", &pet_id.to_string())
            .await?;
        Ok(rows.into_iter().next())
    }

    /// Oldest first, so the tail is the most recent listings.
    async fn pets_by_shelter(&self, shelter_id: &str) -> Result<Vec<PetSummary>, UpstreamError> {
        let request = self.request(reqwest::Method::GET, "pets").query(&[
            ("select", "id,description".to_string()),
            ("shelter_id", format!("eq.{shelter_id}")),
            ("order", "created_at.asc".to_string()),
        ]);
        self.send_json(request).await
    }
}
