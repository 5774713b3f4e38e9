// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Prompt text for the LLM-backed endpoints.

use crate::models::Pet;

/// Used when the adopter has not written a lifestyle description.
pub const MISSING_LIFESTYLE: &str = "No lifestyle description";

/// Returned by shelter analytics when the shelter has no listings.
pub const NO_LISTINGS_SUGGESTION: &str =
    "Add your first pet listing to receive suggestions on how to improve your descriptions.";

/// Number of most recent listings analytics looks at.
pub const ANALYTICS_SAMPLE: usize = 5;

fn pet_line(pet: &Pet) -> String {
    format!(
        "Pet: {}, {}, {}",
        pet.name,
        pet.species,
        pet.description.as_deref().unwrap_or("")
    )
}

pub fn compatibility_report(lifestyle: &str, pet: &Pet) -> String {
    format!(
        "Explain why this pet is a good match.\n\
         Adopter lifestyle: {lifestyle}\n\
         {}\n\
         Keep it warm, positive, 3-4 sentences.",
        pet_line(pet)
    )
}

pub fn chat(question: &str, pet: Option<&Pet>) -> String {
    let context = pet.map(pet_line).unwrap_or_default();
    format!("Answer adoption question: {question}\nContext: {context}")
}

pub fn care_roadmap(species: &str) -> String {
    format!("Create a 30-60-90 day care roadmap for a {species} after adoption.")
}

/// `descriptions` are in store order; only the last [`ANALYTICS_SAMPLE`] are used.
pub fn shelter_analytics(descriptions: &[&str]) -> String {
    let start = descriptions.len().saturating_sub(ANALYTICS_SAMPLE);
    format!(
        "Analyze these pet descriptions and suggest improvements:\n{}",
        descriptions[start..].join("\n")
    )
}
