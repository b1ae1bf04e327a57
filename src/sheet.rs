//! Investigator character-sheet import.
//!
//! Sheets are JSON exports shaped like
//! `{"Investigator": {"PersonalDetails": {"Name": ..., "Occupation": ..., "Age": ...}, ...}}`.
//! Only the personal details are read; every other section is ignored.

use serde::Deserialize;

use crate::models::CreateCharacterInput;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InvestigatorSheet {
    investigator: InvestigatorSection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InvestigatorSection {
    #[serde(default)]
    personal_details: PersonalDetails,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PersonalDetails {
    #[serde(default)]
    name: String,
    #[serde(default)]
    occupation: String,
    #[serde(default)]
    age: String,
}

/// Decode a sheet export into the fields needed to create a character.
pub fn parse_investigator(data: &[u8]) -> serde_json::Result<CreateCharacterInput> {
    let sheet: InvestigatorSheet = serde_json::from_slice(data)?;
    let details = sheet.investigator.personal_details;

    Ok(CreateCharacterInput {
        name: details.name,
        occupation: details.occupation,
        age: details.age,
    })
}
