//! Data models for backend event rows.
//!
//! Field names follow the `eventos` table columns. Only the subset needed
//! to build a preview is requested.

use serde::{Deserialize, Deserializer};

/// Columns requested from the backend, in `select=` syntax.
pub const EVENT_COLUMNS: &str =
    "id,nome,descricao,imagem,data_evento,horario,modalidade,cidade,estado,created_at";

/// A single event row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EventRecord {
    /// Primary key (numeric or uuid, normalized to a string)
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    /// Event name
    #[serde(default)]
    pub nome: Option<String>,

    /// Description, may contain raw markup from the rich-text editor
    #[serde(default)]
    pub descricao: Option<String>,

    /// Cover image URL or storage path
    #[serde(default)]
    pub imagem: Option<String>,

    /// Event date, displayed as-is
    #[serde(default)]
    pub data_evento: Option<String>,

    /// Start time, displayed as-is
    #[serde(default)]
    pub horario: Option<String>,

    /// "Presencial", "Online" or "Híbrido"
    #[serde(default)]
    pub modalidade: Option<String>,

    /// City
    #[serde(default)]
    pub cidade: Option<String>,

    /// State / region
    #[serde(default)]
    pub estado: Option<String>,

    /// Row creation timestamp
    #[serde(default)]
    pub created_at: Option<String>,
}

impl EventRecord {
    /// Event name, if present and non-blank.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        non_blank(self.nome.as_deref())
    }
}

/// Treat whitespace-only strings like missing values.
#[must_use]
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}
