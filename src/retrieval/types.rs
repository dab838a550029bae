// src/retrieval/types.rs
use anyhow::Result;

/// One passage of the reference corpus. Read-only within this crate.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct Document {
    pub id: i64,
    pub source: String, // e.g. "bible", "coran"
    pub book: String,
    pub chapter: Option<u32>,
    pub verse: Option<u32>,
    pub content: String,
}

/// A document before the store assigns its id (bulk import / seeding).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct NewDocument {
    pub source: String,
    pub book: String,
    #[serde(default)]
    pub chapter: Option<u32>,
    #[serde(default)]
    pub verse: Option<u32>,
    pub content: String,
}

impl NewDocument {
    pub fn with_id(self, id: i64) -> Document {
        Document {
            id,
            source: self.source,
            book: self.book,
            chapter: self.chapter,
            verse: self.verse,
            content: self.content,
        }
    }
}

/// Storage collaborator consumed by the retrieval orchestrator.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Documents whose text contains `keyword` (case-insensitive).
    async fn search_by_substring(&self, keyword: &str) -> Result<Vec<Document>>;
    /// Full corpus scan, used by TF-IDF ranking.
    async fn all_documents(&self) -> Result<Vec<Document>>;
    fn name(&self) -> &'static str;
}
