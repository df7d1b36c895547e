use serde::{Deserialize, Serialize};

use crate::scoring::Candidate;

/// Body of `POST /analyze_batch`. A missing `text` reads as empty and is rejected later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeBatchRequest {
    #[serde(default)]
    pub text: String,
    pub candidates: Vec<Candidate>,
}
