use crate::domain::errors::AnalysisError;
use csv::StringRecord;

/// Column positions resolved from a CSV header row.
///
/// Header names are trimmed before lookup; stray spaces around column
/// names are common in exported feeds.
#[derive(Debug, Clone)]
pub struct HeaderIndex {
    names: Vec<String>,
}

impl HeaderIndex {
    pub fn new(headers: &StringRecord) -> Self {
        Self {
            names: headers.iter().map(|h| h.trim().to_string()).collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Exact (post-trim) match.
    pub fn position(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.names.iter().position(|h| h == name)
    }

    pub fn require(&self, name: &str) -> Result<usize, AnalysisError> {
        self.position(name)
            .ok_or_else(|| AnalysisError::schema(name.trim(), &self.names))
    }

    /// Case-insensitive match against any of the candidate names.
    pub fn position_ci(&self, candidates: &[&str]) -> Option<usize> {
        candidates.iter().find_map(|candidate| {
            self.names
                .iter()
                .position(|h| h.eq_ignore_ascii_case(candidate.trim()))
        })
    }

    pub fn require_ci(&self, candidates: &[&str]) -> Result<usize, AnalysisError> {
        self.position_ci(candidates).ok_or_else(|| {
            AnalysisError::schema(candidates.first().copied().unwrap_or_default(), &self.names)
        })
    }
}
