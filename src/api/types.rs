use serde::{Deserialize, Serialize};

/// Body of `POST /ask`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AskRequest {
    pub question: String,
    pub platform: String,
}

/// One candidate answer. Only `content` is read; any other fields the
/// backend sends are ignored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub content: String,
}

/// Body returned by `POST /ask`.
///
/// A missing or `null` answer list deserializes to `None` and is treated
/// the same as an empty one.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct AskResponse {
    #[serde(default)]
    pub answer: Option<Vec<Answer>>,
}

impl AskResponse {
    /// The first answer, if the list is present and non-empty.
    pub fn first_answer(&self) -> Option<&Answer> {
        self.answer.as_ref().and_then(|answers| answers.first())
    }
}

/// Body returned by `POST /create_index`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct IndexStatus {
    pub status: String,
}
