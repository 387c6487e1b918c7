/// Identifier of a recording window request as stored by the request store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RequestId(pub i64);

impl RequestId {
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for RequestId {
    fn from(value: i64) -> Self {
        RequestId(value)
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
