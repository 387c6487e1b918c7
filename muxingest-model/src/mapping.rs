use chrono::NaiveDate;

/// Row of the archive's channel-mapping table: which external channel name a
/// source channel is known under during an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelMapping {
    pub source_channel_id: String,
    pub mapped_channel_id: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

impl ChannelMapping {
    pub fn new(
        source_channel_id: impl Into<String>,
        mapped_channel_id: impl Into<String>,
        from_date: NaiveDate,
        to_date: NaiveDate,
    ) -> Self {
        Self {
            source_channel_id: source_channel_id.into(),
            mapped_channel_id: mapped_channel_id.into(),
            from_date,
            to_date,
        }
    }

    pub fn applies_to(&self, source_channel_id: &str, day: NaiveDate) -> bool {
        self.source_channel_id == source_channel_id
            && self.from_date <= day
            && day <= self.to_date
    }
}
