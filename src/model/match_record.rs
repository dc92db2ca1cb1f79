use serde::Serialize;

/// One normalized bout from a wrestler's match history.
///
/// Field order matches the CSV column order of the exported datasets.
/// `wrestler_school` is stamped at the team aggregation boundary; every
/// record is stamped before it is ever persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MatchRecord {
    #[serde(rename = "Season")]
    pub season: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Event")]
    pub event: String,
    #[serde(rename = "Weight Class")]
    pub weight_class: String,
    #[serde(rename = "Result")]
    pub result: String,
    #[serde(rename = "Result Type")]
    pub result_type: String,
    #[serde(rename = "Score")]
    pub score: String,
    #[serde(rename = "Opponent")]
    pub opponent: String,
    #[serde(rename = "Opponent ID")]
    pub opponent_id: u32,
    #[serde(rename = "Opponent Record")]
    pub opponent_record: String,
    #[serde(rename = "Opponent School")]
    pub opponent_school: String,
    #[serde(rename = "Wrestler")]
    pub wrestler: String,
    #[serde(rename = "Wrestler ID")]
    pub wrestler_id: u32,
    #[serde(rename = "Wrestler School")]
    pub wrestler_school: Option<String>,
}

impl MatchRecord {
    /// Whether every text field carries a value. Empty string is treated as
    /// missing; incomplete records are dropped, never partially persisted.
    pub fn is_complete(&self) -> bool {
        let texts = [
            &self.season,
            &self.date,
            &self.event,
            &self.weight_class,
            &self.result,
            &self.result_type,
            &self.score,
            &self.opponent,
            &self.opponent_record,
            &self.opponent_school,
            &self.wrestler,
        ];
        texts.iter().all(|t| !t.is_empty())
            && self.wrestler_school.as_deref() != Some("")
    }
}
