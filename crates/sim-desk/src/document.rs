//! Approval documents: the hidden truth layer, observable clues, and the
//! projection type handed to the presentation layer.

use serde::{Deserialize, Serialize};
use sim_core::config::Department;
use sim_core::Money;

/// The twelve kinds of paperwork that land on the president's desk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCategory {
    Hiring,
    Budget,
    ProductPlan,
    Marketing,
    Equipment,
    PersonnelChange,
    Promotion,
    Training,
    SalaryRaise,
    NewBusiness,
    CostCut,
    Partnership,
}

impl DocumentCategory {
    pub const ALL: [DocumentCategory; 12] = [
        DocumentCategory::Hiring,
        DocumentCategory::Budget,
        DocumentCategory::ProductPlan,
        DocumentCategory::Marketing,
        DocumentCategory::Equipment,
        DocumentCategory::PersonnelChange,
        DocumentCategory::Promotion,
        DocumentCategory::Training,
        DocumentCategory::SalaryRaise,
        DocumentCategory::NewBusiness,
        DocumentCategory::CostCut,
        DocumentCategory::Partnership,
    ];
}

/// Hidden ground truth of a document. Never exposed through
/// [`DocumentView`]; the player infers it from clues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentNature {
    ClearGood,
    ClearBad,
    Tradeoff,
    Gamble,
    LongTerm,
}

/// The specific malicious or low-quality characteristic hidden inside a
/// clear_bad document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrapKind {
    InflatedCost,
    Embezzlement,
    IncompetentHire,
    WastefulSpending,
    HiddenRisk,
    ConflictInterest,
    FakeData,
}

impl TrapKind {
    pub fn label(self) -> &'static str {
        match self {
            TrapKind::InflatedCost => "cost padding",
            TrapKind::Embezzlement => "embezzlement",
            TrapKind::IncompetentHire => "an unfit hire",
            TrapKind::WastefulSpending => "wasteful spending",
            TrapKind::HiddenRisk => "a hidden risk",
            TrapKind::ConflictInterest => "a conflict of interest",
            TrapKind::FakeData => "fabricated data",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Urgent,
    High,
    Normal,
    Low,
}

/// Decisions the president can stamp on a document. Approve and reject are
/// terminal; hold and remand keep the document queued; investigate defers
/// one turn and then clears back to undecided.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Approve,
    Reject,
    Hold,
    Remand,
    Investigate,
}

/// One truthful observation about a document. Clues correlate with the
/// hidden nature but never state it outright.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentClue {
    pub field: String,
    pub observation: String,
}

/// Who submitted the document. `employee_id` is set when it is one of the
/// player's own staff.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submitter {
    pub employee_id: Option<u64>,
    pub name: String,
    pub position: String,
}

/// The visible body of a document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDetails {
    pub amount: Money,
    pub expected_benefit: String,
    pub timeline: String,
    pub risks: String,
}

/// Computed once at resolution time and immutable afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocumentOutcome {
    pub money_change: Money,
    pub market_share_change: f64,
    pub brand_power_change: i32,
    pub ceo_approval_change: i32,
    pub employee_morale_change: i32,
    pub description: String,
}

impl DocumentOutcome {
    pub fn neutral(description: impl Into<String>) -> Self {
        Self {
            money_change: 0,
            market_share_change: 0.0,
            brand_power_change: 0,
            ceo_approval_change: 0,
            employee_morale_change: 0,
            description: description.into(),
        }
    }
}

/// A document in full, hidden fields included. Persisted as-is; only
/// [`DocumentView`] crosses the presentation boundary.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApprovalDocument {
    pub id: u64,
    pub category: DocumentCategory,
    pub priority: Priority,
    pub title: String,
    pub department: Department,
    pub submitter: Submitter,
    pub summary: String,
    pub details: DocumentDetails,

    // Hidden truth layer.
    pub nature: DocumentNature,
    pub trap: Option<TrapKind>,
    pub actual_amount: Option<Money>,
    /// 0-100 effectiveness score of the proposal.
    pub actual_benefit: u32,
    pub gamble_success_rate: Option<u32>,
    pub long_term_benefit: Option<Money>,
    pub long_term_turns: Option<u32>,

    pub clues: Vec<DocumentClue>,
    pub turn_submitted: u32,
    pub deadline: Option<u32>,
    pub verdict: Option<Verdict>,
    pub outcome: Option<DocumentOutcome>,
    pub result_applied: bool,
    pub under_investigation: bool,
    pub investigation_result: Option<String>,
    /// Id of the resolved document whose causal chain produced this one.
    pub triggered_by: Option<u64>,
}

impl ApprovalDocument {
    /// Whether the deadline has passed without a decision.
    pub fn is_expired(&self, turn: u32) -> bool {
        self.deadline.is_some_and(|d| d <= turn) && self.verdict.is_none() && !self.under_investigation
    }
}

/// What the presentation layer is allowed to see. Structurally omits the
/// hidden fields so a rendering bug cannot leak them.
#[derive(Clone, Debug, Serialize)]
pub struct DocumentView {
    pub id: u64,
    pub category: DocumentCategory,
    pub priority: Priority,
    pub title: String,
    pub department: Department,
    pub submitter: Submitter,
    pub summary: String,
    pub amount: Money,
    pub expected_benefit: String,
    pub timeline: String,
    pub risks: String,
    pub clues: Vec<DocumentClue>,
    pub turn_submitted: u32,
    pub deadline: Option<u32>,
    pub verdict: Option<Verdict>,
    pub under_investigation: bool,
    pub investigation_result: Option<String>,
}

impl From<&ApprovalDocument> for DocumentView {
    fn from(doc: &ApprovalDocument) -> Self {
        Self {
            id: doc.id,
            category: doc.category,
            priority: doc.priority,
            title: doc.title.clone(),
            department: doc.department,
            submitter: doc.submitter.clone(),
            summary: doc.summary.clone(),
            amount: doc.details.amount,
            expected_benefit: doc.details.expected_benefit.clone(),
            timeline: doc.details.timeline.clone(),
            risks: doc.details.risks.clone(),
            clues: doc.clues.clone(),
            turn_submitted: doc.turn_submitted,
            deadline: doc.deadline,
            verdict: doc.verdict,
            under_investigation: doc.under_investigation,
            investigation_result: doc.investigation_result.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> ApprovalDocument {
        ApprovalDocument {
            id: 1,
            category: DocumentCategory::Budget,
            priority: Priority::Normal,
            title: "Q2 budget request".into(),
            department: Department::Sales,
            submitter: Submitter {
                employee_id: None,
                name: "Kenta Sato".into(),
                position: "Manager".into(),
            },
            summary: "Requesting budget".into(),
            details: DocumentDetails {
                amount: 2_000_000,
                expected_benefit: "Smooth operations".into(),
                timeline: "3 months".into(),
                risks: "Overrun".into(),
            },
            nature: DocumentNature::ClearBad,
            trap: Some(TrapKind::Embezzlement),
            actual_amount: Some(3_500_000),
            actual_benefit: 10,
            gamble_success_rate: None,
            long_term_benefit: None,
            long_term_turns: None,
            clues: vec![DocumentClue {
                field: "Entertainment expenses".into(),
                observation: "Up 40% over last quarter".into(),
            }],
            turn_submitted: 4,
            deadline: Some(7),
            verdict: None,
            outcome: None,
            result_applied: false,
            under_investigation: false,
            investigation_result: None,
            triggered_by: None,
        }
    }

    #[test]
    fn view_omits_the_hidden_layer() {
        let view = DocumentView::from(&doc());
        let json = serde_json::to_value(&view).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("nature"));
        assert!(!obj.contains_key("trap"));
        assert!(!obj.contains_key("actual_amount"));
        assert!(!obj.contains_key("actual_benefit"));
        assert!(!obj.contains_key("gamble_success_rate"));
        assert!(!obj.contains_key("long_term_benefit"));
        assert!(!obj.contains_key("long_term_turns"));
        assert_eq!(obj["amount"], 2_000_000);
    }

    #[test]
    fn expiry_requires_no_verdict_and_no_investigation() {
        let mut d = doc();
        assert!(!d.is_expired(6));
        assert!(d.is_expired(7));
        d.under_investigation = true;
        assert!(!d.is_expired(7));
        d.under_investigation = false;
        d.verdict = Some(Verdict::Hold);
        assert!(!d.is_expired(7));
    }

    #[test]
    fn hidden_fields_survive_serde() {
        let d = doc();
        let json = serde_json::to_string(&d).unwrap();
        let back: ApprovalDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back.nature, DocumentNature::ClearBad);
        assert_eq!(back.trap, Some(TrapKind::Embezzlement));
        assert_eq!(back.actual_amount, Some(3_500_000));
    }
}
