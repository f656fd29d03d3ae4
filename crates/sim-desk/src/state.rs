//! Desk state owned by the orchestrator, and the read-only company view
//! the desk evaluates conditions against.

use serde::{Deserialize, Serialize};
use sim_core::config::{Department, Difficulty};
use sim_core::Money;

use crate::document::{ApprovalDocument, DocumentCategory, DocumentView};
use crate::visitor::{VisitorEvent, VisitorType};

/// The slice of an employee the desk needs: enough to pick submitters and
/// evaluate visitor trigger conditions, nothing more.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EmployeeRef {
    pub id: u64,
    pub name: String,
    pub department: Department,
    pub motivation: i32,
    /// Turns since the employee joined.
    pub tenure_turns: u32,
}

/// Immutable snapshot of company metrics, rebuilt by the orchestrator each
/// time it calls into the desk. The desk never mutates company state
/// directly; everything it wants changed comes back as an outcome record.
#[derive(Clone, Debug)]
pub struct CompanyView {
    pub money: Money,
    pub market_share: f64,
    pub product_count: usize,
    pub turn: u32,
    pub month: u32,
    pub difficulty: Difficulty,
    pub scandal_risk: f64,
    pub employees: Vec<EmployeeRef>,
}

/// Running decision statistics shown on the president's report card.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DocumentStats {
    pub total_processed: u32,
    pub total_approved: u32,
    pub total_rejected: u32,
    pub traps_detected: u32,
    pub traps_missed: u32,
}

/// A follow-up scheduled by a causal chain rule, waiting for its turn.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PendingCausalEffect {
    pub trigger_turn: u32,
    pub result_category: Option<DocumentCategory>,
    pub result_visitor: Option<VisitorType>,
    pub source_document: u64,
}

/// A matured benefit owed by an approved long-term document. Lives outside
/// `history` so pruning old paperwork can never cancel a payout.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PendingPayout {
    pub due_turn: u32,
    pub amount: Money,
    pub title: String,
    pub source_document: u64,
}

/// Everything the desk owns: the live queue, resolved history, the visitor
/// at the door, and scheduled follow-ups.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DeskState {
    pub queue: Vec<ApprovalDocument>,
    pub history: Vec<ApprovalDocument>,
    pub current_visitor: Option<VisitorEvent>,
    pub visitor_history: Vec<VisitorEvent>,
    pub pending_causal: Vec<PendingCausalEffect>,
    pub pending_payouts: Vec<PendingPayout>,
    /// Forced visitor types that could not spawn yet because someone was
    /// already at the door.
    pub pending_visitors: Vec<VisitorType>,
    pub stats: DocumentStats,
    pub remands_this_week: u32,
    pub(crate) next_document_id: u64,
    pub(crate) next_visitor_id: u64,
}

impl DeskState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self, id: u64) -> Option<&ApprovalDocument> {
        self.queue.iter().find(|d| d.id == id)
    }

    pub(crate) fn next_document_id(&mut self) -> u64 {
        self.next_document_id += 1;
        self.next_document_id
    }

    pub(crate) fn next_visitor_id(&mut self) -> u64 {
        self.next_visitor_id += 1;
        self.next_visitor_id
    }

    /// Queue projected through the hidden-field firewall.
    pub fn queue_views(&self) -> Vec<DocumentView> {
        self.queue.iter().map(DocumentView::from).collect()
    }

    /// Called at the start of each week by the orchestrator.
    pub fn reset_weekly_limits(&mut self) {
        self.remands_this_week = 0;
    }

    /// Drop the oldest resolved documents and visits past the history caps.
    pub fn prune_history(&mut self, max_documents: usize, max_visitors: usize) {
        if self.history.len() > max_documents {
            let excess = self.history.len() - max_documents;
            self.history.drain(..excess);
        }
        if self.visitor_history.len() > max_visitors {
            let excess = self.visitor_history.len() - max_visitors;
            self.visitor_history.drain(..excess);
        }
    }
}

impl CompanyView {
    pub fn employee_count(&self) -> usize {
        self.employees.len()
    }

    pub(crate) fn any_motivation_below(&self, threshold: i32) -> bool {
        self.employees.iter().any(|e| e.motivation < threshold)
    }

    pub(crate) fn any_tenured_low_motivation(&self) -> bool {
        self.employees
            .iter()
            .any(|e| e.motivation < 30 && e.tenure_turns > 10)
    }
}
