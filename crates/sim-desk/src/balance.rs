//! Tuning constants for the president's desk.

use sim_core::config::Difficulty;
use sim_core::{Dice, Money};

/// Inclusive integer range rolled at resolution time.
#[derive(Clone, Copy, Debug)]
pub struct Span {
    pub min: i32,
    pub max: i32,
}

impl Span {
    pub fn roll(&self, dice: &mut Dice) -> i32 {
        dice.between(i64::from(self.min), i64::from(self.max)) as i32
    }
}

/// Base weights for the nature draw. The clear_bad weight is computed from
/// difficulty and elapsed turns, see [`DeskBalance::trap_rate`].
#[derive(Clone, Copy, Debug)]
pub struct NatureWeights {
    pub clear_good: f64,
    pub tradeoff: f64,
    pub gamble: f64,
    pub long_term: f64,
}

#[derive(Clone, Debug)]
pub struct DeskBalance {
    // Document generation.
    pub base_documents_per_turn: u32,
    /// One extra document per this many elapsed turns.
    pub documents_turn_growth: u32,
    /// One extra document per this many employees.
    pub documents_employee_growth: u32,
    pub max_documents_per_turn: u32,
    pub trap_base_rate_easy: f64,
    pub trap_base_rate_normal: f64,
    pub trap_base_rate_hard: f64,
    pub trap_growth_per_turn: f64,
    pub max_trap_rate: f64,
    pub nature_weights: NatureWeights,
    pub clue_attach_probability: f64,
    pub optional_deadline_chance: f64,
    pub submitter_from_staff_chance: f64,

    // Verdict outcomes.
    pub approve_good_ceo_bonus: Span,
    pub reject_good_ceo_penalty: i32,
    pub reject_good_morale_penalty: i32,
    pub approve_bad_ceo_penalty: Span,
    pub reject_bad_ceo_bonus: Span,
    pub tradeoff_ceo_range: Span,
    pub gamble_reject_ceo_penalty: i32,
    pub missed_trap_scandal_risk: f64,

    // Remand and investigation.
    pub max_remands_per_week: u32,
    pub remand_morale_penalty: i32,
    pub remand_ceo_penalty: i32,
    pub investigation_cost: Money,
    pub investigation_deadline_extension: u32,

    // Visitors.
    pub visitor_base_chance: f64,
    pub visitor_document_link_chance: f64,
    pub visitor_from_staff_chance: f64,

    // History caps.
    pub max_document_history: usize,
    pub max_visitor_history: usize,
}

impl DeskBalance {
    pub fn standard() -> Self {
        Self {
            base_documents_per_turn: 2,
            documents_turn_growth: 20,
            documents_employee_growth: 10,
            max_documents_per_turn: 6,
            trap_base_rate_easy: 0.10,
            trap_base_rate_normal: 0.15,
            trap_base_rate_hard: 0.25,
            trap_growth_per_turn: 0.002,
            max_trap_rate: 0.35,
            nature_weights: NatureWeights {
                clear_good: 0.30,
                tradeoff: 0.25,
                gamble: 0.15,
                long_term: 0.15,
            },
            clue_attach_probability: 0.7,
            optional_deadline_chance: 0.3,
            submitter_from_staff_chance: 0.7,
            approve_good_ceo_bonus: Span { min: 2, max: 3 },
            reject_good_ceo_penalty: -2,
            reject_good_morale_penalty: -15,
            approve_bad_ceo_penalty: Span { min: -15, max: -5 },
            reject_bad_ceo_bonus: Span { min: 5, max: 10 },
            tradeoff_ceo_range: Span { min: -1, max: 2 },
            gamble_reject_ceo_penalty: 0,
            missed_trap_scandal_risk: 15.0,
            max_remands_per_week: 1,
            remand_morale_penalty: -3,
            remand_ceo_penalty: -1,
            investigation_cost: 50_000,
            investigation_deadline_extension: 1,
            visitor_base_chance: 0.30,
            visitor_document_link_chance: 0.3,
            visitor_from_staff_chance: 0.6,
            max_document_history: 50,
            max_visitor_history: 20,
        }
    }

    /// Probability of a clear_bad document at the given turn: the
    /// difficulty base plus slow growth, capped.
    pub fn trap_rate(&self, difficulty: Difficulty, turn: u32) -> f64 {
        let base = match difficulty {
            Difficulty::Easy => self.trap_base_rate_easy,
            Difficulty::Normal => self.trap_base_rate_normal,
            Difficulty::Hard => self.trap_base_rate_hard,
        };
        (base + f64::from(turn) * self.trap_growth_per_turn).min(self.max_trap_rate)
    }

    /// Number of documents generated on the given turn.
    pub fn documents_for_turn(&self, turn: u32, employee_count: usize) -> u32 {
        (self.base_documents_per_turn
            + turn / self.documents_turn_growth
            + employee_count as u32 / self.documents_employee_growth)
            .min(self.max_documents_per_turn)
    }
}
