//! Document generation: category weighting, template instantiation, and
//! synthesis of the hidden truth layer.

use sim_core::{Dice, Money};
use tracing::debug;

use crate::balance::DeskBalance;
use crate::document::{
    ApprovalDocument, DocumentCategory, DocumentClue, DocumentDetails, DocumentNature, Priority,
    Submitter, TrapKind,
};
use crate::state::{CompanyView, DeskState};
use crate::templates::{fill, templates_for, ClueTemplate, DocumentTemplate, Situation};

const SUBMITTER_NAMES: &[&str] = &[
    "Kenta Sato",
    "Tomoko Suzuki",
    "Hiroshi Takahashi",
    "Misaki Tanaka",
    "Naoki Watanabe",
    "Aiko Ito",
    "Daisuke Yamamoto",
    "Yui Nakamura",
];
const SUBMITTER_POSITIONS: &[&str] = &["Section Chief", "Manager", "Team Lead", "Supervisor"];
const PRODUCT_WORDS: &[&str] = &["CloudSync", "DataFlow", "SmartAssist", "QuickBoard"];
const MARKET_WORDS: &[&str] = &["SMB", "enterprise", "consumer", "education"];
const EQUIPMENT_WORDS: &[&str] = &[
    "development servers",
    "design workstations",
    "a video conferencing system",
    "office automation tools",
];
const CHANNEL_WORDS: &[&str] = &["web ads", "trade shows", "social media", "TV spots"];
const TRAINING_WORDS: &[&str] = &["Leadership", "Technical", "Sales skills", "Compliance"];
const BUSINESS_WORDS: &[&str] = &[
    "a subscription service",
    "a consulting arm",
    "an online marketplace",
    "a data analytics service",
];
const COUNTRY_WORDS: &[&str] = &["Taiwan", "Vietnam", "Germany", "the US"];
const AREA_WORDS: &[&str] = &["office supply", "travel", "outsourcing", "utility"];
const COMPANY_WORDS: &[&str] = &["TechCorp", "DigitalWorks", "Innovatech", "FutureSoft"];
const KIND_WORDS: &[&str] = &["technical", "sales", "capital"];
const REASON_WORDS: &[&str] = &[
    "equipment failure",
    "a sudden large order",
    "a vendor price hike",
];
const TIMING_WORDS: &[&str] = &["last week", "this morning", "three days ago"];
const CONDITION_WORDS: &[&str] = &["a seller's market", "stable", "highly competitive"];
const STATUS_WORDS: &[&str] = &["favorable", "undecided", "reluctant"];
const RESULT_WORDS: &[&str] = &["clearly positive", "mixed", "hard to measure"];
const GRADE_WORDS: &[&str] = &["A", "B+", "B", "C"];

/// Category weights skewed by the company's current shape.
fn category_weight(category: DocumentCategory, view: &CompanyView) -> f64 {
    let mut weight = 1.0;
    if view.employee_count() < 5 {
        match category {
            DocumentCategory::Hiring => weight *= 2.0,
            DocumentCategory::PersonnelChange => weight *= 0.3,
            _ => {}
        }
    }
    if view.product_count == 0 && category == DocumentCategory::ProductPlan {
        weight *= 2.5;
    }
    if view.money < 3_000_000 {
        match category {
            DocumentCategory::CostCut => weight *= 2.0,
            DocumentCategory::NewBusiness => weight *= 0.5,
            _ => {}
        }
    }
    if view.market_share < 5.0 && category == DocumentCategory::Marketing {
        weight *= 1.5;
    }
    weight
}

fn pick_category(view: &CompanyView, dice: &mut Dice) -> DocumentCategory {
    let weights: Vec<f64> = DocumentCategory::ALL
        .iter()
        .map(|c| category_weight(*c, view))
        .collect();
    let total: f64 = weights.iter().sum();
    let mut roll = dice.roll() * total;
    for (category, weight) in DocumentCategory::ALL.iter().zip(&weights) {
        roll -= weight;
        if roll <= 0.0 {
            return *category;
        }
    }
    DocumentCategory::Partnership
}

/// Draw a nature from the template's allowed set. Each allowed nature keeps
/// its global weight (clear_bad's comes from the trap rate) and the draw
/// renormalizes over what the template permits.
fn select_nature(
    template: &DocumentTemplate,
    view: &CompanyView,
    balance: &DeskBalance,
    dice: &mut Dice,
) -> DocumentNature {
    let weight_of = |n: DocumentNature| match n {
        DocumentNature::ClearGood => balance.nature_weights.clear_good,
        DocumentNature::ClearBad => balance.trap_rate(view.difficulty, view.turn),
        DocumentNature::Tradeoff => balance.nature_weights.tradeoff,
        DocumentNature::Gamble => balance.nature_weights.gamble,
        DocumentNature::LongTerm => balance.nature_weights.long_term,
    };
    let total: f64 = template.natures.iter().map(|n| weight_of(*n)).sum();
    if total <= 0.0 {
        return DocumentNature::ClearGood;
    }
    let mut roll = dice.roll() * total;
    for nature in template.natures {
        roll -= weight_of(*nature);
        if roll <= 0.0 {
            return *nature;
        }
    }
    *template.natures.last().unwrap_or(&DocumentNature::ClearGood)
}

fn generate_submitter(
    view: &CompanyView,
    department: sim_core::config::Department,
    balance: &DeskBalance,
    dice: &mut Dice,
) -> Submitter {
    let from_dept: Vec<_> = view
        .employees
        .iter()
        .filter(|e| e.department == department)
        .collect();
    if !from_dept.is_empty() && dice.chance(balance.submitter_from_staff_chance) {
        let emp = from_dept[dice.index(from_dept.len())];
        return Submitter {
            employee_id: Some(emp.id),
            name: emp.name.clone(),
            position: "Staff".into(),
        };
    }
    Submitter {
        employee_id: None,
        name: dice
            .pick(SUBMITTER_NAMES)
            .copied()
            .unwrap_or("Kenta Sato")
            .to_string(),
        position: dice
            .pick(SUBMITTER_POSITIONS)
            .copied()
            .unwrap_or("Manager")
            .to_string(),
    }
}

/// Placeholder values for template text. Numeric placeholders lean
/// favorable on honest documents and suspicious on clear_bad ones, so the
/// filled clues correlate with the hidden nature.
fn template_vars(
    nature: DocumentNature,
    submitter_name: &str,
    department: sim_core::config::Department,
    dice: &mut Dice,
) -> Vec<(&'static str, String)> {
    let bad = nature == DocumentNature::ClearBad;
    let ratio = if bad {
        dice.between_f64(1.8, 3.0)
    } else {
        dice.between_f64(0.8, 1.3)
    };
    let percent = if bad {
        dice.between(10, 40)
    } else {
        dice.between(55, 95)
    };
    let to_department = *dice
        .pick(&sim_core::config::Department::ALL)
        .unwrap_or(&sim_core::config::Department::Planning);
    vec![
        ("name", submitter_name.to_string()),
        ("department", department.label().to_string()),
        ("to_department", to_department.label().to_string()),
        ("position", dice.pick(SUBMITTER_POSITIONS).copied().unwrap_or("Manager").to_string()),
        ("count", dice.between(1, 5).to_string()),
        ("percent", percent.to_string()),
        ("other_percent", (100 - percent).to_string()),
        ("ratio", format!("{ratio:.1}")),
        ("amount", dice.between(10, 500).to_string()),
        ("months", dice.between(2, 12).to_string()),
        ("hours", dice.between(3, 24).to_string()),
        ("years", dice.between(2, 10).to_string()),
        ("rank", dice.between(1, 20).to_string()),
        ("score", if bad { dice.between(20, 50) } else { dice.between(60, 95) }.to_string()),
        ("product", dice.pick(PRODUCT_WORDS).copied().unwrap_or("CloudSync").to_string()),
        ("market", dice.pick(MARKET_WORDS).copied().unwrap_or("SMB").to_string()),
        ("equipment", dice.pick(EQUIPMENT_WORDS).copied().unwrap_or("development servers").to_string()),
        ("channel", dice.pick(CHANNEL_WORDS).copied().unwrap_or("web ads").to_string()),
        ("training", dice.pick(TRAINING_WORDS).copied().unwrap_or("Technical").to_string()),
        ("business", dice.pick(BUSINESS_WORDS).copied().unwrap_or("a subscription service").to_string()),
        ("country", dice.pick(COUNTRY_WORDS).copied().unwrap_or("Taiwan").to_string()),
        ("area", dice.pick(AREA_WORDS).copied().unwrap_or("office supply").to_string()),
        ("company", dice.pick(COMPANY_WORDS).copied().unwrap_or("TechCorp").to_string()),
        ("kind", dice.pick(KIND_WORDS).copied().unwrap_or("technical").to_string()),
        ("reason", dice.pick(REASON_WORDS).copied().unwrap_or("equipment failure").to_string()),
        ("timing", dice.pick(TIMING_WORDS).copied().unwrap_or("last week").to_string()),
        ("condition", dice.pick(CONDITION_WORDS).copied().unwrap_or("stable").to_string()),
        ("status", dice.pick(STATUS_WORDS).copied().unwrap_or("undecided").to_string()),
        ("result", dice.pick(RESULT_WORDS).copied().unwrap_or("mixed").to_string()),
        ("grade", if bad { "C".to_string() } else { dice.pick(GRADE_WORDS).copied().unwrap_or("B").to_string() }),
        ("level", if bad { "low".to_string() } else { dice.pick(&["high", "medium"]).copied().unwrap_or("medium").to_string() }),
    ]
}

fn attach_clues(
    template: &DocumentTemplate,
    situations: &[Situation],
    vars: &[(&str, String)],
    balance: &DeskBalance,
    dice: &mut Dice,
) -> Vec<DocumentClue> {
    let mut clues = Vec::new();
    for clue in template.clues {
        if dice.chance(balance.clue_attach_probability) {
            clues.push(DocumentClue {
                field: clue.field.to_string(),
                observation: fill(clue.observation, vars),
            });
        }
    }
    for situation in situations {
        if let Some(ClueTemplate { field, observation }) = situation.extra_clue() {
            clues.push(DocumentClue {
                field: field.to_string(),
                observation: observation.to_string(),
            });
        }
    }
    clues
}

fn deadline_for(priority: Priority, turn: u32, balance: &DeskBalance, dice: &mut Dice) -> Option<u32> {
    match priority {
        Priority::Urgent => Some(turn + 1),
        Priority::High => Some(turn + 3),
        _ => {
            if dice.chance(balance.optional_deadline_chance) {
                Some(turn + dice.between(3, 8) as u32)
            } else {
                None
            }
        }
    }
}

/// Instantiate one document of the given category.
pub fn generate_in_category(
    state: &mut DeskState,
    view: &CompanyView,
    balance: &DeskBalance,
    dice: &mut Dice,
    category: DocumentCategory,
    triggered_by: Option<u64>,
) -> Option<u64> {
    let candidates = templates_for(category);
    let template = *dice.pick(&candidates)?;
    let situations: Vec<Situation> = Situation::ALL
        .iter()
        .copied()
        .filter(|s| s.applies(view))
        .collect();

    let nature = select_nature(template, view, balance, dice);
    let department = *dice
        .pick(&sim_core::config::Department::ALL)
        .unwrap_or(&sim_core::config::Department::Management);
    let submitter = generate_submitter(view, department, balance, dice);
    let vars = template_vars(nature, &submitter.name, department, dice);

    let amount_mult: f64 = situations.iter().map(|s| s.amount_multiplier()).product();
    let benefit_mult: f64 = situations.iter().map(|s| s.benefit_multiplier()).product();
    let amount =
        ((dice.between(template.amount.min, template.amount.max) as f64) * amount_mult) as Money;
    let drawn_benefit = dice.between(
        i64::from(template.benefit_range.0),
        i64::from(template.benefit_range.1),
    ) as f64;
    let mut actual_benefit = ((drawn_benefit * benefit_mult) as u32).min(100);

    let mut trap = None;
    let mut actual_amount = None;
    let mut gamble_success_rate = None;
    let mut long_term_benefit = None;
    let mut long_term_turns = None;
    match nature {
        DocumentNature::ClearBad => {
            trap = Some(
                dice.pick(template.traps)
                    .copied()
                    .unwrap_or(TrapKind::InflatedCost),
            );
            actual_amount = Some((amount as f64 * dice.between_f64(1.3, 2.5)) as Money);
            actual_benefit = dice.between(0, 20) as u32;
        }
        DocumentNature::Gamble => {
            gamble_success_rate = Some(dice.between(30, 70) as u32);
        }
        DocumentNature::LongTerm => {
            long_term_benefit = Some((amount as f64 * dice.between_f64(1.5, 4.0)) as Money);
            long_term_turns = Some(dice.between(6, 16) as u32);
        }
        DocumentNature::ClearGood | DocumentNature::Tradeoff => {}
    }

    let clues = attach_clues(template, &situations, &vars, balance, dice);
    let deadline = deadline_for(template.priority, view.turn, balance, dice);

    let id = state.next_document_id();
    debug!(id, ?category, ?nature, "document generated");
    state.queue.push(ApprovalDocument {
        id,
        category,
        priority: template.priority,
        title: fill(template.title, &vars),
        department,
        submitter,
        summary: fill(template.summary, &vars),
        details: DocumentDetails {
            amount,
            expected_benefit: fill(template.benefit, &vars),
            timeline: format!("{} months", dice.between(1, 12)),
            risks: fill(template.risks, &vars),
        },
        nature,
        trap,
        actual_amount,
        actual_benefit,
        gamble_success_rate,
        long_term_benefit,
        long_term_turns,
        clues,
        turn_submitted: view.turn,
        deadline,
        verdict: None,
        outcome: None,
        result_applied: false,
        under_investigation: false,
        investigation_result: None,
        triggered_by,
    });
    Some(id)
}

/// Fill the inbox for the turn. Returns the ids of the new documents.
pub fn generate_documents(
    state: &mut DeskState,
    view: &CompanyView,
    balance: &DeskBalance,
    dice: &mut Dice,
) -> Vec<u64> {
    let count = balance.documents_for_turn(view.turn, view.employee_count());
    let mut ids = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let category = pick_category(view, dice);
        if let Some(id) = generate_in_category(state, view, balance, dice, category, None) {
            ids.push(id);
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::config::Difficulty;

    fn view(money: Money, employees: usize) -> CompanyView {
        CompanyView {
            money,
            market_share: 10.0,
            product_count: 1,
            turn: 3,
            month: 1,
            difficulty: Difficulty::Normal,
            scandal_risk: 0.0,
            employees: (0..employees)
                .map(|i| crate::state::EmployeeRef {
                    id: i as u64,
                    name: format!("Employee {i}"),
                    department: sim_core::config::Department::Development,
                    motivation: 70,
                    tenure_turns: 5,
                })
                .collect(),
        }
    }

    #[test]
    fn turn_generation_respects_the_count_formula() {
        let balance = DeskBalance::standard();
        let mut dice = Dice::from_seed(5);
        let mut state = DeskState::new();
        let ids = generate_documents(&mut state, &view(10_000_000, 12), &balance, &mut dice);
        assert_eq!(ids.len(), 3); // 2 base + 1 per 10 employees
        assert_eq!(state.queue.len(), 3);
    }

    #[test]
    fn broke_companies_see_more_cost_cut_paperwork() {
        let mut dice = Dice::from_seed(21);
        let broke = view(1_000_000, 10);
        let flush = view(20_000_000, 10);
        let mut broke_hits = 0;
        let mut flush_hits = 0;
        for _ in 0..3_000 {
            if pick_category(&broke, &mut dice) == DocumentCategory::CostCut {
                broke_hits += 1;
            }
            if pick_category(&flush, &mut dice) == DocumentCategory::CostCut {
                flush_hits += 1;
            }
        }
        assert!(broke_hits > flush_hits * 3 / 2, "{broke_hits} vs {flush_hits}");
    }

    #[test]
    fn clear_bad_documents_cost_more_than_they_claim() {
        let balance = DeskBalance::standard();
        let mut dice = Dice::from_seed(8);
        let v = view(10_000_000, 10);
        let mut state = DeskState::new();
        let mut seen = 0;
        for _ in 0..400 {
            generate_documents(&mut state, &v, &balance, &mut dice);
        }
        for doc in &state.queue {
            if doc.nature == DocumentNature::ClearBad {
                seen += 1;
                assert!(doc.trap.is_some());
                let actual = doc.actual_amount.unwrap();
                assert!(actual > doc.details.amount, "{actual} vs {}", doc.details.amount);
                assert!(doc.actual_benefit <= 20);
            }
        }
        assert!(seen > 0, "no clear_bad documents in 400 turns of paperwork");
    }

    #[test]
    fn urgent_and_high_priorities_always_carry_deadlines() {
        let balance = DeskBalance::standard();
        let mut dice = Dice::from_seed(13);
        let v = view(10_000_000, 10);
        let mut state = DeskState::new();
        for _ in 0..200 {
            generate_documents(&mut state, &v, &balance, &mut dice);
        }
        for doc in &state.queue {
            match doc.priority {
                Priority::Urgent => assert_eq!(doc.deadline, Some(v.turn + 1)),
                Priority::High => assert_eq!(doc.deadline, Some(v.turn + 3)),
                _ => {}
            }
        }
    }

    #[test]
    fn nature_draw_stays_inside_the_template_set() {
        let balance = DeskBalance::standard();
        let mut dice = Dice::from_seed(30);
        let v = view(10_000_000, 10);
        let mut state = DeskState::new();
        for _ in 0..100 {
            generate_in_category(
                &mut state,
                &v,
                &balance,
                &mut dice,
                DocumentCategory::SalaryRaise,
                None,
            );
        }
        // salary raise templates never allow clear_bad or gamble
        for doc in &state.queue {
            assert!(matches!(
                doc.nature,
                DocumentNature::ClearGood | DocumentNature::Tradeoff
            ));
        }
    }
}
