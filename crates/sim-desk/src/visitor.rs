//! Office visitors: templates, spawning, and response resolution.
//!
//! A visitor may show up once per turn. Responses carry numeric effects the
//! orchestrator applies; a visitor sometimes lets slip a truthful hint
//! about a document still sitting in the queue.

use serde::{Deserialize, Serialize};
use sim_core::config::Department;
use sim_core::{Dice, Money, SimError};
use tracing::debug;

use crate::balance::DeskBalance;
use crate::document::{DocumentClue, DocumentNature};
use crate::state::{CompanyView, DeskState};
use crate::templates::fill;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitorType {
    Consultation,
    Report,
    Proposal,
    Negotiation,
    Complaint,
    Crisis,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitorMood {
    Calm,
    Anxious,
    Angry,
    Excited,
    Desperate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseTone {
    Supportive,
    Neutral,
    Diplomatic,
    Harsh,
}

/// Effects beyond plain numbers, applied by the orchestrator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialEffect {
    PreventResignation,
    IncreaseLeaveRisk,
    TriggerScandal,
    ReduceScandalRisk,
    PartialReduceScandal,
    IncreaseScandalRisk,
    PreventPoaching,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEffects {
    pub visitor_morale_change: i32,
    pub ceo_approval_change: i32,
    pub company_culture_change: i32,
    pub money_change: Money,
    pub special: Option<SpecialEffect>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitorResponse {
    pub id: u32,
    pub text: String,
    pub tone: ResponseTone,
    pub effects: ResponseEffects,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VisitorProfile {
    pub employee_id: Option<u64>,
    pub name: String,
    pub position: String,
    pub department: Department,
    pub mood: VisitorMood,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VisitorEvent {
    pub id: u64,
    pub visitor_type: VisitorType,
    pub visitor: VisitorProfile,
    pub title: String,
    pub description: String,
    pub dialog: Vec<String>,
    pub responses: Vec<VisitorResponse>,
    pub resolved: bool,
    pub chosen_response: Option<u32>,
    /// Set when the visitor knows something about a queued document.
    pub related_document: Option<u64>,
    pub document_clue: Option<DocumentClue>,
}

// --- templates ---

#[derive(Clone, Copy, Debug)]
enum TriggerCondition {
    /// Someone's motivation has dropped below 50.
    LowMotivation,
    /// A long-tenured employee is below 30 motivation.
    TenuredLowMotivation,
    /// Scandal risk gauge above 60.
    HighScandalRisk,
}

impl TriggerCondition {
    fn holds(self, view: &CompanyView) -> bool {
        match self {
            TriggerCondition::LowMotivation => view.any_motivation_below(50),
            TriggerCondition::TenuredLowMotivation => view.any_tenured_low_motivation(),
            TriggerCondition::HighScandalRisk => view.scandal_risk > 60.0,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct ResponseTemplate {
    text: &'static str,
    tone: ResponseTone,
    morale: i32,
    approval: i32,
    culture: i32,
    money: Money,
    special: Option<SpecialEffect>,
}

#[derive(Clone, Copy, Debug)]
struct VisitorTemplate {
    visitor_type: VisitorType,
    title: &'static str,
    description: &'static str,
    dialog: &'static [&'static str],
    responses: &'static [ResponseTemplate],
    weight: f64,
    moods: &'static [VisitorMood],
    trigger: Option<TriggerCondition>,
    /// Prefer a demotivated employee as the visitor.
    prefers_unhappy_employee: bool,
}

use ResponseTone as RT;
use SpecialEffect as SE;
use VisitorMood as M;
use VisitorType as V;

const VISITOR_TEMPLATES: &[VisitorTemplate] = &[
    VisitorTemplate {
        visitor_type: V::Consultation,
        title: "Salary talk with {name}",
        description: "{name} ({department}, {position}) wants to discuss compensation.",
        dialog: &[
            "Sorry to take your time, but...",
            "The truth is, I have an offer from another company.",
            "Could you reconsider my current package?",
        ],
        responses: &[
            ResponseTemplate { text: "I'll look into it. I'll coordinate with HR.", tone: RT::Supportive, morale: 20, approval: 1, culture: 0, money: -100_000, special: None },
            ResponseTemplate { text: "Things are tight now, but results will be rewarded.", tone: RT::Diplomatic, morale: 5, approval: 0, culture: 0, money: 0, special: None },
            ResponseTemplate { text: "If you have an offer, maybe you should take it.", tone: RT::Harsh, morale: -20, approval: -2, culture: 0, money: 0, special: Some(SE::IncreaseLeaveRisk) },
        ],
        weight: 20.0,
        moods: &[M::Anxious, M::Calm],
        trigger: Some(TriggerCondition::LowMotivation),
        prefers_unhappy_employee: true,
    },
    VisitorTemplate {
        visitor_type: V::Consultation,
        title: "{name} is thinking about leaving",
        description: "{name} came to say they are considering resignation.",
        dialog: &[
            "Do you have a minute?",
            "Honestly... I'm thinking about resigning.",
            "I owe this company a lot, but I want a new challenge.",
        ],
        responses: &[
            ResponseTemplate { text: "If something's wrong we'll fix it. Tell me your terms.", tone: RT::Supportive, morale: 15, approval: 1, culture: 0, money: 0, special: Some(SE::PreventResignation) },
            ResponseTemplate { text: "I respect your decision. Please hand over properly.", tone: RT::Neutral, morale: 0, approval: 0, culture: 0, money: 0, special: None },
            ResponseTemplate { text: "Quitting mid-project is irresponsible, don't you think?", tone: RT::Harsh, morale: -25, approval: -3, culture: -5, money: 0, special: None },
        ],
        weight: 10.0,
        moods: &[M::Anxious, M::Desperate],
        trigger: Some(TriggerCondition::TenuredLowMotivation),
        prefers_unhappy_employee: true,
    },
    VisitorTemplate {
        visitor_type: V::Report,
        title: "Status report from {name}",
        description: "{name} is here to report on the {department} department.",
        dialog: &[
            "Here's where the {department} department stands.",
            "The current project is {status}.",
            "The team is {condition}.",
        ],
        responses: &[
            ResponseTemplate { text: "Good report. Give my regards to the team.", tone: RT::Supportive, morale: 10, approval: 1, culture: 2, money: 0, special: None },
            ResponseTemplate { text: "Can you give me harder numbers next time?", tone: RT::Neutral, morale: -5, approval: 0, culture: 0, money: 0, special: None },
            ResponseTemplate { text: "Too slow. Pick up the pace.", tone: RT::Harsh, morale: -15, approval: -1, culture: -3, money: 0, special: None },
        ],
        weight: 25.0,
        moods: &[M::Calm, M::Excited],
        trigger: None,
        prefers_unhappy_employee: false,
    },
    VisitorTemplate {
        visitor_type: V::Proposal,
        title: "An idea from {name}",
        description: "{name} brought a new business idea.",
        dialog: &[
            "Could I run an idea past you?",
            "I've been watching the market lately and...",
            "If it works, it could be a big win!",
        ],
        responses: &[
            ResponseTemplate { text: "Interesting! Write it up and submit it.", tone: RT::Supportive, morale: 25, approval: 2, culture: 3, money: 0, special: None },
            ResponseTemplate { text: "Not bad, but there are risks. Flesh it out more.", tone: RT::Diplomatic, morale: 5, approval: 0, culture: 0, money: 0, special: None },
            ResponseTemplate { text: "We don't have the bandwidth. Focus on your job.", tone: RT::Harsh, morale: -20, approval: -1, culture: -5, money: 0, special: None },
        ],
        weight: 15.0,
        moods: &[M::Excited, M::Calm],
        trigger: None,
        prefers_unhappy_employee: false,
    },
    VisitorTemplate {
        visitor_type: V::Complaint,
        title: "Harassment report from {name}",
        description: "{name} is reporting workplace harassment.",
        dialog: &[
            "This is a serious matter...",
            "I've been harassed by {target}.",
            "If this goes unaddressed, others will be affected too.",
        ],
        responses: &[
            ResponseTemplate { text: "This is serious. I'm standing up an investigation team now.", tone: RT::Supportive, morale: 20, approval: 3, culture: 5, money: -200_000, special: None },
            ResponseTemplate { text: "I'll hear both sides before judging.", tone: RT::Diplomatic, morale: 5, approval: 0, culture: 0, money: 0, special: None },
            ResponseTemplate { text: "Can't you sort it out between yourselves?", tone: RT::Harsh, morale: -30, approval: -5, culture: -10, money: 0, special: Some(SE::TriggerScandal) },
        ],
        weight: 5.0,
        moods: &[M::Anxious, M::Angry],
        trigger: None,
        prefers_unhappy_employee: false,
    },
    VisitorTemplate {
        visitor_type: V::Crisis,
        title: "Urgent word from HR",
        description: "A rival is making poaching moves on our staff.",
        dialog: &[
            "I have an urgent report.",
            "{company} has been in contact with {count} of our people.",
            "{name} in particular is at high risk of being poached.",
        ],
        responses: &[
            ResponseTemplate { text: "Improve their packages and run retention interviews.", tone: RT::Supportive, morale: 10, approval: 2, culture: 0, money: -500_000, special: Some(SE::PreventPoaching) },
            ResponseTemplate { text: "Watch the situation and line up replacements too.", tone: RT::Diplomatic, morale: 0, approval: 0, culture: 0, money: 0, special: None },
            ResponseTemplate { text: "If they want to go, let them go.", tone: RT::Harsh, morale: -15, approval: -3, culture: -5, money: 0, special: None },
        ],
        weight: 10.0,
        moods: &[M::Anxious, M::Desperate],
        trigger: None,
        prefers_unhappy_employee: false,
    },
    VisitorTemplate {
        visitor_type: V::Crisis,
        title: "Anonymous whistleblower",
        description: "An anonymous tip alleges internal fraud.",
        dialog: &[
            "An anonymous internal report came in.",
            "There's something off in the {department} department's expenses.",
            "It needs a swift response.",
        ],
        responses: &[
            ResponseTemplate { text: "Bring in outside auditors and dig to the bottom.", tone: RT::Supportive, morale: 5, approval: 5, culture: 0, money: -300_000, special: Some(SE::ReduceScandalRisk) },
            ResponseTemplate { text: "We'll investigate quietly in-house.", tone: RT::Diplomatic, morale: 0, approval: 1, culture: 0, money: 0, special: Some(SE::PartialReduceScandal) },
            ResponseTemplate { text: "Anonymous tips can't be trusted. Shelve it.", tone: RT::Harsh, morale: -10, approval: -5, culture: 0, money: 0, special: Some(SE::IncreaseScandalRisk) },
        ],
        weight: 5.0,
        moods: &[M::Calm, M::Anxious],
        trigger: Some(TriggerCondition::HighScandalRisk),
        prefers_unhappy_employee: false,
    },
    VisitorTemplate {
        visitor_type: V::Consultation,
        title: "Career talk with {name}",
        description: "{name} wants to discuss their career path.",
        dialog: &[
            "Could I have a moment?",
            "I've been thinking about my future here...",
            "Is there room for me to grow at this company?",
        ],
        responses: &[
            ResponseTemplate { text: "I'll back your growth fully. Let's build a plan together.", tone: RT::Supportive, morale: 25, approval: 2, culture: 3, money: 0, special: None },
            ResponseTemplate { text: "Deliver results first, then we'll talk.", tone: RT::Neutral, morale: -5, approval: 0, culture: 0, money: 0, special: None },
            ResponseTemplate { text: "Figure it out yourself. Show some initiative.", tone: RT::Harsh, morale: -15, approval: -1, culture: 0, money: 0, special: None },
        ],
        weight: 10.0,
        moods: &[M::Calm, M::Anxious],
        trigger: None,
        prefers_unhappy_employee: false,
    },
];

/// Templates forced by causal chains rather than the weighted draw.
const LINKED_TEMPLATES: &[VisitorTemplate] = &[
    VisitorTemplate {
        visitor_type: V::Complaint,
        title: "Protest from {name}",
        description: "{name}, hit by the recent cost cuts, came to protest.",
        dialog: &[
            "About the cost reduction the other day...",
            "Frankly, the floor is struggling.",
            "I wish you'd listen to the people doing the work.",
        ],
        responses: &[
            ResponseTemplate { text: "I'm sorry. Let's find a way to ease the load.", tone: RT::Supportive, morale: 15, approval: 1, culture: 0, money: -100_000, special: None },
            ResponseTemplate { text: "It was necessary for the whole company. I need you to understand.", tone: RT::Diplomatic, morale: 0, approval: 0, culture: 0, money: 0, special: None },
            ResponseTemplate { text: "Management decisions are not up for debate.", tone: RT::Harsh, morale: -25, approval: -3, culture: -5, money: 0, special: None },
        ],
        weight: 0.0,
        moods: &[M::Angry, M::Anxious],
        trigger: None,
        prefers_unhappy_employee: false,
    },
    VisitorTemplate {
        visitor_type: V::Report,
        title: "New venture team check-in",
        description: "The new venture team came in, fired up, for a midpoint report.",
        dialog: &[
            "An update on the new venture!",
            "The whole team is pulling together.",
            "Early results are looking good.",
        ],
        responses: &[
            ResponseTemplate { text: "Excellent! Keep it up.", tone: RT::Supportive, morale: 20, approval: 2, culture: 3, money: 0, special: None },
            ResponseTemplate { text: "I'm counting on you. Keep reporting in numbers.", tone: RT::Neutral, morale: 5, approval: 1, culture: 0, money: 0, special: None },
        ],
        weight: 0.0,
        moods: &[M::Excited],
        trigger: None,
        prefers_unhappy_employee: false,
    },
];

// --- spawning ---

const FALLBACK_NAMES: &[&str] = &[
    "Taro Tanaka",
    "Tomoko Suzuki",
    "Kenta Sato",
    "Misaki Takahashi",
    "Naoki Ito",
    "Aiko Yamamoto",
];
const FALLBACK_POSITIONS: &[&str] = &["Section Chief", "Department Head", "Team Lead"];
const RIVAL_COMPANIES: &[&str] = &["TechCorp", "DigitalWorks", "Innovatech"];

fn select_visitor(
    view: &CompanyView,
    template: &VisitorTemplate,
    balance: &DeskBalance,
    dice: &mut Dice,
) -> (Option<u64>, String, String, Department) {
    if template.prefers_unhappy_employee {
        if let Some(emp) = view.employees.iter().find(|e| e.motivation < 50) {
            return (Some(emp.id), emp.name.clone(), "Staff".into(), emp.department);
        }
    }
    if !view.employees.is_empty() && dice.chance(balance.visitor_from_staff_chance) {
        let idx = dice.index(view.employees.len());
        let emp = &view.employees[idx];
        return (Some(emp.id), emp.name.clone(), "Staff".into(), emp.department);
    }
    let name = dice.pick(FALLBACK_NAMES).copied().unwrap_or("Taro Tanaka");
    let position = dice
        .pick(FALLBACK_POSITIONS)
        .copied()
        .unwrap_or("Section Chief");
    let department = *dice.pick(&Department::ALL).unwrap_or(&Department::Development);
    (None, name.to_string(), position.to_string(), department)
}

fn weighted_template<'a>(
    eligible: &[&'a VisitorTemplate],
    dice: &mut Dice,
) -> Option<&'a VisitorTemplate> {
    let total: f64 = eligible.iter().map(|t| t.weight).sum();
    if total <= 0.0 {
        return eligible.last().copied();
    }
    let mut roll = dice.roll() * total;
    for t in eligible {
        roll -= t.weight;
        if roll <= 0.0 {
            return Some(t);
        }
    }
    eligible.last().copied()
}

/// Maybe put a visitor at the door. Without a forced type this is gated by
/// the base visit chance; causal chains bypass the gate. Returns whether a
/// visitor arrived. An unresolved visitor already waiting is never
/// replaced; a forced type arriving while the door is busy joins
/// `pending_visitors` and comes through on a later turn.
pub fn spawn_visitor(
    state: &mut DeskState,
    view: &CompanyView,
    balance: &DeskBalance,
    dice: &mut Dice,
    forced: Option<VisitorType>,
) -> bool {
    if state.current_visitor.is_some() {
        if let Some(visitor_type) = forced {
            state.pending_visitors.push(visitor_type);
        }
        return false;
    }
    let forced = forced.or_else(|| {
        (!state.pending_visitors.is_empty()).then(|| state.pending_visitors.remove(0))
    });
    if forced.is_none() && !dice.chance(balance.visitor_base_chance) {
        return false;
    }

    let template = match forced
        .and_then(|t| LINKED_TEMPLATES.iter().find(|lt| lt.visitor_type == t))
    {
        Some(linked) => linked,
        None => {
            let eligible: Vec<&VisitorTemplate> = VISITOR_TEMPLATES
                .iter()
                .filter(|t| t.trigger.map_or(true, |c| c.holds(view)))
                .collect();
            match weighted_template(&eligible, dice) {
                Some(t) => t,
                None => return false,
            }
        }
    };

    let (employee_id, name, position, department) = select_visitor(view, template, balance, dice);
    let mood = *dice.pick(template.moods).unwrap_or(&VisitorMood::Calm);

    let vars: Vec<(&str, String)> = vec![
        ("name", name.clone()),
        ("department", department.label().to_string()),
        ("position", position.clone()),
        ("status", dice.pick(&["on track", "running late", "ahead of schedule"]).copied().unwrap_or("on track").to_string()),
        ("condition", dice.pick(&["working hard", "keeping steady", "struggling"]).copied().unwrap_or("working hard").to_string()),
        ("company", dice.pick(RIVAL_COMPANIES).copied().unwrap_or("TechCorp").to_string()),
        ("count", dice.between(1, 3).to_string()),
        ("target", dice.pick(FALLBACK_NAMES).copied().unwrap_or("Kenta Sato").to_string()),
    ];

    let responses: Vec<VisitorResponse> = template
        .responses
        .iter()
        .enumerate()
        .map(|(idx, rt)| VisitorResponse {
            id: idx as u32,
            text: rt.text.to_string(),
            tone: rt.tone,
            effects: ResponseEffects {
                visitor_morale_change: rt.morale,
                ceo_approval_change: rt.approval,
                company_culture_change: rt.culture,
                money_change: rt.money,
                special: rt.special,
            },
        })
        .collect();

    // The visitor may let slip something about a queued document. The hint
    // points at the document's nature without naming it.
    let mut related_document = None;
    let mut document_clue = None;
    if !state.queue.is_empty() && dice.chance(balance.visitor_document_link_chance) {
        let idx = dice.index(state.queue.len());
        let doc = &state.queue[idx];
        related_document = Some(doc.id);
        let observation = if doc.nature == DocumentNature::ClearBad {
            format!("{name} let slip that something about \"{}\" feels off to them", doc.title)
        } else {
            format!("{name} mentioned that \"{}\" seems like a solid proposal", doc.title)
        };
        document_clue = Some(DocumentClue {
            field: "Visitor remark".into(),
            observation,
        });
    }

    let id = state.next_visitor_id();
    debug!(visitor = %name, visitor_type = ?template.visitor_type, "visitor arrived");
    state.current_visitor = Some(VisitorEvent {
        id,
        visitor_type: template.visitor_type,
        visitor: VisitorProfile {
            employee_id,
            name,
            position,
            department,
            mood,
        },
        title: fill(template.title, &vars),
        description: fill(template.description, &vars),
        dialog: template.dialog.iter().map(|d| fill(d, &vars)).collect(),
        responses,
        resolved: false,
        chosen_response: None,
        related_document,
        document_clue,
    });
    true
}

// --- resolution ---

/// What the orchestrator must apply after a response is chosen.
#[derive(Clone, Debug)]
pub struct VisitorResolution {
    pub effects: ResponseEffects,
    pub visitor_employee_id: Option<u64>,
    pub summary: String,
}

/// Resolve the waiting visitor with the chosen response. Appends the
/// leaked clue to the related document (the only document mutation a
/// visitor can cause) and moves the event into history. A second
/// resolution attempt is an invalid transition.
pub fn respond_to_visitor(
    state: &mut DeskState,
    event_id: u64,
    response_id: u32,
) -> Result<VisitorResolution, SimError> {
    let event = state
        .current_visitor
        .as_mut()
        .filter(|e| e.id == event_id)
        .ok_or_else(|| SimError::UnknownKey(format!("visitor event {event_id}")))?;
    if event.resolved {
        return Err(SimError::InvalidTransition(
            "visitor already responded to".into(),
        ));
    }
    let response = event
        .responses
        .iter()
        .find(|r| r.id == response_id)
        .ok_or_else(|| SimError::UnknownKey(format!("visitor response {response_id}")))?
        .clone();

    event.resolved = true;
    event.chosen_response = Some(response_id);

    let summary = match response.tone {
        ResponseTone::Supportive => "You responded supportively.",
        ResponseTone::Diplomatic => "You responded diplomatically.",
        ResponseTone::Neutral => "You responded neutrally.",
        ResponseTone::Harsh => "You responded harshly.",
    }
    .to_string();

    let Some(event) = state.current_visitor.take() else {
        return Err(SimError::UnknownKey(format!("visitor event {event_id}")));
    };
    if let (Some(doc_id), Some(clue)) = (event.related_document, event.document_clue.clone()) {
        if let Some(doc) = state.queue.iter_mut().find(|d| d.id == doc_id) {
            doc.clues.push(clue);
        }
    }
    let resolution = VisitorResolution {
        effects: response.effects,
        visitor_employee_id: event.visitor.employee_id,
        summary,
    };
    state.visitor_history.push(event);
    Ok(resolution)
}

#[cfg(test)]
pub(crate) fn test_event(id: u64) -> VisitorEvent {
    VisitorEvent {
        id,
        visitor_type: VisitorType::Report,
        visitor: VisitorProfile {
            employee_id: None,
            name: "Taro Tanaka".into(),
            position: "Section Chief".into(),
            department: Department::Development,
            mood: VisitorMood::Calm,
        },
        title: "Status report".into(),
        description: "A report".into(),
        dialog: vec![],
        responses: vec![VisitorResponse {
            id: 0,
            text: "Noted.".into(),
            tone: ResponseTone::Neutral,
            effects: ResponseEffects::default(),
        }],
        resolved: false,
        chosen_response: None,
        related_document: None,
        document_clue: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::config::Difficulty;

    fn view() -> CompanyView {
        CompanyView {
            money: 10_000_000,
            market_share: 10.0,
            product_count: 1,
            turn: 5,
            month: 2,
            difficulty: Difficulty::Normal,
            scandal_risk: 0.0,
            employees: vec![],
        }
    }

    #[test]
    fn base_chance_gates_spontaneous_visits() {
        let balance = DeskBalance::standard();
        let mut dice = Dice::from_seed(17);
        let mut arrivals = 0;
        for _ in 0..2_000 {
            let mut state = DeskState::new();
            if spawn_visitor(&mut state, &view(), &balance, &mut dice, None) {
                arrivals += 1;
                assert!(state.current_visitor.is_some());
            }
        }
        let rate = f64::from(arrivals) / 2_000.0;
        assert!((rate - 0.30).abs() < 0.04, "observed {rate}");
    }

    #[test]
    fn forced_visits_skip_the_gate_and_use_linked_templates() {
        let balance = DeskBalance::standard();
        let mut dice = Dice::from_seed(3);
        let mut state = DeskState::new();
        assert!(spawn_visitor(
            &mut state,
            &view(),
            &balance,
            &mut dice,
            Some(VisitorType::Complaint)
        ));
        let event = state.current_visitor.as_ref().unwrap();
        assert_eq!(event.visitor_type, VisitorType::Complaint);
        assert!(event.title.contains("Protest"));
    }

    #[test]
    fn waiting_visitor_is_never_replaced() {
        let balance = DeskBalance::standard();
        let mut dice = Dice::from_seed(3);
        let mut state = DeskState::new();
        state.current_visitor = Some(test_event(9));
        assert!(!spawn_visitor(
            &mut state,
            &view(),
            &balance,
            &mut dice,
            Some(VisitorType::Complaint)
        ));
        assert_eq!(state.current_visitor.as_ref().unwrap().id, 9);
        // the forced visit is deferred, not dropped
        assert_eq!(state.pending_visitors, vec![VisitorType::Complaint]);
    }

    #[test]
    fn deferred_forced_visitors_arrive_once_the_door_clears() {
        let balance = DeskBalance::standard();
        let mut dice = Dice::from_seed(3);
        let mut state = DeskState::new();
        state.current_visitor = Some(test_event(9));
        spawn_visitor(&mut state, &view(), &balance, &mut dice, Some(VisitorType::Complaint));
        spawn_visitor(&mut state, &view(), &balance, &mut dice, Some(VisitorType::Report));
        assert_eq!(
            state.pending_visitors,
            vec![VisitorType::Complaint, VisitorType::Report]
        );

        respond_to_visitor(&mut state, 9, 0).unwrap();
        // the queued complaint bypasses the base-chance gate
        assert!(spawn_visitor(&mut state, &view(), &balance, &mut dice, None));
        let event = state.current_visitor.as_ref().unwrap();
        assert_eq!(event.visitor_type, VisitorType::Complaint);
        assert!(event.title.contains("Protest"));
        assert_eq!(state.pending_visitors, vec![VisitorType::Report]);
    }

    #[test]
    fn scandal_template_needs_high_risk() {
        let balance = DeskBalance::standard();
        // with zero scandal risk the whistleblower template must never fire
        let mut dice = Dice::from_seed(11);
        for _ in 0..500 {
            let mut state = DeskState::new();
            if spawn_visitor(&mut state, &view(), &balance, &mut dice, None) {
                let event = state.current_visitor.as_ref().unwrap();
                assert!(!event.title.contains("whistleblower"));
            }
        }
    }

    #[test]
    fn responding_resolves_once_and_archives() {
        let mut state = DeskState::new();
        state.current_visitor = Some(test_event(1));
        let resolution = respond_to_visitor(&mut state, 1, 0).unwrap();
        assert_eq!(resolution.effects, ResponseEffects::default());
        assert!(state.current_visitor.is_none());
        assert_eq!(state.visitor_history.len(), 1);
        assert!(state.visitor_history[0].resolved);
        // a second attempt no longer finds the event
        assert!(respond_to_visitor(&mut state, 1, 0).is_err());
    }

    #[test]
    fn unknown_response_is_rejected() {
        let mut state = DeskState::new();
        state.current_visitor = Some(test_event(1));
        assert!(respond_to_visitor(&mut state, 1, 99).is_err());
        // the event is still waiting
        assert!(state.current_visitor.is_some());
    }
}
