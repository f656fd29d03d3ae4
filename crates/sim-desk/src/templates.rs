//! Static content tables: document templates per category, situation
//! modifiers, and the causal chain rules that connect decisions to
//! follow-up paperwork and visits.

use sim_core::config::ValueRange;

use crate::document::{DocumentCategory, DocumentNature, Priority, TrapKind, Verdict};
use crate::state::CompanyView;
use crate::visitor::VisitorType;

/// A candidate clue; placeholders are filled at generation time.
#[derive(Clone, Copy, Debug)]
pub struct ClueTemplate {
    pub field: &'static str,
    pub observation: &'static str,
}

#[derive(Clone, Copy, Debug)]
pub struct DocumentTemplate {
    pub category: DocumentCategory,
    pub title: &'static str,
    pub summary: &'static str,
    pub benefit: &'static str,
    pub risks: &'static str,
    pub amount: ValueRange,
    /// Inclusive range of the hidden effectiveness score.
    pub benefit_range: (u32, u32),
    pub priority: Priority,
    pub natures: &'static [DocumentNature],
    pub traps: &'static [TrapKind],
    pub clues: &'static [ClueTemplate],
}

/// Replace `{key}` placeholders. Unknown placeholders are left in place.
pub(crate) fn fill(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (key, value) in vars {
        out = out.replace(&format!("{{{key}}}"), value);
    }
    out
}

use DocumentCategory as C;
use DocumentNature as N;
use TrapKind as T;

pub const DOCUMENT_TEMPLATES: &[DocumentTemplate] = &[
    DocumentTemplate {
        category: C::Hiring,
        title: "{department} dept. mid-career hiring request",
        summary: "The {department} department wants to hire {count} people at {position} level.",
        benefit: "Department productivity expected to rise {percent}%",
        risks: "Mismatch after hiring, higher payroll",
        amount: ValueRange { min: 300_000, max: 1_200_000 },
        benefit_range: (30, 80),
        priority: Priority::Normal,
        natures: &[N::ClearGood, N::ClearBad, N::Tradeoff],
        traps: &[T::IncompetentHire, T::InflatedCost],
        clues: &[
            ClueTemplate { field: "Hiring budget", observation: "Cost per hire is {ratio}x the industry average" },
            ClueTemplate { field: "Submitter track record", observation: "{name}'s past hires worked out {percent}% of the time" },
            ClueTemplate { field: "Department load", observation: "The {department} department is at {percent}% utilization" },
        ],
    },
    DocumentTemplate {
        category: C::Hiring,
        title: "Graduate intake plan",
        summary: "Proposal to reserve {count} slots for next year's graduate intake.",
        benefit: "Long-term talent pipeline and a younger organization",
        risks: "Training cost; takes time before they contribute",
        amount: ValueRange { min: 500_000, max: 2_000_000 },
        benefit_range: (20, 60),
        priority: Priority::Normal,
        natures: &[N::ClearGood, N::Tradeoff, N::LongTerm],
        traps: &[],
        clues: &[
            ClueTemplate { field: "Mentoring capacity", observation: "We currently have {count} staff able to mentor" },
            ClueTemplate { field: "Market conditions", observation: "This year's graduate market is {condition}" },
        ],
    },
    DocumentTemplate {
        category: C::Budget,
        title: "{department} dept. quarterly budget request",
        summary: "The {department} department requests {amount}0k yen in operating budget.",
        benefit: "Keeps department activities running smoothly",
        risks: "Hard to react if the budget overruns",
        amount: ValueRange { min: 1_000_000, max: 5_000_000 },
        benefit_range: (40, 70),
        priority: Priority::High,
        natures: &[N::ClearGood, N::ClearBad, N::Tradeoff],
        traps: &[T::InflatedCost, T::WastefulSpending, T::Embezzlement],
        clues: &[
            ClueTemplate { field: "Budget breakdown", observation: "Entertainment expenses up {percent}% over last quarter" },
            ClueTemplate { field: "Prior utilization", observation: "Last quarter's budget was {percent}% consumed" },
            ClueTemplate { field: "Department results", observation: "The {department} department hit {percent}% of target" },
        ],
    },
    DocumentTemplate {
        category: C::Budget,
        title: "Emergency supplemental budget",
        summary: "Requesting an additional {amount}0k yen due to {reason}.",
        benefit: "Prevents losses through rapid response",
        risks: "Unplanned spending strains finances",
        amount: ValueRange { min: 500_000, max: 3_000_000 },
        benefit_range: (30, 60),
        priority: Priority::Urgent,
        natures: &[N::ClearGood, N::ClearBad, N::Gamble],
        traps: &[T::InflatedCost, T::FakeData],
        clues: &[
            ClueTemplate { field: "Urgency", observation: "The stated cause arose {timing}" },
            ClueTemplate { field: "Quote basis", observation: "Estimates were collected from {count} vendors" },
        ],
    },
    DocumentTemplate {
        category: C::ProductPlan,
        title: "New product proposal: {product}",
        summary: "Development of a new product for the {market} market, {months} months to ship.",
        benefit: "New market entry projected to add {amount}0k yen in sales",
        risks: "Development may fail; market is uncertain",
        amount: ValueRange { min: 2_000_000, max: 8_000_000 },
        benefit_range: (50, 95),
        priority: Priority::High,
        natures: &[N::ClearGood, N::Gamble, N::LongTerm, N::Tradeoff],
        traps: &[T::HiddenRisk, T::FakeData],
        clues: &[
            ClueTemplate { field: "Market research", observation: "The target market is growing {percent}% a year" },
            ClueTemplate { field: "Competition", observation: "{count} competitors already ship in this space" },
            ClueTemplate { field: "Technical feasibility", observation: "{percent}% of the required skills exist in-house" },
        ],
    },
    DocumentTemplate {
        category: C::ProductPlan,
        title: "Product improvement plan",
        summary: "Feature and quality work on {product}.",
        benefit: "Better customer satisfaction, lower churn",
        risks: "Temporarily ties up development resources",
        amount: ValueRange { min: 500_000, max: 3_000_000 },
        benefit_range: (40, 80),
        priority: Priority::Normal,
        natures: &[N::ClearGood, N::Tradeoff],
        traps: &[],
        clues: &[
            ClueTemplate { field: "Customer requests", observation: "{count} improvement requests in the recent backlog" },
            ClueTemplate { field: "Effort estimate", observation: "Estimated at {hours} person-months" },
        ],
    },
    DocumentTemplate {
        category: C::Marketing,
        title: "Marketing campaign proposal",
        summary: "A promotional push through {channel}.",
        benefit: "Brand awareness up {percent}%, {count} leads expected",
        risks: "Effect is uncertain; cost-performance risk",
        amount: ValueRange { min: 500_000, max: 4_000_000 },
        benefit_range: (30, 85),
        priority: Priority::Normal,
        natures: &[N::ClearGood, N::Gamble, N::Tradeoff],
        traps: &[T::WastefulSpending, T::InflatedCost],
        clues: &[
            ClueTemplate { field: "ROI projection", observation: "Similar past campaigns returned {percent}%" },
            ClueTemplate { field: "Agency selection", observation: "The proposed agency ranks #{rank} in the industry" },
        ],
    },
    DocumentTemplate {
        category: C::Equipment,
        title: "{equipment} purchase request",
        summary: "Purchase of {equipment} to streamline operations.",
        benefit: "Work efficiency up {percent}%, {amount}0k yen saved per year",
        risks: "Takes time to recover the initial outlay",
        amount: ValueRange { min: 1_000_000, max: 10_000_000 },
        benefit_range: (40, 90),
        priority: Priority::Normal,
        natures: &[N::ClearGood, N::ClearBad, N::LongTerm, N::Gamble],
        traps: &[T::InflatedCost, T::HiddenRisk, T::ConflictInterest],
        clues: &[
            ClueTemplate { field: "Quote comparison", observation: "Competing quotes obtained from {count} vendors" },
            ClueTemplate { field: "Adoption record", observation: "{count} peer companies run the same setup" },
            ClueTemplate { field: "Maintenance cost", observation: "Annual maintenance is {percent}% of the purchase price" },
        ],
    },
    DocumentTemplate {
        category: C::Equipment,
        title: "Office environment upgrade",
        summary: "Equipment refresh to improve working conditions.",
        benefit: "Higher employee satisfaction, lower attrition",
        risks: "Return on investment is hard to quantify",
        amount: ValueRange { min: 300_000, max: 2_000_000 },
        benefit_range: (30, 60),
        priority: Priority::Low,
        natures: &[N::ClearGood, N::Tradeoff],
        traps: &[T::WastefulSpending],
        clues: &[
            ClueTemplate { field: "Employee survey", observation: "{percent}% of staff asked for environment improvements" },
        ],
    },
    DocumentTemplate {
        category: C::PersonnelChange,
        title: "Transfer proposal",
        summary: "Proposal to move {name} from {department} to {to_department}.",
        benefit: "Right person in the right seat; revitalizes the org",
        risks: "Personal preference and performance after the move are unknowns",
        amount: ValueRange { min: 0, max: 100_000 },
        benefit_range: (20, 70),
        priority: Priority::Normal,
        natures: &[N::ClearGood, N::Tradeoff, N::ClearBad],
        traps: &[T::ConflictInterest],
        clues: &[
            ClueTemplate { field: "Employee's wishes", observation: "{name}'s stance on the transfer is {status}" },
            ClueTemplate { field: "Aptitude assessment", observation: "Fit score for the new role is {score}/100" },
        ],
    },
    DocumentTemplate {
        category: C::Promotion,
        title: "Promotion recommendation for {name}",
        summary: "Recommending {name} for promotion to {position}.",
        benefit: "Better morale and retention across the team",
        risks: "Higher salary; may not live up to expectations",
        amount: ValueRange { min: 50_000, max: 200_000 },
        benefit_range: (40, 80),
        priority: Priority::Normal,
        natures: &[N::ClearGood, N::Tradeoff, N::ClearBad],
        traps: &[T::IncompetentHire, T::ConflictInterest],
        clues: &[
            ClueTemplate { field: "Performance", observation: "{name}'s recent review grade is {grade}" },
            ClueTemplate { field: "Peer feedback", observation: "Team trust rating sits at {percent}%" },
        ],
    },
    DocumentTemplate {
        category: C::Training,
        title: "{training} training plan",
        summary: "Training for {count} members of the {department} department.",
        benefit: "Productivity up {percent}% from upgraded skills",
        risks: "Work slows down while training runs",
        amount: ValueRange { min: 200_000, max: 1_500_000 },
        benefit_range: (30, 75),
        priority: Priority::Low,
        natures: &[N::ClearGood, N::Tradeoff, N::LongTerm],
        traps: &[T::WastefulSpending, T::InflatedCost],
        clues: &[
            ClueTemplate { field: "Course fee", observation: "Tuition is {ratio}x the industry average" },
            ClueTemplate { field: "Past results", observation: "Measured effect of similar training was {result}" },
        ],
    },
    DocumentTemplate {
        category: C::SalaryRaise,
        title: "Salary revision for {name}",
        summary: "Request to raise {name}'s salary by {percent}%.",
        benefit: "Prevents attrition, improves satisfaction",
        risks: "Higher payroll; fairness toward other staff",
        amount: ValueRange { min: 30_000, max: 150_000 },
        benefit_range: (30, 70),
        priority: Priority::Normal,
        natures: &[N::ClearGood, N::Tradeoff],
        traps: &[],
        clues: &[
            ClueTemplate { field: "Market rate", observation: "Market salary for the role is {amount}0k yen a month" },
            ClueTemplate { field: "Attrition risk", observation: "{name}'s current flight risk is {level}" },
        ],
    },
    DocumentTemplate {
        category: C::NewBusiness,
        title: "New venture proposal: {business}",
        summary: "Proposal to enter the {market} space.",
        benefit: "Could grow into a {amount}0k yen-a-year business within {years} years",
        risks: "Recovery of the initial investment is highly uncertain",
        amount: ValueRange { min: 3_000_000, max: 15_000_000 },
        benefit_range: (60, 100),
        priority: Priority::High,
        natures: &[N::Gamble, N::LongTerm, N::Tradeoff],
        traps: &[T::HiddenRisk, T::FakeData],
        clues: &[
            ClueTemplate { field: "Market size", observation: "The target market is worth {amount}00M yen" },
            ClueTemplate { field: "Entry barriers", observation: "Barriers to entry rated {level}" },
            ClueTemplate { field: "Proposer's background", observation: "{name} has {years} years in this field" },
        ],
    },
    DocumentTemplate {
        category: C::NewBusiness,
        title: "Overseas expansion plan",
        summary: "Plan to enter the {country} market.",
        benefit: "Sales growth from a brand-new market",
        risks: "Regulation, culture gap, currency exposure",
        amount: ValueRange { min: 5_000_000, max: 20_000_000 },
        benefit_range: (50, 95),
        priority: Priority::High,
        natures: &[N::Gamble, N::LongTerm],
        traps: &[T::HiddenRisk],
        clues: &[
            ClueTemplate { field: "Local research", observation: "Local partner reliability rated {level}" },
            ClueTemplate { field: "Regulation", observation: "{count} permits required to operate" },
        ],
    },
    DocumentTemplate {
        category: C::CostCut,
        title: "Cost reduction proposal",
        summary: "A plan to cut {area} costs by {percent}%.",
        benefit: "{amount}0k yen saved per year",
        risks: "Quality and employee morale may suffer",
        amount: ValueRange { min: 0, max: 500_000 },
        benefit_range: (30, 80),
        priority: Priority::Normal,
        natures: &[N::ClearGood, N::Tradeoff, N::ClearBad],
        traps: &[T::HiddenRisk],
        clues: &[
            ClueTemplate { field: "Blast radius", observation: "The cut affects {count} people" },
            ClueTemplate { field: "Alternatives", observation: "Study of alternatives is {status}" },
        ],
    },
    DocumentTemplate {
        category: C::CostCut,
        title: "Outsourcing review",
        summary: "Re-tendering outsourced work to save {amount}0k yen a year.",
        benefit: "Better cost efficiency",
        risks: "Strained vendor relations, quality risk",
        amount: ValueRange { min: 0, max: 300_000 },
        benefit_range: (25, 65),
        priority: Priority::Low,
        natures: &[N::ClearGood, N::Tradeoff],
        traps: &[],
        clues: &[
            ClueTemplate { field: "Current spend", observation: "Outsourcing currently runs {amount}0k yen a month" },
        ],
    },
    DocumentTemplate {
        category: C::Partnership,
        title: "Partnership proposal with {company}",
        summary: "A {kind} partnership with {company} to combine strengths.",
        benefit: "Stronger technology base and synergy",
        risks: "Dependence on the partner; confidential data handling",
        amount: ValueRange { min: 1_000_000, max: 5_000_000 },
        benefit_range: (50, 90),
        priority: Priority::High,
        natures: &[N::ClearGood, N::Gamble, N::Tradeoff],
        traps: &[T::ConflictInterest, T::HiddenRisk],
        clues: &[
            ClueTemplate { field: "Partner reputation", observation: "{company}'s industry reputation is {level}" },
            ClueTemplate { field: "Contract terms", observation: "Profit split is {percent} us : {other_percent} them" },
            ClueTemplate { field: "Partnership record", observation: "{company} has closed {count} partnerships before" },
        ],
    },
];

pub fn templates_for(category: DocumentCategory) -> Vec<&'static DocumentTemplate> {
    DOCUMENT_TEMPLATES
        .iter()
        .filter(|t| t.category == category)
        .collect()
}

/// Company conditions that skew generated documents and attach an extra
/// clue hinting at the situation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Situation {
    LowFunds,
    Flush,
    SmallTeam,
    LargeOrg,
    HighShare,
    NoProducts,
}

impl Situation {
    pub const ALL: [Situation; 6] = [
        Situation::LowFunds,
        Situation::Flush,
        Situation::SmallTeam,
        Situation::LargeOrg,
        Situation::HighShare,
        Situation::NoProducts,
    ];

    pub fn applies(self, view: &CompanyView) -> bool {
        match self {
            Situation::LowFunds => view.money < 3_000_000,
            Situation::Flush => view.money > 30_000_000,
            Situation::SmallTeam => view.employee_count() < 5,
            Situation::LargeOrg => view.employee_count() > 20,
            Situation::HighShare => view.market_share > 20.0,
            Situation::NoProducts => view.product_count == 0,
        }
    }

    pub fn amount_multiplier(self) -> f64 {
        match self {
            Situation::LowFunds => 0.7,
            Situation::Flush => 1.3,
            Situation::SmallTeam => 0.8,
            Situation::LargeOrg => 1.5,
            Situation::HighShare => 1.2,
            Situation::NoProducts => 0.9,
        }
    }

    pub fn benefit_multiplier(self) -> f64 {
        match self {
            Situation::LowFunds => 1.2,
            Situation::Flush => 0.9,
            Situation::SmallTeam => 1.1,
            Situation::LargeOrg => 1.0,
            Situation::HighShare => 0.8,
            Situation::NoProducts => 1.3,
        }
    }

    pub fn extra_clue(self) -> Option<ClueTemplate> {
        match self {
            Situation::LowFunds => Some(ClueTemplate {
                field: "Financials",
                observation: "Company cash flow is tight right now",
            }),
            Situation::Flush => Some(ClueTemplate {
                field: "Financials",
                observation: "The company is sitting on ample funds",
            }),
            Situation::SmallTeam => Some(ClueTemplate {
                field: "Org size",
                observation: "Operating with a skeleton crew",
            }),
            Situation::LargeOrg => Some(ClueTemplate {
                field: "Org size",
                observation: "Management overhead is growing with headcount",
            }),
            Situation::HighShare => None,
            Situation::NoProducts => Some(ClueTemplate {
                field: "Business state",
                observation: "The company has no product of its own yet",
            }),
        }
    }
}

/// One decision-to-consequence rule. When a document of the trigger
/// category receives the trigger verdict, the follow-up fires with the
/// given probability after the given delay.
#[derive(Clone, Copy, Debug)]
pub struct CausalChain {
    pub trigger_category: DocumentCategory,
    pub trigger_verdict: Verdict,
    pub result_category: Option<DocumentCategory>,
    pub result_visitor: Option<VisitorType>,
    pub delay_turns: u32,
    pub probability: f64,
}

pub const CAUSAL_CHAINS: &[CausalChain] = &[
    CausalChain { trigger_category: C::Hiring, trigger_verdict: Verdict::Approve, result_category: Some(C::Training), result_visitor: None, delay_turns: 3, probability: 0.6 },
    CausalChain { trigger_category: C::CostCut, trigger_verdict: Verdict::Approve, result_category: None, result_visitor: Some(VisitorType::Complaint), delay_turns: 2, probability: 0.5 },
    CausalChain { trigger_category: C::NewBusiness, trigger_verdict: Verdict::Approve, result_category: Some(C::Hiring), result_visitor: None, delay_turns: 2, probability: 0.7 },
    CausalChain { trigger_category: C::NewBusiness, trigger_verdict: Verdict::Approve, result_category: Some(C::Equipment), result_visitor: None, delay_turns: 3, probability: 0.5 },
    CausalChain { trigger_category: C::ProductPlan, trigger_verdict: Verdict::Approve, result_category: Some(C::Marketing), result_visitor: None, delay_turns: 4, probability: 0.8 },
    CausalChain { trigger_category: C::Equipment, trigger_verdict: Verdict::Approve, result_category: Some(C::Training), result_visitor: None, delay_turns: 2, probability: 0.4 },
    CausalChain { trigger_category: C::SalaryRaise, trigger_verdict: Verdict::Reject, result_category: None, result_visitor: Some(VisitorType::Complaint), delay_turns: 1, probability: 0.7 },
    CausalChain { trigger_category: C::Promotion, trigger_verdict: Verdict::Reject, result_category: None, result_visitor: Some(VisitorType::Consultation), delay_turns: 1, probability: 0.5 },
    CausalChain { trigger_category: C::Partnership, trigger_verdict: Verdict::Approve, result_category: Some(C::ProductPlan), result_visitor: None, delay_turns: 3, probability: 0.6 },
];
