#![deny(warnings)]

//! Economic helpers for the tycoon simulation.
//!
//! Validated pure functions for:
//! - Payroll and monthly profit under event/strategy multipliers
//! - Hiring cost and loan terms
//! - Market-share normalization after competitor drift

use sim_core::config::Costs;
use sim_core::{EventEffects, Money};
use thiserror::Error;

/// Errors produced by economic helpers.
#[derive(Debug, Error, PartialEq)]
pub enum EconError {
    /// Multipliers must be finite and non-negative.
    #[error("invalid multiplier: {0}")]
    InvalidMultiplier(f64),
    /// Shares are percentages; each must lie in [0, 100].
    #[error("invalid market share: {0}")]
    InvalidShare(f64),
}

fn check_multiplier(m: f64) -> Result<f64, EconError> {
    if !m.is_finite() || m < 0.0 {
        return Err(EconError::InvalidMultiplier(m));
    }
    Ok(m)
}

/// Fold the active events into one multiplier pair. Revenue and salary
/// factors chain multiplicatively; for the trend override the most recent
/// event wins.
pub fn fold_event_effects(effects: &[EventEffects]) -> EventEffects {
    effects.iter().fold(
        EventEffects {
            revenue_multiplier: 1.0,
            salary_multiplier: 1.0,
            market_trend: None,
        },
        |mut acc, e| {
            acc.revenue_multiplier *= e.revenue_multiplier;
            acc.salary_multiplier *= e.salary_multiplier;
            if e.market_trend.is_some() {
                acc.market_trend = e.market_trend;
            }
            acc
        },
    )
}

/// Sum of base salaries scaled by the folded salary multiplier.
///
/// Example:
/// let total = monthly_payroll(&[300_000, 400_000], 1.0).unwrap();
/// assert_eq!(total, 700_000);
pub fn monthly_payroll(salaries: &[Money], salary_multiplier: f64) -> Result<Money, EconError> {
    let m = check_multiplier(salary_multiplier)?;
    let base: Money = salaries.iter().sum();
    Ok((base as f64 * m) as Money)
}

/// Monthly gross revenue: product revenue scaled by the event revenue
/// multiplier and the strategy profit margin.
pub fn monthly_revenue(
    product_revenue: Money,
    revenue_multiplier: f64,
    profit_margin: f64,
) -> Result<Money, EconError> {
    let rm = check_multiplier(revenue_multiplier)?;
    let pm = check_multiplier(profit_margin)?;
    Ok((product_revenue as f64 * rm * pm) as Money)
}

/// Net result of a month. Negative values mean the company burned cash.
pub fn monthly_net(revenue: Money, payroll: Money) -> Money {
    revenue - payroll
}

/// What hiring a candidate at `salary` costs up front: a multiple of the
/// salary, scaled by the strategy's hiring multiplier. The fixed
/// `hiring_base` is not part of the charge; it is the cash floor the
/// caller checks before recruiting starts.
pub fn hiring_cost(
    salary: Money,
    costs: &Costs,
    hiring_cost_multiplier: f64,
) -> Result<Money, EconError> {
    let m = check_multiplier(hiring_cost_multiplier)?;
    Ok(((salary * costs.hiring_salary_multiplier) as f64 * m) as Money)
}

/// A loan: what the bank hands over and what it wants back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoanTerms {
    pub principal: Money,
    pub repayment: Money,
}

pub fn loan_terms(costs: &Costs) -> LoanTerms {
    LoanTerms {
        principal: costs.loan_amount,
        repayment: costs.loan_with_interest,
    }
}

/// Scale competitor shares down proportionally when their sum would exceed
/// what the player leaves on the table (100 - player share). Shares already
/// inside the budget are untouched.
pub fn normalize_shares(player_share: f64, shares: &mut [f64]) -> Result<(), EconError> {
    if !(0.0..=100.0).contains(&player_share) {
        return Err(EconError::InvalidShare(player_share));
    }
    for &s in shares.iter() {
        if !(0.0..=100.0).contains(&s) {
            return Err(EconError::InvalidShare(s));
        }
    }
    let available = 100.0 - player_share;
    let total: f64 = shares.iter().sum();
    if total > available && total > 0.0 {
        let scale = available / total;
        for s in shares.iter_mut() {
            *s *= scale;
        }
    }
    Ok(())
}
