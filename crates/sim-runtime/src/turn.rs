//! The weekly turn pipeline and the monthly rollup.
//!
//! Step order is fixed: turn counters, products, random events, the desk
//! tick, then (on week overflow) the monthly rollup with payroll, revenue,
//! achievements, the bankruptcy check, and the competitor update.

use sim_core::config::MarketTrend;
use sim_core::{ActiveEvent, EventEffects, Money, SimError};
use tracing::{info, warn};

use crate::game::Game;

/// What happened during one call to [`Game::next_turn`], for narration.
#[derive(Clone, Debug, Default)]
pub struct TurnReport {
    pub new_documents: Vec<u64>,
    pub visitor_arrived: bool,
    pub events_triggered: Vec<String>,
    pub month_closed: bool,
    pub monthly_net: Option<Money>,
}

impl Game {
    fn active_event_effects(&self) -> Vec<EventEffects> {
        self.event_history
            .iter()
            .filter(|e| e.is_active())
            .map(ActiveEvent::apply_effects)
            .collect()
    }

    /// Advance one week. Fails once the game is over.
    pub fn next_turn(&mut self) -> Result<TurnReport, SimError> {
        if let Some(reason) = &self.game_over {
            return Err(SimError::GameOver(reason.clone()));
        }
        let mut report = TurnReport::default();
        self.turn += 1;
        self.week += 1;
        self.desk.reset_weekly_limits();

        // Products earn weekly; the cash lands in the monthly rollup.
        let mut weekly_revenue: Money = 0;
        for product in &mut self.products {
            product.advance_lifecycle(&self.config);
            weekly_revenue += product.calculate_revenue(&self.config);
        }
        self.revenue_this_month += weekly_revenue;

        // Burn a turn off active events, then roll for new ones. An event
        // cannot stack with an active copy of itself.
        for event in &mut self.event_history {
            if event.is_active() {
                event.advance_turn();
            }
        }
        for index in 0..self.config.events.len() {
            let def = &self.config.events[index];
            let already_active = self
                .event_history
                .iter()
                .any(|e| e.is_active() && e.id == def.id);
            if !already_active && self.dice.chance(def.probability) {
                let event = ActiveEvent::from_def(&self.config.events[index], self.turn);
                info!(id = %event.id, "event triggered");
                report.events_triggered.push(event.id.clone());
                self.event_history.push(event);
            }
        }
        let folded = sim_econ::fold_event_effects(&self.active_event_effects());
        self.market_trend = folded.market_trend.unwrap_or(MarketTrend::Stable);

        self.desk_tick(&mut report);

        if self.week > self.config.limits.weeks_per_month {
            self.week = 1;
            self.month += 1;
            if self.month > 12 {
                self.month = 1;
                self.year += 1;
            }
            report.month_closed = true;
            report.monthly_net = Some(self.monthly_rollup()?);
        }
        Ok(report)
    }

    /// The desk's share of the weekly tick: deadlines, investigations,
    /// causal chains, deferred payouts, fresh paperwork, and the visitor.
    fn desk_tick(&mut self, report: &mut TurnReport) {
        let expired = sim_desk::process_expired(&mut self.desk, self.turn);
        for resolution in &expired {
            self.apply_verdict_resolution(resolution);
        }
        sim_desk::complete_investigations(&mut self.desk);

        let view = self.company_view();
        let forced_visitors =
            sim_desk::process_causal_chains(&mut self.desk, &view, &self.balance, &mut self.dice);
        self.desk.pending_visitors.extend(forced_visitors);

        let payouts = sim_desk::long_term_payouts(&mut self.desk, self.turn);
        for payout in payouts {
            info!(description = %payout.description, "long-term payout");
            self.apply_document_outcome(&payout, None);
        }

        let view = self.company_view();
        report.new_documents =
            sim_desk::generate_documents(&mut self.desk, &view, &self.balance, &mut self.dice);

        let view = self.company_view();
        report.visitor_arrived =
            sim_desk::spawn_visitor(&mut self.desk, &view, &self.balance, &mut self.dice, None);

        self.desk
            .prune_history(self.balance.max_document_history, self.balance.max_visitor_history);
    }

    /// Close the month: revenue minus payroll under event and strategy
    /// multipliers, achievements, the bankruptcy check, and the competitor
    /// update in its fixed order.
    fn monthly_rollup(&mut self) -> Result<Money, SimError> {
        let folded = sim_econ::fold_event_effects(&self.active_event_effects());
        let strategy = self.config.strategy_effects(self.company_strategy);
        // Stored salaries are already trait-adjusted at hiring time; only
        // the event and strategy multipliers apply here.
        let salaries: Vec<Money> = self.employees.iter().map(|e| e.salary).collect();
        let payroll = sim_econ::monthly_payroll(
            &salaries,
            folded.salary_multiplier * strategy.salary_multiplier,
        )
        .map_err(|e| SimError::InvalidTransition(e.to_string()))?;
        let revenue = sim_econ::monthly_revenue(
            self.revenue_this_month,
            folded.revenue_multiplier,
            strategy.profit_margin,
        )
        .map_err(|e| SimError::InvalidTransition(e.to_string()))?;
        let net = sim_econ::monthly_net(revenue, payroll);
        self.money += net;
        self.monthly_revenue = revenue;
        self.revenue_this_month = 0;
        info!(revenue, payroll, net, money = self.money, "month closed");

        // The grind wears on everyone a little.
        for employee in &mut self.employees {
            employee.adjust_motivation(-2);
        }

        self.check_achievements(net);

        if self.money < 0 {
            warn!(money = self.money, "company is bankrupt");
            self.game_over = Some("the company ran out of money".to_string());
            return Ok(net);
        }

        let player_share = self.market_share;
        let action = self.last_player_action;
        for competitor in &mut self.competitors {
            competitor.update_alert_level(player_share);
            if let Some(action) = action {
                let _ = competitor.react_to_player_action(action, &mut self.dice);
            }
            let _ = competitor.perform_autonomous_action(&mut self.dice);
            competitor.update_market_share(&mut self.dice);
        }
        let mut shares: Vec<f64> = self.competitors.iter().map(|c| c.market_share).collect();
        sim_econ::normalize_shares(self.market_share, &mut shares)
            .map_err(|e| SimError::InvalidTransition(e.to_string()))?;
        for (competitor, share) in self.competitors.iter_mut().zip(shares) {
            competitor.market_share = share;
        }
        self.last_player_action = None;
        Ok(net)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::config::Difficulty;

    fn game() -> Game {
        Game::new(7, Difficulty::Normal).unwrap()
    }

    #[test]
    fn four_weeks_close_a_month() {
        let mut g = game();
        for week in 0..3 {
            let report = g.next_turn().unwrap();
            assert!(!report.month_closed, "closed early at week {week}");
        }
        let report = g.next_turn().unwrap();
        assert!(report.month_closed);
        assert_eq!(g.week, 1);
        assert_eq!(g.month, 2);
        assert_eq!(g.turn, 4);
    }

    #[test]
    fn year_rolls_over_after_december() {
        let mut g = game();
        g.month = 12;
        for _ in 0..4 {
            g.next_turn().unwrap();
        }
        assert_eq!(g.month, 1);
        assert_eq!(g.year, 2026);
    }

    #[test]
    fn documents_arrive_every_turn() {
        let mut g = game();
        let report = g.next_turn().unwrap();
        assert_eq!(report.new_documents.len(), 2); // base count, no staff
        assert_eq!(g.desk.queue.len(), 2);
    }

    #[test]
    fn payroll_charges_the_stored_salary_exactly_once() {
        let mut g = game();
        g.hire();
        // the stored salary already carries the trait adjustment from hiring
        g.employees[0].salary = 400_000;
        g.employees[0].traits = vec!["leadership".into()];
        let before = g.money;
        g.monthly_rollup().unwrap();
        assert_eq!(g.money, before - 400_000);
    }

    #[test]
    fn payroll_drains_money_at_month_end() {
        let mut g = game();
        g.hire();
        g.hire();
        let before = g.money;
        for _ in 0..4 {
            g.next_turn().unwrap();
        }
        // no products, no revenue; two salaries went out
        assert!(g.money < before);
        assert_eq!(g.monthly_revenue, 0);
    }

    #[test]
    fn bankruptcy_ends_the_game() {
        let mut g = game();
        g.hire();
        g.money = 1_000; // cannot cover payroll
        for _ in 0..4 {
            let _ = g.next_turn();
        }
        assert!(g.game_over.is_some());
        let err = g.next_turn().unwrap_err();
        assert!(matches!(err, SimError::GameOver(_)));
    }

    #[test]
    fn competitor_shares_stay_normalized_over_a_year() {
        let mut g = game();
        g.market_share = 20.0;
        for _ in 0..48 {
            if g.next_turn().is_err() {
                break;
            }
        }
        let total: f64 = g.competitors.iter().map(|c| c.market_share).sum();
        assert!(total <= 100.0 - g.market_share + 1e-6, "total {total}");
        for c in &g.competitors {
            assert!((5.0..=60.0).contains(&c.market_share));
        }
    }

    #[test]
    fn active_events_expire_out_of_the_active_set() {
        let mut g = game();
        for _ in 0..60 {
            if g.next_turn().is_err() {
                break;
            }
        }
        for e in &g.event_history {
            if !e.is_active() {
                assert_eq!(e.remaining_turns, 0);
            }
        }
        // history retains expired events for the dashboard
        assert!(!g.event_history.is_empty(), "no event fired in 60 turns");
    }

    #[test]
    fn same_seed_same_script_same_snapshot() {
        let run = || {
            let mut g = Game::new(99, Difficulty::Normal).unwrap();
            g.hire();
            g.hire();
            g.select_strategy(sim_core::config::StrategyKey::TechFocus);
            for _ in 0..12 {
                g.next_turn().unwrap();
                if let Some(doc) = g.desk.queue.first() {
                    let id = doc.id;
                    g.decide_document(id, sim_desk::Verdict::Reject);
                }
            }
            serde_json::to_string(&g.snapshot()).unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn expired_documents_are_processed_by_the_tick() {
        let mut g = game();
        g.next_turn().unwrap();
        // force every queued document to expire next turn
        for doc in &mut g.desk.queue {
            doc.deadline = Some(g.turn + 1);
        }
        let queued = g.desk.queue.len();
        g.next_turn().unwrap();
        assert!(g.desk.history.len() >= queued);
    }
}
