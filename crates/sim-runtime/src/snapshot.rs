//! The read-only projection handed to the presentation layer.
//!
//! Documents cross the boundary as [`DocumentView`]s, so the hidden truth
//! layer never reaches a renderer no matter what it serializes.

use std::collections::BTreeSet;

use serde::Serialize;
use sim_ai::Competitor;
use sim_core::config::{Difficulty, MarketTrend, StrategyKey};
use sim_core::{ActiveEvent, Employee, Money, Product};
use sim_desk::{DocumentStats, DocumentView, VisitorEvent};

use crate::game::Game;

#[derive(Clone, Debug, Serialize)]
pub struct GameSnapshot {
    pub money: Money,
    pub debt: Money,
    pub monthly_revenue: Money,
    pub market_share: f64,
    pub brand_power: i32,
    pub reputation: i32,
    pub research_points: u32,
    pub market_trend: MarketTrend,
    pub company_strategy: Option<StrategyKey>,
    pub achievements: BTreeSet<String>,
    pub ceo_approval: i32,
    pub company_culture: i32,
    pub scandal_risk: f64,
    pub difficulty: Difficulty,
    pub year: i32,
    pub month: u32,
    pub week: u32,
    pub turn: u32,
    pub game_over: Option<String>,
    pub employees: Vec<Employee>,
    pub products: Vec<Product>,
    pub competitors: Vec<Competitor>,
    pub event_history: Vec<ActiveEvent>,
    pub documents: Vec<DocumentView>,
    pub current_visitor: Option<VisitorEvent>,
    pub document_stats: DocumentStats,
}

impl Game {
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            money: self.money,
            debt: self.debt,
            monthly_revenue: self.monthly_revenue,
            market_share: self.market_share,
            brand_power: self.brand_power,
            reputation: self.reputation,
            research_points: self.research_points,
            market_trend: self.market_trend,
            company_strategy: self.company_strategy,
            achievements: self.achievements.clone(),
            ceo_approval: self.ceo_approval,
            company_culture: self.company_culture,
            scandal_risk: self.scandal_risk,
            difficulty: self.difficulty,
            year: self.year,
            month: self.month,
            week: self.week,
            turn: self.turn,
            game_over: self.game_over.clone(),
            employees: self.employees.clone(),
            products: self.products.clone(),
            competitors: self.competitors.clone(),
            event_history: self.event_history.clone(),
            documents: self.desk.queue_views(),
            current_visitor: self.desk.current_visitor.clone(),
            document_stats: self.desk.stats.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::config::Difficulty;

    #[test]
    fn snapshot_documents_never_leak_hidden_fields() {
        let mut g = Game::new(5, Difficulty::Normal).unwrap();
        for _ in 0..6 {
            g.next_turn().unwrap();
        }
        assert!(!g.desk.queue.is_empty());
        let json = serde_json::to_value(g.snapshot()).unwrap();
        let documents = json["documents"].as_array().unwrap();
        assert!(!documents.is_empty());
        for doc in documents {
            let obj = doc.as_object().unwrap();
            assert!(!obj.contains_key("nature"));
            assert!(!obj.contains_key("trap"));
            assert!(!obj.contains_key("actual_amount"));
            assert!(!obj.contains_key("gamble_success_rate"));
            assert!(!obj.contains_key("long_term_benefit"));
        }
    }

    #[test]
    fn snapshot_mirrors_game_counters() {
        let mut g = Game::new(5, Difficulty::Hard).unwrap();
        g.next_turn().unwrap();
        let snap = g.snapshot();
        assert_eq!(snap.turn, 1);
        assert_eq!(snap.week, 2);
        assert_eq!(snap.difficulty, Difficulty::Hard);
        assert_eq!(snap.money, g.money);
        assert_eq!(snap.competitors.len(), 3);
    }
}
