//! Bull/bear scenarios derived from a simulation.

use serde::{Deserialize, Serialize};

use super::SimulationResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Percent of paths, 0–100.
    pub probability: f64,
    pub target: f64,
    /// Percent change from the current price.
    pub change_pct: f64,
    pub days: usize,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioPair {
    pub bull: Scenario,
    pub bear: Scenario,
}

impl ScenarioPair {
    /// Bull uses the 65th-percentile target, bear the 35th.
    pub fn from_simulation(sim: &SimulationResult) -> Self {
        let current = sim.current_price;
        let bull_change = (sim.bull_target - current) / current * 100.0;
        let bear_change = (sim.bear_target - current) / current * 100.0;

        Self {
            bull: Scenario {
                probability: sim.bull_probability,
                target: sim.bull_target,
                change_pct: bull_change,
                days: sim.days,
                description: format!(
                    "Target: ${:.2} ({:+.1}%) in {} days",
                    sim.bull_target, bull_change, sim.days
                ),
            },
            bear: Scenario {
                probability: sim.bear_probability,
                target: sim.bear_target,
                change_pct: bear_change,
                days: sim.days,
                description: format!(
                    "Risk: ${:.2} ({:+.1}%) if support breaks",
                    sim.bear_target, bear_change
                ),
            },
        }
    }

    /// |bull change / bear change|, 0 when the bear case is flat.
    pub fn risk_reward_ratio(&self) -> f64 {
        if self.bear.change_pct == 0.0 {
            return 0.0;
        }
        (self.bull.change_pct / self.bear.change_pct).abs()
    }
}
