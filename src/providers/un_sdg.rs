//! UN SDG payload types and mock generators.
//!
//! Two endpoint families: the goal catalog (`/sdg/Goal/List`) and the
//! per-goal target list (`/sdg/Goal/{id}/Target/List`).

use serde::{Deserialize, Serialize};

use crate::core::models::{Params, Payload};
use crate::error::Result;

// =============================================================================
// Payload Types
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdgGoal {
    pub code: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdgTarget {
    pub goal: String,
    pub code: String,
    pub title: String,
    pub description: String,
    pub uri: String,
}

// =============================================================================
// Mock Generators
// =============================================================================

const GOALS: &[(&str, &str, &str)] = &[
    ("1", "No Poverty", "End poverty in all its forms everywhere"),
    ("2", "Zero Hunger", "End hunger, achieve food security and improved nutrition"),
    ("3", "Good Health and Well-being", "Ensure healthy lives and promote well-being"),
    ("4", "Quality Education", "Ensure inclusive and equitable quality education"),
    ("5", "Gender Equality", "Achieve gender equality and empower all women and girls"),
    ("6", "Clean Water and Sanitation", "Ensure availability and sustainable management of water"),
    ("7", "Affordable and Clean Energy", "Ensure access to affordable, reliable, sustainable energy"),
    ("8", "Decent Work and Economic Growth", "Promote sustained, inclusive economic growth"),
    ("9", "Industry, Innovation and Infrastructure", "Build resilient infrastructure, promote innovation"),
    ("10", "Reduced Inequalities", "Reduce inequality within and among countries"),
    ("11", "Sustainable Cities and Communities", "Make cities and human settlements inclusive, safe"),
    ("12", "Responsible Consumption and Production", "Ensure sustainable consumption and production patterns"),
    ("13", "Climate Action", "Take urgent action to combat climate change"),
    ("14", "Life Below Water", "Conserve and sustainably use the oceans, seas"),
    ("15", "Life on Land", "Protect, restore and promote sustainable use of terrestrial ecosystems"),
    ("16", "Peace, Justice and Strong Institutions", "Promote peaceful and inclusive societies"),
    ("17", "Partnerships for the Goals", "Strengthen the means of implementation"),
];

/// The fixed 17-goal catalog.
pub fn mock_goals(_params: &Params) -> Result<Payload> {
    Ok(Payload::SdgGoals(
        GOALS
            .iter()
            .map(|(code, title, description)| SdgGoal {
                code: (*code).to_string(),
                title: (*title).to_string(),
                description: (*description).to_string(),
            })
            .collect(),
    ))
}

/// Targets for one goal. The target count is derived from the goal id so
/// identical requests always produce the same shape.
pub fn mock_targets(params: &Params) -> Result<Payload> {
    let goal_id = params.str_of("goal_id").unwrap_or("13").to_string();
    let count = goal_id.parse::<usize>().map_or(3, |n| n % 5 + 3);

    Ok(Payload::SdgTargets(
        (1..=count)
            .map(|i| SdgTarget {
                goal: goal_id.clone(),
                code: format!("{goal_id}.{i}"),
                title: format!("Target {goal_id}.{i}"),
                description: format!("Target description for goal {goal_id}, target {i}"),
                uri: format!("/sdg/Goal/{goal_id}/Target/{goal_id}.{i}"),
            })
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_catalog_has_seventeen_entries() {
        let Payload::SdgGoals(goals) = mock_goals(&Params::new()).unwrap() else {
            panic!("expected goals payload");
        };
        assert_eq!(goals.len(), 17);
        assert_eq!(goals[12].code, "13");
        assert_eq!(goals[12].title, "Climate Action");
    }

    #[test]
    fn targets_are_tagged_with_goal_id() {
        let params = Params::new().with("goal_id", "13");
        let Payload::SdgTargets(targets) = mock_targets(&params).unwrap() else {
            panic!("expected targets payload");
        };
        assert!(!targets.is_empty());
        for (i, target) in targets.iter().enumerate() {
            assert_eq!(target.goal, "13");
            assert_eq!(target.code, format!("13.{}", i + 1));
        }
    }

    #[test]
    fn target_count_is_stable_per_goal() {
        let params = Params::new().with("goal_id", "7");
        let first = mock_targets(&params).unwrap();
        let second = mock_targets(&params).unwrap();
        assert_eq!(first.record_count(), second.record_count());
    }
}
