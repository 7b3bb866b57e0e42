//! Rule-based recommendations built from a scored result.
//!
//! One entry per category that raised issues, ranked so the most severe
//! and most valuable fixes come first.

use crate::domain::models::{HealthCategory, HealthScoreResult, Priority, Recommendation};

pub fn build_recommendations(result: &HealthScoreResult) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = result
        .categories
        .iter()
        .filter_map(recommend_for)
        .collect();

    // Stable: equal priority and gain keep category order.
    recommendations.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| b.potential_gain.total_cmp(&a.potential_gain))
    });
    recommendations
}

fn recommend_for(category: &HealthCategory) -> Option<Recommendation> {
    let worst = category.worst_severity()?;
    let lead = category.issues.iter().find(|i| i.severity == worst)?;

    Some(Recommendation {
        category: category.name.clone(),
        priority: Priority::from(worst),
        potential_gain: (category.shortfall() * 100.0).round() / 100.0,
        action: lead.recommendation.clone(),
        issue_count: category.issues.len(),
    })
}
