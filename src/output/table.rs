use std::collections::BTreeMap;

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::assessment::AssessmentOutcome;
use crate::catalog::{AssessmentRecord, Category, DashboardStats, Policy};
use crate::prominence::ProminenceResult;
use crate::recommend::PolicyRecommendations;
use crate::tags::ProfileTag;

pub fn render_prominence_table(customer: &str, result: &ProminenceResult) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Customer", "Prominent", "Score"]);

    let flag = if result.is_prominent { "YES" } else { "NO" };
    let flag_cell = if result.is_prominent {
        Cell::new(flag).fg(Color::Green)
    } else {
        Cell::new(flag).fg(Color::Red)
    };
    table.add_row(Row::from(vec![
        Cell::new(customer),
        flag_cell,
        Cell::new(format!("{}/100", result.prominence_score)),
    ]));
    table.to_string()
}

pub fn render_tags_table(tags: &[ProfileTag]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Tag"]);
    for tag in tags {
        table.add_row(vec![tag.to_string()]);
    }
    if tags.is_empty() {
        table.add_row(vec!["(no tags matched)".to_string()]);
    }
    table.to_string()
}

pub fn render_policies_table(policies: &[Policy]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "ID",
        "Name",
        "Category",
        "Provider",
        "Premium",
        "Coverage",
        "Government",
    ]);
    for policy in policies {
        table.add_row(vec![
            policy.id.to_string(),
            policy.name.clone(),
            policy.category.to_string(),
            policy.provider.clone(),
            policy
                .premium
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string()),
            policy
                .coverage
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string()),
            if policy.is_government_policy { "YES" } else { "no" }.to_string(),
        ]);
    }
    table.to_string()
}

pub fn render_recommendations_table(recommendations: &PolicyRecommendations) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Rank", "Pool", "Name", "Category", "Provider", "Premium"]);

    let mut rank = 1usize;
    for policy in &recommendations.government_policies {
        add_recommendation_row(&mut table, rank, "government", policy, Color::Cyan);
        rank += 1;
    }
    for policy in &recommendations.private_policies {
        add_recommendation_row(&mut table, rank, "private", policy, Color::Yellow);
        rank += 1;
    }
    table.to_string()
}

fn add_recommendation_row(
    table: &mut Table,
    rank: usize,
    pool: &str,
    policy: &Policy,
    color: Color,
) {
    table.add_row(Row::from(vec![
        Cell::new(rank.to_string()),
        Cell::new(pool).fg(color),
        Cell::new(policy.name.clone()),
        Cell::new(policy.category.to_string()),
        Cell::new(policy.provider.clone()),
        Cell::new(
            policy
                .premium
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ),
    ]));
}

pub fn render_reasons_table(reasons: &BTreeMap<Category, String>) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Category", "Why it fits"]);
    for (category, reason) in reasons {
        table.add_row(vec![category.to_string(), reason.clone()]);
    }
    table.to_string()
}

pub fn render_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        return "No additional coverage suggestions.".to_string();
    }
    suggestions
        .iter()
        .map(|s| format!("- {s}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_assessment(outcome: &AssessmentOutcome) -> String {
    let mut out = String::new();
    out.push_str(&render_prominence_table(&outcome.customer, &outcome.prominence));
    out.push('\n');
    out.push_str(&render_tags_table(&outcome.tags));
    out.push('\n');
    out.push_str(&render_recommendations_table(&PolicyRecommendations {
        government_policies: outcome.government_policies.clone(),
        private_policies: outcome.private_policies.clone(),
    }));
    out.push('\n');
    out.push_str(&render_reasons_table(&outcome.reasons));
    out.push('\n');
    out.push_str(&render_suggestions(&outcome.suggestions));
    out
}

pub fn render_prominent_table(records: &[AssessmentRecord]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Customer", "Score", "Predictor", "Captured At"]);
    for record in records {
        table.add_row(vec![
            record.customer_ref.clone(),
            record.prominence_score.to_string(),
            record.predictor.clone(),
            record.captured_at.to_rfc3339(),
        ]);
    }
    table.to_string()
}

pub fn render_stats_table(stats: &DashboardStats) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Customers", "Prominent", "Conversion", "Avg Premium"]);
    table.add_row(vec![
        stats.total_customers.to_string(),
        stats.prominent_customers.to_string(),
        format!("{}%", stats.conversion_rate_pct),
        stats
            .average_policy_premium
            .map(|v| format!("{v:.0}"))
            .unwrap_or_else(|| "-".to_string()),
    ]);
    table.to_string()
}
