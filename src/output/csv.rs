use anyhow::Result;

use crate::catalog::Policy;
use crate::recommend::PolicyRecommendations;

pub fn policies_to_csv(policies: &[Policy]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "id",
        "name",
        "category",
        "provider",
        "premium",
        "coverage",
        "is_government_policy",
    ])?;
    for policy in policies {
        writer.write_record([
            policy.id.to_string(),
            policy.name.clone(),
            policy.category.to_string(),
            policy.provider.clone(),
            policy.premium.map(|v| v.to_string()).unwrap_or_default(),
            policy.coverage.map(|v| v.to_string()).unwrap_or_default(),
            policy.is_government_policy.to_string(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn recommendations_to_csv(recommendations: &PolicyRecommendations) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["rank", "pool", "id", "name", "category", "provider", "premium"])?;
    let pools = recommendations
        .government_policies
        .iter()
        .map(|p| ("government", p))
        .chain(
            recommendations
                .private_policies
                .iter()
                .map(|p| ("private", p)),
        );
    for (rank, (pool, policy)) in pools.enumerate() {
        writer.write_record([
            (rank + 1).to_string(),
            pool.to_string(),
            policy.id.to_string(),
            policy.name.clone(),
            policy.category.to_string(),
            policy.provider.clone(),
            policy.premium.map(|v| v.to_string()).unwrap_or_default(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}
