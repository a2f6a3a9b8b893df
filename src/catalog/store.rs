use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::catalog::migrations::BASE_MIGRATION;
use crate::catalog::seed::seed_policies;
use crate::catalog::{AssessmentRecord, Category, DashboardStats, NewPolicy, Policy};

pub struct CatalogStore {
    conn: Connection,
}

impl CatalogStore {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    pub fn migrate(&self) -> Result<()> {
        self.conn.execute_batch(BASE_MIGRATION)?;
        Ok(())
    }

    /// Seeds the launch catalog when the policies table is empty. Returns the
    /// number of policies inserted.
    pub fn seed_defaults(&self) -> Result<usize> {
        if self.policy_count()? > 0 {
            return Ok(0);
        }
        let seeds = seed_policies();
        for policy in &seeds {
            self.insert_policy(policy)?;
        }
        Ok(seeds.len())
    }

    pub fn policy_count(&self) -> Result<u64> {
        let mut stmt = self.conn.prepare("SELECT COUNT(*) FROM policies")?;
        let count: i64 = stmt.query_row([], |row| row.get(0))?;
        Ok(count as u64)
    }

    pub fn insert_policy(&self, policy: &NewPolicy) -> Result<i64> {
        self.conn.execute(
            r#"
INSERT INTO policies(
    name, description, category, provider, premium, coverage,
    eligibility_criteria, benefits, is_government_policy, created_at
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
"#,
            params![
                policy.name,
                policy.description,
                policy.category.code(),
                policy.provider,
                policy.premium,
                policy.coverage,
                serde_json::to_string(&policy.eligibility_criteria)?,
                serde_json::to_string(&policy.benefits)?,
                if policy.is_government_policy { 1 } else { 0 },
                Utc::now().to_rfc3339()
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn list_policies(&self) -> Result<Vec<Policy>> {
        self.query_policies("SELECT * FROM policies ORDER BY id", params![])
    }

    pub fn policies_by_category(&self, category: &Category) -> Result<Vec<Policy>> {
        self.query_policies(
            "SELECT * FROM policies WHERE category = ?1 ORDER BY id",
            params![category.code()],
        )
    }

    pub fn government_policies(&self) -> Result<Vec<Policy>> {
        self.query_policies(
            "SELECT * FROM policies WHERE is_government_policy = 1 ORDER BY id",
            params![],
        )
    }

    fn query_policies<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<Vec<Policy>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, row_to_policy)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn record_assessment(&self, record: &AssessmentRecord) -> Result<()> {
        self.conn.execute(
            r#"
INSERT INTO assessment_history(
    customer_ref, is_prominent, prominence_score, predictor, captured_at
) VALUES (?1, ?2, ?3, ?4, ?5)
"#,
            params![
                record.customer_ref,
                if record.is_prominent { 1 } else { 0 },
                i64::from(record.prominence_score),
                record.predictor,
                record.captured_at.to_rfc3339()
            ],
        )?;
        Ok(())
    }

    pub fn load_assessments(
        &self,
        customer_ref: &str,
        limit: usize,
    ) -> Result<Vec<AssessmentRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
SELECT customer_ref, is_prominent, prominence_score, predictor, captured_at
FROM assessment_history
WHERE customer_ref = ?1
ORDER BY id DESC
LIMIT ?2
"#,
        )?;
        let rows = stmt
            .query_map(params![customer_ref, limit as i64], row_to_assessment)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Latest assessment per customer, prominent ones only, most recent first.
    pub fn prominent_customers(&self, limit: usize) -> Result<Vec<AssessmentRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
SELECT customer_ref, is_prominent, prominence_score, predictor, captured_at
FROM assessment_history a
WHERE id = (SELECT MAX(id) FROM assessment_history b WHERE b.customer_ref = a.customer_ref)
  AND is_prominent = 1
ORDER BY id DESC
LIMIT ?1
"#,
        )?;
        let rows = stmt
            .query_map(params![limit as i64], row_to_assessment)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn dashboard_stats(&self) -> Result<DashboardStats> {
        let mut stmt = self.conn.prepare(
            r#"
SELECT COUNT(*), COALESCE(SUM(is_prominent), 0)
FROM assessment_history a
WHERE id = (SELECT MAX(id) FROM assessment_history b WHERE b.customer_ref = a.customer_ref)
"#,
        )?;
        let (total, prominent): (i64, i64) =
            stmt.query_row([], |row| Ok((row.get(0)?, row.get(1)?)))?;

        let mut stmt = self
            .conn
            .prepare("SELECT AVG(premium) FROM policies WHERE premium IS NOT NULL")?;
        let average_policy_premium: Option<f64> = stmt.query_row([], |row| row.get(0))?;

        let conversion_rate_pct = if total > 0 {
            ((prominent as f64 / total as f64) * 100.0).round() as u64
        } else {
            0
        };

        Ok(DashboardStats {
            total_customers: total as u64,
            prominent_customers: prominent as u64,
            conversion_rate_pct,
            average_policy_premium,
        })
    }
}

fn row_to_policy(row: &rusqlite::Row<'_>) -> rusqlite::Result<Policy> {
    let category_raw: String = row.get("category")?;
    let eligibility_raw: String = row.get("eligibility_criteria")?;
    let benefits_raw: String = row.get("benefits")?;
    Ok(Policy {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        category: Category::from_code(&category_raw),
        provider: row.get("provider")?,
        premium: row.get("premium")?,
        coverage: row.get("coverage")?,
        eligibility_criteria: serde_json::from_str(&eligibility_raw)
            .unwrap_or(serde_json::Value::Null),
        benefits: serde_json::from_str(&benefits_raw).unwrap_or(serde_json::Value::Null),
        is_government_policy: row.get::<_, i64>("is_government_policy")? != 0,
    })
}

fn row_to_assessment(row: &rusqlite::Row<'_>) -> rusqlite::Result<AssessmentRecord> {
    let captured_at_raw: String = row.get("captured_at")?;
    let captured_at = DateTime::parse_from_rfc3339(&captured_at_raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now());
    let score: i64 = row.get("prominence_score")?;
    Ok(AssessmentRecord {
        customer_ref: row.get("customer_ref")?,
        is_prominent: row.get::<_, i64>("is_prominent")? != 0,
        prominence_score: score.clamp(0, 100) as u8,
        predictor: row.get("predictor")?,
        captured_at,
    })
}
