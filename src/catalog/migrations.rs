pub const BASE_MIGRATION: &str = r#"
CREATE TABLE IF NOT EXISTS policies (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    category TEXT NOT NULL,
    provider TEXT NOT NULL,
    premium INTEGER,
    coverage INTEGER,
    eligibility_criteria TEXT NOT NULL,
    benefits TEXT NOT NULL,
    is_government_policy INTEGER NOT NULL,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_policies_category
    ON policies(category);
CREATE INDEX IF NOT EXISTS idx_policies_government
    ON policies(is_government_policy);

CREATE TABLE IF NOT EXISTS assessment_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    customer_ref TEXT NOT NULL,
    is_prominent INTEGER NOT NULL,
    prominence_score INTEGER NOT NULL,
    predictor TEXT NOT NULL,
    captured_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_assessment_customer_captured
    ON assessment_history(customer_ref, captured_at DESC);
"#;
