use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use policy_advisor::assessment::{run_assessment, AssessmentOutcome};
use policy_advisor::catalog::store::CatalogStore;
use policy_advisor::catalog::{AssessmentRecord, Category, DashboardStats, Policy};
use policy_advisor::config::{Config, ConfigOverrides};
use policy_advisor::output::csv::{policies_to_csv, recommendations_to_csv};
use policy_advisor::output::json::render_json;
use policy_advisor::output::table::{
    render_assessment, render_policies_table, render_prominence_table, render_prominent_table,
    render_reasons_table, render_recommendations_table, render_stats_table, render_suggestions,
    render_tags_table,
};
use policy_advisor::profile::builder::{build_profile, ProfileOverrides};
use policy_advisor::profile::{
    Area, Gender, IncomeBracket, MaritalStatus, PolicyType, Qualification,
};
use policy_advisor::prominence::predictor::select_predictor;
use policy_advisor::prominence::scorer::score_prominence;
use policy_advisor::prominence::ProminenceResult;
use policy_advisor::recommend::engine::recommend_policies;
use policy_advisor::recommend::reasons::explain_recommendations;
use policy_advisor::recommend::{Explanation, PolicyRecommendations};
use policy_advisor::server::run_server;
use policy_advisor::tags::classifier::classify_profile;
use policy_advisor::tags::ProfileTag;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Parser)]
#[command(
    name = "policy-advisor",
    about = "Customer prominence scoring and policy recommendations"
)]
struct Cli {
    #[arg(short = 'u', long)]
    customer: Option<String>,
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long)]
    model: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
    #[command(flatten)]
    profile: ProfileArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Args, Clone, Default)]
struct ProfileArgs {
    #[arg(long)]
    gender: Option<String>,
    #[arg(long)]
    area: Option<String>,
    #[arg(long)]
    qualification: Option<String>,
    #[arg(long)]
    income: Option<String>,
    #[arg(long)]
    vintage: Option<u32>,
    #[arg(long = "claim-amount")]
    claim_amount: Option<u64>,
    #[arg(long = "policies-count")]
    policies_count: Option<u32>,
    #[arg(long = "policies-chosen")]
    policies_chosen: Option<String>,
    #[arg(long = "policy-type")]
    policy_type: Option<String>,
    #[arg(long = "marital-status")]
    marital_status: Option<String>,
}

impl From<ProfileArgs> for ProfileOverrides {
    fn from(value: ProfileArgs) -> Self {
        Self {
            gender: value.gender.as_deref().map(Gender::from_code),
            area: value.area.as_deref().map(Area::from_code),
            qualification: value.qualification.as_deref().map(Qualification::from_code),
            income: value.income.as_deref().map(IncomeBracket::from_code),
            vintage: value.vintage,
            claim_amount: value.claim_amount,
            policies_count: value.policies_count,
            policies_chosen: value.policies_chosen,
            policy_type: value.policy_type.as_deref().map(PolicyType::from_code),
            marital_status: value
                .marital_status
                .as_deref()
                .map(MaritalStatus::from_code),
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    Score,
    Tags,
    Recommend {
        #[arg(long = "prominence-score")]
        prominence_score: Option<u8>,
    },
    Explain {
        #[arg(long = "prominence-score")]
        prominence_score: Option<u8>,
    },
    Assess,
    Policies {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        government: bool,
    },
    Prominent {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    Stats,
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(long, default_value_t = 3005)]
        port: u16,
    },
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(Some(&config_path))?;
    config.apply_overrides(ConfigOverrides {
        customer: cli.customer.clone(),
        model_path: cli
            .model
            .as_ref()
            .map(|p| p.to_string_lossy().to_string()),
        db_path: None,
    });

    if matches!(cli.command, Commands::Config { .. }) {
        return handle_config_command(&cli.command, &config, &config_path);
    }
    if let Commands::Serve { host, port } = &cli.command {
        let bind = format!("{host}:{port}");
        let addr: SocketAddr = bind
            .parse()
            .map_err(|e| anyhow!("invalid bind address {bind}: {e}"))?;
        return run_server(config, addr).await;
    }

    let customer = resolve_customer(&config);
    let overrides: ProfileOverrides = cli.profile.clone().into();
    let profile = build_profile(&customer, &overrides);
    let predictor = select_predictor(&config.resolved_model_path());

    match &cli.command {
        Commands::Score => {
            let result = score_prominence(&profile, predictor.as_ref());
            print_score(&customer, &result, cli.output)?;
        }
        Commands::Tags => {
            let tags: Vec<ProfileTag> = classify_profile(&profile).into_iter().collect();
            print_tags(&tags, cli.output)?;
        }
        Commands::Recommend { prominence_score } => {
            let store = open_store(&config)?;
            let catalog = store.list_policies()?;
            let prominence_score = (*prominence_score).unwrap_or_else(|| {
                score_prominence(&profile, predictor.as_ref()).prominence_score
            });
            let recommendations = recommend_policies(&profile, prominence_score, &catalog);
            print_recommendations(&recommendations, cli.output)?;
        }
        Commands::Explain { prominence_score } => {
            let prominence_score = (*prominence_score).unwrap_or_else(|| {
                score_prominence(&profile, predictor.as_ref()).prominence_score
            });
            let explanation = explain_recommendations(&profile, prominence_score);
            print_explanation(&explanation, cli.output)?;
        }
        Commands::Assess => {
            let store = open_store(&config)?;
            let catalog = store.list_policies()?;
            let outcome = run_assessment(&profile, predictor.as_ref(), &catalog);
            persist_assessment(&store, &outcome)?;
            print_assessment(&outcome, cli.output)?;
        }
        Commands::Policies {
            category,
            government,
        } => {
            let store = open_store(&config)?;
            let mut policies = match category {
                Some(raw) => store.policies_by_category(&Category::from_str(raw)?)?,
                None => store.list_policies()?,
            };
            if *government {
                policies.retain(|p| p.is_government_policy);
            }
            print_policies(&policies, cli.output)?;
        }
        Commands::Prominent { limit } => {
            let store = open_store(&config)?;
            let records = store.prominent_customers((*limit).max(1))?;
            print_prominent(&records, cli.output)?;
        }
        Commands::Stats => {
            let store = open_store(&config)?;
            let stats = store.dashboard_stats()?;
            print_stats(&stats, cli.output)?;
        }
        Commands::Config { .. } => {}
        Commands::Serve { .. } => unreachable!("serve command handled before dispatch"),
    }

    Ok(())
}

fn handle_config_command(command: &Commands, config: &Config, config_path: &PathBuf) -> Result<()> {
    let Commands::Config { init, show } = command else {
        return Ok(());
    };
    if *init {
        Config::write_template(config_path)?;
        println!("Wrote config template to {}", config_path.display());
    }
    if *show || !*init {
        println!("{}", render_json(config)?);
    }
    Ok(())
}

fn resolve_customer(config: &Config) -> String {
    if config.customer.reference.trim().is_empty() {
        "walk-in".to_string()
    } else {
        config.customer.reference.clone()
    }
}

fn open_store(config: &Config) -> Result<CatalogStore> {
    let db_path = config.resolved_db_path();
    let store = CatalogStore::open(&db_path)?;
    if config.catalog.seed_defaults {
        let seeded = store.seed_defaults()?;
        if seeded > 0 {
            info!("seeded {seeded} launch policies into {}", db_path.display());
        }
    }
    Ok(store)
}

fn persist_assessment(store: &CatalogStore, outcome: &AssessmentOutcome) -> Result<()> {
    store.record_assessment(&AssessmentRecord {
        customer_ref: outcome.customer.clone(),
        is_prominent: outcome.prominence.is_prominent,
        prominence_score: outcome.prominence.prominence_score,
        predictor: outcome.predictor.clone(),
        captured_at: Utc::now(),
    })
}

fn print_score(customer: &str, result: &ProminenceResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_prominence_table(customer, result)),
        OutputFormat::Json => println!("{}", render_json(result)?),
        OutputFormat::Csv => {
            warn!("CSV output for score not implemented, using JSON");
            println!("{}", render_json(result)?);
        }
    }
    Ok(())
}

fn print_tags(tags: &[ProfileTag], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_tags_table(tags)),
        OutputFormat::Json => println!("{}", render_json(tags)?),
        OutputFormat::Csv => {
            warn!("CSV output for tags not implemented, using JSON");
            println!("{}", render_json(tags)?);
        }
    }
    Ok(())
}

fn print_recommendations(
    recommendations: &PolicyRecommendations,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_recommendations_table(recommendations)),
        OutputFormat::Json => println!("{}", render_json(recommendations)?),
        OutputFormat::Csv => println!("{}", recommendations_to_csv(recommendations)?),
    }
    Ok(())
}

fn print_explanation(explanation: &Explanation, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!("{}", render_reasons_table(&explanation.reasons));
            println!("{}", render_suggestions(&explanation.suggestions));
        }
        OutputFormat::Json => println!("{}", render_json(explanation)?),
        OutputFormat::Csv => {
            warn!("CSV output for explain not implemented, using JSON");
            println!("{}", render_json(explanation)?);
        }
    }
    Ok(())
}

fn print_assessment(outcome: &AssessmentOutcome, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_assessment(outcome)),
        OutputFormat::Json => println!("{}", render_json(outcome)?),
        OutputFormat::Csv => {
            warn!("CSV output for assess not implemented, using JSON");
            println!("{}", render_json(outcome)?);
        }
    }
    Ok(())
}

fn print_policies(policies: &[Policy], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_policies_table(policies)),
        OutputFormat::Json => println!("{}", render_json(policies)?),
        OutputFormat::Csv => println!("{}", policies_to_csv(policies)?),
    }
    Ok(())
}

fn print_prominent(records: &[AssessmentRecord], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_prominent_table(records)),
        OutputFormat::Json => println!("{}", render_json(records)?),
        OutputFormat::Csv => {
            warn!("CSV output for prominent not implemented, using JSON");
            println!("{}", render_json(records)?);
        }
    }
    Ok(())
}

fn print_stats(stats: &DashboardStats, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_stats_table(stats)),
        OutputFormat::Json => println!("{}", render_json(stats)?),
        OutputFormat::Csv => {
            warn!("CSV output for stats not implemented, using JSON");
            println!("{}", render_json(stats)?);
        }
    }
    Ok(())
}
