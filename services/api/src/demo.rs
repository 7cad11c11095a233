use crate::infra::{load_catalog, load_rates};
use clap::Args;
use claim_rating::config::AppConfig;
use claim_rating::error::AppError;
use claim_rating::rating::{
    CatalogClaimSubmission, CatalogSelection, ClaimAssessment, ClaimRatingService,
    ClaimSubmission, ConditionCatalog, ConditionId, Dependents, IntakeGuard, LimbType,
    RangeSelection, RatingEngine, RatingInput, Side,
};
use claim_rating::telemetry;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// JSON claim: `{"conditions": [...]}` or catalog `{"selections": [...]}`
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Rate table (CSV or JSON) overriding RATE_TABLE_PATH and the built-in schedule
    #[arg(long)]
    pub(crate) rates: Option<PathBuf>,
    /// Pretty-print the JSON assessment
    #[arg(long)]
    pub(crate) pretty: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CombineArgs {
    /// Rating percentages in 10% steps
    #[arg(required = true, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub(crate) values: Vec<u8>,
    /// Treat the first two values as the left and right side of this paired limb
    #[arg(long, value_parser = parse_limb)]
    pub(crate) bilateral_limb: Option<LimbType>,
}

#[derive(Args, Debug)]
pub(crate) struct RangeArgs {
    /// JSON file with `{"conditions": [{"name": ..., "possibleRatings": [...]}]}`
    #[arg(long)]
    pub(crate) input: PathBuf,
}

/// Either claim shape accepted by `assess`; told apart by their required fields.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AssessInput {
    Conditions(ClaimSubmission),
    Catalog(CatalogClaimSubmission),
}

#[derive(Debug, Deserialize)]
struct RangeInput {
    conditions: Vec<RangeSelection>,
}

fn parse_limb(raw: &str) -> Result<LimbType, String> {
    LimbType::parse(raw).ok_or_else(|| format!("unknown limb type '{raw}'"))
}

fn cli_config() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init_for_cli(&config.telemetry)?;
    Ok(config)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), AppError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let config = cli_config()?;
    let rates = load_rates(&config.data, args.rates.as_deref())?;
    let catalog = load_catalog(&config.data)?;
    let service =
        ClaimRatingService::new(IntakeGuard::default(), catalog, RatingEngine::new(rates));

    let raw = std::fs::read_to_string(&args.input)?;
    let assessment = match serde_json::from_str::<AssessInput>(&raw)? {
        AssessInput::Conditions(submission) => service.assess(submission)?,
        AssessInput::Catalog(submission) => service.assess_catalog(&submission)?,
    };

    print_json(&assessment, args.pretty)
}

pub(crate) fn run_combine(args: CombineArgs) -> Result<(), AppError> {
    cli_config()?;
    let ratings = combine_inputs(&IntakeGuard::default(), &args)?;
    let result = RatingEngine::default().combine(&ratings, true);

    for step in &result.steps {
        println!("{step}");
    }
    println!(
        "Combined rating: {}% (exact {:.2}%)",
        result.combined, result.exact_value
    );
    if result.bilateral_factor > 0 {
        println!("Bilateral factor applied: +{}", result.bilateral_factor);
    }
    Ok(())
}

fn combine_inputs(guard: &IntakeGuard, args: &CombineArgs) -> Result<Vec<RatingInput>, AppError> {
    args.values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let name = format!("Rating {}", index + 1);
            let value = guard.normalize_value(&name, i32::from(*value))?;
            let input = RatingInput::new(format!("cli-{}", index + 1), name, value);
            Ok(match (args.bilateral_limb, index) {
                (Some(limb), 0) => input.paired(limb, Side::Left),
                (Some(limb), 1) => input.paired(limb, Side::Right),
                _ => input,
            })
        })
        .collect()
}

pub(crate) fn run_range(args: RangeArgs) -> Result<(), AppError> {
    cli_config()?;
    let raw = std::fs::read_to_string(&args.input)?;
    let input: RangeInput = serde_json::from_str(&raw)?;
    let range = ClaimRatingService::default().estimate_range(input.conditions)?;

    println!(
        "Estimated combined rating: {}% to {}% (exact {:.2}% to {:.2}%)",
        range.min, range.max, range.min_exact, range.max_exact
    );
    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    let config = cli_config()?;
    let rates = load_rates(&config.data, None)?;
    let service = ClaimRatingService::new(
        IntakeGuard::default(),
        ConditionCatalog::standard(),
        RatingEngine::new(rates),
    );

    println!("Claim rating demo");
    let submission = demo_submission();
    for selection in &submission.selections {
        let name = service
            .catalog()
            .get(&selection.condition_id)
            .map(|entry| entry.name.as_str())
            .unwrap_or("unknown condition");
        println!("- {name}: {}%", selection.value);
    }

    let assessment = match service.assess_catalog(&submission) {
        Ok(assessment) => assessment,
        Err(err) => {
            println!("  Claim rejected: {err}");
            return Ok(());
        }
    };
    render_assessment(&assessment);
    Ok(())
}

fn demo_submission() -> CatalogClaimSubmission {
    let pick = |id: &str, value: i32, side: Option<Side>| CatalogSelection {
        condition_id: ConditionId::new(id),
        value,
        side,
    };

    CatalogClaimSubmission {
        selections: vec![
            pick("ptsd", 50, None),
            pick("knee-left", 20, Some(Side::Left)),
            pick("knee-right", 10, Some(Side::Right)),
            pick("tinnitus", 10, None),
            pick("ed", 0, None),
        ],
        dependents: Dependents {
            spouse: true,
            children: 2,
            parents: 0,
        },
        evidence_score: 70,
    }
}

fn render_assessment(assessment: &ClaimAssessment) {
    let rating = &assessment.rating;
    println!("\nCombined rating");
    for step in &rating.steps {
        println!("  {step}");
    }
    println!(
        "  => {}% (exact {:.2}%, bilateral factor {})",
        rating.combined, rating.exact_value, rating.bilateral_factor
    );

    let compensation = &assessment.compensation;
    println!("\nMonthly compensation ({} schedule)", compensation.cola.schedule);
    println!("  Base {}", compensation.breakdown.base);
    println!("  Spouse {}", compensation.breakdown.spouse);
    println!("  Children {}", compensation.breakdown.children);
    println!("  Parents {}", compensation.breakdown.parents);
    println!(
        "  Total {} per month, {} per year",
        compensation.monthly, compensation.annual
    );

    let tdiu = &assessment.tdiu;
    println!("\nTDIU: {}", tdiu.eligibility.label());
    if let Some(pathway) = tdiu.pathway {
        println!("  Pathway: {}", pathway.label());
    }
    println!("  {}", tdiu.explanation);
    if !tdiu.forms.is_empty() {
        println!("  Forms: {}", tdiu.forms.join(", "));
    }

    println!("\nSpecial monthly compensation");
    if assessment.smc.is_empty() {
        println!("  No triggers fired");
    }
    for award in &assessment.smc {
        let marker = if award.advisory { " (review)" } else { "" };
        println!(
            "  {}{marker}: {} per month, {}",
            award.award_type.code(),
            award.amount,
            award.reason
        );
    }

    println!("\nComposite score {}/100", assessment.score.total);
    for component in &assessment.score.components {
        println!(
            "  - {:?}: {:.1} ({})",
            component.factor, component.points, component.notes
        );
    }
}
