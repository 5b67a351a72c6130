use crate::infra::{parse_assignment, start_session, Assignment};
use clap::Args;
use std::io;
use target_matrix::config::AppConfig;
use target_matrix::error::AppError;
use target_matrix::matrix::export::write_rankings_csv;
use target_matrix::matrix::{
    criteria, find_criterion, Criterion, LoadSource, Ranking, Score, TargetDraft, TargetId,
    WeightChange,
};

#[derive(Args, Debug, Default)]
pub(crate) struct RankArgs {
    /// Session-only weight override, e.g. `--weight liability=30` (repeatable)
    #[arg(long = "weight", value_name = "CRITERION=POINTS", value_parser = parse_assignment)]
    pub(crate) weights: Vec<Assignment>,
    /// Emit CSV instead of the text table
    #[arg(long)]
    pub(crate) csv: bool,
}

#[derive(Args, Debug)]
pub(crate) struct AddTargetArgs {
    /// Target name (required, non-blank)
    #[arg(long)]
    pub(crate) name: String,
    /// Category label, e.g. Security, Telecom, Finance/Installment
    #[arg(long)]
    pub(crate) category: Option<String>,
    /// Free-text analyst notes
    #[arg(long)]
    pub(crate) notes: Option<String>,
    /// Initial score, e.g. `--score liability=8` (repeatable)
    #[arg(long = "score", value_name = "CRITERION=SCORE", value_parser = parse_assignment, allow_hyphen_values = true)]
    pub(crate) scores: Vec<Assignment>,
    /// Citation for a criterion, e.g. `--source liability="Dealer agreement § 4"`
    #[arg(long = "source", value_name = "CRITERION=TEXT", value_parser = parse_assignment)]
    pub(crate) sources: Vec<Assignment>,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Target id
    pub(crate) target_id: i64,
    /// Criterion id, e.g. liability
    pub(crate) criterion_id: String,
    /// New score; blank clears it, out-of-range values are clamped into 1-10
    #[arg(allow_hyphen_values = true, default_value = "")]
    pub(crate) value: String,
}

#[derive(Args, Debug)]
pub(crate) struct DeleteTargetArgs {
    /// Target id
    pub(crate) target_id: i64,
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let mut session = start_session(&AppConfig::load()?)?;

    for assignment in &args.weights {
        let change = session.set_weight(&assignment.criterion_id, assignment.value.as_str());
        match change {
            WeightChange::UnknownCriterion => {
                eprintln!("ignoring unknown criterion '{}'", assignment.criterion_id)
            }
            WeightChange::Rejected => eprintln!(
                "ignoring non-numeric weight '{}' for {}",
                assignment.value, assignment.criterion_id
            ),
            WeightChange::Locked => {
                eprintln!("weights are locked; ignoring override for {}", assignment.criterion_id)
            }
            WeightChange::Updated { .. } | WeightChange::Unchanged | WeightChange::Reset => {}
        }
    }

    let ranking = session.ranking();
    if args.csv {
        write_rankings_csv(io::stdout().lock(), &ranking.targets)?;
    } else {
        render_ranking(&ranking, session.load_source());
    }
    Ok(())
}

pub(crate) fn run_criteria() -> Result<(), AppError> {
    println!("Scoring criteria");
    for criterion in criteria() {
        println!(
            "\n{} [{}] default weight {}",
            criterion.label, criterion.id, criterion.default_weight
        );
        println!("  {}", criterion.description);
        for band in criterion.bands_descending() {
            println!("  {:>5}  {}", band.range, band.description);
        }
    }
    Ok(())
}

pub(crate) fn run_add_target(args: AddTargetArgs) -> Result<(), AppError> {
    let AddTargetArgs {
        name,
        category,
        notes,
        scores,
        sources,
    } = args;

    let mut draft = TargetDraft::named(name);
    if let Some(category) = category {
        draft = draft.category(category);
    }
    if let Some(notes) = notes {
        draft = draft.notes(notes);
    }
    for assignment in scores {
        draft = draft.score(assignment.criterion_id, assignment.value.as_str());
    }
    for assignment in sources {
        draft = draft.source(assignment.criterion_id, assignment.value);
    }

    let mut session = start_session(&AppConfig::load()?)?;
    let created = session.add_target(draft)?;
    println!(
        "Added target {} ({}) with {} of {} criteria scored",
        created.id,
        created.name,
        created.scored_count(),
        criteria().len()
    );
    Ok(())
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let mut session = start_session(&AppConfig::load()?)?;
    let target_id = TargetId(args.target_id);

    let updated = session.update_score(target_id, &args.criterion_id, args.value.as_str());
    match (updated, find_criterion(&args.criterion_id)) {
        (Some(target), Some(criterion)) => println!(
            "{}: {}",
            target.name,
            describe_score(criterion, target.score(criterion.id))
        ),
        _ => println!(
            "No target {} or criterion '{}'; nothing changed",
            target_id, args.criterion_id
        ),
    }
    Ok(())
}

pub(crate) fn run_delete_target(args: DeleteTargetArgs) -> Result<(), AppError> {
    let mut session = start_session(&AppConfig::load()?)?;
    let target_id = TargetId(args.target_id);

    if session.delete_target(target_id) {
        println!("Deleted target {target_id}");
    } else {
        println!("No target {target_id}; nothing changed");
    }
    Ok(())
}

pub(crate) fn run_reset() -> Result<(), AppError> {
    let mut session = start_session(&AppConfig::load()?)?;
    session.reset_all();
    println!("Restored {} seed targets", session.targets().len());
    Ok(())
}

fn render_ranking(ranking: &Ranking, source: LoadSource) {
    println!("Target scoring matrix");
    match source {
        LoadSource::Stored | LoadSource::Legacy => println!("Data source: stored targets"),
        LoadSource::SeedMissing => println!("Data source: seed dataset (nothing stored yet)"),
        LoadSource::SeedCorrupt => {
            println!("Data source: seed dataset (stored targets were unreadable)")
        }
        LoadSource::SeedUnavailable => {
            println!("Data source: seed dataset (storage unavailable)")
        }
    }

    match &ranking.weights.message {
        Some(message) => println!("Weight total: {} (warning: {message})", ranking.weights.total),
        None => println!("Weight total: {}", ranking.weights.total),
    }

    if ranking.targets.is_empty() {
        println!("\nNo targets stored");
        return;
    }

    println!("\nRank  Score  Base   Scored  Tier      Target");
    for entry in &ranking.targets {
        let partial = if entry.is_unscored() {
            " (unscored)"
        } else if entry.scored_count < criteria().len() {
            " (partial)"
        } else {
            ""
        };
        println!(
            "{:>4}  {:>5.1}  {:>5.1}  {:>2}/{:<3}  {:<8}  {} [{}] #{}{}",
            entry.rank,
            entry.weighted_score,
            entry.baseline_score,
            entry.scored_count,
            criteria().len(),
            entry.tier.label(),
            entry.target.name,
            entry.target.category,
            entry.target.id,
            partial
        );
    }
}

fn describe_score(criterion: &Criterion, score: Score) -> String {
    match (score.value(), score.grade()) {
        (Some(value), Some(grade)) => match criterion.band_for(value) {
            Some(band) => format!(
                "{} = {} ({}; {}: {})",
                criterion.label,
                value,
                grade.label(),
                band.range,
                band.description
            ),
            None => format!("{} = {} ({})", criterion.label, value, grade.label()),
        },
        _ => format!("{} cleared", criterion.label),
    }
}
