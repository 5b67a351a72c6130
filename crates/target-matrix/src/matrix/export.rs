use std::io::Write;

use super::catalog::criteria;
use super::ranking::RankedTarget;

const FIXED_COLUMNS: [&str; 7] = [
    "rank",
    "name",
    "category",
    "weighted_score",
    "baseline_score",
    "scored_count",
    "tier",
];

/// Writes one CSV row per ranked target, followed by one column per criterion. Unset scores
/// are written as empty cells.
pub fn write_rankings_csv<W: Write>(writer: W, ranked: &[RankedTarget]) -> Result<(), csv::Error> {
    let mut csv = csv::Writer::from_writer(writer);

    let header = FIXED_COLUMNS
        .iter()
        .copied()
        .chain(criteria().iter().map(|criterion| criterion.id));
    csv.write_record(header)?;

    for entry in ranked {
        let mut row = vec![
            entry.rank.to_string(),
            entry.target.name.clone(),
            entry.target.category.clone(),
            format!("{:.1}", entry.weighted_score),
            format!("{:.1}", entry.baseline_score),
            entry.scored_count.to_string(),
            entry.tier.label().to_string(),
        ];
        row.extend(criteria().iter().map(|criterion| {
            entry
                .target
                .score(criterion.id)
                .value()
                .map(|score| score.to_string())
                .unwrap_or_default()
        }));
        csv.write_record(&row)?;
    }

    csv.flush()?;
    Ok(())
}

pub fn rankings_csv(ranked: &[RankedTarget]) -> Result<String, csv::Error> {
    let mut buffer = Vec::new();
    write_rankings_csv(&mut buffer, ranked)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
