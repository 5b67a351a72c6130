//! The fixed rubric every target is scored against.
//!
//! Criterion ids are stable string keys; targets reference them by id and the set never
//! changes for the lifetime of the process. Default weights sum to 100 points.

use serde::Serialize;

/// One labeled band of a criterion's 1-10 scoring rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoringBand {
    pub range: &'static str,
    #[serde(skip)]
    pub low: u8,
    #[serde(skip)]
    pub high: u8,
    pub description: &'static str,
}

impl ScoringBand {
    pub fn contains(&self, score: u8) -> bool {
        (self.low..=self.high).contains(&score)
    }
}

/// A scoring dimension. The weight stored here is only the default; analyst edits live in
/// [`super::WeightConfiguration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Criterion {
    pub id: &'static str,
    pub label: &'static str,
    pub default_weight: u8,
    pub description: &'static str,
    pub scoring_guide: [ScoringBand; 5],
}

impl Criterion {
    /// Rubric bands in presentation order (highest range first).
    pub fn bands_descending(&self) -> impl Iterator<Item = &ScoringBand> {
        let mut bands: Vec<&ScoringBand> = self.scoring_guide.iter().collect();
        bands.sort_by(|a, b| b.high.cmp(&a.high));
        bands.into_iter()
    }

    /// The band describing `score`, if the score is on the 1-10 scale.
    pub fn band_for(&self, score: u8) -> Option<&ScoringBand> {
        self.scoring_guide.iter().find(|band| band.contains(score))
    }
}

const fn band(range: &'static str, low: u8, high: u8, description: &'static str) -> ScoringBand {
    ScoringBand {
        range,
        low,
        high,
        description,
    }
}

static CRITERIA: [Criterion; 8] = [
    Criterion {
        id: "liability",
        label: "Statutory Liability Strength",
        default_weight: 25,
        description: "Clarity that the referral program satisfies all three § 25A-37 elements; availability of controlling NC authority; absence of threshold legal hurdles (goods brief, preemption, choice-of-law).",
        scoring_guide: [
            band("9–10", 9, 10, "All three elements facially satisfied; no threshold brief required; controlling NC authority favorable."),
            band("7–8", 7, 8, "Strong liability but one threshold issue (e.g., goods-component brief) must be cleared before filing."),
            band("5–6", 5, 6, "Viable claim but meaningful legal uncertainty or choice-of-law risk."),
            band("3–4", 3, 4, "Significant threshold hurdle (e.g., adverse damages cap; conflicting authority)."),
            band("1–2", 1, 2, "Speculative; major doctrinal obstacles."),
        ],
    },
    Criterion {
        id: "claimants",
        label: "NC Claimant Universe Size",
        default_weight: 20,
        description: "Estimated number of eligible NC residential consumers within the 3-year § 1-52(1) lookback period.",
        scoring_guide: [
            band("9–10", 9, 10, ">1 million NC accounts."),
            band("7–8", 7, 8, "250K–1 million NC accounts."),
            band("5–6", 5, 6, "50K–250K NC accounts."),
            band("3–4", 3, 4, "10K–50K NC accounts."),
            band("1–2", 1, 2, "<10K NC accounts."),
        ],
    },
    Criterion {
        id: "perClaimant",
        label: "Per-Claimant Recovery Value",
        default_weight: 15,
        description: "Expected gross rescission/recovery per claimant under the statute before contingency fee, based on aggregate contract payments within the lookback period.",
        scoring_guide: [
            band("9–10", 9, 10, ">$5,000 per claimant (premium services; long-term contracts)."),
            band("7–8", 7, 8, "$2,000–$5,000 per claimant."),
            band("5–6", 5, 6, "$800–$2,000 per claimant."),
            band("3–4", 3, 4, "$300–$800 per claimant."),
            band("1–2", 1, 2, "<$300 per claimant."),
        ],
    },
    Criterion {
        id: "arbProcedure",
        label: "Arbitration / Procedural Favorability",
        default_weight: 15,
        description: "Quality of the arbitration clause from the claimant's side: administrator, fee allocation, venue, mass arbitration mechanics, minimum award provisions, pre-notice period length.",
        scoring_guide: [
            band("9–10", 9, 10, "AAA/FAA; defendant pays all fees; $10K+ minimum award; claimant-county venue; accepts mass filings."),
            band("7–8", 7, 8, "AAA/FAA; defendant pays fees <$75K; clean venue; standard mass arb rules."),
            band("5–6", 5, 6, "AAA/FAA; each party pays own fees; no minimum award; manageable venue."),
            band("3–4", 3, 4, "Non-AAA administrator or adverse venue; procedural obstacles."),
            band("1–2", 1, 2, "Litigation required (no arb clause) or highly unfavorable arbitration terms."),
        ],
    },
    Criterion {
        id: "solvency",
        label: "Defendant Solvency & Collectibility",
        default_weight: 10,
        description: "Likelihood the defendant can satisfy a mass arbitration award or judgment.",
        scoring_guide: [
            band("9–10", 9, 10, "S&P 500 / Fortune 500 public company; investment-grade; $1B+ annual revenue."),
            band("7–8", 7, 8, "Large private or mid-cap public company; clearly solvent; substantial assets."),
            band("5–6", 5, 6, "Solvent but more modest balance sheet; regional or specialty company."),
            band("3–4", 3, 4, "Privately held; limited financial transparency; uncertain liquidity."),
            band("1–2", 1, 2, "Financially distressed; insolvency risk; limited collectibility."),
        ],
    },
    Criterion {
        id: "classVsArb",
        label: "Class Action vs. Mass Arbitration Feasibility",
        default_weight: 8,
        description: "Whether the dispute is best pursued as a class action or as mass arbitration, and how much leverage that path offers.",
        scoring_guide: [
            band("9–10", 9, 10, "No valid arb clause or AAA registry failure; class action available; maximum leverage."),
            band("7–8", 7, 8, "Mass arb with favorable economics (defendant pays fees; high per-claimant value)."),
            band("5–6", 5, 6, "Mass arb with neutral economics (each party pays own fees; moderate per-claimant value)."),
            band("3–4", 3, 4, "Mass arb with defendant-favorable terms; high procedural friction."),
            band("1–2", 1, 2, "Forced individual arbitration in unfavorable forum; no class leverage."),
        ],
    },
    Criterion {
        id: "diligenceBurden",
        label: "Intake & Diligence Burden (Inverse)",
        default_weight: 4,
        description: "Ease of intake screening, client identification, and pre-filing diligence. Scored inversely: a high score means a low burden.",
        scoring_guide: [
            band("9–10", 9, 10, "Single contract type; all accounts eligible; no dealer/sub-entity screening required."),
            band("7–8", 7, 8, "Minor screening (e.g., within-3-year date check); no complex sub-entity issues."),
            band("5–6", 5, 6, "Moderate burden: equipment purchase vs. lease screening; geographic eligibility check."),
            band("3–4", 3, 4, "Heavy screening: dealer vs. direct accounts; prior settlement exclusions; corporate family questions."),
            band("1–2", 1, 2, "Extreme complexity: foreign sub-entity law; individual inducement proof required; massive screening burden."),
        ],
    },
    Criterion {
        id: "settlementPressure",
        label: "Settlement Pressure on Defendant",
        default_weight: 3,
        description: "Reputational, regulatory, and financial pressure points that push the defendant toward an early settlement.",
        scoring_guide: [
            band("9–10", 9, 10, "High-profile consumer brand; SEC disclosure obligations; active state regulatory oversight; reputational vulnerability."),
            band("7–8", 7, 8, "Known consumer brand; some regulatory exposure; moderate press sensitivity."),
            band("5–6", 5, 6, "B2C but lower profile; limited regulatory pressure."),
            band("3–4", 3, 4, "Mostly B2B or low-profile brand; limited reputational leverage."),
            band("1–2", 1, 2, "No reputational leverage; private entity with no public profile."),
        ],
    },
];

/// Every criterion, in rubric order.
pub fn criteria() -> &'static [Criterion] {
    &CRITERIA
}

pub fn find_criterion(id: &str) -> Option<&'static Criterion> {
    CRITERIA.iter().find(|criterion| criterion.id == id)
}

pub fn is_known_criterion(id: &str) -> bool {
    find_criterion(id).is_some()
}
