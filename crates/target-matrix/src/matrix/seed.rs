use std::collections::BTreeMap;

use super::catalog::criteria;
use super::score::Score;
use super::target::{Target, TargetId, FINANCE_INSTALLMENT, SECURITY, TELECOM};

struct SeedRow {
    id: i64,
    name: &'static str,
    category: &'static str,
    notes: &'static str,
    /// Scores in catalog order.
    scores: [u8; 8],
}

const SEED_ROWS: [SeedRow; 12] = [
    SeedRow {
        id: 1,
        name: "CPI Security Systems",
        category: SECURITY,
        notes: "Charlotte-based; AAA/FAA/NC law; no damages cap; no threshold brief required; cleanest vehicle in portfolio.",
        scores: [10, 5, 6, 10, 7, 7, 9, 6],
    },
    SeedRow {
        id: 2,
        name: "ADT Security Services",
        category: SECURITY,
        notes: "ADT pays all AAA fees; $500 contractual cap and 1-year limitation clause require preemption brief; 40–50% dealer account screening burden.",
        scores: [9, 6, 5, 7, 9, 7, 4, 8],
    },
    SeedRow {
        id: 3,
        name: "AT&T Fiber (BellSouth)",
        category: TELECOM,
        notes: "Best arb terms of any target: AT&T pays all AAA fees <$75K; $10K minimum award if claimant wins; double attorneys' fees; 60-day pre-notice required; goods brief gates intake.",
        scores: [8, 6, 9, 10, 10, 8, 6, 9],
    },
    SeedRow {
        id: 4,
        name: "Spectrum (Charter Communications)",
        category: TELECOM,
        notes: "Largest NC subscriber base (~1.4M–2.0M); Manhattan venue clause requires challenge; each party pays own AAA fees; goods brief required.",
        scores: [8, 10, 5, 6, 9, 5, 6, 8],
    },
    SeedRow {
        id: 5,
        name: "Xfinity (Comcast)",
        category: TELECOM,
        notes: "Comcast pays all AAA fees <$75K; clean venue; 30-day pre-notice; goods brief required; 900K–1.4M NC accounts.",
        scores: [8, 8, 5, 8, 10, 7, 6, 9],
    },
    SeedRow {
        id: 6,
        name: "Vivint Smart Home",
        category: SECURITY,
        notes: "Strong liability; 60-month contracts = highest per-claimant contract value; BUT: ASI arbitration (not AAA), FAA excluded/Utah law governs, $2K damages cap — do not file without ASI review and Utah law opinion.",
        scores: [9, 5, 7, 4, 7, 3, 5, 6],
    },
    SeedRow {
        id: 7,
        name: "Brinks Home Security",
        category: SECURITY,
        notes: "Referral program confirmed active. Smaller NC footprint than ADT/CPI. AAA/FAA clause. Monitoring + equipment sale structure mirrors CPI/ADT liability theory.",
        scores: [8, 4, 5, 7, 7, 7, 7, 6],
    },
    SeedRow {
        id: 8,
        name: "Security Finance Corp.",
        category: FINANCE_INSTALLMENT,
        notes: "Possible § 25A-37 extension to personal installment loan + referral; threshold brief needed on whether loan is 'sale of services'; smaller per-claimant value; regional footprint.",
        scores: [5, 4, 3, 5, 6, 5, 6, 4],
    },
    SeedRow {
        id: 9,
        name: "Ring (Amazon) Home Security",
        category: SECURITY,
        notes: "Amazon subsidiary; large NC user base; referral program pays Amazon gift cards contingent on new subscriber activation. Equipment (cameras, doorbells) clearly constitutes tangible goods. AAA consumer arbitration. High brand/reputational sensitivity.",
        scores: [8, 7, 4, 7, 10, 7, 7, 9],
    },
    SeedRow {
        id: 10,
        name: "SimpliSafe Home Security",
        category: SECURITY,
        notes: "Direct-to-consumer model; equipment purchased outright by customer (clean goods argument); referral rewards paid via Amazon gift card contingent on new subscription. AAA consumer rules. Mid-size NC footprint; strong goods basis.",
        scores: [9, 4, 5, 7, 7, 7, 8, 6],
    },
    SeedRow {
        id: 11,
        name: "T-Mobile Home Internet",
        category: TELECOM,
        notes: "Fixed wireless internet; provides physical gateway device (purchased or leased); referral rewards paid as statement credits contingent on activation. FAA/AAA. Large NC fixed wireless footprint growing rapidly.",
        scores: [7, 7, 4, 7, 10, 7, 6, 8],
    },
    SeedRow {
        id: 12,
        name: "Verizon Fios / Home Internet",
        category: TELECOM,
        notes: "Limited NC Fios footprint (minimal fiber build-out in NC); Verizon 5G Home Internet growing. Referral rewards paid as prepaid cards contingent on activation. Goods argument requires brief. Smaller NC universe than Spectrum/Comcast.",
        scores: [7, 4, 5, 7, 10, 7, 6, 8],
    },
];

/// The fixed demo/recovery dataset used by reset and by the load fallback.
pub fn seed_targets() -> Vec<Target> {
    SEED_ROWS.iter().map(SeedRow::to_target).collect()
}

impl SeedRow {
    fn to_target(&self) -> Target {
        let scores: BTreeMap<String, Score> = criteria()
            .iter()
            .zip(self.scores)
            .map(|(criterion, score)| (criterion.id.to_string(), Score::Set(score)))
            .collect();

        Target {
            id: TargetId(self.id),
            name: self.name.to_string(),
            category: self.category.to_string(),
            notes: self.notes.to_string(),
            scores,
            sources: BTreeMap::new(),
        }
    }
}
