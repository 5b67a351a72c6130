use serde::{Deserialize, Serialize};

use super::input::RawInput;

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 10;

/// Rating for one criterion. `Unset` contributes nothing to a weighted score and is distinct
/// from a score of 1.
///
/// Serialized as a bare number or `null`. Older blobs that stored `""` for an unrated
/// criterion, or numbers outside 1-10, are normalised on the way in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "Option<u8>", from = "StoredScore")]
pub enum Score {
    Set(u8),
    #[default]
    Unset,
}

impl Score {
    /// Clamps a numeric rating into 1-10. Non-finite input yields `Unset`.
    pub fn clamped(value: f64) -> Self {
        match RawInput::from(value).clamp_to(MIN_SCORE, MAX_SCORE) {
            Some(score) => Self::Set(score),
            None => Self::Unset,
        }
    }

    /// Applies analyst input on top of the current value: blank un-sets, numbers clamp, and
    /// anything else keeps the current value.
    pub fn apply(self, input: RawInput) -> Self {
        match input {
            RawInput::Blank => Self::Unset,
            RawInput::Number(_) => match input.clamp_to(MIN_SCORE, MAX_SCORE) {
                Some(score) => Self::Set(score),
                None => self,
            },
            RawInput::Invalid => self,
        }
    }

    pub fn value(self) -> Option<u8> {
        match self {
            Self::Set(score) => Some(score),
            Self::Unset => None,
        }
    }

    pub fn is_set(self) -> bool {
        matches!(self, Self::Set(_))
    }

    pub fn grade(self) -> Option<ScoreGrade> {
        self.value().map(ScoreGrade::of)
    }
}

impl From<Score> for Option<u8> {
    fn from(score: Score) -> Self {
        score.value()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredScore {
    Number(f64),
    Text(String),
    Missing(Option<()>),
}

impl From<StoredScore> for Score {
    fn from(stored: StoredScore) -> Self {
        let input = match stored {
            StoredScore::Number(value) => RawInput::from(value),
            StoredScore::Text(text) => RawInput::parse(&text),
            StoredScore::Missing(_) => RawInput::Blank,
        };
        Score::Unset.apply(input)
    }
}

/// Presentation grade for a single criterion score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreGrade {
    Strong,
    Moderate,
    Weak,
    Poor,
}

impl ScoreGrade {
    pub fn of(score: u8) -> Self {
        match score {
            8.. => Self::Strong,
            6..=7 => Self::Moderate,
            4..=5 => Self::Weak,
            _ => Self::Poor,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Strong => "Strong",
            Self::Moderate => "Moderate",
            Self::Weak => "Weak",
            Self::Poor => "Poor",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_input_is_clamped() {
        assert_eq!(Score::Unset.apply(RawInput::Number(15.0)), Score::Set(10));
        assert_eq!(Score::Unset.apply(RawInput::Number(-3.0)), Score::Set(1));
        assert_eq!(Score::clamped(0.0), Score::Set(1));
        assert_eq!(Score::clamped(f64::NAN), Score::Unset);
    }

    #[test]
    fn blank_unsets_and_invalid_keeps_current() {
        assert_eq!(Score::Set(7).apply(RawInput::Blank), Score::Unset);
        assert_eq!(Score::Set(7).apply(RawInput::Invalid), Score::Set(7));
        assert_eq!(Score::Unset.apply(RawInput::Invalid), Score::Unset);
    }

    #[test]
    fn serializes_as_number_or_null() {
        let encoded = serde_json::to_string(&vec![Score::Set(4), Score::Unset]).expect("encodes");
        assert_eq!(encoded, "[4,null]");
    }

    #[test]
    fn deserializes_legacy_shapes() {
        let decoded: Vec<Score> =
            serde_json::from_str(r#"[7, null, "", "9", 42, -1, 6.6, "n/a"]"#).expect("decodes");
        assert_eq!(
            decoded,
            vec![
                Score::Set(7),
                Score::Unset,
                Score::Unset,
                Score::Set(9),
                Score::Set(10),
                Score::Set(1),
                Score::Set(7),
                Score::Unset,
            ]
        );
    }

    #[test]
    fn grades_follow_rubric_thresholds() {
        assert_eq!(ScoreGrade::of(10), ScoreGrade::Strong);
        assert_eq!(ScoreGrade::of(8), ScoreGrade::Strong);
        assert_eq!(ScoreGrade::of(6), ScoreGrade::Moderate);
        assert_eq!(ScoreGrade::of(4), ScoreGrade::Weak);
        assert_eq!(ScoreGrade::of(3), ScoreGrade::Poor);
        assert_eq!(Score::Unset.grade(), None);
    }
}
