//! Vote tallying and the aggregate estimate.
//!
//! A reveal groups the counted cards into [`ScoreCard`]s (one per distinct
//! token) and averages the tokens that read as numbers. Tokens such as `"?"`
//! or `"coffee"` are tallied but never averaged.

use serde::{Deserialize, Serialize};

/// One distinct vote token and how many participants chose it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub token: String,
    pub count: u32,
}

/// Aggregate produced by revealing the cards of a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealResult {
    /// Weighted mean of the numeric tokens; `None` when nobody voted a number.
    pub average: Option<f64>,
    pub score_cards: Vec<ScoreCard>,
}

impl RevealResult {
    /// Tallies the given tokens and computes their numeric average.
    pub fn from_votes<'a>(votes: impl IntoIterator<Item = &'a str>) -> Self {
        let score_cards = tally(votes);
        let average = average(&score_cards);
        Self {
            average,
            score_cards,
        }
    }

    /// Total number of votes counted.
    pub fn vote_count(&self) -> u32 {
        self.score_cards.iter().map(|card| card.count).sum()
    }
}

/// Groups tokens into score cards, keeping first-seen order.
pub fn tally<'a>(votes: impl IntoIterator<Item = &'a str>) -> Vec<ScoreCard> {
    let mut cards: Vec<ScoreCard> = Vec::new();
    for token in votes {
        match cards.iter_mut().find(|card| card.token == token) {
            Some(card) => card.count += 1,
            None => cards.push(ScoreCard {
                token: token.to_string(),
                count: 1,
            }),
        }
    }
    cards
}

/// Weighted mean over the cards whose token is a finite number.
pub fn average(cards: &[ScoreCard]) -> Option<f64> {
    let (sum, count) = cards
        .iter()
        .filter_map(|card| numeric_value(&card.token).map(|value| (value, card.count)))
        .fold((0.0_f64, 0_u32), |(sum, count), (value, n)| {
            (sum + value * f64::from(n), count + n)
        });

    if count == 0 {
        None
    } else {
        Some(sum / f64::from(count))
    }
}

/// Parses a token as a finite number. `"inf"` and `"NaN"` are not estimates.
pub fn numeric_value(token: &str) -> Option<f64> {
    token
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
