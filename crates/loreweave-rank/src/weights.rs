//! Ranking weight configuration.
//!
//! Weights are external configuration — the ranker never learns or adapts
//! them. Each weight multiplies one normalized metric in the final linear
//! sum. Non-finite or negative values are clamped to zero by
//! [`RankWeights::sanitized`] rather than propagating `NaN` or negative
//! scores.

use serde::{Deserialize, Serialize};

/// Per-metric weights for the importance score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RankWeights {
    /// Weight for BFS hierarchy depth from the root.
    pub hierarchy: f64,
    /// Weight for in-degree.
    pub in_degree: f64,
    /// Weight for PageRank.
    pub pagerank: f64,
    /// Weight for betweenness centrality.
    pub betweenness: f64,
    /// Weight for out-degree.
    pub out_degree: f64,
    /// Weight for total degree.
    pub total_degree: f64,
    /// Weight for folder depth of `group_path`.
    pub folder_depth: f64,
}

impl Default for RankWeights {
    fn default() -> Self {
        Self {
            hierarchy: 30.0,
            in_degree: 20.0,
            pagerank: 25.0,
            betweenness: 15.0,
            out_degree: 5.0,
            total_degree: 5.0,
            folder_depth: 10.0,
        }
    }
}

impl RankWeights {
    /// Return a copy with every non-finite or negative weight clamped to 0.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        Self {
            hierarchy: clamp_weight(self.hierarchy),
            in_degree: clamp_weight(self.in_degree),
            pagerank: clamp_weight(self.pagerank),
            betweenness: clamp_weight(self.betweenness),
            out_degree: clamp_weight(self.out_degree),
            total_degree: clamp_weight(self.total_degree),
            folder_depth: clamp_weight(self.folder_depth),
        }
    }
}

fn clamp_weight(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_are_finite_and_positive() {
        let weights = RankWeights::default();
        assert_eq!(weights, weights.sanitized());
    }

    #[test]
    fn sanitized_clamps_negative_to_zero() {
        let weights = RankWeights {
            hierarchy: -5.0,
            ..RankWeights::default()
        };
        assert_eq!(weights.sanitized().hierarchy, 0.0);
    }

    #[test]
    fn sanitized_clamps_non_finite_to_zero() {
        let weights = RankWeights {
            pagerank: f64::NAN,
            betweenness: f64::INFINITY,
            ..RankWeights::default()
        };
        let clean = weights.sanitized();
        assert_eq!(clean.pagerank, 0.0);
        assert_eq!(clean.betweenness, 0.0);
    }

    #[test]
    fn serde_round_trip() {
        let weights = RankWeights::default();
        let json = serde_json::to_string(&weights).unwrap();
        let back: RankWeights = serde_json::from_str(&json).unwrap();
        assert_eq!(weights, back);
    }

    #[test]
    fn serde_fills_missing_fields_from_default() {
        let weights: RankWeights = serde_json::from_str(r#"{"hierarchy": 1.5}"#).unwrap();
        assert_eq!(weights.hierarchy, 1.5);
        assert_eq!(weights.pagerank, RankWeights::default().pagerank);
    }
}
