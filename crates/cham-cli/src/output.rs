// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Result formatting.

use cham_core::{IntTuple, Multiset};
use serde_json::{json, Value};

/// How final solutions are printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// `{1, 2, [3, 4]}` in ascending tuple order.
    #[default]
    Text,
    /// `{"cardinality": 3, "elements": [[1], [2], [3, 4]]}`.
    Json,
}

impl Format {
    /// Renders `solution` in this format.
    pub fn multiset(self, solution: &Multiset) -> String {
        match self {
            Self::Text => solution.to_string(),
            Self::Json => to_json(solution).to_string(),
        }
    }
}

/// JSON view of a solution; elements are sorted and repeated by multiplicity.
pub fn to_json(solution: &Multiset) -> Value {
    let sorted = solution.sorted();
    let elements: Vec<&[i64]> = sorted.iter().map(IntTuple::as_slice).collect();
    json!({
        "cardinality": solution.cardinality(),
        "elements": elements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Multiset {
        [
            IntTuple::new(&[3, 4]),
            IntTuple::scalar(2),
            IntTuple::scalar(1),
            IntTuple::scalar(2),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn text_is_sorted_braces() {
        assert_eq!(Format::Text.multiset(&sample()), "{1, 2, 2, [3, 4]}");
        assert_eq!(Format::Text.multiset(&Multiset::new()), "{}");
    }

    #[test]
    fn json_lists_every_element() {
        assert_eq!(
            Format::Json.multiset(&sample()),
            r#"{"cardinality":4,"elements":[[1],[2],[2],[3,4]]}"#
        );
    }
}
