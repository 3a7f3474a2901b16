//! Vision label filtering types.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionFilterRequest {
    pub raw_labels: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionFilterResponse {
    pub filtered_ingredients: Vec<String>,
}

/// Parse the model's comma-separated ingredient list.
pub fn parse_label_list(reply: &str) -> Vec<String> {
    reply
        .split([',', '\n'])
        .map(|item| item.trim().trim_end_matches('.').trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_item() {
        assert_eq!(parse_label_list("tomato"), vec!["tomato"]);
    }

    #[test]
    fn test_list_with_blanks() {
        assert_eq!(
            parse_label_list(" tomato, , onion ,\nbasil."),
            vec!["tomato", "onion", "basil"]
        );
    }

    #[test]
    fn test_empty_reply() {
        assert!(parse_label_list("  ").is_empty());
    }

    #[test]
    fn test_wire_names() {
        let req: VisionFilterRequest = serde_json::from_str(r#"{"rawLabels":["a"]}"#).unwrap();
        assert_eq!(req.raw_labels, vec!["a"]);
        let resp = VisionFilterResponse {
            filtered_ingredients: vec!["a".into()],
        };
        assert_eq!(
            serde_json::to_string(&resp).unwrap(),
            r#"{"filteredIngredients":["a"]}"#
        );
    }
}
