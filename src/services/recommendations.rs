//! Rule based oil and care tip recommendations.
//!
//! Maps a predicted hair type plus the user's dandruff level and hair loss
//! stage to a short list of catalog oils and care tips. Every input has a
//! fall-through branch, so both entry points are total over arbitrary strings.
//!
//! Hair type and dandruff level match case-insensitively while the hair loss
//! stage matches the exact literal ("Stage 3", not "stage 3"). The asymmetry
//! is long standing client behavior and is kept as-is; callers holding a
//! [`HairLossStage`](crate::models::HairLossStage) should pass `as_str()`.

use crate::models::{Analysis, HairTip, OilRecommendation, UserSelections};

/// Maximum number of oils returned by [`get_recommendations`]
pub const MAX_RECOMMENDATIONS: usize = 3;

/// Maximum number of tips returned by [`get_tips`]
pub const MAX_TIPS: usize = 4;

const DEFAULT_PRICE: &str = "₹299";

static CATALOG: [OilRecommendation; 5] = [
    OilRecommendation {
        key: "moroccanoil",
        name: "Moroccanoil",
        description: "Premium argan oil for all hair types",
        price: DEFAULT_PRICE,
    },
    OilRecommendation {
        key: "indulekha",
        name: "Indulekha Bringha Oil",
        description: "Ayurvedic blend for hair growth",
        price: DEFAULT_PRICE,
    },
    OilRecommendation {
        key: "rosemary",
        name: "Rosemary Hair Oil",
        description: "Natural stimulant for hair follicles",
        price: DEFAULT_PRICE,
    },
    OilRecommendation {
        key: "jojoba",
        name: "Jojoba Oil",
        description: "Lightweight moisturizer for scalp",
        price: DEFAULT_PRICE,
    },
    OilRecommendation {
        key: "thrive",
        name: "Thrive Frizz Free Oil",
        description: "Anti-frizz formula for smooth hair",
        price: DEFAULT_PRICE,
    },
];

/// Keys used to top up short recommendation sets
const PADDING_KEYS: [&str; 3] = ["moroccanoil", "indulekha", "rosemary"];

/// Returns the full oil catalog
pub fn catalog() -> &'static [OilRecommendation] {
    &CATALOG
}

/// Looks up a catalog entry by its key
pub fn lookup(key: &str) -> Option<&'static OilRecommendation> {
    CATALOG.iter().find(|oil| oil.key == key)
}

/// Insertion ordered set of catalog keys
#[derive(Debug, Default)]
struct KeySet(Vec<&'static str>);

impl KeySet {
    fn extend(&mut self, keys: &[&'static str]) {
        for key in keys {
            if !self.0.contains(key) {
                self.0.push(key);
            }
        }
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

fn hair_type_oils(hair_type: &str) -> &'static [&'static str] {
    match hair_type.to_lowercase().as_str() {
        "wavy" | "curly" => &["thrive", "jojoba"],
        "straight" => &["moroccanoil", "jojoba"],
        // "dry" and anything unrecognized
        _ => &["moroccanoil", "jojoba"],
    }
}

fn dandruff_oils(dandruff_level: &str) -> &'static [&'static str] {
    match dandruff_level.to_lowercase().as_str() {
        "high" => &["rosemary", "jojoba"],
        "mid" => &["rosemary"],
        _ => &[],
    }
}

// NOTE: exact match, see module docs
fn hair_loss_oils(hair_loss_stage: &str) -> &'static [&'static str] {
    match hair_loss_stage {
        "Stage 3" | "Stage 4" => &["indulekha", "rosemary"],
        "Stage 2" => &["indulekha"],
        _ => &[],
    }
}

/// Recommends up to three distinct oils from the catalog.
///
/// Rules run in a fixed order (hair type, dandruff, hair loss) and accumulate
/// into a deduplicated key set. A set with fewer than three keys is padded
/// before being cut to [`MAX_RECOMMENDATIONS`]. Keys missing from the catalog
/// are dropped silently.
pub fn get_recommendations(
    hair_type: &str,
    dandruff_level: &str,
    hair_loss_stage: &str,
) -> Vec<OilRecommendation> {
    let mut keys = KeySet::default();
    keys.extend(hair_type_oils(hair_type));
    keys.extend(dandruff_oils(dandruff_level));
    keys.extend(hair_loss_oils(hair_loss_stage));

    if keys.len() < MAX_RECOMMENDATIONS {
        keys.extend(&PADDING_KEYS);
    }

    keys.0
        .into_iter()
        .take(MAX_RECOMMENDATIONS)
        .filter_map(lookup)
        .copied()
        .collect()
}

fn hair_type_tips(hair_type: &str) -> [HairTip; 2] {
    match hair_type.to_lowercase().as_str() {
        "wavy" | "curly" => [
            HairTip::new(
                "Gentle Cleansing",
                "Use sulfate-free shampoo to maintain natural oils",
            ),
            HairTip::new(
                "Moisture Lock",
                "Apply leave-in conditioner while hair is damp",
            ),
        ],
        "straight" => [
            HairTip::new("Volume Boost", "Use volumizing products at the roots"),
            HairTip::new(
                "Heat Protection",
                "Always use heat protectant before styling",
            ),
        ],
        _ => [
            HairTip::new("Regular Oiling", "Massage scalp with oil 2-3 times per week"),
            HairTip::new("Gentle Handling", "Avoid harsh brushing when hair is wet"),
        ],
    }
}

fn dandruff_tip(dandruff_level: &str) -> Option<HairTip> {
    match dandruff_level.to_lowercase().as_str() {
        "high" => Some(HairTip::new(
            "Anti-Dandruff Care",
            "Use medicated shampoo twice a week",
        )),
        "mid" => Some(HairTip::new(
            "Scalp Health",
            "Regular scalp massage to improve circulation",
        )),
        _ => None,
    }
}

fn hair_loss_tip(hair_loss_stage: &str) -> Option<HairTip> {
    match hair_loss_stage {
        "Stage 3" | "Stage 4" => Some(HairTip::new(
            "Professional Care",
            "Consider consulting a trichologist",
        )),
        "Stage 2" => Some(HairTip::new(
            "Early Intervention",
            "Use growth-promoting oils regularly",
        )),
        _ => None,
    }
}

/// Builds the care tips for a scan, in rule order, capped at [`MAX_TIPS`].
///
/// Truncation is positional: later rules lose out once the cap is reached.
pub fn get_tips(hair_type: &str, dandruff_level: &str, hair_loss_stage: &str) -> Vec<HairTip> {
    hair_type_tips(hair_type)
        .into_iter()
        .chain(dandruff_tip(dandruff_level))
        .chain(hair_loss_tip(hair_loss_stage))
        .take(MAX_TIPS)
        .collect()
}

/// Runs both rule tables for a classified hair type and the user's selections
pub fn analyze(hair_type: &str, selections: &UserSelections) -> Analysis {
    let dandruff_level = selections.dandruff_level.as_str();
    let hair_loss_stage = selections.hair_loss_stage.as_str();

    Analysis {
        oils: get_recommendations(hair_type, dandruff_level, hair_loss_stage),
        tips: get_tips(hair_type, dandruff_level, hair_loss_stage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DandruffLevel, HairLossStage};
    use std::collections::HashSet;

    fn keys(oils: &[OilRecommendation]) -> Vec<&'static str> {
        oils.iter().map(|oil| oil.key).collect()
    }

    fn titles(tips: &[HairTip]) -> Vec<&'static str> {
        tips.iter().map(|tip| tip.title).collect()
    }

    #[test]
    fn test_catalog_has_five_unique_keys() {
        let keys: HashSet<_> = catalog().iter().map(|oil| oil.key).collect();
        assert_eq!(keys.len(), 5);
        for key in ["moroccanoil", "indulekha", "rosemary", "jojoba", "thrive"] {
            assert!(keys.contains(key), "missing {}", key);
        }
    }

    #[test]
    fn test_lookup_unknown_key() {
        assert!(lookup("coconut").is_none());
        assert_eq!(lookup("thrive").unwrap().name, "Thrive Frizz Free Oil");
    }

    #[test]
    fn test_recommendations_bounded_and_distinct_for_all_inputs() {
        let catalog_keys: HashSet<_> = catalog().iter().map(|oil| oil.key).collect();

        for hair_type in ["wavy", "curly", "straight", "dry", "WAVY", "Curly", "unknown", ""] {
            for dandruff in DandruffLevel::ALL {
                for stage in HairLossStage::ALL {
                    let oils = get_recommendations(hair_type, dandruff.as_str(), stage.as_str());
                    let unique: HashSet<_> = keys(&oils).into_iter().collect();

                    assert!((1..=3).contains(&oils.len()));
                    assert_eq!(unique.len(), oils.len());
                    assert!(unique.is_subset(&catalog_keys));
                }
            }
        }
    }

    #[test]
    fn test_dry_low_stage1_is_padded_to_three() {
        let oils = get_recommendations("dry", "Low", "Stage 1");
        assert_eq!(oils.len(), 3);
        for key in keys(&oils) {
            assert!(["moroccanoil", "jojoba", "indulekha", "rosemary"].contains(&key));
        }
        // Insertion order: type rule first, then padding
        assert_eq!(keys(&oils), vec!["moroccanoil", "jojoba", "indulekha"]);
    }

    #[test]
    fn test_curly_high_stage4_skips_padding() {
        let oils = get_recommendations("curly", "High", "Stage 4");
        assert_eq!(oils.len(), 3);
        for key in keys(&oils) {
            assert!(["thrive", "jojoba", "rosemary", "indulekha"].contains(&key));
        }
        assert!(!keys(&oils).contains(&"moroccanoil"));
    }

    #[test]
    fn test_hair_type_is_case_insensitive() {
        assert_eq!(
            keys(&get_recommendations("CURLY", "low", "Stage 1")),
            keys(&get_recommendations("curly", "Low", "Stage 1"))
        );
        assert!(keys(&get_recommendations("WaVy", "Low", "Stage 1")).contains(&"thrive"));
    }

    #[test]
    fn test_straight_mid_dandruff_adds_rosemary() {
        let oils = get_recommendations("straight", "MID", "Stage 1");
        assert_eq!(keys(&oils), vec!["moroccanoil", "jojoba", "rosemary"]);
    }

    #[test]
    fn test_curly_stage2_adds_indulekha() {
        let oils = get_recommendations("curly", "Low", "Stage 2");
        assert_eq!(keys(&oils), vec!["thrive", "jojoba", "indulekha"]);
    }

    // Stage matching is exact; a lowercase stage falls through to no rule.
    #[test]
    fn test_lowercase_stage_does_not_match() {
        let oils = get_recommendations("curly", "Low", "stage 3");
        assert_eq!(keys(&oils), vec!["thrive", "jojoba", "moroccanoil"]);

        let tips = get_tips("curly", "Low", "stage 3");
        assert_eq!(titles(&tips), vec!["Gentle Cleansing", "Moisture Lock"]);
    }

    #[test]
    fn test_recommendations_are_idempotent() {
        let first = get_recommendations("wavy", "High", "Stage 3");
        let second = get_recommendations("wavy", "High", "Stage 3");
        assert_eq!(first, second);
    }

    #[test]
    fn test_tips_straight_low_stage1() {
        let tips = get_tips("straight", "Low", "Stage 1");
        assert_eq!(titles(&tips), vec!["Volume Boost", "Heat Protection"]);
    }

    #[test]
    fn test_tips_curly_high_stage3() {
        let tips = get_tips("curly", "High", "Stage 3");
        assert_eq!(
            titles(&tips),
            vec![
                "Gentle Cleansing",
                "Moisture Lock",
                "Anti-Dandruff Care",
                "Professional Care"
            ]
        );
        assert_eq!(tips[3].description, "Consider consulting a trichologist");
    }

    #[test]
    fn test_tips_default_branch_covers_dry_and_unknown() {
        let dry = get_tips("dry", "Mid", "Stage 2");
        assert_eq!(
            titles(&dry),
            vec![
                "Regular Oiling",
                "Gentle Handling",
                "Scalp Health",
                "Early Intervention"
            ]
        );
        assert_eq!(titles(&get_tips("unknown", "Low", "Stage 1")).len(), 2);
    }

    #[test]
    fn test_tips_bounded_for_all_inputs() {
        for hair_type in ["wavy", "curly", "straight", "dry", "other"] {
            for dandruff in DandruffLevel::ALL {
                for stage in HairLossStage::ALL {
                    let tips = get_tips(hair_type, dandruff.as_str(), stage.as_str());
                    assert!((2..=MAX_TIPS).contains(&tips.len()));
                }
            }
        }
    }

    #[test]
    fn test_analyze_uses_selection_literals() {
        let selections = UserSelections::new(DandruffLevel::High, HairLossStage::Stage4);
        let analysis = analyze("curly", &selections);

        assert_eq!(analysis.oils, get_recommendations("curly", "High", "Stage 4"));
        assert_eq!(analysis.tips, get_tips("curly", "High", "Stage 4"));
        assert_eq!(
            analysis.oil_names(),
            vec!["Thrive Frizz Free Oil", "Jojoba Oil", "Rosemary Hair Oil"]
        );
    }
}
