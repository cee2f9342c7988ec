//! Condition classifiers over a rollup row
//!
//! Road access, fire status and boondock accessibility are ordered
//! (predicate, outcome) rule lists evaluated top-down, first match wins.
//! Precedence is the contract: an explicit 4WD mention beats every other
//! co-occurring road signal.

use crate::models::{BoondockAccess, FacilityRollup, FireStatus, RoadAccess, SeasonalStatus};

/// One ordered condition rule
pub struct ConditionRule<T: Copy + 'static> {
    pub name: &'static str,
    pub matches: fn(&FacilityRollup) -> bool,
    pub outcome: T,
}

fn first_match<T: Copy>(rules: &[ConditionRule<T>], r: &FacilityRollup, fallback: T) -> T {
    rules
        .iter()
        .find(|rule| (rule.matches)(r))
        .map(|rule| rule.outcome)
        .unwrap_or(fallback)
}

/// Road access precedence, from hardest requirement to softest evidence
pub static ROAD_ACCESS_RULES: &[ConditionRule<RoadAccess>] = &[
    ConditionRule {
        name: "explicit_4wd",
        matches: |r| r.desc_road_4wd,
        outcome: RoadAccess::FourWdRequired,
    },
    ConditionRule {
        name: "explicit_high_clearance",
        matches: |r| r.desc_road_high_clearance,
        outcome: RoadAccess::HighClearance,
    },
    ConditionRule {
        name: "dirt_without_paved",
        matches: |r| r.desc_road_dirt && !r.desc_road_paved,
        outcome: RoadAccess::Dirt,
    },
    ConditionRule {
        name: "gravel_without_paved",
        matches: |r| r.desc_road_gravel && !r.desc_road_paved,
        outcome: RoadAccess::Gravel,
    },
    ConditionRule {
        name: "paved_mention_or_majority",
        matches: |r| r.desc_road_paved || r.surface_predominant.as_deref() == Some("PAVED"),
        outcome: RoadAccess::Paved,
    },
    ConditionRule {
        name: "gravel_majority",
        matches: |r| r.surface_predominant.as_deref() == Some("GRAVEL"),
        outcome: RoadAccess::Gravel,
    },
    ConditionRule {
        name: "any_paved_sites",
        matches: |r| r.paved_sites > 0,
        outcome: RoadAccess::Paved,
    },
    ConditionRule {
        name: "any_gravel_sites",
        matches: |r| r.gravel_sites > 0,
        outcome: RoadAccess::Gravel,
    },
];

pub fn classify_road_access(r: &FacilityRollup) -> RoadAccess {
    first_match(ROAD_ACCESS_RULES, r, RoadAccess::Unknown)
}

/// Fire status: explicit restriction language beats per-site campfire data
pub static FIRE_RULES: &[ConditionRule<FireStatus>] = &[
    ConditionRule {
        name: "explicit_restrictions",
        matches: |r| r.desc_fire_restrictions,
        outcome: FireStatus::Restrictions,
    },
    ConditionRule {
        name: "all_sites_disallow",
        matches: |r| r.campfire_no_sites > 0 && r.campfire_yes_sites == 0,
        outcome: FireStatus::NoCampfires,
    },
    ConditionRule {
        name: "any_site_allows",
        matches: |r| r.campfire_yes_sites > 0,
        outcome: FireStatus::CampfiresAllowed,
    },
];

pub fn classify_fire_status(r: &FacilityRollup) -> FireStatus {
    first_match(FIRE_RULES, r, FireStatus::Unknown)
}

/// Road difficulty mapped to boondock accessibility
pub static BOONDOCK_RULES: &[ConditionRule<BoondockAccess>] = &[
    ConditionRule {
        name: "needs_4wd",
        matches: |r| r.desc_road_4wd,
        outcome: BoondockAccess::Rough,
    },
    ConditionRule {
        name: "needs_high_clearance",
        matches: |r| r.desc_road_high_clearance,
        outcome: BoondockAccess::Rough,
    },
    ConditionRule {
        name: "dirt_road",
        matches: |r| r.desc_road_dirt && !r.desc_road_paved,
        outcome: BoondockAccess::Moderate,
    },
    ConditionRule {
        name: "gravel_road",
        matches: |r| r.desc_road_gravel && !r.desc_road_paved,
        outcome: BoondockAccess::Moderate,
    },
    ConditionRule {
        name: "paved_road",
        matches: |r| r.desc_road_paved,
        outcome: BoondockAccess::Easy,
    },
];

/// Boondock accessibility is only meaningful for dispersed/primitive
/// facilities; every other camping type gets no value at all
pub fn classify_boondock(r: &FacilityRollup) -> Option<BoondockAccess> {
    match r.camping_type.as_str() {
        "DISPERSED" | "PRIMITIVE" => Some(first_match(BOONDOCK_RULES, r, BoondockAccess::Unknown)),
        _ => None,
    }
}

/// Seasonal availability. `OPEN_YEAR_ROUND` is never directly observed: it
/// is inferred from the absence of closure/snow signals on a developed
/// facility. A known source of false positives, preserved as documented
/// behavior rather than corrected.
pub fn classify_seasonal_status(r: &FacilityRollup) -> SeasonalStatus {
    if r.desc_winter_closure {
        return SeasonalStatus::WinterClosure;
    }
    if r.desc_seasonal_closure {
        return SeasonalStatus::SeasonalClosure;
    }
    if r.camping_type == "DEVELOPED" && !r.desc_mentions_snow {
        return SeasonalStatus::OpenYearRound;
    }
    SeasonalStatus::Unknown
}

/// Driveway surface condition from campsite data
pub fn classify_driveway_surface(r: &FacilityRollup) -> String {
    if let Some(sp) = r.surface_predominant.as_deref() {
        return sp.to_string();
    }
    if r.paved_sites > 0 && r.gravel_sites > 0 {
        return "MIXED".to_string();
    }
    if r.paved_sites > 0 {
        return "PAVED".to_string();
    }
    if r.gravel_sites > 0 {
        return "GRAVEL".to_string();
    }
    "UNKNOWN".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rollup() -> FacilityRollup {
        FacilityRollup {
            facility_id: "f1".to_string(),
            camping_type: "DEVELOPED".to_string(),
            camping_type_confidence: "HIGH".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_4wd_beats_everything() {
        let r = FacilityRollup {
            desc_road_4wd: true,
            desc_road_paved: true,
            desc_road_gravel: true,
            paved_sites: 10,
            surface_predominant: Some("PAVED".to_string()),
            ..rollup()
        };
        assert_eq!(classify_road_access(&r), RoadAccess::FourWdRequired);
    }

    #[test]
    fn test_road_access_precedence_chain() {
        let r = FacilityRollup {
            desc_road_high_clearance: true,
            desc_road_dirt: true,
            ..rollup()
        };
        assert_eq!(classify_road_access(&r), RoadAccess::HighClearance);

        let r = FacilityRollup {
            desc_road_dirt: true,
            desc_road_gravel: true,
            ..rollup()
        };
        assert_eq!(classify_road_access(&r), RoadAccess::Dirt);

        // A paved mention neutralizes the dirt/gravel readings
        let r = FacilityRollup {
            desc_road_dirt: true,
            desc_road_paved: true,
            ..rollup()
        };
        assert_eq!(classify_road_access(&r), RoadAccess::Paved);

        let r = FacilityRollup {
            surface_predominant: Some("GRAVEL".to_string()),
            ..rollup()
        };
        assert_eq!(classify_road_access(&r), RoadAccess::Gravel);

        let r = FacilityRollup {
            gravel_sites: 2,
            ..rollup()
        };
        assert_eq!(classify_road_access(&r), RoadAccess::Gravel);
    }

    #[test]
    fn test_road_access_unknown() {
        assert_eq!(classify_road_access(&rollup()), RoadAccess::Unknown);
    }

    #[test]
    fn test_fire_status() {
        let r = FacilityRollup {
            desc_fire_restrictions: true,
            campfire_yes_sites: 5,
            ..rollup()
        };
        assert_eq!(classify_fire_status(&r), FireStatus::Restrictions);

        let r = FacilityRollup {
            campfire_no_sites: 3,
            ..rollup()
        };
        assert_eq!(classify_fire_status(&r), FireStatus::NoCampfires);

        let r = FacilityRollup {
            campfire_no_sites: 3,
            campfire_yes_sites: 1,
            ..rollup()
        };
        assert_eq!(classify_fire_status(&r), FireStatus::CampfiresAllowed);

        assert_eq!(classify_fire_status(&rollup()), FireStatus::Unknown);
    }

    #[test]
    fn test_seasonal_status() {
        let r = FacilityRollup {
            desc_winter_closure: true,
            desc_seasonal_closure: true,
            ..rollup()
        };
        assert_eq!(classify_seasonal_status(&r), SeasonalStatus::WinterClosure);

        let r = FacilityRollup {
            desc_seasonal_closure: true,
            ..rollup()
        };
        assert_eq!(classify_seasonal_status(&r), SeasonalStatus::SeasonalClosure);
    }

    #[test]
    fn test_open_year_round_is_an_inference() {
        // Known limitation: year-round status is assumed, not observed, for
        // a developed facility with no negative signals
        assert_eq!(
            classify_seasonal_status(&rollup()),
            SeasonalStatus::OpenYearRound
        );

        // A snow mention withdraws the inference
        let r = FacilityRollup {
            desc_mentions_snow: true,
            ..rollup()
        };
        assert_eq!(classify_seasonal_status(&r), SeasonalStatus::Unknown);

        // So does not being developed
        let r = FacilityRollup {
            camping_type: "PRIMITIVE".to_string(),
            ..rollup()
        };
        assert_eq!(classify_seasonal_status(&r), SeasonalStatus::Unknown);
    }

    #[test]
    fn test_boondock_only_for_dispersed_primitive() {
        let r = FacilityRollup {
            camping_type: "DISPERSED".to_string(),
            desc_road_dirt: true,
            ..rollup()
        };
        assert_eq!(classify_boondock(&r), Some(BoondockAccess::Moderate));

        let r = FacilityRollup {
            camping_type: "PRIMITIVE".to_string(),
            desc_road_4wd: true,
            ..rollup()
        };
        assert_eq!(classify_boondock(&r), Some(BoondockAccess::Rough));

        let r = FacilityRollup {
            camping_type: "PRIMITIVE".to_string(),
            desc_road_paved: true,
            ..rollup()
        };
        assert_eq!(classify_boondock(&r), Some(BoondockAccess::Easy));

        let r = FacilityRollup {
            camping_type: "PRIMITIVE".to_string(),
            ..rollup()
        };
        assert_eq!(classify_boondock(&r), Some(BoondockAccess::Unknown));

        // Developed facilities carry no boondock value at all
        let r = FacilityRollup {
            desc_road_4wd: true,
            ..rollup()
        };
        assert_eq!(classify_boondock(&r), None);
    }

    #[test]
    fn test_driveway_surface() {
        let r = FacilityRollup {
            surface_predominant: Some("MIXED".to_string()),
            ..rollup()
        };
        assert_eq!(classify_driveway_surface(&r), "MIXED");

        let r = FacilityRollup {
            paved_sites: 1,
            ..rollup()
        };
        assert_eq!(classify_driveway_surface(&r), "PAVED");

        assert_eq!(classify_driveway_surface(&rollup()), "UNKNOWN");
    }
}
