//! Camping-type inference
//!
//! An explicit, ordered list of (predicate, outcome) rules evaluated
//! top-down, first match wins. The ordering is part of the downstream
//! contract: earlier rules pre-empt later, more general ones, so reordering
//! changes classifications.

use crate::models::{CampingType, Confidence};

/// Aggregate facts a facility is classified from
#[derive(Debug, Clone, Default)]
pub struct ClassifierFacts<'a> {
    pub total_campsites: i64,
    pub overnight_sites: i64,
    pub day_use_sites: i64,
    pub facility_type: Option<&'a str>,
    pub org_abbrev: Option<&'a str>,
    pub has_water_hookup: bool,
    pub has_sewer_hookup: bool,
    pub has_electric_hookup: bool,
    pub has_full_hookup: bool,
    pub has_pullthrough: bool,
    pub paved_sites: i64,
    pub gravel_sites: i64,
    pub drive_in_sites: i64,
    pub sites_accepting_rv: i64,
    pub desc_mentions_hookups: bool,
    pub desc_mentions_full_hookup: bool,
    pub desc_mentions_electric: bool,
    pub desc_mentions_dump_station: bool,
    pub desc_mentions_dispersed: bool,
    pub desc_mentions_primitive: bool,
    pub desc_mentions_vault_toilet: bool,
    pub desc_road_dirt: bool,
    pub desc_road_gravel: bool,
    pub has_camping_activity: bool,
    pub has_dispersed_activity: bool,
}

impl ClassifierFacts<'_> {
    fn is_generic_camping_type(&self) -> bool {
        matches!(self.facility_type, Some("Campground") | Some("Facility"))
    }

    fn blm_or_fs(&self) -> bool {
        matches!(self.org_abbrev, Some("BLM") | Some("FS"))
    }

    fn no_structural_hookups(&self) -> bool {
        !self.has_electric_hookup && !self.has_water_hookup && !self.has_sewer_hookup
    }
}

/// One ordered classification rule
pub struct CampingRule {
    pub name: &'static str,
    pub matches: fn(&ClassifierFacts) -> bool,
    pub camping_type: CampingType,
    pub confidence: Confidence,
}

/// The ordered rule list. The final rule matches unconditionally.
pub static CAMPING_RULES: &[CampingRule] = &[
    // 1. Non-camping facility types with zero campsites
    CampingRule {
        name: "non_camping_facility_type",
        matches: |f| f.total_campsites == 0 && !f.is_generic_camping_type(),
        camping_type: CampingType::NonCamping,
        confidence: Confidence::High,
    },
    // 2. Sites exist but every one is day-use
    CampingRule {
        name: "all_sites_day_use",
        matches: |f| f.total_campsites > 0 && f.overnight_sites == 0 && f.day_use_sites > 0,
        camping_type: CampingType::DayUse,
        confidence: Confidence::High,
    },
    // 3. Any hookup reported at the campsite level
    CampingRule {
        name: "structural_hookups",
        matches: |f| {
            f.total_campsites > 0
                && (f.has_electric_hookup
                    || f.has_water_hookup
                    || f.has_sewer_hookup
                    || f.has_full_hookup)
        },
        camping_type: CampingType::Developed,
        confidence: Confidence::High,
    },
    // 4. Pull-through + pavement + meaningful site count
    CampingRule {
        name: "pullthrough_paved",
        matches: |f| f.total_campsites >= 5 && f.paved_sites > 0 && f.has_pullthrough,
        camping_type: CampingType::Developed,
        confidence: Confidence::High,
    },
    // 5. Drive-in + surfaced driveways + RV-capable sites
    CampingRule {
        name: "drive_in_surfaced_rv",
        matches: |f| {
            f.total_campsites >= 5
                && f.drive_in_sites > 0
                && (f.paved_sites > 0 || f.gravel_sites > 0)
                && f.sites_accepting_rv > 0
        },
        camping_type: CampingType::Developed,
        confidence: Confidence::Medium,
    },
    // 6. Description mentions hookups or a dump station
    CampingRule {
        name: "description_hookups",
        matches: |f| {
            f.total_campsites > 0
                && (f.desc_mentions_hookups
                    || f.desc_mentions_full_hookup
                    || f.desc_mentions_electric
                    || f.desc_mentions_dump_station)
        },
        camping_type: CampingType::Developed,
        confidence: Confidence::Medium,
    },
    // 7. BLM/FS land, no campsite records, description says dispersed
    CampingRule {
        name: "blm_fs_dispersed_description",
        matches: |f| f.total_campsites == 0 && f.blm_or_fs() && f.desc_mentions_dispersed,
        camping_type: CampingType::Dispersed,
        confidence: Confidence::High,
    },
    // 8. BLM/FS land, no campsite records, dispersed-camping activity
    CampingRule {
        name: "blm_fs_dispersed_activity",
        matches: |f| f.total_campsites == 0 && f.blm_or_fs() && f.has_dispersed_activity,
        camping_type: CampingType::Dispersed,
        confidence: Confidence::High,
    },
    // 9. BLM/FS generic facility with camping activity but no sites
    CampingRule {
        name: "blm_fs_generic_camping_activity",
        matches: |f| {
            f.total_campsites == 0
                && f.blm_or_fs()
                && f.facility_type == Some("Facility")
                && f.has_camping_activity
        },
        camping_type: CampingType::Dispersed,
        confidence: Confidence::Medium,
    },
    // 10. BLM generic facility
    CampingRule {
        name: "blm_generic_facility",
        matches: |f| {
            f.total_campsites == 0
                && f.org_abbrev == Some("BLM")
                && f.facility_type == Some("Facility")
        },
        camping_type: CampingType::Dispersed,
        confidence: Confidence::Low,
    },
    // 11. Description says primitive, no electric/water reported
    CampingRule {
        name: "primitive_description",
        matches: |f| {
            f.total_campsites > 0
                && f.desc_mentions_primitive
                && !f.has_electric_hookup
                && !f.has_water_hookup
        },
        camping_type: CampingType::Primitive,
        confidence: Confidence::High,
    },
    // 12. Overnight, hookup-free, unpaved, vault/dirt road signals
    CampingRule {
        name: "overnight_unpaved_vault",
        matches: |f| {
            f.total_campsites > 0
                && f.overnight_sites > 0
                && f.no_structural_hookups()
                && f.paved_sites == 0
                && (f.desc_mentions_vault_toilet || f.desc_road_dirt || f.desc_road_gravel)
        },
        camping_type: CampingType::Primitive,
        confidence: Confidence::Medium,
    },
    // 13. Overnight, hookup-free, no RV-capable equipment
    CampingRule {
        name: "overnight_no_rv_equipment",
        matches: |f| {
            f.total_campsites > 0
                && f.overnight_sites > 0
                && f.no_structural_hookups()
                && f.sites_accepting_rv == 0
        },
        camping_type: CampingType::Primitive,
        confidence: Confidence::Low,
    },
    // 14. Residual: any facility with overnight sites
    CampingRule {
        name: "fallback_overnight",
        matches: |f| f.total_campsites > 0 && f.overnight_sites > 0,
        camping_type: CampingType::Developed,
        confidence: Confidence::Low,
    },
    // 15. Residual: campsites but none overnight
    CampingRule {
        name: "fallback_any_sites",
        matches: |f| f.total_campsites > 0,
        camping_type: CampingType::DayUse,
        confidence: Confidence::Low,
    },
    // 16. Residual: nothing at all
    CampingRule {
        name: "fallback_non_camping",
        matches: |_| true,
        camping_type: CampingType::NonCamping,
        confidence: Confidence::Low,
    },
];

/// Classify via the ordered rule list; the last rule guarantees a match
pub fn classify_camping_type(facts: &ClassifierFacts) -> (CampingType, Confidence) {
    for rule in CAMPING_RULES {
        if (rule.matches)(facts) {
            return (rule.camping_type, rule.confidence);
        }
    }
    unreachable!("final camping rule matches unconditionally")
}

/// Reduced classifier for orphan facilities (sites exist but the facility
/// record is missing, so no description/organization evidence is available)
pub fn classify_orphan(
    total_campsites: i64,
    overnight_sites: i64,
    has_any_hookup: bool,
) -> (CampingType, Confidence) {
    if total_campsites > 0 && has_any_hookup {
        (CampingType::Developed, Confidence::Medium)
    } else if total_campsites > 0 && overnight_sites > 0 {
        (CampingType::Developed, Confidence::Low)
    } else if total_campsites > 0 {
        (CampingType::DayUse, Confidence::Low)
    } else {
        (CampingType::NonCamping, Confidence::Low)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_order_is_stable() {
        let names: Vec<&str> = CAMPING_RULES.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec![
                "non_camping_facility_type",
                "all_sites_day_use",
                "structural_hookups",
                "pullthrough_paved",
                "drive_in_surfaced_rv",
                "description_hookups",
                "blm_fs_dispersed_description",
                "blm_fs_dispersed_activity",
                "blm_fs_generic_camping_activity",
                "blm_generic_facility",
                "primitive_description",
                "overnight_unpaved_vault",
                "overnight_no_rv_equipment",
                "fallback_overnight",
                "fallback_any_sites",
                "fallback_non_camping",
            ]
        );
    }

    #[test]
    fn test_non_camping_facility_type() {
        let facts = ClassifierFacts {
            facility_type: Some("Trailhead"),
            ..Default::default()
        };
        assert_eq!(
            classify_camping_type(&facts),
            (CampingType::NonCamping, Confidence::High)
        );
    }

    #[test]
    fn test_all_day_use_sites() {
        let facts = ClassifierFacts {
            total_campsites: 10,
            overnight_sites: 0,
            day_use_sites: 10,
            facility_type: Some("Campground"),
            ..Default::default()
        };
        assert_eq!(
            classify_camping_type(&facts),
            (CampingType::DayUse, Confidence::High)
        );
    }

    #[test]
    fn test_structural_hookups_dominate_description_warnings() {
        // Description warnings (not recommended for RVs, gravel road) do not
        // participate here; structured hookup evidence wins
        let facts = ClassifierFacts {
            total_campsites: 20,
            overnight_sites: 20,
            facility_type: Some("Campground"),
            has_electric_hookup: true,
            has_pullthrough: true,
            desc_road_gravel: true,
            ..Default::default()
        };
        assert_eq!(
            classify_camping_type(&facts),
            (CampingType::Developed, Confidence::High)
        );
    }

    #[test]
    fn test_pullthrough_paved() {
        let facts = ClassifierFacts {
            total_campsites: 8,
            overnight_sites: 8,
            facility_type: Some("Campground"),
            has_pullthrough: true,
            paved_sites: 3,
            ..Default::default()
        };
        assert_eq!(
            classify_camping_type(&facts),
            (CampingType::Developed, Confidence::High)
        );
    }

    #[test]
    fn test_drive_in_surfaced_rv() {
        let facts = ClassifierFacts {
            total_campsites: 6,
            overnight_sites: 6,
            facility_type: Some("Campground"),
            drive_in_sites: 6,
            gravel_sites: 2,
            sites_accepting_rv: 4,
            ..Default::default()
        };
        assert_eq!(
            classify_camping_type(&facts),
            (CampingType::Developed, Confidence::Medium)
        );
    }

    #[test]
    fn test_description_hookups() {
        let facts = ClassifierFacts {
            total_campsites: 3,
            overnight_sites: 3,
            facility_type: Some("Campground"),
            desc_mentions_dump_station: true,
            ..Default::default()
        };
        assert_eq!(
            classify_camping_type(&facts),
            (CampingType::Developed, Confidence::Medium)
        );
    }

    #[test]
    fn test_blm_dispersed_description() {
        let facts = ClassifierFacts {
            total_campsites: 0,
            facility_type: Some("Facility"),
            org_abbrev: Some("BLM"),
            desc_mentions_dispersed: true,
            ..Default::default()
        };
        assert_eq!(
            classify_camping_type(&facts),
            (CampingType::Dispersed, Confidence::High)
        );
    }

    #[test]
    fn test_fs_dispersed_activity() {
        let facts = ClassifierFacts {
            total_campsites: 0,
            facility_type: Some("Facility"),
            org_abbrev: Some("FS"),
            has_dispersed_activity: true,
            ..Default::default()
        };
        assert_eq!(
            classify_camping_type(&facts),
            (CampingType::Dispersed, Confidence::High)
        );
    }

    #[test]
    fn test_blm_generic_facility_ladder() {
        let facts = ClassifierFacts {
            total_campsites: 0,
            facility_type: Some("Facility"),
            org_abbrev: Some("BLM"),
            has_camping_activity: true,
            ..Default::default()
        };
        assert_eq!(
            classify_camping_type(&facts),
            (CampingType::Dispersed, Confidence::Medium)
        );

        let facts = ClassifierFacts {
            total_campsites: 0,
            facility_type: Some("Facility"),
            org_abbrev: Some("BLM"),
            ..Default::default()
        };
        assert_eq!(
            classify_camping_type(&facts),
            (CampingType::Dispersed, Confidence::Low)
        );

        // Same shape under a state agency falls through to the final fallback
        let facts = ClassifierFacts {
            total_campsites: 0,
            facility_type: Some("Facility"),
            org_abbrev: Some("NPS"),
            ..Default::default()
        };
        assert_eq!(
            classify_camping_type(&facts),
            (CampingType::NonCamping, Confidence::Low)
        );
    }

    #[test]
    fn test_primitive_ladder() {
        let facts = ClassifierFacts {
            total_campsites: 12,
            overnight_sites: 12,
            facility_type: Some("Campground"),
            desc_mentions_primitive: true,
            ..Default::default()
        };
        assert_eq!(
            classify_camping_type(&facts),
            (CampingType::Primitive, Confidence::High)
        );

        let facts = ClassifierFacts {
            total_campsites: 12,
            overnight_sites: 12,
            facility_type: Some("Campground"),
            desc_mentions_vault_toilet: true,
            sites_accepting_rv: 2,
            ..Default::default()
        };
        assert_eq!(
            classify_camping_type(&facts),
            (CampingType::Primitive, Confidence::Medium)
        );

        let facts = ClassifierFacts {
            total_campsites: 12,
            overnight_sites: 12,
            facility_type: Some("Campground"),
            ..Default::default()
        };
        assert_eq!(
            classify_camping_type(&facts),
            (CampingType::Primitive, Confidence::Low)
        );
    }

    #[test]
    fn test_fallbacks() {
        // Overnight sites with RV equipment but nothing else
        let facts = ClassifierFacts {
            total_campsites: 4,
            overnight_sites: 4,
            facility_type: Some("Campground"),
            sites_accepting_rv: 4,
            ..Default::default()
        };
        assert_eq!(
            classify_camping_type(&facts),
            (CampingType::Developed, Confidence::Low)
        );

        // Sites that are neither overnight nor flagged day-use
        let facts = ClassifierFacts {
            total_campsites: 2,
            facility_type: Some("Campground"),
            sites_accepting_rv: 1,
            ..Default::default()
        };
        assert_eq!(
            classify_camping_type(&facts),
            (CampingType::DayUse, Confidence::Low)
        );

        let facts = ClassifierFacts {
            facility_type: Some("Campground"),
            ..Default::default()
        };
        assert_eq!(
            classify_camping_type(&facts),
            (CampingType::NonCamping, Confidence::Low)
        );
    }

    #[test]
    fn test_orphan_classifier() {
        assert_eq!(
            classify_orphan(5, 5, true),
            (CampingType::Developed, Confidence::Medium)
        );
        assert_eq!(
            classify_orphan(5, 5, false),
            (CampingType::Developed, Confidence::Low)
        );
        assert_eq!(
            classify_orphan(5, 0, false),
            (CampingType::DayUse, Confidence::Low)
        );
        assert_eq!(
            classify_orphan(0, 0, false),
            (CampingType::NonCamping, Confidence::Low)
        );
    }
}
