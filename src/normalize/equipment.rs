//! Equipment name normalization
//!
//! Raw equipment names collapse into a fixed category set; unmapped names
//! fall back to an upper-snake-cased copy so nothing is silently dropped.
//! Within one campsite, rows mapping to the same category deduplicate by
//! keeping the maximum valid reported length.

use crate::models::{NormEquipment, RawEquipment};
use std::collections::BTreeMap;

/// Map a raw equipment name to its canonical category
pub fn equipment_category(raw_name: &str) -> String {
    match raw_name {
        "RV" | "RV/MOTORHOME" => "RV".to_string(),
        "Trailer" => "TRAILER".to_string(),
        "FIFTH WHEEL" => "FIFTH_WHEEL".to_string(),
        "PICKUP CAMPER" => "PICKUP_CAMPER".to_string(),
        "POP UP" => "POP_UP".to_string(),
        "CARAVAN/CAMPER VAN" => "CAMPER_VAN".to_string(),
        "VEHICLE" | "CAR" => "VEHICLE".to_string(),
        "Tent" | "SMALL TENT" | "LARGE TENT OVER 9X12`" => "TENT".to_string(),
        "Boat" => "BOAT".to_string(),
        "Hammock" => "HAMMOCK".to_string(),
        "Horse" => "HORSE".to_string(),
        other => other.to_uppercase().replace(' ', "_"),
    }
}

/// Lengths outside (0, 150] ft are discarded; 0 is the upstream
/// "not specified" sentinel
fn valid_length(max_length: Option<f64>) -> Option<i64> {
    match max_length {
        Some(len) if len > 0.0 && len <= 150.0 => Some(len as i64),
        _ => None,
    }
}

/// Collapse raw equipment rows to one row per (campsite, category)
pub fn collapse_equipment(raw: &[RawEquipment]) -> Vec<NormEquipment> {
    let mut grouped: BTreeMap<(String, String), (String, Option<i64>)> = BTreeMap::new();

    for row in raw {
        let category = equipment_category(&row.equipment_name);
        let length = valid_length(row.max_length);
        let key = (row.campsite_id.clone(), category);

        match grouped.get_mut(&key) {
            None => {
                grouped.insert(key, (row.equipment_name.clone(), length));
            }
            Some((existing_name, existing_len)) => {
                // Keep the higher max_length and the name that reported it
                if let Some(len) = length {
                    if existing_len.is_none() || Some(len) > *existing_len {
                        *existing_name = row.equipment_name.clone();
                        *existing_len = Some(len);
                    }
                }
            }
        }
    }

    grouped
        .into_iter()
        .map(
            |((campsite_id, equipment_category), (equipment_name_raw, max_length_ft))| {
                NormEquipment {
                    campsite_id,
                    equipment_category,
                    equipment_name_raw,
                    max_length_ft,
                }
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(campsite_id: &str, name: &str, len: f64) -> RawEquipment {
        RawEquipment {
            campsite_id: campsite_id.to_string(),
            equipment_name: name.to_string(),
            max_length: Some(len),
        }
    }

    #[test]
    fn test_category_mapping() {
        assert_eq!(equipment_category("RV/MOTORHOME"), "RV");
        assert_eq!(equipment_category("FIFTH WHEEL"), "FIFTH_WHEEL");
        assert_eq!(equipment_category("SMALL TENT"), "TENT");
        assert_eq!(equipment_category("CAR"), "VEHICLE");
        // Unmapped names fall back to upper-snake
        assert_eq!(equipment_category("Dog Sled"), "DOG_SLED");
    }

    #[test]
    fn test_dedupe_keeps_max_length() {
        let rows = vec![
            raw("c1", "RV", 30.0),
            raw("c1", "RV/MOTORHOME", 45.0),
            raw("c1", "Tent", 0.0),
        ];
        let collapsed = collapse_equipment(&rows);
        assert_eq!(collapsed.len(), 2);

        let rv = collapsed
            .iter()
            .find(|e| e.equipment_category == "RV")
            .unwrap();
        assert_eq!(rv.max_length_ft, Some(45));
        assert_eq!(rv.equipment_name_raw, "RV/MOTORHOME");

        let tent = collapsed
            .iter()
            .find(|e| e.equipment_category == "TENT")
            .unwrap();
        assert_eq!(tent.max_length_ft, None);
    }

    #[test]
    fn test_zero_and_oversize_lengths_discarded() {
        let rows = vec![raw("c1", "RV", 0.0), raw("c2", "RV", 400.0)];
        let collapsed = collapse_equipment(&rows);
        assert!(collapsed.iter().all(|e| e.max_length_ft.is_none()));
    }

    #[test]
    fn test_length_without_replacement_keeps_first_name() {
        let rows = vec![
            RawEquipment {
                campsite_id: "c1".into(),
                equipment_name: "Tent".into(),
                max_length: None,
            },
            RawEquipment {
                campsite_id: "c1".into(),
                equipment_name: "SMALL TENT".into(),
                max_length: None,
            },
        ];
        let collapsed = collapse_equipment(&rows);
        assert_eq!(collapsed.len(), 1);
        assert_eq!(collapsed[0].equipment_name_raw, "Tent");
    }
}
