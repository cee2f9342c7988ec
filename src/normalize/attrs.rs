//! Named field extractors for the EAV attribute pivot
//!
//! Every parser accepts arbitrary text and never fails: unrecognized or
//! malformed input degrades to `None` ("not reported"), which is distinct
//! from an explicit negative. That distinction is load-bearing downstream.

use crate::models::{
    CapacityRating, DrivewayEntry, DrivewayGrade, DrivewaySurface, Shade, SiteAccess,
};

/// The EAV attribute names recognized by the pivot. This list is the
/// versioned contract of what stage 1 understands; anything else in the raw
/// table is ignored.
pub const PIVOT_ATTRS: [&str; 17] = [
    "Driveway Entry",
    "Driveway Surface",
    "Driveway Length",
    "Driveway Grade",
    "Water Hookup",
    "Sewer Hookup",
    "Electricity Hookup",
    "Full Hookup",
    "Max Vehicle Length",
    "Site Access",
    "Site Height/Overhead Clearance",
    "Max Num of People",
    "Max Num of Vehicles",
    "Capacity/Size Rating",
    "Pets Allowed",
    "Campfire Allowed",
    "Shade",
];

fn clean(val: &str) -> Option<String> {
    let v = val.trim().to_lowercase();
    if v.is_empty() || v == "n/a" {
        None
    } else {
        Some(v)
    }
}

/// Substring match, priority PULL_THROUGH > BACK_IN > PARALLEL
pub fn parse_driveway_entry(val: &str) -> Option<DrivewayEntry> {
    let v = clean(val)?;
    if v.contains("pull") || v.contains("thru") || v.contains("through") {
        return Some(DrivewayEntry::PullThrough);
    }
    if v.contains("back") {
        return Some(DrivewayEntry::BackIn);
    }
    if v.contains("parallel") {
        return Some(DrivewayEntry::Parallel);
    }
    None
}

/// Exact match only; misplaced values like "Pull-through" stay unreported
pub fn parse_driveway_surface(val: &str) -> Option<DrivewaySurface> {
    match clean(val)?.as_str() {
        "paved" => Some(DrivewaySurface::Paved),
        "gravel" => Some(DrivewaySurface::Gravel),
        "grass" => Some(DrivewaySurface::Grass),
        _ => None,
    }
}

pub fn parse_driveway_grade(val: &str) -> Option<DrivewayGrade> {
    match clean(val)?.as_str() {
        "slight" => Some(DrivewayGrade::Slight),
        "moderate" => Some(DrivewayGrade::Moderate),
        "severe" => Some(DrivewayGrade::Severe),
        _ => None,
    }
}

pub fn parse_water_hookup(val: &str) -> Option<bool> {
    let v = val.trim().to_lowercase();
    if v.is_empty() {
        return None;
    }
    match v.as_str() {
        "yes" | "y" | "water hookup" => Some(true),
        "no" => Some(false),
        _ => None,
    }
}

pub fn parse_sewer_hookup(val: &str) -> Option<bool> {
    let v = val.trim().to_lowercase();
    if v.is_empty() {
        return None;
    }
    match v.as_str() {
        "yes" | "y" | "sewer hookup" => Some(true),
        "no" => Some(false),
        _ => None,
    }
}

/// Parsed electric hookup attribute
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElectricHookup {
    pub has_electric: Option<bool>,
    pub amps: Option<String>,
    pub max_amps: Option<i64>,
}

/// Parse an amperage list like "30/50 amps" into
/// (has_electric, amps string sorted high-to-low, max amps).
pub fn parse_electric(val: &str) -> ElectricHookup {
    let v = val.trim().to_lowercase();
    if v.is_empty() || v == "n/a" || v == "electricity hookup" {
        return ElectricHookup::default();
    }
    if v == "no" {
        return ElectricHookup {
            has_electric: Some(false),
            ..Default::default()
        };
    }
    if v == "yes" {
        return ElectricHookup {
            has_electric: Some(true),
            ..Default::default()
        };
    }

    // Each slash-separated token may carry an "amp"/"amps" unit suffix
    let mut amps: Vec<i64> = Vec::new();
    for part in v.split('/') {
        let p = part
            .trim()
            .trim_end_matches("amps")
            .trim_end_matches("amp")
            .trim();
        if let Ok(a) = p.parse::<i64>() {
            if a > 0 && !amps.contains(&a) {
                amps.push(a);
            }
        }
    }
    if amps.is_empty() {
        return ElectricHookup::default();
    }
    amps.sort_unstable_by(|a, b| b.cmp(a));
    let joined = amps
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join("/");
    ElectricHookup {
        has_electric: Some(true),
        amps: Some(joined),
        max_amps: Some(amps[0]),
    }
}

/// Parse the authoritative "Full Hookup" attribute.
///
/// The bare label as a value means "yes, no amperage given"; a positive
/// integer means yes with that amperage; anything else non-empty (other than
/// an explicit "no"/"n/a") still counts as yes.
pub fn parse_full_hookup(val: &str) -> (bool, Option<i64>) {
    let v = val.trim().to_lowercase();
    if v.is_empty() || v == "n/a" || v == "no" {
        return (false, None);
    }
    if v == "full hookup" {
        return (true, None);
    }
    if let Ok(a) = v.parse::<i64>() {
        if a > 0 {
            return (true, Some(a));
        }
    }
    (true, None)
}

/// Parse a vehicle length like "35'" or "40 ft". Returns the clean value and
/// the original (trimmed) string, which is retained for audit even when
/// parsing fails. Values outside (0, 150] ft are treated as unparseable.
pub fn parse_max_vehicle_length(val: &str) -> (Option<i64>, Option<String>) {
    let raw = val.trim();
    if raw.is_empty() {
        return (None, None);
    }
    let lower = raw.to_lowercase();
    if lower == "n/a" || lower == "none" || lower == "nan" {
        return (None, Some(raw.to_string()));
    }
    let cleaned = lower
        .replace('\'', "")
        .replace('"', "")
        .replace("feet", "")
        .replace("ft", "");
    let length = match cleaned.trim().parse::<f64>() {
        Ok(f) if f.is_finite() => f as i64,
        _ => return (None, Some(raw.to_string())),
    };
    if length <= 0 || length > 150 {
        return (None, Some(raw.to_string()));
    }
    (Some(length), Some(raw.to_string()))
}

/// Multi-value access input resolves to the most permissive mode present:
/// DRIVE_IN > WALK_IN > BIKE > HIKE_IN > BOAT_IN
pub fn parse_site_access(val: &str) -> Option<SiteAccess> {
    let v = clean(val)?;
    let mut found: Vec<SiteAccess> = Vec::new();
    for part in v.split(',') {
        let mapped = match part.trim() {
            "drive-in" | "drive in" | "drive-up" => Some(SiteAccess::DriveIn),
            "walk-in" => Some(SiteAccess::WalkIn),
            "bike" => Some(SiteAccess::Bike),
            "hike-in" | "hike in" => Some(SiteAccess::HikeIn),
            "boat-in" | "boat in" => Some(SiteAccess::BoatIn),
            _ => None,
        };
        if let Some(m) = mapped {
            if !found.contains(&m) {
                found.push(m);
            }
        }
    }
    found.into_iter().min()
}

pub fn parse_capacity_rating(val: &str) -> Option<CapacityRating> {
    match clean(val)?.as_str() {
        "single" => Some(CapacityRating::Single),
        "double" => Some(CapacityRating::Double),
        "triple" => Some(CapacityRating::Triple),
        "quad" => Some(CapacityRating::Quad),
        "group" => Some(CapacityRating::Group),
        _ => None,
    }
}

pub fn parse_shade(val: &str) -> Option<Shade> {
    let v = val.trim().to_lowercase();
    if v.is_empty() {
        return None;
    }
    match v.as_str() {
        "full" => Some(Shade::Full),
        "yes" => Some(Shade::Yes),
        "no" => Some(Shade::No),
        "partial" | "shade" => Some(Shade::Partial),
        _ => None,
    }
}

/// Generic yes/no parser used for pets and campfire attributes. Pets values
/// sometimes arrive as the allowed species list, which still means yes.
pub fn parse_bool_attr(val: &str) -> Option<bool> {
    let v = val.trim().to_lowercase();
    if v.is_empty() {
        return None;
    }
    match v.as_str() {
        "yes" | "y" | "domestic" | "domestic,horse" | "horse" => return Some(true),
        "no" => return Some(false),
        _ => {}
    }
    if v.contains("allowed") || v.contains("yes") {
        return Some(true);
    }
    None
}

/// Positive integer, accepting float-formatted input
pub fn parse_int_attr(val: &str) -> Option<i64> {
    let v = val.trim();
    if v.is_empty() || v.eq_ignore_ascii_case("n/a") {
        return None;
    }
    match v.parse::<f64>() {
        Ok(f) if f.is_finite() => {
            let n = f as i64;
            if n > 0 {
                Some(n)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Overhead clearance is a mix of numbers and prose; only 5-100 ft values
/// are meaningful ("ffet" is a recurring upstream typo)
pub fn parse_overhead_clearance(val: &str) -> Option<i64> {
    let v = val.trim().to_lowercase();
    match v.as_str() {
        "" | "n/a" | "0" | "open" | "no overhead cover" | "tree overhang" | "infinate"
        | "infinite" => return None,
        _ => {}
    }
    let cleaned = v
        .replace('\'', "")
        .replace("feet", "")
        .replace("ffet", "")
        .replace("ft", "");
    match cleaned.trim().parse::<f64>() {
        Ok(f) if f.is_finite() => {
            let n = f as i64;
            if (5..=100).contains(&n) {
                Some(n)
            } else {
                None
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driveway_entry() {
        assert_eq!(
            parse_driveway_entry("Pull-Through"),
            Some(DrivewayEntry::PullThrough)
        );
        assert_eq!(parse_driveway_entry("Back-In"), Some(DrivewayEntry::BackIn));
        assert_eq!(
            parse_driveway_entry("parallel parking"),
            Some(DrivewayEntry::Parallel)
        );
        // Substring priority: pull-through wins over back-in
        assert_eq!(
            parse_driveway_entry("Back-in or pull-through"),
            Some(DrivewayEntry::PullThrough)
        );
        assert_eq!(parse_driveway_entry("N/A"), None);
        assert_eq!(parse_driveway_entry("  "), None);
        assert_eq!(parse_driveway_entry("Paved"), None);
    }

    #[test]
    fn test_driveway_surface_exact_only() {
        assert_eq!(parse_driveway_surface("Paved"), Some(DrivewaySurface::Paved));
        assert_eq!(
            parse_driveway_surface(" gravel "),
            Some(DrivewaySurface::Gravel)
        );
        // Misplaced values from other attributes stay unreported
        assert_eq!(parse_driveway_surface("Pull-through"), None);
        assert_eq!(parse_driveway_surface("Slight"), None);
    }

    #[test]
    fn test_water_sewer() {
        assert_eq!(parse_water_hookup("Yes"), Some(true));
        assert_eq!(parse_water_hookup("Water Hookup"), Some(true));
        assert_eq!(parse_water_hookup("No"), Some(false));
        assert_eq!(parse_water_hookup("maybe"), None);
        assert_eq!(parse_sewer_hookup("No"), Some(false));
        assert_eq!(parse_sewer_hookup(""), None);
    }

    #[test]
    fn test_electric_amp_list() {
        let e = parse_electric("50/30/20 amps");
        assert_eq!(e.has_electric, Some(true));
        assert_eq!(e.amps.as_deref(), Some("50/30/20"));
        assert_eq!(e.max_amps, Some(50));

        let e = parse_electric("30/50 amps");
        assert_eq!(e.amps.as_deref(), Some("50/30"));
        assert_eq!(e.max_amps, Some(50));

        let e = parse_electric("15 amp");
        assert_eq!(e.max_amps, Some(15));

        assert_eq!(parse_electric("Yes").has_electric, Some(true));
        assert_eq!(parse_electric("No").has_electric, Some(false));
        assert_eq!(parse_electric("Electricity Hookup"), ElectricHookup::default());
        assert_eq!(parse_electric("n/a"), ElectricHookup::default());
        // Garbage degrades to unreported, not an error
        assert_eq!(parse_electric("ask host"), ElectricHookup::default());
    }

    #[test]
    fn test_electric_dedupes() {
        let e = parse_electric("30/30/50");
        assert_eq!(e.amps.as_deref(), Some("50/30"));
    }

    #[test]
    fn test_full_hookup() {
        assert_eq!(parse_full_hookup("Full Hookup"), (true, None));
        assert_eq!(parse_full_hookup("50"), (true, Some(50)));
        assert_eq!(parse_full_hookup("No"), (false, None));
        assert_eq!(parse_full_hookup("n/a"), (false, None));
        assert_eq!(parse_full_hookup(""), (false, None));
        assert_eq!(parse_full_hookup("0"), (true, None));
    }

    #[test]
    fn test_max_vehicle_length() {
        assert_eq!(parse_max_vehicle_length("35'"), (Some(35), Some("35'".into())));
        assert_eq!(parse_max_vehicle_length("40 ft"), (Some(40), Some("40 ft".into())));
        assert_eq!(parse_max_vehicle_length("25 feet"), (Some(25), Some("25 feet".into())));
        // Exceeds the 150 ft sanity bound: raw kept, numeric null
        assert_eq!(parse_max_vehicle_length("200 ft"), (None, Some("200 ft".into())));
        assert_eq!(parse_max_vehicle_length("0"), (None, Some("0".into())));
        assert_eq!(parse_max_vehicle_length("n/a"), (None, Some("n/a".into())));
        assert_eq!(parse_max_vehicle_length(""), (None, None));
        assert_eq!(parse_max_vehicle_length("long"), (None, Some("long".into())));
    }

    #[test]
    fn test_site_access_priority() {
        assert_eq!(parse_site_access("Drive-In"), Some(SiteAccess::DriveIn));
        // Most permissive mode wins for multi-value input
        assert_eq!(
            parse_site_access("Hike-In, Drive-In"),
            Some(SiteAccess::DriveIn)
        );
        assert_eq!(
            parse_site_access("boat-in, hike-in"),
            Some(SiteAccess::HikeIn)
        );
        assert_eq!(parse_site_access("Boat-In"), Some(SiteAccess::BoatIn));
        assert_eq!(parse_site_access("teleport"), None);
        assert_eq!(parse_site_access("n/a"), None);
    }

    #[test]
    fn test_capacity_and_shade() {
        assert_eq!(parse_capacity_rating("Single "), Some(CapacityRating::Single));
        assert_eq!(parse_capacity_rating("GROUP"), Some(CapacityRating::Group));
        assert_eq!(parse_capacity_rating("huge"), None);
        assert_eq!(parse_shade("Full"), Some(Shade::Full));
        assert_eq!(parse_shade("shade"), Some(Shade::Partial));
        assert_eq!(parse_shade("sunny"), None);
    }

    #[test]
    fn test_bool_attr() {
        assert_eq!(parse_bool_attr("Yes"), Some(true));
        assert_eq!(parse_bool_attr("Domestic"), Some(true));
        assert_eq!(parse_bool_attr("Pets Allowed"), Some(true));
        assert_eq!(parse_bool_attr("No"), Some(false));
        assert_eq!(parse_bool_attr("unknown"), None);
    }

    #[test]
    fn test_int_attr() {
        assert_eq!(parse_int_attr("8"), Some(8));
        assert_eq!(parse_int_attr("6.0"), Some(6));
        assert_eq!(parse_int_attr("0"), None);
        assert_eq!(parse_int_attr("-3"), None);
        assert_eq!(parse_int_attr("many"), None);
    }

    #[test]
    fn test_overhead_clearance() {
        assert_eq!(parse_overhead_clearance("14'"), Some(14));
        assert_eq!(parse_overhead_clearance("12 feet"), Some(12));
        assert_eq!(parse_overhead_clearance("Infinite"), None);
        assert_eq!(parse_overhead_clearance("tree overhang"), None);
        assert_eq!(parse_overhead_clearance("3"), None);
        assert_eq!(parse_overhead_clearance("200"), None);
    }
}
