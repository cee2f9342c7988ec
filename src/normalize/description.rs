//! Facility description mining
//!
//! Strips HTML down to plain text, then runs an independent battery of
//! signal detectors plus two bounded numeric extractions (max RV length,
//! elevation). All patterns compile once at first use; the detector set is
//! static configuration, not per-call state.

use crate::models::NormFacility;
use regex::Regex;
use std::sync::LazyLock;

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static signal pattern must compile")
}

static RE_RV: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)\brv\b|motorhome|motor home"));
static RE_HOOKUPS: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)hook[\s-]?up"));
static RE_FULL_HOOKUP: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)full hook"));
static RE_ELECTRIC: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)electric hook|electr?ic site|\b30[\s-]?amp\b|\b50[\s-]?amp\b|\b20[\s-]?amp\b")
});
static RE_WATER_HOOKUP: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)water hook"));
static RE_SEWER: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)sewer hook|sewer connection"));
static RE_DUMP_STATION: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)dump station"));
static RE_PULL_THROUGH: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)pull[\s-]?through"));
static RE_GENERATOR: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)generator"));
static RE_RV_NOT_RECOMMENDED: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)not recommended for rv|not recommended for motor|no rv[s ]|rvs are not|rv access is not|motorhomes are not recommended|trailers and motorhomes are not recommended|not suitable for rv|not accessible.{0,20}rv")
});
static RE_ROAD_PAVED: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)paved road|paved access"));
static RE_ROAD_GRAVEL: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)gravel road|gravel access"));
static RE_ROAD_DIRT: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)dirt road|dirt access"));
static RE_HIGH_CLEARANCE: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)high[\s-]clearance"));
static RE_4WD: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)\b4wd\b|4[\s-]wheel|four[\s-]?wheel drive"));
static RE_DISPERSED: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)dispersed"));
static RE_PRIMITIVE: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)primitive"));
static RE_VAULT_TOILET: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)vault toilet"));
static RE_POTABLE_WATER: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)potable water|drinking water"));
static RE_SEASONAL_CLOSURE: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)seasonal closure|seasonally closed|closed for the season|open seasonally|seasonal access")
});
static RE_WINTER_CLOSURE: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)winter closure|closed in winter|closed during winter|snow closes|closed for winter|winter months.*closed")
});
static RE_SNOW: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)\bsnow\b|snowfall|snow pack|snowbound|snowed in"));
static RE_FIRE_RESTRICTIONS: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)fire restrict|fire ban|no campfire|campfire.{0,20}prohibit|burn ban|fire.{0,10}not (allowed|permitted)")
});
static RE_ELEVATION_MENTION: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)\b\d{1,2},?\d{3}\s*(?:feet|foot|ft|')\s*(?:elevation|elev\.?|above sea level)|elevation.{0,15}\d{1,2},?\d{3}")
});
static RE_REMOTE_NO_CELL: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)no cell|no cellular|no (cell\s*)?phone|no (cell\s*)?service|remote area|no reception|limited cell|poor cell")
});
static RE_FLOOD_RISK: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)flash flood|flood risk|flood prone|flooding|high water|flood warning")
});

static RE_RV_LENGTH: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)(?:rv|motorhome|trailer|vehicle)s?\s+(?:up to|limited to|maximum|max\.?)\s+(\d+)\s*(?:feet|foot|ft|')|(?:maximum|max\.?)\s+(?:rv|motorhome|trailer|vehicle)\s+(?:length|size)\s*(?:is|of|:)?\s*(\d+)|(\d+)\s*(?:feet|foot|ft|')\s+(?:rv|motorhome|trailer|vehicle)\s+(?:limit|max)")
});

static RE_ELEVATION: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)(\d{1,2}),?(\d{3})\s*(?:feet|foot|ft|')\s*(?:elevation|elev\.?|above sea level)|elevation\s*(?:is|of|:)?\s*(?:approximately\s*)?(\d{1,2}),?(\d{3})")
});

/// Collapse all whitespace runs to single spaces
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip HTML tags and entities down to searchable plain text
pub fn strip_html(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }
    let text = html2text::from_read(html.as_bytes(), 80).unwrap_or_else(|_| html.to_string());
    normalize_whitespace(&text)
}

/// First match wins; a match outside the 15-100 ft plausibility window
/// yields nothing rather than continuing the search
fn extract_rv_length(text: &str) -> Option<i64> {
    let caps = RE_RV_LENGTH.captures(text)?;
    let group = (1..=3).find_map(|i| caps.get(i))?;
    let n: i64 = group.as_str().parse().ok()?;
    if (15..=100).contains(&n) {
        Some(n)
    } else {
        None
    }
}

/// Elevation captures arrive as (thousands, hundreds) pairs from the two
/// pattern alternatives; 100-15,000 ft is the plausibility window
fn extract_elevation(text: &str) -> Option<i64> {
    let caps = RE_ELEVATION.captures(text)?;
    for i in [1, 3] {
        if let (Some(g1), Some(g2)) = (caps.get(i), caps.get(i + 1)) {
            let thousands: i64 = match g1.as_str().parse() {
                Ok(n) => n,
                Err(_) => continue,
            };
            let hundreds: i64 = match g2.as_str().parse() {
                Ok(n) => n,
                Err(_) => continue,
            };
            let elev = thousands * 1000 + hundreds;
            if (100..=15_000).contains(&elev) {
                return Some(elev);
            }
            return None;
        }
    }
    None
}

/// Run the full detector battery over a facility description and record the
/// signals on the normalized facility row
pub fn mine_description(html: &str, row: &mut NormFacility) {
    let text = strip_html(html);

    row.desc_mentions_rv = RE_RV.is_match(&text);
    row.desc_mentions_hookups = RE_HOOKUPS.is_match(&text);
    row.desc_mentions_full_hookup = RE_FULL_HOOKUP.is_match(&text);
    row.desc_mentions_electric = RE_ELECTRIC.is_match(&text);
    row.desc_mentions_water_hookup = RE_WATER_HOOKUP.is_match(&text);
    row.desc_mentions_sewer = RE_SEWER.is_match(&text);
    row.desc_mentions_dump_station = RE_DUMP_STATION.is_match(&text);
    row.desc_mentions_pull_through = RE_PULL_THROUGH.is_match(&text);
    row.desc_mentions_generator = RE_GENERATOR.is_match(&text);
    row.desc_rv_not_recommended = RE_RV_NOT_RECOMMENDED.is_match(&text);
    row.desc_road_paved = RE_ROAD_PAVED.is_match(&text);
    row.desc_road_gravel = RE_ROAD_GRAVEL.is_match(&text);
    row.desc_road_dirt = RE_ROAD_DIRT.is_match(&text);
    row.desc_road_high_clearance = RE_HIGH_CLEARANCE.is_match(&text);
    row.desc_road_4wd = RE_4WD.is_match(&text);
    row.desc_mentions_dispersed = RE_DISPERSED.is_match(&text);
    row.desc_mentions_primitive = RE_PRIMITIVE.is_match(&text);
    row.desc_mentions_vault_toilet = RE_VAULT_TOILET.is_match(&text);
    row.desc_mentions_potable_water = RE_POTABLE_WATER.is_match(&text);
    row.desc_seasonal_closure = RE_SEASONAL_CLOSURE.is_match(&text);
    row.desc_winter_closure = RE_WINTER_CLOSURE.is_match(&text);
    row.desc_mentions_snow = RE_SNOW.is_match(&text);
    row.desc_fire_restrictions = RE_FIRE_RESTRICTIONS.is_match(&text);
    row.desc_mentions_elevation = RE_ELEVATION_MENTION.is_match(&text);
    row.desc_remote_no_cell = RE_REMOTE_NO_CELL.is_match(&text);
    row.desc_flood_risk = RE_FLOOD_RISK.is_match(&text);

    row.desc_max_rv_length = extract_rv_length(&text);
    row.desc_elevation_ft = extract_elevation(&text);
    row.desc_plain_text = text;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mine(html: &str) -> NormFacility {
        let mut row = NormFacility::default();
        mine_description(html, &mut row);
        row
    }

    #[test]
    fn test_strip_html() {
        let text = strip_html("<p>Full hookups &amp; a dump station.</p>");
        assert!(text.contains("Full hookups & a dump station."));
    }

    #[test]
    fn test_empty_description() {
        let row = mine("");
        assert!(!row.desc_mentions_rv);
        assert_eq!(row.desc_plain_text, "");
    }

    #[test]
    fn test_hookup_signals() {
        let row = mine("<p>Sites offer full hook-ups with 50-amp electric and water hookups.</p>");
        assert!(row.desc_mentions_hookups);
        assert!(row.desc_mentions_full_hookup);
        assert!(row.desc_mentions_electric);
        assert!(row.desc_mentions_water_hookup);
        assert!(!row.desc_mentions_sewer);
    }

    #[test]
    fn test_rv_word_boundary() {
        assert!(mine("Big RV sites available").desc_mentions_rv);
        assert!(!mine("The reservoir is nearby").desc_mentions_rv);
    }

    #[test]
    fn test_rv_not_recommended() {
        let row = mine("This campground is not recommended for RVs or trailers.");
        assert!(row.desc_rv_not_recommended);
    }

    #[test]
    fn test_road_signals() {
        let row = mine("Access is via a gravel road, high-clearance vehicles suggested. 4WD required in spring.");
        assert!(row.desc_road_gravel);
        assert!(row.desc_road_high_clearance);
        assert!(row.desc_road_4wd);
        assert!(!row.desc_road_paved);
    }

    #[test]
    fn test_seasonal_and_fire() {
        let row = mine("Closed in winter due to snow. Fire restrictions may apply in summer.");
        assert!(row.desc_winter_closure);
        assert!(row.desc_mentions_snow);
        assert!(row.desc_fire_restrictions);
        assert!(!row.desc_seasonal_closure);
    }

    #[test]
    fn test_rv_length_extraction() {
        assert_eq!(mine("RVs up to 35 feet are welcome.").desc_max_rv_length, Some(35));
        assert_eq!(mine("Maximum RV length is 40").desc_max_rv_length, Some(40));
        // First match out of bounds yields nothing; no further search
        assert_eq!(mine("RVs up to 300 feet").desc_max_rv_length, None);
        assert_eq!(mine("No length information here.").desc_max_rv_length, None);
    }

    #[test]
    fn test_elevation_extraction() {
        assert_eq!(
            mine("The campground sits at 7,200 feet elevation.").desc_elevation_ft,
            Some(7200)
        );
        assert_eq!(
            mine("Elevation is approximately 8,500").desc_elevation_ft,
            Some(8500)
        );
        assert_eq!(mine("A pleasant low valley.").desc_elevation_ft, None);
    }

    #[test]
    fn test_remoteness_and_flood() {
        let row = mine("Remote area with no cell service. Flash flood risk in the canyon.");
        assert!(row.desc_remote_no_cell);
        assert!(row.desc_flood_risk);
    }

    #[test]
    fn test_dispersed_primitive() {
        let row = mine("Dispersed camping along the rim; primitive sites with a vault toilet and potable water nearby.");
        assert!(row.desc_mentions_dispersed);
        assert!(row.desc_mentions_primitive);
        assert!(row.desc_mentions_vault_toilet);
        assert!(row.desc_mentions_potable_water);
    }
}
