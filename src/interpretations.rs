// 📖 Interpretations - Number meanings + Driver/Conductor combinations
//
// Driver = Moolank, Conductor = Bhagyank. The 81 combinations are data;
// ratings and keywords are derived from the raw star strings and meanings.

use crate::reducer::{reduce, ReduceMode};
use serde::Serialize;

pub const FULL_STAR: char = '★';
pub const HALF_STAR: char = '⯨';

/// Marker used in the table for an unknown or unpredictable rating
pub const UNKNOWN_RATING: &str = "(?)";

// ============================================================================
// SINGLE NUMBER MEANINGS
// ============================================================================

const MEANINGS: [&str; 9] = [
    "Leader, independent, origination.",
    "Cooperative, diplomatic, intuitive.",
    "Creative, communicative, optimistic.",
    "Practical, disciplined, grounded.",
    "Adventurous, freedom-loving, adaptable.",
    "Responsible, nurturing, harmonious.",
    "Introspective, analytical, spiritual.",
    "Ambitious, material success, authority.",
    "Compassionate, humanitarian, wise.",
];

/// Short trait text for a number. Master numbers use their root digit.
pub fn interpretation(n: u32) -> &'static str {
    match reduce(n, ReduceMode::Legacy) {
        d @ 1..=9 => MEANINGS[(d - 1) as usize],
        _ => "",
    }
}

// ============================================================================
// DRIVER / CONDUCTOR TABLE
// ============================================================================

/// (driver, conductor, stars, meaning)
const DC_TABLE: [(u32, u32, &str, &str); 81] = [
    // Driver 1
    (1, 1, "★★★★", "Fortunes Favourite"),
    (1, 2, "★★★★", "Best For Navy; Water; Moon"),
    (1, 3, "★★★⯨", "Best For Occult"),
    (1, 4, "★★★", "Politics; Sun King; Rahu Influence"),
    (1, 5, "★★★★", "Banking And Finance"),
    (1, 6, "★★★⯨", "Luxury; Glamour"),
    (1, 7, "★★★", "Best For Occult; Education; Research"),
    (1, 8, "(?)", "Struggle; Marriage Issues; Police; Politics"),
    (1, 9, "★★★★★", "Super Successful"),
    // Driver 2
    (2, 1, "★★★⯨", "Successful"),
    (2, 2, "★★", "Best For Water Related Work; Navy; Sweets; Cold Drink"),
    (2, 3, "★★⯨", "Occult Education; Healer; Teacher"),
    (2, 4, "★⯨", "Struggle; Depression"),
    (2, 5, "★★★", "Best For Property; Real Estate; Finance; MBA; Banking"),
    (2, 6, "★★⯨", "Best For Sweets; Water Moon Influence; Celebration Venus Influence"),
    (2, 7, "★★⯨", "Teaching; Occult"),
    (2, 8, "(?)", "Unknown Or Unpredictable Combination"),
    (2, 9, "★", "Struggle; Health Issues; Marriage Problems"),
    // Driver 3
    (3, 1, "★★★⯨", "Occult; Education; Healer; Doctor; Administrative Job"),
    (3, 2, "★★⯨", "Water Related Work; Navy Work"),
    (3, 3, "★★★", "Best For Education; Occult"),
    (3, 4, "★★", "Good For Sales And Marketing"),
    (3, 5, "★★★", "Excellent Communication; Anchoring; News; Reading; Acting; Teaching; Banking"),
    (3, 6, "(?)", "Struggle; Health Issues; Marriage Issues; Anti-Combination"),
    (3, 7, "★★★★", "Best For Education; Occult; Healing; Teaching"),
    (3, 8, "★★", "Lawyer; Printing; Sales"),
    (3, 9, "★★★★", "Education; Occult; Army; Administrative; Doctor"),
    // Driver 4
    (4, 1, "★★★⯨", "Politics"),
    (4, 2, "★★", "Depression; Struggle"),
    (4, 3, "★★⯨", "Sales And Marketing; Occult Education"),
    (4, 4, "★⯨", "Best For Law; Struggle"),
    (4, 5, "★★★", "Banking; Event Management"),
    (4, 6, "★★★", "Media; Luxury; Glamour"),
    (4, 7, "★★★★", "Successful; Best In Occult"),
    (4, 8, "★", "Struggle; Excellent For Law"),
    (4, 9, "★", "Struggle; Health Problems; Surgeries; Accidents"),
    // Driver 5
    (5, 1, "★★★★", "Successful; Finance; Loan; Property; Balanced Life"),
    (5, 2, "★★★⯨", "Property"),
    (5, 3, "★★★", "Successful"),
    (5, 4, "★★★", "Successful"),
    (5, 5, "★★★★", "Communication; Occult; Overall Successful; Sales And Marketing; Very Successful; Romantic; May Be Lazy"),
    (5, 6, "★★★★⯨", "Life Is Successful"),
    (5, 7, "★★★", "Occult"),
    (5, 8, "★★★", "Property"),
    (5, 9, "★★★", "Occult; Banking; Property; Successful"),
    // Driver 6
    (6, 1, "★★★⯨", "Media; Luxury; Glamour"),
    (6, 2, "★★", "Sweet Shop; Health Issues; Marriage Issues; Successful; Media"),
    (6, 3, "(?)", "Uncertain Or Negative Combination"),
    (6, 4, "★★★", "Sweet Shop; Health Issues; Marriage Issues; Successful; Media"),
    (6, 5, "★★★★⯨", "Super Successful"),
    (6, 6, "★★★★", "Super Successful; Media; Film Industry; Tour And Travel"),
    (6, 7, "★★★⯨", "Successful; Sports; Romantic"),
    (6, 8, "★★★", "Best For Law"),
    (6, 9, "★★★", "Successful; Marriage Problems; Scandals; Controversies"),
    // Driver 7
    (7, 1, "★★★", "Successful"),
    (7, 2, "★★", "Best In Occult; Intuitive; Occult"),
    (7, 3, "★★★", "Teaching; Healing; Occult"),
    (7, 4, "★★★", "Successful"),
    (7, 5, "★★★", "Occult"),
    (7, 6, "★★★★", "Sports"),
    (7, 7, "★", "Disappointment In Life; Marriage Life In Danger"),
    (7, 8, "★", "Occult"),
    (7, 9, "★", "Teaching; Occult"),
    // Driver 8
    (8, 1, "(?)", "Marriage Problems; Struggle; Saturn Represents Physical Efforts"),
    (8, 2, "(?)", "Uncertain Or Negative Combination; Saturn Represents Physical Efforts"),
    (8, 3, "★★", "Health Issues; Struggle; Law; Printing; Best For Law; Sales And Marketing; Struggle In Life"),
    (8, 4, "★", "Health Issues; Struggle"),
    (8, 5, "★★★", "Real Estate; Property"),
    (8, 6, "★★★", "Best For Law"),
    (8, 7, "★★", "Occult; Struggle But Good In Sports; Army"),
    (8, 8, "★", "Occult; Struggle But Good In Sports; Army"),
    (8, 9, "★", "Occult; Struggle But Good In Sports; Army"),
    // Driver 9
    (9, 1, "★★★★", "Successful; Army Is Best"),
    (9, 2, "★", "Struggle; Marriage Problems"),
    (9, 3, "★★⯨", "Occult; Healing"),
    (9, 4, "★⯨", "Struggle; Surgeries; Health Issues"),
    (9, 5, "★★★", "Successful"),
    (9, 6, "★★", "Scandals; Controversies; Occult; Teaching; Army; Police; Marriage Problems"),
    (9, 7, "★", "Scandals; Controversies; Occult; Teaching; Army; Police; Marriage Problems"),
    (9, 8, "★★", "Scandals; Controversies; Occult; Teaching; Army; Police; Marriage Problems"),
    (9, 9, "★", "Scandals; Controversies; Occult; Teaching; Army; Police; Marriage Problems"),
];

// ============================================================================
// ANALYSIS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DcAnalysis {
    pub driver: u32,
    pub conductor: u32,

    /// Star string as recorded; None when the rating is unknown
    pub stars: Option<&'static str>,

    /// Full star = 1.0, half star = 0.5
    pub rating: Option<f32>,

    pub meaning: &'static str,
    pub keywords: Vec<String>,
}

impl DcAnalysis {
    fn empty(driver: u32, conductor: u32) -> Self {
        DcAnalysis {
            driver,
            conductor,
            stars: None,
            rating: None,
            meaning: "",
            keywords: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseAnalysis {
    /// Ages 0-40: Moolank drives, Bhagyank conducts
    #[serde(rename = "0-40")]
    pub early: DcAnalysis,

    /// Ages 40-80: the roles swap
    #[serde(rename = "40-80")]
    pub late: DcAnalysis,
}

/// Convert a star string like "★★★⯨" to 3.5
pub fn stars_to_rating(stars: &str) -> Option<f32> {
    let s = stars.trim();
    if s.is_empty() || s.contains('?') {
        return None;
    }
    let full = s.chars().filter(|c| *c == FULL_STAR).count() as f32;
    let half = s.chars().filter(|c| *c == HALF_STAR).count() as f32;
    Some(full + 0.5 * half)
}

/// Split a meaning on ';' into Title Case keywords, first occurrence wins
pub fn meaning_keywords(meaning: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();

    for part in meaning.split(';') {
        let cleaned = strip_parenthesized(part);
        let kw = cleaned
            .split_whitespace()
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ");

        if !kw.is_empty() && !keywords.contains(&kw) {
            keywords.push(kw);
        }
    }

    keywords
}

fn strip_parenthesized(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut depth = 0usize;
    for c in s.chars() {
        match c {
            '(' => depth += 1,
            ')' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
        None => String::new(),
    }
}

/// Look up one driver/conductor combination. Master numbers are reduced first.
pub fn dc_analysis(driver: u32, conductor: u32) -> DcAnalysis {
    let d = reduce(driver, ReduceMode::Legacy);
    let c = reduce(conductor, ReduceMode::Legacy);

    DC_TABLE
        .iter()
        .find(|(td, tc, _, _)| *td == d && *tc == c)
        .map(|&(_, _, stars, meaning)| DcAnalysis {
            driver: d,
            conductor: c,
            stars: if stars == UNKNOWN_RATING { None } else { Some(stars) },
            rating: stars_to_rating(stars),
            meaning,
            keywords: meaning_keywords(meaning),
        })
        .unwrap_or_else(|| DcAnalysis::empty(d, c))
}

pub fn phase_analysis(moolank: u32, bhagyank: u32) -> PhaseAnalysis {
    PhaseAnalysis {
        early: dc_analysis(moolank, bhagyank),
        late: dc_analysis(bhagyank, moolank),
    }
}

// ============================================================================
// TESTS
// ============================================================================
