//! Maps raw Open Library subject strings onto the shelf's own genre
//! labels and content warnings. The lists are deliberately skewed to
//! what the household actually reads.

/// Lowercase subject substring to display label.
pub const GENRE_MAP: &[(&str, &str)] = &[
    ("dark romance", "Dark Romance"),
    ("romance", "Romance"),
    ("fantasy", "Fantasy"),
    ("science fiction", "Sci-Fi"),
    ("mystery", "Mystery"),
    ("thriller", "Thriller"),
    ("horror", "Horror"),
    ("historical fiction", "Historical Fiction"),
    ("contemporary", "Contemporary"),
    ("young adult", "Young Adult"),
    ("paranormal", "Paranormal"),
    ("erotica", "Erotica"),
    ("suspense", "Suspense"),
    ("adventure", "Adventure"),
    ("dystopian", "Dystopian"),
    ("urban fantasy", "Urban Fantasy"),
    ("new adult", "New Adult"),
    ("mafia", "Mafia Romance"),
    ("bully", "Bully Romance"),
    ("omegaverse", "Omegaverse"),
    ("reverse harem", "Reverse Harem"),
    ("why choose", "Why Choose"),
    ("monster", "Monster Romance"),
    ("sports romance", "Sports Romance"),
    ("small town", "Small Town Romance"),
    ("enemies to lovers", "Enemies to Lovers"),
    ("literary fiction", "Literary Fiction"),
];

/// Lowercase substrings that flag a content warning.
pub const TRIGGER_MAP: &[&str] = &[
    "dubious consent",
    "dub-con",
    "dubcon",
    "non-con",
    "non-consent",
    "noncon",
    "abuse",
    "domestic violence",
    "sexual assault",
    "rape",
    "violence",
    "graphic violence",
    "murder",
    "torture",
    "death",
    "suicide",
    "self-harm",
    "mental health",
    "addiction",
    "drug use",
    "kidnapping",
    "captive",
    "stalking",
    "age gap",
    "dark themes",
    "explicit content",
    "manipulation",
    "possessive",
    "cheating",
    "infidelity",
    "pregnancy",
    "miscarriage",
    "gaslighting",
];

const MAX_GENRES: usize = 8;

/// Matches the subject list against [`GENRE_MAP`], first match per
/// label, capped at eight genres.
pub fn extract_genres(subjects: &[String]) -> Vec<String> {
    let haystack = join_lowercase(subjects);
    let mut genres = Vec::new();
    for (needle, label) in GENRE_MAP {
        if haystack.contains(needle) && !genres.iter().any(|g| g == label) {
            genres.push((*label).to_owned());
            if genres.len() == MAX_GENRES {
                break;
            }
        }
    }
    genres
}

/// Matches the subject list against [`TRIGGER_MAP`] and returns the
/// hits in title case.
pub fn extract_trigger_warnings(subjects: &[String]) -> Vec<String> {
    let haystack = join_lowercase(subjects);
    let mut warnings = Vec::new();
    for needle in TRIGGER_MAP {
        if haystack.contains(needle) {
            let label = title_case(needle);
            if !warnings.contains(&label) {
                warnings.push(label);
            }
        }
    }
    warnings
}

fn join_lowercase(subjects: &[String]) -> String {
    subjects
        .iter()
        .map(|s| s.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercases the first letter of every word, where a word starts after
/// any non-alphanumeric character.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_boundary = true;
    for c in s.chars() {
        if at_boundary {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_boundary = !c.is_alphanumeric();
    }
    out
}
