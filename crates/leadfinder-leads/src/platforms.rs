//! Detection of every third-party platform referenced by a website URL.

/// Platform labels and the domain fragments that identify them, in report order.
const PLATFORM_LABELS: &[(&str, &[&str])] = &[
    ("Facebook", &["facebook.com", "fb.com"]),
    ("Instagram", &["instagram.com"]),
    ("TikTok", &["tiktok.com"]),
    ("Yelp", &["yelp.com"]),
    ("TripAdvisor", &["tripadvisor.com"]),
    ("GrubHub", &["grubhub.com"]),
    ("DoorDash", &["doordash.com"]),
    ("UberEats", &["ubereats.com"]),
    ("Delivery Site", &["seamless.com", "postmates.com"]),
    ("OpenTable", &["opentable.com"]),
    ("ToastTab", &["toasttab.com"]),
];

/// List every platform whose domain appears in `url`, joined by `", "`.
///
/// Returns an empty string for an absent or blank URL, or when nothing matches.
#[must_use]
pub fn other_platforms(url: Option<&str>) -> String {
    let Some(url) = url.filter(|u| !u.trim().is_empty()) else {
        return String::new();
    };

    let lower = url.to_lowercase();
    PLATFORM_LABELS
        .iter()
        .filter(|(_, fragments)| fragments.iter().any(|f| lower.contains(f)))
        .map(|(label, _)| *label)
        .collect::<Vec<_>>()
        .join(", ")
}
