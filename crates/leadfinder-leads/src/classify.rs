//! Website classification: independent site versus third-party platform profile.

/// Classification of a business's listed website.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebsiteClass {
    /// Machine-readable kind, e.g. `"facebook"`, `"delivery"`, `"real"`, `"none"`.
    pub kind: &'static str,
    /// Human-readable label shown next to the link.
    pub label: &'static str,
    pub is_independent_website: bool,
}

const NO_WEBSITE: WebsiteClass = WebsiteClass {
    kind: "none",
    label: "No website listed",
    is_independent_website: false,
};

const REAL_WEBSITE: WebsiteClass = WebsiteClass {
    kind: "real",
    label: "Website",
    is_independent_website: true,
};

/// Known platform domain fragments as `(fragment, kind, label)`.
///
/// Evaluated top to bottom; the first fragment found in the URL wins.
pub const PLATFORM_TABLE: &[(&str, &str, &str)] = &[
    ("facebook.com", "facebook", "Facebook page"),
    ("fb.com", "facebook", "Facebook page"),
    ("instagram.com", "instagram", "Instagram page"),
    ("tiktok.com", "tiktok", "TikTok page"),
    ("yelp.com", "yelp", "Yelp listing"),
    ("tripadvisor.com", "tripadvisor", "Tripadvisor listing"),
    ("grubhub.com", "grubhub", "Grubhub page"),
    ("doordash.com", "doordash", "DoorDash page"),
    ("ubereats.com", "ubereats", "UberEats page"),
    ("seamless.com", "delivery", "Delivery site"),
    ("postmates.com", "delivery", "Delivery site"),
    ("opentable.com", "reservations", "Reservation page"),
    ("toasttab.com", "ordering", "Ordering page"),
];

/// Classify a listed website URL.
///
/// Absent or blank input classifies as `"none"`. Any URL that does not contain
/// a known platform fragment (case-insensitive) is treated as the business's
/// own site.
#[must_use]
pub fn classify(url: Option<&str>) -> WebsiteClass {
    let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) else {
        return NO_WEBSITE;
    };

    let lower = url.to_lowercase();
    PLATFORM_TABLE
        .iter()
        .find(|(fragment, _, _)| lower.contains(fragment))
        .map_or(REAL_WEBSITE, |&(_, kind, label)| WebsiteClass {
            kind,
            label,
            is_independent_website: false,
        })
}

/// Returns `true` when the URL points at the business's own website.
///
/// Businesses for which this is `false` are the ones worth surfacing as leads.
#[must_use]
pub fn has_independent_website(url: Option<&str>) -> bool {
    classify(url).is_independent_website
}
