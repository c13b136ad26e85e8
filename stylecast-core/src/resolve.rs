//! Display-name resolution for the active location.
//!
//! Three candidate sources, ranked: an explicit user search term, a cached
//! reverse-geocoded district name, and the raw name the weather API returns.
//! The ranking keeps a coarse API locality ("İçmeler") from overwriting a
//! more precise district ("Pendik") found via reverse geocoding.

/// Pick the display name: first non-empty of override > cached geocode >
/// API name, then truncated at the first comma and trimmed (handles
/// "City, Country"-style payloads).
pub fn resolve_display_name(
    api_name: &str,
    override_name: Option<&str>,
    cached_geocode: Option<&str>,
) -> String {
    let picked = override_name
        .filter(|s| !s.trim().is_empty())
        .or_else(|| cached_geocode.filter(|s| !s.trim().is_empty()))
        .unwrap_or(api_name);

    picked.split(',').next().unwrap_or(picked).trim().to_string()
}

/// A reverse-geocode result reduced to the two fields the resolver trusts.
///
/// Locality / sub-locality are excluded on purpose: they produce overly
/// narrow, sometimes misleading names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceCandidate {
    /// Finer-grained area, e.g. a district.
    pub sub_administrative_area: Option<String>,
    /// Coarser area, e.g. a province.
    pub administrative_area: Option<String>,
}

/// Reduce a geocode result to a usable name: district first, province as
/// fallback. `None` leaves whatever was previously resolved in effect.
pub fn district_name(place: &PlaceCandidate) -> Option<String> {
    place
        .sub_administrative_area
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| {
            place
                .administrative_area
                .as_deref()
                .filter(|s| !s.trim().is_empty())
        })
        .map(str::to_string)
}

/// Owns the one piece of resolver state: the best-known reverse-geocoded
/// name. Any new location fix, text search, or search-result selection
/// invalidates it.
#[derive(Debug, Default)]
pub struct CityResolver {
    geocoded_name: Option<String>,
}

impl CityResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh location fix was requested; drop the stale geocode.
    pub fn begin_location_fix(&mut self) {
        self.geocoded_name = None;
    }

    /// A text search started; the searched city's name must win.
    pub fn begin_search(&mut self) {
        self.geocoded_name = None;
    }

    /// A search result was explicitly selected.
    pub fn select_search_result(&mut self) {
        self.geocoded_name = None;
    }

    /// Store a reverse-geocode result so the next API payload cannot
    /// overwrite it.
    pub fn record_geocoded(&mut self, name: impl Into<String>) {
        self.geocoded_name = Some(name.into());
    }

    pub fn geocoded_name(&self) -> Option<&str> {
        self.geocoded_name.as_deref()
    }

    /// Resolve against the current cache state.
    pub fn display_name(&self, api_name: &str, override_name: Option<&str>) -> String {
        resolve_display_name(api_name, override_name, self.geocoded_name.as_deref())
    }
}
