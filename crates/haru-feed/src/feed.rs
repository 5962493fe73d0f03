//! Feed assembly: filter, annotate, sort.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use haru_core::{Errand, ErrandCategory, ErrandStatus, ProfileStore, StoreError};

use crate::error::FeedError;
use crate::ports::{ApplicationCounter, ErrandDirectory, ListFilter};

/// Default page size.
const DEFAULT_LIMIT: u32 = 20;

/// Who the feed is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedMode {
    /// Everything, subject to the explicit filters.
    #[default]
    All,
    /// The caller's own errands.
    My,
    /// Open errands a helper can apply to.
    Available,
}

/// Feed ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedSort {
    /// Newest created first (the store's order).
    #[default]
    Newest,
    /// Nearest pickup first; entries without pickup coordinates sort last.
    Distance,
    /// Highest total price first.
    Price,
}

/// Feed query parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedQuery {
    /// Exact status filter; `None` means all.
    pub status: Option<ErrandStatus>,
    /// Exact category filter.
    pub category: Option<ErrandCategory>,
    /// Viewer mode.
    pub mode: FeedMode,
    /// Page size, capped by the caller.
    pub limit: u32,
    /// Page start.
    pub offset: u32,
    /// Helper position (lat, lng); enables distance annotation in
    /// `Available` mode.
    pub origin: Option<(f64, f64)>,
    /// Exclude errands farther than this many km from the origin. Entries
    /// with unknown distance are never excluded.
    pub max_distance_km: Option<f64>,
    /// Ordering.
    pub sort: FeedSort,
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self {
            status: None,
            category: None,
            mode: FeedMode::All,
            limit: DEFAULT_LIMIT,
            offset: 0,
            origin: None,
            max_distance_km: None,
            sort: FeedSort::Newest,
        }
    }
}

/// One feed entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedErrand {
    /// The errand.
    pub errand: Errand,
    /// Straight-line km from the viewer's position to the pickup point,
    /// rounded to one decimal; `None` when either side lacks coordinates.
    pub distance_km: Option<f64>,
    /// Pending applications against this errand. Populated only for the
    /// caller's own still-open errands; 0 otherwise.
    pub pending_applications: u64,
}

/// A feed page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedPage {
    /// Entries in final order.
    pub errands: Vec<FeedErrand>,
    /// Total store matches before pagination. The distance bound is applied
    /// after the store slices the page, so this still counts entries the
    /// bound excluded and a page can hold fewer than `limit` entries.
    pub total: u64,
    /// Echoed page size.
    pub limit: u32,
    /// Echoed page start.
    pub offset: u32,
}

/// Errand feed service. Read-only: never mutates an errand.
pub struct FeedService<D, P, A> {
    directory: D,
    profiles: P,
    applications: A,
}

impl<D, P, A> FeedService<D, P, A>
where
    D: ErrandDirectory,
    P: ProfileStore,
    A: ApplicationCounter,
{
    /// Create a feed service.
    pub fn new(directory: D, profiles: P, applications: A) -> Self {
        Self {
            directory,
            profiles,
            applications,
        }
    }

    /// List errands for a viewer.
    ///
    /// # Errors
    ///
    /// `Unauthenticated` for `My` mode without a viewer; `Backend` when the
    /// store fails.
    pub async fn list_errands(
        &self,
        viewer_user_id: Option<&str>,
        query: &FeedQuery,
    ) -> Result<FeedPage, FeedError> {
        let requester_id = match query.mode {
            FeedMode::My => {
                let user_id = viewer_user_id.ok_or(FeedError::Unauthenticated)?;
                match self.profiles.find_by_user(user_id).await {
                    Ok(profile) => Some(profile.id),
                    // No profile yet means no errands yet.
                    Err(StoreError::NotFound) => {
                        return Ok(FeedPage {
                            errands: Vec::new(),
                            total: 0,
                            limit: query.limit,
                            offset: query.offset,
                        });
                    }
                    Err(e) => return Err(FeedError::Backend(e.to_string())),
                }
            }
            FeedMode::All | FeedMode::Available => None,
        };

        let filter = ListFilter {
            requester_id,
            status: match query.mode {
                // Helpers only ever see open errands.
                FeedMode::Available => Some(ErrandStatus::Open),
                FeedMode::All | FeedMode::My => query.status,
            },
            category: query.category,
            limit: query.limit,
            offset: query.offset,
        };
        let page = self
            .directory
            .list(&filter)
            .await
            .map_err(|e| FeedError::Backend(e.to_string()))?;
        debug!(mode = ?query.mode, count = page.errands.len(), total = page.total, "feed page loaded");

        let origin = match query.mode {
            FeedMode::Available => query.origin,
            FeedMode::All | FeedMode::My => None,
        };
        let mut entries: Vec<FeedErrand> = Vec::with_capacity(page.errands.len());
        for errand in page.errands {
            let distance_km = origin.map(|(lat, lng)| annotate_distance(lat, lng, &errand));
            let pending_applications = if query.mode == FeedMode::My {
                self.pending_for(&errand).await
            } else {
                0
            };
            entries.push(FeedErrand {
                errand,
                distance_km: distance_km.flatten(),
                pending_applications,
            });
        }

        if origin.is_some() {
            if let Some(bound) = query.max_distance_km.filter(|b| *b > 0.0) {
                // Unknown distance means "don't exclude".
                entries.retain(|e| e.distance_km.is_none_or(|d| d <= bound));
            }
        }
        sort_entries(&mut entries, query.sort, origin.is_some());

        Ok(FeedPage {
            errands: entries,
            total: page.total,
            limit: query.limit,
            offset: query.offset,
        })
    }

    /// Demand signal for the requester's own open errands. Non-open errands
    /// always report 0 regardless of historical applications; a count
    /// failure degrades to 0.
    async fn pending_for(&self, errand: &Errand) -> u64 {
        if errand.status != ErrandStatus::Open {
            return 0;
        }
        match self.applications.pending_count(&errand.id).await {
            Ok(count) => count,
            Err(e) => {
                warn!(errand_id = %errand.id, error = %e, "application count failed");
                0
            }
        }
    }
}

fn annotate_distance(lat: f64, lng: f64, errand: &Errand) -> Option<f64> {
    errand.pickup_coords().map(|(p_lat, p_lng)| {
        let km = haru_geo::distance_km(lat, lng, p_lat, p_lng);
        (km * 10.0).round() / 10.0
    })
}

fn sort_entries(entries: &mut [FeedErrand], sort: FeedSort, geo_enabled: bool) {
    match sort {
        FeedSort::Distance if geo_enabled => {
            // Stable: unknown distances keep their relative order at the end.
            entries.sort_by(|a, b| match (a.distance_km, b.distance_km) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            });
        }
        FeedSort::Price => {
            entries.sort_by(|a, b| b.errand.total_price.cmp(&a.errand.total_price));
        }
        // Chronological order comes from the store.
        FeedSort::Newest | FeedSort::Distance => {}
    }
}
