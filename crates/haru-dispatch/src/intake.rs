//! Errand intake: validate, price, reconcile, persist, fan out.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use haru_core::{
    Errand, ErrandCategory, ErrandStatus, ErrandStop, ProfileStore, RequesterProfile,
    ShoppingItem, ShoppingRange, StoreError, TimeCondition, WeatherCondition, WeightClass,
};
use haru_pricing::{compute, has_heavy_item, reconcile, within_tolerance, PricingInput};

use crate::clock::Clock;
use crate::config::DispatchConfig;
use crate::error::IntakeError;
use crate::notify::FanoutHandle;
use crate::ports::ErrandStore;

/// Display name for requesters with no usable session metadata.
const ANONYMOUS_NAME: &str = "이용자";

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Auth user id.
    pub user_id: String,
    /// Display name from session metadata.
    pub name: Option<String>,
    /// E-mail address.
    pub email: Option<String>,
}

impl Session {
    /// Best-effort display name: metadata name, then the e-mail local part,
    /// then the anonymous label.
    #[must_use]
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref() {
            let name = name.trim();
            if !name.is_empty() {
                return name.to_string();
            }
        }
        if let Some(email) = self.email.as_deref() {
            if let Some((local, _)) = email.split_once('@') {
                if !local.is_empty() {
                    return local.to_string();
                }
            }
        }
        ANONYMOUS_NAME.to_string()
    }
}

/// An extra drop-off in a create request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StopRequest {
    /// Drop-off address.
    pub address: String,
    /// Unit/floor/building detail.
    #[serde(default)]
    pub address_detail: Option<String>,
    /// Latitude, when geocoded.
    #[serde(default)]
    pub lat: Option<f64>,
    /// Longitude, when geocoded.
    #[serde(default)]
    pub lng: Option<f64>,
    /// Recipient name at this stop.
    #[serde(default)]
    pub recipient_name: Option<String>,
    /// Recipient phone at this stop.
    #[serde(default)]
    pub recipient_phone: Option<String>,
}

/// Body of `POST /errands`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateErrandRequest {
    /// Title. Required.
    #[serde(default)]
    pub title: String,
    /// Longer description.
    #[serde(default)]
    pub description: Option<String>,
    /// Category. Required.
    #[serde(default)]
    pub category: Option<ErrandCategory>,
    /// Pickup address. Required.
    #[serde(default)]
    pub pickup_address: String,
    /// Pickup unit/floor/building detail.
    #[serde(default)]
    pub pickup_detail: Option<String>,
    /// Pickup latitude.
    #[serde(default)]
    pub pickup_lat: Option<f64>,
    /// Pickup longitude.
    #[serde(default)]
    pub pickup_lng: Option<f64>,
    /// Delivery address. Required.
    #[serde(default)]
    pub delivery_address: String,
    /// Delivery unit/floor/building detail.
    #[serde(default)]
    pub delivery_detail: Option<String>,
    /// Delivery latitude.
    #[serde(default)]
    pub delivery_lat: Option<f64>,
    /// Delivery longitude.
    #[serde(default)]
    pub delivery_lng: Option<f64>,
    /// Whether this delivery has extra stops.
    #[serde(default)]
    pub is_multi_stop: bool,
    /// Extra drop-offs beyond the primary delivery address.
    #[serde(default)]
    pub stops: Vec<StopRequest>,
    /// Shopping range tier.
    #[serde(default)]
    pub shopping_range: Option<ShoppingRange>,
    /// Shopping item list.
    #[serde(default)]
    pub shopping_items: Vec<ShoppingItem>,
    /// Requester tip, won.
    #[serde(default)]
    pub tip: Option<u32>,
    /// Requested future start time.
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Client-computed fare estimate, won.
    #[serde(default)]
    pub estimated_price: Option<u32>,
    /// Client-supplied routed distance in km (e.g. from an on-device
    /// directions call).
    #[serde(default)]
    pub distance_km: Option<f64>,
    /// Weather at request time, when the client looked it up.
    #[serde(default)]
    pub weather_condition: Option<WeatherCondition>,
    /// Time-of-day condition, when the client derived one.
    #[serde(default)]
    pub time_condition: Option<TimeCondition>,
    /// Goods weight class.
    #[serde(default)]
    pub weight_class: Option<WeightClass>,
}

/// Errand intake service.
///
/// Request-scoped and stateless between requests; the only detached work is
/// notification fan-out, submitted through the handle and never awaited.
pub struct IntakeService<P, E, C> {
    profiles: P,
    errands: E,
    clock: C,
    config: DispatchConfig,
    fanout: Option<FanoutHandle>,
}

impl<P, E, C> IntakeService<P, E, C>
where
    P: ProfileStore,
    E: ErrandStore,
    C: Clock,
{
    /// Create a service without fan-out wired.
    pub fn new(profiles: P, errands: E, clock: C, config: DispatchConfig) -> Self {
        Self {
            profiles,
            errands,
            clock,
            config,
            fanout: None,
        }
    }

    /// Wire the fan-out submission handle.
    #[must_use]
    pub fn with_fanout(mut self, fanout: FanoutHandle) -> Self {
        self.fanout = Some(fanout);
        self
    }

    /// Create an errand for the given session.
    ///
    /// # Errors
    ///
    /// `Unauthenticated` without a session; `Validation` on the first blank
    /// required field; `ProfileResolution` when the profile lookup fails for
    /// a reason other than not-found; `Persistence` when the errand insert
    /// fails. Stop persistence and fan-out failures degrade gracefully and
    /// are not errors.
    pub async fn create_errand(
        &self,
        session: Option<&Session>,
        request: &CreateErrandRequest,
    ) -> Result<Errand, IntakeError> {
        let session = session.ok_or(IntakeError::Unauthenticated)?;
        let requester = self.resolve_profile(session).await?;
        let category = validate(request)?;

        let estimated_distance = match (
            request.pickup_lat,
            request.pickup_lng,
            request.delivery_lat,
            request.delivery_lng,
        ) {
            (Some(p_lat), Some(p_lng), Some(d_lat), Some(d_lng)) => {
                haru_geo::distance_km(p_lat, p_lng, d_lat, d_lng)
            }
            _ => 0.0,
        };
        // Prefer the client's routed distance when it is larger: routed paths
        // are never shorter than the straight line, and undercharging is the
        // failure mode to avoid.
        let pricing_distance = request.distance_km.unwrap_or(0.0).max(estimated_distance);

        let weather = request.weather_condition.unwrap_or(WeatherCondition::Clear);
        let time_of_day = request
            .time_condition
            .unwrap_or_else(|| TimeCondition::from_hour(self.clock.local_hour()));
        let weight = request.weight_class.unwrap_or(WeightClass::Light);

        let input = pricing_input(request, category, pricing_distance, weather, time_of_day, weight);
        let breakdown = compute(&input);

        let client_price = request.estimated_price.unwrap_or(0);
        let tip = request.tip.unwrap_or(0);
        if !within_tolerance(client_price, breakdown.total_price) {
            warn!(
                client_price,
                server_price = breakdown.total_price,
                "client estimate outside tolerance, using server fare"
            );
        }
        let total_price = reconcile(client_price, breakdown.total_price, tip);

        let is_multi_stop = multi_stop(request, category);
        let now = self.clock.now();
        let errand = Errand {
            id: Uuid::new_v4().to_string(),
            requester_id: requester.id,
            helper_id: None,
            title: request.title.trim().to_string(),
            description: trimmed_opt(request.description.as_deref()),
            category,
            pickup_address: request.pickup_address.trim().to_string(),
            pickup_detail: trimmed_opt(request.pickup_detail.as_deref()),
            pickup_lat: request.pickup_lat,
            pickup_lng: request.pickup_lng,
            delivery_address: request.delivery_address.trim().to_string(),
            delivery_detail: trimmed_opt(request.delivery_detail.as_deref()),
            delivery_lat: request.delivery_lat,
            delivery_lng: request.delivery_lng,
            estimated_distance: (estimated_distance > 0.0).then_some(estimated_distance),
            base_price: breakdown.base_price,
            distance_price: breakdown.distance_price,
            stop_fee: breakdown.stop_fee,
            range_fee: breakdown.range_fee,
            item_fee: breakdown.item_fee,
            tip,
            total_price,
            status: ErrandStatus::Open,
            is_multi_stop,
            total_stops: if is_multi_stop {
                request.stops.len() as u32 + 1
            } else {
                1
            },
            shopping_range: (category == ErrandCategory::Shopping)
                .then(|| request.shopping_range.unwrap_or(ShoppingRange::Local)),
            shopping_items: (category == ErrandCategory::Shopping)
                .then(|| request.shopping_items.clone()),
            scheduled_at: request.scheduled_at,
            created_at: now,
            updated_at: now,
        };

        let errand = self
            .errands
            .insert(errand)
            .await
            .map_err(|e| IntakeError::persistence(&e))?;
        info!(errand_id = %errand.id, category = ?errand.category, total_price = errand.total_price,
            "errand created");

        if is_multi_stop {
            self.persist_stops(&errand.id, &request.stops).await;
        }

        if let Some(fanout) = &self.fanout {
            fanout.submit(errand.clone());
        }

        Ok(errand)
    }

    /// Get-or-create the requester's profile. Errands reference a profile
    /// id, never a raw auth user id.
    async fn resolve_profile(&self, session: &Session) -> Result<RequesterProfile, IntakeError> {
        match self.profiles.find_by_user(&session.user_id).await {
            Ok(profile) => Ok(profile),
            Err(StoreError::NotFound) => {
                let profile = RequesterProfile {
                    id: Uuid::new_v4().to_string(),
                    user_id: session.user_id.clone(),
                    name: session.display_name(),
                };
                info!(user_id = %session.user_id, "auto-creating requester profile");
                self.profiles
                    .create(profile)
                    .await
                    .map_err(|e| IntakeError::ProfileResolution(e.to_string()))
            }
            Err(e) => Err(IntakeError::ProfileResolution(e.to_string())),
        }
    }

    /// Persist extra stops. Stop 1 is the errand's own delivery address, so
    /// the first supplied stop gets order 2. A failure here is logged and the
    /// already-persisted errand stands.
    async fn persist_stops(&self, errand_id: &str, stops: &[StopRequest]) {
        if stops.is_empty() {
            return;
        }
        let records: Vec<ErrandStop> = stops
            .iter()
            .enumerate()
            .map(|(i, stop)| ErrandStop {
                errand_id: errand_id.to_string(),
                stop_order: i as u32 + 2,
                address: stop.address.trim().to_string(),
                address_detail: trimmed_opt(stop.address_detail.as_deref()),
                lat: stop.lat,
                lng: stop.lng,
                recipient_name: trimmed_opt(stop.recipient_name.as_deref()),
                recipient_phone: trimmed_opt(stop.recipient_phone.as_deref()),
            })
            .collect();
        if let Err(e) = self.errands.insert_stops(records).await {
            warn!(errand_id = %errand_id, error = %e, "stop persistence failed, errand stands");
        }
    }

    /// The configured dispatch settings.
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }
}

/// Required-field validation, in fixed order: title, pickup address, delivery
/// address, category. Returns the category on success.
fn validate(request: &CreateErrandRequest) -> Result<ErrandCategory, IntakeError> {
    if request.title.trim().is_empty() {
        return Err(IntakeError::Validation("제목을 입력해주세요".to_string()));
    }
    if request.pickup_address.trim().is_empty() {
        return Err(IntakeError::Validation(
            "출발지 주소를 입력해주세요".to_string(),
        ));
    }
    if request.delivery_address.trim().is_empty() {
        return Err(IntakeError::Validation(
            "도착지 주소를 입력해주세요".to_string(),
        ));
    }
    request
        .category
        .ok_or_else(|| IntakeError::Validation("카테고리를 선택해주세요".to_string()))
}

/// Variant selection: shopping is always shopping; delivery is multi-stop iff
/// flagged and carrying more than one stop.
fn pricing_input(
    request: &CreateErrandRequest,
    category: ErrandCategory,
    distance_km: f64,
    weather: WeatherCondition,
    time_of_day: TimeCondition,
    weight: WeightClass,
) -> PricingInput {
    match category {
        ErrandCategory::Shopping => {
            let items: Vec<ShoppingItem> = request
                .shopping_items
                .iter()
                .filter(|item| !item.name.trim().is_empty())
                .cloned()
                .collect();
            PricingInput::Shopping {
                distance_km,
                weather,
                time_of_day,
                range: request.shopping_range.unwrap_or(ShoppingRange::Local),
                item_count: items.len() as u32,
                has_heavy_item: has_heavy_item(&items),
            }
        }
        ErrandCategory::Delivery if multi_stop(request, category) => {
            PricingInput::DeliveryMultiStop {
                distance_km,
                weather,
                time_of_day,
                weight,
                total_stops: request.stops.len() as u32 + 1,
            }
        }
        ErrandCategory::Delivery => PricingInput::DeliverySingle {
            distance_km,
            weather,
            time_of_day,
            weight,
        },
    }
}

fn multi_stop(request: &CreateErrandRequest, category: ErrandCategory) -> bool {
    category == ErrandCategory::Delivery && request.is_multi_stop && !request.stops.is_empty()
}

fn trimmed_opt(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use test_case::test_case;

    use crate::clock::FixedClock;
    use crate::memory::{InMemoryErrandStore, InMemoryProfileStore};

    fn noon_clock() -> FixedClock {
        // 03:00 UTC is noon in Seoul: a plain Day fare.
        FixedClock(
            Utc.with_ymd_and_hms(2025, 3, 1, 3, 0, 0)
                .single()
                .expect("valid instant"),
        )
    }

    fn service() -> IntakeService<InMemoryProfileStore, InMemoryErrandStore, FixedClock> {
        IntakeService::new(
            InMemoryProfileStore::default(),
            InMemoryErrandStore::default(),
            noon_clock(),
            DispatchConfig::default(),
        )
    }

    fn session() -> Session {
        Session {
            user_id: "u-1".to_string(),
            name: Some("김하루".to_string()),
            email: Some("haru@example.com".to_string()),
        }
    }

    fn delivery_request() -> CreateErrandRequest {
        CreateErrandRequest {
            title: "서류 전달".to_string(),
            category: Some(ErrandCategory::Delivery),
            pickup_address: "서울 중구 세종대로 110".to_string(),
            delivery_address: "서울 강남구 테헤란로 152".to_string(),
            distance_km: Some(3.2),
            ..CreateErrandRequest::default()
        }
    }

    #[tokio::test]
    async fn absurd_distance_and_tip_saturate_the_fare() {
        let mut request = delivery_request();
        request.distance_km = Some(1.0e12);
        request.tip = Some(u32::MAX);

        let errand = service()
            .create_errand(Some(&session()), &request)
            .await
            .expect("created");
        assert_eq!(errand.distance_price, u32::MAX);
        assert_eq!(errand.total_price, u32::MAX);
    }

    #[tokio::test]
    async fn rejects_missing_session() {
        let result = service().create_errand(None, &delivery_request()).await;
        assert!(matches!(result, Err(IntakeError::Unauthenticated)));
    }

    #[test_case(
        CreateErrandRequest { title: "  ".to_string(), ..delivery_request() },
        "제목을 입력해주세요"; "blank title")]
    #[test_case(
        CreateErrandRequest { pickup_address: String::new(), ..delivery_request() },
        "출발지 주소를 입력해주세요"; "blank pickup")]
    #[test_case(
        CreateErrandRequest { delivery_address: String::new(), ..delivery_request() },
        "도착지 주소를 입력해주세요"; "blank delivery")]
    #[test_case(
        CreateErrandRequest { category: None, ..delivery_request() },
        "카테고리를 선택해주세요"; "missing category")]
    #[tokio::test]
    async fn validation_reports_first_violated_field(
        request: CreateErrandRequest,
        expected: &str,
    ) {
        let result = service().create_errand(Some(&session()), &request).await;
        match result {
            Err(IntakeError::Validation(message)) => assert_eq!(message, expected),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn validation_order_is_title_first() {
        let request = CreateErrandRequest {
            title: String::new(),
            pickup_address: String::new(),
            category: None,
            ..delivery_request()
        };
        match service().create_errand(Some(&session()), &request).await {
            Err(IntakeError::Validation(message)) => assert_eq!(message, "제목을 입력해주세요"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn auto_creates_profile_from_session_name() {
        let profiles = InMemoryProfileStore::default();
        let errands = InMemoryErrandStore::default();
        let service = IntakeService::new(
            profiles.clone(),
            errands,
            noon_clock(),
            DispatchConfig::default(),
        );

        let errand = service
            .create_errand(Some(&session()), &delivery_request())
            .await
            .expect("created");

        let profile = profiles.find_by_user("u-1").await.expect("provisioned");
        assert_eq!(profile.name, "김하루");
        assert_eq!(errand.requester_id, profile.id);
    }

    #[test_case(None, Some("mina@haru.run"), "mina"; "email local part")]
    #[test_case(None, None, "이용자"; "anonymous fallback")]
    #[test_case(Some("  "), None, "이용자"; "blank name falls through")]
    fn display_name_fallback(name: Option<&str>, email: Option<&str>, expected: &str) {
        let session = Session {
            user_id: "u-9".to_string(),
            name: name.map(str::to_string),
            email: email.map(str::to_string),
        };
        assert_eq!(session.display_name(), expected);
    }

    #[tokio::test]
    async fn reuses_existing_profile() {
        let profiles = InMemoryProfileStore::default();
        profiles.seed(RequesterProfile {
            id: "p-77".to_string(),
            user_id: "u-1".to_string(),
            name: "기존 사용자".to_string(),
        });
        let service = IntakeService::new(
            profiles,
            InMemoryErrandStore::default(),
            noon_clock(),
            DispatchConfig::default(),
        );

        let errand = service
            .create_errand(Some(&session()), &delivery_request())
            .await
            .expect("created");
        assert_eq!(errand.requester_id, "p-77");
    }

    #[tokio::test]
    async fn larger_client_distance_wins() {
        // Straight line ≈ 8.9 km; routed distance 12.0 km should be priced.
        let request = CreateErrandRequest {
            pickup_lat: Some(37.5665),
            pickup_lng: Some(126.978),
            delivery_lat: Some(37.5000),
            delivery_lng: Some(127.0364),
            distance_km: Some(12.0),
            ..delivery_request()
        };
        let errand = service()
            .create_errand(Some(&session()), &request)
            .await
            .expect("created");
        assert_eq!(errand.distance_price, 14_400);
        // The straight-line estimate is still recorded.
        let recorded = errand.estimated_distance.expect("estimated");
        assert!((8.0..10.0).contains(&recorded));
    }

    #[tokio::test]
    async fn haversine_estimate_wins_over_smaller_client_distance() {
        let request = CreateErrandRequest {
            pickup_lat: Some(37.5665),
            pickup_lng: Some(126.978),
            delivery_lat: Some(37.5000),
            delivery_lng: Some(127.0364),
            distance_km: Some(0.5),
            ..delivery_request()
        };
        let errand = service()
            .create_errand(Some(&session()), &request)
            .await
            .expect("created");
        // Priced from the ≈8.9 km estimate, not the understated 0.5 km.
        assert!(errand.distance_price > 9_000);
    }

    #[tokio::test]
    async fn missing_coordinates_degrade_to_zero_distance() {
        let request = CreateErrandRequest {
            distance_km: None,
            ..delivery_request()
        };
        let errand = service()
            .create_errand(Some(&session()), &request)
            .await
            .expect("created");
        assert_eq!(errand.estimated_distance, None);
        assert_eq!(errand.distance_price, 0);
        assert_eq!(errand.base_price, 3_000);
    }

    #[tokio::test]
    async fn time_default_comes_from_clock() {
        // 17:00 UTC is 02:00 KST: late night.
        let late_night = FixedClock(
            Utc.with_ymd_and_hms(2025, 3, 1, 17, 0, 0)
                .single()
                .expect("valid instant"),
        );
        let service = IntakeService::new(
            InMemoryProfileStore::default(),
            InMemoryErrandStore::default(),
            late_night,
            DispatchConfig::default(),
        );
        let request = CreateErrandRequest {
            time_condition: None,
            distance_km: None,
            ..delivery_request()
        };
        let errand = service
            .create_errand(Some(&session()), &request)
            .await
            .expect("created");
        assert_eq!(errand.base_price, 3_000 + 5_000);
    }

    #[tokio::test]
    async fn client_estimate_within_band_is_trusted() {
        // Server fare: 3000 + 3840 = 6840. Client declares 7200 (within 10%).
        let request = CreateErrandRequest {
            estimated_price: Some(7_200),
            tip: Some(1_000),
            ..delivery_request()
        };
        let errand = service()
            .create_errand(Some(&session()), &request)
            .await
            .expect("created");
        assert_eq!(errand.total_price, 8_200);
        assert_eq!(errand.tip, 1_000);
    }

    #[tokio::test]
    async fn tampered_client_estimate_is_replaced() {
        let request = CreateErrandRequest {
            estimated_price: Some(100_000),
            tip: Some(1_000),
            ..delivery_request()
        };
        let errand = service()
            .create_errand(Some(&session()), &request)
            .await
            .expect("created");
        assert_eq!(errand.total_price, 6_840 + 1_000);
    }

    #[tokio::test]
    async fn multi_stop_persists_ordered_stops() {
        let errands = InMemoryErrandStore::default();
        let service = IntakeService::new(
            InMemoryProfileStore::default(),
            errands.clone(),
            noon_clock(),
            DispatchConfig::default(),
        );
        let request = CreateErrandRequest {
            is_multi_stop: true,
            stops: vec![
                StopRequest {
                    address: "서울 마포구 양화로 45".to_string(),
                    recipient_name: Some("박서연".to_string()),
                    ..StopRequest::default()
                },
                StopRequest {
                    address: "서울 용산구 한강대로 23".to_string(),
                    ..StopRequest::default()
                },
            ],
            ..delivery_request()
        };

        let errand = service
            .create_errand(Some(&session()), &request)
            .await
            .expect("created");
        assert!(errand.is_multi_stop);
        assert_eq!(errand.total_stops, 3);
        assert_eq!(errand.stop_fee, 3_000);

        let stops = errands.stops_for(&errand.id);
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].stop_order, 2);
        assert_eq!(stops[0].address, "서울 마포구 양화로 45");
        assert_eq!(stops[1].stop_order, 3);
    }

    #[tokio::test]
    async fn multi_stop_flag_without_stops_prices_single() {
        let request = CreateErrandRequest {
            is_multi_stop: true,
            stops: vec![],
            ..delivery_request()
        };
        let errand = service()
            .create_errand(Some(&session()), &request)
            .await
            .expect("created");
        assert!(!errand.is_multi_stop);
        assert_eq!(errand.total_stops, 1);
        assert_eq!(errand.stop_fee, 0);
    }

    #[tokio::test]
    async fn shopping_request_prices_items_and_heavy_flag() {
        let base = delivery_request();
        let request = CreateErrandRequest {
            category: Some(ErrandCategory::Shopping),
            shopping_range: Some(ShoppingRange::District),
            shopping_items: vec![
                ShoppingItem {
                    name: "생수 2L".to_string(),
                    quantity: 6,
                    note: None,
                },
                ShoppingItem {
                    name: "가구".to_string(),
                    quantity: 1,
                    note: Some("무거운 가구".to_string()),
                },
                ShoppingItem {
                    name: "  ".to_string(),
                    quantity: 1,
                    note: None,
                },
            ],
            distance_km: None,
            ..base
        };
        let errand = service()
            .create_errand(Some(&session()), &request)
            .await
            .expect("created");
        assert_eq!(errand.category, ErrandCategory::Shopping);
        assert_eq!(errand.range_fee, 3_000);
        // Two named items within the free allowance; heavy note adds 10,000.
        assert_eq!(errand.item_fee, 10_000);
        assert_eq!(errand.stop_fee, 0);
        assert_eq!(errand.shopping_range, Some(ShoppingRange::District));
    }

    #[tokio::test]
    async fn shopping_without_heavy_note_has_lower_item_fee() {
        let request = CreateErrandRequest {
            category: Some(ErrandCategory::Shopping),
            shopping_range: Some(ShoppingRange::Local),
            shopping_items: vec![ShoppingItem {
                name: "가구".to_string(),
                quantity: 1,
                note: None,
            }],
            distance_km: None,
            ..delivery_request()
        };
        let errand = service()
            .create_errand(Some(&session()), &request)
            .await
            .expect("created");
        assert_eq!(errand.item_fee, 0);
    }

    #[tokio::test]
    async fn profile_backend_failure_is_fatal() {
        struct FailingProfiles;
        impl ProfileStore for FailingProfiles {
            async fn find_by_user(&self, _: &str) -> Result<RequesterProfile, StoreError> {
                Err(StoreError::Backend("connection refused".to_string()))
            }
            async fn create(&self, _: RequesterProfile) -> Result<RequesterProfile, StoreError> {
                Err(StoreError::Backend("connection refused".to_string()))
            }
        }

        let service = IntakeService::new(
            FailingProfiles,
            InMemoryErrandStore::default(),
            noon_clock(),
            DispatchConfig::default(),
        );
        let result = service
            .create_errand(Some(&session()), &delivery_request())
            .await;
        assert!(matches!(result, Err(IntakeError::ProfileResolution(_))));
    }

    #[tokio::test]
    async fn stop_insert_failure_leaves_errand_standing() {
        #[derive(Clone, Default)]
        struct NoStops(InMemoryErrandStore);
        impl ErrandStore for NoStops {
            async fn insert(&self, errand: Errand) -> Result<Errand, StoreError> {
                self.0.insert(errand).await
            }
            async fn insert_stops(&self, _: Vec<ErrandStop>) -> Result<(), StoreError> {
                Err(StoreError::Backend("stop table unavailable".to_string()))
            }
        }

        let store = NoStops::default();
        let service = IntakeService::new(
            InMemoryProfileStore::default(),
            store.clone(),
            noon_clock(),
            DispatchConfig::default(),
        );
        let request = CreateErrandRequest {
            is_multi_stop: true,
            stops: vec![StopRequest {
                address: "서울 마포구".to_string(),
                ..StopRequest::default()
            }],
            ..delivery_request()
        };

        let errand = service
            .create_errand(Some(&session()), &request)
            .await
            .expect("errand survives stop failure");
        assert_eq!(store.0.all().len(), 1);
        assert!(store.0.stops_for(&errand.id).is_empty());
    }

    #[tokio::test]
    async fn insert_failure_is_persistence_error() {
        struct FailingStore;
        impl ErrandStore for FailingStore {
            async fn insert(&self, _: Errand) -> Result<Errand, StoreError> {
                Err(StoreError::Backend("disk full".to_string()))
            }
            async fn insert_stops(&self, _: Vec<ErrandStop>) -> Result<(), StoreError> {
                Ok(())
            }
        }

        let service = IntakeService::new(
            InMemoryProfileStore::default(),
            FailingStore,
            noon_clock(),
            DispatchConfig::default(),
        );
        let result = service
            .create_errand(Some(&session()), &delivery_request())
            .await;
        match result {
            Err(IntakeError::Persistence { message, code, .. }) => {
                assert!(message.contains("disk full"));
                assert_eq!(code, "ERRAND_INSERT_FAILED");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
