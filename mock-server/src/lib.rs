//! In-memory stand-in for the NGO admin API, used by integration tests and
//! local development.
//!
//! Matches the production contract: bearer-authenticated routes under `/api`,
//! multipart/form-data writes with optional file attachments (files become
//! `/uploads/{name}` URLs, nothing touches disk), JSON error bodies shaped
//! `{"error": "..."}`, 201 on create, 204 on delete, and server-computed
//! metrics for activities and donations.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, put},
    Json, Router,
};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::Serialize;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

// --- records ---

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: Uuid,
    pub title: String,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: Uuid,
    pub title: String,
    pub date: NaiveDate,
    pub description: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpEntry {
    pub id: Uuid,
    pub event_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub mpesa_phone: String,
    pub whatsapp_phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub date: NaiveDate,
    pub location: String,
    pub description: String,
    pub seats_available: u32,
    pub fee: f64,
    pub google_maps_link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsvp_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsvp_list: Option<Vec<RsvpEntry>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: Uuid,
    pub name: String,
    pub logo_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Poster {
    pub id: Uuid,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub image_url: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- metrics ---

#[derive(Debug, Serialize)]
pub struct ActivityMonthlyStats {
    pub name: Option<String>,
    pub activities: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityStats {
    pub total: u32,
    pub with_images: u32,
    pub avg_description_length: f64,
    pub recent_activities: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityMetrics {
    pub monthly_stats: Vec<ActivityMonthlyStats>,
    pub stats: ActivityStats,
}

#[derive(Debug, Serialize)]
pub struct DonationMonthlyStats {
    pub name: Option<String>,
    pub donations: u32,
    // this one field ships snake_case in production, keep the quirk
    pub unique_locations: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationStats {
    pub location: String,
    pub count: u32,
    pub last_donation: NaiveDate,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationStats {
    pub total: u32,
    pub unique_locations: u32,
    pub with_images: u32,
    pub recent_donations: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationMetrics {
    pub monthly_stats: Vec<DonationMonthlyStats>,
    pub top_locations: Vec<LocationStats>,
    pub stats: DonationStats,
}

// --- state ---

#[derive(Default)]
pub struct Store {
    activities: HashMap<Uuid, Activity>,
    donations: HashMap<Uuid, Donation>,
    events: HashMap<Uuid, Event>,
    rsvps: HashMap<Uuid, RsvpEntry>,
    partners: HashMap<Uuid, Partner>,
    contacts: HashMap<Uuid, Contact>,
    posters: HashMap<Uuid, Poster>,
}

pub type Db = Arc<RwLock<Store>>;

// --- errors ---

/// Failure response carrying the API's `{"error": "..."}` body shape.
pub struct ApiFailure {
    status: StatusCode,
    message: String,
}

impl ApiFailure {
    fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: "Unauthorized".to_string(),
        }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

// --- router ---

pub fn app() -> Router {
    let db = Db::default();
    let api = Router::new()
        .route("/activities", get(list_activities).post(create_activity))
        .route("/activities/metrics", get(activity_metrics))
        .route("/activities/{id}", put(update_activity).delete(delete_activity))
        .route("/donations", get(list_donations).post(create_donation))
        .route("/donations/metrics", get(donation_metrics))
        .route("/donations/{id}", put(update_donation).delete(delete_donation))
        .route("/events", get(list_events).post(create_event))
        .route("/events/{id}", put(update_event).delete(delete_event))
        .route("/events/{id}/rsvp", get(list_rsvps).post(create_rsvp))
        .route("/events/{id}/rsvp/{rsvp_id}", put(update_rsvp).delete(delete_rsvp))
        .route("/partners", get(list_partners).post(create_partner))
        .route("/partners/{id}", put(update_partner).delete(delete_partner))
        .route("/contacts", get(list_contacts).post(create_contact))
        .route("/contacts/{id}", delete(delete_contact))
        .route("/posters", get(list_posters).post(create_poster))
        .route("/posters/{id}", put(update_poster).delete(delete_poster))
        .route("/posters/{id}/toggle", patch(toggle_poster))
        .layer(middleware::from_fn(require_bearer))
        .with_state(db);
    Router::new().nest("/api", api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Any non-empty bearer token is accepted; the point is to exercise the
/// client's credential plumbing, not to verify tokens.
async fn require_bearer(request: Request, next: Next) -> Result<Response, ApiFailure> {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| !token.is_empty());
    if !authorized {
        return Err(ApiFailure::unauthorized());
    }
    Ok(next.run(request).await)
}

// --- multipart intake ---

struct Form {
    fields: HashMap<String, String>,
    files: HashMap<String, String>,
}

impl Form {
    async fn read(mut multipart: Multipart) -> Result<Self, ApiFailure> {
        let mut fields = HashMap::new();
        let mut files = HashMap::new();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiFailure::bad_request(e.to_string()))?
        {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_string);
            match file_name {
                Some(file_name) => {
                    // drain the bytes, serve the attachment as a URL
                    field
                        .bytes()
                        .await
                        .map_err(|e| ApiFailure::bad_request(e.to_string()))?;
                    files.insert(name, format!("/uploads/{file_name}"));
                }
                None => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| ApiFailure::bad_request(e.to_string()))?;
                    fields.insert(name, value);
                }
            }
        }
        Ok(Self { fields, files })
    }

    fn text(&self, name: &str) -> Result<String, ApiFailure> {
        self.fields
            .get(name)
            .cloned()
            .ok_or_else(|| ApiFailure::bad_request(format!("Missing field: {name}")))
    }

    fn date(&self, name: &str) -> Result<NaiveDate, ApiFailure> {
        self.text(name)?
            .parse()
            .map_err(|_| ApiFailure::bad_request(format!("Invalid date in field: {name}")))
    }

    fn number<T: FromStr>(&self, name: &str) -> Result<T, ApiFailure> {
        self.text(name)?
            .parse()
            .map_err(|_| ApiFailure::bad_request(format!("Invalid number in field: {name}")))
    }

    fn flag(&self, name: &str) -> Result<bool, ApiFailure> {
        self.text(name)?
            .parse()
            .map_err(|_| ApiFailure::bad_request(format!("Invalid flag in field: {name}")))
    }

    fn file(&self, name: &str) -> Option<String> {
        self.files.get(name).cloned()
    }
}

// --- activities ---

async fn list_activities(State(db): State<Db>) -> Json<Vec<Activity>> {
    let store = db.read().await;
    let mut activities: Vec<Activity> = store.activities.values().cloned().collect();
    activities.sort_by_key(|a| a.created_at);
    Json(activities)
}

async fn create_activity(
    State(db): State<Db>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Activity>), ApiFailure> {
    let form = Form::read(multipart).await?;
    let now = Utc::now();
    let activity = Activity {
        id: Uuid::new_v4(),
        title: form.text("title")?,
        date: form.date("date")?,
        image_url: form.file("image"),
        description: form.text("description")?,
        created_at: now,
        updated_at: now,
    };
    db.write().await.activities.insert(activity.id, activity.clone());
    Ok((StatusCode::CREATED, Json(activity)))
}

async fn update_activity(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<Activity>, ApiFailure> {
    let form = Form::read(multipart).await?;
    let mut store = db.write().await;
    let activity = store
        .activities
        .get_mut(&id)
        .ok_or_else(|| ApiFailure::not_found("Activity not found"))?;
    activity.title = form.text("title")?;
    activity.date = form.date("date")?;
    activity.description = form.text("description")?;
    if let Some(url) = form.file("image") {
        activity.image_url = Some(url);
    }
    activity.updated_at = Utc::now();
    Ok(Json(activity.clone()))
}

async fn delete_activity(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiFailure> {
    db.write()
        .await
        .activities
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| ApiFailure::not_found("Activity not found"))
}

async fn activity_metrics(State(db): State<Db>) -> Json<ActivityMetrics> {
    let store = db.read().await;
    let activities: Vec<&Activity> = store.activities.values().collect();

    let mut by_month: BTreeMap<(i32, u32), u32> = BTreeMap::new();
    for activity in &activities {
        *by_month
            .entry((activity.date.year(), activity.date.month()))
            .or_default() += 1;
    }
    let monthly_stats = by_month
        .into_iter()
        .map(|((year, month), count)| ActivityMonthlyStats {
            name: month_name(year, month),
            activities: count,
        })
        .collect();

    let total = activities.len() as u32;
    let with_images = activities.iter().filter(|a| a.image_url.is_some()).count() as u32;
    let avg_description_length = if activities.is_empty() {
        0.0
    } else {
        activities.iter().map(|a| a.description.len()).sum::<usize>() as f64 / total as f64
    };
    let cutoff = Utc::now().date_naive() - Duration::days(30);
    let recent_activities = activities.iter().filter(|a| a.date >= cutoff).count() as u32;

    Json(ActivityMetrics {
        monthly_stats,
        stats: ActivityStats {
            total,
            with_images,
            avg_description_length,
            recent_activities,
        },
    })
}

// --- donations ---

async fn list_donations(State(db): State<Db>) -> Json<Vec<Donation>> {
    let store = db.read().await;
    let mut donations: Vec<Donation> = store.donations.values().cloned().collect();
    donations.sort_by_key(|d| d.created_at);
    Json(donations)
}

async fn create_donation(
    State(db): State<Db>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Donation>), ApiFailure> {
    let form = Form::read(multipart).await?;
    let now = Utc::now();
    let donation = Donation {
        id: Uuid::new_v4(),
        title: form.text("title")?,
        date: form.date("date")?,
        description: form.text("description")?,
        location: form.text("location")?,
        image_url: form.file("image"),
        created_at: now,
        updated_at: now,
    };
    db.write().await.donations.insert(donation.id, donation.clone());
    Ok((StatusCode::CREATED, Json(donation)))
}

async fn update_donation(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<Donation>, ApiFailure> {
    let form = Form::read(multipart).await?;
    let mut store = db.write().await;
    let donation = store
        .donations
        .get_mut(&id)
        .ok_or_else(|| ApiFailure::not_found("Donation not found"))?;
    donation.title = form.text("title")?;
    donation.date = form.date("date")?;
    donation.description = form.text("description")?;
    donation.location = form.text("location")?;
    if let Some(url) = form.file("image") {
        donation.image_url = Some(url);
    }
    donation.updated_at = Utc::now();
    Ok(Json(donation.clone()))
}

async fn delete_donation(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiFailure> {
    db.write()
        .await
        .donations
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| ApiFailure::not_found("Donation not found"))
}

async fn donation_metrics(State(db): State<Db>) -> Json<DonationMetrics> {
    let store = db.read().await;
    let donations: Vec<&Donation> = store.donations.values().collect();

    let mut by_month: BTreeMap<(i32, u32), Vec<&Donation>> = BTreeMap::new();
    for donation in &donations {
        by_month
            .entry((donation.date.year(), donation.date.month()))
            .or_default()
            .push(donation);
    }
    let monthly_stats = by_month
        .into_iter()
        .map(|((year, month), group)| {
            let mut locations: Vec<&str> = group.iter().map(|d| d.location.as_str()).collect();
            locations.sort_unstable();
            locations.dedup();
            DonationMonthlyStats {
                name: month_name(year, month),
                donations: group.len() as u32,
                unique_locations: locations.len() as u32,
            }
        })
        .collect();

    let mut by_location: HashMap<&str, (u32, NaiveDate)> = HashMap::new();
    for donation in &donations {
        let entry = by_location
            .entry(donation.location.as_str())
            .or_insert((0, donation.date));
        entry.0 += 1;
        entry.1 = entry.1.max(donation.date);
    }
    let mut top_locations: Vec<LocationStats> = by_location
        .into_iter()
        .map(|(location, (count, last_donation))| LocationStats {
            location: location.to_string(),
            count,
            last_donation,
        })
        .collect();
    top_locations.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.location.cmp(&b.location)));
    top_locations.truncate(5);

    let total = donations.len() as u32;
    let unique_locations = {
        let mut locations: Vec<&str> = donations.iter().map(|d| d.location.as_str()).collect();
        locations.sort_unstable();
        locations.dedup();
        locations.len() as u32
    };
    let with_images = donations.iter().filter(|d| d.image_url.is_some()).count() as u32;
    let cutoff = Utc::now().date_naive() - Duration::days(30);
    let recent_donations = donations.iter().filter(|d| d.date >= cutoff).count() as u32;

    Json(DonationMetrics {
        monthly_stats,
        top_locations,
        stats: DonationStats {
            total,
            unique_locations,
            with_images,
            recent_donations,
        },
    })
}

fn month_name(year: i32, month: u32) -> Option<String> {
    NaiveDate::from_ymd_opt(year, month, 1).map(|d| d.format("%b %Y").to_string())
}

// --- events & RSVPs ---

fn with_rsvps(mut event: Event, store: &Store) -> Event {
    let mut rsvps: Vec<RsvpEntry> = store
        .rsvps
        .values()
        .filter(|r| r.event_id == event.id)
        .cloned()
        .collect();
    rsvps.sort_by_key(|r| r.created_at);
    event.rsvp_count = Some(rsvps.len() as u32);
    event.rsvp_list = Some(rsvps);
    event
}

async fn list_events(State(db): State<Db>) -> Json<Vec<Event>> {
    let store = db.read().await;
    let mut events: Vec<Event> = store
        .events
        .values()
        .map(|e| with_rsvps(e.clone(), &store))
        .collect();
    events.sort_by_key(|e| e.created_at);
    Json(events)
}

async fn create_event(
    State(db): State<Db>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Event>), ApiFailure> {
    let form = Form::read(multipart).await?;
    let now = Utc::now();
    let event = Event {
        id: Uuid::new_v4(),
        title: form.text("title")?,
        date: form.date("date")?,
        location: form.text("location")?,
        description: form.text("description")?,
        seats_available: form.number("seatsAvailable")?,
        fee: form.number("fee")?,
        google_maps_link: form.text("googleMapsLink")?,
        image_url: form.file("image"),
        rsvp_count: None,
        rsvp_list: None,
        created_at: now,
        updated_at: now,
    };
    let mut store = db.write().await;
    store.events.insert(event.id, event.clone());
    let event = with_rsvps(event, &store);
    Ok((StatusCode::CREATED, Json(event)))
}

async fn update_event(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<Event>, ApiFailure> {
    let form = Form::read(multipart).await?;
    let mut store = db.write().await;
    let event = store
        .events
        .get_mut(&id)
        .ok_or_else(|| ApiFailure::not_found("Event not found"))?;
    event.title = form.text("title")?;
    event.date = form.date("date")?;
    event.location = form.text("location")?;
    event.description = form.text("description")?;
    event.seats_available = form.number("seatsAvailable")?;
    event.fee = form.number("fee")?;
    event.google_maps_link = form.text("googleMapsLink")?;
    if let Some(url) = form.file("image") {
        event.image_url = Some(url);
    }
    event.updated_at = Utc::now();
    let event = event.clone();
    Ok(Json(with_rsvps(event, &store)))
}

async fn delete_event(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiFailure> {
    let mut store = db.write().await;
    store
        .events
        .remove(&id)
        .ok_or_else(|| ApiFailure::not_found("Event not found"))?;
    // registrations do not outlive their event
    store.rsvps.retain(|_, r| r.event_id != id);
    Ok(StatusCode::NO_CONTENT)
}

async fn list_rsvps(
    State(db): State<Db>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<Vec<RsvpEntry>>, ApiFailure> {
    let store = db.read().await;
    if !store.events.contains_key(&event_id) {
        return Err(ApiFailure::not_found("Event not found"));
    }
    let mut rsvps: Vec<RsvpEntry> = store
        .rsvps
        .values()
        .filter(|r| r.event_id == event_id)
        .cloned()
        .collect();
    rsvps.sort_by_key(|r| r.created_at);
    Ok(Json(rsvps))
}

async fn create_rsvp(
    State(db): State<Db>,
    Path(event_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<RsvpEntry>), ApiFailure> {
    let form = Form::read(multipart).await?;
    let mut store = db.write().await;
    if !store.events.contains_key(&event_id) {
        return Err(ApiFailure::not_found("Event not found"));
    }
    let now = Utc::now();
    let rsvp = RsvpEntry {
        id: Uuid::new_v4(),
        event_id,
        full_name: form.text("fullName")?,
        email: form.text("email")?,
        mpesa_phone: form.text("mpesaPhone")?,
        whatsapp_phone: form.text("whatsappPhone")?,
        created_at: now,
        updated_at: now,
    };
    store.rsvps.insert(rsvp.id, rsvp.clone());
    Ok((StatusCode::CREATED, Json(rsvp)))
}

async fn update_rsvp(
    State(db): State<Db>,
    Path((event_id, rsvp_id)): Path<(Uuid, Uuid)>,
    multipart: Multipart,
) -> Result<Json<RsvpEntry>, ApiFailure> {
    let form = Form::read(multipart).await?;
    let mut store = db.write().await;
    let rsvp = store
        .rsvps
        .get_mut(&rsvp_id)
        .filter(|r| r.event_id == event_id)
        .ok_or_else(|| ApiFailure::not_found("RSVP not found"))?;
    rsvp.full_name = form.text("fullName")?;
    rsvp.email = form.text("email")?;
    rsvp.mpesa_phone = form.text("mpesaPhone")?;
    rsvp.whatsapp_phone = form.text("whatsappPhone")?;
    rsvp.updated_at = Utc::now();
    Ok(Json(rsvp.clone()))
}

async fn delete_rsvp(
    State(db): State<Db>,
    Path((event_id, rsvp_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiFailure> {
    let mut store = db.write().await;
    let belongs = store
        .rsvps
        .get(&rsvp_id)
        .is_some_and(|r| r.event_id == event_id);
    if !belongs {
        return Err(ApiFailure::not_found("RSVP not found"));
    }
    store.rsvps.remove(&rsvp_id);
    Ok(StatusCode::NO_CONTENT)
}

// --- partners ---

async fn list_partners(State(db): State<Db>) -> Json<Vec<Partner>> {
    let store = db.read().await;
    let mut partners: Vec<Partner> = store.partners.values().cloned().collect();
    partners.sort_by_key(|p| p.created_at);
    Json(partners)
}

async fn create_partner(
    State(db): State<Db>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Partner>), ApiFailure> {
    let form = Form::read(multipart).await?;
    let now = Utc::now();
    let partner = Partner {
        id: Uuid::new_v4(),
        name: form.text("name")?,
        logo_url: form.file("logo").unwrap_or_default(),
        created_at: now,
        updated_at: now,
    };
    db.write().await.partners.insert(partner.id, partner.clone());
    Ok((StatusCode::CREATED, Json(partner)))
}

async fn update_partner(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<Partner>, ApiFailure> {
    let form = Form::read(multipart).await?;
    let mut store = db.write().await;
    let partner = store
        .partners
        .get_mut(&id)
        .ok_or_else(|| ApiFailure::not_found("Partner not found"))?;
    partner.name = form.text("name")?;
    if let Some(url) = form.file("logo") {
        partner.logo_url = url;
    }
    partner.updated_at = Utc::now();
    Ok(Json(partner.clone()))
}

async fn delete_partner(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiFailure> {
    db.write()
        .await
        .partners
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| ApiFailure::not_found("Partner not found"))
}

// --- contacts (no update route) ---

async fn list_contacts(State(db): State<Db>) -> Json<Vec<Contact>> {
    let store = db.read().await;
    let mut contacts: Vec<Contact> = store.contacts.values().cloned().collect();
    contacts.sort_by_key(|c| c.created_at);
    Json(contacts)
}

async fn create_contact(
    State(db): State<Db>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Contact>), ApiFailure> {
    let form = Form::read(multipart).await?;
    let now = Utc::now();
    let contact = Contact {
        id: Uuid::new_v4(),
        full_name: form.text("fullName")?,
        email: form.text("email")?,
        message: form.text("message")?,
        created_at: now,
        updated_at: now,
    };
    db.write().await.contacts.insert(contact.id, contact.clone());
    Ok((StatusCode::CREATED, Json(contact)))
}

async fn delete_contact(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiFailure> {
    db.write()
        .await
        .contacts
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| ApiFailure::not_found("Contact not found"))
}

// --- posters ---

async fn list_posters(State(db): State<Db>) -> Json<Vec<Poster>> {
    let store = db.read().await;
    let mut posters: Vec<Poster> = store.posters.values().cloned().collect();
    posters.sort_by_key(|p| p.created_at);
    Json(posters)
}

async fn create_poster(
    State(db): State<Db>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Poster>), ApiFailure> {
    let form = Form::read(multipart).await?;
    let now = Utc::now();
    let poster = Poster {
        id: Uuid::new_v4(),
        title: form.text("title")?,
        start_date: form.date("startDate")?,
        end_date: form.date("endDate")?,
        image_url: form.file("image").unwrap_or_default(),
        active: form.flag("active")?,
        created_at: now,
        updated_at: now,
    };
    db.write().await.posters.insert(poster.id, poster.clone());
    Ok((StatusCode::CREATED, Json(poster)))
}

async fn update_poster(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<Poster>, ApiFailure> {
    let form = Form::read(multipart).await?;
    let mut store = db.write().await;
    let poster = store
        .posters
        .get_mut(&id)
        .ok_or_else(|| ApiFailure::not_found("Poster not found"))?;
    poster.title = form.text("title")?;
    poster.start_date = form.date("startDate")?;
    poster.end_date = form.date("endDate")?;
    poster.active = form.flag("active")?;
    if let Some(url) = form.file("image") {
        poster.image_url = url;
    }
    poster.updated_at = Utc::now();
    Ok(Json(poster.clone()))
}

async fn toggle_poster(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<Poster>, ApiFailure> {
    let mut store = db.write().await;
    let poster = store
        .posters
        .get_mut(&id)
        .ok_or_else(|| ApiFailure::not_found("Poster not found"))?;
    poster.active = !poster.active;
    poster.updated_at = Utc::now();
    Ok(Json(poster.clone()))
}

async fn delete_poster(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiFailure> {
    db.write()
        .await
        .posters
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| ApiFailure::not_found("Poster not found"))
}
