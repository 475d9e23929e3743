//! Stateless request builder and response parser for the admin API.
//!
//! # Design
//! `AdminClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`. The
//! sync layer executes the actual HTTP round-trip, keeping the core
//! deterministic and free of I/O dependencies.
//!
//! Reads parse with 200, creates with 201, deletes with 204. Writes are
//! multipart/form-data encoded so records can carry file attachments.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::multipart::MultipartForm;
use crate::types::{
    Activity, ActivityInput, ActivityMetrics, Contact, ContactInput, Donation, DonationInput,
    DonationMetrics, Event, EventInput, Partner, PartnerInput, Poster, PosterInput, RsvpEntry,
    RsvpInput,
};

/// Stateless client for the admin API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. The sync layer is responsible for executing the
/// HTTP round-trip between `build_*` and `parse_*`.
#[derive(Debug, Clone)]
pub struct AdminClient {
    base_url: String,
}

impl AdminClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn request(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    fn submit(&self, method: HttpMethod, path: String, form: MultipartForm) -> HttpRequest {
        let (content_type, body) = form.finish();
        HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            headers: vec![("content-type".to_string(), content_type)],
            body: Some(body),
        }
    }

    // --- activities ---

    pub fn build_list_activities(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/activities".to_string())
    }

    pub fn build_activity_metrics(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/activities/metrics".to_string())
    }

    pub fn build_create_activity(&self, input: &ActivityInput) -> HttpRequest {
        self.submit(HttpMethod::Post, "/activities".to_string(), input.to_form())
    }

    pub fn build_update_activity(&self, id: Uuid, input: &ActivityInput) -> HttpRequest {
        self.submit(HttpMethod::Put, format!("/activities/{id}"), input.to_form())
    }

    pub fn build_delete_activity(&self, id: Uuid) -> HttpRequest {
        self.request(HttpMethod::Delete, format!("/activities/{id}"))
    }

    pub fn parse_list_activities(&self, response: HttpResponse) -> Result<Vec<Activity>, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_activity_metrics(&self, response: HttpResponse) -> Result<ActivityMetrics, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_create_activity(&self, response: HttpResponse) -> Result<Activity, ApiError> {
        parse_json(response, 201)
    }

    pub fn parse_update_activity(&self, response: HttpResponse) -> Result<Activity, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_delete_activity(&self, response: HttpResponse) -> Result<(), ApiError> {
        parse_empty(response)
    }

    // --- donations ---

    pub fn build_list_donations(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/donations".to_string())
    }

    pub fn build_donation_metrics(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/donations/metrics".to_string())
    }

    pub fn build_create_donation(&self, input: &DonationInput) -> HttpRequest {
        self.submit(HttpMethod::Post, "/donations".to_string(), input.to_form())
    }

    pub fn build_update_donation(&self, id: Uuid, input: &DonationInput) -> HttpRequest {
        self.submit(HttpMethod::Put, format!("/donations/{id}"), input.to_form())
    }

    pub fn build_delete_donation(&self, id: Uuid) -> HttpRequest {
        self.request(HttpMethod::Delete, format!("/donations/{id}"))
    }

    pub fn parse_list_donations(&self, response: HttpResponse) -> Result<Vec<Donation>, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_donation_metrics(&self, response: HttpResponse) -> Result<DonationMetrics, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_create_donation(&self, response: HttpResponse) -> Result<Donation, ApiError> {
        parse_json(response, 201)
    }

    pub fn parse_update_donation(&self, response: HttpResponse) -> Result<Donation, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_delete_donation(&self, response: HttpResponse) -> Result<(), ApiError> {
        parse_empty(response)
    }

    // --- events ---

    pub fn build_list_events(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/events".to_string())
    }

    pub fn build_create_event(&self, input: &EventInput) -> HttpRequest {
        self.submit(HttpMethod::Post, "/events".to_string(), input.to_form())
    }

    pub fn build_update_event(&self, id: Uuid, input: &EventInput) -> HttpRequest {
        self.submit(HttpMethod::Put, format!("/events/{id}"), input.to_form())
    }

    pub fn build_delete_event(&self, id: Uuid) -> HttpRequest {
        self.request(HttpMethod::Delete, format!("/events/{id}"))
    }

    pub fn parse_list_events(&self, response: HttpResponse) -> Result<Vec<Event>, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_create_event(&self, response: HttpResponse) -> Result<Event, ApiError> {
        parse_json(response, 201)
    }

    pub fn parse_update_event(&self, response: HttpResponse) -> Result<Event, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_delete_event(&self, response: HttpResponse) -> Result<(), ApiError> {
        parse_empty(response)
    }

    // --- event RSVPs (sub-resource) ---

    pub fn build_list_rsvps(&self, event_id: Uuid) -> HttpRequest {
        self.request(HttpMethod::Get, format!("/events/{event_id}/rsvp"))
    }

    pub fn build_create_rsvp(&self, event_id: Uuid, input: &RsvpInput) -> HttpRequest {
        self.submit(
            HttpMethod::Post,
            format!("/events/{event_id}/rsvp"),
            input.to_form(),
        )
    }

    pub fn build_update_rsvp(&self, event_id: Uuid, rsvp_id: Uuid, input: &RsvpInput) -> HttpRequest {
        self.submit(
            HttpMethod::Put,
            format!("/events/{event_id}/rsvp/{rsvp_id}"),
            input.to_form(),
        )
    }

    pub fn build_delete_rsvp(&self, event_id: Uuid, rsvp_id: Uuid) -> HttpRequest {
        self.request(HttpMethod::Delete, format!("/events/{event_id}/rsvp/{rsvp_id}"))
    }

    pub fn parse_list_rsvps(&self, response: HttpResponse) -> Result<Vec<RsvpEntry>, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_create_rsvp(&self, response: HttpResponse) -> Result<RsvpEntry, ApiError> {
        parse_json(response, 201)
    }

    pub fn parse_update_rsvp(&self, response: HttpResponse) -> Result<RsvpEntry, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_delete_rsvp(&self, response: HttpResponse) -> Result<(), ApiError> {
        parse_empty(response)
    }

    // --- partners ---

    pub fn build_list_partners(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/partners".to_string())
    }

    pub fn build_create_partner(&self, input: &PartnerInput) -> HttpRequest {
        self.submit(HttpMethod::Post, "/partners".to_string(), input.to_form())
    }

    pub fn build_update_partner(&self, id: Uuid, input: &PartnerInput) -> HttpRequest {
        self.submit(HttpMethod::Put, format!("/partners/{id}"), input.to_form())
    }

    pub fn build_delete_partner(&self, id: Uuid) -> HttpRequest {
        self.request(HttpMethod::Delete, format!("/partners/{id}"))
    }

    pub fn parse_list_partners(&self, response: HttpResponse) -> Result<Vec<Partner>, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_create_partner(&self, response: HttpResponse) -> Result<Partner, ApiError> {
        parse_json(response, 201)
    }

    pub fn parse_update_partner(&self, response: HttpResponse) -> Result<Partner, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_delete_partner(&self, response: HttpResponse) -> Result<(), ApiError> {
        parse_empty(response)
    }

    // --- contacts (create/delete only, no update) ---

    pub fn build_list_contacts(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/contacts".to_string())
    }

    pub fn build_create_contact(&self, input: &ContactInput) -> HttpRequest {
        self.submit(HttpMethod::Post, "/contacts".to_string(), input.to_form())
    }

    pub fn build_delete_contact(&self, id: Uuid) -> HttpRequest {
        self.request(HttpMethod::Delete, format!("/contacts/{id}"))
    }

    pub fn parse_list_contacts(&self, response: HttpResponse) -> Result<Vec<Contact>, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_create_contact(&self, response: HttpResponse) -> Result<Contact, ApiError> {
        parse_json(response, 201)
    }

    pub fn parse_delete_contact(&self, response: HttpResponse) -> Result<(), ApiError> {
        parse_empty(response)
    }

    // --- posters ---

    pub fn build_list_posters(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/posters".to_string())
    }

    pub fn build_create_poster(&self, input: &PosterInput) -> HttpRequest {
        self.submit(HttpMethod::Post, "/posters".to_string(), input.to_form())
    }

    pub fn build_update_poster(&self, id: Uuid, input: &PosterInput) -> HttpRequest {
        self.submit(HttpMethod::Put, format!("/posters/{id}"), input.to_form())
    }

    /// Flip the poster's active flag. No request body.
    pub fn build_toggle_poster(&self, id: Uuid) -> HttpRequest {
        self.request(HttpMethod::Patch, format!("/posters/{id}/toggle"))
    }

    pub fn build_delete_poster(&self, id: Uuid) -> HttpRequest {
        self.request(HttpMethod::Delete, format!("/posters/{id}"))
    }

    pub fn parse_list_posters(&self, response: HttpResponse) -> Result<Vec<Poster>, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_create_poster(&self, response: HttpResponse) -> Result<Poster, ApiError> {
        parse_json(response, 201)
    }

    pub fn parse_update_poster(&self, response: HttpResponse) -> Result<Poster, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_toggle_poster(&self, response: HttpResponse) -> Result<Poster, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_delete_poster(&self, response: HttpResponse) -> Result<(), ApiError> {
        parse_empty(response)
    }
}

/// The API's error body shape; the `error` field carries the user-visible
/// message.
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
}

/// Map non-expected status codes to the appropriate `ApiError` variant,
/// carrying the server's `error` message when the body provides one.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    let message = server_message(&response.body);
    if response.status == 404 {
        return Err(ApiError::NotFound { message });
    }
    Err(ApiError::Server {
        status: response.status,
        message,
    })
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse, expected: u16) -> Result<T, ApiError> {
    check_status(&response, expected)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

fn parse_empty(response: HttpResponse) -> Result<(), ApiError> {
    check_status(&response, 204)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FilePart;
    use chrono::NaiveDate;

    fn client() -> AdminClient {
        AdminClient::new("http://localhost:8787/api")
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn activity_input() -> ActivityInput {
        ActivityInput {
            title: "Tree planting".to_string(),
            date: date("2025-06-10"),
            description: "Community drive".to_string(),
            image: None,
        }
    }

    #[test]
    fn build_list_activities_produces_correct_request() {
        let req = client().build_list_activities();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:8787/api/activities");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_activity_metrics_targets_metrics_route() {
        let req = client().build_activity_metrics();
        assert_eq!(req.url, "http://localhost:8787/api/activities/metrics");
    }

    #[test]
    fn build_create_activity_is_multipart() {
        let req = client().build_create_activity(&activity_input());
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.headers.len(), 1);
        let (name, value) = &req.headers[0];
        assert_eq!(name, "content-type");
        assert!(value.starts_with("multipart/form-data; boundary="));
        let body = String::from_utf8(req.body.unwrap()).unwrap();
        assert!(body.contains("name=\"title\"\r\n\r\nTree planting"));
        assert!(body.contains("name=\"date\"\r\n\r\n2025-06-10"));
    }

    #[test]
    fn build_create_activity_embeds_image_part() {
        let mut input = activity_input();
        input.image = Some(FilePart {
            file_name: "drive.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: vec![1, 2, 3],
        });
        let req = client().build_create_activity(&input);
        let body = String::from_utf8_lossy(&req.body.unwrap()).into_owned();
        assert!(body.contains("name=\"image\"; filename=\"drive.jpg\""));
    }

    #[test]
    fn build_update_activity_puts_to_id_route() {
        let id = Uuid::nil();
        let req = client().build_update_activity(id, &activity_input());
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(
            req.url,
            "http://localhost:8787/api/activities/00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn build_rsvp_routes_nest_under_event() {
        let event_id = Uuid::nil();
        let rsvp_id = Uuid::new_v4();
        let req = client().build_list_rsvps(event_id);
        assert_eq!(
            req.url,
            "http://localhost:8787/api/events/00000000-0000-0000-0000-000000000000/rsvp"
        );
        let req = client().build_delete_rsvp(event_id, rsvp_id);
        assert_eq!(req.method, HttpMethod::Delete);
        assert!(req.url.ends_with(&format!(
            "/events/00000000-0000-0000-0000-000000000000/rsvp/{rsvp_id}"
        )));
    }

    #[test]
    fn build_toggle_poster_is_patch_without_body() {
        let id = Uuid::nil();
        let req = client().build_toggle_poster(id);
        assert_eq!(req.method, HttpMethod::Patch);
        assert!(req.url.ends_with("/posters/00000000-0000-0000-0000-000000000000/toggle"));
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_list_activities_success() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: r#"[{
                "id": "00000000-0000-0000-0000-000000000001",
                "title": "Cleanup",
                "date": "2025-06-10",
                "description": "Beach cleanup",
                "createdAt": "2025-06-01T10:00:00Z",
                "updatedAt": "2025-06-01T10:00:00Z"
            }]"#
            .to_string(),
        };
        let activities = client().parse_list_activities(response).unwrap();
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].title, "Cleanup");
        assert!(activities[0].image_url.is_none());
    }

    #[test]
    fn parse_delete_donation_not_found_carries_server_text() {
        let response = HttpResponse {
            status: 404,
            headers: Vec::new(),
            body: r#"{"error":"Donation not found"}"#.to_string(),
        };
        let err = client().parse_delete_donation(response).unwrap_err();
        assert_eq!(
            err,
            ApiError::NotFound {
                message: Some("Donation not found".to_string())
            }
        );
        assert_eq!(err.user_message(), "Donation not found");
    }

    #[test]
    fn parse_create_event_wrong_status_without_error_body() {
        let response = HttpResponse {
            status: 500,
            headers: Vec::new(),
            body: "boom".to_string(),
        };
        let err = client().parse_create_event(response).unwrap_err();
        assert!(matches!(err, ApiError::Server { status: 500, message: None }));
        assert_eq!(err.user_message(), crate::error::GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn parse_delete_activity_success() {
        let response = HttpResponse {
            status: 204,
            headers: Vec::new(),
            body: String::new(),
        };
        assert!(client().parse_delete_activity(response).is_ok());
    }

    #[test]
    fn parse_list_events_bad_json() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: "not json".to_string(),
        };
        let err = client().parse_list_events(response).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = AdminClient::new("http://localhost:8787/api/");
        let req = client.build_list_posters();
        assert_eq!(req.url, "http://localhost:8787/api/posters");
    }
}
