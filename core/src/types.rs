//! Domain DTOs for the admin API.
//!
//! # Design
//! These types mirror the API's JSON contract (camelCase fields, UUID ids,
//! RFC 3339 timestamps) but are defined independently from the mock-server
//! crate; integration tests catch any schema drift between the two.
//!
//! Read models (`Activity`, `Event`, …) carry the server-owned `id`,
//! `created_at` and `updated_at` fields. Write models (`ActivityInput`, …)
//! carry only the user-editable fields plus an optional file attachment,
//! and know how to encode themselves as a multipart form.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::multipart::MultipartForm;

/// A file attached to a write operation (poster image, partner logo, …).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
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

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
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

/// An attendee registration scoped to a single event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
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

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
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
    /// Derived from the RSVP sub-collection; absent when the server does
    /// not embed it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsvp_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsvp_list: Option<Vec<RsvpEntry>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: Uuid,
    pub name: String,
    pub logo_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Immutable once created: the API exposes no update operation for contacts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
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

// --- metrics aggregates (read-only, server-computed) ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityMonthlyStats {
    pub name: Option<String>,
    pub activities: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityStats {
    pub total: u32,
    pub with_images: u32,
    pub avg_description_length: f64,
    pub recent_activities: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityMetrics {
    pub monthly_stats: Vec<ActivityMonthlyStats>,
    pub stats: ActivityStats,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DonationMonthlyStats {
    pub name: Option<String>,
    pub donations: u32,
    // snake_case on the wire, unlike every other field of this API
    pub unique_locations: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocationStats {
    pub location: String,
    pub count: u32,
    pub last_donation: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DonationStats {
    pub total: u32,
    pub unique_locations: u32,
    pub with_images: u32,
    pub recent_donations: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DonationMetrics {
    pub monthly_stats: Vec<DonationMonthlyStats>,
    pub top_locations: Vec<LocationStats>,
    pub stats: DonationStats,
}

// --- write models ---

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityInput {
    pub title: String,
    pub date: NaiveDate,
    pub description: String,
    pub image: Option<FilePart>,
}

impl ActivityInput {
    pub fn to_form(&self) -> MultipartForm {
        let mut form = MultipartForm::new()
            .text("title", &self.title)
            .text("date", self.date)
            .text("description", &self.description);
        if let Some(image) = &self.image {
            form = form.file("image", image);
        }
        form
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DonationInput {
    pub title: String,
    pub date: NaiveDate,
    pub description: String,
    pub location: String,
    pub image: Option<FilePart>,
}

impl DonationInput {
    pub fn to_form(&self) -> MultipartForm {
        let mut form = MultipartForm::new()
            .text("title", &self.title)
            .text("date", self.date)
            .text("description", &self.description)
            .text("location", &self.location);
        if let Some(image) = &self.image {
            form = form.file("image", image);
        }
        form
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventInput {
    pub title: String,
    pub date: NaiveDate,
    pub location: String,
    pub description: String,
    pub seats_available: u32,
    pub fee: f64,
    pub google_maps_link: String,
    pub image: Option<FilePart>,
}

impl EventInput {
    pub fn to_form(&self) -> MultipartForm {
        let mut form = MultipartForm::new()
            .text("title", &self.title)
            .text("date", self.date)
            .text("location", &self.location)
            .text("description", &self.description)
            .text("seatsAvailable", self.seats_available)
            .text("fee", self.fee)
            .text("googleMapsLink", &self.google_maps_link);
        if let Some(image) = &self.image {
            form = form.file("image", image);
        }
        form
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RsvpInput {
    pub full_name: String,
    pub email: String,
    pub mpesa_phone: String,
    pub whatsapp_phone: String,
}

impl RsvpInput {
    pub fn to_form(&self) -> MultipartForm {
        MultipartForm::new()
            .text("fullName", &self.full_name)
            .text("email", &self.email)
            .text("mpesaPhone", &self.mpesa_phone)
            .text("whatsappPhone", &self.whatsapp_phone)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartnerInput {
    pub name: String,
    pub logo: Option<FilePart>,
}

impl PartnerInput {
    pub fn to_form(&self) -> MultipartForm {
        let mut form = MultipartForm::new().text("name", &self.name);
        if let Some(logo) = &self.logo {
            form = form.file("logo", logo);
        }
        form
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactInput {
    pub full_name: String,
    pub email: String,
    pub message: String,
}

impl ContactInput {
    pub fn to_form(&self) -> MultipartForm {
        MultipartForm::new()
            .text("fullName", &self.full_name)
            .text("email", &self.email)
            .text("message", &self.message)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PosterInput {
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub active: bool,
    pub image: Option<FilePart>,
}

impl PosterInput {
    pub fn to_form(&self) -> MultipartForm {
        let mut form = MultipartForm::new()
            .text("title", &self.title)
            .text("startDate", self.start_date)
            .text("endDate", self.end_date)
            .text("active", self.active);
        if let Some(image) = &self.image {
            form = form.file("image", image);
        }
        form
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn activity_serializes_with_camel_case_keys() {
        let activity = Activity {
            id: Uuid::nil(),
            title: "Tree planting".to_string(),
            date: date("2025-06-10"),
            image_url: Some("/uploads/trees.jpg".to_string()),
            description: "Community drive".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&activity).unwrap();
        assert_eq!(json["imageUrl"], "/uploads/trees.jpg");
        assert_eq!(json["date"], "2025-06-10");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("image_url").is_none());
    }

    #[test]
    fn event_omits_absent_rsvp_fields() {
        let event = Event {
            id: Uuid::nil(),
            title: "Gala".to_string(),
            date: date("2025-09-01"),
            location: "Nairobi".to_string(),
            description: "Annual gala".to_string(),
            seats_available: 100,
            fee: 25.0,
            google_maps_link: "https://maps.example.com/gala".to_string(),
            image_url: None,
            rsvp_count: None,
            rsvp_list: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("rsvpCount").is_none());
        assert!(json.get("rsvpList").is_none());
        assert!(json.get("imageUrl").is_none());
        assert_eq!(json["seatsAvailable"], 100);
    }

    #[test]
    fn donation_monthly_stats_keep_snake_case_location_field() {
        let stats = DonationMonthlyStats {
            name: Some("June".to_string()),
            donations: 4,
            unique_locations: 2,
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["unique_locations"], 2);
    }

    #[test]
    fn donation_metrics_deserialize_from_api_shape() {
        let body = r#"{
            "monthlyStats": [{"name": "May", "donations": 3, "unique_locations": 1}],
            "topLocations": [{"location": "Kisumu", "count": 3, "lastDonation": "2025-05-20"}],
            "stats": {"total": 3, "uniqueLocations": 1, "withImages": 2, "recentDonations": 1}
        }"#;
        let metrics: DonationMetrics = serde_json::from_str(body).unwrap();
        assert_eq!(metrics.top_locations[0].location, "Kisumu");
        assert_eq!(metrics.stats.unique_locations, 1);
        assert_eq!(metrics.monthly_stats[0].unique_locations, 1);
    }

    #[test]
    fn rsvp_entry_roundtrips_through_json() {
        let entry = RsvpEntry {
            id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            full_name: "Jane Wanjiku".to_string(),
            email: "jane@example.com".to_string(),
            mpesa_phone: "254712345678".to_string(),
            whatsapp_phone: "254712345678".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&entry).unwrap();
        let back: RsvpEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
