//! Client-side form validation.
//!
//! Validators return a structured result (ok, or the full list of
//! field-level errors) rather than throwing, so callers can render every
//! problem at once and tests never depend on panic control flow. A failed
//! validation means no request is built; the server re-enforces all of these
//! rules authoritatively.
//!
//! Field presence for typed values (dates, numbers) is already guaranteed by
//! the input structs, so only the rules the types cannot express appear
//! here.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{
    ActivityInput, ContactInput, DonationInput, EventInput, PosterInput, RsvpInput,
};

static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());
static KENYAN_PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^254\d{9}$").unwrap());
static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://\S+$").unwrap());

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

pub type ValidationResult = Result<(), Vec<FieldError>>;

struct Errors(Vec<FieldError>);

impl Errors {
    fn new() -> Self {
        Self(Vec::new())
    }

    fn require(&mut self, field: &'static str, value: &str, message: &'static str) {
        if value.trim().is_empty() {
            self.0.push(FieldError { field, message });
        }
    }

    fn check(&mut self, field: &'static str, ok: bool, message: &'static str) {
        if !ok {
            self.0.push(FieldError { field, message });
        }
    }

    fn finish(self) -> ValidationResult {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self.0)
        }
    }
}

pub fn validate_activity(input: &ActivityInput) -> ValidationResult {
    let mut errors = Errors::new();
    errors.require("title", &input.title, "Title is required");
    errors.require("description", &input.description, "Description is required");
    errors.finish()
}

pub fn validate_donation(input: &DonationInput) -> ValidationResult {
    let mut errors = Errors::new();
    errors.require("title", &input.title, "Title is required");
    errors.require("description", &input.description, "Description is required");
    errors.require("location", &input.location, "Location is required");
    errors.finish()
}

pub fn validate_event(input: &EventInput) -> ValidationResult {
    let mut errors = Errors::new();
    errors.require("title", &input.title, "Title is required");
    errors.require("location", &input.location, "Location is required");
    errors.require("description", &input.description, "Description is required");
    errors.check(
        "seatsAvailable",
        input.seats_available >= 1,
        "Must have at least 1 seat available",
    );
    errors.check("fee", input.fee >= 0.0, "Fee cannot be negative");
    // The map link is optional; validate only when present.
    if !input.google_maps_link.trim().is_empty() {
        errors.check(
            "googleMapsLink",
            URL.is_match(input.google_maps_link.trim()),
            "Must be a valid URL",
        );
    }
    errors.finish()
}

pub fn validate_rsvp(input: &RsvpInput) -> ValidationResult {
    let mut errors = Errors::new();
    errors.require("fullName", &input.full_name, "Full name is required");
    errors.check("email", EMAIL.is_match(&input.email), "Invalid email address");
    errors.check(
        "mpesaPhone",
        KENYAN_PHONE.is_match(&input.mpesa_phone),
        "Phone number must be in format: 254XXXXXXXXX",
    );
    errors.check(
        "whatsappPhone",
        KENYAN_PHONE.is_match(&input.whatsapp_phone),
        "Phone number must be in format: 254XXXXXXXXX",
    );
    errors.finish()
}

pub fn validate_contact(input: &ContactInput) -> ValidationResult {
    let mut errors = Errors::new();
    errors.require("fullName", &input.full_name, "Full name is required");
    errors.check("email", EMAIL.is_match(&input.email), "Invalid email address");
    errors.require("message", &input.message, "Message is required");
    errors.finish()
}

/// Poster dates must not precede `today`, and the end date must not precede
/// the start date. `today` is a parameter so validation stays deterministic
/// under test.
pub fn validate_poster(input: &PosterInput, today: NaiveDate) -> ValidationResult {
    let mut errors = Errors::new();
    errors.require("title", &input.title, "Title is required");
    errors.check(
        "startDate",
        input.start_date >= today,
        "Start date cannot be in the past",
    );
    errors.check(
        "endDate",
        input.end_date >= today,
        "End date cannot be in the past",
    );
    errors.check(
        "endDate",
        input.end_date >= input.start_date,
        "End date must be after start date",
    );
    errors.finish()
}
