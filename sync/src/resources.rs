//! Per-resource data + mutation bundles.
//!
//! # Design
//! `AdminApi` owns the client, transport, cache and notifier; each resource
//! accessor returns a thin handle exposing the resource's contract:
//!
//! - `list()` (and `metrics()` where the API provides one) reads through
//!   the query cache under the resource's key.
//! - `create`/`update`/`delete` execute the request and, on success,
//!   invalidate the resource's collection key and emit one success
//!   notification. On failure the cache is left untouched — no optimistic
//!   merging, a refetch is always preferred over a speculative patch.
//! - Event RSVP mutations invalidate both the event's RSVP sub-key and the
//!   events collection, because the parent's derived rsvpCount depends on
//!   the child collection.
//!
//! Every failed round-trip, reads included, emits exactly one error
//! notification carrying the server's message or the generic fallback.

use std::sync::Arc;

use admin_core::types::{
    Activity, ActivityInput, ActivityMetrics, Contact, ContactInput, Donation, DonationInput,
    DonationMetrics, Event, EventInput, Partner, PartnerInput, Poster, PosterInput, RsvpEntry,
    RsvpInput,
};
use admin_core::{AdminClient, ApiError, HttpRequest, HttpResponse};
use tokio::sync::mpsc::UnboundedReceiver;
use uuid::Uuid;

use crate::cache::{QueryCache, QueryKey};
use crate::config::Config;
use crate::error::SyncError;
use crate::notify::{Notification, Notifier};
use crate::transport::{BearerTransport, SessionProvider, Transport, UreqTransport};

fn rsvp_key(event_id: Uuid) -> QueryKey {
    QueryKey::new(["events"]).child(event_id.to_string()).child("rsvps")
}

/// The application's API surface: one handle per resource, sharing a single
/// cache and notification channel.
pub struct AdminApi {
    client: AdminClient,
    transport: Arc<dyn Transport>,
    cache: Arc<QueryCache>,
    notifier: Notifier,
}

impl AdminApi {
    pub fn new(
        client: AdminClient,
        transport: Arc<dyn Transport>,
        cache: Arc<QueryCache>,
        notifier: Notifier,
    ) -> Self {
        Self {
            client,
            transport,
            cache,
            notifier,
        }
    }

    /// Wire the standard stack: ureq transport with bearer credentials from
    /// the session provider, a fresh cache, and a notification channel whose
    /// receiver is handed back for the UI to drain.
    pub fn connect(
        config: &Config,
        session: Arc<dyn SessionProvider>,
    ) -> (Self, UnboundedReceiver<Notification>) {
        let (notifier, notifications) = Notifier::channel();
        let transport = Arc::new(BearerTransport::new(UreqTransport, session));
        let api = Self::new(
            AdminClient::new(&config.api_url),
            transport,
            Arc::new(QueryCache::new()),
            notifier,
        );
        (api, notifications)
    }

    pub fn activities(&self) -> Activities<'_> {
        Activities { api: self }
    }

    pub fn donations(&self) -> Donations<'_> {
        Donations { api: self }
    }

    pub fn events(&self) -> Events<'_> {
        Events { api: self }
    }

    pub fn partners(&self) -> Partners<'_> {
        Partners { api: self }
    }

    pub fn contacts(&self) -> Contacts<'_> {
        Contacts { api: self }
    }

    pub fn posters(&self) -> Posters<'_> {
        Posters { api: self }
    }

    /// One round-trip: execute, parse, and convert any failure into a
    /// single error notification. The caller still receives the error.
    async fn execute<T>(
        &self,
        request: HttpRequest,
        parse: impl FnOnce(HttpResponse) -> Result<T, ApiError>,
    ) -> Result<T, SyncError> {
        let result = match self.transport.execute(request).await {
            Ok(response) => parse(response).map_err(SyncError::from),
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            tracing::warn!(error = %e, "request failed");
            self.notifier.error(e.user_message());
        }
        result
    }

    /// Mutation contract: execute, then invalidate the given keys before
    /// resolving, so no subsequent read of them can return data predating
    /// the mutation, then emit one success notification.
    async fn mutate<T>(
        &self,
        request: HttpRequest,
        parse: impl FnOnce(HttpResponse) -> Result<T, ApiError>,
        invalidate: &[QueryKey],
        success: &str,
    ) -> Result<T, SyncError> {
        let value = self.execute(request, parse).await?;
        for key in invalidate {
            self.cache.invalidate(key).await;
        }
        self.notifier.success(success);
        Ok(value)
    }
}

pub struct Activities<'a> {
    api: &'a AdminApi,
}

impl Activities<'_> {
    pub async fn list(&self) -> Result<Arc<Vec<Activity>>, SyncError> {
        let api = self.api;
        api.cache
            .get_or_fetch(&QueryKey::new(["activities"]), || async move {
                api.execute(api.client.build_list_activities(), |r| {
                    api.client.parse_list_activities(r)
                })
                .await
            })
            .await
    }

    pub async fn metrics(&self) -> Result<Arc<ActivityMetrics>, SyncError> {
        let api = self.api;
        api.cache
            .get_or_fetch(&QueryKey::new(["activities", "metrics"]), || async move {
                api.execute(api.client.build_activity_metrics(), |r| {
                    api.client.parse_activity_metrics(r)
                })
                .await
            })
            .await
    }

    pub async fn create(&self, input: &ActivityInput) -> Result<Activity, SyncError> {
        let api = self.api;
        api.mutate(
            api.client.build_create_activity(input),
            |r| api.client.parse_create_activity(r),
            &[QueryKey::new(["activities"])],
            "Activity created successfully",
        )
        .await
    }

    pub async fn update(&self, id: Uuid, input: &ActivityInput) -> Result<Activity, SyncError> {
        let api = self.api;
        api.mutate(
            api.client.build_update_activity(id, input),
            |r| api.client.parse_update_activity(r),
            &[QueryKey::new(["activities"])],
            "Activity updated successfully",
        )
        .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), SyncError> {
        let api = self.api;
        api.mutate(
            api.client.build_delete_activity(id),
            |r| api.client.parse_delete_activity(r),
            &[QueryKey::new(["activities"])],
            "Activity deleted successfully",
        )
        .await
    }
}

pub struct Donations<'a> {
    api: &'a AdminApi,
}

impl Donations<'_> {
    pub async fn list(&self) -> Result<Arc<Vec<Donation>>, SyncError> {
        let api = self.api;
        api.cache
            .get_or_fetch(&QueryKey::new(["donations"]), || async move {
                api.execute(api.client.build_list_donations(), |r| {
                    api.client.parse_list_donations(r)
                })
                .await
            })
            .await
    }

    pub async fn metrics(&self) -> Result<Arc<DonationMetrics>, SyncError> {
        let api = self.api;
        api.cache
            .get_or_fetch(&QueryKey::new(["donations", "metrics"]), || async move {
                api.execute(api.client.build_donation_metrics(), |r| {
                    api.client.parse_donation_metrics(r)
                })
                .await
            })
            .await
    }

    pub async fn create(&self, input: &DonationInput) -> Result<Donation, SyncError> {
        let api = self.api;
        api.mutate(
            api.client.build_create_donation(input),
            |r| api.client.parse_create_donation(r),
            &[QueryKey::new(["donations"])],
            "Donation created successfully",
        )
        .await
    }

    pub async fn update(&self, id: Uuid, input: &DonationInput) -> Result<Donation, SyncError> {
        let api = self.api;
        api.mutate(
            api.client.build_update_donation(id, input),
            |r| api.client.parse_update_donation(r),
            &[QueryKey::new(["donations"])],
            "Donation updated successfully",
        )
        .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), SyncError> {
        let api = self.api;
        api.mutate(
            api.client.build_delete_donation(id),
            |r| api.client.parse_delete_donation(r),
            &[QueryKey::new(["donations"])],
            "Donation deleted successfully",
        )
        .await
    }
}

pub struct Events<'a> {
    api: &'a AdminApi,
}

impl Events<'_> {
    pub async fn list(&self) -> Result<Arc<Vec<Event>>, SyncError> {
        let api = self.api;
        api.cache
            .get_or_fetch(&QueryKey::new(["events"]), || async move {
                api.execute(api.client.build_list_events(), |r| {
                    api.client.parse_list_events(r)
                })
                .await
            })
            .await
    }

    pub async fn create(&self, input: &EventInput) -> Result<Event, SyncError> {
        let api = self.api;
        api.mutate(
            api.client.build_create_event(input),
            |r| api.client.parse_create_event(r),
            &[QueryKey::new(["events"])],
            "Event created successfully",
        )
        .await
    }

    pub async fn update(&self, id: Uuid, input: &EventInput) -> Result<Event, SyncError> {
        let api = self.api;
        api.mutate(
            api.client.build_update_event(id, input),
            |r| api.client.parse_update_event(r),
            &[QueryKey::new(["events"])],
            "Event updated successfully",
        )
        .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), SyncError> {
        let api = self.api;
        api.mutate(
            api.client.build_delete_event(id),
            |r| api.client.parse_delete_event(r),
            &[QueryKey::new(["events"])],
            "Event deleted successfully",
        )
        .await
    }

    /// The event's RSVP sub-collection, cached under its own sub-key.
    pub async fn rsvps(&self, event_id: Uuid) -> Result<Arc<Vec<RsvpEntry>>, SyncError> {
        let api = self.api;
        api.cache
            .get_or_fetch(&rsvp_key(event_id), || async move {
                api.execute(api.client.build_list_rsvps(event_id), |r| {
                    api.client.parse_list_rsvps(r)
                })
                .await
            })
            .await
    }

    pub async fn create_rsvp(
        &self,
        event_id: Uuid,
        input: &RsvpInput,
    ) -> Result<RsvpEntry, SyncError> {
        let api = self.api;
        api.mutate(
            api.client.build_create_rsvp(event_id, input),
            |r| api.client.parse_create_rsvp(r),
            &[rsvp_key(event_id), QueryKey::new(["events"])],
            "RSVP submitted successfully",
        )
        .await
    }

    pub async fn update_rsvp(
        &self,
        event_id: Uuid,
        rsvp_id: Uuid,
        input: &RsvpInput,
    ) -> Result<RsvpEntry, SyncError> {
        let api = self.api;
        api.mutate(
            api.client.build_update_rsvp(event_id, rsvp_id, input),
            |r| api.client.parse_update_rsvp(r),
            &[rsvp_key(event_id), QueryKey::new(["events"])],
            "RSVP updated successfully",
        )
        .await
    }

    pub async fn delete_rsvp(&self, event_id: Uuid, rsvp_id: Uuid) -> Result<(), SyncError> {
        let api = self.api;
        api.mutate(
            api.client.build_delete_rsvp(event_id, rsvp_id),
            |r| api.client.parse_delete_rsvp(r),
            &[rsvp_key(event_id), QueryKey::new(["events"])],
            "RSVP deleted successfully",
        )
        .await
    }
}

pub struct Partners<'a> {
    api: &'a AdminApi,
}

impl Partners<'_> {
    pub async fn list(&self) -> Result<Arc<Vec<Partner>>, SyncError> {
        let api = self.api;
        api.cache
            .get_or_fetch(&QueryKey::new(["partners"]), || async move {
                api.execute(api.client.build_list_partners(), |r| {
                    api.client.parse_list_partners(r)
                })
                .await
            })
            .await
    }

    pub async fn create(&self, input: &PartnerInput) -> Result<Partner, SyncError> {
        let api = self.api;
        api.mutate(
            api.client.build_create_partner(input),
            |r| api.client.parse_create_partner(r),
            &[QueryKey::new(["partners"])],
            "Partner created successfully",
        )
        .await
    }

    pub async fn update(&self, id: Uuid, input: &PartnerInput) -> Result<Partner, SyncError> {
        let api = self.api;
        api.mutate(
            api.client.build_update_partner(id, input),
            |r| api.client.parse_update_partner(r),
            &[QueryKey::new(["partners"])],
            "Partner updated successfully",
        )
        .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), SyncError> {
        let api = self.api;
        api.mutate(
            api.client.build_delete_partner(id),
            |r| api.client.parse_delete_partner(r),
            &[QueryKey::new(["partners"])],
            "Partner deleted successfully",
        )
        .await
    }
}

/// Contacts are create/delete only — the API exposes no update.
pub struct Contacts<'a> {
    api: &'a AdminApi,
}

impl Contacts<'_> {
    pub async fn list(&self) -> Result<Arc<Vec<Contact>>, SyncError> {
        let api = self.api;
        api.cache
            .get_or_fetch(&QueryKey::new(["contacts"]), || async move {
                api.execute(api.client.build_list_contacts(), |r| {
                    api.client.parse_list_contacts(r)
                })
                .await
            })
            .await
    }

    pub async fn create(&self, input: &ContactInput) -> Result<Contact, SyncError> {
        let api = self.api;
        api.mutate(
            api.client.build_create_contact(input),
            |r| api.client.parse_create_contact(r),
            &[QueryKey::new(["contacts"])],
            "Contact created successfully",
        )
        .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), SyncError> {
        let api = self.api;
        api.mutate(
            api.client.build_delete_contact(id),
            |r| api.client.parse_delete_contact(r),
            &[QueryKey::new(["contacts"])],
            "Contact deleted successfully",
        )
        .await
    }
}

pub struct Posters<'a> {
    api: &'a AdminApi,
}

impl Posters<'_> {
    pub async fn list(&self) -> Result<Arc<Vec<Poster>>, SyncError> {
        let api = self.api;
        api.cache
            .get_or_fetch(&QueryKey::new(["posters"]), || async move {
                api.execute(api.client.build_list_posters(), |r| {
                    api.client.parse_list_posters(r)
                })
                .await
            })
            .await
    }

    pub async fn create(&self, input: &PosterInput) -> Result<Poster, SyncError> {
        let api = self.api;
        api.mutate(
            api.client.build_create_poster(input),
            |r| api.client.parse_create_poster(r),
            &[QueryKey::new(["posters"])],
            "Poster created successfully",
        )
        .await
    }

    pub async fn update(&self, id: Uuid, input: &PosterInput) -> Result<Poster, SyncError> {
        let api = self.api;
        api.mutate(
            api.client.build_update_poster(id, input),
            |r| api.client.parse_update_poster(r),
            &[QueryKey::new(["posters"])],
            "Poster updated successfully",
        )
        .await
    }

    /// Flip the poster's active flag.
    pub async fn toggle(&self, id: Uuid) -> Result<Poster, SyncError> {
        let api = self.api;
        api.mutate(
            api.client.build_toggle_poster(id),
            |r| api.client.parse_toggle_poster(r),
            &[QueryKey::new(["posters"])],
            "Poster status updated successfully",
        )
        .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), SyncError> {
        let api = self.api;
        api.mutate(
            api.client.build_delete_poster(id),
            |r| api.client.parse_delete_poster(r),
            &[QueryKey::new(["posters"])],
            "Poster deleted successfully",
        )
        .await
    }
}
