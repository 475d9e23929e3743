//! Full resource lifecycle test against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives the client's
//! build/parse pairs over real HTTP with ureq. The transport here is a bare
//! test helper: it attaches a bearer token and nothing else, so what is
//! validated is the client's request encoding and response parsing.

use admin_core::{
    types::{ContactInput, DonationInput, FilePart},
    AdminClient, ApiError, HttpMethod, HttpRequest, HttpResponse,
};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the client
/// handle status interpretation.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let auth = "Bearer test-token";
    let content_type = req
        .headers
        .iter()
        .find(|(name, _)| name == "content-type")
        .map(|(_, value)| value.clone());

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.url).header("authorization", auth).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.url).header("authorization", auth).call(),
        (HttpMethod::Patch, _) => agent
            .patch(&req.url)
            .header("authorization", auth)
            .send_empty(),
        (HttpMethod::Post, Some(body)) => agent
            .post(&req.url)
            .header("authorization", auth)
            .header("content-type", content_type.as_deref().unwrap_or_default())
            .send(&body[..]),
        (HttpMethod::Put, Some(body)) => agent
            .put(&req.url)
            .header("authorization", auth)
            .header("content-type", content_type.as_deref().unwrap_or_default())
            .send(&body[..]),
        (HttpMethod::Post, None) | (HttpMethod::Put, None) => unreachable!("writes carry a form"),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}/api")
}

#[test]
fn donation_lifecycle() {
    let client = AdminClient::new(&start_server());

    // list — should be empty
    let donations = client.parse_list_donations(execute(client.build_list_donations())).unwrap();
    assert!(donations.is_empty(), "expected empty list");

    // create with an attachment
    let input = DonationInput {
        title: "Food drive".to_string(),
        date: "2025-06-05".parse().unwrap(),
        description: "Staples for families".to_string(),
        location: "Kisumu".to_string(),
        image: Some(FilePart {
            file_name: "drive.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: b"fake image bytes".to_vec(),
        }),
    };
    let req = client.build_create_donation(&input);
    let created = client.parse_create_donation(execute(req)).unwrap();
    assert_eq!(created.title, "Food drive");
    assert_eq!(created.location, "Kisumu");
    assert_eq!(created.image_url.as_deref(), Some("/uploads/drive.jpg"));
    let id = created.id;

    // update — no attachment, stored image survives
    let mut updated_input = input.clone();
    updated_input.title = "Food drive (June)".to_string();
    updated_input.image = None;
    let req = client.build_update_donation(id, &updated_input);
    let updated = client.parse_update_donation(execute(req)).unwrap();
    assert_eq!(updated.title, "Food drive (June)");
    assert_eq!(updated.image_url.as_deref(), Some("/uploads/drive.jpg"));

    // metrics reflect the record
    let req = client.build_donation_metrics();
    let metrics = client.parse_donation_metrics(execute(req)).unwrap();
    assert_eq!(metrics.stats.total, 1);
    assert_eq!(metrics.stats.unique_locations, 1);
    assert_eq!(metrics.stats.with_images, 1);
    assert_eq!(metrics.top_locations[0].location, "Kisumu");
    assert_eq!(metrics.monthly_stats[0].donations, 1);

    // delete, then deleting again is NotFound with the server's text
    client.parse_delete_donation(execute(client.build_delete_donation(id))).unwrap();
    let err = client
        .parse_delete_donation(execute(client.build_delete_donation(id)))
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::NotFound {
            message: Some("Donation not found".to_string())
        }
    );
}

#[test]
fn contact_create_and_delete() {
    let client = AdminClient::new(&start_server());

    let input = ContactInput {
        full_name: "Jane Wanjiku".to_string(),
        email: "jane@example.com".to_string(),
        message: "How can I volunteer?".to_string(),
    };
    let created = client
        .parse_create_contact(execute(client.build_create_contact(&input)))
        .unwrap();
    assert_eq!(created.full_name, "Jane Wanjiku");

    let contacts = client
        .parse_list_contacts(execute(client.build_list_contacts()))
        .unwrap();
    assert_eq!(contacts.len(), 1);

    client
        .parse_delete_contact(execute(client.build_delete_contact(created.id)))
        .unwrap();
    let contacts = client
        .parse_list_contacts(execute(client.build_list_contacts()))
        .unwrap();
    assert!(contacts.is_empty());
}
