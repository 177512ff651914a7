use yew::prelude::*;

use super::use_resource::{ResourceHandle, use_resource};
use crate::models::slot::PublicBusiness;
use crate::services::api::AgendaClient;

/// Business, services and staff behind a public booking link.
#[hook]
pub fn use_public_business(slug: String) -> ResourceHandle<PublicBusiness> {
    use_resource(slug, |slug| async move {
        AgendaClient::new()?.public_business(&slug).await
    })
}
