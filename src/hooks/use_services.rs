use yew::prelude::*;

use super::use_resource::{ResourceHandle, use_resource};
use crate::models::service::Service;
use crate::services::api::AgendaClient;

/// Every service of the business, inactive ones included.
#[hook]
pub fn use_services(business_id: String) -> ResourceHandle<Vec<Service>> {
    use_resource(business_id, |business_id| async move {
        AgendaClient::new()?.list_services(&business_id).await
    })
}
