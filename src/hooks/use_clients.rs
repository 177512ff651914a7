use yew::prelude::*;

use super::use_resource::{ResourceHandle, use_resource};
use crate::models::client::Client;
use crate::services::api::AgendaClient;

#[hook]
pub fn use_clients(business_id: String) -> ResourceHandle<Vec<Client>> {
    use_resource(business_id, |business_id| async move {
        AgendaClient::new()?.list_clients(&business_id).await
    })
}
