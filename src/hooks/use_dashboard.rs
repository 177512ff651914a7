use yew::prelude::*;

use super::use_resource::{ResourceHandle, use_resource};
use crate::models::dashboard::DashboardSummary;
use crate::services::api::AgendaClient;

#[hook]
pub fn use_dashboard(business_id: String) -> ResourceHandle<DashboardSummary> {
    use_resource(business_id, |business_id| async move {
        AgendaClient::new()?.dashboard(&business_id).await
    })
}
