//! `SiteDeleteRemote` implementation for the REST client

use async_trait::async_trait;

use crate::error::Result;
use crate::http_client::{HttpUtils, is_success_status};
use crate::traits::{RawApiError, RemoteErrorMapper, SiteDeleteRemote};
use crate::types::SiteId;

use super::{DeleteSiteResponse, RestDeleteClient, STATUS_DELETED};

/// Classify a fully received reply to `sites/{id}/delete`.
///
/// - non-2xx: transport failure (`HttpStatus`), with the API error body attached
/// - 2xx with `"status": "deleted"`: success
/// - 2xx with any other status, no status, or a body that is not a JSON object:
///   `ServiceRejected`
pub(crate) fn classify_delete_response<M: RemoteErrorMapper + ?Sized>(
    mapper: &M,
    site_id: SiteId,
    status_code: u16,
    body: &str,
) -> Result<()> {
    if !is_success_status(status_code) {
        let raw = RawApiError::from_body(body);
        log::warn!(
            "[{}] Delete site {site_id} failed with HTTP {status_code}",
            mapper.client_name()
        );
        return Err(mapper.map_error(status_code, raw));
    }

    let status = HttpUtils::parse_json::<DeleteSiteResponse>(body).and_then(|r| r.status);

    match status.as_deref() {
        Some(STATUS_DELETED) => Ok(()),
        _ => {
            log::warn!(
                "[{}] Delete site {site_id} not confirmed, status: {status:?}",
                mapper.client_name()
            );
            Err(mapper.rejected(site_id, status))
        }
    }
}

#[async_trait]
impl SiteDeleteRemote for RestDeleteClient {
    fn id(&self) -> &'static str {
        "rest"
    }

    async fn delete_site(&self, site_id: SiteId) -> Result<()> {
        let endpoint = format!("sites/{site_id}/delete");
        log::info!("Requesting deletion of site {site_id}");

        let (status_code, body) = self.post_empty(&endpoint).await?;
        classify_delete_response(self, site_id, status_code, &body)?;

        log::info!("Site {site_id} deleted on server");
        Ok(())
    }
}
