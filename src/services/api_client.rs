// ============================================================================
// API CLIENT - Typed console endpoints on top of the gateway
// ============================================================================

use crate::error::Result;
use crate::models::{
    Building, BuildingTimeRequest, BulkIgnoreRequest, DeviceRecord, IgnoreUpdateItem,
};
use crate::services::{ApiGateway, RequestOptions};

#[derive(Clone)]
pub struct ApiClient {
    gateway: ApiGateway,
}

impl ApiClient {
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &ApiGateway {
        &self.gateway
    }

    /// List every building
    pub async fn list_buildings(&self) -> Result<Vec<Building>> {
        let buildings: Vec<Building> = self.gateway.get_json("buildings").await?;
        log::info!("🏢 [API] Loaded {} buildings", buildings.len());
        Ok(buildings)
    }

    /// List the devices of one building, optionally narrowed by a search term
    pub async fn list_devices(
        &self,
        building_id: i64,
        limit: u32,
        search: Option<&str>,
    ) -> Result<Vec<DeviceRecord>> {
        let endpoint = devices_endpoint(building_id, limit, search);
        self.gateway.get_json(&endpoint).await
    }

    /// Save a building's scheduled start time ("HH:MM")
    pub async fn set_start_time(&self, building_id: i64, start_time: &str) -> Result<()> {
        let body = BuildingTimeRequest {
            building_id,
            start_time: start_time.to_string(),
        };
        let options = RequestOptions::post_json(&body)?;
        self.gateway
            .request(&format!("buildings/{}/time", building_id), options)
            .await?;
        Ok(())
    }

    /// Submit the whole batch of ignore flags in one request
    pub async fn submit_ignore_updates(&self, items: &[IgnoreUpdateItem]) -> Result<()> {
        let body = BulkIgnoreRequest {
            items: items.to_vec(),
        };
        log::info!("📝 [API] Submitting {} ignore flags", body.items.len());
        let options = RequestOptions::post_json(&body)?;
        self.gateway.request("proevents/ignore/bulk", options).await?;
        Ok(())
    }

    /// Ask the server to recompute derived state for a building
    pub async fn reevaluate(&self, building_id: i64) -> Result<()> {
        self.gateway
            .request(
                &format!("buildings/{}/reevaluate", building_id),
                RequestOptions::post(),
            )
            .await?;
        Ok(())
    }
}

pub fn devices_endpoint(building_id: i64, limit: u32, search: Option<&str>) -> String {
    match search {
        Some(term) => {
            let encoded: String = url::form_urlencoded::byte_serialize(term.as_bytes()).collect();
            format!("devices?building={}&limit={}&search={}", building_id, limit, encoded)
        }
        None => format!("devices?building={}&limit={}", building_id, limit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_term_is_url_encoded() {
        assert_eq!(
            devices_endpoint(3, 100, Some("door & gate")),
            "devices?building=3&limit=100&search=door+%26+gate"
        );
        assert_eq!(devices_endpoint(3, 100, Some("")), "devices?building=3&limit=100&search=");
        assert_eq!(devices_endpoint(9, 10000, None), "devices?building=9&limit=10000");
    }
}
