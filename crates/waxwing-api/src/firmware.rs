//! Firmware update check trigger.
//!
//! The device only refreshes its cached `FwUpdate.ImageAvailable` flag
//! after an explicit nudge at `/LogFile`. The result shows up in a
//! later state poll, not in this response.

use tracing::debug;

use crate::client::WaxClient;
use crate::error::Error;
use crate::models::FirmwareCheckRequest;

impl WaxClient {
    /// Ask the device to check upstream for a newer firmware image.
    pub async fn check_firmware_updates(&self) -> Result<(), Error> {
        debug!("triggering firmware update check");
        let url = self.url_for("/LogFile");
        let mut request = self.http().post(url).json(&FirmwareCheckRequest::new());
        request = self.apply_auth(request);
        request.send().await?.error_for_status()?;
        Ok(())
    }
}
