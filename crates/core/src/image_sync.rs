//! Product image sync: ERP item images → storefront product images
//!
//! Each image is matched to a storefront product through the item's SKU.
//! Unresolvable items, unknown SKUs and bad image data are logged and
//! skipped; the rest of the batch carries on.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use erpbridge_domain::{BridgeError, ErpItemImage, ImageUpload, Result, SessionToken};
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use crate::erp_ports::ErpGateway;
use crate::storefront_ports::StorefrontGateway;
use crate::sync::{open_session, ErpCredentials};

const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImageSyncReport {
    pub fetched: usize,
    pub uploaded: usize,
    pub skipped: usize,
    pub failed: usize,
}

enum ImageOutcome {
    Uploaded,
    Skipped,
}

/// Decode an ERP base64 image into an upload named after the image id.
pub fn decode_image(image_id: &str, encoded: &str) -> Result<ImageUpload> {
    let bytes = STANDARD.decode(encoded.trim()).map_err(|err| {
        BridgeError::InvalidInput(format!("image {image_id} is not valid base64: {err}"))
    })?;

    Ok(ImageUpload { file_name: format!("{image_id}.png"), mime_type: sniff_mime(&bytes), bytes })
}

/// Guess the MIME type from the file signature.
pub fn sniff_mime(bytes: &[u8]) -> &'static str {
    match bytes {
        [0x89, b'P', b'N', b'G', ..] => "image/png",
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [b'G', b'I', b'F', b'8', ..] => "image/gif",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "image/webp",
        _ => DEFAULT_IMAGE_MIME,
    }
}

pub struct ImageSyncService {
    erp: Arc<dyn ErpGateway>,
    storefront: Arc<dyn StorefrontGateway>,
    credentials: ErpCredentials,
}

impl ImageSyncService {
    pub fn new(
        erp: Arc<dyn ErpGateway>,
        storefront: Arc<dyn StorefrontGateway>,
        credentials: ErpCredentials,
    ) -> Self {
        Self { erp, storefront, credentials }
    }

    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<ImageSyncReport> {
        let session = open_session(self.erp.as_ref(), &self.credentials).await?;
        let images = self.erp.fetch_item_images(&session).await?;

        let mut report = ImageSyncReport { fetched: images.len(), ..Default::default() };

        if images.is_empty() {
            warn!("no images retrieved from ERP");
            return Ok(report);
        }

        for image in &images {
            match self.sync_image(&session, image).await {
                Ok(ImageOutcome::Uploaded) => report.uploaded += 1,
                Ok(ImageOutcome::Skipped) => report.skipped += 1,
                Err(err) => {
                    error!(image_id = %image.id, item_id = %image.item_id, error = %err, "failed to sync image");
                    report.failed += 1;
                }
            }
        }

        info!(
            fetched = report.fetched,
            uploaded = report.uploaded,
            skipped = report.skipped,
            failed = report.failed,
            "image synchronization completed"
        );
        Ok(report)
    }

    async fn sync_image(&self, session: &SessionToken, image: &ErpItemImage) -> Result<ImageOutcome> {
        let sku = self
            .erp
            .find_item_by_id(session, &image.item_id)
            .await?
            .and_then(|item| item.light_crm_code)
            .filter(|code| !code.is_empty());

        let Some(sku) = sku else {
            warn!(item_id = %image.item_id, "could not find SKU for item in ERP");
            return Ok(ImageOutcome::Skipped);
        };

        let Some(product_id) = self.storefront.find_product_id_by_sku(&sku).await? else {
            warn!(sku = %sku, "SKU not found in storefront");
            return Ok(ImageOutcome::Skipped);
        };

        let encoded = self.erp.fetch_item_image_data(session, &image.id).await?;
        let upload = decode_image(&image.id, &encoded)?;

        self.storefront.upload_product_image(product_id, upload).await?;
        info!(image_id = %image.id, sku = %sku, product_id, "image uploaded");

        Ok(ImageOutcome::Uploaded)
    }
}
