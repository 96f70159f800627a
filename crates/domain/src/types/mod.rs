//! Domain types and models

pub mod catalog;
pub mod category;
pub mod order;

pub use catalog::{
    ErpItem, ErpItemBalance, ErpItemCategory, ErpItemImage, ErpItemRef, ImageUpload,
    ProductDescription, ProductPayload, QuantityUpdate,
};
pub use category::{
    CategoryDescription, CategoryMapping, CategoryPayload, ErpCategory, MappingSnapshot,
    ParentLink, SessionToken,
};
pub use order::{
    Descr, ErpAddress, ErpCompany, ErpDeliveryInfo, ErpIdentifier, ErpItemIdentifier,
    ErpLineItem, ErpOrderBody, ErpOrderData, ErpOrderDocument, ErpOrderHeader, ErpOrderLine,
    ErpTrader, StorefrontOrder, StorefrontOrderProduct,
};
