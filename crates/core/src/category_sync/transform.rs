//! ERP category → storefront category payload

use erpbridge_domain::constants::{
    CATEGORY_COLUMNS, CATEGORY_LAYOUT_ID, CATEGORY_SORT_ORDER, CATEGORY_STATUS_ENABLED,
    CATEGORY_TOP_MENU, DEFAULT_STORE_ID, ROOT_PARENT_ID, STOREFRONT_LANGUAGE_ID,
};
use erpbridge_domain::{
    CategoryDescription, CategoryPayload, ErpCategory, MappingSnapshot, ParentLink,
};

/// Build the creation/update payload for one ERP category.
///
/// With `set_parent == false` the parent is always root, which lets phase 1
/// create children before their parents exist in the storefront. Otherwise
/// the parent resolves through `snapshot`, falling back to root.
pub fn to_payload(
    category: &ErpCategory,
    snapshot: &MappingSnapshot,
    set_parent: bool,
) -> CategoryPayload {
    let parent_id = if set_parent {
        resolve_parent_id(category, snapshot).unwrap_or(ROOT_PARENT_ID)
    } else {
        ROOT_PARENT_ID
    };

    let name = &category.description;

    CategoryPayload {
        category_description: vec![CategoryDescription {
            name: name.clone(),
            description: format!("Description for {name}"),
            language_id: STOREFRONT_LANGUAGE_ID,
            meta_description: format!("Meta description for {name}"),
            meta_keyword: name.clone(),
            meta_title: name.clone(),
        }],
        sort_order: CATEGORY_SORT_ORDER,
        category_store: vec![DEFAULT_STORE_ID.to_string()],
        parent_id,
        status: CATEGORY_STATUS_ENABLED.to_string(),
        column: CATEGORY_COLUMNS,
        top: CATEGORY_TOP_MENU.to_string(),
        category_layout: vec![CATEGORY_LAYOUT_ID.to_string()],
        keyword: category.code.clone(),
    }
}

/// Storefront id of the category's parent, if it has one and it is mapped.
pub fn resolve_parent_id(category: &ErpCategory, snapshot: &MappingSnapshot) -> Option<i64> {
    category.parent_node_id.as_deref().and_then(|parent| snapshot.get(parent))
}

/// Phase-2 update body, or `None` when there is nothing to link yet.
pub fn parent_link(category: &ErpCategory, snapshot: &MappingSnapshot) -> Option<ParentLink> {
    resolve_parent_id(category, snapshot).map(|parent_id| ParentLink { parent_id })
}
