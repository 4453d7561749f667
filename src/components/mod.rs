//! UI Components
//!
//! Leptos components for the console: shells, tree, documents and admin drawers.

mod api_key_drawer;
mod category_breadcrumb;
mod category_detail_card;
mod category_form_modal;
mod category_trash_modal;
mod category_tree;
mod change_password_modal;
mod delete_confirm_button;
mod delete_preview_modal;
mod document_history_drawer;
mod document_panel;
mod document_reorder_modal;
mod document_trash_drawer;
mod materials_drawer;
mod metadata_rows;
mod modal;
mod preview_view;
mod sider;
mod toast_host;
mod tree_context_menu;
mod tree_toolbar;
mod user_permissions_modal;
mod users_drawer;

pub use api_key_drawer::ApiKeyDrawer;
pub use category_breadcrumb::CategoryBreadcrumb;
pub use category_detail_card::CategoryDetailCard;
pub use category_form_modal::{CategoryFormMode, CategoryFormModal};
pub use category_trash_modal::CategoryTrashModal;
pub use category_tree::CategoryTreePanel;
pub use change_password_modal::ChangePasswordModal;
pub use delete_confirm_button::DeleteConfirmButton;
pub use delete_preview_modal::DeletePreviewModal;
pub use document_history_drawer::DocumentHistoryDrawer;
pub use document_panel::DocumentPanel;
pub use document_reorder_modal::DocumentReorderModal;
pub use document_trash_drawer::DocumentTrashDrawer;
pub use materials_drawer::MaterialsDrawer;
pub use metadata_rows::MetadataRows;
pub use modal::{Drawer, Modal, Spinner};
pub use preview_view::PreviewView;
pub use sider::ResizableSider;
pub use toast_host::ToastHost;
pub use tree_context_menu::TreeContextMenu;
pub use tree_toolbar::TreeToolbar;
pub use user_permissions_modal::UserPermissionsModal;
pub use users_drawer::UsersDrawer;
