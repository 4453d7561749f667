//! Application Context
//!
//! Shared signals provided via Leptos Context API.

use leptos::prelude::*;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Bumped after every category mutation - read
    pub tree_version: ReadSignal<u32>,
    /// Bumped after every category mutation - write
    set_tree_version: WriteSignal<u32>,
    /// Bumped after every document mutation - read
    pub docs_version: ReadSignal<u32>,
    /// Bumped after every document mutation - write
    set_docs_version: WriteSignal<u32>,
    /// A tree mutation is in flight - read
    pub is_mutating: ReadSignal<bool>,
    /// A tree mutation is in flight - write
    set_is_mutating: WriteSignal<bool>,
    /// Node documents include the whole subtree
    pub include_descendants: RwSignal<bool>,
    /// Route requested from outside the router's reach; consumed by the app shell
    pub pending_route: RwSignal<Option<String>>,
}

impl AppContext {
    pub fn new(
        tree_version: (ReadSignal<u32>, WriteSignal<u32>),
        docs_version: (ReadSignal<u32>, WriteSignal<u32>),
        is_mutating: (ReadSignal<bool>, WriteSignal<bool>),
    ) -> Self {
        Self {
            tree_version: tree_version.0,
            set_tree_version: tree_version.1,
            docs_version: docs_version.0,
            set_docs_version: docs_version.1,
            is_mutating: is_mutating.0,
            set_is_mutating: is_mutating.1,
            include_descendants: RwSignal::new(true),
            pending_route: RwSignal::new(None),
        }
    }

    /// Refetch the category tree
    pub fn reload_tree(&self) {
        self.set_tree_version.update(|v| *v += 1);
    }

    /// Refetch document lists
    pub fn reload_documents(&self) {
        self.set_docs_version.update(|v| *v += 1);
    }

    /// Refetch both; tree mutations can change which documents a node shows
    pub fn reload_all(&self) {
        self.reload_tree();
        self.reload_documents();
    }

    /// Claim the mutation slot. False when another mutation holds it.
    pub fn begin_mutation(&self) -> bool {
        if self.is_mutating.get_untracked() {
            return false;
        }
        self.set_is_mutating.set(true);
        true
    }

    pub fn end_mutation(&self) {
        self.set_is_mutating.set(false);
    }

    /// Ask the router to go to `path`
    pub fn navigate(&self, path: impl Into<String>) {
        self.pending_route.set(Some(path.into()));
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
