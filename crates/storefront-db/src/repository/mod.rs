//! # Repository Module
//!
//! Database repository implementations for Storefront.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.collections().list_with_counts()                           │
//! │       ▼                                                                 │
//! │  CollectionRepository                                                  │
//! │  ├── list_with_counts(&self)                                           │
//! │  ├── get_with_count(&self, id)                                         │
//! │  ├── insert / update (&self, ...)                                      │
//! │  └── delete_if_empty(&self, id)                                        │
//! │       │                                                                 │
//! │       │  Parameterized SQL                                              │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD
//! - [`CollectionRepository`](collection::CollectionRepository) - Collection
//!   CRUD with product counts

pub mod collection;
pub mod product;
