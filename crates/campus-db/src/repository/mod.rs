//! # Repository Module
//!
//! Database repository implementations for the POS directory.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  PosService                                                            │
//! │       │                                                                 │
//! │       │  db.points_of_sale().find_by_name("Central Café")              │
//! │       ▼                                                                 │
//! │  PosRepository                                                         │
//! │  ├── insert(&self, draft, now)                                         │
//! │  ├── update(&self, id, draft, now)                                     │
//! │  ├── find_all(&self)                                                   │
//! │  ├── find_by_name(&self, name)                                         │
//! │  └── clear(&self)                                                      │
//! │       │                                                                 │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`PosRepository`](pos::PosRepository) - Point of Sale storage

pub mod pos;
