//! # curio-registry
//!
//! The durable per-token registries of the Curio core:
//!
//! 1. **[`ListingBook`]** — `(ask price, first-sale flag)` per token
//! 2. **[`RoyaltyBook`]** — optional `(receiver, fraction)` royalty policy
//! 3. **[`AuthorRegistry`]** — the immutable author-of-record map
//!
//! Each registry is a pure key-value store with its own validation; caller
//! authorization (owner-only price changes, author-only royalty changes)
//! belongs to the settlement engine, which holds the ownership ledger.

pub mod authors;
pub mod listing_book;
pub mod royalty_book;

pub use authors::AuthorRegistry;
pub use listing_book::ListingBook;
pub use royalty_book::RoyaltyBook;
