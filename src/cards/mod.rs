//! Card system: definitions, instances, registry and decks.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `CardDefinition`: Static card data (type, cost, stats, rules)
//! - `CardInstance`: Runtime card state (current stats, slot)
//! - `CardRegistry`: Card definition lookup
//! - `Deck`: Ordered pile of definitions to draw from

pub mod deck;
pub mod definition;
pub mod instance;
pub mod registry;

pub use deck::Deck;
pub use definition::{CardDefinition, CardId, CardType, Stat};
pub use instance::CardInstance;
pub use registry::CardRegistry;
