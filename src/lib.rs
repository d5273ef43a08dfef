pub mod account;
pub mod amount;
pub mod credential;
pub mod csv;
pub mod directory;
pub mod engine;
pub mod model;

pub use account::{Account, AccountError, AccountHandle, AccountKind, Payee, Status};
pub use amount::Amount;
pub use credential::Credential;
pub use directory::Directory;
pub use engine::{AccountSummary, Bank, EngineError};
pub use model::{Operation, Slot, Target};
