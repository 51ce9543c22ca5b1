//! Domain primitives, services and ports.
//!
//! Purpose: define strongly typed pantry entities and the use-cases that act
//! on them, independent of HTTP and persistence. Inbound adapters call the
//! driving ports in [`ports`]; outbound adapters implement the driven ones.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, UserId, DisplayName, PasswordHash: account model.
//! - PantryItem, PantryItemId: inventory model.
//! - CategoryMapping, ExpiryPredictor: shelf-life estimation.
//! - AccountService, ProfileService, PantryService: driving port
//!   implementations.

pub mod account_service;
pub mod auth;
pub mod calendar;
pub mod category;
pub mod error;
pub mod expiry;
pub mod pantry;
pub mod pantry_service;
pub mod ports;
pub mod profile;
pub mod profile_service;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{CredentialsValidationError, LoginCredentials, NewAccount};
pub use self::calendar::{
    CalendarDateError, DATE_FORMAT, format_calendar_date, parse_calendar_date,
};
pub use self::category::{CategoryCode, CategoryEntry, CategoryMapping};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::expiry::{ExpiryPredictor, ModelState, PredictionError};
pub use self::pantry::{PantryItem, PantryItemDraft, PantryItemId, PantryItemValidationError};
pub use self::pantry_service::PantryService;
pub use self::profile::{ProfileChanges, ProfileUpdate, ProfileUpdateValidationError};
pub use self::profile_service::ProfileService;
pub use self::trace_id::TraceId;
pub use self::user::{
    DisplayName, PasswordHash, User, UserAccount, UserId, UserValidationError,
};
