pub mod brand;
pub mod config;
pub mod error;
pub mod formats;
pub mod types;

pub use brand::{BrandProfile, VisualIdentity};
pub use config::AppConfig;
pub use error::{ComponentTooLong, MarketingError, MarketingResult};
pub use formats::{limits_for, limits_for_name, ComponentLimit, FormatLimits};
pub use types::{
    AdCopy, AdFormat, AdRequest, Clarification, ClarificationReason, Component, CopyComponent,
    FormatName,
};
