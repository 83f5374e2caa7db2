mod draft;
mod methods;
mod transitions;
mod types;

#[cfg(test)]
mod tests;

pub use draft::WorkEntryDraft;
pub use types::{
    EntryAction, GpsCoordinate, MaterialUsage, PhotoKind, WeatherSnapshot, WorkEntry,
    WorkEntryStatus, WorkPhoto,
};
