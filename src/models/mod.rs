pub mod itinerary;
pub mod summary;
pub mod trip;

pub use itinerary::{ActivityRecord, ItineraryDay, ItinerarySet};
pub use summary::{DerivedSummary, Variant};
pub use trip::{
    CostBreakdown, ItineraryDetails, Session, TravellerProfile, TripPreferences, TripRequest,
};
