pub mod luggage;
pub mod request;

pub use luggage::{
    BoundingBox, Confidence, ErrorPlaceholder, LuggageItem, Measurement,
    ERROR_PLACEHOLDER_DESCRIPTION, NO_LUGGAGE_OBJECT_TYPE,
};
pub use request::EstimateSizeRequest;
